//! Color types and blending.
//!
//! [`Color`] is the logical three-channel surface color carried through the
//! tracers. [`Rgba`] is the raster pixel; its alpha channel only marks
//! whether a pixel has been drawn (255) or is still unset (0).

/// Opaque surface color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Move every channel toward 0 by `amount / 255`.
    #[must_use]
    pub fn darken(self, amount: u8) -> Self {
        let f = |v: u8| -> u8 { (u32::from(v) * (255 - u32::from(amount)) / 255) as u8 };
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Move every channel toward 255 by `amount / 255`.
    #[must_use]
    pub fn lighten(self, amount: u8) -> Self {
        let f = |v: u8| -> u8 {
            (255 - (255 - u32::from(v)) * (255 - u32::from(amount)) / 255) as u8
        };
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Channel-wise linear interpolation toward `other`.
    ///
    /// `t` is clamped to `[0, 1]`; results are truncated.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let f = |a: u8, b: u8| -> u8 { (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8 };
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }

    /// Convert to a drawn (fully opaque) raster pixel.
    #[must_use]
    pub const fn to_rgba(self) -> Rgba {
        Rgba::rgb(self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Rgba> for Color {
    fn from(px: Rgba) -> Self {
        Self::new(px.r, px.g, px.b)
    }
}

/// Linear-interpolate two colors channel-wise at `t`.
#[must_use]
pub fn mix_colors(a: Color, b: Color, t: f64) -> Color {
    a.mix(b, t)
}

/// Darken a color by `amount` (0-255).
#[must_use]
pub fn darken(color: Color, amount: u8) -> Color {
    color.darken(amount)
}

/// Lighten a color by `amount` (0-255).
#[must_use]
pub fn lighten(color: Color, amount: u8) -> Color {
    color.lighten(amount)
}

/// RGBA raster pixel with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0 = unset, 255 = drawn).
    pub a: u8,
}

impl Rgba {
    /// Unset pixel.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Whether this pixel has been drawn.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darken_extremes() {
        let c = Color::new(200, 100, 50);
        assert_eq!(c.darken(0), c);
        assert_eq!(c.darken(255), Color::BLACK);
    }

    #[test]
    fn test_lighten_extremes() {
        let c = Color::new(200, 100, 50);
        assert_eq!(c.lighten(0), c);
        assert_eq!(c.lighten(255), Color::WHITE);
    }

    #[test]
    fn test_darken_half() {
        let c = Color::new(200, 100, 0);
        let d = c.darken(128);
        // 200 * 127 / 255 = 99
        assert_eq!(d, Color::new(99, 49, 0));
    }

    #[test]
    fn test_lighten_half() {
        let c = Color::new(0, 255, 100);
        let l = c.lighten(128);
        // 255 - 255 * 127 / 255 = 128
        assert_eq!(l.r, 128);
        assert_eq!(l.g, 255);
    }

    #[test]
    fn test_mix() {
        let mid = mix_colors(Color::BLACK, Color::WHITE, 0.5);
        assert_eq!(mid, Color::new(127, 127, 127));
        assert_eq!(Color::BLACK.mix(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.mix(Color::WHITE, 1.0), Color::WHITE);
    }

    #[test]
    fn test_mix_clamps() {
        assert_eq!(Color::BLACK.mix(Color::WHITE, -1.0), Color::BLACK);
        assert_eq!(Color::BLACK.mix(Color::WHITE, 3.0), Color::WHITE);
    }

    #[test]
    fn test_mix_descending() {
        let c = Color::new(200, 0, 0).mix(Color::new(100, 0, 0), 0.5);
        assert_eq!(c.r, 150);
    }

    #[test]
    fn test_free_functions_match_methods() {
        let c = Color::new(10, 20, 30);
        assert_eq!(darken(c, 40), c.darken(40));
        assert_eq!(lighten(c, 40), c.lighten(40));
    }

    #[test]
    fn test_to_rgba_is_opaque() {
        let px = Color::new(1, 2, 3).to_rgba();
        assert!(px.is_opaque());
        assert_eq!(Color::from(px), Color::new(1, 2, 3));
    }

    #[test]
    fn test_rgba_default_is_unset() {
        assert_eq!(Rgba::default(), Rgba::TRANSPARENT);
        assert!(!Rgba::TRANSPARENT.is_opaque());
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let color = Rgba::new(10, 20, 30, 40);
        let arr = color.to_array();
        assert_eq!(arr, [10, 20, 30, 40]);
        assert_eq!(Rgba::from_array(arr), color);
    }
}
