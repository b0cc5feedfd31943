//! Tapered connector between two circles (cone silhouette).
//!
//! The shape is the union of all circles whose center and radius are
//! linearly interpolated between the two end circles. For a pixel we solve
//! for the interpolation parameter `l` of the circle passing through it,
//! which yields both coverage and the color/radius gradient position.

use super::primitives::circle_shading;
use super::round_px;
use crate::color::Color;
use crate::framebuffer::Framebuffer;

/// One end of a connector: a colored circle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// Center X.
    pub x: f64,
    /// Center Y.
    pub y: f64,
    /// Radius.
    pub r: f64,
    /// Fill color at this end.
    pub color: Color,
}

impl Disc {
    /// Create a new disc.
    #[must_use]
    pub const fn new(x: f64, y: f64, r: f64, color: Color) -> Self {
        Self { x, y, r, color }
    }

    /// Snap center and radius to whole pixels.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(
            f64::from(round_px(self.x)),
            f64::from(round_px(self.y)),
            f64::from(round_px(self.r)),
            self.color,
        )
    }
}

/// Geometry of a connector, reduced to the coefficients of the per-pixel
/// quadratic.
///
/// With `v = c2 - c1`, `d = r2 - r1` and `w = p - c1`, a point `p` lies on
/// the circle at parameter `l` when
/// `(|v|² - d²) l² - 2 (w·v + r1 d) l + (|w|² - r1²) = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    x1: f64,
    y1: f64,
    r1: f64,
    x2: f64,
    y2: f64,
    r2: f64,
    vx: f64,
    vy: f64,
    d: f64,
    a: f64,
}

impl Connector {
    /// Build a connector from end centers and radii.
    #[must_use]
    pub fn new(x1: f64, y1: f64, r1: f64, x2: f64, y2: f64, r2: f64) -> Self {
        let vx = x2 - x1;
        let vy = y2 - y1;
        let d = r2 - r1;
        Self {
            x1,
            y1,
            r1,
            x2,
            y2,
            r2,
            vx,
            vy,
            d,
            a: vx * vx + vy * vy - d * d,
        }
    }

    /// Build a connector joining two discs.
    #[must_use]
    pub fn between(a: &Disc, b: &Disc) -> Self {
        Self::new(a.x, a.y, a.r, b.x, b.y, b.r)
    }

    /// Parameter along the axis of the circle covering `(x, y)`, or `None`
    /// if the point lies outside the silhouette.
    ///
    /// Points inside the second end circle always map to `1`. Otherwise the
    /// larger root not exceeding `1` is taken. A root beyond either end falls
    /// back to that end circle's own disc test.
    #[must_use]
    pub fn parameter_at(&self, x: f64, y: f64) -> Option<f64> {
        let dx2 = x - self.x2;
        let dy2 = y - self.y2;
        if dx2 * dx2 + dy2 * dy2 <= self.r2 * self.r2 {
            return Some(1.0);
        }

        let dx = x - self.x1;
        let dy = y - self.y1;
        let b = -2.0 * (self.vx * dx + self.vy * dy + self.r1 * self.d);
        let c = dx * dx + dy * dy - self.r1 * self.r1;

        let l = if self.a == 0.0 {
            if b == 0.0 {
                return None;
            }
            -c / b
        } else {
            let p = b / self.a;
            let q = c / self.a;
            let disc = p * p / 4.0 - q;
            if disc < 0.0 {
                return None;
            }
            let sqrt_disc = disc.sqrt();
            let l = -p / 2.0 + sqrt_disc;
            if l > 1.0 {
                l - 2.0 * sqrt_disc
            } else {
                l
            }
        };

        // Not inside the second circle (checked above), so past-the-end misses.
        if l > 1.0 {
            return None;
        }
        if l < 0.0 {
            if c > 0.0 {
                return None;
            }
            return Some(0.0);
        }
        Some(l)
    }

    /// Interpolated center at parameter `l`.
    #[must_use]
    pub fn center_at(&self, l: f64) -> (f64, f64) {
        (self.x1 + l * self.vx, self.y1 + l * self.vy)
    }

    /// Interpolated radius at parameter `l`.
    #[must_use]
    pub fn radius_at(&self, l: f64) -> f64 {
        self.r1 + l * self.d
    }
}

/// 256-step color ramp from `from` (index 0) to `to` (index 255).
#[must_use]
pub fn gradient_table(from: Color, to: Color) -> [Color; 256] {
    let mut cols = [Color::BLACK; 256];
    for (i, col) in cols.iter_mut().enumerate() {
        *col = from.mix(to, i as f64 / 255.0);
    }
    cols
}

/// Fill the silhouette joining two discs, rounding them to whole pixels.
///
/// Color follows a gradient from `from.color` to `to.color` along the axis;
/// with `shading > 0` each pixel is shaded against the virtual circle it
/// belongs to. Pixels outside the silhouette are left untouched.
pub fn connect_circles(fb: &mut Framebuffer, from: Disc, to: Disc, shading: f64) {
    connect_circles_px(fb, from.rounded(), to.rounded(), shading);
}

/// [`connect_circles`] without rounding; discs are used as given.
pub fn connect_circles_px(fb: &mut Framebuffer, from: Disc, to: Disc, shading: f64) {
    let width = fb.width() as i32;
    let height = fb.height() as i32;

    let x_min = ((from.x - from.r).min(to.x - to.r).floor() as i32).max(0);
    let x_max = ((from.x + from.r).max(to.x + to.r).ceil() as i32).min(width - 1);
    let y_min = ((from.y - from.r).min(to.y - to.r).floor() as i32).max(0);
    let y_max = ((from.y + from.r).max(to.y + to.r).ceil() as i32).min(height - 1);
    if x_min > x_max || y_min > y_max {
        return;
    }

    let cols = gradient_table(from.color, to.color);
    let conn = Connector::between(&from, &to);

    for y in y_min..=y_max {
        let yf = f64::from(y);
        for x in x_min..=x_max {
            let xf = f64::from(x);
            let Some(l) = conn.parameter_at(xf, yf) else {
                continue;
            };
            let mut col = cols[((l * 255.0) as usize).min(255)];
            if shading > 0.0 {
                let (tcx, tcy) = conn.center_at(l);
                col = circle_shading(xf - tcx, yf - tcy, conn.radius_at(l), col, shading);
            }
            fb.put(x, y, col.to_rgba());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{mix_colors, Rgba};
    use approx::assert_relative_eq;

    const A: Color = Color::new(200, 0, 100);
    const B: Color = Color::new(0, 200, 50);

    fn fb(w: u32, h: u32) -> Framebuffer {
        Framebuffer::new(w, h).expect("framebuffer creation should succeed")
    }

    fn close(a: Color, b: Color) -> bool {
        let d = |x: u8, y: u8| (i16::from(x) - i16::from(y)).abs() <= 1;
        d(a.r, b.r) && d(a.g, b.g) && d(a.b, b.b)
    }

    #[test]
    fn test_gradient_endpoints() {
        let cols = gradient_table(A, B);
        assert_eq!(cols[0], A);
        assert_eq!(cols[255], B);
        assert!(close(cols[127], mix_colors(A, B, 0.5)));
    }

    #[test]
    fn test_degenerate_connector_is_disc() {
        let conn = Connector::new(5.0, 5.0, 3.0, 5.0, 5.0, 3.0);
        assert_eq!(conn.parameter_at(5.0, 5.0), Some(1.0));
        assert_eq!(conn.parameter_at(8.0, 5.0), Some(1.0));
        assert_eq!(conn.parameter_at(9.0, 5.0), None);
    }

    #[test]
    fn test_parameter_on_tangent_edge() {
        let conn = Connector::new(0.0, 0.0, 3.0, 10.0, 0.0, 3.0);
        let l = conn.parameter_at(5.0, 3.0).unwrap();
        assert_relative_eq!(l, 0.5, epsilon = 1e-9);
        assert_eq!(conn.parameter_at(5.0, 4.0), None);
    }

    #[test]
    fn test_parameter_prefers_far_end() {
        let conn = Connector::new(0.0, 0.0, 3.0, 10.0, 0.0, 3.0);
        // On the axis both l = 0.2 and l = 0.8 pass through (5, 0).
        assert_relative_eq!(conn.parameter_at(5.0, 0.0).unwrap(), 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_parameter_behind_first_end() {
        let conn = Connector::new(0.0, 0.0, 3.0, 10.0, 0.0, 3.0);
        assert_eq!(conn.parameter_at(-4.0, 0.0), None);
        let l = conn.parameter_at(-3.0, 0.0).unwrap();
        assert!(l.abs() < 1e-9);
    }

    #[test]
    fn test_stadium_silhouette() {
        let mut fb = fb(40, 30);
        let from = Disc::new(10.0, 15.0, 4.0, A);
        let to = Disc::new(20.0, 15.0, 4.0, B);
        connect_circles(&mut fb, from, to, 0.0);

        for y in 0..30i32 {
            for x in 0..40i32 {
                // Squared distance to the axis segment from (10, 15) to (20, 15).
                let dy = y - 15;
                let dx = if x < 10 { x - 10 } else if x > 20 { x - 20 } else { 0 };
                let dist2 = dx * dx + dy * dy;
                if dist2 == 16 {
                    continue;
                }
                let drawn = fb.pixel_at(x, y).unwrap().is_opaque();
                assert_eq!(drawn, dist2 < 16, "pixel ({x}, {y})");
            }
        }

        // Tangent edge at the axis midpoint sits at exactly l = 0.5.
        let mid = Color::from(fb.get_pixel(15, 11).unwrap());
        assert!(close(mid, mix_colors(A, B, 0.5)));
        assert_eq!(Color::from(fb.get_pixel(22, 15).unwrap()), B);
    }

    #[test]
    fn test_tapered_connector_covers_both_ends() {
        let mut fb = fb(60, 40);
        connect_circles(
            &mut fb,
            Disc::new(10.0, 20.0, 8.0, A),
            Disc::new(45.0, 20.0, 3.0, B),
            0.0,
        );
        assert!(fb.get_pixel(4, 20).unwrap().is_opaque());
        assert!(fb.get_pixel(47, 20).unwrap().is_opaque());
        assert!(fb.get_pixel(30, 20).unwrap().is_opaque());
        assert!(!fb.get_pixel(45, 27).unwrap().is_opaque());
        assert!(!fb.get_pixel(10, 30).unwrap().is_opaque());
    }

    #[test]
    fn test_leaves_outside_untouched() {
        let mut fb = fb(30, 30);
        fb.clear(Rgba::WHITE);
        connect_circles(
            &mut fb,
            Disc::new(5.0, 5.0, 2.0, A),
            Disc::new(10.0, 10.0, 2.0, B),
            1.0,
        );
        assert_eq!(fb.get_pixel(25, 25), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(0, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_offscreen_connector_noop() {
        let mut fb = fb(10, 10);
        connect_circles(
            &mut fb,
            Disc::new(-50.0, -50.0, 3.0, A),
            Disc::new(-30.0, -40.0, 3.0, B),
            0.5,
        );
        assert_eq!(fb.drawn_pixel_count(), 0);
    }
}
