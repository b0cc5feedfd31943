//! Filled circles with position-based edge shading.

use super::round_px;
use crate::color::Color;
use crate::framebuffer::Framebuffer;

/// Shade a pixel at offset `(dx, dy)` from the center of a disc of radius `r`.
///
/// The lower half (`dy > 0`) is darkened by up to `255 * shading`, the upper
/// half lightened by up to `128 * shading`. The horizontal meridian
/// (`dy == 0`) and `shading == 0` return `col` untouched.
///
/// The amount blends a sphere rim term `1 - sqrt(1 - dy²/r²)` with the
/// linear term `|dy| / r`, weighted by the normalized distance from center.
#[must_use]
pub fn circle_shading(dx: f64, dy: f64, r: f64, col: Color, shading: f64) -> Color {
    if shading == 0.0 || dy == 0.0 || r <= 0.0 {
        return col;
    }
    let sh1 = 1.0 - (1.0 - dy * dy / (r * r)).max(0.0).sqrt();
    let d = (dx * dx + dy * dy).sqrt() / r;
    let sh2 = dy.abs() / r;
    let sh = (1.0 - d) * sh1 + d * sh2;
    if dy > 0.0 {
        col.darken((255.0 * sh * shading) as u8)
    } else {
        col.lighten((128.0 * sh * shading) as u8)
    }
}

/// Fill a shaded disc; center and radius are rounded to whole pixels.
pub fn fill_circle(fb: &mut Framebuffer, cx: f64, cy: f64, r: f64, col: Color, shading: f64) {
    circle(fb, round_px(cx), round_px(cy), round_px(r), col, shading);
}

/// Fill only the upper half (rows at or above the center) of a shaded disc.
///
/// Used for the near half of a sphere whose lower half is covered by
/// something drawn in front of it.
pub fn fill_top_half_circle(
    fb: &mut Framebuffer,
    cx: f64,
    cy: f64,
    r: f64,
    col: Color,
    shading: f64,
) {
    circle_impl(fb, round_px(cx), round_px(cy), round_px(r), col, true, shading);
}

/// Fill a shaded disc at integer coordinates.
pub fn circle(fb: &mut Framebuffer, cx: i32, cy: i32, r: i32, col: Color, shading: f64) {
    circle_impl(fb, cx, cy, r, col, false, shading);
}

/// Midpoint circle fill.
///
/// Each step of the octant walk yields up to four spans (`±y` rows of half
/// width `x`, `±x` rows of half width `y`); the lower two are skipped for
/// `top_half_only`. Radii larger than the raster take [`circle_rows`]
/// instead, so the walk never outgrows the visible area.
fn circle_impl(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    r: i32,
    col: Color,
    top_half_only: bool,
    shading: f64,
) {
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(r));
    let width = i64::from(fb.width());
    let height = i64::from(fb.height());
    if r < 0 || cx + r < 0 || cy + r < 0 || cx - r > width || cy - r > height {
        return;
    }
    if r > width + height {
        circle_rows(fb, cx, cy, r, col, top_half_only, shading);
        return;
    }

    let rf = r as f64;
    let mut fill = |left: i64, right: i64, dy: i64| {
        fill_span(fb, cx, cy, rf, left, right, dy, col, shading);
    };

    fill(-r, r, 0);

    let mut f = 1 - r;
    let mut ddf_x = 1;
    let mut ddf_y = -2 * r;
    let mut x = 0;
    let mut y = r;

    while x < y {
        if f >= 0 {
            y -= 1;
            ddf_y += 2;
            f += ddf_y;
        }
        x += 1;
        ddf_x += 2;
        f += ddf_x;

        fill(-x, x, -y);
        fill(-y, y, -x);
        if !top_half_only {
            fill(-x, x, y);
            fill(-y, y, x);
        }
    }
}

/// Fill a huge disc row by row over the visible rows only, with the exact
/// half width `floor(sqrt(r² - dy²))`.
fn circle_rows(
    fb: &mut Framebuffer,
    cx: i64,
    cy: i64,
    r: i64,
    col: Color,
    top_half_only: bool,
    shading: f64,
) {
    let rf = r as f64;
    let last_row = if top_half_only { cy } else { cy + r };
    let rows = (cy - r).max(0)..=last_row.min(i64::from(fb.height()) - 1);
    for y in rows {
        let dy = y - cy;
        let dyf = dy as f64;
        let half = (rf * rf - dyf * dyf).max(0.0).sqrt() as i64;
        fill_span(fb, cx, cy, rf, -half, half, dy, col, shading);
    }
}

/// Write one shaded span `cx + left ..= cx + right` on row `cy + dy`,
/// clipped to the raster.
#[allow(clippy::too_many_arguments)]
fn fill_span(
    fb: &mut Framebuffer,
    cx: i64,
    cy: i64,
    r: f64,
    left: i64,
    right: i64,
    dy: i64,
    col: Color,
    shading: f64,
) {
    let y = cy + dy;
    if y < 0 || y >= i64::from(fb.height()) {
        return;
    }
    let left = (cx + left).max(0);
    let right = (cx + right).min(i64::from(fb.width()) - 1);
    for x in left..=right {
        let shaded = circle_shading((x - cx) as f64, dy as f64, r, col, shading);
        fb.put(x as i32, y as i32, shaded.to_rgba());
    }
}
