//! Analytic rasterization of circles and circle connectors.
//!
//! Both fills decide pixel coverage algebraically (no supersampling) and
//! shade each pixel from its position relative to the disc center, which
//! fakes a sphere lit from above.
//!
//! # Algorithms
//!
//! - **Midpoint Circle**: filled discs by 8-fold symmetric scanline spans
//! - **Tapered connector**: per-pixel quadratic solve for the position along
//!   a cone silhouette joining two circles
//!
//! Pixels outside a shape are never written, so shapes can be layered.

mod connector;
mod primitives;

pub use connector::{connect_circles, connect_circles_px, gradient_table, Connector, Disc};
pub use primitives::{circle, circle_shading, fill_circle, fill_top_half_circle};

/// Round a screen coordinate to the nearest pixel (`int(v + 0.5)`, truncating).
#[inline]
pub(crate) fn round_px(v: f64) -> i32 {
    (v + 0.5) as i32
}
