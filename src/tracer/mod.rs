//! Per-pixel tracers and depth compositing.
//!
//! A [`Tracer`] answers, for one screen pixel, whether something covers it
//! and at what depth, surface direction and color. Tracers compose into a
//! tree ([`GroupTracer`] picks the nearest hit per pixel; lighting tracers
//! recolor the winner) and the tree is scanned once per frame by
//! [`draw_tracer`].

mod bone;
mod group;
mod image;
mod lighting;

pub use bone::BoneTracer;
pub use group::GroupTracer;
pub use image::ImageTracer;
pub use lighting::{DirectionalLightTracer, PointLight, PointLightTracer};

use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point3d, Rect};

/// Result of a successful trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Camera-space depth; smaller is closer.
    pub depth: f64,
    /// Outward surface direction (not necessarily normalized).
    /// [`Point3d::ZERO`] means no directional information.
    pub direction: Point3d,
    /// Surface color.
    pub color: Color,
}

/// Per-pixel hit test.
pub trait Tracer: Send + Sync {
    /// Trace pixel `(x, y)`; `None` means nothing covers it.
    fn trace(&self, x: i32, y: i32) -> Option<Hit>;

    /// Pixel rectangle outside which [`Tracer::trace`] never hits.
    ///
    /// Only a rejection hint; it need not be tight.
    fn bounds(&self) -> Rect;
}

impl<T: Tracer + ?Sized> Tracer for Box<T> {
    fn trace(&self, x: i32, y: i32) -> Option<Hit> {
        (**self).trace(x, y)
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

/// A tracer that composes children added to it.
pub trait WrappingTracer: Tracer {
    /// Append a child tracer.
    fn add(&mut self, tracer: Box<dyn Tracer>);
}

/// Region of `fb` that has to be scanned for `tracer`, inclusive on all
/// edges.
fn scan_region<T: Tracer + ?Sized>(tracer: &T, fb: &Framebuffer) -> Option<Rect> {
    let bounds = tracer.bounds();
    if bounds.covers_nothing() {
        return None;
    }
    fb.bounds().intersect(&bounds)
}

/// Scan `tracer` over `fb`, writing every hit as a drawn pixel.
///
/// Pixels without a hit keep their previous value. `on_row` runs after each
/// scanned row with its y coordinate.
pub fn draw_tracer<T, F>(tracer: &T, fb: &mut Framebuffer, mut on_row: F)
where
    T: Tracer + ?Sized,
    F: FnMut(i32),
{
    let Some(r) = scan_region(tracer, fb) else {
        log::debug!("tracer bounds {:?} miss the framebuffer", tracer.bounds());
        return;
    };
    log::debug!("tracing region {r:?}");

    for y in r.min_y..=r.max_y {
        for x in r.min_x..=r.max_x {
            if let Some(hit) = tracer.trace(x, y) {
                fb.put(x, y, hit.color.to_rgba());
            }
        }
        on_row(y);
    }
}

/// Parallel [`draw_tracer`]: rows are disjoint, so each one is traced
/// independently.
#[cfg(feature = "parallel")]
pub fn draw_tracer_parallel<T: Tracer + ?Sized>(tracer: &T, fb: &mut Framebuffer) {
    use rayon::prelude::*;

    let Some(r) = scan_region(tracer, fb) else {
        return;
    };
    log::debug!("tracing region {r:?} in parallel");

    fb.par_rows_mut().for_each(|(y, row)| {
        let y = y as i32;
        if y < r.min_y || y > r.max_y {
            return;
        }
        for x in r.min_x..=r.max_x {
            if let Some(hit) = tracer.trace(x, y) {
                let idx = (x as usize) * 4;
                row[idx..idx + 4].copy_from_slice(&hit.color.to_rgba().to_array());
            }
        }
    });
}
