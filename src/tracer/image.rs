//! Pre-rendered raster as a flat tracer layer.

use super::{Hit, Tracer};
use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point3d, Rect};

/// Replays an already rendered image at a fixed depth.
///
/// Only fully opaque pixels hit; everything else is a miss so layers
/// underneath show through. Hits carry no surface direction.
#[derive(Debug, Clone)]
pub struct ImageTracer {
    image: Framebuffer,
    bounds: Rect,
    depth: f64,
}

impl ImageTracer {
    /// Layer `image` at `depth`, bounded by the image itself.
    #[must_use]
    pub fn new(image: Framebuffer, depth: f64) -> Self {
        let bounds = image.bounds();
        Self {
            image,
            bounds,
            depth,
        }
    }

    /// Restrict hits to `bounds` (further limited by the image extent).
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// The replayed image.
    #[must_use]
    pub fn image(&self) -> &Framebuffer {
        &self.image
    }
}

impl Tracer for ImageTracer {
    fn trace(&self, x: i32, y: i32) -> Option<Hit> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let px = self.image.pixel_at(x, y)?;
        px.is_opaque().then(|| Hit {
            depth: self.depth,
            direction: Point3d::ZERO,
            color: Color::from(px),
        })
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
