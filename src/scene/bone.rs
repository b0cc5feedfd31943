//! Tapered links between two balls.

use super::{BallId, Scene};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::render::{connect_circles, Disc};
use crate::tracer::BoneTracer;

/// Two balls joined by the tube of interpolated spheres between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bone {
    balls: [BallId; 2],
}

impl Bone {
    /// Join `first` and `second`.
    #[must_use]
    pub const fn new(first: BallId, second: BallId) -> Self {
        Self {
            balls: [first, second],
        }
    }

    /// The two end balls.
    #[must_use]
    pub const fn balls(&self) -> [BallId; 2] {
        self.balls
    }

    /// Tracer over the projected ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] or [`Error::Unprojected`] if an end
    /// cannot be resolved to a projected ball.
    pub fn tracer(&self, scene: &Scene) -> Result<BoneTracer> {
        let [a, b] = self.balls;
        let (first, second) = (scene.ball(a)?, scene.ball(b)?);
        let pa = first.projection().ok_or(Error::Unprojected(a))?;
        let pb = second.projection().ok_or(Error::Unprojected(b))?;
        Ok(BoneTracer::new(pa, first.color, pb, second.color))
    }

    /// Union of both balls' screen rectangles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] for a foreign handle.
    pub fn bounding(&self, scene: &Scene) -> Result<Rect> {
        let [a, b] = self.balls;
        Ok(scene.ball(a)?.bounding().union(&scene.ball(b)?.bounding()))
    }

    /// Rasterize the projected silhouette with [`connect_circles`].
    ///
    /// # Errors
    ///
    /// Same as [`Bone::tracer`].
    pub fn draw_flat(&self, scene: &Scene, fb: &mut Framebuffer, shading: f64) -> Result<()> {
        let [a, b] = self.balls;
        let (first, second) = (scene.ball(a)?, scene.ball(b)?);
        let pa = first.projection().ok_or(Error::Unprojected(a))?;
        let pb = second.projection().ok_or(Error::Unprojected(b))?;
        if !(pa.is_visible() && pb.is_visible()) {
            return Ok(());
        }
        connect_circles(
            fb,
            Disc::new(pa.center.x, pa.center.y, pa.radius, first.color),
            Disc::new(pb.center.x, pb.center.y, pb.radius, second.color),
            shading,
        );
        Ok(())
    }
}
