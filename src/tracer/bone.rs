//! Tracer for a projected bone: two spheres joined by a tapered tube.

use super::{Hit, Tracer};
use crate::color::Color;
use crate::geometry::{Point3d, Rect};
use crate::render::Connector;
use crate::scene::Projection;

/// Traces the swept-sphere volume between two projected balls.
///
/// Coverage uses the same connector solve as the flat rasterizer, on the
/// unrounded projections. At parameter `l` the center, radius, depth and
/// color are interpolated between the ends; the visible surface point lies
/// `sqrt(r² - dx² - dy²)` pixels in front of the interpolated center,
/// converted back to world units for the depth.
///
/// A ball traces as a bone joining it to itself.
#[derive(Debug, Clone, Copy)]
pub struct BoneTracer {
    connector: Connector,
    z: [f64; 2],
    world_radius: [f64; 2],
    color: [Color; 2],
    bounds: Rect,
    visible: bool,
}

impl BoneTracer {
    /// Tracer between two projected ends.
    ///
    /// If either end is at or behind the camera the tracer never hits.
    #[must_use]
    pub fn new(
        first: &Projection,
        first_color: Color,
        second: &Projection,
        second_color: Color,
    ) -> Self {
        let visible = first.is_visible() && second.is_visible();
        let bounds = if visible {
            first.bounding().union(&second.bounding())
        } else {
            Rect::EMPTY_SENTINEL
        };
        Self {
            connector: Connector::new(
                first.center.x,
                first.center.y,
                first.radius,
                second.center.x,
                second.center.y,
                second.radius,
            ),
            z: [first.center.z, second.center.z],
            world_radius: [first.world_radius, second.world_radius],
            color: [first_color, second_color],
            bounds,
            visible,
        }
    }

    /// Tracer for a single ball.
    #[must_use]
    pub fn ball(projection: &Projection, color: Color) -> Self {
        Self::new(projection, color, projection, color)
    }

    /// False if the bone is (partly) behind the camera.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Tracer for BoneTracer {
    fn trace(&self, x: i32, y: i32) -> Option<Hit> {
        if !self.visible {
            return None;
        }
        let (xf, yf) = (f64::from(x), f64::from(y));
        let l = self.connector.parameter_at(xf, yf)?;

        let (cx, cy) = self.connector.center_at(l);
        let r = self.connector.radius_at(l);
        let cz = self.z[0] + l * (self.z[1] - self.z[0]);
        let world_r = self.world_radius[0] + l * (self.world_radius[1] - self.world_radius[0]);

        let dx = xf - cx;
        let dy = yf - cy;
        let dz = (r * r - dx * dx - dy * dy).max(0.0).sqrt();
        let scale = if r > 0.0 { world_r / r } else { 0.0 };

        Some(Hit {
            depth: cz - dz * scale,
            direction: Point3d::new(dx, dy, -dz),
            color: self.color[0].mix(self.color[1], l),
        })
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
