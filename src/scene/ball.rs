//! Spheres and the helpers used to pose them.

use super::view::{Projection, WorldView};
use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Axis, Point3d, Rect};
use crate::render::fill_circle;

/// A colored sphere in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// World-space center.
    pub center: Point3d,
    /// World-space radius.
    pub radius: f64,
    /// Surface color.
    pub color: Color,
    projection: Option<Projection>,
}

impl Ball {
    /// Create a ball at `(x, y, z)`.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, radius: f64, color: Color) -> Self {
        Self::at(Point3d::new(x, y, z), radius, color)
    }

    /// Create a ball at `center`.
    #[must_use]
    pub const fn at(center: Point3d, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
            projection: None,
        }
    }

    /// Project through `view`, replacing any earlier projection.
    pub fn project(&mut self, view: &WorldView) {
        self.projection = Some(view.project_ball(self.center, self.radius));
    }

    /// Last projection, or `None` if the ball was never projected.
    #[must_use]
    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    /// Screen rectangle of the projection; [`Rect::EMPTY_SENTINEL`] before
    /// projecting.
    #[must_use]
    pub fn bounding(&self) -> Rect {
        self.projection.map_or(Rect::EMPTY_SENTINEL, |p| p.bounding())
    }

    /// Move along the line from `other` so the centers are `distance` apart.
    ///
    /// Coincident centers give no direction and leave the ball in place.
    pub fn set_distance(&mut self, distance: f64, other: &Ball) {
        let span = self.center - other.center;
        let len = span.length();
        if len == 0.0 {
            log::trace!("set_distance on coincident centers ignored");
            return;
        }
        self.center = other.center + span.times(distance / len);
    }

    /// Rotate the center around `other`'s center.
    pub fn rotate_around(&mut self, other: &Ball, angle: f64, axis: Axis) {
        self.center = self.center.rotated_around(other.center, angle, axis);
    }

    /// Put the center on `other`'s surface.
    pub fn move_to_sphere(&mut self, other: &Ball) {
        self.set_distance(other.radius, other);
    }

    /// Leave exactly `gap` between the two surfaces.
    pub fn set_gap(&mut self, gap: f64, other: &Ball) {
        self.set_distance(self.radius + other.radius + gap, other);
    }

    /// Put the center on the surface of the tube joining `first` and
    /// `second`.
    ///
    /// The fraction along the bone is the cosine of the angle between the
    /// bone axis and the direction from `first` to this ball, not the
    /// projection of the center onto the axis. At that fraction the radius
    /// is interpolated and the ball is moved onto the resulting sphere. A
    /// fraction `<= 0` snaps onto `first` and `>= 1` onto `second`, so a ball
    /// lying on the axis between the ends snaps onto `second`. A ball at
    /// `first`'s center has no direction and snaps onto `first`.
    pub fn move_to_bone(&mut self, first: &Ball, second: &Ball) {
        let span = second.center - first.center;
        let offset = self.center - first.center;
        let norm = span.length() * offset.length();
        let f = if norm == 0.0 {
            0.0
        } else {
            span.scalar_prod(offset) / norm
        };

        if f <= 0.0 {
            self.move_to_sphere(first);
        } else if f >= 1.0 {
            self.move_to_sphere(second);
        } else {
            let inner = Ball::at(
                first.center + span.times(f),
                first.radius + f * (second.radius - first.radius),
                Color::BLACK,
            );
            self.move_to_sphere(&inner);
        }
    }

    /// Multiply center and radius by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.center = self.center.times(factor);
        self.radius *= factor;
    }

    /// Rasterize the projected disc with [`fill_circle`]; does nothing
    /// before projecting.
    pub fn draw_flat(&self, fb: &mut Framebuffer, shading: f64) {
        if let Some(p) = self.projection {
            if p.is_visible() {
                fill_circle(fb, p.center.x, p.center.y, p.radius, self.color, shading);
            }
        }
    }
}
