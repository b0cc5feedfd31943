//! Pinhole camera and projected ball geometry.

use crate::geometry::{Point3d, Rect};

/// A ball as seen through a [`WorldView`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position in pixels (`x`, `y`) and camera-space depth (`z`).
    pub center: Point3d,
    /// Radius on screen in pixels.
    pub radius: f64,
    /// Radius in world units.
    pub world_radius: f64,
}

impl Projection {
    /// True if the projected point lies in front of the camera.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.center.z > 0.0
    }

    /// Pixel rectangle covering the projected disc.
    ///
    /// Padded by one extra column on the right and one row at the bottom to
    /// cover rounding in the fills.
    #[must_use]
    pub fn bounding(&self) -> Rect {
        let Point3d { x, y, .. } = self.center;
        let r = self.radius;
        Rect::new(
            (x - r) as i32,
            (y - r) as i32,
            (x + r + 2.0) as i32,
            (y + r + 1.0) as i32,
        )
    }
}

/// Minimal pinhole camera.
///
/// World `+y` maps to screen down. Depth is the distance along the viewing
/// direction, so points behind the camera get `z <= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldView {
    camera: Point3d,
    look_at: Point3d,
    focal_length: f64,
    screen_center: (f64, f64),
    forward: Point3d,
    right: Point3d,
    down: Point3d,
}

impl WorldView {
    /// Camera at `camera` looking at `look_at`, projecting onto a screen
    /// centered at `screen_center`.
    #[must_use]
    pub fn new(
        camera: Point3d,
        look_at: Point3d,
        focal_length: f64,
        screen_center: (f64, f64),
    ) -> Self {
        let mut forward = (look_at - camera).normalized();
        if forward == Point3d::ZERO {
            forward = Point3d::new(0.0, 0.0, 1.0);
        }
        let mut right = Point3d::new(0.0, 1.0, 0.0).cross(forward).normalized();
        if right == Point3d::ZERO {
            // looking straight up or down
            right = Point3d::new(1.0, 0.0, 0.0);
        }
        let down = forward.cross(right);

        Self {
            camera,
            look_at,
            focal_length,
            screen_center,
            forward,
            right,
            down,
        }
    }

    /// Camera position.
    #[must_use]
    pub fn camera(&self) -> Point3d {
        self.camera
    }

    /// Point the camera looks at.
    #[must_use]
    pub fn look_at(&self) -> Point3d {
        self.look_at
    }

    /// Focal length in pixels.
    #[must_use]
    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Screen position of the optical axis.
    #[must_use]
    pub fn screen_center(&self) -> (f64, f64) {
        self.screen_center
    }

    /// Project a world point to `(screen_x, screen_y, depth)`.
    ///
    /// Points at or behind the camera keep their depth but land on the
    /// screen center.
    #[must_use]
    pub fn project_point(&self, p: Point3d) -> Point3d {
        let d = p - self.camera;
        let z = d.scalar_prod(self.forward);
        let (cx, cy) = self.screen_center;
        if z <= 0.0 {
            return Point3d::new(cx, cy, z);
        }
        let f = self.focal_length / z;
        Point3d::new(
            cx + d.scalar_prod(self.right) * f,
            cy + d.scalar_prod(self.down) * f,
            z,
        )
    }

    /// Project a sphere; the screen radius is `radius * focal / z`, or zero
    /// behind the camera.
    #[must_use]
    pub fn project_ball(&self, center: Point3d, radius: f64) -> Projection {
        let projected = self.project_point(center);
        let screen_radius = if projected.z > 0.0 {
            radius * self.focal_length / projected.z
        } else {
            0.0
        };
        Projection {
            center: projected,
            radius: screen_radius,
            world_radius: radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn front_view() -> WorldView {
        WorldView::new(
            Point3d::new(0.0, 0.0, -100.0),
            Point3d::ZERO,
            100.0,
            (50.0, 40.0),
        )
    }

    #[test]
    fn test_axis_maps_to_screen_center() {
        let p = front_view().project_point(Point3d::ZERO);
        assert_relative_eq!(p.x, 50.0);
        assert_relative_eq!(p.y, 40.0);
        assert_relative_eq!(p.z, 100.0);
    }

    #[test]
    fn test_screen_orientation() {
        let v = front_view();
        let p = v.project_point(Point3d::new(10.0, 20.0, 0.0));
        assert_relative_eq!(p.x, 60.0);
        assert_relative_eq!(p.y, 60.0);
    }

    #[test]
    fn test_perspective_shrinks_with_distance() {
        let v = front_view();
        let near = v.project_ball(Point3d::new(0.0, 0.0, 0.0), 10.0);
        let far = v.project_ball(Point3d::new(0.0, 0.0, 100.0), 10.0);
        assert_relative_eq!(near.radius, 10.0);
        assert_relative_eq!(far.radius, 5.0);
        assert_relative_eq!(far.world_radius, 10.0);
    }

    #[test]
    fn test_behind_camera() {
        let v = front_view();
        let p = v.project_ball(Point3d::new(0.0, 0.0, -150.0), 10.0);
        assert!(!p.is_visible());
        assert_eq!(p.radius, 0.0);
        assert_relative_eq!(p.center.z, -50.0);
    }

    #[test]
    fn test_vertical_view_falls_back() {
        let v = WorldView::new(
            Point3d::new(0.0, -100.0, 0.0),
            Point3d::ZERO,
            100.0,
            (0.0, 0.0),
        );
        let p = v.project_point(Point3d::new(10.0, 0.0, 0.0));
        assert_relative_eq!(p.z, 100.0);
        assert_relative_eq!(p.x.abs(), 10.0);
    }

    #[test]
    fn test_bounding_padding() {
        let p = Projection {
            center: Point3d::new(20.0, 30.0, 5.0),
            radius: 4.0,
            world_radius: 1.0,
        };
        assert_eq!(p.bounding(), Rect::new(16, 26, 26, 35));
    }
}
