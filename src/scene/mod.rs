//! Scene graph: balls, bones and figures.
//!
//! Every [`Ball`] lives in a [`Scene`] arena and is referred to by its
//! [`BallId`]. Bones and figures only hold handles, so a ball shared by
//! several bones (a joint) is one primitive, and handle equality is
//! primitive identity.
//!
//! A frame goes through three steps: project every ball through a
//! [`WorldView`], build a tracer tree from the root [`Figure`], then scan the
//! tree with [`crate::tracer::draw_tracer`].

mod ball;
mod bone;
mod figure;
mod view;

pub use ball::Ball;
pub use bone::Bone;
pub use figure::{BallSet, Figure, Thing};
pub use view::{Projection, WorldView};

use crate::error::{Error, Result};
use std::fmt;

/// Handle of a ball in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallId(usize);

impl BallId {
    /// Handle for the ball at arena slot `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena owning all balls of a frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    balls: Vec<Ball>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ball and return its handle.
    pub fn add_ball(&mut self, ball: Ball) -> BallId {
        self.balls.push(ball);
        BallId(self.balls.len() - 1)
    }

    /// Look up a ball.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] if `id` is not from this scene.
    pub fn ball(&self, id: BallId) -> Result<&Ball> {
        self.balls.get(id.0).ok_or(Error::UnknownBall(id))
    }

    /// Look up a ball mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] if `id` is not from this scene.
    pub fn ball_mut(&mut self, id: BallId) -> Result<&mut Ball> {
        self.balls.get_mut(id.0).ok_or(Error::UnknownBall(id))
    }

    /// All balls in insertion order.
    #[must_use]
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Handles of all balls in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = BallId> {
        (0..self.balls.len()).map(BallId)
    }

    /// Number of balls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    /// True if the scene holds no balls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Project every ball, whether or not a figure references it.
    pub fn project_all(&mut self, view: &WorldView) {
        for ball in &mut self.balls {
            ball.project(view);
        }
        log::debug!("projected {} balls", self.balls.len());
    }

    /// Place ball `id` on the surface of the tube of `bone`, see
    /// [`Ball::move_to_bone`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] if any handle is not from this scene.
    pub fn move_to_bone(&mut self, id: BallId, bone: &Bone) -> Result<()> {
        let [a, b] = bone.balls();
        let first = *self.ball(a)?;
        let second = *self.ball(b)?;
        self.ball_mut(id)?.move_to_bone(&first, &second);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Point3d;

    #[test]
    fn test_add_and_lookup() {
        let mut scene = Scene::new();
        let a = scene.add_ball(Ball::new(1.0, 2.0, 3.0, 4.0, Color::WHITE));
        let b = scene.add_ball(Ball::new(5.0, 6.0, 7.0, 8.0, Color::BLACK));
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.ball(b).unwrap().radius, 8.0);
        assert_eq!(scene.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_unknown_ball() {
        let scene = Scene::new();
        let err = scene.ball(BallId::new(3)).unwrap_err();
        assert!(matches!(err, Error::UnknownBall(id) if id.index() == 3));
        assert_eq!(BallId::new(3).to_string(), "#3");
    }

    #[test]
    fn test_project_all() {
        let mut scene = Scene::new();
        let id = scene.add_ball(Ball::new(0.0, 0.0, 0.0, 5.0, Color::WHITE));
        assert!(scene.ball(id).unwrap().projection().is_none());

        let view = WorldView::new(Point3d::new(0.0, 0.0, -50.0), Point3d::ZERO, 50.0, (10.0, 10.0));
        scene.project_all(&view);
        let p = scene.ball(id).unwrap().projection().unwrap();
        assert_eq!(p.radius, 5.0);
    }

    #[test]
    fn test_move_to_bone() {
        let mut scene = Scene::new();
        let a = scene.add_ball(Ball::new(0.0, 0.0, 0.0, 2.0, Color::WHITE));
        let b = scene.add_ball(Ball::new(10.0, 0.0, 0.0, 2.0, Color::WHITE));
        let c = scene.add_ball(Ball::new(3.0, 3.0 * 3f64.sqrt(), 0.0, 1.0, Color::WHITE));
        scene.move_to_bone(c, &Bone::new(a, b)).unwrap();
        let center = scene.ball(c).unwrap().center;
        let off = center - Point3d::new(5.0, 0.0, 0.0);
        assert!((off.length() - 2.0).abs() < 1e-9);
    }
}
