//! Figures: ordered, nestable groups of things.

use super::{BallId, Bone, Scene, WorldView};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::tracer::{draw_tracer, BoneTracer, GroupTracer, Tracer, WrappingTracer};
use std::collections::HashSet;
use std::sync::Arc;

/// Anything a figure can hold.
#[derive(Debug, Clone)]
pub enum Thing {
    /// A single ball.
    Ball(BallId),
    /// A bone between two balls.
    Bone(Bone),
    /// A nested figure; may be shared between parents.
    Figure(Arc<Figure>),
}

impl Thing {
    /// Project the balls this thing refers to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] for a foreign handle.
    pub fn project(&self, scene: &mut Scene, view: &WorldView) -> Result<()> {
        match self {
            Thing::Ball(id) => scene.ball_mut(*id)?.project(view),
            Thing::Bone(bone) => {
                for id in bone.balls() {
                    scene.ball_mut(id)?.project(view);
                }
            }
            Thing::Figure(figure) => figure.project(scene, view)?,
        }
        Ok(())
    }

    /// Screen rectangle of the projected thing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] for a foreign handle.
    pub fn bounding(&self, scene: &Scene) -> Result<Rect> {
        match self {
            Thing::Ball(id) => Ok(scene.ball(*id)?.bounding()),
            Thing::Bone(bone) => bone.bounding(scene),
            Thing::Figure(figure) => figure.bounding(scene),
        }
    }

    /// Tracer for the projected thing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] or [`Error::Unprojected`] if a ball
    /// cannot be resolved to a projection.
    pub fn tracer(&self, scene: &Scene) -> Result<Box<dyn Tracer>> {
        Ok(match self {
            Thing::Ball(id) => Box::new(ball_tracer(scene, *id)?),
            Thing::Bone(bone) => Box::new(bone.tracer(scene)?),
            Thing::Figure(figure) => Box::new(figure.tracer(scene)?),
        })
    }

    /// Rasterize without depth testing.
    ///
    /// # Errors
    ///
    /// Same as [`Thing::tracer`].
    pub fn draw_flat(&self, scene: &Scene, fb: &mut Framebuffer, shading: f64) -> Result<()> {
        match self {
            Thing::Ball(id) => {
                let ball = scene.ball(*id)?;
                if ball.projection().is_none() {
                    return Err(Error::Unprojected(*id));
                }
                ball.draw_flat(fb, shading);
            }
            Thing::Bone(bone) => bone.draw_flat(scene, fb, shading)?,
            Thing::Figure(figure) => figure.draw_flat(scene, fb, shading)?,
        }
        Ok(())
    }

    /// Depth-first, left-to-right walk adding every referenced ball to `set`.
    pub fn collect_balls(&self, set: &mut BallSet) {
        match self {
            Thing::Ball(id) => {
                set.insert(*id);
            }
            Thing::Bone(bone) => {
                for id in bone.balls() {
                    set.insert(id);
                }
            }
            Thing::Figure(figure) => {
                for thing in &figure.things {
                    thing.collect_balls(set);
                }
            }
        }
    }
}

/// A ball traces as a bone joining it to itself.
fn ball_tracer(scene: &Scene, id: BallId) -> Result<BoneTracer> {
    let ball = scene.ball(id)?;
    let p = ball.projection().ok_or(Error::Unprojected(id))?;
    Ok(BoneTracer::ball(p, ball.color))
}

impl From<BallId> for Thing {
    fn from(id: BallId) -> Self {
        Thing::Ball(id)
    }
}

impl From<Bone> for Thing {
    fn from(bone: Bone) -> Self {
        Thing::Bone(bone)
    }
}

impl From<Figure> for Thing {
    fn from(figure: Figure) -> Self {
        Thing::Figure(Arc::new(figure))
    }
}

impl From<Arc<Figure>> for Thing {
    fn from(figure: Arc<Figure>) -> Self {
        Thing::Figure(figure)
    }
}

/// Unique balls of a scene graph in first-visit order.
///
/// Filled by [`Thing::collect_balls`]; a ball reachable through several
/// parents appears once.
#[derive(Debug, Clone, Default)]
pub struct BallSet {
    seen: HashSet<BallId>,
    order: Vec<BallId>,
}

impl BallSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`; returns false if it was already present.
    pub fn insert(&mut self, id: BallId) -> bool {
        if !self.seen.insert(id) {
            return false;
        }
        self.order.push(id);
        true
    }

    /// True if `id` has been visited.
    #[must_use]
    pub fn contains(&self, id: BallId) -> bool {
        self.seen.contains(&id)
    }

    /// Number of unique balls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no ball was visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in first-visit order.
    pub fn iter(&self) -> impl Iterator<Item = BallId> + '_ {
        self.order.iter().copied()
    }
}

impl IntoIterator for BallSet {
    type Item = BallId;
    type IntoIter = std::vec::IntoIter<BallId>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

/// An ordered collection of things, drawn as one unit.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    things: Vec<Thing>,
}

impl Figure {
    /// Create an empty figure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a thing.
    pub fn add(&mut self, thing: impl Into<Thing>) {
        self.things.push(thing.into());
    }

    /// Builder form of [`Figure::add`].
    #[must_use]
    pub fn with(mut self, thing: impl Into<Thing>) -> Self {
        self.add(thing);
        self
    }

    /// Direct children.
    #[must_use]
    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    /// Project every ball reachable from this figure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] for a foreign handle.
    pub fn project(&self, scene: &mut Scene, view: &WorldView) -> Result<()> {
        for thing in &self.things {
            thing.project(scene, view)?;
        }
        Ok(())
    }

    /// Union of the children's screen rectangles; [`Rect::EMPTY_SENTINEL`]
    /// for a figure with nothing on screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] for a foreign handle.
    pub fn bounding(&self, scene: &Scene) -> Result<Rect> {
        self.things
            .iter()
            .try_fold(Rect::EMPTY_SENTINEL, |acc, t| -> Result<Rect> {
                Ok(acc.union(&t.bounding(scene)?))
            })
    }

    /// One group holding every child's tracer, in child order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] or [`Error::Unprojected`] if a ball
    /// cannot be resolved to a projection.
    pub fn tracer(&self, scene: &Scene) -> Result<GroupTracer> {
        let mut group = GroupTracer::new();
        for thing in &self.things {
            group.add(thing.tracer(scene)?);
        }
        log::trace!("figure tracer with {} children", group.len());
        Ok(group)
    }

    /// Build the tracer tree for a frame.
    ///
    /// The figure's group gets `additional` appended; if `wrapper` is given
    /// the group is added to it and the wrapper becomes the root.
    ///
    /// # Errors
    ///
    /// Same as [`Figure::tracer`].
    pub fn compose(
        &self,
        scene: &Scene,
        wrapper: Option<Box<dyn WrappingTracer>>,
        additional: Vec<Box<dyn Tracer>>,
    ) -> Result<Box<dyn WrappingTracer>> {
        let mut group = self.tracer(scene)?;
        group.extend(additional);

        Ok(match wrapper {
            Some(mut root) => {
                root.add(Box::new(group));
                root
            }
            None => Box::new(group),
        })
    }

    /// Compose the tracer tree and scan it into `fb`, calling `on_row` after
    /// every row.
    ///
    /// # Errors
    ///
    /// Same as [`Figure::tracer`].
    pub fn draw<F>(
        &self,
        scene: &Scene,
        fb: &mut Framebuffer,
        wrapper: Option<Box<dyn WrappingTracer>>,
        additional: Vec<Box<dyn Tracer>>,
        on_row: F,
    ) -> Result<()>
    where
        F: FnMut(i32),
    {
        let root = self.compose(scene, wrapper, additional)?;
        draw_tracer(&*root, fb, on_row);
        Ok(())
    }

    /// Rasterize children in order without depth testing.
    ///
    /// # Errors
    ///
    /// Same as [`Figure::tracer`].
    pub fn draw_flat(&self, scene: &Scene, fb: &mut Framebuffer, shading: f64) -> Result<()> {
        for thing in &self.things {
            thing.draw_flat(scene, fb, shading)?;
        }
        Ok(())
    }

    /// Unique balls reachable from this figure.
    #[must_use]
    pub fn ball_set(&self) -> BallSet {
        let mut set = BallSet::new();
        for thing in &self.things {
            thing.collect_balls(&mut set);
        }
        set
    }

    /// Scale every reachable ball's center and radius by `factor`, once per
    /// ball.
    ///
    /// Projections are not updated; project again before drawing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBall`] for a foreign handle.
    pub fn scale(&self, scene: &mut Scene, factor: f64) -> Result<()> {
        for id in self.ball_set() {
            scene.ball_mut(id)?.scale(factor);
        }
        Ok(())
    }
}
