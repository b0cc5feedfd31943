//! Nearest-hit compositing over child tracers.

use super::{Hit, Tracer, WrappingTracer};
use crate::geometry::Rect;
use std::fmt;
use std::sync::OnceLock;

/// Composes child tracers with a per-pixel depth test.
///
/// For each pixel every child whose bounds contain it is traced and the hit
/// with the strictly smallest depth wins; on ties the earlier child is kept.
/// There is no spatial index, so a trace costs O(children).
///
/// The union of the children's bounds is computed on first use and
/// discarded whenever a child is added.
#[derive(Default)]
pub struct GroupTracer {
    tracers: Vec<Box<dyn Tracer>>,
    bounds: OnceLock<Rect>,
}

impl GroupTracer {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child and invalidate the cached bounds.
    pub fn add(&mut self, tracer: Box<dyn Tracer>) {
        self.tracers.push(tracer);
        self.bounds = OnceLock::new();
    }

    /// Append several children.
    pub fn extend<I>(&mut self, tracers: I)
    where
        I: IntoIterator<Item = Box<dyn Tracer>>,
    {
        self.tracers.extend(tracers);
        self.bounds = OnceLock::new();
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracers.len()
    }

    /// True if the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracers.is_empty()
    }
}

impl Tracer for GroupTracer {
    fn trace(&self, x: i32, y: i32) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;
        for tracer in &self.tracers {
            if !tracer.bounds().contains(x, y) {
                continue;
            }
            if let Some(hit) = tracer.trace(x, y) {
                if nearest.map_or(true, |n| hit.depth < n.depth) {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }

    fn bounds(&self) -> Rect {
        *self.bounds.get_or_init(|| {
            self.tracers
                .iter()
                .map(|t| t.bounds())
                .reduce(|acc, r| acc.union(&r))
                .unwrap_or(Rect::EMPTY_SENTINEL)
        })
    }
}

impl WrappingTracer for GroupTracer {
    fn add(&mut self, tracer: Box<dyn Tracer>) {
        GroupTracer::add(self, tracer);
    }
}

impl fmt::Debug for GroupTracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupTracer")
            .field("children", &self.tracers.len())
            .field("bounds", &self.bounds.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::tracer::testing::FlatTracer;

    const NEAR: Color = Color::new(10, 20, 30);
    const FAR: Color = Color::new(200, 100, 0);

    #[test]
    fn test_empty_group() {
        let g = GroupTracer::new();
        assert!(g.is_empty());
        assert_eq!(g.bounds(), Rect::EMPTY_SENTINEL);
        assert_eq!(g.trace(0, 0), None);
    }

    #[test]
    fn test_bounds_union() {
        let mut g = GroupTracer::new();
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 1.0, NEAR).boxed());
        g.add(FlatTracer::new(Rect::new(20, 5, 30, 40), 1.0, FAR).boxed());
        assert_eq!(g.bounds(), Rect::new(0, 0, 30, 40));
    }

    #[test]
    fn test_add_invalidates_bounds() {
        let mut g = GroupTracer::new();
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 1.0, NEAR).boxed());
        assert_eq!(g.bounds(), Rect::new(0, 0, 10, 10));

        g.add(FlatTracer::new(Rect::new(-5, 0, 3, 50), 1.0, NEAR).boxed());
        assert_eq!(g.bounds(), Rect::new(-5, 0, 10, 50));

        WrappingTracer::add(&mut g, FlatTracer::new(Rect::new(0, -7, 1, 1), 1.0, NEAR).boxed());
        assert_eq!(g.bounds(), Rect::new(-5, -7, 10, 50));
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn test_nearest_wins() {
        let mut g = GroupTracer::new();
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 5.0, FAR).boxed());
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 3.0, NEAR).boxed());

        let hit = g.trace(5, 5).unwrap();
        assert_eq!(hit.color, NEAR);
        assert_eq!(hit.depth, 3.0);
    }

    #[test]
    fn test_nearest_wins_regardless_of_order() {
        let mut g = GroupTracer::new();
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 3.0, NEAR).boxed());
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 5.0, FAR).boxed());
        assert_eq!(g.trace(5, 5).unwrap().color, NEAR);
    }

    #[test]
    fn test_tie_keeps_first() {
        let mut g = GroupTracer::new();
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 2.0, FAR).boxed());
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 2.0, NEAR).boxed());
        assert_eq!(g.trace(1, 1).unwrap().color, FAR);
    }

    #[test]
    fn test_partial_overlap() {
        let mut g = GroupTracer::new();
        g.add(FlatTracer::new(Rect::new(0, 0, 10, 10), 5.0, FAR).boxed());
        g.add(FlatTracer::new(Rect::new(5, 5, 15, 15), 3.0, NEAR).boxed());
        assert_eq!(g.trace(2, 2).unwrap().color, FAR);
        assert_eq!(g.trace(7, 7).unwrap().color, NEAR);
        assert_eq!(g.trace(14, 14).unwrap().color, NEAR);
        assert_eq!(g.trace(14, 2), None);
    }

    #[test]
    fn test_nested_groups() {
        let mut inner = GroupTracer::new();
        inner.add(FlatTracer::new(Rect::new(0, 0, 4, 4), 1.0, NEAR).boxed());
        let mut outer = GroupTracer::new();
        outer.add(FlatTracer::new(Rect::new(0, 0, 4, 4), 2.0, FAR).boxed());
        outer.add(Box::new(inner));
        assert_eq!(outer.trace(2, 2).unwrap().color, NEAR);
    }

    #[test]
    fn test_single_column_child_stays_in_bounds() {
        let mut g = GroupTracer::new();
        g.add(FlatTracer::new(Rect::new(0, 0, 0, 10), 1.0, NEAR).boxed());
        g.add(FlatTracer::new(Rect::new(5, 5, 20, 20), 1.0, FAR).boxed());
        assert_eq!(g.bounds(), Rect::new(0, 0, 20, 20));
        assert!(g.bounds().contains(0, 0));
        assert_eq!(g.trace(0, 0).map(|h| h.color), Some(NEAR));
    }

    #[test]
    fn test_never_hitting_child_ignored_in_bounds() {
        let mut g = GroupTracer::new();
        g.add(Box::new(GroupTracer::new()));
        g.add(FlatTracer::new(Rect::new(5, 5, 20, 20), 1.0, FAR).boxed());
        assert_eq!(g.bounds(), Rect::new(5, 5, 20, 20));
    }

    #[test]
    fn test_extend() {
        let mut g = GroupTracer::new();
        g.extend(vec![
            FlatTracer::new(Rect::new(0, 0, 1, 1), 1.0, NEAR).boxed(),
            FlatTracer::new(Rect::new(8, 8, 9, 9), 1.0, NEAR).boxed(),
        ]);
        assert_eq!(g.bounds(), Rect::new(0, 0, 9, 9));
    }
}
