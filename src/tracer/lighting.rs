//! Lighting decorators that recolor the hits of a wrapped tracer.

use super::{GroupTracer, Hit, Tracer, WrappingTracer};
use crate::color::Color;
use crate::geometry::{Point3d, Rect};
use std::fmt;

/// A group tracer whose hits are shaded against one light direction.
///
/// With `sp` the dot product of the unit surface direction and the unit
/// light direction, `sp >= 0` darkens by `sp * 96` and `sp < 0` lightens by
/// `-sp * 48`. Hits without a direction pass through unchanged.
#[derive(Debug, Default)]
pub struct DirectionalLightTracer {
    group: GroupTracer,
    light_direction_unit: Point3d,
}

impl DirectionalLightTracer {
    /// Create a light tracer with no children.
    #[must_use]
    pub fn new(light_direction: Point3d) -> Self {
        let mut tracer = Self::default();
        tracer.set_light_direction(light_direction);
        tracer
    }

    /// Set the light direction; it is stored normalized (zero stays zero,
    /// which disables the effect).
    pub fn set_light_direction(&mut self, direction: Point3d) {
        self.light_direction_unit = direction.normalized();
    }

    /// The stored unit light direction.
    #[must_use]
    pub fn light_direction(&self) -> Point3d {
        self.light_direction_unit
    }

    /// The wrapped group.
    #[must_use]
    pub fn group(&self) -> &GroupTracer {
        &self.group
    }
}

impl Tracer for DirectionalLightTracer {
    fn trace(&self, x: i32, y: i32) -> Option<Hit> {
        let hit = self.group.trace(x, y)?;
        let len = hit.direction.length();
        if len == 0.0 {
            return Some(hit);
        }

        let unit = hit.direction.times(1.0 / len);
        let sp = unit.scalar_prod(self.light_direction_unit);

        let color = if sp >= 0.0 {
            hit.color.darken((sp * 96.0) as u8)
        } else {
            hit.color.lighten((-sp * 48.0) as u8)
        };
        Some(Hit { color, ..hit })
    }

    fn bounds(&self) -> Rect {
        self.group.bounds()
    }
}

impl WrappingTracer for DirectionalLightTracer {
    fn add(&mut self, tracer: Box<dyn Tracer>) {
        self.group.add(tracer);
    }
}

/// A point light with exponential falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Light position in screen-depth space (`x`, `y` pixels, `z` depth).
    pub position: Point3d,
    /// Distance over which the light's strength halves.
    pub half_life: f64,
}

impl PointLight {
    /// Create a point light.
    #[must_use]
    pub const fn new(position: Point3d, half_life: f64) -> Self {
        Self {
            position,
            half_life,
        }
    }

    /// `0.5 ^ (distance / half_life)`; a non-positive half-life gives no light.
    #[must_use]
    pub fn strength_at(&self, distance: f64) -> f64 {
        if self.half_life.is_nan() || self.half_life <= 0.0 {
            return 0.0;
        }
        0.5f64.powf(distance / self.half_life)
    }
}

/// Shades hits of a source tracer by a set of point lights.
///
/// Each light contributes `-(surface · light_to_surface)` scaled by its
/// falloff, ignoring lights behind the surface. Hits without a direction get
/// a neutral `0.5` per light instead. The summed level maps to a darken of
/// `(0.5 - sum) * 510` at or below `0.5` and a lighten of `(sum - 0.5) * 96`
/// above it.
pub struct PointLightTracer {
    source: Box<dyn Tracer>,
    lights: Vec<PointLight>,
}

impl PointLightTracer {
    /// Wrap a source tracer with no lights.
    #[must_use]
    pub fn new(source: Box<dyn Tracer>) -> Self {
        Self {
            source,
            lights: Vec::new(),
        }
    }

    /// Builder form of [`PointLightTracer::add_light`].
    #[must_use]
    pub fn with_light(mut self, position: Point3d, half_life: f64) -> Self {
        self.add_light(position, half_life);
        self
    }

    /// Add a light at `position` halving every `half_life` distance units.
    pub fn add_light(&mut self, position: Point3d, half_life: f64) {
        if half_life.is_nan() || half_life <= 0.0 {
            log::warn!(
                "point light at {position:?} has half-life {half_life}, it will not contribute"
            );
        }
        self.lights.push(PointLight::new(position, half_life));
    }

    /// Configured lights.
    #[must_use]
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    fn light_level(&self, point: Point3d, direction: Point3d) -> f64 {
        let dir_len = direction.length();
        let unit = if dir_len > 0.0 {
            direction.times(1.0 / dir_len)
        } else {
            Point3d::ZERO
        };

        let mut sum = 0.0;
        for light in &self.lights {
            let light_dir = point - light.position;
            let distance = light_dir.length();

            let sp = if dir_len == 0.0 {
                0.5
            } else if distance == 0.0 {
                // light sits on the surface
                1.0
            } else {
                -unit.scalar_prod(light_dir.times(1.0 / distance))
            };
            if sp < 0.0 {
                continue;
            }
            sum += sp * light.strength_at(distance);
        }
        sum
    }
}

impl Tracer for PointLightTracer {
    fn trace(&self, x: i32, y: i32) -> Option<Hit> {
        let hit = self.source.trace(x, y)?;
        let point = Point3d::new(f64::from(x), f64::from(y), hit.depth);
        let sum = self.light_level(point, hit.direction);

        let color = if sum < 0.0 {
            Color::BLACK
        } else if sum <= 0.5 {
            hit.color.darken(((0.5 - sum) * 2.0 * 255.0) as u8)
        } else {
            hit.color.lighten(((sum - 0.5) * 96.0) as u8)
        };
        Some(Hit { color, ..hit })
    }

    fn bounds(&self) -> Rect {
        self.source.bounds()
    }
}

impl fmt::Debug for PointLightTracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointLightTracer")
            .field("bounds", &self.source.bounds())
            .field("lights", &self.lights)
            .finish()
    }
}
