//! # Unicorn-Raster
//!
//! CPU-only procedural renderer for scenes built from spheres ("balls") and
//! tapered connectors between them ("bones").
//!
//! Frames are produced in one of two ways:
//!
//! - **Traced**: every projected primitive becomes a [`tracer::Tracer`]; the
//!   tracers are composed into a tree that picks the nearest hit per pixel
//!   and optionally relights it, and the tree is scanned once per pixel.
//! - **Flat**: primitives are rasterized directly in painter's order with the
//!   analytic circle and connector fills of [`render`].
//!
//! ## Quick Start
//!
//! ```rust
//! use unicorn_raster::prelude::*;
//!
//! let mut scene = Scene::new();
//! let a = scene.add_ball(Ball::new(-40.0, 0.0, 0.0, 20.0, Color::new(230, 80, 80)));
//! let b = scene.add_ball(Ball::new(40.0, 0.0, 0.0, 10.0, Color::new(80, 80, 230)));
//! let figure = Figure::new().with(Bone::new(a, b));
//!
//! let view = WorldView::new(Point3d::new(0.0, 0.0, -200.0), Point3d::ZERO, 200.0, (64.0, 64.0));
//! figure.project(&mut scene, &view)?;
//!
//! let mut fb = Framebuffer::new(128, 128)?;
//! figure.draw(&scene, &mut fb, None, Vec::new(), |_| {})?;
//! assert!(fb.drawn_pixel_count() > 0);
//! # Ok::<(), unicorn_raster::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: row-parallel tracing with rayon

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and blending.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Analytic rasterization of circles and connectors.
pub mod render;

/// Per-pixel tracers and depth compositing.
pub mod tracer;

/// Scene graph and camera.
pub mod scene;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Support Modules
// ============================================================================

/// Render configuration.
pub mod config;

/// Stderr logging backend.
pub mod debug;

/// Error types for unicorn-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use unicorn_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Color, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Axis, Point3d, Rect};
    pub use crate::scene::{Ball, BallId, Bone, Figure, Scene, Thing, WorldView};
    pub use crate::tracer::{
        draw_tracer, DirectionalLightTracer, GroupTracer, Hit, PointLightTracer, Tracer,
        WrappingTracer,
    };
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
