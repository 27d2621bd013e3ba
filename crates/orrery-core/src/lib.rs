//! # Orrery Core
//!
//! The scene model behind the orrery renderer: a sun, eight planets (one of
//! them ringed) and their moons, described as a single signed distance field
//! that is a pure function of elapsed time.
//!
//! ## Quick Start
//!
//! ```rust
//! use orrery_core::prelude::*;
//!
//! // Freeze every body transform for one frame
//! let scene = SceneSnapshot::at(10.0);
//!
//! // Distance from a point to the nearest (blended) surface
//! let d = scene.distance(Vec3::new(0.0, 0.0, 3.0));
//! assert!(d > 0.0);
//!
//! // Which body owns a surface point
//! let body = classify(Vec3::new(0.0, 0.5, 0.0), &scene);
//! assert_eq!(body, Body::Sun);
//! ```
//!
//! ## Units and Conventions
//!
//! - **Time**: seconds since program start, the only input that moves bodies
//! - **Angles**: radians
//! - **Precision**: `f32` throughout so the CPU path matches the WGSL port
//! - **Coordinate system**: Right-handed, Y-up

pub mod material;
pub mod orbit;
pub mod scene;
pub mod sdf;

/// Prelude module for convenient imports
pub mod prelude {
    // Distance fields
    pub use crate::sdf::{
        Sdf, SmoothUnion, Sphere, Torus, Union, estimate_normal, smooth_min, sphere_distance,
        torus_distance,
    };

    // Animation
    pub use crate::orbit::{OrbitPhase, moon_count, moon_position, planet_position};

    // Scene
    pub use crate::scene::{SceneSnapshot, scene_distance};

    // Materials
    pub use crate::material::{Body, classify};

    // Math (re-export glam)
    pub use glam::{Vec2, Vec3};
}
