//! # Graphics Module
//!
//! Everything a loaded scene is made of, independent of any rendering
//! backend.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - views and the cameras built from them
//! - **Geometry** ([`geometry`]) - mesh generators for the primitive shapes
//! - **Lighting** ([`lighting`]) - lights and their runtime switches
//! - **Resources** ([`resources`]) - materials and textures
//! - **Scene Management** ([`scene`]) - declaration tables, component graph and traversal
//! - **Transforms** ([`transform`]) - ordered matrix composition
//!
//! The host draws through the [`scene::SceneRenderer`] trait.

pub mod camera;
pub mod geometry;
pub mod lighting;
pub mod resources;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use camera::ViewCamera;
pub use scene::{Scene, SceneRenderer};
