//! # lxs Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use lxs::prelude::*;
//!
//! let mut app = SceneApp::new(LoaderConfig::default());
//! if app.load_file(std::path::Path::new("scenes/demo.xml")) {
//!     let mut renderer = RecordingRenderer::new();
//!     app.render_frame(&mut renderer);
//! }
//! ```

// Re-export core application types
pub use crate::app::SceneApp;
pub use crate::config::{LoaderConfig, TextureProbe};
pub use crate::load_scene;
pub use crate::loader::{LoadError, LoadReport};

// Re-export graphics and scene types
pub use crate::gfx::camera::{Camera, View, ViewCamera, ViewKind};
pub use crate::gfx::geometry::{GeometryData, GeometryError, Topology};
pub use crate::gfx::lighting::{Light, LightKind, LightSwitches};
pub use crate::gfx::resources::{Material, Texture};
pub use crate::gfx::scene::{
    display_scene, ComponentGraph, DrawCall, Primitive, PrimitiveShape, RecordingRenderer, Scene, SceneRenderer,
};
pub use crate::gfx::transform::{Axis, TransformOp, Transformation};

// Re-export common external dependencies
pub use cgmath::{Matrix4, Point3, Vector3};
