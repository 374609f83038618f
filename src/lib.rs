// src/lib.rs
//! lxs scene loader
//!
//! Loads `<lxs>` XML scene documents into a validated scene graph with
//! generated primitive meshes, and walks that graph once per frame against
//! a host renderer.

pub mod app;
pub mod config;
pub mod gfx;
pub mod loader;
pub mod prelude;

// Re-export main types for convenience
pub use app::SceneApp;
pub use config::{LoaderConfig, TextureProbe};
pub use loader::{LoadError, LoadReport};

/// Parses and validates a scene document held in memory
pub fn load_scene(document: &str, config: &LoaderConfig) -> Result<LoadReport, LoadError> {
    loader::parse_document(document, config)
}
