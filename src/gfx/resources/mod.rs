// src/gfx/resources/mod.rs
//! Declared scene resources
//!
//! Materials and texture references read from a scene document.

pub mod material;
pub mod texture_resource;

// Re-export main types
pub use material::{Material, MaterialId};
pub use texture_resource::{check_extension, probe_texture_file, Texture, TextureFileError};
