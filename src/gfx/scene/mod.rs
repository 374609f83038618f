//! # Scene Management Module
//!
//! This module holds everything a loaded scene is made of and how it is
//! drawn:
//!
//! - [`DeclarationTable`] - id-keyed records of one document block
//! - [`ComponentGraph`] - the validated, acyclic component arena
//! - [`Primitive`] - a shape with its generated mesh
//! - [`Scene`] - all of the above for one loaded document
//! - [`display_scene`] - the per-frame walk driving a [`SceneRenderer`]
//!
//! ## Usage
//!
//! ```no_run
//! use lxs::gfx::scene::{display_scene, RecordingRenderer};
//! use lxs::{load_scene, LoaderConfig};
//!
//! # let document = "";
//! let report = load_scene(document, &LoaderConfig::default()).unwrap();
//! let mut renderer = RecordingRenderer::new();
//! display_scene(&report.scene, &mut renderer, 0);
//! println!("{} draw calls", renderer.draws.len());
//! ```

pub mod graph;
pub mod primitive;
pub mod renderer;
pub mod scene;
pub mod table;
pub mod traversal;

pub use graph::{
    ComponentGraph, ComponentNode, GraphError, MaterialRef, TextureBinding, TextureRef, TransformSource,
};
pub use primitive::{Primitive, PrimitiveShape};
pub use renderer::{DrawCall, LightSlot, RecordingRenderer, SceneRenderer};
pub use scene::{Globals, Scene, SceneSettings, SceneStatistics};
pub use table::{Category, DeclarationTable, DuplicateId};
pub use traversal::display_scene;
