//! # Scene Document Loader
//!
//! Turns an `<lxs>` document into a [`Scene`]. Loading runs in stages and
//! publishes nothing until every stage succeeded:
//!
//! 1. locate the nine top-level blocks (missing is fatal, out of order is a
//!    warning)
//! 2. build one declaration table per block, in block order
//! 3. resolve components into a [`ComponentGraph`], checking the root and
//!    rejecting cycles
//! 4. generate every primitive mesh
//!
//! Fatal problems come back as a [`LoadError`]; minor ones are logged and
//! returned in [`LoadReport::warnings`].

pub mod components;
pub mod diagnostics;
pub mod error;
pub mod globals;
pub mod lights;
pub mod materials;
pub mod primitives;
pub mod reader;
pub mod textures;
pub mod transformations;
pub mod views;

pub use diagnostics::Diagnostics;
pub use error::LoadError;

use crate::config::LoaderConfig;
use crate::gfx::scene::{ComponentGraph, Primitive, Scene};
use components::References;
use reader::{element_children, tag};
use roxmltree::{Document, Node};
use std::path::Path;

/// Root element of a scene document
pub const ROOT_TAG: &str = "lxs";

/// Top-level blocks in their expected order
pub const BLOCK_ORDER: [&str; 9] = [
    "scene",
    "views",
    "globals",
    "lights",
    "textures",
    "materials",
    "transformations",
    "primitives",
    "components",
];

/// A successfully loaded scene and the minor errors met on the way
#[derive(Debug)]
pub struct LoadReport {
    pub scene: Scene,
    pub warnings: Vec<String>,
}

/// Parses and validates a whole document.
pub fn parse_document(text: &str, config: &LoaderConfig) -> Result<LoadReport, LoadError> {
    let document = Document::parse(text)?;
    let root = document.root_element();
    if tag(root) != ROOT_TAG {
        return Err(LoadError::RootTag(tag(root).to_string()));
    }

    let mut diagnostics = Diagnostics::new();
    let [
        scene_block,
        views_block,
        globals_block,
        lights_block,
        textures_block,
        materials_block,
        transformations_block,
        primitives_block,
        components_block,
    ] = locate_blocks(root, &mut diagnostics)?;

    let settings = globals::parse_scene(scene_block, &mut diagnostics)?;
    let (views, default_view) = views::parse_views(views_block, &mut diagnostics)?;
    let globals = globals::parse_globals(globals_block, &mut diagnostics)?;
    let lights = lights::parse_lights(lights_block, config.light_slots, &mut diagnostics)?;
    let textures = textures::parse_textures(textures_block, config, &mut diagnostics)?;
    let materials = materials::parse_materials(materials_block, &mut diagnostics)?;
    let transformations = transformations::parse_transformations(transformations_block, &mut diagnostics)?;
    let shapes = primitives::parse_primitives(primitives_block, &mut diagnostics)?;

    let references = References {
        transformations: &transformations,
        materials: &materials,
        textures: &textures,
        primitives: &shapes,
    };
    let components = components::parse_components(components_block, &references, &mut diagnostics)?;

    let graph = ComponentGraph::new(components, &settings.root)?;
    for id in graph.unreachable() {
        diagnostics.minor(format!("component '{id}' is not reachable from root '{}'", settings.root));
    }

    let primitives = shapes.try_map(|id, shape| {
        Primitive::new(id, shape).map_err(|source| LoadError::Geometry {
            id: id.to_string(),
            source,
        })
    })?;

    let scene = Scene {
        settings,
        views,
        default_view,
        globals,
        lights,
        textures,
        materials,
        transformations,
        primitives,
        graph,
        default_material: config.default_material.clone(),
    };

    log::info!(
        "Scene loaded: {} components, {} primitives, {} warnings",
        scene.graph.len(),
        scene.primitives.len(),
        diagnostics.len()
    );
    Ok(LoadReport {
        scene,
        warnings: diagnostics.into_warnings(),
    })
}

/// Reads a document from disk and parses it.
///
/// Texture files are resolved against the document's directory unless the
/// configuration names one.
pub fn load_file(path: &Path, config: &LoaderConfig) -> Result<LoadReport, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match (&config.asset_dir, path.parent()) {
        (None, Some(dir)) => parse_document(&text, &config.clone().with_asset_dir(dir)),
        _ => parse_document(&text, config),
    }
}

/// Finds each top-level block, warning about unknown, repeated or
/// misplaced ones.
fn locate_blocks<'a, 'input>(
    root: Node<'a, 'input>,
    diagnostics: &mut Diagnostics,
) -> Result<[Node<'a, 'input>; 9], LoadError> {
    let children: Vec<_> = element_children(root).collect();

    for (position, child) in children.iter().enumerate() {
        let name = tag(*child);
        match BLOCK_ORDER.iter().position(|block| *block == name) {
            None => diagnostics.unknown_tag(name),
            Some(_) if children[..position].iter().any(|earlier| tag(*earlier) == name) => {
                diagnostics.minor(format!("tag <{name}> declared more than once; using the first"));
            }
            Some(_) => {}
        }
    }

    let mut blocks = [root; 9];
    for (expected, name) in BLOCK_ORDER.iter().enumerate() {
        let position = children
            .iter()
            .position(|child| tag(*child) == *name)
            .ok_or(LoadError::MissingBlock(*name))?;
        if position != expected {
            diagnostics.minor(format!("tag <{name}> out of order"));
        }
        blocks[expected] = children[position];
    }

    Ok(blocks)
}
