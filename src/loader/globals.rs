//! `<scene>` and `<globals>` blocks

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use super::reader::*;
use crate::gfx::scene::{Globals, SceneSettings};
use roxmltree::Node;

pub fn parse_scene(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> Result<SceneSettings, LoadError> {
    let root = match get_string(node, "root").map(str::trim) {
        Some(root) if !root.is_empty() => root.to_string(),
        _ => return Err(LoadError::invalid_value("scene block", "no root defined for scene")),
    };

    let axis_length = match optional_float(node, "axis_length", "scene block")? {
        Some(length) => length,
        None => {
            diagnostics.minor("no axis_length defined for scene; assuming 'length = 1'");
            1.0
        }
    };

    log::info!("Parsed scene");
    Ok(SceneSettings { root, axis_length })
}

pub fn parse_globals(block: Node<'_, '_>, diagnostics: &mut Diagnostics) -> Result<Globals, LoadError> {
    let ambient = parse_color(require_child(block, "ambient", "globals block")?, "ambient")?;
    let background = parse_color(require_child(block, "background", "globals block")?, "background")?;

    for child in element_children(block) {
        if !matches!(tag(child), "ambient" | "background") {
            diagnostics.unknown_tag(tag(child));
        }
    }

    log::info!("Parsed globals");
    Ok(Globals { ambient, background })
}
