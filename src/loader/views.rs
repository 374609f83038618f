//! `<views>` block

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use super::reader::*;
use crate::gfx::camera::{View, ViewKind};
use crate::gfx::scene::{Category, DeclarationTable};
use cgmath::{Deg, Point3, Vector3};
use roxmltree::Node;

/// Parses every view and resolves the mandatory `default` attribute.
///
/// Returns the table and the index of the default view.
pub fn parse_views(
    block: Node<'_, '_>,
    diagnostics: &mut Diagnostics,
) -> Result<(DeclarationTable<View>, usize), LoadError> {
    let default_id = require_string(block, "default", "views block")?;
    let mut views = DeclarationTable::new(Category::View);

    for node in declarations(block, &["perspective", "ortho"], diagnostics) {
        let id = declaration_id(node, Category::View)?;
        views.ensure_vacant(id)?;
        let view = parse_view(node, id, diagnostics)?;
        views.insert(id, view)?;
    }

    if views.is_empty() {
        return Err(LoadError::invalid_value("views block", "at least one view must be defined"));
    }

    let default = views
        .index_of(default_id)
        .ok_or_else(|| LoadError::unresolved(Category::View, default_id, "views block default"))?;

    log::info!("Parsed views");
    Ok((views, default))
}

fn parse_view(node: Node<'_, '_>, id: &str, diagnostics: &mut Diagnostics) -> Result<View, LoadError> {
    let context = format!("view '{id}'");
    let near = require_float(node, "near", &context)?;
    let far = require_float(node, "far", &context)?;
    if near >= far {
        return Err(LoadError::invalid_value(
            &context,
            format!("near ({near}) must be smaller than far ({far})"),
        ));
    }

    let perspective = tag(node) == "perspective";
    let position = format!("view position for ID {id}");
    let mut from = None;
    let mut to = None;
    let mut up = None;

    for child in element_children(node) {
        match tag(child) {
            "from" => from = Some(parse_coordinates_3d(child, &position)?),
            "to" => to = Some(parse_coordinates_3d(child, &position)?),
            "up" if !perspective => up = Some(parse_coordinates_3d(child, &position)?),
            other => diagnostics.unknown_tag(other),
        }
    }

    let from = from.ok_or_else(|| LoadError::missing_element("from", &context))?;
    let to = to.ok_or_else(|| LoadError::missing_element("to", &context))?;

    let kind = if perspective {
        ViewKind::Perspective {
            angle: Deg(require_float(node, "angle", &context)?),
        }
    } else {
        ViewKind::Orthographic {
            left: require_float(node, "left", &context)?,
            right: require_float(node, "right", &context)?,
            top: require_float(node, "top", &context)?,
            bottom: require_float(node, "bottom", &context)?,
            up: up.map(Vector3::from).unwrap_or_else(View::default_up),
        }
    };

    Ok(View {
        id: id.to_string(),
        near,
        far,
        from: Point3::from(from),
        to: Point3::from(to),
        kind,
    })
}
