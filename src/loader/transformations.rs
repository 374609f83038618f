//! `<transformations>` block and inline transformation lists

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use super::reader::*;
use crate::gfx::scene::{Category, DeclarationTable};
use crate::gfx::transform::{Axis, TransformOp, Transformation};
use cgmath::Vector3;
use roxmltree::Node;

/// Reads `translate`, `scale` and `rotate` children in document order.
pub fn parse_transform_ops(
    node: Node<'_, '_>,
    context: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<TransformOp>, LoadError> {
    let mut ops = Vec::new();

    for child in element_children(node) {
        match tag(child) {
            "translate" => {
                let offset = parse_coordinates_3d(child, &format!("translate transformation for {context}"))?;
                ops.push(TransformOp::Translate(Vector3::from(offset)));
            }
            "scale" => {
                let factors = parse_coordinates_3d(child, &format!("scale transformation for {context}"))?;
                ops.push(TransformOp::Scale(Vector3::from(factors)));
            }
            "rotate" => {
                let rotate_context = format!("rotate transformation for {context}");
                let name = require_string(child, "axis", &rotate_context)?;
                let axis = Axis::from_name(name.trim())
                    .ok_or_else(|| LoadError::invalid_attribute("axis", name, &rotate_context))?;
                let degrees = require_float(child, "angle", &rotate_context)?;
                ops.push(TransformOp::rotate_degrees(axis, degrees));
            }
            other => diagnostics.unknown_tag(other),
        }
    }

    Ok(ops)
}

pub fn parse_transformations(
    block: Node<'_, '_>,
    diagnostics: &mut Diagnostics,
) -> Result<DeclarationTable<Transformation>, LoadError> {
    let mut transformations = DeclarationTable::new(Category::Transformation);

    for node in declarations(block, &["transformation"], diagnostics) {
        let id = declaration_id(node, Category::Transformation)?;
        transformations.ensure_vacant(id)?;
        let ops = parse_transform_ops(node, &format!("ID {id}"), diagnostics)?;
        transformations.insert(id, Transformation::new(id, ops))?;
    }

    log::info!("Parsed transformations");
    Ok(transformations)
}
