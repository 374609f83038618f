//! Typed attribute access on XML elements
//!
//! Every helper takes a human-readable `context` ("view position for ID
//! main", ...) that ends up in the error message, so a failed load always
//! says which attribute of which declaration was wrong.

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use crate::gfx::scene::Category;
use roxmltree::Node;
use std::str::FromStr;

/// Child elements only, skipping text and comments
pub fn element_children<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

pub fn tag<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// First child element with the given tag
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    element_children(node).find(|child| tag(*child) == name)
}

pub fn require_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
    context: &str,
) -> Result<Node<'a, 'input>, LoadError> {
    find_child(node, name).ok_or_else(|| LoadError::missing_element(name, context))
}

/// Children of a block whose tag is one of `tags`; anything else is
/// reported and skipped.
pub fn declarations<'a, 'input>(
    block: Node<'a, 'input>,
    tags: &[&str],
    diagnostics: &mut Diagnostics,
) -> Vec<Node<'a, 'input>> {
    element_children(block)
        .filter(|child| {
            let known = tags.contains(&tag(*child));
            if !known {
                diagnostics.unknown_tag(tag(*child));
            }
            known
        })
        .collect()
}

/// The non-empty `id` attribute of a declaration
pub fn declaration_id<'a>(node: Node<'a, '_>, category: Category) -> Result<&'a str, LoadError> {
    match get_string(node, "id").map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(LoadError::MissingId(category)),
    }
}

pub fn get_string<'a>(node: Node<'a, '_>, attribute: &str) -> Option<&'a str> {
    node.attribute(attribute)
}

pub fn require_string<'a>(node: Node<'a, '_>, attribute: &str, context: &str) -> Result<&'a str, LoadError> {
    get_string(node, attribute).ok_or_else(|| LoadError::missing_attribute(attribute, context))
}

fn parse_attribute<T: FromStr>(node: Node<'_, '_>, attribute: &str, context: &str) -> Result<Option<T>, LoadError> {
    let Some(raw) = get_string(node, attribute) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| LoadError::invalid_attribute(attribute, raw, context))
}

/// Finite float attribute, `None` when absent
pub fn optional_float(node: Node<'_, '_>, attribute: &str, context: &str) -> Result<Option<f32>, LoadError> {
    match parse_attribute::<f32>(node, attribute, context)? {
        Some(value) if !value.is_finite() => Err(LoadError::invalid_attribute(
            attribute,
            get_string(node, attribute).unwrap_or_default(),
            context,
        )),
        other => Ok(other),
    }
}

pub fn require_float(node: Node<'_, '_>, attribute: &str, context: &str) -> Result<f32, LoadError> {
    optional_float(node, attribute, context)?.ok_or_else(|| LoadError::missing_attribute(attribute, context))
}

/// Non-negative integer attribute
pub fn require_integer(node: Node<'_, '_>, attribute: &str, context: &str) -> Result<u32, LoadError> {
    parse_attribute::<u32>(node, attribute, context)?.ok_or_else(|| LoadError::missing_attribute(attribute, context))
}

/// Boolean attribute accepting `true`, `false`, `1` and `0`.
///
/// `None` when the attribute is absent or holds anything else.
pub fn get_boolean(node: Node<'_, '_>, attribute: &str) -> Option<bool> {
    match get_string(node, attribute)?.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// `x`, `y` and `z` attributes
pub fn parse_coordinates_3d(node: Node<'_, '_>, context: &str) -> Result<[f32; 3], LoadError> {
    Ok([
        require_float(node, "x", context)?,
        require_float(node, "y", context)?,
        require_float(node, "z", context)?,
    ])
}

/// `x`, `y`, `z` and `w` attributes
pub fn parse_coordinates_4d(node: Node<'_, '_>, context: &str) -> Result<[f32; 4], LoadError> {
    let [x, y, z] = parse_coordinates_3d(node, context)?;
    Ok([x, y, z, require_float(node, "w", context)?])
}

/// `r`, `g`, `b` and `a` attributes, each within [0, 1]
pub fn parse_color(node: Node<'_, '_>, context: &str) -> Result<[f32; 4], LoadError> {
    let mut color = [0.0; 4];
    for (channel, name) in color.iter_mut().zip(["r", "g", "b", "a"]) {
        let value = require_float(node, name, context)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(LoadError::invalid_attribute(
                name,
                get_string(node, name).unwrap_or_default(),
                context,
            ));
        }
        *channel = value;
    }
    Ok(color)
}
