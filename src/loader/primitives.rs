//! `<primitives>` block
//!
//! Only the shape parameters are decoded here. Meshes are generated once
//! the whole document has validated.

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use super::reader::*;
use crate::gfx::scene::{Category, DeclarationTable, PrimitiveShape};
use roxmltree::Node;

const SHAPES: [&str; 5] = ["rectangle", "triangle", "cylinder", "sphere", "torus"];

pub fn parse_primitives(
    block: Node<'_, '_>,
    diagnostics: &mut Diagnostics,
) -> Result<DeclarationTable<PrimitiveShape>, LoadError> {
    let mut primitives = DeclarationTable::new(Category::Primitive);

    for node in declarations(block, &["primitive"], diagnostics) {
        let id = declaration_id(node, Category::Primitive)?;
        primitives.ensure_vacant(id)?;
        let shape = parse_shape(node, id)?;
        primitives.insert(id, shape)?;
    }

    log::info!("Parsed primitives");
    Ok(primitives)
}

fn parse_shape(node: Node<'_, '_>, id: &str) -> Result<PrimitiveShape, LoadError> {
    let context = format!("primitive '{id}'");
    let children: Vec<_> = element_children(node).collect();
    let shape = match children.as_slice() {
        [only] if SHAPES.contains(&tag(*only)) => *only,
        _ => {
            return Err(LoadError::invalid_value(
                &context,
                "there must be exactly 1 primitive type (rectangle, triangle, cylinder, sphere or torus)",
            ))
        }
    };

    let float = |name: &str| require_float(shape, name, &context);
    let integer = |name: &str| require_integer(shape, name, &context);

    let parsed = match tag(shape) {
        "rectangle" => {
            let (x1, y1, x2, y2) = (float("x1")?, float("y1")?, float("x2")?, float("y2")?);
            if x2 <= x1 || y2 <= y1 {
                return Err(LoadError::invalid_value(
                    &context,
                    format!("rectangle corners must satisfy x1 < x2 and y1 < y2 (got {x1},{y1} to {x2},{y2})"),
                ));
            }
            PrimitiveShape::Rectangle { x1, y1, x2, y2 }
        }
        "triangle" => {
            let point = |n: u8| -> Result<[f32; 3], LoadError> {
                Ok([
                    float(format!("x{n}").as_str())?,
                    float(format!("y{n}").as_str())?,
                    float(format!("z{n}").as_str())?,
                ])
            };
            PrimitiveShape::Triangle {
                p1: point(1)?,
                p2: point(2)?,
                p3: point(3)?,
            }
        }
        "cylinder" => PrimitiveShape::Cylinder {
            base: float("base")?,
            top: float("top")?,
            height: float("height")?,
            slices: integer("slices")?,
            stacks: integer("stacks")?,
        },
        "sphere" => PrimitiveShape::Sphere {
            radius: float("radius")?,
            slices: integer("slices")?,
            stacks: integer("stacks")?,
        },
        _ => PrimitiveShape::Torus {
            inner: float("inner")?,
            outer: float("outer")?,
            slices: integer("slices")?,
            loops: integer("loops")?,
        },
    };

    Ok(parsed)
}
