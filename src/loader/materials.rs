//! `<materials>` block

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use super::reader::*;
use crate::gfx::resources::Material;
use crate::gfx::scene::graph::INHERIT;
use crate::gfx::scene::{Category, DeclarationTable};
use roxmltree::Node;

const COLOR_TERMS: [&str; 4] = ["emission", "ambient", "diffuse", "specular"];

pub fn parse_materials(
    block: Node<'_, '_>,
    diagnostics: &mut Diagnostics,
) -> Result<DeclarationTable<Material>, LoadError> {
    let mut materials = DeclarationTable::new(Category::Material);

    for node in declarations(block, &["material"], diagnostics) {
        let id = declaration_id(node, Category::Material)?;
        if id == INHERIT {
            return Err(LoadError::invalid_value(
                &format!("material '{id}'"),
                "'inherit' is a reserved material id",
            ));
        }
        materials.ensure_vacant(id)?;
        let material = parse_material(node, id, diagnostics)?;
        materials.insert(id, material)?;
    }

    log::info!("Parsed materials");
    Ok(materials)
}

fn parse_material(node: Node<'_, '_>, id: &str, diagnostics: &mut Diagnostics) -> Result<Material, LoadError> {
    let context = format!("material '{id}'");
    let material = Material::new(id, require_float(node, "shininess", &context)?);
    if !material.has_valid_shininess() {
        return Err(LoadError::invalid_value(
            &context,
            format!("shininess must be positive, non-zero (shininess: {})", material.shininess),
        ));
    }

    let mut colors = [[0.0; 4]; 4];
    for (color, name) in colors.iter_mut().zip(COLOR_TERMS) {
        *color = parse_color(
            require_child(node, name, &context)?,
            &format!("{name} illumination for ID {id}"),
        )?;
    }
    for child in element_children(node) {
        if !COLOR_TERMS.contains(&tag(child)) {
            diagnostics.unknown_tag(tag(child));
        }
    }

    let [emission, ambient, diffuse, specular] = colors;
    Ok(material
        .with_emission(emission)
        .with_ambient(ambient)
        .with_diffuse(diffuse)
        .with_specular(specular))
}
