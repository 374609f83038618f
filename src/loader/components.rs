//! `<components>` block
//!
//! Components may reference components declared further down, so ids are
//! collected in a first pass and references resolved in a second.

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use super::reader::*;
use super::transformations::parse_transform_ops;
use crate::gfx::resources::{Material, Texture};
use crate::gfx::scene::graph::{INHERIT, NO_TEXTURE};
use crate::gfx::scene::{
    Category, ComponentNode, DeclarationTable, MaterialRef, PrimitiveShape, TextureBinding, TextureRef,
    TransformSource,
};
use crate::gfx::transform::{compose, Transformation};
use roxmltree::Node;

/// Tables a component may reference
pub struct References<'t> {
    pub transformations: &'t DeclarationTable<Transformation>,
    pub materials: &'t DeclarationTable<Material>,
    pub textures: &'t DeclarationTable<Texture>,
    pub primitives: &'t DeclarationTable<PrimitiveShape>,
}

pub fn parse_components(
    block: Node<'_, '_>,
    references: &References<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<DeclarationTable<ComponentNode>, LoadError> {
    let mut declared = DeclarationTable::new(Category::Component);
    for node in declarations(block, &["component"], diagnostics) {
        declared.insert(declaration_id(node, Category::Component)?, node)?;
    }

    let mut components = DeclarationTable::new(Category::Component);
    for (id, node) in declared.iter() {
        let component = parse_component(*node, id, &declared, references, diagnostics)?;
        components.insert(id, component)?;
    }

    log::info!("Parsed components");
    Ok(components)
}

fn parse_component(
    node: Node<'_, '_>,
    id: &str,
    declared: &DeclarationTable<Node<'_, '_>>,
    references: &References<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<ComponentNode, LoadError> {
    let context = format!("component '{id}'");

    for child in element_children(node) {
        if !matches!(tag(child), "transformation" | "materials" | "texture" | "children") {
            diagnostics.unknown_tag(tag(child));
        }
    }

    let (transform, matrix) = parse_transform(
        require_child(node, "transformation", &context)?,
        &context,
        references,
        diagnostics,
    )?;
    let materials = parse_material_list(
        require_child(node, "materials", &context)?,
        &context,
        references,
        diagnostics,
    )?;
    let texture = parse_texture(require_child(node, "texture", &context)?, &context, references)?;
    let (children, primitives) = parse_children(
        require_child(node, "children", &context)?,
        &context,
        declared,
        references,
        diagnostics,
    )?;

    Ok(ComponentNode {
        transform,
        matrix,
        materials,
        texture,
        children,
        primitives,
    })
}

fn parse_transform(
    node: Node<'_, '_>,
    context: &str,
    references: &References<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<(TransformSource, cgmath::Matrix4<f32>), LoadError> {
    let items: Vec<_> = element_children(node).collect();

    if let Some(reference) = items.iter().find(|item| tag(**item) == "transformationref") {
        if items.len() > 1 {
            return Err(LoadError::invalid_value(
                context,
                "a transformationref must be the only entry of its transformation block",
            ));
        }
        let ref_id = require_string(*reference, "id", context)?;
        let slot = references
            .transformations
            .index_of(ref_id)
            .ok_or_else(|| LoadError::unresolved(Category::Transformation, ref_id, context))?;
        let matrix = references.transformations.records()[slot].matrix;
        return Ok((TransformSource::Reference(slot), matrix));
    }

    let ops = parse_transform_ops(node, context, diagnostics)?;
    let matrix = compose(&ops);
    Ok((TransformSource::Inline(ops), matrix))
}

fn parse_material_list(
    node: Node<'_, '_>,
    context: &str,
    references: &References<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<MaterialRef>, LoadError> {
    let mut materials = Vec::new();

    for entry in declarations(node, &["material"], diagnostics) {
        let material_id = require_string(entry, "id", context)?.trim();
        let reference = if material_id == INHERIT {
            MaterialRef::Inherit
        } else {
            let slot = references
                .materials
                .index_of(material_id)
                .ok_or_else(|| LoadError::unresolved(Category::Material, material_id, context))?;
            MaterialRef::Declared(slot)
        };
        materials.push(reference);
    }

    if materials.is_empty() {
        return Err(LoadError::invalid_value(context, "at least one material must be listed"));
    }
    Ok(materials)
}

fn parse_texture(node: Node<'_, '_>, context: &str, references: &References<'_>) -> Result<TextureBinding, LoadError> {
    let texture_id = require_string(node, "id", context)?.trim();
    let reference = match texture_id {
        INHERIT => TextureRef::Inherit,
        NO_TEXTURE => TextureRef::None,
        declared => TextureRef::Declared(
            references
                .textures
                .index_of(declared)
                .ok_or_else(|| LoadError::unresolved(Category::Texture, declared, context))?,
        ),
    };

    let length = |name: &str| -> Result<f32, LoadError> {
        let value = optional_float(node, name, context)?.unwrap_or(0.0);
        if value < 0.0 {
            return Err(LoadError::invalid_value(context, format!("{name} must not be negative")));
        }
        Ok(value)
    };

    Ok(TextureBinding {
        reference,
        length_s: length("length_s")?,
        length_t: length("length_t")?,
    })
}

fn parse_children(
    node: Node<'_, '_>,
    context: &str,
    declared: &DeclarationTable<Node<'_, '_>>,
    references: &References<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<(Vec<usize>, Vec<usize>), LoadError> {
    let mut children = Vec::new();
    let mut primitives = Vec::new();

    for entry in declarations(node, &["componentref", "primitiveref"], diagnostics) {
        let ref_id = require_string(entry, "id", context)?.trim();
        if tag(entry) == "componentref" {
            let slot = declared
                .index_of(ref_id)
                .ok_or_else(|| LoadError::unresolved(Category::Component, ref_id, context))?;
            children.push(slot);
        } else {
            let slot = references
                .primitives
                .index_of(ref_id)
                .ok_or_else(|| LoadError::unresolved(Category::Primitive, ref_id, context))?;
            primitives.push(slot);
        }
    }

    if children.is_empty() && primitives.is_empty() {
        return Err(LoadError::invalid_value(
            context,
            "children must hold at least one componentref or primitiveref",
        ));
    }
    Ok((children, primitives))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::transform::TransformOp;
    use cgmath::{Matrix4, SquareMatrix, Vector3};
    use roxmltree::Document;

    struct Fixture {
        transformations: DeclarationTable<Transformation>,
        materials: DeclarationTable<Material>,
        textures: DeclarationTable<Texture>,
        primitives: DeclarationTable<PrimitiveShape>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut transformations = DeclarationTable::new(Category::Transformation);
            let lift = vec![TransformOp::Translate(Vector3::new(0.0, 1.0, 0.0))];
            transformations.insert("lift", Transformation::new("lift", lift)).unwrap();

            let mut materials = DeclarationTable::new(Category::Material);
            materials.insert("wood", Material::new("wood", 10.0)).unwrap();
            materials.insert("metal", Material::new("metal", 80.0)).unwrap();

            let mut textures = DeclarationTable::new(Category::Texture);
            textures.insert("bark", Texture::new("bark", "bark.jpg", None)).unwrap();

            let mut primitives = DeclarationTable::new(Category::Primitive);
            primitives
                .insert(
                    "quad",
                    PrimitiveShape::Rectangle {
                        x1: 0.0,
                        y1: 0.0,
                        x2: 1.0,
                        y2: 1.0,
                    },
                )
                .unwrap();

            Self {
                transformations,
                materials,
                textures,
                primitives,
            }
        }

        fn parse(&self, xml: &str) -> Result<DeclarationTable<ComponentNode>, LoadError> {
            let references = References {
                transformations: &self.transformations,
                materials: &self.materials,
                textures: &self.textures,
                primitives: &self.primitives,
            };
            let doc = Document::parse(xml).unwrap();
            parse_components(doc.root_element(), &references, &mut Diagnostics::new())
        }
    }

    fn component(id: &str, transformation: &str, materials: &str, texture: &str, children: &str) -> String {
        format!(
            r#"<component id="{id}">
                <transformation>{transformation}</transformation>
                <materials>{materials}</materials>
                <texture {texture}/>
                <children>{children}</children>
            </component>"#
        )
    }

    #[test]
    fn test_forward_references_resolve() {
        let xml = format!(
            "<components>{}{}</components>",
            component("root", "", r#"<material id="wood"/>"#, r#"id="none""#, r#"<componentref id="leaf"/>"#),
            component("leaf", "", r#"<material id="inherit"/>"#, r#"id="inherit""#, r#"<primitiveref id="quad"/>"#),
        );
        let components = Fixture::new().parse(&xml).unwrap();

        let root = components.get("root").unwrap();
        assert_eq!(root.children, vec![1]);
        assert_eq!(root.texture.reference, TextureRef::None);
        let leaf = components.get("leaf").unwrap();
        assert_eq!(leaf.materials, vec![MaterialRef::Inherit]);
        assert_eq!(leaf.primitives, vec![0]);
        assert_eq!(leaf.matrix, Matrix4::identity());
    }

    #[test]
    fn test_transformationref_and_material_list() {
        let xml = format!(
            "<components>{}</components>",
            component(
                "c",
                r#"<transformationref id="lift"/>"#,
                r#"<material id="metal"/><material id="inherit"/><material id="wood"/>"#,
                r#"id="bark" length_s="2" length_t="3""#,
                r#"<primitiveref id="quad"/>"#
            ),
        );
        let components = Fixture::new().parse(&xml).unwrap();
        let c = components.get("c").unwrap();

        assert_eq!(c.transform, TransformSource::Reference(0));
        assert_eq!(c.matrix, Matrix4::from_translation(Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(
            c.materials,
            vec![MaterialRef::Declared(1), MaterialRef::Inherit, MaterialRef::Declared(0)]
        );
        assert_eq!(c.texture.reference, TextureRef::Declared(0));
        assert_eq!((c.texture.length_s, c.texture.length_t), (2.0, 3.0));
    }

    #[test]
    fn test_transformationref_must_be_alone() {
        let xml = format!(
            "<components>{}</components>",
            component(
                "c",
                r#"<transformationref id="lift"/><scale x="2" y="2" z="2"/>"#,
                r#"<material id="wood"/>"#,
                r#"id="none""#,
                r#"<primitiveref id="quad"/>"#
            ),
        );
        assert!(matches!(Fixture::new().parse(&xml), Err(LoadError::InvalidValue { .. })));
    }

    #[test]
    fn test_unresolved_references_name_the_category() {
        let fixture = Fixture::new();
        let cases = [
            (r#"<transformationref id="nope"/>"#, r#"<material id="wood"/>"#, r#"id="none""#, r#"<primitiveref id="quad"/>"#, Category::Transformation),
            ("", r#"<material id="gold"/>"#, r#"id="none""#, r#"<primitiveref id="quad"/>"#, Category::Material),
            ("", r#"<material id="wood"/>"#, r#"id="marble""#, r#"<primitiveref id="quad"/>"#, Category::Texture),
            ("", r#"<material id="wood"/>"#, r#"id="none""#, r#"<componentref id="ghost"/>"#, Category::Component),
            ("", r#"<material id="wood"/>"#, r#"id="none""#, r#"<primitiveref id="cone"/>"#, Category::Primitive),
        ];

        for (transformation, materials, texture, children, expected) in cases {
            let xml = format!("<components>{}</components>", component("c", transformation, materials, texture, children));
            match fixture.parse(&xml) {
                Err(LoadError::UnresolvedReference { category, .. }) => assert_eq!(category, expected),
                other => panic!("expected unresolved {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_lists_are_fatal() {
        let fixture = Fixture::new();
        let no_materials = format!("<components>{}</components>", component("c", "", "", r#"id="none""#, r#"<primitiveref id="quad"/>"#));
        assert!(fixture.parse(&no_materials).is_err());

        let no_children = format!("<components>{}</components>", component("c", "", r#"<material id="wood"/>"#, r#"id="none""#, ""));
        assert!(fixture.parse(&no_children).is_err());
    }

    #[test]
    fn test_duplicate_component_id() {
        let one = component("c", "", r#"<material id="wood"/>"#, r#"id="none""#, r#"<primitiveref id="quad"/>"#);
        let err = Fixture::new().parse(&format!("<components>{one}{one}</components>")).unwrap_err();
        assert_eq!(err.to_string(), "ID must be unique for each component (conflict: ID = c)");
    }
}
