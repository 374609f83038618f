//! `<lights>` block

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use super::reader::*;
use crate::gfx::lighting::{Light, LightKind};
use crate::gfx::scene::{Category, DeclarationTable};
use cgmath::{Point3, Vector4};
use roxmltree::Node;

/// Parses every `<omni>` and `<spot>`.
///
/// At least one light is required. Lights beyond `slots` are kept but a
/// warning says they will never be bound.
pub fn parse_lights(
    block: Node<'_, '_>,
    slots: usize,
    diagnostics: &mut Diagnostics,
) -> Result<DeclarationTable<Light>, LoadError> {
    let mut lights = DeclarationTable::new(Category::Light);

    for node in declarations(block, &["omni", "spot"], diagnostics) {
        let id = declaration_id(node, Category::Light)?;
        lights.ensure_vacant(id)?;
        let light = parse_light(node, id, diagnostics)?;
        lights.insert(id, light)?;
    }

    if lights.is_empty() {
        return Err(LoadError::invalid_value("lights block", "at least one light must be defined"));
    }
    if lights.len() > slots {
        diagnostics.minor(format!(
            "too many lights defined ({}); only the first {slots} will be used",
            lights.len()
        ));
    }

    log::info!("Parsed lights");
    Ok(lights)
}

fn parse_light(node: Node<'_, '_>, id: &str, diagnostics: &mut Diagnostics) -> Result<Light, LoadError> {
    let context = format!("light '{id}'");

    let enabled = get_boolean(node, "enabled").unwrap_or_else(|| {
        diagnostics.minor(format!(
            "unable to parse value component of the 'enable light' field for ID = {id}; assuming 'value = 1'"
        ));
        true
    });

    let location = parse_coordinates_4d(
        require_child(node, "location", &context)?,
        &format!("light position for ID {id}"),
    )?;
    let mut colors = [[0.0; 4]; 3];
    for (color, name) in colors.iter_mut().zip(["ambient", "diffuse", "specular"]) {
        *color = parse_color(
            require_child(node, name, &context)?,
            &format!("{name} illumination for ID {id}"),
        )?;
    }
    let [ambient, diffuse, specular] = colors;

    let spot = tag(node) == "spot";
    let kind = if spot {
        let target = parse_coordinates_3d(
            require_child(node, "target", &context)?,
            &format!("target light for ID {id}"),
        )?;
        LightKind::Spot {
            cutoff: require_float(node, "angle", &context)?,
            exponent: require_float(node, "exponent", &context)?,
            target: Point3::from(target),
        }
    } else {
        LightKind::Omni
    };

    for child in element_children(node) {
        match tag(child) {
            "location" | "ambient" | "diffuse" | "specular" => {}
            "target" if spot => {}
            other => diagnostics.unknown_tag(other),
        }
    }

    Ok(Light {
        id: id.to_string(),
        enabled,
        location: Vector4::from(location),
        ambient,
        diffuse,
        specular,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const OMNI: &str = r#"
        <location x="0" y="10" z="0" w="1"/>
        <ambient r="0" g="0" b="0" a="1"/>
        <diffuse r="1" g="1" b="1" a="1"/>
        <specular r="1" g="1" b="1" a="1"/>"#;

    fn parse(xml: &str, slots: usize) -> (Result<DeclarationTable<Light>, LoadError>, Diagnostics) {
        let doc = Document::parse(xml).unwrap();
        let mut diagnostics = Diagnostics::new();
        let result = parse_lights(doc.root_element(), slots, &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    fn test_omni_and_spot() {
        let xml = format!(
            r#"<lights>
                <omni id="sun" enabled="0">{OMNI}</omni>
                <spot id="lamp" enabled="1" angle="30" exponent="2">
                    <target x="0" y="0" z="0"/>{OMNI}
                </spot>
            </lights>"#
        );
        let (lights, diagnostics) = parse(&xml, 8);
        let lights = lights.unwrap();

        assert!(diagnostics.is_empty());
        assert!(!lights.get("sun").unwrap().enabled);
        let lamp = lights.get("lamp").unwrap();
        assert!(lamp.enabled);
        assert!(matches!(lamp.kind, LightKind::Spot { cutoff, exponent, .. } if cutoff == 30.0 && exponent == 2.0));
        assert_eq!(lamp.location, Vector4::new(0.0, 10.0, 0.0, 1.0));
    }

    #[test]
    fn test_sub_elements_in_any_order() {
        let xml = r#"<lights><omni id="a" enabled="true">
                <specular r="1" g="1" b="1" a="1"/>
                <diffuse r="0.5" g="0.5" b="0.5" a="1"/>
                <location x="1" y="2" z="3" w="0"/>
                <ambient r="0" g="0" b="0" a="1"/>
            </omni></lights>"#;
        let (lights, _) = parse(xml, 8);
        assert_eq!(lights.unwrap().get("a").unwrap().diffuse, [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_unparsable_enabled_defaults_to_on() {
        let xml = format!(r#"<lights><omni id="a" enabled="sometimes">{OMNI}</omni></lights>"#);
        let (lights, diagnostics) = parse(&xml, 8);
        assert!(lights.unwrap().get("a").unwrap().enabled);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_surplus_lights_warn() {
        let xml = format!(
            r#"<lights><omni id="a" enabled="1">{OMNI}</omni><omni id="b" enabled="1">{OMNI}</omni></lights>"#
        );
        let (lights, diagnostics) = parse(&xml, 1);
        assert_eq!(lights.unwrap().len(), 2);
        assert!(diagnostics.warnings()[0].contains("too many lights"));
    }

    #[test]
    fn test_missing_pieces_are_fatal() {
        let (empty, _) = parse("<lights/>", 8);
        assert!(matches!(empty, Err(LoadError::InvalidValue { .. })));

        let (no_specular, _) = parse(
            r#"<lights><omni id="a" enabled="1">
                <location x="0" y="0" z="0" w="1"/>
                <ambient r="0" g="0" b="0" a="1"/>
                <diffuse r="0" g="0" b="0" a="1"/>
            </omni></lights>"#,
            8,
        );
        assert!(matches!(no_specular, Err(LoadError::MissingElement { element, .. }) if element == "specular"));

        let xml = format!(r#"<lights><spot id="s" enabled="1" angle="10" exponent="1">{OMNI}</spot></lights>"#);
        let (no_target, _) = parse(&xml, 8);
        assert!(matches!(no_target, Err(LoadError::MissingElement { element, .. }) if element == "target"));
    }

    #[test]
    fn test_duplicate_light_id() {
        let xml = format!(
            r#"<lights><omni id="a" enabled="1">{OMNI}</omni><spot id="a" enabled="1">{OMNI}</spot></lights>"#
        );
        let (result, _) = parse(&xml, 8);
        let err = result.unwrap_err();
        assert!(matches!(&err, LoadError::DuplicateId(dup) if dup.category == Category::Light && dup.id == "a"));
    }
}
