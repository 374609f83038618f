//! `<textures>` block

use super::diagnostics::Diagnostics;
use super::error::LoadError;
use super::reader::*;
use crate::config::{LoaderConfig, TextureProbe};
use crate::gfx::resources::{check_extension, probe_texture_file, Texture};
use crate::gfx::scene::graph::{INHERIT, NO_TEXTURE};
use crate::gfx::scene::{Category, DeclarationTable, DuplicateId};
use roxmltree::Node;
use std::collections::HashSet;

/// Parses every `<texture>`.
///
/// Ids and file names are unique. A file name without an accepted image
/// extension is reported and the texture skipped. The file itself is
/// probed according to `config.texture_probe`.
pub fn parse_textures(
    block: Node<'_, '_>,
    config: &LoaderConfig,
    diagnostics: &mut Diagnostics,
) -> Result<DeclarationTable<Texture>, LoadError> {
    let mut textures = DeclarationTable::new(Category::Texture);
    let mut seen_ids = HashSet::new();
    let mut seen_files = HashSet::new();

    for node in declarations(block, &["texture"], diagnostics) {
        let id = declaration_id(node, Category::Texture)?;
        let context = format!("texture '{id}'");
        if id == INHERIT || id == NO_TEXTURE {
            return Err(LoadError::invalid_value(&context, "'inherit' and 'none' are reserved texture ids"));
        }
        let file = require_string(node, "file", &context)?.trim();

        // skipped textures still claim their id and file
        if !seen_ids.insert(id) {
            return Err(DuplicateId {
                category: Category::Texture,
                id: id.to_string(),
            }
            .into());
        }
        if !seen_files.insert(file) {
            return Err(LoadError::invalid_value(
                &context,
                format!("file name must be unique for each texture (conflict: Name = {file})"),
            ));
        }

        if let Err(err) = check_extension(file) {
            diagnostics.minor(err.to_string());
            continue;
        }

        let mut texture = Texture::new(id, file, config.asset_dir.as_deref());
        match config.texture_probe {
            TextureProbe::Skip => {}
            TextureProbe::Warn => match probe_texture_file(&texture.path) {
                Ok(dimensions) => texture.dimensions = Some(dimensions),
                Err(err) => {
                    diagnostics.minor(format!("{err}; texture '{id}' will not be bound"));
                    texture.unavailable = true;
                }
            },
            TextureProbe::Require => {
                let dimensions = probe_texture_file(&texture.path).map_err(|source| LoadError::TextureFile {
                    id: id.to_string(),
                    source,
                })?;
                texture.dimensions = Some(dimensions);
            }
        }

        textures.insert(id, texture)?;
    }

    log::info!("Parsed textures");
    Ok(textures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn parse(xml: &str, config: &LoaderConfig) -> (Result<DeclarationTable<Texture>, LoadError>, Diagnostics) {
        let doc = Document::parse(xml).unwrap();
        let mut diagnostics = Diagnostics::new();
        let result = parse_textures(doc.root_element(), config, &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    fn test_probe_policies() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::new(2, 2).save(dir.path().join("wood.png")).unwrap();
        let xml = r#"<textures>
            <texture id="wood" file="wood.png"/>
            <texture id="stone" file="stone.jpg"/>
        </textures>"#;

        let warn = LoaderConfig::default().with_asset_dir(dir.path());
        let (textures, diagnostics) = parse(xml, &warn);
        let textures = textures.unwrap();
        assert_eq!(textures.len(), 2);
        assert_eq!(textures.get("wood").unwrap().dimensions, Some((2, 2)));
        assert!(!textures.get("stone").unwrap().is_verified());
        assert!(!textures.get("stone").unwrap().is_bindable());
        assert!(textures.get("wood").unwrap().is_bindable());
        assert_eq!(diagnostics.len(), 1);

        let skip = warn.clone().with_texture_probe(TextureProbe::Skip);
        let (textures, diagnostics) = parse(xml, &skip);
        assert!(textures
            .unwrap()
            .records()
            .iter()
            .all(|t| !t.is_verified() && t.is_bindable()));
        assert!(diagnostics.is_empty());

        let require = warn.with_texture_probe(TextureProbe::Require);
        let (result, _) = parse(xml, &require);
        assert!(matches!(result, Err(LoadError::TextureFile { id, .. }) if id == "stone"));
    }

    #[test]
    fn test_bad_extension_is_skipped_with_warning() {
        let config = LoaderConfig::default().with_texture_probe(TextureProbe::Skip);
        let (textures, diagnostics) = parse(
            r#"<textures><texture id="anim" file="anim.gif"/><texture id="ok" file="ok.jpg"/></textures>"#,
            &config,
        );
        let textures = textures.unwrap();
        assert!(!textures.contains("anim"));
        assert!(textures.contains("ok"));
        assert!(diagnostics.warnings()[0].contains("anim.gif"));
    }

    #[test]
    fn test_ids_and_files_are_unique() {
        let config = LoaderConfig::default().with_texture_probe(TextureProbe::Skip);

        let (same_id, _) = parse(
            r#"<textures><texture id="a" file="a.png"/><texture id="a" file="b.png"/></textures>"#,
            &config,
        );
        assert!(matches!(same_id, Err(LoadError::DuplicateId(_))));

        let (same_file, _) = parse(
            r#"<textures><texture id="a" file="a.png"/><texture id="b" file="a.png"/></textures>"#,
            &config,
        );
        let err = same_file.unwrap_err();
        assert!(err.to_string().contains("file name must be unique"));
    }

    #[test]
    fn test_sentinel_ids_are_reserved() {
        let config = LoaderConfig::default().with_texture_probe(TextureProbe::Skip);
        for id in ["none", "inherit"] {
            let (result, _) = parse(&format!(r#"<textures><texture id="{id}" file="a.png"/></textures>"#), &config);
            assert!(matches!(result, Err(LoadError::InvalidValue { .. })), "{id} accepted");
        }
    }
}
