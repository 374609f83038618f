//! Loader configuration
//!
//! Everything a host may want to tune about loading a scene document. All
//! settings have usable defaults, so `LoaderConfig::default()` is enough for
//! most hosts.

use crate::gfx::lighting::MAX_LIGHT_SLOTS;
use crate::gfx::resources::Material;
use std::path::PathBuf;

/// What to do when a texture's image file cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureProbe {
    /// Only the file name is checked
    Skip,
    /// Unreadable files are reported as warnings
    #[default]
    Warn,
    /// Unreadable files abort the load
    Require,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Directory texture file names are resolved against
    pub asset_dir: Option<PathBuf>,
    pub texture_probe: TextureProbe,
    /// Hardware light slots offered by the host
    pub light_slots: usize,
    /// Appearance used when a root-level `inherit` has nothing to inherit
    pub default_material: Material,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            asset_dir: None,
            texture_probe: TextureProbe::default(),
            light_slots: MAX_LIGHT_SLOTS,
            default_material: Material::default(),
        }
    }
}

impl LoaderConfig {
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    pub fn with_texture_probe(mut self, probe: TextureProbe) -> Self {
        self.texture_probe = probe;
        self
    }

    /// Slot count is clamped to `1..=MAX_LIGHT_SLOTS`
    pub fn with_light_slots(mut self, slots: usize) -> Self {
        self.light_slots = slots.clamp(1, MAX_LIGHT_SLOTS);
        self
    }

    pub fn with_default_material(mut self, material: Material) -> Self {
        self.default_material = material;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.texture_probe, TextureProbe::Warn);
        assert_eq!(config.light_slots, 8);
        assert!(config.asset_dir.is_none());
    }

    #[test]
    fn test_builder() {
        let config = LoaderConfig::default()
            .with_asset_dir("scenes")
            .with_texture_probe(TextureProbe::Require)
            .with_light_slots(32);

        assert_eq!(config.asset_dir, Some(PathBuf::from("scenes")));
        assert_eq!(config.texture_probe, TextureProbe::Require);
        assert_eq!(config.light_slots, MAX_LIGHT_SLOTS);
    }
}
