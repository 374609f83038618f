//! Material system for fixed-function style lighting
//!
//! Materials come from the `<materials>` block. Components reference them by
//! id, and the scene keeps them in a [`DeclarationTable`] so references
//! resolve to stable indices.
//!
//! [`DeclarationTable`]: crate::gfx::scene::DeclarationTable

/// Material ID for referencing materials
pub type MaterialId = String;

/// Phong material with the four colour terms a host light model consumes
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: MaterialId,
    /// Specular exponent, always positive
    pub shininess: f32,
    pub emission: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl Default for Material {
    /// The host's default appearance, used when nothing else applies
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            shininess: 10.0,
            emission: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.2, 0.4, 0.8, 1.0],
            diffuse: [0.2, 0.4, 0.8, 1.0],
            specular: [0.2, 0.4, 0.8, 1.0],
        }
    }
}

impl Material {
    /// Creates a new material with black colour terms
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `shininess` - Specular exponent (must be > 0 to pass validation)
    pub fn new(name: &str, shininess: f32) -> Self {
        Self {
            name: name.to_string(),
            shininess,
            emission: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.0, 0.0, 0.0, 1.0],
            diffuse: [0.0, 0.0, 0.0, 1.0],
            specular: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Builder pattern: Set emission colour
    pub fn with_emission(mut self, rgba: [f32; 4]) -> Self {
        self.emission = rgba;
        self
    }

    /// Builder pattern: Set ambient colour
    pub fn with_ambient(mut self, rgba: [f32; 4]) -> Self {
        self.ambient = rgba;
        self
    }

    /// Builder pattern: Set diffuse colour
    pub fn with_diffuse(mut self, rgba: [f32; 4]) -> Self {
        self.diffuse = rgba;
        self
    }

    /// Builder pattern: Set specular colour
    pub fn with_specular(mut self, rgba: [f32; 4]) -> Self {
        self.specular = rgba;
        self
    }

    pub fn has_valid_shininess(&self) -> bool {
        self.shininess > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_every_term() {
        let material = Material::new("brass", 32.0)
            .with_emission([0.1, 0.0, 0.0, 1.0])
            .with_ambient([0.2, 0.2, 0.2, 1.0])
            .with_diffuse([0.8, 0.6, 0.2, 1.0])
            .with_specular([1.0, 1.0, 1.0, 1.0]);

        assert_eq!(material.name, "brass");
        assert_eq!(material.emission[0], 0.1);
        assert_eq!(material.diffuse, [0.8, 0.6, 0.2, 1.0]);
        assert!(material.has_valid_shininess());
    }

    #[test]
    fn test_default_appearance() {
        let material = Material::default();
        assert_eq!(material.shininess, 10.0);
        assert_eq!(material.ambient, [0.2, 0.4, 0.8, 1.0]);
        assert!(!Material::new("flat", 0.0).has_valid_shininess());
    }
}
