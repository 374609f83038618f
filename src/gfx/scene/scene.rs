use super::graph::{ComponentGraph, MaterialRef};
use super::primitive::Primitive;
use super::table::DeclarationTable;
use crate::gfx::camera::{View, ViewCamera};
use crate::gfx::lighting::Light;
use crate::gfx::resources::{Material, Texture};
use crate::gfx::transform::Transformation;
use std::fmt;

/// Attributes of the `<scene>` element
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Id of the root component
    pub root: String,
    /// Length of the reference axes the host may draw
    pub axis_length: f32,
}

/// The `<globals>` block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Globals {
    pub ambient: [f32; 4],
    pub background: [f32; 4],
}

/// A fully validated scene, with every primitive mesh generated
///
/// Built in one piece by the loader and never mutated afterwards; a reload
/// produces a new `Scene`.
#[derive(Debug, Clone)]
pub struct Scene {
    pub settings: SceneSettings,
    pub views: DeclarationTable<View>,
    /// Index of the default view in `views`
    pub default_view: usize,
    pub globals: Globals,
    pub lights: DeclarationTable<Light>,
    pub textures: DeclarationTable<Texture>,
    pub materials: DeclarationTable<Material>,
    pub transformations: DeclarationTable<Transformation>,
    pub primitives: DeclarationTable<Primitive>,
    pub graph: ComponentGraph,
    /// Used when nothing declared applies
    pub default_material: Material,
}

impl Scene {
    /// Material a root-level `inherit` resolves to: the first declared
    /// material, or the host default when none is declared.
    pub fn root_material(&self) -> &Material {
        self.materials.first().unwrap_or(&self.default_material)
    }

    /// Resolves a material reference against its inherited value
    pub fn resolve_material<'a>(&'a self, reference: MaterialRef, inherited: &'a Material) -> &'a Material {
        match reference {
            MaterialRef::Inherit => inherited,
            MaterialRef::Declared(slot) => self.materials.by_index(slot).unwrap_or(inherited),
        }
    }

    pub fn default_view(&self) -> Option<&View> {
        self.views.by_index(self.default_view)
    }

    pub fn default_view_id(&self) -> &str {
        self.views.id_of(self.default_view).unwrap_or_default()
    }

    /// One camera per declared view, in declaration order
    pub fn cameras(&self, aspect: f32) -> Vec<ViewCamera> {
        self.views
            .records()
            .iter()
            .map(|view| ViewCamera::from_view(view, aspect))
            .collect()
    }

    pub fn camera(&self, view_id: &str, aspect: f32) -> Option<ViewCamera> {
        self.views.get(view_id).map(|view| ViewCamera::from_view(view, aspect))
    }

    /// Lights that fit into the host's slots, with their slot number
    pub fn bound_lights(&self, slots: usize) -> impl Iterator<Item = (usize, &Light)> {
        self.lights.records().iter().take(slots).enumerate()
    }

    /// Initial enabled flags of the bound lights
    pub fn initial_light_flags(&self, slots: usize) -> Vec<bool> {
        self.bound_lights(slots).map(|(_, light)| light.enabled).collect()
    }

    pub fn statistics(&self) -> SceneStatistics {
        let (vertices, triangles) = self
            .primitives
            .records()
            .iter()
            .fold((0, 0), |(v, t), p| (v + p.mesh.vertex_count(), t + p.mesh.triangle_count()));

        SceneStatistics {
            views: self.views.len(),
            lights: self.lights.len(),
            textures: self.textures.len(),
            materials: self.materials.len(),
            transformations: self.transformations.len(),
            primitives: self.primitives.len(),
            components: self.graph.len(),
            vertices,
            triangles,
        }
    }
}

/// Declaration counts and mesh totals of a loaded scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStatistics {
    pub views: usize,
    pub lights: usize,
    pub textures: usize,
    pub materials: usize,
    pub transformations: usize,
    pub primitives: usize,
    pub components: usize,
    pub vertices: usize,
    pub triangles: usize,
}

impl fmt::Display for SceneStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "views:           {}", self.views)?;
        writeln!(f, "lights:          {}", self.lights)?;
        writeln!(f, "textures:        {}", self.textures)?;
        writeln!(f, "materials:       {}", self.materials)?;
        writeln!(f, "transformations: {}", self.transformations)?;
        writeln!(f, "primitives:      {}", self.primitives)?;
        writeln!(f, "components:      {}", self.components)?;
        write!(f, "mesh totals:     {} vertices, {} triangles", self.vertices, self.triangles)
    }
}
