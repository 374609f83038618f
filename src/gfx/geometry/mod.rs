//! # Procedural Geometry Generation
//!
//! This module synthesizes the triangle meshes behind every `<primitive>`
//! declaration. Generators are pure functions of their shape parameters and
//! are run once per primitive, after the whole document has been validated.
//!
//! ## Supported Primitives
//!
//! - **Rectangle**: axis-aligned quad in the XY plane
//! - **Triangle**: arbitrary triangle from three points
//! - **Cylinder**: (possibly tapered) open cylinder along +Z
//! - **Sphere**: UV sphere centred at the origin
//! - **Torus**: ring around the Z axis
//!
//! ## Usage
//!
//! ```rust
//! use lxs::gfx::geometry::{generate_cylinder, generate_sphere, generate_torus};
//!
//! let cylinder = generate_cylinder(1.0, 0.5, 2.0, 16, 4).unwrap();
//! let sphere = generate_sphere(1.0, 16, 8).unwrap();
//! let torus = generate_torus(0.25, 1.0, 12, 24).unwrap();
//!
//! assert!(cylinder.max_index() < Some(cylinder.vertex_count() as u32));
//! # let _ = (sphere, torus);
//! ```

pub mod primitives;

pub use primitives::*;

/// Primitive topology understood by the host mesh buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    #[default]
    Triangles,
}

/// Represents generated geometry data ready for upload by the host
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (s, t)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            topology: Topology::Triangles,
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Largest vertex index referenced by the index list
    pub fn max_index(&self) -> Option<u32> {
        self.indices.iter().copied().max()
    }

    /// Vertices never referenced by any triangle
    pub fn orphan_vertices(&self) -> Vec<u32> {
        let mut used = vec![false; self.vertices.len()];
        for &index in &self.indices {
            if let Some(slot) = used.get_mut(index as usize) {
                *slot = true;
            }
        }

        used.iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Texture coordinates with each axis multiplied by the given factor.
    pub fn scaled_tex_coords(&self, scale_s: f32, scale_t: f32) -> Vec<[f32; 2]> {
        self.tex_coords
            .iter()
            .map(|[s, t]| [s * scale_s, t * scale_t])
            .collect()
    }

    /// Flattens positions, normals and texture coordinates into the float
    /// arrays a mesh buffer object expects.
    pub fn to_buffers(&self) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        let positions = self.vertices.iter().flatten().copied().collect();
        let normals = self.normals.iter().flatten().copied().collect();
        let tex_coords = self.tex_coords.iter().flatten().copied().collect();
        (positions, normals, tex_coords)
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
