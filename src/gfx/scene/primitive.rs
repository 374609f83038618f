//! Primitives declared in the `<primitives>` block and their meshes

use crate::gfx::geometry::{
    generate_cylinder, generate_rectangle, generate_sphere, generate_torus, generate_triangle,
    triangle_extent, GeometryData, GeometryError,
};

/// Shape parameters of one primitive, decoded once while parsing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveShape {
    Rectangle {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Triangle {
        p1: [f32; 3],
        p2: [f32; 3],
        p3: [f32; 3],
    },
    Cylinder {
        base: f32,
        top: f32,
        height: f32,
        slices: u32,
        stacks: u32,
    },
    Sphere {
        radius: f32,
        slices: u32,
        stacks: u32,
    },
    Torus {
        inner: f32,
        outer: f32,
        slices: u32,
        loops: u32,
    },
}

impl PrimitiveShape {
    /// Element name used in documents
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveShape::Rectangle { .. } => "rectangle",
            PrimitiveShape::Triangle { .. } => "triangle",
            PrimitiveShape::Cylinder { .. } => "cylinder",
            PrimitiveShape::Sphere { .. } => "sphere",
            PrimitiveShape::Torus { .. } => "torus",
        }
    }

    pub fn generate(&self) -> Result<GeometryData, GeometryError> {
        match *self {
            PrimitiveShape::Rectangle { x1, y1, x2, y2 } => generate_rectangle(x1, y1, x2, y2),
            PrimitiveShape::Triangle { p1, p2, p3 } => generate_triangle(p1, p2, p3),
            PrimitiveShape::Cylinder {
                base,
                top,
                height,
                slices,
                stacks,
            } => generate_cylinder(base, top, height, slices, stacks),
            PrimitiveShape::Sphere {
                radius,
                slices,
                stacks,
            } => generate_sphere(radius, slices, stacks),
            PrimitiveShape::Torus {
                inner,
                outer,
                slices,
                loops,
            } => generate_torus(inner, outer, slices, loops),
        }
    }

    /// World-space size covered by the unit texture square.
    ///
    /// Only flat shapes have one; curved shapes wrap their texture once
    /// around and are never amplified.
    pub fn tex_extent(&self) -> Option<[f32; 2]> {
        match *self {
            PrimitiveShape::Rectangle { x1, y1, x2, y2 } => Some([x2 - x1, y2 - y1]),
            PrimitiveShape::Triangle { p1, p2, p3 } => Some(triangle_extent(p1, p2, p3)),
            _ => None,
        }
    }
}

/// A primitive with its generated, immutable mesh
#[derive(Debug, Clone)]
pub struct Primitive {
    pub id: String,
    pub shape: PrimitiveShape,
    pub mesh: GeometryData,
}

impl Primitive {
    pub fn new(id: &str, shape: PrimitiveShape) -> Result<Self, GeometryError> {
        let mesh = shape.generate()?;
        log::debug!(
            "Generated {} '{}': {} vertices, {} triangles",
            shape.name(),
            id,
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Self {
            id: id.to_string(),
            shape,
            mesh,
        })
    }

    /// Texture coordinates stretched so one texture repeat covers
    /// `length_s` by `length_t` world units. A zero length leaves that axis
    /// at its generated range.
    ///
    /// Returns `None` for curved shapes, whose coordinates never change.
    /// Flat shapes always get a full set, since a primitive shared between
    /// components must not keep the coordinates of an earlier draw.
    pub fn amplified_tex_coords(&self, length_s: f32, length_t: f32) -> Option<Vec<[f32; 2]>> {
        let [extent_s, extent_t] = self.shape.tex_extent()?;
        let factor = |extent: f32, length: f32| if length > 0.0 { extent / length } else { 1.0 };
        Some(
            self.mesh
                .scaled_tex_coords(factor(extent_s, length_s), factor(extent_t, length_t)),
        )
    }
}
