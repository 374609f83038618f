//! # Primitive Shape Generation
//!
//! This module contains functions to generate the five primitive shapes a
//! scene document can declare. All shapes are generated with proper normals
//! and texture coordinates, in a Z-up frame.
//!
//! Periodic dimensions (the angular strips of cylinders and spheres, both
//! loops of a torus) are closed by index wraparound: the last strip is
//! stitched back to column 0 rather than to a duplicated seam column.

use super::GeometryData;
use cgmath::{InnerSpace, Vector3};
use std::f32::consts::PI;
use thiserror::Error;

/// Invalid shape parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{shape} requires a non-zero number of {parameter}")]
    ZeroDivisions {
        shape: &'static str,
        parameter: &'static str,
    },
    #[error("cylinder height must be non-zero")]
    ZeroHeight,
    #[error("triangle vertices must not be collinear")]
    DegenerateTriangle,
    #[error("rectangle corners must satisfy x1 < x2 and y1 < y2")]
    InvertedRectangle,
    #[error("{shape} would need {count} vertices (limit {})", MAX_VERTICES)]
    TooManyVertices { shape: &'static str, count: u64 },
}

/// Largest mesh a generator will build
pub const MAX_VERTICES: u64 = 1 << 24;

fn require_divisions(
    shape: &'static str,
    parameter: &'static str,
    value: u32,
) -> Result<(), GeometryError> {
    if value == 0 {
        return Err(GeometryError::ZeroDivisions { shape, parameter });
    }
    Ok(())
}

/// Checks a `rows` x `columns` vertex grid against [`MAX_VERTICES`].
///
/// Once this passes, every index computed in `u32` stays in range.
fn check_vertex_budget(shape: &'static str, rows: u64, columns: u32) -> Result<(), GeometryError> {
    let count = rows.saturating_mul(u64::from(columns));
    if count > MAX_VERTICES {
        return Err(GeometryError::TooManyVertices { shape, count });
    }
    Ok(())
}

/// Generate an axis-aligned rectangle in the XY plane
///
/// # Arguments
/// * `x1`, `y1` - Lower-left corner
/// * `x2`, `y2` - Upper-right corner
///
/// The face points towards +Z. Texture coordinates put (0, 0) on the
/// upper-left corner, matching image row order.
pub fn generate_rectangle(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<GeometryData, GeometryError> {
    if !(x1 < x2 && y1 < y2) {
        return Err(GeometryError::InvertedRectangle);
    }

    let mut data = GeometryData::new();

    data.vertices = vec![[x1, y1, 0.0], [x2, y1, 0.0], [x2, y2, 0.0], [x1, y2, 0.0]];
    data.normals = vec![[0.0, 0.0, 1.0]; 4];
    data.tex_coords = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    data.indices = vec![0, 1, 2, 2, 3, 0];

    Ok(data)
}

/// Generate a single triangle from three points
///
/// The face normal follows the right-hand rule over `p1 -> p2 -> p3`.
/// Texture coordinates lay the triangle flat with `p1p2` along the s axis,
/// normalised by the triangle's extent (see [`triangle_extent`]).
pub fn generate_triangle(
    p1: [f32; 3],
    p2: [f32; 3],
    p3: [f32; 3],
) -> Result<GeometryData, GeometryError> {
    let (v1, v2, v3) = (Vector3::from(p1), Vector3::from(p2), Vector3::from(p3));
    let cross = (v2 - v1).cross(v3 - v1);
    if cross.magnitude2() <= f32::EPSILON {
        return Err(GeometryError::DegenerateTriangle);
    }
    let normal = cross.normalize();

    let a = (v2 - v1).magnitude();
    let c = (v1 - v3).magnitude();
    let cos_alpha = (v3 - v1).dot(v2 - v1) / (a * c);

    let mut data = GeometryData::new();
    data.vertices = vec![p1, p2, p3];
    data.normals = vec![normal.into(); 3];
    data.tex_coords = vec![
        [0.0, 1.0],
        [1.0, 1.0],
        [c * cos_alpha / a, 0.0],
    ];
    data.indices = vec![0, 1, 2];

    Ok(data)
}

/// Natural texture extent of a triangle: the length of `p1p2` and the
/// height of `p3` above that edge.
pub fn triangle_extent(p1: [f32; 3], p2: [f32; 3], p3: [f32; 3]) -> [f32; 2] {
    let (v1, v2, v3) = (Vector3::from(p1), Vector3::from(p2), Vector3::from(p3));
    let base = (v2 - v1).magnitude();
    let area2 = (v2 - v1).cross(v3 - v1).magnitude();
    [base, if base > 0.0 { area2 / base } else { 0.0 }]
}

/// Generate a (possibly tapered) open cylinder along +Z
///
/// # Arguments
/// * `base` - Radius at z = 0
/// * `top` - Radius at z = `height`
/// * `height` - Extent along the positive Z axis
/// * `slices` - Number of divisions around the circumference
/// * `stacks` - Number of divisions along Z
///
/// Lateral normals carry an axial component of `(base - top) / height`
/// before normalisation, so a cone-like taper is lit correctly.
pub fn generate_cylinder(
    base: f32,
    top: f32,
    height: f32,
    slices: u32,
    stacks: u32,
) -> Result<GeometryData, GeometryError> {
    require_divisions("cylinder", "slices", slices)?;
    require_divisions("cylinder", "stacks", stacks)?;
    if height == 0.0 {
        return Err(GeometryError::ZeroHeight);
    }
    check_vertex_budget("cylinder", u64::from(stacks) + 1, slices)?;

    let mut data = GeometryData::new();
    let slope = (base - top) / height;

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let radius = base + (top - base) * v;
        let z = height * v;

        for slice in 0..slices {
            let u = slice as f32 / slices as f32;
            let angle = u * 2.0 * PI;
            let (sin_a, cos_a) = angle.sin_cos();

            data.vertices.push([radius * cos_a, radius * sin_a, z]);
            let normal = Vector3::new(cos_a, sin_a, slope).normalize();
            data.normals.push(normal.into());
            data.tex_coords.push([u, 1.0 - v]);
        }
    }

    for stack in 0..stacks {
        let ring = stack * slices;
        let next_ring = ring + slices;

        for slice in 0..slices {
            let next_slice = (slice + 1) % slices;

            let bottom_current = ring + slice;
            let bottom_next = ring + next_slice;
            let top_current = next_ring + slice;
            let top_next = next_ring + next_slice;

            data.indices.extend_from_slice(&[bottom_current, bottom_next, top_current]);
            data.indices.extend_from_slice(&[bottom_next, top_next, top_current]);
        }
    }

    Ok(data)
}

/// Generate a UV sphere centred at the origin
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `slices` - Number of divisions around the Z axis
/// * `stacks` - Number of polar divisions per hemisphere
///
/// The mesh spans both hemispheres with `2 * stacks` bands from the north
/// pole (+Z) to the south pole.
pub fn generate_sphere(radius: f32, slices: u32, stacks: u32) -> Result<GeometryData, GeometryError> {
    require_divisions("sphere", "slices", slices)?;
    require_divisions("sphere", "stacks", stacks)?;
    check_vertex_budget("sphere", 2 * u64::from(stacks) + 1, slices)?;

    let mut data = GeometryData::new();
    let rings = 2 * stacks;

    for ring in 0..=rings {
        let t = ring as f32 / rings as f32;
        let polar = t * PI; // 0 at the north pole
        let (sin_polar, cos_polar) = polar.sin_cos();

        for slice in 0..slices {
            let s = slice as f32 / slices as f32;
            let azimuth = s * 2.0 * PI;
            let (sin_az, cos_az) = azimuth.sin_cos();

            let normal = [sin_polar * cos_az, sin_polar * sin_az, cos_polar];
            data.vertices.push([radius * normal[0], radius * normal[1], radius * normal[2]]);
            data.normals.push(normal);
            data.tex_coords.push([s, t]);
        }
    }

    for ring in 0..rings {
        let current = ring * slices;
        let below = current + slices;

        for slice in 0..slices {
            let next_slice = (slice + 1) % slices;

            let a = current + slice;
            let b = current + next_slice;
            let c = below + slice;
            let d = below + next_slice;

            data.indices.extend_from_slice(&[a, c, b]);
            data.indices.extend_from_slice(&[b, c, d]);
        }
    }

    Ok(data)
}

/// Generate a torus around the Z axis
///
/// # Arguments
/// * `inner` - Tube radius
/// * `outer` - Radius of the tube's centre circle
/// * `slices` - Divisions around the tube cross-section
/// * `loops` - Divisions around the Z axis
///
/// Normals point away from the tube's centre circle, not from the origin.
pub fn generate_torus(inner: f32, outer: f32, slices: u32, loops: u32) -> Result<GeometryData, GeometryError> {
    require_divisions("torus", "slices", slices)?;
    require_divisions("torus", "loops", loops)?;
    check_vertex_budget("torus", u64::from(loops), slices)?;

    let mut data = GeometryData::new();

    for lp in 0..loops {
        let s = lp as f32 / loops as f32;
        let (sin_phi, cos_phi) = (s * 2.0 * PI).sin_cos();

        for slice in 0..slices {
            let t = slice as f32 / slices as f32;
            let (sin_theta, cos_theta) = (t * 2.0 * PI).sin_cos();

            let ring_radius = outer + inner * cos_theta;
            data.vertices.push([ring_radius * cos_phi, ring_radius * sin_phi, inner * sin_theta]);
            data.normals.push([cos_theta * cos_phi, cos_theta * sin_phi, sin_theta]);
            data.tex_coords.push([s, t]);
        }
    }

    for lp in 0..loops {
        let current = lp * slices;
        let next = ((lp + 1) % loops) * slices;

        for slice in 0..slices {
            let next_slice = (slice + 1) % slices;

            let a = current + slice;
            let b = current + next_slice;
            let c = next + slice;
            let d = next + next_slice;

            data.indices.extend_from_slice(&[a, c, b]);
            data.indices.extend_from_slice(&[b, c, d]);
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_closed(data: &GeometryData) {
        let count = data.vertex_count() as u32;
        assert!(data.indices.iter().all(|&i| i < count));
        assert!(data.orphan_vertices().is_empty());
        assert_eq!(data.indices.len() % 3, 0);
        assert_eq!(data.vertices.len(), data.normals.len());
        assert_eq!(data.vertices.len(), data.tex_coords.len());
    }

    fn has_triangle_with(data: &GeometryData, a: u32, b: u32) -> bool {
        data.indices
            .chunks(3)
            .any(|tri| tri.contains(&a) && tri.contains(&b))
    }

    /// Face normal of every triangle must agree with its vertex normals.
    fn assert_outward_winding(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let p: Vec<Vector3<f32>> = tri.iter().map(|&i| Vector3::from(data.vertices[i as usize])).collect();
            let face = (p[1] - p[0]).cross(p[2] - p[0]);
            if face.magnitude2() < 1e-12 {
                continue; // collapsed pole triangle
            }
            let averaged: Vector3<f32> = tri
                .iter()
                .map(|&i| Vector3::from(data.normals[i as usize]))
                .fold(Vector3::new(0.0, 0.0, 0.0), |acc, n| acc + n);
            assert!(face.dot(averaged) > 0.0, "triangle {:?} is wound inwards", tri);
        }
    }

    #[test]
    fn test_rectangle_generation() {
        let rect = generate_rectangle(0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(rect.vertex_count(), 4);
        assert_eq!(rect.triangle_count(), 2);
        assert_closed(&rect);
        assert_outward_winding(&rect);
    }

    #[test]
    fn test_rectangle_rejects_inverted_corners() {
        assert_eq!(
            generate_rectangle(1.0, 0.0, 0.0, 1.0).unwrap_err(),
            GeometryError::InvertedRectangle
        );
    }

    #[test]
    fn test_triangle_normal_and_degenerate() {
        let tri = generate_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]).unwrap();
        assert_eq!(tri.normals[0], [0.0, 0.0, 1.0]);
        assert_eq!(tri.triangle_count(), 1);

        let collinear = generate_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(collinear.unwrap_err(), GeometryError::DegenerateTriangle);
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(1.0, 1.0, 2.0, 8, 3).unwrap();
        assert_eq!(cylinder.vertex_count(), 8 * 4);
        assert_eq!(cylinder.triangle_count(), 8 * 3 * 2);
        assert_closed(&cylinder);
        assert_outward_winding(&cylinder);
    }

    #[test]
    fn test_straight_cylinder_normals_are_radial() {
        let cylinder = generate_cylinder(0.5, 0.5, 1.0, 12, 2).unwrap();
        assert!(cylinder.normals.iter().all(|n| n[2] == 0.0));
    }

    #[test]
    fn test_tapered_cylinder_normal_sign_follows_taper() {
        let narrowing = generate_cylinder(1.0, 0.25, 1.0, 12, 2).unwrap();
        assert!(narrowing.normals.iter().all(|n| n[2] > 0.0));

        let widening = generate_cylinder(0.25, 1.0, 1.0, 12, 2).unwrap();
        assert!(widening.normals.iter().all(|n| n[2] < 0.0));
        assert_outward_winding(&widening);
    }

    #[test]
    fn test_cylinder_seam_is_stitched() {
        let slices = 6;
        let cylinder = generate_cylinder(1.0, 1.0, 1.0, slices, 1).unwrap();
        assert!(has_triangle_with(&cylinder, slices - 1, 0));
        assert!(cylinder.max_index().unwrap() < cylinder.vertex_count() as u32);
    }

    #[test]
    fn test_cylinder_rejects_degenerate_input() {
        assert!(matches!(
            generate_cylinder(1.0, 1.0, 1.0, 0, 1),
            Err(GeometryError::ZeroDivisions { parameter: "slices", .. })
        ));
        assert!(matches!(
            generate_cylinder(1.0, 1.0, 1.0, 4, 0),
            Err(GeometryError::ZeroDivisions { parameter: "stacks", .. })
        ));
        assert_eq!(generate_cylinder(1.0, 1.0, 0.0, 4, 1).unwrap_err(), GeometryError::ZeroHeight);
    }

    #[test]
    fn test_oversized_meshes_are_rejected() {
        assert_eq!(
            generate_sphere(1.0, 1, 1 << 31).unwrap_err(),
            GeometryError::TooManyVertices {
                shape: "sphere",
                count: (1 << 32) + 1,
            }
        );
        assert!(matches!(
            generate_cylinder(1.0, 1.0, 1.0, u32::MAX, u32::MAX),
            Err(GeometryError::TooManyVertices { shape: "cylinder", .. })
        ));
        assert!(matches!(
            generate_torus(0.5, 1.0, 1 << 16, 1 << 16),
            Err(GeometryError::TooManyVertices { shape: "torus", .. })
        ));
        assert!(generate_torus(0.5, 1.0, 1 << 12, 1 << 12).is_ok());
    }

    #[test]
    fn test_sphere_generation() {
        let radius = 2.0;
        let sphere = generate_sphere(radius, 10, 4).unwrap();
        assert_eq!(sphere.vertex_count(), 10 * (2 * 4 + 1));
        assert_closed(&sphere);
        assert_outward_winding(&sphere);

        for (v, n) in sphere.vertices.iter().zip(&sphere.normals) {
            for axis in 0..3 {
                assert!((v[axis] / radius - n[axis]).abs() < 1e-5);
            }
        }
        // Both poles are present
        assert!(sphere.vertices.iter().any(|v| (v[2] - radius).abs() < 1e-5));
        assert!(sphere.vertices.iter().any(|v| (v[2] + radius).abs() < 1e-5));
        assert!(sphere
            .tex_coords
            .iter()
            .all(|[s, t]| (0.0..=1.0).contains(s) && (0.0..=1.0).contains(t)));
    }

    #[test]
    fn test_sphere_seam_is_stitched() {
        let sphere = generate_sphere(1.0, 7, 3).unwrap();
        assert!(has_triangle_with(&sphere, 6, 0));
        assert!(generate_sphere(1.0, 0, 3).is_err());
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(0.25, 1.0, 8, 16).unwrap();
        assert_eq!(torus.vertex_count(), 8 * 16);
        assert_eq!(torus.triangle_count(), 8 * 16 * 2);
        assert_closed(&torus);
        assert_outward_winding(&torus);
    }

    #[test]
    fn test_torus_normals_point_away_from_tube_centre() {
        let (inner, outer) = (0.5, 2.0);
        let torus = generate_torus(inner, outer, 6, 9).unwrap();
        for (v, n) in torus.vertices.iter().zip(&torus.normals) {
            let position = Vector3::from(*v);
            let planar = Vector3::new(v[0], v[1], 0.0).normalize();
            let tube_centre = planar * outer;
            let expected = (position - tube_centre) / inner;
            assert!((expected - Vector3::from(*n)).magnitude() < 1e-4);
        }
    }

    #[test]
    fn test_torus_seams_are_stitched() {
        let (slices, loops) = (5, 4);
        let torus = generate_torus(0.25, 1.0, slices, loops).unwrap();
        // around the tube
        assert!(has_triangle_with(&torus, slices - 1, 0));
        // around the axis
        assert!(has_triangle_with(&torus, (loops - 1) * slices, 0));
        assert!(generate_torus(0.25, 1.0, 5, 0).is_err());
    }
}
