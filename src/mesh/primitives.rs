//! Primitive shapes: cylinders (hex columns, cones, open rings) and UV spheres.
//!
//! All primitives are centred on the origin and callers translate them into
//! place, so a cylinder of height `h` spans `-h/2..h/2` on Y.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::geometry::{MeshData, Vertex};

/// Parameters for a capped or open cylinder. A zero top radius gives a cone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderSpec {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub open_ended: bool,
}

impl CylinderSpec {
    /// Six-sided prism with unit circumradius
    pub fn hex_column(height: f32) -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height,
            radial_segments: 6,
            open_ended: false,
        }
    }

    /// Pointed cone with the given base radius
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self {
            radius_top: 0.0,
            radius_bottom: radius,
            height,
            radial_segments,
            open_ended: false,
        }
    }
}

/// Build a cylinder mesh
pub fn cylinder(spec: &CylinderSpec) -> MeshData {
    let segments = spec.radial_segments.max(3);
    let half = spec.height * 0.5;
    let slope = if spec.height > 0.0 {
        (spec.radius_bottom - spec.radius_top) / spec.height
    } else {
        0.0
    };

    let mut mesh = MeshData::new();

    // Side: row 0 is the top ring, row 1 the bottom ring
    for row in 0..2u32 {
        let v = row as f32;
        let radius = spec.radius_top + (spec.radius_bottom - spec.radius_top) * v;
        let y = half - v * spec.height;
        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalize();
            mesh.vertices.push(Vertex::new(
                Vec3::new(radius * sin, y, radius * cos),
                normal,
                [u, 1.0 - v],
            ));
        }
    }

    let stride = segments + 1;
    for i in 0..segments {
        let a = i;
        let b = stride + i;
        let c = stride + i + 1;
        let d = i + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    if !spec.open_ended {
        if spec.radius_top > 0.0 {
            push_cap(&mut mesh, segments, spec.radius_top, half, true);
        }
        if spec.radius_bottom > 0.0 {
            push_cap(&mut mesh, segments, spec.radius_bottom, -half, false);
        }
    }

    mesh
}

fn push_cap(mesh: &mut MeshData, segments: u32, radius: f32, y: f32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = Vec3::Y * sign;
    let center = mesh.vertices.len() as u32;

    mesh.vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal, [0.5, 0.5]));
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(radius * sin, y, radius * cos),
            normal,
            [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
        ));
    }

    for i in 0..segments {
        let ring = center + 1 + i;
        if top {
            mesh.indices.extend_from_slice(&[center, ring, ring + 1]);
        } else {
            mesh.indices.extend_from_slice(&[center, ring + 1, ring]);
        }
    }
}

/// Build a UV sphere centred on the origin
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::new();

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let dir = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.vertices.push(Vertex::new(dir * radius, dir.normalize_or_zero(), [u, 1.0 - v]));
        }
    }

    let stride = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            // Pole rows collapse to single triangles
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &MeshData, tri: usize) -> Vec3 {
        let i = &mesh.indices[tri * 3..tri * 3 + 3];
        let p0 = mesh.vertices[i[0] as usize].position();
        let p1 = mesh.vertices[i[1] as usize].position();
        let p2 = mesh.vertices[i[2] as usize].position();
        (p1 - p0).cross(p2 - p0).normalize_or_zero()
    }

    #[test]
    fn test_hex_column_counts() {
        let mesh = cylinder(&CylinderSpec::hex_column(2.0));
        // 2 side rings of 7 + 2 caps of (1 + 7)
        assert_eq!(mesh.vertex_count(), 14 + 16);
        // 12 side triangles + 6 per cap
        assert_eq!(mesh.triangle_count(), 24);
    }

    #[test]
    fn test_hex_column_bounds() {
        let mesh = cylinder(&CylinderSpec::hex_column(3.0));
        let bounds = mesh.bounds().unwrap();
        assert!((bounds.min.y + 1.5).abs() < 1e-6);
        assert!((bounds.max.y - 1.5).abs() < 1e-6);
        // Vertices lie on the unit circle
        for v in &mesh.vertices {
            let r = Vec3::new(v.position[0], 0.0, v.position[2]).length();
            assert!(r < 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_outward_winding() {
        let mesh = cylinder(&CylinderSpec::hex_column(2.0));
        let centroid = Vec3::ZERO;
        for tri in 0..mesh.triangle_count() {
            let i = &mesh.indices[tri * 3..tri * 3 + 3];
            let mid = (mesh.vertices[i[0] as usize].position()
                + mesh.vertices[i[1] as usize].position()
                + mesh.vertices[i[2] as usize].position())
                / 3.0;
            assert!(
                face_normal(&mesh, tri).dot(mid - centroid) > 0.0,
                "triangle {} faces inward",
                tri
            );
        }
    }

    #[test]
    fn test_cone_has_no_top_cap() {
        let mesh = cylinder(&CylinderSpec::cone(1.5, 2.0, 3));
        // side rings of 4 + bottom cap of 1 + 4
        assert_eq!(mesh.vertex_count(), 8 + 5);
        assert_eq!(mesh.triangle_count(), 6 + 3);
    }

    #[test]
    fn test_open_ended_has_no_caps() {
        let spec = CylinderSpec {
            radius_top: 17.1,
            radius_bottom: 17.1,
            height: 2.5,
            radial_segments: 50,
            open_ended: true,
        };
        let mesh = cylinder(&spec);
        assert_eq!(mesh.triangle_count(), 100);
        assert!(mesh.vertices.iter().all(|v| v.normal[1].abs() < 1e-6));
    }

    #[test]
    fn test_sphere_radius() {
        let mesh = sphere(0.3, 7, 7);
        assert!(!mesh.is_empty());
        for v in &mesh.vertices {
            assert!((v.position().length() - 0.3).abs() < 1e-5);
        }
        // 7 * 7 quads minus the collapsed pole halves
        assert_eq!(mesh.triangle_count(), 7 * 7 * 2 - 2 * 7);
    }

    #[test]
    fn test_zero_radius_sphere_is_degenerate_but_valid() {
        let mesh = sphere(0.0, 7, 7);
        assert!(mesh.vertices.iter().all(|v| v.position() == Vec3::ZERO));
    }
}
