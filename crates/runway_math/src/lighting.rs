//! Normal computation for lighting
//!
//! Flat surfaces (the ground, the runway, stripe quads) are lit with a single
//! face normal shared by every vertex of the quad.

use crate::Vec3;

/// Unit normal of the plane through `a`, `b`, `c`
///
/// Points are taken counter-clockwise, so the normal faces the viewer who sees
/// them in that order. Collinear points give a zero vector.
pub fn quad_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalized()
}

/// Compute per-vertex normals for a flat list of quads
///
/// `vertices` is `[x0, y0, z0, x1, y1, z1, ...]` with four vertices per quad.
/// The result has the same layout: one normal per vertex, the face normal of
/// its quad (from the first three corners) repeated four times. A trailing
/// partial quad is ignored.
pub fn compute_vertex_normals(vertices: &[f32]) -> Vec<f32> {
    const QUAD_FLOATS: usize = 12;

    let mut normals = Vec::with_capacity(vertices.len() - vertices.len() % QUAD_FLOATS);
    for quad in vertices.chunks_exact(QUAD_FLOATS) {
        let corner = |i: usize| Vec3::new(quad[i * 3], quad[i * 3 + 1], quad[i * 3 + 2]);
        let n = quad_normal(corner(0), corner(1), corner(2));
        for _ in 0..4 {
            normals.extend_from_slice(&n.to_array());
        }
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_quad_faces_up() {
        // Ground corners as laid out on the runway scene (runway length 20)
        let n = quad_normal(
            Vec3::new(-10.0, -1.0, 2.0),
            Vec3::new(10.0, -1.0, 2.0),
            Vec3::new(10.0, -1.0, -20.0),
        );
        assert_eq!(n, Vec3::Y);
    }

    #[test]
    fn test_reversed_winding_faces_down() {
        let n = quad_normal(Vec3::ZERO, Vec3::Z * -1.0, Vec3::X);
        assert_eq!(n, -Vec3::Y);
    }

    #[test]
    fn test_collinear_points_give_zero() {
        let n = quad_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(n, Vec3::ZERO);
    }

    #[test]
    fn test_compute_vertex_normals_repeats_face_normal() {
        let base = [
            -10.0, -1.0, 2.0,
            10.0, -1.0, 2.0,
            10.0, -1.0, -20.0,
            -10.0, -1.0, -20.0,
        ];
        let normals = compute_vertex_normals(&base);
        assert_eq!(normals.len(), 12);
        for n in normals.chunks_exact(3) {
            assert_eq!(n, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_partial_quad_ignored() {
        let mut verts = vec![
            0.0, 0.0, 0.0,
            1.0, 0.0, 0.0,
            1.0, 1.0, 0.0,
            0.0, 1.0, 0.0,
        ];
        verts.extend_from_slice(&[5.0, 5.0, 5.0]);
        let normals = compute_vertex_normals(&verts);
        assert_eq!(normals.len(), 12);
        assert_eq!(&normals[0..3], &[0.0, 0.0, 1.0]);
    }
}
