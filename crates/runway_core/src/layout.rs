//! Procedural runway geometry
//!
//! Everything lies in the XZ plane facing +Y. The runway starts at z = 2 and
//! runs towards -z; its far end is at z = -length.

use runway_math::{compute_vertex_normals, Vec3};

use crate::mesh::{Material, Mesh, MeshVertex};

/// Half width of the grass ground plane
pub const GROUND_HALF_WIDTH: f32 = 10.0;
/// Half width of the asphalt runway
pub const RUNWAY_HALF_WIDTH: f32 = 2.0;

const NEAR_EDGE_Z: f32 = 2.0;
const GROUND_Y: f32 = -2.0;
const RUNWAY_Y: f32 = -1.9;
const STRIPE_Y: f32 = -1.8;
const STRIPE_HALF_WIDTH: f32 = 0.06;
const STRIPE_LENGTH: f32 = 1.0;
const STRIPE_SPACING: f32 = 2.0;
const FIRST_STRIPE_Z: f32 = 0.1;
const SIGN_Y: f32 = -1.7;
const SIGN_RADIUS: f32 = 0.1;
const FIRST_SIGN_Z: f32 = -0.5;
const SIGN_SPACING: f32 = 4.0;
const SIGN_SLICES: u32 = 20;
const SIGN_STACKS: u32 = 20;

const GROUND_COLOR: [f32; 3] = [0.2, 0.8, 0.2];
const RUNWAY_COLOR: [f32; 3] = [0.7, 0.7, 0.7];
const STRIPE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const SIGN_EMISSION: [f32; 3] = [1.0, 1.0, 0.0];

const UNIT_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Round to the nearest integer, ties to even (12.5 -> 12, 13.5 -> 14)
pub fn round_half_even(value: f32) -> f32 {
    value.round_ties_even()
}

/// Geometry of the runway scene for one runway length
#[derive(Clone, Debug, PartialEq)]
pub struct RunwayLayout {
    length: f32,
    runway_uv_scale: [f32; 2],
}

impl RunwayLayout {
    /// Create a layout; `length` is the positive distance to the far end
    pub fn new(length: f32, runway_uv_scale: [f32; 2]) -> Self {
        Self {
            length: length.abs(),
            runway_uv_scale,
        }
    }

    /// Runway length
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Texture coordinate scale applied to the asphalt
    pub fn runway_uv_scale(&self) -> [f32; 2] {
        self.runway_uv_scale
    }

    /// Number of centerline stripes
    pub fn stripe_count(&self) -> usize {
        round_half_even(self.length / STRIPE_SPACING) as usize
    }

    /// Number of sign rows after the first pair
    pub fn extra_sign_rows(&self) -> usize {
        round_half_even(self.length / 5.0) as usize
    }

    /// Centers of all light signs, left/right pairs row by row
    pub fn sign_positions(&self) -> Vec<Vec3> {
        (0..=self.extra_sign_rows())
            .flat_map(|row| {
                let z = FIRST_SIGN_Z - SIGN_SPACING * row as f32;
                [
                    Vec3::new(RUNWAY_HALF_WIDTH, SIGN_Y, z),
                    Vec3::new(-RUNWAY_HALF_WIDTH, SIGN_Y, z),
                ]
            })
            .collect()
    }

    /// The grass plane
    pub fn ground(&self, texture: Option<&std::path::Path>) -> Mesh {
        let mut material = Material::colored("ground", GROUND_COLOR);
        material.diffuse_texture = texture.map(|p| p.to_path_buf());
        flat_quad("ground", self.strip_corners(GROUND_HALF_WIDTH, GROUND_Y), material)
    }

    /// The asphalt strip
    pub fn runway(&self, texture: Option<&std::path::Path>) -> Mesh {
        let mut material = Material::colored("runway", RUNWAY_COLOR);
        material.diffuse_texture = texture.map(|p| p.to_path_buf());
        flat_quad("runway", self.strip_corners(RUNWAY_HALF_WIDTH, RUNWAY_Y), material)
    }

    /// All centerline stripes in one mesh
    pub fn stripes(&self) -> Mesh {
        let mut mesh = Mesh::new("stripes", Material::colored("stripe", STRIPE_COLOR));
        for i in 0..self.stripe_count() {
            let near = FIRST_STRIPE_Z - STRIPE_SPACING * i as f32;
            let far = near - STRIPE_LENGTH;
            mesh.push_quad(
                [
                    Vec3::new(-STRIPE_HALF_WIDTH, STRIPE_Y, near),
                    Vec3::new(STRIPE_HALF_WIDTH, STRIPE_Y, near),
                    Vec3::new(STRIPE_HALF_WIDTH, STRIPE_Y, far),
                    Vec3::new(-STRIPE_HALF_WIDTH, STRIPE_Y, far),
                ],
                UNIT_UVS,
            );
        }
        mesh
    }

    /// All light signs in one mesh
    pub fn signs(&self) -> Mesh {
        let material = Material::emissive("sign", [1.0, 1.0, 1.0], SIGN_EMISSION);
        let sphere = Mesh::uv_sphere("sign", SIGN_RADIUS, SIGN_SLICES, SIGN_STACKS, material.clone());
        let mut mesh = Mesh::new("signs", material);
        for center in self.sign_positions() {
            mesh.append_translated(&sphere, center);
        }
        mesh
    }

    /// Every static mesh of the scene, back to front
    pub fn meshes(&self, ground_texture: Option<&std::path::Path>, runway_texture: Option<&std::path::Path>) -> Vec<Mesh> {
        vec![
            self.ground(ground_texture),
            self.runway(runway_texture),
            self.stripes(),
            self.signs(),
        ]
    }

    fn strip_corners(&self, half_width: f32, y: f32) -> [Vec3; 4] {
        [
            Vec3::new(-half_width, y, NEAR_EDGE_Z),
            Vec3::new(half_width, y, NEAR_EDGE_Z),
            Vec3::new(half_width, y, -self.length),
            Vec3::new(-half_width, y, -self.length),
        ]
    }
}

/// A quad whose normals come from the flat quad-normal helper
fn flat_quad(name: &str, corners: [Vec3; 4], material: Material) -> Mesh {
    let flat: Vec<f32> = corners.iter().flat_map(|c| c.to_array()).collect();
    let normals = compute_vertex_normals(&flat);

    let mut mesh = Mesh::new(name, material);
    for (i, (corner, uv)) in corners.iter().zip(UNIT_UVS.iter()).enumerate() {
        let normal = Vec3::new(normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]);
        mesh.vertices.push(MeshVertex::new(*corner, normal, *uv));
    }
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(12.5), 12.0);
        assert_eq!(round_half_even(13.5), 14.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(4.4), 4.0);
        assert_eq!(round_half_even(4.6), 5.0);
    }

    #[test]
    fn test_counts_for_default_length() {
        let layout = RunwayLayout::new(20.0, [1.0, 0.5]);
        assert_eq!(layout.stripe_count(), 10);
        assert_eq!(layout.extra_sign_rows(), 4);
        assert_eq!(layout.sign_positions().len(), 2 + 2 * 4);
    }

    #[test]
    fn test_counts_round_half_to_even() {
        let layout = RunwayLayout::new(25.0, [1.0, 0.5]);
        assert_eq!(layout.stripe_count(), 12);
        assert_eq!(layout.sign_positions().len(), 2 + 2 * 5);
    }

    #[test]
    fn test_negative_length_is_normalized() {
        let layout = RunwayLayout::new(-30.0, [1.0, 1.0]);
        assert_eq!(layout.length(), 30.0);
    }

    #[test]
    fn test_ground_spans_to_far_end() {
        let layout = RunwayLayout::new(20.0, [1.0, 0.5]);
        let ground = layout.ground(None);
        let zs: Vec<f32> = ground.vertices.iter().map(|v| v.position[2]).collect();
        assert_eq!(zs, vec![2.0, 2.0, -20.0, -20.0]);
        for v in &ground.vertices {
            assert_eq!(v.position[1], -2.0);
            assert_eq!(v.position[0].abs(), GROUND_HALF_WIDTH);
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_runway_sits_above_ground() {
        let layout = RunwayLayout::new(20.0, [1.0, 0.5]);
        let runway = layout.runway(Some(std::path::Path::new("asphalt.jpg")));
        assert!(runway.vertices.iter().all(|v| v.position[1] == -1.9));
        assert_eq!(runway.material.diffuse, [0.7, 0.7, 0.7]);
        assert!(runway.material.diffuse_texture.is_some());
    }

    #[test]
    fn test_stripe_positions() {
        let layout = RunwayLayout::new(20.0, [1.0, 0.5]);
        let stripes = layout.stripes();
        assert_eq!(stripes.vertices.len(), 10 * 4);

        // Second stripe spans -1.9 .. -2.9
        let second = &stripes.vertices[4..8];
        assert!((second[0].position[2] - -1.9).abs() < 1e-5);
        assert!((second[2].position[2] - -2.9).abs() < 1e-5);
        assert!(second.iter().all(|v| v.position[1] == -1.8));
    }

    #[test]
    fn test_sign_rows_are_pairs() {
        let layout = RunwayLayout::new(10.0, [1.0, 0.5]);
        let positions = layout.sign_positions();
        assert_eq!(
            positions,
            vec![
                Vec3::new(2.0, -1.7, -0.5),
                Vec3::new(-2.0, -1.7, -0.5),
                Vec3::new(2.0, -1.7, -4.5),
                Vec3::new(-2.0, -1.7, -4.5),
                Vec3::new(2.0, -1.7, -8.5),
                Vec3::new(-2.0, -1.7, -8.5),
            ]
        );
    }

    #[test]
    fn test_signs_are_emissive() {
        let layout = RunwayLayout::new(10.0, [1.0, 0.5]);
        let signs = layout.signs();
        assert_eq!(signs.material.emission, [1.0, 1.0, 0.0]);
        assert_eq!(signs.vertices.len(), 6 * 21 * 21);
    }

    #[test]
    fn test_meshes_order() {
        let layout = RunwayLayout::new(20.0, [1.0, 0.5]);
        let names: Vec<String> = layout.meshes(None, None).into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["ground", "runway", "stripes", "signs"]);
    }
}
