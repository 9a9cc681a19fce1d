//! Triangle meshes and materials
//!
//! Meshes are pure CPU-side data. The render crate uploads them to GPU buffers.

use std::path::PathBuf;

use runway_math::{quad_normal, Vec3};

/// A vertex with position, normal and texture coordinate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }
}

/// Surface properties of a mesh (fixed-function style)
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub emission: [f32; 3],
    pub opacity: f32,
    /// Diffuse texture, already resolved against the material file's directory
    pub diffuse_texture: Option<PathBuf>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.8, 0.8, 0.8],
            specular: [0.0, 0.0, 0.0],
            shininess: 0.0,
            emission: [0.0, 0.0, 0.0],
            opacity: 1.0,
            diffuse_texture: None,
        }
    }
}

impl Material {
    /// A plain colored material where the color drives ambient and diffuse
    pub fn colored(name: &str, color: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            ambient: color,
            diffuse: color,
            ..Self::default()
        }
    }

    /// A colored material that also glows with the given emission
    pub fn emissive(name: &str, color: [f32; 3], emission: [f32; 3]) -> Self {
        Self {
            emission,
            ..Self::colored(name, color)
        }
    }

    /// Builder: attach a diffuse texture
    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.diffuse_texture = Some(path.into());
        self
    }
}

/// An indexed triangle mesh with a single material
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    /// Counter-clockwise triangles
    pub indices: Vec<u32>,
    pub material: Material,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new(name: impl Into<String>, material: Material) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            indices: Vec::new(),
            material,
        }
    }

    /// A single quad from four counter-clockwise corners
    ///
    /// The normal comes from the first three corners.
    pub fn quad(name: &str, corners: [Vec3; 4], uvs: [[f32; 2]; 4], material: Material) -> Self {
        let mut mesh = Self::new(name, material);
        mesh.push_quad(corners, uvs);
        mesh
    }

    /// Append a quad from four counter-clockwise corners
    pub fn push_quad(&mut self, corners: [Vec3; 4], uvs: [[f32; 2]; 4]) {
        let normal = quad_normal(corners[0], corners[1], corners[2]);
        let base = self.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs.iter()) {
            self.vertices.push(MeshVertex::new(*corner, normal, *uv));
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// A UV sphere centered on the origin with outward normals
    pub fn uv_sphere(name: &str, radius: f32, slices: u32, stacks: u32, material: Material) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);
        let mut mesh = Self::new(name, material);

        for i in 0..=stacks {
            let phi = std::f32::consts::PI * i as f32 / stacks as f32;
            for j in 0..=slices {
                let theta = std::f32::consts::TAU * j as f32 / slices as f32;
                let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                mesh.vertices.push(MeshVertex::new(
                    normal * radius,
                    normal,
                    [j as f32 / slices as f32, 1.0 - i as f32 / stacks as f32],
                ));
            }
        }

        let row = slices + 1;
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * row + j;
                let b = (i + 1) * row + j;
                let c = i * row + j + 1;
                let d = (i + 1) * row + j + 1;
                mesh.indices.extend_from_slice(&[a, c, b, c, d, b]);
            }
        }

        mesh
    }

    /// Append another mesh's geometry, offset by `translation`
    ///
    /// The other mesh's material is ignored.
    pub fn append_translated(&mut self, other: &Mesh, translation: Vec3) {
        let base = self.vertices.len() as u32;
        for v in &other.vertices {
            let mut moved = *v;
            moved.position = (Vec3::from_array(v.position) + translation).to_array();
            self.vertices.push(moved);
        }
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A loaded model: one mesh per material run
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
}

impl Model {
    /// Total vertex count across all meshes
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertices.len()).sum()
    }

    /// Total triangle count across all meshes
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty model
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self
            .meshes
            .iter()
            .flat_map(|m| m.vertices.iter())
            .map(|v| Vec3::from_array(v.position));

        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (min.min_components(p), max.max_components(p))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    fn floor_corners() -> [Vec3; 4] {
        [
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, -1.0),
        ]
    }

    #[test]
    fn test_quad_has_two_triangles_facing_up() {
        let mesh = Mesh::quad("floor", floor_corners(), UNIT_UVS, Material::default());
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_push_quad_offsets_indices() {
        let mut mesh = Mesh::new("stripes", Material::default());
        mesh.push_quad(floor_corners(), UNIT_UVS);
        mesh.push_quad(floor_corners(), UNIT_UVS);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_uv_sphere_vertices_on_surface() {
        let mesh = Mesh::uv_sphere("sign", 0.1, 12, 8, Material::default());
        assert_eq!(mesh.vertices.len(), 13 * 9);
        assert_eq!(mesh.triangle_count(), 12 * 8 * 2);
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 0.1).abs() < 1e-5);
        }
    }

    #[test]
    fn test_uv_sphere_winding_is_outward() {
        let mesh = Mesh::uv_sphere("sign", 1.0, 16, 8, Material::default());
        for tri in mesh.indices.chunks_exact(3) {
            let p = |i: u32| Vec3::from_array(mesh.vertices[i as usize].position);
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let face = (b - a).cross(c - a);
            if face.length() < 1e-6 {
                continue; // degenerate pole triangle
            }
            let centroid = (a + b + c) * (1.0 / 3.0);
            assert!(face.dot(centroid) > 0.0, "triangle {:?} faces inward", tri);
        }
    }

    #[test]
    fn test_append_translated() {
        let sphere = Mesh::uv_sphere("sign", 1.0, 4, 2, Material::default());
        let mut signs = Mesh::new("signs", Material::default());
        signs.append_translated(&sphere, Vec3::new(2.0, 0.0, 0.0));
        signs.append_translated(&sphere, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(signs.vertices.len(), sphere.vertices.len() * 2);
        assert_eq!(signs.indices[sphere.indices.len()], sphere.indices[0] + sphere.vertices.len() as u32);
        assert_eq!(signs.vertices[0].position[0], sphere.vertices[0].position[0] + 2.0);
    }

    #[test]
    fn test_model_bounds() {
        let model = Model {
            name: "test".to_string(),
            meshes: vec![Mesh::quad("floor", floor_corners(), UNIT_UVS, Material::default())],
        };
        let (min, max) = model.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(max, Vec3::new(1.0, 0.0, 1.0));
        assert!(Model::default().bounds().is_none());
    }

    #[test]
    fn test_material_builders() {
        let m = Material::emissive("sign", [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]).with_texture("a.png");
        assert_eq!(m.diffuse, [1.0, 1.0, 1.0]);
        assert_eq!(m.emission, [1.0, 1.0, 0.0]);
        assert_eq!(m.diffuse_texture, Some(PathBuf::from("a.png")));
    }
}
