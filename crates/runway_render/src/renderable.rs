//! Renderable geometry - bridges meshes to GPU buffers
//!
//! This module uploads the CPU-side [`Mesh`] data from runway_core and keeps
//! one uniform buffer and bind group per draw.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use runway_core::{Material, Mesh, TextureImage};
use runway_math::Mat4;
use wgpu::util::DeviceExt;

use crate::pipeline::{GpuVertex, ObjectUniforms, ScenePipeline, TextureMode};
use crate::texture::GpuTexture;

/// Convert mesh vertices to the GPU layout
pub fn gpu_vertices(mesh: &Mesh) -> Vec<GpuVertex> {
    mesh.vertices.iter().map(GpuVertex::from).collect()
}

/// Pick the texture mode for a draw
///
/// `replace` surfaces (ground, runway) show their texture unlit; other
/// textured surfaces modulate the lit material color.
pub fn texture_mode_for(has_texture: bool, replace: bool) -> TextureMode {
    match (has_texture, replace) {
        (false, _) => TextureMode::None,
        (true, true) => TextureMode::Replace,
        (true, false) => TextureMode::Modulate,
    }
}

/// Vertex and index buffers of one mesh
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &Mesh) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&gpu_vertices(mesh)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// A mesh ready to draw with its material and texture
pub struct DrawItem {
    pub name: String,
    pub mesh: GpuMesh,
    pub material: Material,
    pub texture_mode: TextureMode,
    pub uv_scale: [f32; 2],
    uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl DrawItem {
    pub fn new(
        device: &wgpu::Device,
        pipeline: &ScenePipeline,
        mesh: &Mesh,
        texture: &GpuTexture,
        texture_mode: TextureMode,
        uv_scale: [f32; 2],
    ) -> Self {
        let uniforms = ObjectUniforms::new(
            &mesh.material,
            runway_math::mat4::IDENTITY,
            runway_math::mat4::IDENTITY,
            texture_mode,
            uv_scale,
        );
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = pipeline.create_object_bind_group(device, &uniform_buffer, &texture.view);

        Self {
            name: mesh.name.clone(),
            mesh: GpuMesh::upload(device, mesh),
            material: mesh.material.clone(),
            texture_mode,
            uv_scale,
            uniform_buffer,
            bind_group,
        }
    }

    /// Write this frame's model and view matrices
    pub fn update(&self, queue: &wgpu::Queue, model: Mat4, view: Mat4) {
        let uniforms = ObjectUniforms::new(&self.material, model, view, self.texture_mode, self.uv_scale);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}

/// Uploaded textures keyed by file path, with a white fallback
pub struct TextureLibrary {
    white: GpuTexture,
    textures: HashMap<PathBuf, GpuTexture>,
}

impl TextureLibrary {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            white: GpuTexture::white(device, queue),
            textures: HashMap::new(),
        }
    }

    /// Upload `image` under `path` unless already present
    pub fn insert(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, path: &Path, image: &TextureImage) {
        if !self.textures.contains_key(path) {
            let label = path.display().to_string();
            let texture = GpuTexture::from_image(device, queue, image, &label);
            self.textures.insert(path.to_path_buf(), texture);
        }
    }

    /// Texture for `path`, if one was uploaded
    pub fn get(&self, path: Option<&Path>) -> Option<&GpuTexture> {
        path.and_then(|p| self.textures.get(p))
    }

    /// Texture for `path`, or the white fallback
    pub fn get_or_white(&self, path: Option<&Path>) -> &GpuTexture {
        self.get(path).unwrap_or(&self.white)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_core::RunwayLayout;

    #[test]
    fn test_gpu_vertices_copy_fields() {
        let layout = RunwayLayout::new(20.0, [1.0, 0.5]);
        let ground = layout.ground(None);
        let vertices = gpu_vertices(&ground);
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[2].position, ground.vertices[2].position);
        assert_eq!(vertices[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_texture_mode_for() {
        assert_eq!(texture_mode_for(false, true), TextureMode::None);
        assert_eq!(texture_mode_for(true, true), TextureMode::Replace);
        assert_eq!(texture_mode_for(true, false), TextureMode::Modulate);
    }
}
