//! GPU-compatible data types for the scene and overlay pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use runway_core::{Material, MeshVertex};
use runway_math::mat4;

/// Number of light slots in [`FrameUniforms`]
pub const LIGHT_SLOTS: usize = 2;

/// Sentinel stored in a light's cone cosine when it has no cone
pub const NO_SPOT_CONE: f32 = -2.0;

/// A vertex as the scene shader reads it
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl From<&MeshVertex> for GpuVertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
        }
    }
}

/// One light in view space
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    /// View-space position, w = 1
    pub position: [f32; 4],
    /// View-space spot direction; w = cosine of the cone cutoff or [`NO_SPOT_CONE`]
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    /// Specular color; w = 1 when the slot is in use
    pub specular: [f32; 4],
}

impl GpuLight {
    pub fn is_enabled(&self) -> bool {
        self.specular[3] > 0.5
    }
}

/// Per-frame uniforms
/// Layout: 304 bytes total (must match scene.wgsl FrameUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View matrix (64 bytes)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection: [[f32; 4]; 4],
    /// Scene-wide ambient light (16 bytes)
    pub global_ambient: [f32; 4],
    /// Light slots (2 x 80 bytes)
    pub lights: [GpuLight; LIGHT_SLOTS],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            global_ambient: [0.2, 0.2, 0.2, 1.0],
            lights: [GpuLight::default(); LIGHT_SLOTS],
        }
    }
}

/// How a draw combines its texture with lighting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum TextureMode {
    /// Lit material color only
    None = 0,
    /// Lit material color times the texture
    Modulate = 1,
    /// Texture color as is, unlit
    Replace = 2,
}

/// Per-draw uniforms
/// Layout: 208 bytes total (must match scene.wgsl ObjectUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model matrix (64 bytes)
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of view * model (64 bytes)
    pub normal_matrix: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    /// Diffuse color; w = opacity
    pub diffuse: [f32; 4],
    /// Specular color; w = shininess
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    pub texture_mode: u32,
    pub _padding: u32,
    pub uv_scale: [f32; 2],
}

impl ObjectUniforms {
    /// Uniforms for drawing `material` with the given model and view matrices
    pub fn new(
        material: &Material,
        model: [[f32; 4]; 4],
        view: [[f32; 4]; 4],
        texture_mode: TextureMode,
        uv_scale: [f32; 2],
    ) -> Self {
        let rgb = |c: [f32; 3], w: f32| [c[0], c[1], c[2], w];
        Self {
            model,
            normal_matrix: mat4::normal_matrix(mat4::mul(view, model)),
            ambient: rgb(material.ambient, 1.0),
            diffuse: rgb(material.diffuse, material.opacity),
            specular: rgb(material.specular, material.shininess),
            emission: rgb(material.emission, 0.0),
            texture_mode: texture_mode as u32,
            _padding: 0,
            uv_scale,
        }
    }
}

/// Vertex of the overlay quad
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    /// Clip-space position
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// Quad covering the whole viewport, as a triangle strip
pub const OVERLAY_QUAD: [OverlayVertex; 4] = [
    OverlayVertex { position: [-1.0, -1.0], uv: [0.0, 1.0] },
    OverlayVertex { position: [1.0, -1.0], uv: [1.0, 1.0] },
    OverlayVertex { position: [-1.0, 1.0], uv: [0.0, 0.0] },
    OverlayVertex { position: [1.0, 1.0], uv: [1.0, 0.0] },
];
