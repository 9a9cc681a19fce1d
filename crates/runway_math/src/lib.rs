//! 3D Mathematics Library
//!
//! This crate provides the small amount of linear algebra the runway demo needs.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transformations
//!
//! ## Lighting
//!
//! - [`quad_normal`] - Unit normal of the plane through three points
//! - [`compute_vertex_normals`] - Flat per-vertex normals for a list of quads

mod vec3;
pub mod mat4;
pub mod lighting;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use lighting::{compute_vertex_normals, quad_normal};
