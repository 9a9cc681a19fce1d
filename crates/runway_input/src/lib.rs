//! Orbit Input Handling
//!
//! This crate maps the scene-rotation and zoom keys onto any type that
//! implements [`OrbitControl`].

mod camera_controller;

pub use camera_controller::{CameraController, OrbitControl};
