//! Runway - airplane take-off demo
//!
//! Library half of the application: configuration, key mapping, scene
//! construction and the window/render/simulation systems that `main` wires
//! into the winit event loop.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
