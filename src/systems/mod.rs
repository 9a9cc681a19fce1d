//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::{cap_dt, SimulationResult, SimulationSystem, MAX_FRAME_DT};
pub use window::{status_title, WindowError, WindowSystem};
