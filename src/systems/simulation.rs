//! Simulation system
//!
//! Manages the per-frame update:
//! - Delta time calculation
//! - Animation ticking
//! - Layout change detection

use std::time::Instant;

use runway_core::World;

/// Longest frame time fed to the animation, in seconds
pub const MAX_FRAME_DT: f32 = 0.25;

/// Result of a simulation update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Seconds simulated this frame (after capping)
    pub dt: f32,
    /// Animation steps run this frame
    pub steps: usize,
    /// Whether the runway geometry needs to be rebuilt and re-uploaded
    pub layout_dirty: bool,
}

/// Manages the simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Run one simulation frame using wall-clock time
    pub fn update(&mut self, world: &mut World) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        Self::step(world, raw_dt)
    }

    /// Run one simulation frame of `raw_dt` seconds
    ///
    /// The frame time is capped so a stall (first frame, window drag) does
    /// not fast-forward the animation.
    pub fn step(world: &mut World, raw_dt: f32) -> SimulationResult {
        let dt = cap_dt(raw_dt);
        let steps = world.update(dt);
        let layout_dirty = world.take_layout_dirty();
        SimulationResult {
            dt,
            steps,
            layout_dirty,
        }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a frame time into `[0, MAX_FRAME_DT]`
pub fn cap_dt(raw_dt: f32) -> f32 {
    raw_dt.clamp(0.0, MAX_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneBuilder;

    #[test]
    fn test_delta_time_capped() {
        assert_eq!(cap_dt(5.0), MAX_FRAME_DT);
        assert_eq!(cap_dt(-1.0), 0.0);
        assert_eq!(cap_dt(0.016), 0.016);
    }

    #[test]
    fn test_first_step_reports_layout() {
        let mut world = SceneBuilder::new().build();
        let result = SimulationSystem::step(&mut world, 0.016);
        assert!(result.layout_dirty);
        assert_eq!(result.steps, 0);

        let result = SimulationSystem::step(&mut world, 0.016);
        assert!(!result.layout_dirty);
    }

    #[test]
    fn test_stall_does_not_fast_forward() {
        let mut world = SceneBuilder::new()
            .with_airplane_speeds(vec![10], 10)
            .build();
        assert!(world.start_animation());

        // 0.25 s at 10 ms per step is 25 steps: 6 rotating + 19 translating
        let result = SimulationSystem::step(&mut world, 10.0);
        assert_eq!(result.dt, MAX_FRAME_DT);
        assert!(result.steps <= 25);
        assert!(world.is_animating());
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert!(sim.last_frame.elapsed().as_millis() < 100);
    }
}
