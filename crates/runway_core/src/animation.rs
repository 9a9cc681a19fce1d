//! Take-off animation
//!
//! A timer-driven state machine: the camera swings around the airplane
//! (`Rotating`), then the airplane rolls down the runway (`Translating`), then
//! everything snaps back to the start pose. One step runs per elapsed tick
//! interval.

/// Step sizes and targets of the animation
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Degrees of yaw added per rotating step
    pub yaw_step: f32,
    /// Yaw at which rotating switches to translating
    pub yaw_target: f32,
    /// Distance the airplane moves per translating step
    pub translate_step: f32,
    /// Airplane z offset restored when the animation ends
    pub start_z: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            yaw_step: 10.0,
            yaw_target: 60.0,
            translate_step: 1.0,
            start_z: 3.5,
        }
    }
}

/// Current stage of the animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Rotating,
    Translating,
}

/// The values the animation drives
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationPose {
    /// Camera yaw in degrees
    pub yaw: f32,
    /// Airplane offset along the runway
    pub airplane_z: f32,
}

/// The two-phase take-off animation
#[derive(Clone, Debug)]
pub struct TakeoffAnimation {
    config: AnimationConfig,
    phase: AnimationPhase,
    /// Seconds per step
    interval: f32,
    accumulator: f32,
}

impl TakeoffAnimation {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            phase: AnimationPhase::Idle,
            interval: 0.001,
            accumulator: 0.0,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase != AnimationPhase::Idle
    }

    /// Start the animation with one step every `speed_ms` milliseconds
    ///
    /// Returns `false` if an animation is already running.
    pub fn start(&mut self, speed_ms: u32) -> bool {
        if self.is_in_progress() {
            return false;
        }
        self.interval = speed_ms.max(1) as f32 / 1000.0;
        self.accumulator = 0.0;
        self.phase = AnimationPhase::Rotating;
        log::info!("Take-off animation started ({} ms per step)", speed_ms.max(1));
        true
    }

    /// Advance by `dt` seconds, running every step whose interval elapsed
    ///
    /// Returns the number of steps run. Time left over when the animation
    /// finishes is dropped.
    pub fn update(&mut self, dt: f32, pose: &mut AnimationPose, runway_length: f32) -> usize {
        if !self.is_in_progress() {
            return 0;
        }

        self.accumulator += dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.interval && self.is_in_progress() {
            self.accumulator -= self.interval;
            self.step(pose, runway_length);
            steps += 1;
        }

        if !self.is_in_progress() {
            self.accumulator = 0.0;
        }
        steps
    }

    /// Run a single step regardless of elapsed time
    pub fn step(&mut self, pose: &mut AnimationPose, runway_length: f32) {
        match self.phase {
            AnimationPhase::Idle => {}
            AnimationPhase::Rotating => {
                pose.yaw += self.config.yaw_step;
                log::debug!("Animation rotate: yaw = {}", pose.yaw);
                if pose.yaw >= self.config.yaw_target {
                    self.phase = AnimationPhase::Translating;
                }
            }
            AnimationPhase::Translating => {
                pose.airplane_z -= self.config.translate_step;
                log::debug!("Animation translate: z = {}", pose.airplane_z);
                if pose.airplane_z <= -runway_length.abs() {
                    pose.yaw = 0.0;
                    pose.airplane_z = self.config.start_z;
                    self.phase = AnimationPhase::Idle;
                    log::info!("Take-off animation finished");
                }
            }
        }
    }
}

impl Default for TakeoffAnimation {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_pose() -> AnimationPose {
        AnimationPose {
            yaw: 0.0,
            airplane_z: 3.5,
        }
    }

    #[test]
    fn test_idle_update_does_nothing() {
        let mut anim = TakeoffAnimation::default();
        let mut pose = start_pose();
        assert_eq!(anim.update(10.0, &mut pose, 20.0), 0);
        assert_eq!(pose, start_pose());
    }

    #[test]
    fn test_start_rejected_while_running() {
        let mut anim = TakeoffAnimation::default();
        assert!(anim.start(20));
        assert!(!anim.start(20));
        assert_eq!(anim.phase(), AnimationPhase::Rotating);
    }

    #[test]
    fn test_rotates_to_target_in_six_steps() {
        let mut anim = TakeoffAnimation::default();
        let mut pose = start_pose();
        anim.start(20);
        for _ in 0..5 {
            anim.step(&mut pose, 20.0);
            assert_eq!(anim.phase(), AnimationPhase::Rotating);
        }
        anim.step(&mut pose, 20.0);
        assert_eq!(pose.yaw, 60.0);
        assert_eq!(anim.phase(), AnimationPhase::Translating);
    }

    #[test]
    fn test_first_rotate_step_runs_past_target() {
        let mut anim = TakeoffAnimation::default();
        let mut pose = AnimationPose {
            yaw: 90.0,
            airplane_z: 3.5,
        };
        anim.start(20);
        anim.step(&mut pose, 20.0);
        assert_eq!(pose.yaw, 100.0);
        assert_eq!(anim.phase(), AnimationPhase::Translating);
    }

    #[test]
    fn test_full_run_resets_pose() {
        let mut anim = TakeoffAnimation::default();
        let mut pose = start_pose();
        anim.start(20);

        let mut steps = 0;
        while anim.is_in_progress() {
            anim.step(&mut pose, 20.0);
            steps += 1;
            assert!(steps < 100, "animation never finished");
        }

        // 6 rotating steps, then 3.5 -> -20.5 in 24 translating steps
        assert_eq!(steps, 30);
        assert_eq!(pose, start_pose());
        assert_eq!(anim.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn test_update_runs_one_step_per_interval() {
        let mut anim = TakeoffAnimation::default();
        let mut pose = start_pose();
        anim.start(100);

        assert_eq!(anim.update(0.05, &mut pose, 20.0), 0);
        assert_eq!(anim.update(0.06, &mut pose, 20.0), 1);
        assert_eq!(pose.yaw, 10.0);
        assert_eq!(anim.update(0.25, &mut pose, 20.0), 2);
        assert_eq!(pose.yaw, 30.0);
    }

    #[test]
    fn test_update_stops_at_idle() {
        let mut anim = TakeoffAnimation::default();
        let mut pose = start_pose();
        anim.start(1);

        let steps = anim.update(10.0, &mut pose, 5.0);
        // 6 rotating steps, then 3.5 -> -5.5 in 9 translating steps
        assert_eq!(steps, 15);
        assert!(!anim.is_in_progress());
        assert_eq!(anim.update(10.0, &mut pose, 5.0), 0);
    }

    #[test]
    fn test_zero_speed_is_clamped() {
        let mut anim = TakeoffAnimation::default();
        let mut pose = start_pose();
        anim.start(0);
        assert_eq!(anim.update(0.0025, &mut pose, 20.0), 2);
    }
}
