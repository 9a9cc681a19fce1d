//! Camera controller for orbit-style scene rotation
//!
//! Controls:
//! - E/D: Tilt the scene up/down (rotation about X, limited)
//! - S/F: Turn the scene left/right (rotation about Y)
//! - Numpad +/- (or =/-): Move the camera closer/further
//!
//! Every key press (including auto-repeat) applies one discrete step.

use runway_core::ViewState;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Camera controller for handling orbit keys
pub struct CameraController {
    /// Degrees added per rotation key press
    pub rotate_step: f32,
    /// Units the camera moves per zoom key press
    pub zoom_step: f32,
    /// Tilting up is allowed only while pitch is above this
    pub pitch_min: f32,
    /// Tilting down is allowed only while pitch is below this
    pub pitch_max: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            rotate_step: 5.0,
            zoom_step: 2.0,
            pitch_min: -20.0,
            pitch_max: 75.0,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is an orbit key (even when a limit blocked the step).
    pub fn process_keyboard<C: OrbitControl>(
        &self,
        key: KeyCode,
        state: ElementState,
        target: &mut C,
    ) -> bool {
        if state != ElementState::Pressed {
            return false;
        }

        match key {
            KeyCode::KeyE => {
                if target.pitch() > self.pitch_min {
                    target.rotate_pitch(-self.rotate_step);
                }
                true
            }
            KeyCode::KeyD => {
                if target.pitch() < self.pitch_max {
                    target.rotate_pitch(self.rotate_step);
                }
                true
            }
            KeyCode::KeyS => { target.rotate_yaw(-self.rotate_step); true }
            KeyCode::KeyF => { target.rotate_yaw(self.rotate_step); true }
            KeyCode::NumpadAdd | KeyCode::Equal => { target.zoom(-self.zoom_step); true }
            KeyCode::NumpadSubtract | KeyCode::Minus => { target.zoom(self.zoom_step); true }
            _ => false,
        }
    }

    /// Check whether a key is one of the orbit keys
    pub fn is_orbit_key(key: KeyCode) -> bool {
        matches!(
            key,
            KeyCode::KeyE
                | KeyCode::KeyD
                | KeyCode::KeyS
                | KeyCode::KeyF
                | KeyCode::NumpadAdd
                | KeyCode::Equal
                | KeyCode::NumpadSubtract
                | KeyCode::Minus
        )
    }

    /// Builder: set rotation step in degrees
    pub fn with_rotate_step(mut self, step: f32) -> Self {
        self.rotate_step = step;
        self
    }

    /// Builder: set zoom step
    pub fn with_zoom_step(mut self, step: f32) -> Self {
        self.zoom_step = step;
        self
    }

    /// Builder: set pitch limits in degrees
    pub fn with_pitch_limits(mut self, min: f32, max: f32) -> Self {
        self.pitch_min = min;
        self.pitch_max = max;
        self
    }
}

/// Trait for orbit control
/// Allows the controller to drive any view state
pub trait OrbitControl {
    fn pitch(&self) -> f32;
    fn rotate_pitch(&mut self, delta: f32);
    fn rotate_yaw(&mut self, delta: f32);
    fn zoom(&mut self, delta: f32);
}

impl OrbitControl for ViewState {
    fn pitch(&self) -> f32 {
        self.pitch
    }

    fn rotate_pitch(&mut self, delta: f32) {
        self.pitch += delta;
    }

    fn rotate_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    fn zoom(&mut self, delta: f32) {
        self.distance += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestView {
        pitch: f32,
        yaw: f32,
        distance: f32,
    }

    impl OrbitControl for TestView {
        fn pitch(&self) -> f32 { self.pitch }
        fn rotate_pitch(&mut self, delta: f32) { self.pitch += delta; }
        fn rotate_yaw(&mut self, delta: f32) { self.yaw += delta; }
        fn zoom(&mut self, delta: f32) { self.distance += delta; }
    }

    fn press(controller: &CameraController, key: KeyCode, view: &mut TestView) -> bool {
        controller.process_keyboard(key, ElementState::Pressed, view)
    }

    #[test]
    fn test_yaw_keys() {
        let controller = CameraController::new();
        let mut view = TestView::default();
        press(&controller, KeyCode::KeyF, &mut view);
        press(&controller, KeyCode::KeyF, &mut view);
        press(&controller, KeyCode::KeyS, &mut view);
        assert_eq!(view.yaw, 5.0);
    }

    #[test]
    fn test_zoom_keys() {
        let controller = CameraController::new();
        let mut view = TestView { distance: 5.0, ..Default::default() };
        press(&controller, KeyCode::NumpadAdd, &mut view);
        assert_eq!(view.distance, 3.0);
        press(&controller, KeyCode::Minus, &mut view);
        press(&controller, KeyCode::NumpadSubtract, &mut view);
        assert_eq!(view.distance, 7.0);
    }

    #[test]
    fn test_pitch_stops_at_upper_limit() {
        let controller = CameraController::new();
        let mut view = TestView::default();
        for _ in 0..40 {
            press(&controller, KeyCode::KeyD, &mut view);
        }
        assert_eq!(view.pitch, 75.0);
    }

    #[test]
    fn test_pitch_stops_at_lower_limit() {
        let controller = CameraController::new();
        let mut view = TestView::default();
        for _ in 0..40 {
            press(&controller, KeyCode::KeyE, &mut view);
        }
        assert_eq!(view.pitch, -20.0);
    }

    #[test]
    fn test_pitch_check_then_step_can_overshoot() {
        // Limits are checked before stepping, so an off-grid start may pass the limit once
        let controller = CameraController::new();
        let mut view = TestView { pitch: 73.0, ..Default::default() };
        press(&controller, KeyCode::KeyD, &mut view);
        assert_eq!(view.pitch, 78.0);
        press(&controller, KeyCode::KeyD, &mut view);
        assert_eq!(view.pitch, 78.0);
    }

    #[test]
    fn test_release_ignored() {
        let controller = CameraController::new();
        let mut view = TestView::default();
        let handled = controller.process_keyboard(KeyCode::KeyF, ElementState::Released, &mut view);
        assert!(!handled);
        assert_eq!(view.yaw, 0.0);
    }

    #[test]
    fn test_other_keys_not_handled() {
        let controller = CameraController::new();
        let mut view = TestView::default();
        assert!(!press(&controller, KeyCode::KeyV, &mut view));
        assert!(!CameraController::is_orbit_key(KeyCode::KeyV));
        assert!(CameraController::is_orbit_key(KeyCode::KeyE));
    }

    #[test]
    fn test_builders() {
        let controller = CameraController::new()
            .with_rotate_step(10.0)
            .with_zoom_step(1.0)
            .with_pitch_limits(-10.0, 10.0);
        let mut view = TestView::default();
        press(&controller, KeyCode::KeyD, &mut view);
        press(&controller, KeyCode::KeyD, &mut view);
        assert_eq!(view.pitch, 10.0);
        press(&controller, KeyCode::NumpadAdd, &mut view);
        assert_eq!(view.distance, -1.0);
    }

    #[test]
    fn test_drives_world_view_state() {
        let controller = CameraController::new();
        let mut view = ViewState::default();
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed, &mut view);
        controller.process_keyboard(KeyCode::KeyF, ElementState::Pressed, &mut view);
        controller.process_keyboard(KeyCode::NumpadAdd, ElementState::Pressed, &mut view);
        assert_eq!(view.pitch, 5.0);
        assert_eq!(view.yaw, 5.0);
        assert_eq!(view.distance, 3.0);
    }
}
