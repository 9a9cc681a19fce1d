//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Exit, StartAnimation, etc.
//! Orbit keys (E/D/S/F, +/-) are NOT mapped here - they go directly to CameraController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not orbiting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (F2 or Escape)
    Exit,
    /// Start the take-off animation (V key)
    StartAnimation,
    /// Reload the airplane model from disk (F4)
    ReloadModel,
    /// Select the next runway length (1 key)
    CycleRunwayLength,
    /// Select the next airplane scale (2 key)
    CycleAirplaneScale,
    /// Select the next animation speed (3 key)
    CycleAirplaneSpeed,
    /// Toggle fullscreen mode (F11)
    ToggleFullscreen,
}

/// Maps raw input events to semantic actions
///
/// Orbit keys are NOT mapped here - they go directly to the
/// CameraController. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// While the animation runs only Exit gets through.
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        animating: bool,
    ) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        let action = match key {
            KeyCode::F2 | KeyCode::Escape => InputAction::Exit,
            KeyCode::KeyV => InputAction::StartAnimation,
            KeyCode::F4 => InputAction::ReloadModel,
            KeyCode::Digit1 | KeyCode::Numpad1 => InputAction::CycleRunwayLength,
            KeyCode::Digit2 | KeyCode::Numpad2 => InputAction::CycleAirplaneScale,
            KeyCode::Digit3 | KeyCode::Numpad3 => InputAction::CycleAirplaneSpeed,
            KeyCode::F11 => InputAction::ToggleFullscreen,
            _ => return None,
        };

        if animating && action != InputAction::Exit {
            return None;
        }
        Some(action)
    }
}
