//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};

use runway_core::{SceneSettings, ViewState};

use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with view/animation state
    pub fn update_title(&self, view: &ViewState, settings: &SceneSettings, animating: bool) {
        self.window
            .set_title(&status_title(&self.base_title, view, settings, animating));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Title text showing the orbit and the selected options
pub fn status_title(base: &str, view: &ViewState, settings: &SceneSettings, animating: bool) -> String {
    let state = if animating { "[Taking off]" } else { "[V to take off]" };
    format!(
        "{} - pitch {:.0} yaw {:.0} dist {:.1} | runway {} scale {} speed {}ms {}",
        base,
        view.pitch,
        view.yaw,
        view.distance,
        settings.runway_length,
        settings.airplane_scale,
        settings.airplane_speed_ms,
        state
    )
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SceneSettings {
        SceneSettings {
            runway_length: 20.0,
            airplane_scale: 1.5,
            airplane_speed_ms: 50,
        }
    }

    #[test]
    fn test_title_when_idle() {
        let title = status_title("Runway", &ViewState::default(), &settings(), false);
        assert_eq!(
            title,
            "Runway - pitch 0 yaw 0 dist 5.0 | runway 20 scale 1.5 speed 50ms [V to take off]"
        );
    }

    #[test]
    fn test_title_when_animating() {
        let view = ViewState {
            pitch: -10.0,
            yaw: 30.0,
            distance: 3.0,
        };
        let title = status_title("Runway", &view, &settings(), true);
        assert!(title.contains("yaw 30"));
        assert!(title.ends_with("[Taking off]"));
    }

    #[test]
    fn test_window_error_display() {
        let error = WindowError::CreationFailed("no display".to_string());
        assert_eq!(format!("{}", error), "Window creation failed: no display");
    }
}
