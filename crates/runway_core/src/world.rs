//! World state
//!
//! The demo's whole mutable state: view angles, viewport, the selected scene
//! options and the airplane pose. Input handlers mutate it, the animation
//! ticks it, and the renderer reads it once per frame.

use runway_math::{mat4, Mat4};

use crate::animation::{AnimationConfig, AnimationPose, TakeoffAnimation};
use crate::layout::RunwayLayout;

/// Model units are millimetres; this brings the scale factor to scene units
pub const AIRPLANE_BASE_SCALE: f32 = 0.001;

/// Camera orbit angles and distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Rotation about X in degrees
    pub pitch: f32,
    /// Rotation about Y in degrees
    pub yaw: f32,
    /// Distance from the camera to the scene origin
    pub distance: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            distance: 5.0,
        }
    }
}

/// Window size in physical pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1 for a zero-height (minimized) window
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// A fixed list of presets with one selected, cycling with wrap-around
#[derive(Clone, Debug, PartialEq)]
pub struct OptionCycle<T> {
    options: Vec<T>,
    index: usize,
}

impl<T: Clone + PartialEq> OptionCycle<T> {
    /// Create a cycle starting at `selected`
    ///
    /// A `selected` value missing from `options` is inserted in front.
    pub fn new(options: Vec<T>, selected: T) -> Self {
        let mut options = options;
        let index = match options.iter().position(|o| *o == selected) {
            Some(i) => i,
            None => {
                options.insert(0, selected);
                0
            }
        };
        Self { options, index }
    }

    pub fn current(&self) -> &T {
        &self.options[self.index]
    }

    /// Select the next preset and return it
    pub fn advance(&mut self) -> &T {
        self.index = (self.index + 1) % self.options.len();
        &self.options[self.index]
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }
}

/// Snapshot of the user-selected scene options
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    /// Distance to the runway's far end
    pub runway_length: f32,
    /// Airplane scale factor, multiplied by [`AIRPLANE_BASE_SCALE`]
    pub airplane_scale: f32,
    /// Milliseconds per animation step
    pub airplane_speed_ms: u32,
}

/// The demo world
pub struct World {
    view: ViewState,
    viewport: Viewport,
    runway_lengths: OptionCycle<f32>,
    airplane_scales: OptionCycle<f32>,
    airplane_speeds: OptionCycle<u32>,
    base_scale: f32,
    airplane_z: f32,
    animation: TakeoffAnimation,
    layout_dirty: bool,
}

impl World {
    pub fn new(
        view: ViewState,
        runway_lengths: OptionCycle<f32>,
        airplane_scales: OptionCycle<f32>,
        airplane_speeds: OptionCycle<u32>,
        animation: AnimationConfig,
    ) -> Self {
        Self {
            view,
            viewport: Viewport::new(1, 1),
            runway_lengths,
            airplane_scales,
            airplane_speeds,
            base_scale: AIRPLANE_BASE_SCALE,
            airplane_z: animation.start_z,
            animation: TakeoffAnimation::new(animation),
            layout_dirty: true,
        }
    }

    /// Builder: override the model unit scale
    pub fn with_base_scale(mut self, base_scale: f32) -> Self {
        self.base_scale = base_scale;
        self
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The view for orbit input, or `None` while the animation runs
    pub fn orbit_target(&mut self) -> Option<&mut ViewState> {
        if self.is_animating() {
            None
        } else {
            Some(&mut self.view)
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn settings(&self) -> SceneSettings {
        SceneSettings {
            runway_length: *self.runway_lengths.current(),
            airplane_scale: *self.airplane_scales.current(),
            airplane_speed_ms: *self.airplane_speeds.current(),
        }
    }

    pub fn airplane_z(&self) -> f32 {
        self.airplane_z
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_in_progress()
    }

    pub fn animation(&self) -> &TakeoffAnimation {
        &self.animation
    }

    /// Start the take-off animation at the selected speed
    pub fn start_animation(&mut self) -> bool {
        let speed = *self.airplane_speeds.current();
        self.animation.start(speed)
    }

    /// Tick the animation by `dt` seconds; returns the number of steps run
    pub fn update(&mut self, dt: f32) -> usize {
        let mut pose = AnimationPose {
            yaw: self.view.yaw,
            airplane_z: self.airplane_z,
        };
        let runway_length = *self.runway_lengths.current();
        let steps = self.animation.update(dt, &mut pose, runway_length);
        self.view.yaw = pose.yaw;
        self.airplane_z = pose.airplane_z;
        steps
    }

    /// Select the next runway length; marks the layout dirty
    pub fn cycle_runway_length(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        let length = *self.runway_lengths.advance();
        self.layout_dirty = true;
        log::info!("Runway length: {}", length);
        true
    }

    /// Select the next airplane scale
    pub fn cycle_airplane_scale(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        let scale = *self.airplane_scales.advance();
        log::info!("Airplane scale: {}", scale);
        true
    }

    /// Select the next animation speed
    pub fn cycle_airplane_speed(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        let speed = *self.airplane_speeds.advance();
        log::info!("Airplane speed: {} ms per step", speed);
        true
    }

    /// Whether the model may be swapped right now
    pub fn can_reload_model(&self) -> bool {
        !self.is_animating()
    }

    /// Return and clear the layout-dirty flag
    pub fn take_layout_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.layout_dirty, false)
    }

    /// Runway geometry for the selected length
    pub fn layout(&self, runway_uv_scale: [f32; 2]) -> RunwayLayout {
        RunwayLayout::new(*self.runway_lengths.current(), runway_uv_scale)
    }

    /// Model matrix of the airplane
    ///
    /// Turns the model upright, parks it beside the runway at the animated
    /// z offset and shrinks the whole placement to 80%.
    pub fn airplane_transform(&self) -> Mat4 {
        let scale = *self.airplane_scales.current() * self.base_scale;
        mat4::chain(&[
            mat4::uniform_scaling(0.8),
            mat4::translation(4.0, 0.0, self.airplane_z),
            mat4::rotation_z(90.0),
            mat4::rotation_y(90.0),
            mat4::translation(4.0, 4.0, -1.0),
            mat4::uniform_scaling(scale),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_math::Vec3;

    fn make_world() -> World {
        World::new(
            ViewState::default(),
            OptionCycle::new(vec![10.0, 20.0, 30.0], 20.0),
            OptionCycle::new(vec![1.0, 2.0], 1.0),
            OptionCycle::new(vec![20, 50, 100], 20),
            AnimationConfig::default(),
        )
    }

    #[test]
    fn test_option_cycle_wraps() {
        let mut cycle = OptionCycle::new(vec![1, 2, 3], 2);
        assert_eq!(*cycle.current(), 2);
        assert_eq!(*cycle.advance(), 3);
        assert_eq!(*cycle.advance(), 1);
    }

    #[test]
    fn test_option_cycle_inserts_missing_selection() {
        let cycle = OptionCycle::new(vec![1, 2], 7);
        assert_eq!(cycle.options(), &[7, 1, 2]);
        assert_eq!(*cycle.current(), 7);
    }

    #[test]
    fn test_viewport_aspect() {
        assert_eq!(Viewport::new(800, 400).aspect(), 2.0);
        assert_eq!(Viewport::new(800, 0).aspect(), 1.0);
    }

    #[test]
    fn test_settings_snapshot() {
        let world = make_world();
        assert_eq!(
            world.settings(),
            SceneSettings {
                runway_length: 20.0,
                airplane_scale: 1.0,
                airplane_speed_ms: 20,
            }
        );
        assert_eq!(world.airplane_z(), 3.5);
    }

    #[test]
    fn test_cycle_runway_length_marks_layout_dirty() {
        let mut world = make_world();
        assert!(world.take_layout_dirty());
        assert!(!world.take_layout_dirty());

        assert!(world.cycle_runway_length());
        assert_eq!(world.settings().runway_length, 30.0);
        assert!(world.take_layout_dirty());
    }

    #[test]
    fn test_mutations_rejected_while_animating() {
        let mut world = make_world();
        assert!(world.start_animation());

        assert!(!world.start_animation());
        assert!(!world.cycle_runway_length());
        assert!(!world.cycle_airplane_scale());
        assert!(!world.cycle_airplane_speed());
        assert!(!world.can_reload_model());
        assert!(world.orbit_target().is_none());
        assert_eq!(world.settings().runway_length, 20.0);
    }

    #[test]
    fn test_animation_drives_view_and_airplane() {
        let mut world = make_world();
        world.start_animation();

        // 20 ms per step: 6 steps of rotation
        world.update(0.1201);
        assert_eq!(world.view().yaw, 60.0);

        world.update(1.0);
        assert!(!world.is_animating());
        assert_eq!(world.view().yaw, 0.0);
        assert_eq!(world.airplane_z(), 3.5);
        assert!(world.orbit_target().is_some());
    }

    #[test]
    fn test_orbit_target_steps_view() {
        let mut world = make_world();
        if let Some(view) = world.orbit_target() {
            view.pitch += 5.0;
            view.distance -= 2.0;
        }
        assert_eq!(world.view().pitch, 5.0);
        assert_eq!(world.view().distance, 3.0);
    }

    #[test]
    fn test_airplane_transform_places_origin() {
        let world = make_world();
        let origin = mat4::transform_point(world.airplane_transform(), Vec3::ZERO);
        assert!((origin.x - 0.0).abs() < 1e-5, "{:?}", origin);
        assert!((origin.y - -0.8).abs() < 1e-5, "{:?}", origin);
        assert!((origin.z - -0.4).abs() < 1e-5, "{:?}", origin);
    }

    #[test]
    fn test_airplane_transform_applies_scale() {
        let mut world = make_world();
        let a = mat4::transform_direction(world.airplane_transform(), Vec3::X);
        world.cycle_airplane_scale();
        let b = mat4::transform_direction(world.airplane_transform(), Vec3::X);
        assert!((b.length() - 2.0 * a.length()).abs() < 1e-7);
        assert!((a.length() - 0.8 * AIRPLANE_BASE_SCALE).abs() < 1e-7);
    }
}
