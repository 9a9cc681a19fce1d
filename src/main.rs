//! Runway - airplane take-off demo
//!
//! Renders an airplane parked beside a procedurally built runway. The scene
//! can be orbited from the keyboard, and V plays the take-off animation.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use runway::config::AppConfig;
use runway::input::{InputAction, InputMapper};
use runway::scene::{SceneAssets, SceneBuilder, SceneError};
use runway::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use runway_core::World;
use runway_input::CameraController;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Scene description, model and textures
    assets: SceneAssets,
    /// View, options and animation state
    world: World,
    controller: CameraController,
    simulation: SimulationSystem,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, SceneError> {
        let assets = SceneAssets::load(&config.scene.path)?
            .with_hot_reload(config.scene.watch_model);
        let world = SceneBuilder::from_config(&config).build();

        let controller = CameraController::new()
            .with_rotate_step(config.camera.rotate_step)
            .with_zoom_step(config.camera.zoom_step)
            .with_pitch_limits(config.camera.pitch_min, config.camera.pitch_max);

        log::info!(
            "Scene '{}' ready: runway length {}, {} lights",
            assets.scene().name,
            world.settings().runway_length,
            assets.scene().lights.len()
        );

        Ok(Self {
            config,
            assets,
            world,
            controller,
            simulation: SimulationSystem::new(),
            window: None,
            renderer: None,
        })
    }

    /// Push textures, lights, layout and model to the GPU
    fn upload_scene(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        renderer.upload_textures(&self.assets.textures());
        renderer.set_lights(self.assets.scene().lights.clone());
        upload_layout(renderer, &self.assets, &self.world);
        if let Some(model) = self.assets.model() {
            renderer.upload_model(&model);
        }
    }

    fn reload_model(&mut self) {
        if !self.world.can_reload_model() {
            return;
        }
        match self.assets.reload_model() {
            Ok(model) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.upload_textures(&self.assets.textures());
                    renderer.upload_model(&model);
                }
            }
            Err(e) => log::error!("Model reload failed, keeping the current model: {}", e),
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::StartAnimation => {
                self.world.start_animation();
            }
            InputAction::ReloadModel => self.reload_model(),
            InputAction::CycleRunwayLength => {
                self.world.cycle_runway_length();
            }
            InputAction::CycleAirplaneScale => {
                self.world.cycle_airplane_scale();
            }
            InputAction::CycleAirplaneSpeed => {
                self.world.cycle_airplane_speed();
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let result = self.simulation.update(&mut self.world);

        if let Some(renderer) = self.renderer.as_mut() {
            if result.layout_dirty {
                upload_layout(renderer, &self.assets, &self.world);
            }
            if self.assets.poll_model_changes() {
                if let Some(model) = self.assets.model() {
                    renderer.upload_textures(&self.assets.textures());
                    renderer.upload_model(&model);
                }
            }

            match renderer.render_frame(&self.world) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => renderer.recover_surface(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            if self.config.debug.title_status {
                window.update_title(
                    self.world.view(),
                    &self.world.settings(),
                    self.world.is_animating(),
                );
            }
            window.request_redraw();
        }
    }
}

/// Build the runway meshes for the selected length and upload them
fn upload_layout(renderer: &mut RenderSystem, assets: &SceneAssets, world: &World) {
    let scene = assets.scene();
    renderer.upload_layout(
        &world.layout(scene.runway_uv_scale),
        scene.ground_texture.as_deref(),
        scene.runway_texture.as_deref(),
    );
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            &self.config.camera,
            &self.config.overlay,
            self.config.window.vsync,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.size();
        self.world.set_viewport(width, height);
        self.world.take_layout_dirty();

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.upload_scene();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.world
                        .set_viewport(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) =
                        InputMapper::map_keyboard(key, event.state, self.world.is_animating())
                    {
                        self.handle_action(action, event_loop);
                    } else if let Some(view) = self.world.orbit_target() {
                        self.controller.process_keyboard(key, event.state, view);
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Runway");

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app).expect("Event loop error");
}
