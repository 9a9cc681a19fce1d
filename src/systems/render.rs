//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene and overlay pipelines
//! - Draw items for the runway layout and the airplane
//! - Frame rendering

use std::path::{Path, PathBuf};
use std::sync::Arc;
use winit::window::Window;

use runway_core::{LightTemplate, Mesh, Model, RunwayLayout, TextureImage, World};
use runway_math::{mat4, Mat4};
use runway_render::{
    context::{ContextError, RenderContext},
    frame_lights, panel_rect,
    pipeline::{FrameUniforms, OverlayPipeline, ScenePipeline},
    texture_mode_for, DrawItem, OrbitCamera, PanelRect, TextPanel, TextureLibrary,
};

use crate::config::{CameraConfig, OverlayConfig, RenderingConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Context(ContextError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "GPU setup failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    scene_pipeline: ScenePipeline,
    overlay_pipeline: OverlayPipeline,
    textures: TextureLibrary,
    camera: OrbitCamera,
    render_config: RenderingConfig,
    lights: Vec<LightTemplate>,
    runway_uv_scale: [f32; 2],
    layout_items: Vec<DrawItem>,
    model_items: Vec<DrawItem>,
    panel: TextPanel,
    panel_size: Option<(u32, u32)>,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: &CameraConfig,
        overlay_config: &OverlayConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let scene_pipeline = ScenePipeline::new(
            &context.device,
            context.config.format,
            context.config.width,
            context.config.height,
        );
        let overlay_pipeline = OverlayPipeline::new(&context.device, context.config.format);
        let textures = TextureLibrary::new(&context.device, &context.queue);

        let panel = if overlay_config.enabled {
            TextPanel::from_font_file(
                Path::new(&overlay_config.font_path),
                overlay_config.lines.clone(),
                overlay_config.color,
            )
        } else {
            TextPanel::new(None, Vec::new(), overlay_config.color)
        };

        Ok(Self {
            context,
            scene_pipeline,
            overlay_pipeline,
            textures,
            camera: OrbitCamera::new(camera_config.fov, camera_config.near, camera_config.far),
            render_config,
            lights: Vec::new(),
            runway_uv_scale: [1.0, 1.0],
            layout_items: Vec::new(),
            model_items: Vec::new(),
            panel,
            panel_size: None,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.scene_pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Lights used from the next frame on
    pub fn set_lights(&mut self, lights: Vec<LightTemplate>) {
        self.lights = lights;
    }

    /// Upload texture images not yet on the GPU
    pub fn upload_textures(&mut self, images: &[(PathBuf, Arc<TextureImage>)]) {
        for (path, image) in images {
            self.textures
                .insert(&self.context.device, &self.context.queue, path, image);
        }
    }

    /// Rebuild the ground, runway, stripes and signs
    pub fn upload_layout(
        &mut self,
        layout: &RunwayLayout,
        ground_texture: Option<&Path>,
        runway_texture: Option<&Path>,
    ) {
        self.runway_uv_scale = layout.runway_uv_scale();
        let meshes = layout.meshes(ground_texture, runway_texture);
        self.layout_items = meshes
            .iter()
            .map(|mesh| {
                let uv_scale = if mesh.name == "runway" {
                    self.runway_uv_scale
                } else {
                    [1.0, 1.0]
                };
                self.make_item(mesh, true, uv_scale)
            })
            .collect();
        log::info!(
            "Uploaded runway layout: length {}, {} stripes, {} signs",
            layout.length(),
            layout.stripe_count(),
            layout.sign_positions().len()
        );
    }

    /// Replace the airplane draw items
    pub fn upload_model(&mut self, model: &Model) {
        self.model_items = model
            .meshes
            .iter()
            .filter(|mesh| !mesh.indices.is_empty())
            .map(|mesh| self.make_item(mesh, false, [1.0, 1.0]))
            .collect();
        log::info!(
            "Uploaded model '{}': {} draw items",
            model.name,
            self.model_items.len()
        );
    }

    fn make_item(&self, mesh: &Mesh, replace: bool, uv_scale: [f32; 2]) -> DrawItem {
        let path = mesh.material.diffuse_texture.as_deref();
        let has_texture = self.textures.get(path).is_some();
        DrawItem::new(
            &self.context.device,
            &self.scene_pipeline,
            mesh,
            self.textures.get_or_white(path),
            texture_mode_for(has_texture, replace),
            uv_scale,
        )
    }

    /// Re-rasterise the info panel when the window size changed
    fn refresh_panel(&mut self, rect: PanelRect) {
        if !self.panel.is_enabled() || self.panel_size == Some((rect.width, rect.height)) {
            return;
        }
        match self.panel.rasterize(rect.width, rect.height) {
            Some(image) => self.overlay_pipeline.set_panel(
                &self.context.device,
                &self.context.queue,
                &image,
            ),
            None => self.overlay_pipeline.clear_panel(),
        }
        self.panel_size = Some((rect.width, rect.height));
    }

    /// Render a single frame
    pub fn render_frame(&mut self, world: &World) -> Result<(), RenderError> {
        let view = self.camera.view_matrix(world.view());
        let projection = frame_projection(&self.camera, world);
        let airplane = world.airplane_transform();

        let ambient = self.render_config.global_ambient;
        let frame = FrameUniforms {
            view,
            projection,
            global_ambient: [ambient[0], ambient[1], ambient[2], 1.0],
            lights: frame_lights(&self.lights, view, airplane),
        };
        self.scene_pipeline.update_frame(&self.context.queue, &frame);

        for item in &self.layout_items {
            item.update(&self.context.queue, mat4::IDENTITY, view);
        }
        for item in &self.model_items {
            item.update(&self.context.queue, airplane, view);
        }

        let rect = panel_rect(self.context.config.width, self.context.config.height);
        self.refresh_panel(rect);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        self.scene_pipeline.render(
            &mut encoder,
            &target,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
            self.layout_items.iter().chain(self.model_items.iter()),
        );
        self.overlay_pipeline.render(&mut encoder, &target, rect);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

/// Perspective for the window size the world last saw
fn frame_projection(camera: &OrbitCamera, world: &World) -> Mat4 {
    camera.projection(world.viewport().aspect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneBuilder;

    #[test]
    fn test_projection_follows_world_viewport() {
        let camera = OrbitCamera::new(45.0, 0.5, 50.0);
        let mut world = SceneBuilder::new().build();

        world.set_viewport(1600, 800);
        let wide = frame_projection(&camera, &world);
        assert_eq!(wide[0][0], wide[1][1] / 2.0);

        world.set_viewport(800, 800);
        let square = frame_projection(&camera, &world);
        assert_eq!(square[0][0], square[1][1]);
    }

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert_eq!(
            format!("{}", RenderError::from(ContextError::NoAdapter)),
            "GPU setup failed: No suitable GPU adapter found"
        );
    }
}
