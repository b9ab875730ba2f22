//! Frame orchestration: camera, look controller, scene and renderer.

mod input;
mod options;

use std::cell::RefCell;
use std::rc::Rc;

use crate::camera::{Camera, CameraUniform, LookController, LookSettings};
use crate::error::LookError;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::Scene;
use crate::util::frame_timing::FrameTiming;

/// Owns everything needed to draw the scene into a window or canvas.
///
/// The look controller sits behind `Rc<RefCell<_>>` so a
/// [`PointerBinding`](crate::input::PointerBinding) can feed it directly
/// while the engine pulls its orientation once per frame.
pub struct SceneRenderEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    /// Camera driven by the look controller.
    camera: Camera,
    /// CPU copy of the camera uniform.
    camera_uniform: CameraUniform,
    /// Pointer-drag look controller, shared with listener bindings.
    look: Rc<RefCell<LookController>>,
    /// Scene description the GPU buffers were built from.
    scene: Scene,
    /// Lit mesh pipeline and per-object buffers.
    renderer: SceneRenderer,
    /// Runtime options.
    options: Options,
    /// Per-frame timing and FPS tracking.
    frame_timing: FrameTiming,
}

// =============================================================================
// Core
// =============================================================================

impl SceneRenderEngine {
    /// Engine rendering the demo scene into a window or canvas.
    ///
    /// # Errors
    ///
    /// Returns [`LookError::Gpu`] if GPU initialization fails.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, LookError> {
        let context = RenderContext::new(target, size).await?;
        let scene = Scene::demo(&options);
        Ok(Self::with_scene(context, scene, options))
    }

    /// Engine from a pre-built [`RenderContext`] and an arbitrary scene.
    #[must_use]
    pub fn with_scene(
        context: RenderContext,
        scene: Scene,
        options: Options,
    ) -> Self {
        let (width, height) = context.size();
        let mut camera =
            Camera::from_options(&options.camera, aspect(width, height));
        LookController::reset_camera(&mut camera);

        let look = LookController::new(LookSettings::from(&options.look));
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera);

        let renderer = SceneRenderer::new(&context, &scene);
        log::info!(
            "engine ready: {} objects, {}x{}, {:?}",
            renderer.object_count(),
            width,
            height,
            context.format()
        );

        Self {
            frame_timing: FrameTiming::new(options.display.target_fps),
            context,
            camera,
            camera_uniform,
            look: Rc::new(RefCell::new(look)),
            scene,
            renderer,
            options,
        }
    }

    /// Frame tick: copy the controller's orientation onto the camera and
    /// upload the camera uniform.
    pub fn update(&mut self) {
        match self.look.try_borrow() {
            Ok(look) => sync_camera(
                &look,
                &mut self.camera,
                &mut self.camera_uniform,
            ),
            Err(_) => {
                log::warn!("look controller busy, reusing last orientation");
                self.camera_uniform.update_view_proj(&self.camera);
            }
        }
        self.renderer
            .update_camera(&self.context.queue, &self.camera_uniform);
    }

    /// Execute one frame: tick the camera, draw the scene, and present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        self.update();

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        self.renderer.draw(&mut encoder, &view);
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize the surface, depth buffer and camera projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.renderer.resize(&self.context.device, width, height);
            self.camera.resize(width, height);
        }
    }

    /// The camera the controller drives.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The scene being drawn.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}

/// Width over height, falling back to 1 for degenerate sizes.
fn aspect(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Pull the controller's yaw/pitch onto `camera` and refresh `uniform`.
fn sync_camera(
    look: &LookController,
    camera: &mut Camera,
    uniform: &mut CameraUniform,
) {
    look.apply_to(camera);
    uniform.update_view_proj(camera);
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::input::PointerEvent;

    #[test]
    fn sync_copies_orientation_and_matrix() {
        let mut look = LookController::default();
        look.handle_event(PointerEvent::Down { x: 0.0, y: 0.0 });
        look.handle_event(PointerEvent::Move { x: 200.0, y: -100.0 });

        let mut camera = Camera::default();
        let mut uniform = CameraUniform::new();
        sync_camera(&look, &mut camera, &mut uniform);

        assert_eq!(camera.rotation.y, look.yaw());
        assert_eq!(camera.rotation.x, look.pitch());
        assert_eq!(
            Mat4::from_cols_array_2d(&uniform.view_proj),
            camera.build_matrix()
        );
        assert_eq!(uniform.position, Vec3::new(0.0, 1.6, 0.0).to_array());
    }

    #[test]
    fn aspect_handles_zero_sizes() {
        assert_eq!(aspect(1600, 800), 2.0);
        assert_eq!(aspect(0, 800), 1.0);
        assert_eq!(aspect(800, 0), 1.0);
    }
}
