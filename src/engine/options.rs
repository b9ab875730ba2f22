//! Options methods for SceneRenderEngine

use super::SceneRenderEngine;
use crate::camera::LookSettings;
use crate::options::Options;
use crate::util::frame_timing::FrameTiming;

impl SceneRenderEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the camera, controller, lights and
    /// frame limiter.
    pub fn apply_options(&mut self) {
        self.apply_camera();
        self.apply_look();
        self.apply_lighting();
        self.frame_timing = FrameTiming::new(self.options.display.target_fps);
    }

    /// Push projection options to the camera. Position stays where it is.
    fn apply_camera(&mut self) {
        let co = &self.options.camera;
        self.camera.fovy = co.fovy;
        self.camera.znear = co.znear;
        self.camera.zfar = co.zfar;
    }

    /// Push sensitivity, direction and pitch limit to the controller.
    fn apply_look(&mut self) {
        let settings = LookSettings::from(&self.options.look);
        match self.look.try_borrow_mut() {
            Ok(mut look) => look.set_settings(settings),
            Err(_) => log::warn!("look controller busy, settings not applied"),
        }
    }

    /// Push lights and background to the GPU.
    fn apply_lighting(&mut self) {
        self.scene.apply_options(&self.options);
        self.renderer.update_scene(&self.context.queue, &self.scene);
    }
}
