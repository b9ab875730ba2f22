//! Pointer-drag look controller.
//!
//! Turns 2D pointer drags into yaw/pitch and writes them to a camera once per
//! frame. The controller is passive between frames: the render loop pulls
//! the current orientation with [`LookController::apply_to`].

use glam::Vec2;

use super::core::RotationTarget;
use super::drag::DragState;
use super::orientation::{Orientation, DEFAULT_PITCH_LIMIT};
use crate::input::PointerEvent;
use crate::options::LookOptions;

/// Radians of rotation per screen pixel of pointer travel.
pub const DEFAULT_SENSITIVITY: f32 = 0.002;

/// Natural "grab the world" drag: dragging right turns the view left.
pub const NATURAL_DIRECTION: f32 = -1.0;

/// Tunable parameters for [`LookController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookSettings {
    /// Radians per pixel.
    pub sensitivity: f32,
    /// Sign applied to every delta (`-1.0` natural, `1.0` inverted).
    pub direction: f32,
    /// Symmetric pitch clamp, radians.
    pub pitch_limit: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            direction: NATURAL_DIRECTION,
            pitch_limit: DEFAULT_PITCH_LIMIT,
        }
    }
}

impl LookSettings {
    /// Replace a non-finite sensitivity or direction with its default.
    ///
    /// The pitch limit is sanitized by [`Orientation`] itself.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let sensitivity = if self.sensitivity.is_finite() {
            self.sensitivity
        } else {
            log::warn!(
                "look sensitivity {} is not finite, using default",
                self.sensitivity
            );
            DEFAULT_SENSITIVITY
        };
        let direction = if self.direction.is_finite() {
            self.direction
        } else {
            NATURAL_DIRECTION
        };
        Self {
            sensitivity,
            direction,
            ..self
        }
    }
}

impl From<&LookOptions> for LookSettings {
    fn from(options: &LookOptions) -> Self {
        Self {
            sensitivity: options.sensitivity,
            direction: if options.invert {
                -NATURAL_DIRECTION
            } else {
                NATURAL_DIRECTION
            },
            pitch_limit: options.pitch_limit,
        }
        .sanitized()
    }
}

/// Owns the drag and orientation state for one camera.
#[derive(Debug, Clone)]
pub struct LookController {
    drag: DragState,
    orientation: Orientation,
    settings: LookSettings,
}

impl Default for LookController {
    fn default() -> Self {
        Self::new(LookSettings::default())
    }
}

impl LookController {
    /// Create a controller with zero yaw and pitch.
    #[must_use]
    pub fn new(settings: LookSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            drag: DragState::new(),
            orientation: Orientation::new(settings.pitch_limit),
            settings,
        }
    }

    /// Current yaw, radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.orientation.yaw()
    }

    /// Current pitch, radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.orientation.pitch()
    }

    /// Whether a drag session is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Active settings.
    #[must_use]
    pub fn settings(&self) -> &LookSettings {
        &self.settings
    }

    /// Swap settings at runtime. Pitch is re-clamped to the new limit.
    pub fn set_settings(&mut self, settings: LookSettings) {
        let settings = settings.sanitized();
        self.orientation.set_pitch_limit(settings.pitch_limit);
        self.settings = settings;
    }

    /// Dispatch a platform-agnostic pointer event.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => {
                self.on_pointer_down(Vec2::new(x, y));
            }
            PointerEvent::Move { x, y } => {
                self.on_pointer_move(Vec2::new(x, y));
            }
            PointerEvent::Up => self.on_pointer_up(),
        }
    }

    /// Start a drag session at `pos`.
    pub fn on_pointer_down(&mut self, pos: Vec2) {
        if !pos.is_finite() {
            return;
        }
        log::trace!("look drag start at ({}, {})", pos.x, pos.y);
        self.drag.begin(pos);
    }

    /// Rotate by the distance moved since the last event, if dragging.
    ///
    /// The position is remembered either way.
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        if !pos.is_finite() {
            return;
        }
        if let Some(delta) = self.drag.advance(pos) {
            let scale = self.settings.sensitivity * self.settings.direction;
            self.orientation.rotate(delta * scale);
        }
    }

    /// End the drag session.
    pub fn on_pointer_up(&mut self) {
        if self.drag.is_active() {
            log::trace!(
                "look drag end: yaw {:.4}, pitch {:.4}",
                self.yaw(),
                self.pitch()
            );
        }
        self.drag.end();
    }

    /// Abandon any drag in progress (listener teardown).
    pub fn release(&mut self) {
        self.on_pointer_up();
    }

    /// Zero the target's rotation, locking roll for the controller's
    /// lifetime.
    pub fn reset_camera<T: RotationTarget + ?Sized>(target: &mut T) {
        target.set_rotation_x(0.0);
        target.set_rotation_y(0.0);
        target.set_rotation_z(0.0);
    }

    /// Write yaw to the target's Y rotation and pitch to its X rotation.
    ///
    /// Call once per rendered frame. Roll is never touched.
    pub fn apply_to<T: RotationTarget + ?Sized>(&self, target: &mut T) {
        target.set_rotation_x(self.orientation.pitch());
        target.set_rotation_y(self.orientation.yaw());
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::camera::core::Camera;

    const EPS: f32 = 1e-5;

    fn down(c: &mut LookController, x: f32, y: f32) {
        c.handle_event(PointerEvent::Down { x, y });
    }

    fn move_to(c: &mut LookController, x: f32, y: f32) {
        c.handle_event(PointerEvent::Move { x, y });
    }

    #[test]
    fn horizontal_drag_turns_yaw() {
        let mut c = LookController::default();
        down(&mut c, 100.0, 100.0);
        move_to(&mut c, 150.0, 100.0);
        assert!((c.yaw() - -0.1).abs() < EPS);
        assert_eq!(c.pitch(), 0.0);
    }

    #[test]
    fn move_without_down_changes_nothing() {
        let mut c = LookController::default();
        move_to(&mut c, 100.0, 500.0);
        move_to(&mut c, 300.0, 100.0);
        assert_eq!(c.yaw(), 0.0);
        assert_eq!(c.pitch(), 0.0);
        assert!(!c.is_dragging());
    }

    #[test]
    fn large_upward_drag_clamps_pitch_exactly() {
        let mut c = LookController::default();
        down(&mut c, 0.0, 10000.0);
        move_to(&mut c, 0.0, 0.0);
        assert_eq!(c.pitch(), FRAC_PI_2);
    }

    #[test]
    fn up_then_move_changes_nothing() {
        let mut c = LookController::default();
        down(&mut c, 0.0, 0.0);
        move_to(&mut c, 10.0, 10.0);
        c.handle_event(PointerEvent::Up);
        let (yaw, pitch) = (c.yaw(), c.pitch());
        move_to(&mut c, 500.0, 500.0);
        assert_eq!(c.yaw(), yaw);
        assert_eq!(c.pitch(), pitch);
    }

    #[test]
    fn down_does_not_rotate_by_itself() {
        let mut c = LookController::default();
        move_to(&mut c, 0.0, 0.0);
        down(&mut c, 400.0, 400.0);
        assert_eq!(c.yaw(), 0.0);
        assert_eq!(c.pitch(), 0.0);
    }

    #[test]
    fn pitch_stays_clamped_under_random_drags() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..64 {
            let mut c = LookController::default();
            let mut pos = Vec2::ZERO;
            down(&mut c, pos.x, pos.y);
            for _ in 0..200 {
                pos += Vec2::new(
                    rng.random_range(-5000.0..5000.0),
                    rng.random_range(-5000.0..5000.0),
                );
                move_to(&mut c, pos.x, pos.y);
                assert!(c.pitch() >= -FRAC_PI_2 && c.pitch() <= FRAC_PI_2);
            }
        }
    }

    #[test]
    fn yaw_is_sum_of_deltas_in_any_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let deltas: Vec<f32> =
            (0..50).map(|_| rng.random_range(-40.0..40.0)).collect();
        let expected: f32 = deltas.iter().sum::<f32>() * 0.002 * -1.0;

        let run = |order: &[f32]| {
            let mut c = LookController::default();
            let mut x = 0.0;
            down(&mut c, x, 0.0);
            for d in order {
                x += d;
                move_to(&mut c, x, 0.0);
            }
            c.yaw()
        };

        let mut reversed = deltas.clone();
        reversed.reverse();
        assert!((run(&deltas) - expected).abs() < 1e-3);
        assert!((run(&reversed) - expected).abs() < 1e-3);
    }

    #[test]
    fn inverted_settings_flip_direction() {
        let options = LookOptions {
            invert: true,
            ..LookOptions::default()
        };
        let mut c = LookController::new(LookSettings::from(&options));
        down(&mut c, 0.0, 0.0);
        move_to(&mut c, 50.0, 0.0);
        assert!((c.yaw() - 0.1).abs() < EPS);
    }

    #[test]
    fn non_finite_positions_are_ignored() {
        let mut c = LookController::default();
        down(&mut c, 0.0, 0.0);
        move_to(&mut c, f32::NAN, 3.0);
        move_to(&mut c, 10.0, 0.0);
        assert!((c.yaw() - -0.02).abs() < EPS);
        assert!(c.pitch().is_finite());
    }

    #[test]
    fn non_finite_sensitivity_falls_back_to_default() {
        for text in ["[look]\nsensitivity = inf", "[look]\nsensitivity = nan"] {
            let options = crate::options::Options::from_toml(text).unwrap();
            let mut c =
                LookController::new(LookSettings::from(&options.look));
            assert_eq!(c.settings().sensitivity, DEFAULT_SENSITIVITY);
            down(&mut c, 0.0, 0.0);
            move_to(&mut c, 10.0, 5.0);
            assert!((c.yaw() - -0.02).abs() < EPS);
            assert!((c.pitch() - -0.01).abs() < EPS);
        }

        let mut c = LookController::default();
        c.set_settings(LookSettings {
            sensitivity: f32::INFINITY,
            direction: f32::NAN,
            ..LookSettings::default()
        });
        assert_eq!(*c.settings(), LookSettings::default());
        down(&mut c, 0.0, 0.0);
        move_to(&mut c, 0.0, 10000.0);
        assert_eq!(c.pitch(), -FRAC_PI_2);
    }

    #[test]
    fn apply_writes_pitch_and_yaw_but_not_roll() {
        let mut c = LookController::default();
        let mut cam = Camera::default();
        cam.rotation.z = 0.7;
        LookController::reset_camera(&mut cam);
        assert_eq!(cam.rotation.z, 0.0);

        down(&mut c, 0.0, 0.0);
        move_to(&mut c, 100.0, 50.0);
        cam.rotation.z = 0.25;
        c.apply_to(&mut cam);
        assert_eq!(cam.rotation.x, c.pitch());
        assert_eq!(cam.rotation.y, c.yaw());
        assert_eq!(cam.rotation.z, 0.25);
    }

    #[test]
    fn release_ends_drag() {
        let mut c = LookController::default();
        down(&mut c, 0.0, 0.0);
        c.release();
        assert!(!c.is_dragging());
        move_to(&mut c, 100.0, 0.0);
        assert_eq!(c.yaw(), 0.0);
    }

    #[test]
    fn tighter_limit_reclamps() {
        let mut c = LookController::default();
        down(&mut c, 0.0, 1000.0);
        move_to(&mut c, 0.0, 0.0);
        c.set_settings(LookSettings {
            pitch_limit: 0.25,
            ..LookSettings::default()
        });
        assert_eq!(c.pitch(), 0.25);
    }
}
