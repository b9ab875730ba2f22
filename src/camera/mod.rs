//! Camera system for first-person look.
//!
//! Provides a perspective camera, the yaw/pitch accumulators and the
//! pointer-drag controller that drives them.

/// Perspective camera, rotation target trait and GPU uniform types.
pub mod core;
/// Drag session tracking.
pub mod drag;
/// Pointer-drag look controller.
pub mod look;
/// Yaw/pitch accumulators with pitch clamping.
pub mod orientation;

pub use self::core::{Camera, CameraUniform, RotationTarget};
pub use look::{LookController, LookSettings};
