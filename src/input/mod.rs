//! Input handling: pointer event types and the render-surface listener
//! binding that feeds them to a [`LookController`](crate::LookController).

/// Platform-agnostic pointer events.
pub mod event;
/// Render-surface listener seam and scoped listener binding.
pub mod surface;

pub use event::{PointerEvent, PointerKind};
pub use surface::{PointerBinding, PointerHandler, PointerSurface};
