//! Small shared helpers.

/// `#RRGGBB` parsing and sRGB conversion.
pub mod color;
/// Frame timing and FPS smoothing.
pub mod frame_timing;
