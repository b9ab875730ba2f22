//! GPU resource management.
//!
//! Owns wgpu device/surface initialization and the helpers shared by the
//! scene pipeline.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment that follows the surface size.
pub mod texture;
