// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Pointer-drag "look around" camera for a small wgpu scene.
//!
//! Dragging with the primary button turns the camera: horizontal motion
//! yaws it about the world vertical, vertical motion pitches it, clamped so
//! the view never flips over the poles. The same controller runs in a
//! desktop window (winit) and in a browser canvas (WebGL2).
//!
//! # Key entry points
//!
//! - [`LookController`] - the drag-to-look state machine
//! - [`PointerBinding`] - scoped listener registration on a render surface
//! - [`SceneRenderEngine`] - camera, scene and renderer tied together per
//!   frame
//! - [`Options`] - runtime configuration (camera, look, lighting, display)
//! - `Viewer` (feature `viewer`) - a standalone desktop window
//! - `web::start` (feature `web`) - browser entry point
//!
//! # Frame model
//!
//! Pointer events mutate the controller as they arrive. Once per frame the
//! engine calls [`LookController::apply_to`] to copy yaw and pitch onto the
//! camera, uploads the camera uniform, and draws.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use camera::{Camera, LookController, LookSettings};
pub use engine::SceneRenderEngine;
pub use error::LookError;
pub use input::{PointerBinding, PointerEvent, PointerSurface};
pub use options::Options;
pub use scene::Scene;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
