//! Standalone desktop window backed by winit.
//!
//! ```no_run
//! # use lookaround::Viewer;
//! Viewer::builder()
//!     .with_title("Look around")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    engine::SceneRenderEngine,
    error::LookError,
    input::{PointerEvent, PointerKind},
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "lookaround",
    /// default options).
    fn new() -> Self {
        Self {
            options: None,
            title: "lookaround".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the demo scene with drag-to-look.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`LookError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), LookError> {
        let event_loop =
            EventLoop::new().map_err(|e| LookError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            cursor: None,
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| LookError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneRenderEngine>,
    /// Last cursor position in logical pixels; button events carry none.
    cursor: Option<(f32, f32)>,
    options: Option<Options>,
    title: String,
}

/// Compute the wgpu surface size, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Cursor position in logical pixels, so drag speed does not depend on
/// the display's scale factor.
fn logical_cursor(
    position: winit::dpi::PhysicalPosition<f64>,
    scale_factor: f64,
) -> (f32, f32) {
    let logical = position.to_logical::<f32>(scale_factor);
    (logical.x, logical.y)
}

/// Translate a left-button transition into a pointer event at the last
/// known cursor position. A press before the cursor was ever seen is
/// dropped.
fn button_event(
    state: ElementState,
    cursor: Option<(f32, f32)>,
) -> Option<PointerEvent> {
    match PointerKind::from(state) {
        PointerKind::Down => {
            cursor.map(|(x, y)| PointerEvent::Down { x, y })
        }
        PointerKind::Move => None,
        PointerKind::Up => Some(PointerEvent::Up),
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let engine = match pollster::block_on(SceneRenderEngine::new(
            Arc::clone(&window),
            viewport_size(window.inner_size()),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                engine.resize(vp_w, vp_h);
            }

            WindowEvent::RedrawRequested => {
                match engine.render() {
                    Ok(()) => {}
                    Err(
                        wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
                    ) => {
                        let (vp_w, vp_h) = viewport_size(window.inner_size());
                        engine.resize(vp_w, vp_h);
                    }
                    Err(e) => {
                        log::error!("render error: {e:?}");
                    }
                }
                window.request_redraw();
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                if let Some(pointer) = button_event(state, self.cursor) {
                    engine.handle_input(pointer);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = logical_cursor(position, window.scale_factor());
                self.cursor = Some((x, y));
                engine.handle_input(PointerEvent::Move { x, y });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_uses_last_cursor() {
        assert_eq!(
            button_event(ElementState::Pressed, Some((3.0, 4.0))),
            Some(PointerEvent::Down { x: 3.0, y: 4.0 })
        );
    }

    #[test]
    fn press_without_cursor_is_dropped() {
        assert_eq!(button_event(ElementState::Pressed, None), None);
    }

    #[test]
    fn release_always_ends_drag() {
        assert_eq!(
            button_event(ElementState::Released, None),
            Some(PointerEvent::Up)
        );
    }

    #[test]
    fn cursor_is_scaled_to_logical_pixels() {
        let position = winit::dpi::PhysicalPosition::new(200.0, 50.0);
        assert_eq!(logical_cursor(position, 2.0), (100.0, 25.0));
        assert_eq!(logical_cursor(position, 1.0), (200.0, 50.0));
    }

    #[test]
    fn builder_defaults() {
        let viewer = Viewer::builder().build();
        assert_eq!(viewer.title, "lookaround");
        assert_eq!(viewer.options, Options::default());
    }
}
