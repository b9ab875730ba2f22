//! Browser entry point.
//!
//! Renders into an existing `<canvas>` through WebGL2, feeds canvas mouse
//! events to the look controller through a [`PointerBinding`], and drives
//! frames with `requestAnimationFrame`. [`start`] hands back a
//! [`WebHandle`]; stopping or freeing it ends the loop and detaches the
//! listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::engine::SceneRenderEngine;
use crate::error::LookError;
use crate::input::{
    PointerBinding, PointerEvent, PointerHandler, PointerKind, PointerSurface,
};
use crate::options::Options;

impl PointerSurface for HtmlCanvasElement {
    type Listener = Closure<dyn FnMut(MouseEvent)>;

    fn add_listener(
        &self,
        kind: PointerKind,
        mut handler: PointerHandler,
    ) -> Result<Self::Listener, LookError> {
        let listener =
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                handler(pointer_event(kind, &event));
            });
        self.add_event_listener_with_callback(
            kind.dom_event(),
            listener.as_ref().unchecked_ref(),
        )
        .map_err(|e| {
            LookError::Surface(format!("{}: {e:?}", kind.dom_event()))
        })?;
        Ok(listener)
    }

    fn remove_listener(&self, kind: PointerKind, listener: &Self::Listener) {
        if let Err(e) = self.remove_event_listener_with_callback(
            kind.dom_event(),
            listener.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to remove {} listener: {e:?}", kind.dom_event());
        }
    }
}

/// Screen coordinates, so drags keep working when the pointer leaves the
/// canvas mid-gesture.
fn pointer_event(kind: PointerKind, event: &MouseEvent) -> PointerEvent {
    let (x, y) = (event.screen_x() as f32, event.screen_y() as f32);
    match kind {
        PointerKind::Down => PointerEvent::Down { x, y },
        PointerKind::Move => PointerEvent::Move { x, y },
        PointerKind::Up => PointerEvent::Up,
    }
}

/// Whether the browser exposes `navigator.xr`.
#[wasm_bindgen]
#[must_use]
pub fn xr_available() -> bool {
    web_sys::window().is_some_and(|window| {
        js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("xr"))
            .unwrap_or(false)
    })
}

/// Everything one running page owns. Dropping it detaches the listeners.
struct WebApp {
    engine: SceneRenderEngine,
    canvas: HtmlCanvasElement,
    _binding: PointerBinding<HtmlCanvasElement>,
}

impl WebApp {
    fn tick(&mut self) {
        let size = canvas_size(&self.canvas);
        if size != self.engine.context.size() {
            self.canvas.set_width(size.0);
            self.canvas.set_height(size.1);
            self.engine.resize(size.0, size.1);
        }
        match self.engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.engine.resize(size.0, size.1);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }
}

/// Displayed canvas size in physical pixels.
fn canvas_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    let width = (f64::from(canvas.client_width()) * dpr) as u32;
    let height = (f64::from(canvas.client_height()) * dpr) as u32;
    (width.max(1), height.max(1))
}

/// Schedule `callback` for the next frame, returning the request id.
fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Option<i32> {
    let window = web_sys::window()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| log::error!("requestAnimationFrame failed: {e:?}"))
        .ok()
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running canvas viewer.
///
/// [`stop`](Self::stop), or freeing the handle from JS, cancels the pending
/// frame, drops the engine and removes the canvas listeners. Stop the old
/// handle before calling [`start`] again on the same canvas.
#[wasm_bindgen]
pub struct WebHandle {
    app: Rc<RefCell<Option<WebApp>>>,
    frame: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

#[wasm_bindgen]
impl WebHandle {
    /// Stop rendering and detach from the canvas. Calling it again does
    /// nothing.
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {e:?}");
                }
            }
        }
        // Releases the callback's clone of `frame`, breaking the cycle.
        let callback = self.frame.borrow_mut().take();
        drop(callback);
        let app = self.app.borrow_mut().take();
        if app.is_some() {
            drop(app);
            log::info!("viewer stopped");
        }
    }

    /// Whether the frame loop is still running.
    #[wasm_bindgen(js_name = isRunning)]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.app.borrow().is_some()
    }
}

impl Drop for WebHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn find_canvas(canvas_id: &str) -> Result<HtmlCanvasElement, LookError> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(canvas_id))
        .ok_or_else(|| LookError::Surface(format!("no element #{canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| {
            LookError::Surface(format!("#{canvas_id} is not a canvas"))
        })
}

/// Start rendering into the canvas with id `canvas_id`.
///
/// `options_toml` is an optional TOML preset in the same format the desktop
/// viewer loads; missing fields use defaults.
///
/// # Errors
///
/// Rejects if the canvas is missing, the options do not parse, GPU
/// initialization fails, or the pointer listeners cannot be attached.
#[wasm_bindgen]
#[allow(clippy::needless_pass_by_value)]
pub async fn start(
    canvas_id: String,
    options_toml: Option<String>,
) -> Result<WebHandle, JsValue> {
    console_error_panic_hook::set_once();
    // A second start() on the same page finds the logger already set.
    let _ = console_log::init_with_level(log::Level::Info);

    let to_js = |e: LookError| JsValue::from_str(&e.to_string());

    let options =
        Options::from_toml_or_default(options_toml.as_deref()).map_err(to_js)?;
    let canvas = find_canvas(&canvas_id).map_err(to_js)?;
    let size = canvas_size(&canvas);
    canvas.set_width(size.0);
    canvas.set_height(size.1);

    let engine = SceneRenderEngine::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        size,
        options,
    )
    .await
    .map_err(to_js)?;

    let binding =
        PointerBinding::attach(canvas.clone(), Rc::clone(engine.look()))
            .map_err(to_js)?;

    if engine.options().display.xr_button {
        if xr_available() {
            log::info!("WebXR available");
        } else {
            log::info!("WebXR not available");
        }
    }

    let app = Rc::new(RefCell::new(Some(WebApp {
        engine,
        canvas,
        _binding: binding,
    })));
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));

    let (running, next, scheduled) =
        (Rc::clone(&app), Rc::clone(&frame), Rc::clone(&pending));
    *frame.borrow_mut() = Some(Closure::new(move || {
        scheduled.set(None);
        if let Some(app) = running.borrow_mut().as_mut() {
            app.tick();
        } else {
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            scheduled.set(request_animation_frame(callback));
        }
    }));
    if let Some(callback) = frame.borrow().as_ref() {
        pending.set(request_animation_frame(callback));
    }

    Ok(WebHandle {
        app,
        frame,
        pending,
    })
}
