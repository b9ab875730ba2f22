//! Pointer input for SceneRenderEngine

use std::cell::RefCell;
use std::rc::Rc;

use super::SceneRenderEngine;
use crate::camera::LookController;
use crate::input::PointerEvent;

impl SceneRenderEngine {
    /// Process a platform-agnostic pointer event.
    ///
    /// Hosts that own their event stream (the winit viewer) call this
    /// directly; browser canvases route events through a
    /// [`PointerBinding`](crate::input::PointerBinding) on
    /// [`look`](Self::look) instead.
    pub fn handle_input(&mut self, event: PointerEvent) {
        match self.look.try_borrow_mut() {
            Ok(mut look) => look.handle_event(event),
            Err(_) => log::warn!("look controller busy, dropped {event:?}"),
        }
    }

    /// Shared handle to the look controller.
    #[must_use]
    pub fn look(&self) -> &Rc<RefCell<LookController>> {
        &self.look
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.look.try_borrow().is_ok_and(|look| look.is_dragging())
    }
}
