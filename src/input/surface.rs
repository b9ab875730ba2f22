//! Scoped registration of pointer listeners on a render surface.
//!
//! A [`PointerBinding`] registers one listener per [`PointerKind`] when it is
//! created and removes every one of them when it is dropped, whichever way
//! the owner goes away. A failed registration removes the listeners that
//! were already added before the error is returned.

use std::cell::RefCell;
use std::rc::Rc;

use super::event::{PointerEvent, PointerKind};
use crate::camera::LookController;
use crate::error::LookError;

/// Callback a surface invokes with each translated pointer event.
pub type PointerHandler = Box<dyn FnMut(PointerEvent)>;

/// A render surface that delivers pointer events to registered listeners.
pub trait PointerSurface {
    /// Token identifying a registered listener (a JS closure, an index...).
    type Listener;

    /// Register `handler` for events of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`LookError::Surface`] if the surface refuses the listener.
    fn add_listener(
        &self,
        kind: PointerKind,
        handler: PointerHandler,
    ) -> Result<Self::Listener, LookError>;

    /// Deregister a listener previously returned by
    /// [`add_listener`](Self::add_listener).
    fn remove_listener(&self, kind: PointerKind, listener: &Self::Listener);
}

impl<S: PointerSurface + ?Sized> PointerSurface for &S {
    type Listener = S::Listener;

    fn add_listener(
        &self,
        kind: PointerKind,
        handler: PointerHandler,
    ) -> Result<Self::Listener, LookError> {
        (**self).add_listener(kind, handler)
    }

    fn remove_listener(&self, kind: PointerKind, listener: &Self::Listener) {
        (**self).remove_listener(kind, listener);
    }
}

/// Pointer listeners attached to a surface for the lifetime of this value.
pub struct PointerBinding<S: PointerSurface> {
    surface: S,
    controller: Rc<RefCell<LookController>>,
    listeners: Vec<(PointerKind, S::Listener)>,
}

impl<S: PointerSurface> PointerBinding<S> {
    /// Register down/move/up listeners on `surface` that forward to
    /// `controller`.
    ///
    /// # Errors
    ///
    /// Propagates the first registration failure. Listeners registered
    /// before the failure are removed again.
    pub fn attach(
        surface: S,
        controller: Rc<RefCell<LookController>>,
    ) -> Result<Self, LookError> {
        let mut binding = Self {
            surface,
            controller,
            listeners: Vec::with_capacity(PointerKind::ALL.len()),
        };
        for kind in PointerKind::ALL {
            let target = Rc::clone(&binding.controller);
            let handler: PointerHandler = Box::new(move |event| {
                // A re-entrant dispatch while the controller is borrowed
                // for a frame tick is dropped rather than panicking.
                if let Ok(mut look) = target.try_borrow_mut() {
                    look.handle_event(event);
                }
            });
            let listener = binding.surface.add_listener(kind, handler)?;
            binding.listeners.push((kind, listener));
        }
        log::debug!("pointer listeners attached");
        Ok(binding)
    }

    /// The controller the listeners feed.
    #[must_use]
    pub fn controller(&self) -> &Rc<RefCell<LookController>> {
        &self.controller
    }

    /// The surface the listeners are registered on.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of listeners currently registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<S: PointerSurface> Drop for PointerBinding<S> {
    fn drop(&mut self) {
        for (kind, listener) in self.listeners.drain(..) {
            self.surface.remove_listener(kind, &listener);
        }
        if let Ok(mut look) = self.controller.try_borrow_mut() {
            look.release();
        }
        log::debug!("pointer listeners detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory surface that records registrations and can replay events.
    #[derive(Default)]
    struct MockSurface {
        slots: RefCell<Vec<Option<(PointerKind, PointerHandler)>>>,
        removed: RefCell<Vec<PointerKind>>,
        refuse: Option<PointerKind>,
    }

    impl MockSurface {
        fn refusing(kind: PointerKind) -> Self {
            Self {
                refuse: Some(kind),
                ..Self::default()
            }
        }

        fn live(&self) -> usize {
            self.slots.borrow().iter().flatten().count()
        }

        fn dispatch(&self, event: PointerEvent) {
            let kind = event.kind();
            for (slot_kind, handler) in
                self.slots.borrow_mut().iter_mut().flatten()
            {
                if *slot_kind == kind {
                    handler(event);
                }
            }
        }
    }

    impl PointerSurface for MockSurface {
        type Listener = usize;

        fn add_listener(
            &self,
            kind: PointerKind,
            handler: PointerHandler,
        ) -> Result<usize, LookError> {
            if self.refuse == Some(kind) {
                return Err(LookError::Surface(format!("refused {kind:?}")));
            }
            let mut slots = self.slots.borrow_mut();
            slots.push(Some((kind, handler)));
            Ok(slots.len() - 1)
        }

        fn remove_listener(&self, kind: PointerKind, listener: &usize) {
            if let Some(slot) = self.slots.borrow_mut().get_mut(*listener) {
                *slot = None;
            }
            self.removed.borrow_mut().push(kind);
        }
    }

    fn shared() -> Rc<RefCell<LookController>> {
        Rc::new(RefCell::new(LookController::default()))
    }

    #[test]
    fn attach_registers_all_three_and_drop_removes_them() {
        let surface = MockSurface::default();
        let binding = PointerBinding::attach(&surface, shared()).unwrap();
        assert_eq!(binding.listener_count(), 3);
        assert_eq!(surface.live(), 3);

        drop(binding);
        assert_eq!(surface.live(), 0);
        assert_eq!(*surface.removed.borrow(), PointerKind::ALL.to_vec());
    }

    #[test]
    fn clearing_a_shared_slot_detaches_listeners() {
        let surface = MockSurface::default();
        let slot = Rc::new(RefCell::new(Some(
            PointerBinding::attach(&surface, shared()).unwrap(),
        )));
        // A second owner, like a frame callback, keeps the slot alive.
        let frame_owner = Rc::clone(&slot);
        assert_eq!(surface.live(), 3);

        let taken = slot.borrow_mut().take();
        drop(taken);
        assert_eq!(surface.live(), 0);
        assert!(frame_owner.borrow().is_none());
    }

    #[test]
    fn events_reach_the_controller() {
        let surface = MockSurface::default();
        let look = shared();
        let _binding =
            PointerBinding::attach(&surface, Rc::clone(&look)).unwrap();

        surface.dispatch(PointerEvent::Down { x: 100.0, y: 100.0 });
        surface.dispatch(PointerEvent::Move { x: 150.0, y: 100.0 });
        assert!((look.borrow().yaw() - -0.1).abs() < 1e-5);

        surface.dispatch(PointerEvent::Up);
        surface.dispatch(PointerEvent::Move { x: 900.0, y: 100.0 });
        assert!((look.borrow().yaw() - -0.1).abs() < 1e-5);
    }

    #[test]
    fn failed_registration_releases_earlier_listeners() {
        let surface = MockSurface::refusing(PointerKind::Up);
        let result = PointerBinding::attach(&surface, shared());
        assert!(matches!(result, Err(LookError::Surface(_))));
        assert_eq!(surface.live(), 0);
        assert_eq!(
            *surface.removed.borrow(),
            vec![PointerKind::Down, PointerKind::Move]
        );
    }

    #[test]
    fn dropping_mid_drag_ends_the_drag() {
        let surface = MockSurface::default();
        let look = shared();
        let binding =
            PointerBinding::attach(&surface, Rc::clone(&look)).unwrap();
        surface.dispatch(PointerEvent::Down { x: 0.0, y: 0.0 });
        assert!(look.borrow().is_dragging());

        drop(binding);
        assert!(!look.borrow().is_dragging());
    }

    #[test]
    fn events_while_borrowed_are_dropped() {
        let surface = MockSurface::default();
        let look = shared();
        let _binding =
            PointerBinding::attach(&surface, Rc::clone(&look)).unwrap();
        let guard = look.borrow_mut();
        surface.dispatch(PointerEvent::Down { x: 0.0, y: 0.0 });
        drop(guard);
        assert!(!look.borrow().is_dragging());
    }
}
