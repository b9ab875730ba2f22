/// Platform-agnostic pointer events.
///
/// Coordinates are screen-space pixels. Only differences between successive
/// positions matter, so any consistent origin works.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at a position.
    Down {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels (grows downward).
        y: f32,
    },
    /// Pointer moved to a position.
    Move {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels (grows downward).
        y: f32,
    },
    /// Primary button released.
    Up,
}

impl PointerEvent {
    /// Which listener slot this event belongs to.
    #[must_use]
    pub fn kind(&self) -> PointerKind {
        match self {
            Self::Down { .. } => PointerKind::Down,
            Self::Move { .. } => PointerKind::Move,
            Self::Up => PointerKind::Up,
        }
    }
}

/// The three pointer event streams a render surface exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button press.
    Down,
    /// Pointer motion.
    Move,
    /// Button release.
    Up,
}

impl PointerKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 3] = [Self::Down, Self::Move, Self::Up];

    /// DOM event name for this kind.
    #[must_use]
    pub fn dom_event(self) -> &'static str {
        match self {
            Self::Down => "mousedown",
            Self::Move => "mousemove",
            Self::Up => "mouseup",
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::ElementState> for PointerKind {
    fn from(state: winit::event::ElementState) -> Self {
        match state {
            winit::event::ElementState::Pressed => Self::Down,
            winit::event::ElementState::Released => Self::Up,
        }
    }
}
