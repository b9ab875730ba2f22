use glam::Vec2;

/// Tracks whether a drag session is active and where the pointer was last
/// seen.
///
/// A drag session starts on pointer-down and ends on the next pointer-up.
/// The last position is recorded on every move, dragging or not.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    active: bool,
    last_position: Option<Vec2>,
}

impl DragState {
    /// A fresh, inactive drag state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag session is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last recorded pointer position, if any.
    #[must_use]
    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }

    /// Begin a drag session at `pos`.
    pub fn begin(&mut self, pos: Vec2) {
        self.active = true;
        self.last_position = Some(pos);
    }

    /// Record a pointer position and return the delta from the previous one
    /// if a drag is in progress.
    pub fn advance(&mut self, pos: Vec2) -> Option<Vec2> {
        let delta = match (self.active, self.last_position) {
            (true, Some(last)) => Some(pos - last),
            _ => None,
        };
        self.last_position = Some(pos);
        delta
    }

    /// End the drag session and forget the last position.
    pub fn end(&mut self) {
        self.active = false;
        self.last_position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_without_begin_yields_nothing() {
        let mut drag = DragState::new();
        assert_eq!(drag.advance(Vec2::new(10.0, 10.0)), None);
        assert_eq!(drag.last_position(), Some(Vec2::new(10.0, 10.0)));
        assert!(!drag.is_active());
    }

    #[test]
    fn advance_reports_delta_from_previous() {
        let mut drag = DragState::new();
        drag.begin(Vec2::new(100.0, 100.0));
        assert_eq!(
            drag.advance(Vec2::new(150.0, 90.0)),
            Some(Vec2::new(50.0, -10.0))
        );
        assert_eq!(
            drag.advance(Vec2::new(160.0, 90.0)),
            Some(Vec2::new(10.0, 0.0))
        );
    }

    #[test]
    fn end_clears_position() {
        let mut drag = DragState::new();
        drag.begin(Vec2::ZERO);
        drag.end();
        assert_eq!(drag, DragState::default());
    }
}
