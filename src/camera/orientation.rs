use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

/// Default pitch clamp: straight up / straight down.
pub const DEFAULT_PITCH_LIMIT: f32 = FRAC_PI_2;

/// Yaw/pitch accumulators driven by pointer drags.
///
/// Pitch always stays within `[-pitch_limit, pitch_limit]`; yaw is unbounded
/// and wraps naturally once applied as a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    yaw: f32,
    pitch: f32,
    pitch_limit: f32,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new(DEFAULT_PITCH_LIMIT)
    }
}

impl Orientation {
    /// Zero orientation with the given pitch limit.
    ///
    /// The limit is clamped into `[0, π/2]`; a non-finite limit falls back
    /// to π/2.
    #[must_use]
    pub fn new(pitch_limit: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            pitch_limit: sanitize_limit(pitch_limit),
        }
    }

    /// Rotation about the vertical axis, radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Rotation about the horizontal axis, radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current pitch clamp.
    #[must_use]
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    /// Replace the pitch limit and re-clamp the current pitch into it.
    pub fn set_pitch_limit(&mut self, limit: f32) {
        self.pitch_limit = sanitize_limit(limit);
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Accumulate an angular change (`x` → yaw, `y` → pitch), then clamp
    /// pitch. Non-finite changes are ignored.
    pub fn rotate(&mut self, angles: Vec2) {
        if !angles.is_finite() {
            return;
        }
        self.yaw += angles.x;
        self.pitch = (self.pitch + angles.y)
            .clamp(-self.pitch_limit, self.pitch_limit);
    }
}

fn sanitize_limit(limit: f32) -> f32 {
    if limit.is_finite() {
        limit.clamp(0.0, FRAC_PI_2)
    } else {
        FRAC_PI_2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_clamps_at_limit() {
        let mut o = Orientation::default();
        o.rotate(Vec2::new(0.0, 20.0));
        assert_eq!(o.pitch(), FRAC_PI_2);
        o.rotate(Vec2::new(0.0, -40.0));
        assert_eq!(o.pitch(), -FRAC_PI_2);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut o = Orientation::default();
        o.rotate(Vec2::new(10.0, 0.0));
        o.rotate(Vec2::new(10.0, 0.0));
        assert!((o.yaw() - 20.0).abs() < 1e-5);
    }

    #[test]
    fn shrinking_limit_reclamps_pitch() {
        let mut o = Orientation::default();
        o.rotate(Vec2::new(0.0, 1.2));
        o.set_pitch_limit(0.5);
        assert_eq!(o.pitch(), 0.5);
    }

    #[test]
    fn non_finite_rotation_is_ignored() {
        let mut o = Orientation::default();
        o.rotate(Vec2::new(0.5, 0.25));
        o.rotate(Vec2::new(f32::NEG_INFINITY, 0.0));
        o.rotate(Vec2::new(0.0, f32::NAN));
        assert_eq!(o.yaw(), 0.5);
        assert_eq!(o.pitch(), 0.25);
    }

    #[test]
    fn limit_is_sanitized() {
        assert_eq!(Orientation::new(10.0).pitch_limit(), FRAC_PI_2);
        assert_eq!(Orientation::new(-1.0).pitch_limit(), 0.0);
        assert_eq!(Orientation::new(f32::NAN).pitch_limit(), FRAC_PI_2);
    }
}
