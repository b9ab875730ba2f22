use std::f32::consts::FRAC_PI_2;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Look", inline)]
#[serde(default)]
/// Pointer-drag look parameters.
pub struct LookOptions {
    /// Radians of rotation per pixel of pointer travel.
    #[schemars(title = "Sensitivity", range(min = 0.0005, max = 0.01), extend("step" = 0.0005))]
    pub sensitivity: f32,
    /// Reverse the drag direction (drag right turns right).
    #[schemars(title = "Invert Drag")]
    pub invert: bool,
    /// Maximum absolute pitch in radians (at most π/2).
    #[schemars(skip)]
    pub pitch_limit: f32,
}

impl Default for LookOptions {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            invert: false,
            pitch_limit: FRAC_PI_2,
        }
    }
}
