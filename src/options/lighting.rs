use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::parse_hex_or;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient plus one directional light.
pub struct LightingOptions {
    /// Ambient light color (`#RRGGBB`).
    #[schemars(skip)]
    pub ambient_color: String,
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    /// Directional light color (`#RRGGBB`).
    #[schemars(skip)]
    pub directional_color: String,
    /// Directional light intensity.
    #[schemars(title = "Sun", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub directional_intensity: f32,
    /// Directional light position; light travels from here to the origin.
    #[schemars(skip)]
    pub directional_position: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: "#BBBBBB".into(),
            ambient_intensity: 1.0,
            directional_color: "#FFFFFF".into(),
            directional_intensity: 0.6,
            directional_position: [-0.5, 1.0, 1.0],
        }
    }
}

impl LightingOptions {
    /// Ambient color as RGB in `[0, 1]`.
    #[must_use]
    pub fn ambient_rgb(&self) -> [f32; 3] {
        parse_hex_or(&self.ambient_color, [0.73, 0.73, 0.73])
    }

    /// Directional color as RGB in `[0, 1]`.
    #[must_use]
    pub fn directional_rgb(&self) -> [f32; 3] {
        parse_hex_or(&self.directional_color, [1.0, 1.0, 1.0])
    }
}
