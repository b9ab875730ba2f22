use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::parse_hex_or;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Surface and presentation settings.
pub struct DisplayOptions {
    /// Background clear color (`#RRGGBB`).
    #[schemars(skip)]
    pub clear_color: String,
    /// Frame cap (0 = unlimited, vsync still applies).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
    /// Offer VR entry when the browser exposes WebXR.
    #[schemars(title = "VR Button")]
    pub xr_button: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: "#FAFAFA".into(),
            target_fps: 0,
            xr_button: true,
        }
    }
}

impl DisplayOptions {
    /// Clear color as RGB in `[0, 1]`.
    #[must_use]
    pub fn clear_rgb(&self) -> [f32; 3] {
        parse_hex_or(&self.clear_color, [0.98, 0.98, 0.98])
    }
}
