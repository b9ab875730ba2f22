//! Centralized runtime options with TOML preset support.
//!
//! Camera placement, look sensitivity, lighting and display settings are
//! consolidated here. Options serialize to/from TOML so a viewer can be
//! started from a preset file.

mod camera;
mod display;
mod lighting;
mod look;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use lighting::LightingOptions;
pub use look::LookOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LookError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[look]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and placement.
    pub camera: CameraOptions,
    /// Pointer-drag look parameters.
    pub look: LookOptions,
    /// Light colors, intensities and direction.
    pub lighting: LightingOptions,
    /// Clear color, frame cap and VR entry.
    pub display: DisplayOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LookError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, LookError> {
        toml::from_str(content)
            .map_err(|e| LookError::OptionsParse(e.to_string()))
    }

    /// Parse `content` if present, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LookError::OptionsParse`] on malformed TOML.
    pub fn from_toml_or_default(
        content: Option<&str>,
    ) -> Result<Self, LookError> {
        content.map_or_else(|| Ok(Self::default()), Self::from_toml)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LookError::Io`] if the file cannot be read and
    /// [`LookError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, LookError> {
        let content = std::fs::read_to_string(path).map_err(LookError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`LookError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), LookError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LookError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LookError::Io)?;
        }
        std::fs::write(path, content).map_err(LookError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_match_demo_scene() {
        let opts = Options::default();
        assert_eq!(opts.look.sensitivity, 0.002);
        assert!(!opts.look.invert);
        assert_eq!(opts.look.pitch_limit, FRAC_PI_2);
        assert_eq!(opts.camera.fovy, 80.0);
        assert_eq!(opts.display.clear_color, "#FAFAFA");
        assert_eq!(opts.lighting.directional_intensity, 0.6);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[look]
sensitivity = 0.004
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.look.sensitivity, 0.004);
        // Everything else should be default
        assert!(!opts.look.invert);
        assert_eq!(opts.camera.position, [0.0, 1.6, 0.0]);
        assert_eq!(opts.lighting.ambient_intensity, 1.0);
    }

    #[test]
    fn presets_with_retired_keys_still_load() {
        let toml_str = r"
[lighting]
cast_shadows = true
directional_intensity = 0.8
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.lighting.directional_intensity, 0.8);
    }

    #[test]
    fn absent_text_gives_defaults() {
        assert_eq!(
            Options::from_toml_or_default(None).unwrap(),
            Options::default()
        );
        let opts =
            Options::from_toml_or_default(Some("[display]\nxr_button = false"))
                .unwrap();
        assert!(!opts.display.xr_button);
        assert!(Options::from_toml_or_default(Some("[look")).is_err());
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[look\nsensitivity = ").unwrap_err();
        assert!(matches!(err, LookError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("lookaround-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.look.invert = true;
        opts.save(&dir.join("inverted.toml")).unwrap();
        opts.save(&dir.join("another.toml")).unwrap();

        let loaded = Options::load(&dir.join("inverted.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(
            Options::list_presets(&dir),
            vec!["another".to_owned(), "inverted".to_owned()]
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Options::load(Path::new("/nonexistent/preset.toml"))
            .unwrap_err();
        assert!(matches!(err, LookError::Io(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("look"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("display"));

        // Exposed fields present, skipped ones absent
        let look = &props["look"]["properties"];
        assert!(look.get("sensitivity").is_some());
        assert!(look.get("invert").is_some());
        assert!(look.get("pitch_limit").is_none());

        let lighting = &props["lighting"]["properties"];
        assert!(lighting.get("ambient_intensity").is_some());
        assert!(lighting.get("ambient_color").is_none());
    }
}
