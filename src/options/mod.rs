//! Render requests with TOML file support.
//!
//! A [`RenderRequest`] gathers every tweakable setting (geometry, color,
//! camera, lighting, transparency, labels, output) in one serde structure.
//! Enumerated options are kept as raw strings here; the compiler decides
//! which unknown values are fatal and which degrade to a default.

mod camera;
mod colors;
mod geometry;
mod labels;
mod lighting;
mod output;
mod transparency;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use geometry::GeometryOptions;
pub use labels::LabelOptions;
pub use lighting::{AntialiasSetting, LightingOptions};
pub use output::{OutputOptions, MAX_IMAGE_EDGE, MIN_IMAGE_EDGE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use transparency::TransparencyOptions;

use crate::error::RenderError;

/// Complete input to one render. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct RenderRequest {
    /// Identifier used to name the request's scratch directory.
    #[schemars(skip)]
    pub request_id: String,
    /// Structure reference: a path, an `http(s)://` URL or a
    /// `base64file://<name>/<payload>` inline file.
    #[schemars(title = "Structure")]
    pub structure: String,
    /// Quality preset: `draft`, `standard`, `high`, `publication`,
    /// `publication_outlined` or `custom`.
    #[schemars(title = "Quality Preset")]
    pub preset: String,
    /// Atom selection to render (`all`, `chain A`, `resi 1-100`, ...).
    #[schemars(title = "Selection")]
    pub selection: String,
    /// Representation style.
    pub geometry: GeometryOptions,
    /// Coloring scheme.
    pub color: ColorOptions,
    /// Camera orientation.
    pub camera: CameraOptions,
    /// Ray tracing and lighting overrides.
    pub lighting: LightingOptions,
    /// Transparency layers.
    pub transparency: TransparencyOptions,
    /// Text labels.
    pub labels: LabelOptions,
    /// Image size, background and destination.
    pub output: OutputOptions,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            request_id: "render".to_owned(),
            structure: String::new(),
            preset: "standard".to_owned(),
            selection: "all".to_owned(),
            geometry: GeometryOptions::default(),
            color: ColorOptions::default(),
            camera: CameraOptions::default(),
            lighting: LightingOptions::default(),
            transparency: TransparencyOptions::default(),
            labels: LabelOptions::default(),
            output: OutputOptions::default(),
        }
    }
}

impl RenderRequest {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(RenderRequest)
    }

    /// Parse a request from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, RenderError> {
        toml::from_str(content)
            .map_err(|e| RenderError::OptionsParse(e.to_string()))
    }

    /// Load a request from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path).map_err(RenderError::Io)?;
        Self::from_toml(&content)
    }

    /// Save the request to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RenderError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RenderError::Io)?;
        }
        std::fs::write(path, content).map_err(RenderError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let request = RenderRequest::default();
        let toml_str = toml::to_string_pretty(&request).unwrap();
        let parsed = RenderRequest::from_toml(&toml_str).unwrap();
        assert_eq!(request, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
structure = "1ubq.pdb"
preset = "custom"

[lighting]
antialias = "2 (2x oversample)"
shininess = 80

[camera]
camera = "top"
"#;
        let request = RenderRequest::from_toml(toml_str).unwrap();
        assert_eq!(request.structure, "1ubq.pdb");
        assert_eq!(
            request.lighting.antialias,
            Some(AntialiasSetting::Label("2 (2x oversample)".to_owned()))
        );
        assert_eq!(request.lighting.shininess, Some(80));
        assert_eq!(request.lighting.ambient, None);
        assert_eq!(request.camera.camera, "top");
        // Everything else should be default
        assert_eq!(request.camera.zoom_factor, 1.5);
        assert_eq!(request.geometry.render_mode, "cartoon");
        assert_eq!(request.output.width, 1024);
    }

    #[test]
    fn integer_antialias_parses_as_level() {
        let request =
            RenderRequest::from_toml("[lighting]\nantialias = 3\n").unwrap();
        assert_eq!(
            request.lighting.antialias,
            Some(AntialiasSetting::Level(3))
        );
        assert_eq!(request.lighting.present_fields(), vec!["antialias"]);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = RenderRequest::from_toml("[output]\nwidth = \"wide\"\n")
            .unwrap_err();
        assert!(matches!(err, RenderError::OptionsParse(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(RenderRequest::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in [
            "geometry",
            "color",
            "camera",
            "lighting",
            "transparency",
            "labels",
            "output",
        ] {
            assert!(props.contains_key(section), "missing {section}");
        }
        assert!(!props.contains_key("request_id"));

        let width = &props["output"]["properties"]["width"];
        assert_eq!(width["minimum"], 256);
        assert_eq!(width["maximum"], 4096);
        assert!(props["output"]["properties"].get("path").is_none());
    }
}
