use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Antialias override, either a bare level or the labelled form
/// (`"2 (2x oversample)"`) emitted by older front ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum AntialiasSetting {
    /// Oversampling level.
    Level(i32),
    /// Label whose leading integer is the level.
    Label(String),
}

/// Ray-tracing and lighting overrides.
///
/// Every field is optional. Outside the `custom` preset these are ignored
/// entirely and the preset baseline wins; under `custom` each present field
/// replaces its documented default.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Ray trace the final image (`false` renders with OpenGL).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Ray Trace")]
    pub ray_trace: Option<bool>,
    /// Antialiasing level, 0 (none) to 4.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Antialias")]
    pub antialias: Option<AntialiasSetting>,
    /// Cast shadows while ray tracing.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Shadows")]
    pub ray_shadows: Option<bool>,
    /// `normal`, `outlined`, `bw_outlined` or `quantized`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Ray Trace Mode")]
    pub ray_trace_mode: Option<String>,
    /// Outline darkness for the outlined trace modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Outline Gain", range(min = 0.0, max = 1.0), extend("step" = 0.02))]
    pub ray_trace_gain: Option<f32>,
    /// Outline color for the outlined trace modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Outline Color")]
    pub ray_trace_color: Option<String>,
    /// Outline width multiplier for the outlined trace modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Outline Width", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub outline_width: Option<f32>,
    /// Surface tessellation quality.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Surface Quality", range(min = 0, max = 4))]
    pub surface_quality: Option<i32>,
    /// Enable ambient occlusion.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Ambient Occlusion")]
    pub ambient_occlusion: Option<bool>,
    /// Ambient occlusion scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "AO Scale", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub ambient_occlusion_scale: Option<f32>,
    /// Fade distant atoms into the background.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Depth Cue")]
    pub depth_cue: Option<bool>,
    /// Ambient light intensity.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub ambient: Option<f32>,
    /// Direct (camera) light intensity.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Direct", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub direct: Option<f32>,
    /// Reflected light intensity.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Reflect", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub reflect: Option<f32>,
    /// Number of specular highlights.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Specular Count", range(min = 0, max = 8))]
    pub spec_count: Option<i32>,
    /// Specular reflection intensity.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Specular Reflect", range(min = 0.0, max = 2.0), extend("step" = 0.1))]
    pub spec_reflect: Option<f32>,
    /// Direct specular intensity.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Specular Direct", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub spec_direct: Option<f32>,
    /// Specular exponent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Shininess", range(min = 0, max = 128), extend("step" = 2))]
    pub shininess: Option<i32>,
    /// Number of light sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Lights", range(min = 1, max = 10))]
    pub light_count: Option<i32>,
    /// Light back faces too.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Two-Sided Lighting")]
    pub two_sided_lighting: Option<bool>,
    /// Fog density.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Fog", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub fog: Option<f32>,
}

impl LightingOptions {
    /// Names of the fields that carry an override, in declaration order.
    #[must_use]
    pub fn present_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("ray_trace", self.ray_trace.is_some()),
            ("antialias", self.antialias.is_some()),
            ("ray_shadows", self.ray_shadows.is_some()),
            ("ray_trace_mode", self.ray_trace_mode.is_some()),
            ("ray_trace_gain", self.ray_trace_gain.is_some()),
            ("ray_trace_color", self.ray_trace_color.is_some()),
            ("outline_width", self.outline_width.is_some()),
            ("surface_quality", self.surface_quality.is_some()),
            ("ambient_occlusion", self.ambient_occlusion.is_some()),
            (
                "ambient_occlusion_scale",
                self.ambient_occlusion_scale.is_some(),
            ),
            ("depth_cue", self.depth_cue.is_some()),
            ("ambient", self.ambient.is_some()),
            ("direct", self.direct.is_some()),
            ("reflect", self.reflect.is_some()),
            ("spec_count", self.spec_count.is_some()),
            ("spec_reflect", self.spec_reflect.is_some()),
            ("spec_direct", self.spec_direct.is_some()),
            ("shininess", self.shininess.is_some()),
            ("light_count", self.light_count.is_some()),
            ("two_sided_lighting", self.two_sided_lighting.is_some()),
            ("fog", self.fog.is_some()),
        ];
        flags
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect()
    }
}
