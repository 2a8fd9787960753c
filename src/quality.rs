//! Quality presets: named ray-tracing/lighting baselines.
//!
//! A preset is authoritative. Outside `custom` mode every lighting override
//! in the request is ignored and the preset baseline wins field by field;
//! under `custom` each present override replaces its documented default.
//! Either way the result is a fully populated [`QualitySettings`].

use crate::diagnostics::Diagnostics;
use crate::keyword::keyword_enum;
use crate::options::{AntialiasSetting, LightingOptions};

keyword_enum! {
    /// Named quality preset.
    pub enum QualityPreset {
        /// Fast preview: no ray tracing, no antialiasing.
        Draft => "draft",
        /// Balanced default.
        Standard => "standard",
        /// Higher antialiasing and surface quality.
        High => "high",
        /// Maximum quality for figures.
        Publication => "publication",
        /// `publication` with outlined ray tracing.
        PublicationOutlined => "publication_outlined",
        /// No baseline: every value comes from the request or its default.
        Custom => "custom",
    }
}

keyword_enum! {
    /// Ray tracer shading style.
    pub enum RayTraceMode {
        /// Plain shaded rendering.
        Normal => "normal",
        /// Shaded rendering with black outlines.
        Outlined => "outlined",
        /// Black-and-white line art.
        BwOutlined => "bw_outlined",
        /// Flat quantized colors with outlines.
        Quantized => "quantized",
    }
}

impl RayTraceMode {
    /// Numeric mode understood by the renderer.
    #[must_use]
    pub const fn level(self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Outlined => 1,
            Self::BwOutlined => 2,
            Self::Quantized => 3,
        }
    }

    /// Whether this mode draws outlines.
    #[must_use]
    pub const fn is_outlined(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl QualityPreset {
    /// Look up a preset tag, falling back to [`QualityPreset::Standard`]
    /// with a warning.
    pub fn from_tag(tag: &str, diagnostics: &mut Diagnostics) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            diagnostics.warn(
                "preset",
                tag,
                "unknown quality preset, using standard",
            );
            Self::Standard
        })
    }

    /// Fixed baseline for this preset; `None` for [`QualityPreset::Custom`].
    #[must_use]
    pub fn baseline(self) -> Option<QualitySettings> {
        let defaults = QualitySettings::default();
        let settings = match self {
            Self::Draft => QualitySettings {
                ray_trace: false,
                antialias: 0,
                ray_shadows: false,
                surface_quality: 0,
                ambient_occlusion: false,
                light_count: 2,
                ..defaults
            },
            Self::Standard => QualitySettings {
                antialias: 1,
                surface_quality: 1,
                light_count: 4,
                ..defaults
            },
            Self::High => QualitySettings {
                antialias: 2,
                surface_quality: 2,
                light_count: 6,
                ..defaults
            },
            Self::Publication => QualitySettings {
                antialias: 4,
                surface_quality: 4,
                light_count: 8,
                ..defaults
            },
            Self::PublicationOutlined => QualitySettings {
                ray_trace_mode: RayTraceMode::Outlined,
                outline_width: 1.0,
                ..Self::Publication.baseline()?
            },
            Self::Custom => return None,
        };
        Some(settings)
    }
}

/// Fully resolved ray-tracing and lighting parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct QualitySettings {
    /// Ray trace the final image.
    pub ray_trace: bool,
    /// Antialiasing level (0..=4).
    pub antialias: i32,
    /// Cast shadows while ray tracing.
    pub ray_shadows: bool,
    /// Ray tracer shading style.
    pub ray_trace_mode: RayTraceMode,
    /// Outline darkness (0..=1).
    pub ray_trace_gain: f32,
    /// Outline color name.
    pub ray_trace_color: String,
    /// Outline width multiplier (0.1..=5).
    pub outline_width: f32,
    /// Surface tessellation quality (0..=4).
    pub surface_quality: i32,
    /// Ambient occlusion on/off.
    pub ambient_occlusion: bool,
    /// Ambient occlusion scale (1..=100).
    pub ambient_occlusion_scale: f32,
    /// Depth cueing on/off.
    pub depth_cue: bool,
    /// Ambient light (0..=1).
    pub ambient: f32,
    /// Direct light (0..=1).
    pub direct: f32,
    /// Reflected light (0..=1).
    pub reflect: f32,
    /// Specular highlight count (0..=8).
    pub spec_count: i32,
    /// Specular reflection (0..=2).
    pub spec_reflect: f32,
    /// Direct specular (0..=1).
    pub spec_direct: f32,
    /// Specular exponent (0..=128).
    pub shininess: i32,
    /// Light sources (1..=10).
    pub light_count: i32,
    /// Two-sided lighting on/off.
    pub two_sided_lighting: bool,
    /// Fog density (0..=1).
    pub fog: f32,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            ray_trace: true,
            antialias: 1,
            ray_shadows: true,
            ray_trace_mode: RayTraceMode::Normal,
            ray_trace_gain: 0.12,
            ray_trace_color: "black".to_owned(),
            outline_width: 1.0,
            surface_quality: 1,
            ambient_occlusion: true,
            ambient_occlusion_scale: 25.0,
            depth_cue: true,
            ambient: 0.6,
            direct: 0.45,
            reflect: 0.45,
            spec_count: 4,
            spec_reflect: 1.0,
            spec_direct: 0.0,
            shininess: 60,
            light_count: 6,
            two_sided_lighting: true,
            fog: 0.5,
        }
    }
}

impl QualitySettings {
    /// Expand `tag` into a complete baseline, applying `overrides` only for
    /// the `custom` preset.
    pub fn resolve(
        tag: &str,
        overrides: &LightingOptions,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let preset = QualityPreset::from_tag(tag, diagnostics);
        if let Some(baseline) = preset.baseline() {
            let ignored = overrides.present_fields();
            if !ignored.is_empty() {
                log::debug!(
                    "preset '{preset}' is authoritative, ignoring \
                     overrides: {}",
                    ignored.join(", ")
                );
            }
            return baseline;
        }
        Self::from_overrides(overrides, diagnostics)
    }

    /// Documented defaults with every present override applied (clamped).
    fn from_overrides(o: &LightingOptions, diag: &mut Diagnostics) -> Self {
        let d = Self::default();
        fn float(
            diag: &mut Diagnostics,
            field: &str,
            value: Option<f32>,
            range: (f32, f32),
            default: f32,
        ) -> f32 {
            value.map_or(default, |v| {
                diag.clamp_float(field, v, range, default)
            })
        }
        fn int(
            diag: &mut Diagnostics,
            field: &str,
            value: Option<i32>,
            (min, max): (i32, i32),
            default: i32,
        ) -> i32 {
            value.map_or(default, |v| diag.clamp_int(field, v, min, max))
        }

        let antialias = o
            .antialias
            .as_ref()
            .map_or(d.antialias, |a| parse_antialias(a, d.antialias, diag));
        let ray_trace_mode = o.ray_trace_mode.as_deref().map_or(
            d.ray_trace_mode,
            |raw| {
                RayTraceMode::parse(raw).unwrap_or_else(|| {
                    diag.warn(
                        "lighting.ray_trace_mode",
                        raw,
                        "unknown ray trace mode, using normal",
                    );
                    RayTraceMode::Normal
                })
            },
        );
        let ray_trace_color = match o.ray_trace_color.as_deref() {
            Some(raw) => {
                diag.color("lighting.ray_trace_color", raw, &d.ray_trace_color)
            }
            None => d.ray_trace_color.clone(),
        };

        Self {
            ray_trace: o.ray_trace.unwrap_or(d.ray_trace),
            antialias,
            ray_shadows: o.ray_shadows.unwrap_or(d.ray_shadows),
            ray_trace_mode,
            ray_trace_gain: float(
                diag,
                "lighting.ray_trace_gain",
                o.ray_trace_gain,
                (0.0, 1.0),
                d.ray_trace_gain,
            ),
            ray_trace_color,
            outline_width: float(
                diag,
                "lighting.outline_width",
                o.outline_width,
                (0.1, 5.0),
                d.outline_width,
            ),
            surface_quality: int(
                diag,
                "lighting.surface_quality",
                o.surface_quality,
                (0, 4),
                d.surface_quality,
            ),
            ambient_occlusion: o
                .ambient_occlusion
                .unwrap_or(d.ambient_occlusion),
            ambient_occlusion_scale: float(
                diag,
                "lighting.ambient_occlusion_scale",
                o.ambient_occlusion_scale,
                (1.0, 100.0),
                d.ambient_occlusion_scale,
            ),
            depth_cue: o.depth_cue.unwrap_or(d.depth_cue),
            ambient: float(
                diag,
                "lighting.ambient",
                o.ambient,
                (0.0, 1.0),
                d.ambient,
            ),
            direct: float(
                diag,
                "lighting.direct",
                o.direct,
                (0.0, 1.0),
                d.direct,
            ),
            reflect: float(
                diag,
                "lighting.reflect",
                o.reflect,
                (0.0, 1.0),
                d.reflect,
            ),
            spec_count: int(
                diag,
                "lighting.spec_count",
                o.spec_count,
                (0, 8),
                d.spec_count,
            ),
            spec_reflect: float(
                diag,
                "lighting.spec_reflect",
                o.spec_reflect,
                (0.0, 2.0),
                d.spec_reflect,
            ),
            spec_direct: float(
                diag,
                "lighting.spec_direct",
                o.spec_direct,
                (0.0, 1.0),
                d.spec_direct,
            ),
            shininess: int(
                diag,
                "lighting.shininess",
                o.shininess,
                (0, 128),
                d.shininess,
            ),
            light_count: int(
                diag,
                "lighting.light_count",
                o.light_count,
                (1, 10),
                d.light_count,
            ),
            two_sided_lighting: o
                .two_sided_lighting
                .unwrap_or(d.two_sided_lighting),
            fog: float(diag, "lighting.fog", o.fog, (0.0, 1.0), d.fog),
        }
    }
}

/// Antialias level from either form; labels use their leading integer.
fn parse_antialias(
    setting: &AntialiasSetting,
    default: i32,
    diag: &mut Diagnostics,
) -> i32 {
    let level = match setting {
        AntialiasSetting::Level(level) => *level,
        AntialiasSetting::Label(label) => {
            match label.split_whitespace().next().map(str::parse::<i32>) {
                Some(Ok(level)) => level,
                _ => {
                    diag.warn(
                        "lighting.antialias",
                        label,
                        format!("not an antialias level, using {default}"),
                    );
                    return default;
                }
            }
        }
    };
    diag.clamp_int("lighting.antialias", level, 0, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loud_overrides() -> LightingOptions {
        LightingOptions {
            ray_trace: Some(false),
            antialias: Some(AntialiasSetting::Level(3)),
            ray_shadows: Some(false),
            ray_trace_mode: Some("quantized".to_owned()),
            ray_trace_gain: Some(0.5),
            ray_trace_color: Some("red".to_owned()),
            outline_width: Some(2.5),
            surface_quality: Some(3),
            ambient_occlusion: Some(false),
            ambient_occlusion_scale: Some(40.0),
            depth_cue: Some(false),
            ambient: Some(0.1),
            direct: Some(0.9),
            reflect: Some(0.2),
            spec_count: Some(7),
            spec_reflect: Some(1.5),
            spec_direct: Some(0.3),
            shininess: Some(100),
            light_count: Some(9),
            two_sided_lighting: Some(false),
            fog: Some(0.9),
        }
    }

    #[test]
    fn presets_ignore_every_override() {
        for tag in QualityPreset::KEYWORDS.iter().filter(|t| **t != "custom") {
            let mut diag = Diagnostics::new();
            let preset = QualityPreset::parse(tag).unwrap();
            let resolved =
                QualitySettings::resolve(tag, &loud_overrides(), &mut diag);
            assert_eq!(Some(resolved), preset.baseline(), "preset {tag}");
            assert!(diag.is_empty());
        }
    }

    #[test]
    fn custom_honors_every_override() {
        let mut diag = Diagnostics::new();
        let resolved =
            QualitySettings::resolve("custom", &loud_overrides(), &mut diag);
        let expected = QualitySettings {
            ray_trace: false,
            antialias: 3,
            ray_shadows: false,
            ray_trace_mode: RayTraceMode::Quantized,
            ray_trace_gain: 0.5,
            ray_trace_color: "red".to_owned(),
            outline_width: 2.5,
            surface_quality: 3,
            ambient_occlusion: false,
            ambient_occlusion_scale: 40.0,
            depth_cue: false,
            ambient: 0.1,
            direct: 0.9,
            reflect: 0.2,
            spec_count: 7,
            spec_reflect: 1.5,
            spec_direct: 0.3,
            shininess: 100,
            light_count: 9,
            two_sided_lighting: false,
            fog: 0.9,
        };
        assert_eq!(resolved, expected);
        assert!(diag.is_empty());
    }

    #[test]
    fn custom_without_overrides_is_documented_defaults() {
        let mut diag = Diagnostics::new();
        let resolved = QualitySettings::resolve(
            "custom",
            &LightingOptions::default(),
            &mut diag,
        );
        assert_eq!(resolved, QualitySettings::default());
    }

    #[test]
    fn custom_clamps_out_of_range_overrides() {
        let overrides = LightingOptions {
            antialias: Some(AntialiasSetting::Level(9)),
            light_count: Some(0),
            fog: Some(-2.0),
            ..LightingOptions::default()
        };
        let mut diag = Diagnostics::new();
        let resolved =
            QualitySettings::resolve("custom", &overrides, &mut diag);
        assert_eq!(resolved.antialias, 4);
        assert_eq!(resolved.light_count, 1);
        assert_eq!(resolved.fog, 0.0);
        assert_eq!(diag.warnings().len(), 3);
    }

    #[test]
    fn outline_color_that_could_break_the_script_degrades() {
        let overrides = LightingOptions {
            ray_trace_color: Some("black\nsystem id".to_owned()),
            ..LightingOptions::default()
        };
        let mut diag = Diagnostics::new();
        let resolved =
            QualitySettings::resolve("custom", &overrides, &mut diag);
        assert_eq!(resolved.ray_trace_color, "black");
        assert_eq!(diag.warnings()[0].field, "lighting.ray_trace_color");
    }

    #[test]
    fn labelled_antialias_uses_leading_level() {
        let overrides = LightingOptions {
            antialias: Some(AntialiasSetting::Label(
                "2 (2x oversample)".to_owned(),
            )),
            ..LightingOptions::default()
        };
        let mut diag = Diagnostics::new();
        let resolved =
            QualitySettings::resolve("custom", &overrides, &mut diag);
        assert_eq!(resolved.antialias, 2);

        let garbage = LightingOptions {
            antialias: Some(AntialiasSetting::Label("lots".to_owned())),
            ..LightingOptions::default()
        };
        let resolved = QualitySettings::resolve("custom", &garbage, &mut diag);
        assert_eq!(resolved.antialias, 1);
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn unknown_preset_falls_back_to_standard() {
        let mut diag = Diagnostics::new();
        let resolved = QualitySettings::resolve(
            "cinematic",
            &LightingOptions::default(),
            &mut diag,
        );
        assert_eq!(Some(resolved), QualityPreset::Standard.baseline());
        assert_eq!(diag.warnings()[0].field, "preset");
        assert_eq!(diag.warnings()[0].value, "cinematic");
    }

    #[test]
    fn draft_disables_ray_tracing() {
        let draft = QualityPreset::Draft.baseline().unwrap();
        assert!(!draft.ray_trace);
        assert_eq!(draft.antialias, 0);
        assert!(!draft.ray_shadows);
    }

    #[test]
    fn publication_outlined_extends_publication() {
        let publication = QualityPreset::Publication.baseline().unwrap();
        let outlined = QualityPreset::PublicationOutlined.baseline().unwrap();
        assert_eq!(outlined.ray_trace_mode, RayTraceMode::Outlined);
        assert!(outlined.outline_width > 0.0);
        assert_eq!(outlined.antialias, publication.antialias);
        assert_eq!(outlined.surface_quality, 4);
        assert!(outlined.ray_shadows);
    }
}
