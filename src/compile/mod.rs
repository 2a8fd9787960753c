//! Render specification compiler.
//!
//! Turns a [`RenderRequest`] plus its resolved [`QualitySettings`] into an
//! ordered, renderer-agnostic [`DirectiveList`]. Compilation is pure: the same
//! input always yields the same list, and nothing touches the filesystem.
//!
//! Image size, render mode, color mode and the selections are hard
//! requirements and fail with a [`ValidationError`]. Every other field
//! degrades to its documented default and records a [`Warning`].
//!
//! Directive order:
//!
//! 1. representations
//! 2. colors
//! 3. transparency (global, then per shown representation)
//! 4. camera
//! 5. ray-trace mode and lighting parameters
//! 6. labels (optional)
//! 7. background
//! 8. render

mod camera;
mod color;
mod directive;
mod geometry;
mod labels;
mod selection;

use std::fmt;
use std::path::Path;

pub use camera::{CameraPreset, CameraSpec, CameraView, Rotation};
pub use color::{
    is_color_name, parse_per_chain, ChainColor, ColorAssignment, ColorMode,
    ColorScheme, Paint, SpectrumDomain, SpectrumPalette, DEFAULT_SINGLE_COLOR,
};
pub use directive::{
    Directive, DirectiveKind, DirectiveList, LightingParameter, SettingValue,
    TransparencyLayer,
};
pub use geometry::{
    CartoonGeometry, CartoonStyle, Geometry, RenderMode, SphereMode, BALL_SCALE,
};
pub use labels::{LabelContent, LabelSpec, DEFAULT_LABEL_SELECTION};
pub use selection::{is_plain, Selection, ALL};

use crate::diagnostics::{Diagnostics, Warning};
use crate::keyword::keyword_enum;
use crate::options::{
    OutputOptions, RenderRequest, TransparencyOptions, MAX_IMAGE_EDGE,
    MIN_IMAGE_EDGE,
};
use crate::quality::QualitySettings;

// ── Errors ──

/// A required field held a value the compiler cannot degrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Option name, dotted by section.
    pub field: String,
    /// The value as supplied.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl ValidationError {
    fn new(
        field: &str,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field: field.to_owned(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:?}: {}", self.field, self.value, self.reason)
    }
}

impl std::error::Error for ValidationError {}

// ── Background ──

keyword_enum! {
    /// Background plate choice.
    pub enum BackgroundMode {
        /// White plate.
        White => "white",
        /// Black plate.
        Black => "black",
        /// Color named by `bg_custom`.
        Custom => "custom",
    }
}

fn background(opts: &OutputOptions, diag: &mut Diagnostics) -> String {
    let mode = BackgroundMode::parse(&opts.background).unwrap_or_else(|| {
        diag.warn(
            "output.background",
            &opts.background,
            "unknown background, using white",
        );
        BackgroundMode::White
    });
    match mode {
        BackgroundMode::White => "white".to_owned(),
        BackgroundMode::Black => "black".to_owned(),
        BackgroundMode::Custom => {
            diag.color("output.bg_custom", &opts.bg_custom, "white")
        }
    }
}

// ── Resolved configuration ──

/// Every effective parameter of one render, validated and clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfiguration {
    /// Atoms rendered.
    pub selection: Selection,
    /// Shown representations, in order.
    pub geometries: Vec<Geometry>,
    /// Coloring.
    pub color: ColorAssignment,
    /// Whole-selection transparency (0..=1).
    pub global_transparency: f32,
    /// Transparency per shown representation, deduplicated, in order.
    pub layer_transparency: Vec<(TransparencyLayer, f32)>,
    /// Camera placement.
    pub camera: CameraSpec,
    /// Ray tracing and lighting.
    pub quality: QualitySettings,
    /// Labels, when switched on.
    pub labels: Option<LabelSpec>,
    /// Background color name.
    pub background: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl ResolvedConfiguration {
    /// Validate hard fields, then resolve the rest with degradation.
    pub fn resolve(
        request: &RenderRequest,
        quality: QualitySettings,
        diag: &mut Diagnostics,
    ) -> Result<Self, ValidationError> {
        let width = image_edge("output.width", request.output.width)?;
        let height = image_edge("output.height", request.output.height)?;
        let mode = keyword(
            "geometry.render_mode",
            &request.geometry.render_mode,
            RenderMode::parse,
            RenderMode::KEYWORDS,
        )?;
        let color_mode = keyword(
            "color.color_mode",
            &request.color.color_mode,
            ColorMode::parse,
            ColorMode::KEYWORDS,
        )?;

        let selection = Selection::parse("selection", &request.selection, ALL)?;
        let geometries = mode.geometries(&request.geometry, diag);
        let color = ColorAssignment::resolve(color_mode, &request.color, diag);
        let (global_transparency, layer_transparency) =
            transparency(&request.transparency, &geometries, diag);
        let camera = CameraSpec::resolve(&request.camera, diag);
        let labels = LabelSpec::resolve(&request.labels, &selection, diag)?;
        let background = background(&request.output, diag);

        Ok(Self {
            selection,
            geometries,
            color,
            global_transparency,
            layer_transparency,
            camera,
            quality,
            labels,
            background,
            width,
            height,
        })
    }

    /// Lower into the ordered directive list, rendering to `output`.
    #[must_use]
    pub fn into_directives(self, output: &Path) -> DirectiveList {
        let mut list = DirectiveList::default();
        let selection = self.selection;

        list.extend(self.geometries.into_iter().map(|geometry| {
            Directive::SetRepresentation {
                selection: selection.clone(),
                geometry,
            }
        }));
        list.extend(
            self.color
                .paints(&selection)
                .into_iter()
                .map(|(selection, paint)| Directive::SetColor {
                    selection,
                    paint,
                }),
        );
        list.push(Directive::SetTransparency {
            selection: selection.clone(),
            layer: TransparencyLayer::Global,
            value: self.global_transparency,
        });
        list.extend(self.layer_transparency.into_iter().map(|(layer, value)| {
            Directive::SetTransparency {
                selection: selection.clone(),
                layer,
                value,
            }
        }));
        list.push(Directive::SetCamera {
            selection: selection.clone(),
            view: self.camera.view(),
        });
        list.extend(lighting_directives(&self.quality));
        if let Some(labels) = self.labels {
            list.push(Directive::AddLabel {
                selection: labels.selection,
                content: labels.content,
                size: labels.size,
                color: labels.color,
            });
        }
        list.push(Directive::SetBackground {
            color: self.background,
        });
        list.push(Directive::Render {
            width: self.width,
            height: self.height,
            ray_trace: self.quality.ray_trace,
            output: output.to_path_buf(),
        });
        list
    }
}

/// Parse a keyword field that has no fallback.
fn keyword<T>(
    field: &str,
    raw: &str,
    parse: impl FnOnce(&str) -> Option<T>,
    keywords: &[&str],
) -> Result<T, ValidationError> {
    parse(raw).ok_or_else(|| {
        ValidationError::new(
            field,
            raw,
            format!("expected one of {}", keywords.join(", ")),
        )
    })
}

fn image_edge(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|edge| (MIN_IMAGE_EDGE..=MAX_IMAGE_EDGE).contains(edge))
        .ok_or_else(|| {
            ValidationError::new(
                field,
                value,
                format!(
                    "must be within {MIN_IMAGE_EDGE}..={MAX_IMAGE_EDGE} pixels"
                ),
            )
        })
}

fn transparency(
    opts: &TransparencyOptions,
    shown: &[Geometry],
    diag: &mut Diagnostics,
) -> (f32, Vec<(TransparencyLayer, f32)>) {
    let global = diag.clamp_float(
        "transparency.global",
        opts.global,
        (0.0, 1.0),
        0.0,
    );
    let mut layers: Vec<(TransparencyLayer, f32)> = Vec::new();
    for layer in shown.iter().filter_map(Geometry::transparency_layer) {
        if layers.iter().any(|(seen, _)| *seen == layer) {
            continue;
        }
        let (field, raw) = match layer {
            TransparencyLayer::Cartoon => {
                ("transparency.cartoon", opts.cartoon)
            }
            TransparencyLayer::Surface => {
                ("transparency.surface", opts.surface)
            }
            TransparencyLayer::Stick => ("transparency.stick", opts.stick),
            TransparencyLayer::Sphere => ("transparency.sphere", opts.sphere),
            TransparencyLayer::Global => continue,
        };
        layers.push((layer, diag.clamp_float(field, raw, (0.0, 1.0), 0.0)));
    }
    (global, layers)
}

/// Ray-trace switch followed by one directive per lighting parameter.
fn lighting_directives(q: &QualitySettings) -> Vec<Directive> {
    use LightingParameter as P;
    use SettingValue::{Bool, Color, Float, Int};

    let params = [
        (P::Antialias, Int(q.antialias)),
        (P::RayShadows, Bool(q.ray_shadows)),
        (P::RayTraceGain, Float(q.ray_trace_gain)),
        (P::RayTraceColor, Color(q.ray_trace_color.clone())),
        (P::OutlineWidth, Float(q.outline_width)),
        (P::SurfaceQuality, Int(q.surface_quality)),
        (P::AmbientOcclusion, Bool(q.ambient_occlusion)),
        (P::AmbientOcclusionScale, Float(q.ambient_occlusion_scale)),
        (P::DepthCue, Bool(q.depth_cue)),
        (P::Ambient, Float(q.ambient)),
        (P::Direct, Float(q.direct)),
        (P::Reflect, Float(q.reflect)),
        (P::SpecCount, Int(q.spec_count)),
        (P::SpecReflect, Float(q.spec_reflect)),
        (P::SpecDirect, Float(q.spec_direct)),
        (P::Shininess, Int(q.shininess)),
        (P::LightCount, Int(q.light_count)),
        (P::TwoSidedLighting, Bool(q.two_sided_lighting)),
        (P::Fog, Float(q.fog)),
    ];

    let mut directives = Vec::with_capacity(params.len() + 1);
    directives.push(Directive::SetRayTraceMode {
        enabled: q.ray_trace,
        mode: q.ray_trace_mode,
    });
    directives.extend(
        params
            .into_iter()
            .map(|(parameter, value)| Directive::SetLighting {
                parameter,
                value,
            }),
    );
    directives
}

// ── Entry points ──

/// Compiled render: ordered directives plus every degradation recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// Directives in emission order.
    pub directives: DirectiveList,
    /// Non-fatal degradations, in the order they were found.
    pub warnings: Vec<Warning>,
}

/// Compile `request` against an already resolved quality baseline.
pub fn compile(
    request: &RenderRequest,
    quality: &QualitySettings,
    output: &Path,
) -> Result<Compilation, ValidationError> {
    let mut diag = Diagnostics::new();
    let config =
        ResolvedConfiguration::resolve(request, quality.clone(), &mut diag)?;
    Ok(Compilation {
        directives: config.into_directives(output),
        warnings: diag.into_warnings(),
    })
}

/// Resolve the request's preset, then compile. Preset warnings come first.
pub fn compile_request(
    request: &RenderRequest,
    output: &Path,
) -> Result<Compilation, ValidationError> {
    let mut diag = Diagnostics::new();
    let quality = QualitySettings::resolve(
        &request.preset,
        &request.lighting,
        &mut diag,
    );
    let mut compilation = compile(request, &quality, output)?;
    let mut warnings = diag.into_warnings();
    warnings.append(&mut compilation.warnings);
    compilation.warnings = warnings;
    Ok(compilation)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::quality::RayTraceMode;

    fn out() -> PathBuf {
        PathBuf::from("/tmp/out.png")
    }

    fn compiled(request: &RenderRequest) -> Compilation {
        compile_request(request, &out()).unwrap()
    }

    #[test]
    fn compiling_twice_is_identical() {
        let request = RenderRequest {
            selection: "chain A".to_owned(),
            ..RenderRequest::default()
        };
        assert_eq!(compiled(&request), compiled(&request));
    }

    #[test]
    fn list_ends_with_background_then_render() {
        let request = RenderRequest::default();
        let list = compiled(&request).directives;
        assert_eq!(list.count(DirectiveKind::SetBackground), 1);
        assert_eq!(list.count(DirectiveKind::Render), 1);

        let kinds: Vec<_> = list.iter().map(Directive::kind).collect();
        assert_eq!(kinds[kinds.len() - 2], DirectiveKind::SetBackground);
        assert_eq!(kinds[kinds.len() - 1], DirectiveKind::Render);
        assert!(matches!(
            list.as_slice().last(),
            Some(Directive::Render { width: 1024, height: 1024, .. })
        ));
        assert_eq!(list.render_target(), Some(out().as_path()));
    }

    #[test]
    fn global_transparency_precedes_layers() {
        let mut request = RenderRequest::default();
        request.transparency.global = 0.3;
        request.transparency.cartoon = 0.8;
        request.transparency.stick = 0.5;
        let list = compiled(&request).directives;

        let layers: Vec<_> = list
            .iter()
            .filter_map(|d| match d {
                Directive::SetTransparency { layer, value, .. } => {
                    Some((*layer, *value))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            layers,
            vec![
                (TransparencyLayer::Global, 0.3),
                (TransparencyLayer::Cartoon, 0.8),
            ]
        );
    }

    #[test]
    fn ball_and_stick_gets_both_layers_once() {
        let mut request = RenderRequest::default();
        request.geometry.render_mode = "ball_and_stick".to_owned();
        let list = compiled(&request).directives;
        assert_eq!(list.count(DirectiveKind::SetRepresentation), 2);
        assert_eq!(list.count(DirectiveKind::SetTransparency), 3);
    }

    #[test]
    fn image_edges_are_validated_inclusively() {
        let mut request = RenderRequest::default();
        request.output.width = 256;
        request.output.height = 4096;
        assert!(compile_request(&request, &out()).is_ok());

        request.output.width = 4097;
        let err = compile_request(&request, &out()).unwrap_err();
        assert_eq!(err.field, "output.width");
        assert_eq!(err.value, "4097");

        request.output.width = 1024;
        request.output.height = 255;
        let err = compile_request(&request, &out()).unwrap_err();
        assert_eq!(err.field, "output.height");
    }

    #[test]
    fn negative_image_edge_is_a_validation_error() {
        let request =
            RenderRequest::from_toml("[output]\nwidth = -512\n").unwrap();
        let err = compile_request(&request, &out()).unwrap_err();
        assert_eq!(err.field, "output.width");
        assert_eq!(err.value, "-512");
    }

    #[test]
    fn selection_that_escapes_its_directive_is_rejected() {
        let mut request = RenderRequest::default();
        request.selection = "chain A\nsystem touch /tmp/x".to_owned();
        let err = compile_request(&request, &out()).unwrap_err();
        assert_eq!(err.field, "selection");

        request.selection = "chain A".to_owned();
        request.labels.show = true;
        request.labels.selection = "name CA; system id".to_owned();
        let err = compile_request(&request, &out()).unwrap_err();
        assert_eq!(err.field, "labels.selection");
    }

    #[test]
    fn custom_background_with_a_separator_degrades() {
        let mut request = RenderRequest::default();
        request.output.background = "custom".to_owned();
        request.output.bg_custom = "grey20; system id".to_owned();
        let compilation = compiled(&request);
        assert_eq!(compilation.warnings[0].field, "output.bg_custom");
        assert!(compilation.directives.iter().any(|d| matches!(
            d,
            Directive::SetBackground { color } if color == "white"
        )));
    }

    #[test]
    fn unknown_render_or_color_mode_is_fatal() {
        let mut request = RenderRequest::default();
        request.geometry.render_mode = "hologram".to_owned();
        let err = compile_request(&request, &out()).unwrap_err();
        assert_eq!(err.field, "geometry.render_mode");
        assert!(err.to_string().contains("hologram"));

        let mut request = RenderRequest::default();
        request.color.color_mode = "plaid".to_owned();
        let err = compile_request(&request, &out()).unwrap_err();
        assert_eq!(err.field, "color.color_mode");
    }

    #[test]
    fn custom_chain_colors_compile_in_order() {
        let mut request = RenderRequest::default();
        request.color.color_mode = "custom".to_owned();
        request.color.custom_per_chain = "A-cyan,B:green,C:yellow".to_owned();
        let compilation = compiled(&request);

        let targets: Vec<_> = compilation
            .directives
            .iter()
            .filter(|d| d.kind() == DirectiveKind::SetColor)
            .filter_map(Directive::target)
            .map(Selection::as_str)
            .collect();
        assert_eq!(targets, ["chain B", "chain C"]);
        assert_eq!(compilation.warnings.len(), 1);
    }

    #[test]
    fn soft_fields_degrade_with_warnings() {
        let mut request = RenderRequest::default();
        request.preset = "ultra".to_owned();
        request.geometry.render_mode = "sticks".to_owned();
        request.geometry.stick_radius = 3.0;
        request.camera.camera = "sideways".to_owned();
        request.output.background = "mauve".to_owned();
        let compilation = compiled(&request);

        let fields: Vec<_> =
            compilation.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "preset",
                "geometry.stick_radius",
                "camera.camera",
                "output.background"
            ]
        );
        assert!(compilation.directives.iter().any(|d| matches!(
            d,
            Directive::SetRepresentation {
                geometry: Geometry::Sticks { radius, .. },
                ..
            } if *radius == 1.0
        )));
        assert!(compilation.directives.iter().any(|d| matches!(
            d,
            Directive::SetBackground { color } if color == "white"
        )));
    }

    #[test]
    fn custom_background_uses_bg_custom() {
        let mut request = RenderRequest::default();
        request.output.background = "custom".to_owned();
        request.output.bg_custom = "grey20".to_owned();
        let list = compiled(&request).directives;
        assert!(list.iter().any(|d| matches!(
            d,
            Directive::SetBackground { color } if color == "grey20"
        )));
    }

    #[test]
    fn labels_only_when_shown() {
        let mut request = RenderRequest::default();
        let hidden = compiled(&request).directives;
        assert_eq!(hidden.count(DirectiveKind::AddLabel), 0);
        request.labels.show = true;
        let list = compiled(&request).directives;
        assert_eq!(list.count(DirectiveKind::AddLabel), 1);
        let kinds: Vec<_> = list.iter().map(Directive::kind).collect();
        let label_at = kinds.iter().position(|k| *k == DirectiveKind::AddLabel);
        assert_eq!(label_at, Some(kinds.len() - 3));
    }

    #[test]
    fn every_lighting_parameter_is_emitted_once() {
        let list = compiled(&RenderRequest::default()).directives;
        assert_eq!(list.count(DirectiveKind::SetRayTraceMode), 1);
        let parameters: Vec<_> = list
            .iter()
            .filter_map(|d| match d {
                Directive::SetLighting { parameter, .. } => {
                    Some(parameter.keyword())
                }
                _ => None,
            })
            .collect();
        assert_eq!(parameters, LightingParameter::KEYWORDS);
    }

    #[test]
    fn outline_width_keeps_its_own_directive() {
        let quality = QualitySettings {
            ray_trace_mode: RayTraceMode::Outlined,
            ray_trace_gain: 0.2,
            outline_width: 2.0,
            ..QualitySettings::default()
        };
        let floats: Vec<_> = lighting_directives(&quality)
            .into_iter()
            .filter_map(|d| match d {
                Directive::SetLighting {
                    parameter,
                    value: SettingValue::Float(v),
                } if matches!(
                    parameter,
                    LightingParameter::RayTraceGain
                        | LightingParameter::OutlineWidth
                ) =>
                {
                    Some((parameter, v))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            floats,
            [
                (LightingParameter::RayTraceGain, 0.2),
                (LightingParameter::OutlineWidth, 2.0),
            ]
        );
    }

    #[test]
    fn draft_preset_renders_without_ray_tracing() {
        let request = RenderRequest {
            preset: "draft".to_owned(),
            ..RenderRequest::default()
        };
        let list = compiled(&request).directives;
        assert!(matches!(
            list.as_slice().last(),
            Some(Directive::Render { ray_trace: false, .. })
        ));
    }
}
