//! PyMOL script serialization.
//!
//! The loaded structure is always the object `prot`; directive selections
//! are scoped to it.
//!
//! PyMOL has no outline width setting. For outlined trace modes the width
//! scales `ray_trace_gain` instead (capped at 1). Ray tracing itself is
//! switched by the `ray=` flag of the final `png` command, so a disabled
//! trace mode writes no `ray_trace_mode` line.

use std::path::Path;

use crate::compile::{
    CameraView, ColorScheme, Directive, DirectiveList, Geometry,
    LightingParameter, Paint, Selection, SettingValue, SpectrumDomain,
    TransparencyLayer,
};

/// Object name the structure is loaded under.
pub const OBJECT: &str = "prot";

/// Kyte-Doolittle hydropathy index, written into B-factors before a
/// hydropathy spectrum.
const HYDROPATHY: [(&str, f32); 20] = [
    ("ALA", 1.8),
    ("ARG", -4.5),
    ("ASN", -3.5),
    ("ASP", -3.5),
    ("CYS", 2.5),
    ("GLN", -3.5),
    ("GLU", -3.5),
    ("GLY", -0.4),
    ("HIS", -3.2),
    ("ILE", 4.5),
    ("LEU", 3.8),
    ("LYS", -3.9),
    ("MET", 1.9),
    ("PHE", 2.8),
    ("PRO", -1.6),
    ("SER", -0.8),
    ("THR", -0.7),
    ("TRP", -0.9),
    ("TYR", -1.3),
    ("VAL", 4.2),
];

const ELEMENT_COLORS: [(&str, &str); 6] = [
    ("C", "slate"),
    ("N", "blue"),
    ("O", "red"),
    ("S", "yellow"),
    ("P", "orange"),
    ("H", "white"),
];

/// Serialize `directives` into a complete script that loads `structure`,
/// applies every directive in order and quits.
#[must_use]
pub fn render_script(structure: &Path, directives: &DirectiveList) -> String {
    let mut lines = vec![
        "reinitialize".to_owned(),
        format!("load {}, {OBJECT}", quote_path(structure)),
        "hide everything, all".to_owned(),
        "set opaque_background, 1".to_owned(),
        "set ray_opaque_background, 1".to_owned(),
    ];
    let outline = outline_scale(directives);
    for directive in directives {
        lines.extend(directive_lines(directive, outline));
    }
    lines.push("quit".to_owned());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// Outline width in effect when the last trace mode is an outlined one.
fn outline_scale(directives: &DirectiveList) -> Option<f32> {
    let mut last = directives.as_slice().iter().rev();
    let outlined = last.clone().find_map(|d| match d {
        Directive::SetRayTraceMode { enabled, mode } => {
            Some(*enabled && mode.is_outlined())
        }
        _ => None,
    });
    if outlined != Some(true) {
        return None;
    }
    last.find_map(|d| match d {
        Directive::SetLighting {
            parameter: LightingParameter::OutlineWidth,
            value: SettingValue::Float(width),
        } => Some(*width),
        _ => None,
    })
}

fn directive_lines(
    directive: &Directive,
    outline: Option<f32>,
) -> Vec<String> {
    match directive {
        Directive::SetRepresentation {
            selection,
            geometry,
        } => representation(&target(selection), geometry),
        Directive::SetColor { selection, paint } => {
            color(&target(selection), paint)
        }
        Directive::SetTransparency {
            selection,
            layer,
            value,
        } => {
            let setting = match layer {
                TransparencyLayer::Global => "transparency".to_owned(),
                layer => format!("{layer}_transparency"),
            };
            vec![set(&setting, &num(*value), Some(&target(selection)))]
        }
        Directive::SetCamera { selection, view } => {
            camera(&target(selection), *view)
        }
        Directive::SetRayTraceMode { enabled, mode } => {
            if *enabled {
                vec![set("ray_trace_mode", &mode.level().to_string(), None)]
            } else {
                Vec::new()
            }
        }
        Directive::SetLighting {
            parameter: LightingParameter::OutlineWidth,
            ..
        } => Vec::new(),
        Directive::SetLighting {
            parameter: LightingParameter::RayTraceGain,
            value: SettingValue::Float(gain),
        } => {
            let gain = outline.map_or(*gain, |width| (gain * width).min(1.0));
            vec![set("ray_trace_gain", &num(gain), None)]
        }
        Directive::SetLighting { parameter, value } => {
            vec![set(setting_name(*parameter), &setting_value(value), None)]
        }
        Directive::AddLabel {
            selection,
            content,
            size,
            color,
        } => {
            let t = target(selection);
            vec![
                set("label_size", &num(*size), Some(&t)),
                set("label_color", color, Some(&t)),
                format!("label {t}, {}", content.expression()),
            ]
        }
        Directive::SetBackground { color } => vec![format!("bg_color {color}")],
        Directive::Render {
            width,
            height,
            ray_trace,
            output,
        } => vec![format!(
            "png {}, width={width}, height={height}, ray={}",
            quote_path(output),
            u8::from(*ray_trace)
        )],
    }
}

fn representation(t: &str, geometry: &Geometry) -> Vec<String> {
    let mut lines = vec![format!("show {}, {t}", geometry.representation())];
    let on = Some(t);
    match geometry {
        Geometry::Cartoon(c) => {
            lines.push(format!("cartoon {}, {t}", c.style));
            lines.extend([
                set("cartoon_fancy_helices", flag(c.fancy_helices), on),
                set("cartoon_fancy_sheets", flag(c.fancy_sheets), on),
                set("cartoon_flat_sheets", flag(c.flat_sheets), on),
                set("cartoon_smooth_loops", &c.smooth_loops.to_string(), on),
                set("cartoon_tube_radius", &num(c.tube_radius), on),
                set("cartoon_helix_radius", &num(c.helix_radius), on),
                set("cartoon_loop_radius", &num(c.loop_radius), on),
                set("cartoon_highlight_color", "grey90", on),
            ]);
        }
        Geometry::Surface => {}
        Geometry::Sticks { radius, ball } => lines.extend([
            set("stick_radius", &num(*radius), on),
            set("stick_ball", flag(*ball), on),
        ]),
        Geometry::Spheres { scale, mode } => lines.extend([
            set("sphere_scale", &num(*scale), on),
            set("sphere_mode", &mode.level().to_string(), on),
        ]),
        Geometry::Ribbon { width, smooth } => lines.extend([
            set("ribbon_width", &num(*width), on),
            set("ribbon_smooth", &smooth.to_string(), on),
        ]),
        Geometry::Lines { width } => {
            lines.push(set("line_width", &num(*width), on));
        }
        Geometry::Mesh { width } => {
            lines.push(set("mesh_width", &num(*width), on));
        }
        Geometry::Dots { density } => {
            lines.push(set("dot_density", &density.to_string(), on));
        }
    }
    lines
}

fn color(t: &str, paint: &Paint) -> Vec<String> {
    match paint {
        Paint::Named(color) => vec![format!("color {color}, {t}")],
        Paint::Scheme(ColorScheme::Chain) => vec![format!("util.cbc(\"{t}\")")],
        Paint::Scheme(ColorScheme::Element) => {
            let mut lines = vec![format!("color gray70, {t}")];
            lines.extend(ELEMENT_COLORS.iter().map(|(elem, color)| {
                format!("color {color}, ({t}) and elem {elem}")
            }));
            lines
        }
        Paint::Scheme(ColorScheme::SecondaryStructure) => vec![
            format!("color red, ({t}) and ss h"),
            format!("color yellow, ({t}) and ss s"),
            format!("color green, ({t}) and ss l+''"),
        ],
        Paint::Spectrum { palette, domain } => match domain {
            SpectrumDomain::ResidueIndex => {
                vec![format!("spectrum count, {palette}, {t}")]
            }
            SpectrumDomain::BFactor => {
                vec![format!("spectrum b, {palette}, {t}")]
            }
            SpectrumDomain::Hydropathy => {
                let table = HYDROPATHY
                    .iter()
                    .map(|(resn, value)| format!("'{resn}': {}", num(*value)))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![
                    format!("alter {t}, b={{{table}}}.get(resn, 0.0)"),
                    format!("spectrum b, {palette}, {t}"),
                ]
            }
        },
    }
}

fn camera(t: &str, view: CameraView) -> Vec<String> {
    let mut lines = vec![format!("orient {t}")];
    let zoom = match view {
        CameraView::Fit { zoom } => zoom,
        CameraView::Oriented { rotation, zoom } => {
            let turns =
                [("x", rotation.x), ("y", rotation.y), ("z", rotation.z)];
            for (axis, angle) in turns {
                if angle != 0.0 {
                    lines.push(format!("turn {axis}, {}", num(angle)));
                }
            }
            zoom
        }
    };
    lines.push(format!("zoom visible, {}", num(zoom)));
    lines
}

/// Renderer setting name for a lighting parameter.
const fn setting_name(parameter: LightingParameter) -> &'static str {
    match parameter {
        LightingParameter::RayShadows => "ray_shadow",
        LightingParameter::AmbientOcclusion => "ambient_occlusion_mode",
        other => other.keyword(),
    }
}

fn setting_value(value: &SettingValue) -> String {
    match value {
        SettingValue::Bool(b) => flag(*b).to_owned(),
        SettingValue::Int(i) => i.to_string(),
        SettingValue::Float(f) => num(*f),
        SettingValue::Color(c) => c.clone(),
    }
}

fn set(name: &str, value: &str, t: Option<&str>) -> String {
    match t {
        Some(t) => format!("set {name}, {value}, {t}"),
        None => format!("set {name}, {value}"),
    }
}

const fn flag(on: bool) -> &'static str {
    if on {
        "1"
    } else {
        "0"
    }
}

/// Selection expression scoped to the loaded object.
fn target(selection: &Selection) -> String {
    if selection.is_all() {
        OBJECT.to_owned()
    } else {
        format!("{OBJECT} and ({selection})")
    }
}

/// Floats always carry a decimal point so the renderer reads them as floats.
fn num(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn quote_path(path: &Path) -> String {
    let text = path.to_string_lossy();
    let needs_quotes = |c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | '"' | '\'')
    };
    if text.contains(needs_quotes) {
        format!("\"{}\"", text.replace('"', "\\\""))
    } else {
        text.into_owned()
    }
}
