//! Typed, renderer-agnostic render operations.
//!
//! Order is significant: a later directive of the same kind on an
//! overlapping selection overrides an earlier one (last-write-wins), the same
//! way an immediate-mode renderer applies settings.

use std::path::{Path, PathBuf};

use super::camera::CameraView;
use super::color::Paint;
use super::geometry::Geometry;
use super::labels::LabelContent;
use super::selection::Selection;
use crate::keyword::keyword_enum;
use crate::quality::RayTraceMode;

keyword_enum! {
    /// Discriminant of a [`Directive`].
    pub enum DirectiveKind {
        /// Show a representation.
        SetRepresentation => "set_representation",
        /// Color a selection.
        SetColor => "set_color",
        /// Make a representation layer transparent.
        SetTransparency => "set_transparency",
        /// Orient the camera.
        SetCamera => "set_camera",
        /// Set one lighting parameter.
        SetLighting => "set_lighting",
        /// Switch ray tracing on or off and pick its style.
        SetRayTraceMode => "set_ray_trace_mode",
        /// Draw text labels.
        AddLabel => "add_label",
        /// Set the background plate.
        SetBackground => "set_background",
        /// Render and save the image.
        Render => "render",
    }
}

keyword_enum! {
    /// Which transparency setting a [`Directive::SetTransparency`] drives.
    pub enum TransparencyLayer {
        /// Applies to the whole selection.
        Global => "global",
        /// Cartoon only.
        Cartoon => "cartoon",
        /// Surface only.
        Surface => "surface",
        /// Sticks only.
        Stick => "stick",
        /// Spheres only.
        Sphere => "sphere",
    }
}

keyword_enum! {
    /// Lighting and quality parameters, one directive each.
    pub enum LightingParameter {
        /// Antialiasing level.
        Antialias => "antialias",
        /// Ray traced shadows.
        RayShadows => "ray_shadows",
        /// Outline darkness.
        RayTraceGain => "ray_trace_gain",
        /// Outline color.
        RayTraceColor => "ray_trace_color",
        /// Outline width multiplier.
        OutlineWidth => "outline_width",
        /// Surface tessellation quality.
        SurfaceQuality => "surface_quality",
        /// Ambient occlusion on/off.
        AmbientOcclusion => "ambient_occlusion",
        /// Ambient occlusion scale.
        AmbientOcclusionScale => "ambient_occlusion_scale",
        /// Depth cueing.
        DepthCue => "depth_cue",
        /// Ambient light.
        Ambient => "ambient",
        /// Direct light.
        Direct => "direct",
        /// Reflected light.
        Reflect => "reflect",
        /// Specular highlight count.
        SpecCount => "spec_count",
        /// Specular reflection.
        SpecReflect => "spec_reflect",
        /// Direct specular.
        SpecDirect => "spec_direct",
        /// Specular exponent.
        Shininess => "shininess",
        /// Number of lights.
        LightCount => "light_count",
        /// Two-sided lighting.
        TwoSidedLighting => "two_sided_lighting",
        /// Fog density.
        Fog => "fog",
    }
}

/// Typed setting payload.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// On/off switch.
    Bool(bool),
    /// Integer level or count.
    Int(i32),
    /// Continuous value.
    Float(f32),
    /// Named color.
    Color(String),
}

/// One operation in a compiled render.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Show `geometry` for `selection`.
    SetRepresentation {
        /// Atoms to show.
        selection: Selection,
        /// Representation and its sub-parameters.
        geometry: Geometry,
    },
    /// Paint `selection`.
    SetColor {
        /// Atoms to color.
        selection: Selection,
        /// Color source.
        paint: Paint,
    },
    /// Set one transparency layer on `selection`.
    SetTransparency {
        /// Atoms affected.
        selection: Selection,
        /// Which transparency setting.
        layer: TransparencyLayer,
        /// 0 (opaque) to 1 (invisible).
        value: f32,
    },
    /// Orient the camera around `selection`.
    SetCamera {
        /// Atoms the camera frames.
        selection: Selection,
        /// Orientation and zoom.
        view: CameraView,
    },
    /// Ray tracing switch and style.
    SetRayTraceMode {
        /// Whether the final image is ray traced.
        enabled: bool,
        /// Shading style.
        mode: RayTraceMode,
    },
    /// Set one lighting parameter.
    SetLighting {
        /// Parameter name.
        parameter: LightingParameter,
        /// Parameter value.
        value: SettingValue,
    },
    /// Label atoms in `selection`.
    AddLabel {
        /// Atoms to label.
        selection: Selection,
        /// What each label shows.
        content: LabelContent,
        /// Font size.
        size: f32,
        /// Text color.
        color: String,
    },
    /// Background plate color.
    SetBackground {
        /// Named color.
        color: String,
    },
    /// Render and write the image.
    Render {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Whether to ray trace.
        ray_trace: bool,
        /// PNG destination.
        output: PathBuf,
    },
}

impl Directive {
    /// Discriminant of this directive.
    #[must_use]
    pub const fn kind(&self) -> DirectiveKind {
        match self {
            Self::SetRepresentation { .. } => DirectiveKind::SetRepresentation,
            Self::SetColor { .. } => DirectiveKind::SetColor,
            Self::SetTransparency { .. } => DirectiveKind::SetTransparency,
            Self::SetCamera { .. } => DirectiveKind::SetCamera,
            Self::SetRayTraceMode { .. } => DirectiveKind::SetRayTraceMode,
            Self::SetLighting { .. } => DirectiveKind::SetLighting,
            Self::AddLabel { .. } => DirectiveKind::AddLabel,
            Self::SetBackground { .. } => DirectiveKind::SetBackground,
            Self::Render { .. } => DirectiveKind::Render,
        }
    }

    /// Selection this directive targets, if it is selection-scoped.
    #[must_use]
    pub const fn target(&self) -> Option<&Selection> {
        match self {
            Self::SetRepresentation { selection, .. }
            | Self::SetColor { selection, .. }
            | Self::SetTransparency { selection, .. }
            | Self::SetCamera { selection, .. }
            | Self::AddLabel { selection, .. } => Some(selection),
            Self::SetRayTraceMode { .. }
            | Self::SetLighting { .. }
            | Self::SetBackground { .. }
            | Self::Render { .. } => None,
        }
    }
}

/// Ordered output of the compiler, consumed once by the emitter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectiveList {
    directives: Vec<Directive>,
}

impl DirectiveList {
    pub(crate) fn push(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub(crate) fn extend(
        &mut self,
        directives: impl IntoIterator<Item = Directive>,
    ) {
        self.directives.extend(directives);
    }

    /// Directives in emission order.
    #[must_use]
    pub fn as_slice(&self) -> &[Directive] {
        &self.directives
    }

    /// Iterate in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }

    /// Number of directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Number of directives of `kind`.
    #[must_use]
    pub fn count(&self, kind: DirectiveKind) -> usize {
        self.directives.iter().filter(|d| d.kind() == kind).count()
    }

    /// Image path named by the render directive.
    #[must_use]
    pub fn render_target(&self) -> Option<&Path> {
        self.directives.iter().rev().find_map(|d| match d {
            Directive::Render { output, .. } => Some(output.as_path()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a DirectiveList {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}
