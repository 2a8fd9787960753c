//! Camera placement: auto-orient, named viewpoints and explicit rotations.

use crate::diagnostics::Diagnostics;
use crate::keyword::keyword_enum;
use crate::options::CameraOptions;

const DEFAULT_ZOOM: f32 = 1.5;

keyword_enum! {
    /// Requested camera placement.
    pub enum CameraPreset {
        /// Fit the selection without rotating.
        AutoOrient => "auto_orient",
        /// Principal-axis view.
        Front => "front",
        /// Rotated 180 degrees about y.
        Back => "back",
        /// Rotated 90 degrees about y.
        Side => "side",
        /// Looking down from above.
        Top => "top",
        /// Looking up from below.
        Bottom => "bottom",
        /// Isometric three-quarter view.
        Iso => "iso",
        /// Explicit rotation from the request.
        Custom => "custom",
    }
}

/// Rotation in degrees, applied x, then y, then z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    /// Degrees about x.
    pub x: f32,
    /// Degrees about y.
    pub y: f32,
    /// Degrees about z.
    pub z: f32,
}

impl Rotation {
    /// Rotation from its three angles.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl CameraPreset {
    /// Fixed rotation for the named presets; `None` for auto-orient and
    /// custom.
    #[must_use]
    pub const fn rotation(self) -> Option<Rotation> {
        match self {
            Self::Front => Some(Rotation::new(0.0, 0.0, 0.0)),
            Self::Back => Some(Rotation::new(0.0, 180.0, 0.0)),
            Self::Side => Some(Rotation::new(0.0, 90.0, 0.0)),
            Self::Top => Some(Rotation::new(90.0, 0.0, 0.0)),
            Self::Bottom => Some(Rotation::new(-90.0, 0.0, 0.0)),
            Self::Iso => Some(Rotation::new(45.0, 30.0, 0.0)),
            Self::AutoOrient | Self::Custom => None,
        }
    }
}

/// Resolved camera request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraSpec {
    /// Fit the selection; never rotates.
    AutoOrient {
        /// Zoom buffer.
        zoom: f32,
    },
    /// Named orientation from the preset table.
    Preset {
        /// Which preset.
        preset: CameraPreset,
        /// Zoom buffer.
        zoom: f32,
    },
    /// Caller-supplied rotation.
    Explicit {
        /// Rotation angles.
        rotation: Rotation,
        /// Zoom buffer.
        zoom: f32,
    },
}

/// Camera operation carried by a directive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraView {
    /// Orient along principal axes and zoom to fit.
    Fit {
        /// Zoom buffer.
        zoom: f32,
    },
    /// Orient, rotate, then zoom to fit.
    Oriented {
        /// Rotation after orienting.
        rotation: Rotation,
        /// Zoom buffer.
        zoom: f32,
    },
}

impl CameraSpec {
    /// Resolve the camera options. Unknown cameras fall back to `iso`.
    pub fn resolve(opts: &CameraOptions, diag: &mut Diagnostics) -> Self {
        let preset = CameraPreset::parse(&opts.camera).unwrap_or_else(|| {
            diag.warn(
                "camera.camera",
                &opts.camera,
                "unknown camera, using iso",
            );
            CameraPreset::Iso
        });
        let zoom = diag.clamp_float(
            "camera.zoom_factor",
            opts.zoom_factor,
            (0.5, 5.0),
            DEFAULT_ZOOM,
        );
        match preset {
            CameraPreset::AutoOrient => Self::AutoOrient { zoom },
            CameraPreset::Custom => {
                let mut angle = |field, value| {
                    diag.clamp_float(field, value, (-180.0, 180.0), 0.0)
                };
                let rotation = Rotation::new(
                    angle("camera.rotate_x", opts.rotate_x),
                    angle("camera.rotate_y", opts.rotate_y),
                    angle("camera.rotate_z", opts.rotate_z),
                );
                Self::Explicit { rotation, zoom }
            }
            preset => Self::Preset { preset, zoom },
        }
    }

    /// Directive payload for this camera.
    #[must_use]
    pub fn view(self) -> CameraView {
        match self {
            Self::AutoOrient { zoom } => CameraView::Fit { zoom },
            Self::Preset { preset, zoom } => match preset.rotation() {
                Some(rotation) => CameraView::Oriented { rotation, zoom },
                None => CameraView::Fit { zoom },
            },
            Self::Explicit { rotation, zoom } => {
                CameraView::Oriented { rotation, zoom }
            }
        }
    }
}
