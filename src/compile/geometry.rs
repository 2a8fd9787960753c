//! Representation styles and their per-style parameters.

use super::directive::TransparencyLayer;
use crate::diagnostics::Diagnostics;
use crate::keyword::keyword_enum;
use crate::options::GeometryOptions;

/// Sphere scale used for the balls of `ball_and_stick`.
pub const BALL_SCALE: f32 = 0.25;

keyword_enum! {
    /// Top-level representation requested by the caller.
    pub enum RenderMode {
        /// Secondary-structure cartoon.
        Cartoon => "cartoon",
        /// Solvent-accessible surface.
        Surface => "surface",
        /// Bonds as cylinders.
        Sticks => "sticks",
        /// Sticks plus small spheres.
        BallAndStick => "ball_and_stick",
        /// Flat backbone ribbon.
        Ribbon => "ribbon",
        /// Bonds as lines.
        Lines => "lines",
        /// Van der Waals spheres.
        Spheres => "spheres",
        /// Surface wire mesh.
        Mesh => "mesh",
        /// Surface dots.
        Dots => "dots",
    }
}

keyword_enum! {
    /// Cartoon cross-section profile.
    pub enum CartoonStyle {
        /// Elliptical profile.
        Oval => "oval",
        /// Thin loop everywhere.
        Loop => "loop",
        /// B-factor scaled tube.
        Putty => "putty",
        /// Rectangular profile.
        Rect => "rect",
        /// Round tube.
        Tube => "tube",
        /// Arrow-ended sheets.
        Arrow => "arrow",
        /// Dumbbell profile.
        Dumbbell => "dumbbell",
    }
}

keyword_enum! {
    /// Sphere drawing mode.
    pub enum SphereMode {
        /// Renderer default.
        Default => "default",
        /// Flat-shaded points.
        Simple => "simple",
        /// Shader impostors.
        Shader => "shader",
        /// Fastest approximation.
        Fast => "fast",
    }
}

impl SphereMode {
    /// Numeric mode understood by the renderer.
    #[must_use]
    pub const fn level(self) -> i32 {
        match self {
            Self::Default => 0,
            Self::Simple => 1,
            Self::Shader => 2,
            Self::Fast => 9,
        }
    }
}

/// Cartoon parameters, all clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct CartoonGeometry {
    /// Cross-section profile.
    pub style: CartoonStyle,
    /// Fancy helices.
    pub fancy_helices: bool,
    /// Fancy sheets.
    pub fancy_sheets: bool,
    /// Flat sheets.
    pub flat_sheets: bool,
    /// Loop smoothing cycles (0..=20).
    pub smooth_loops: i32,
    /// Tube radius (0.1..=2).
    pub tube_radius: f32,
    /// Helix radius (0.5..=5).
    pub helix_radius: f32,
    /// Loop radius (0.1..=1).
    pub loop_radius: f32,
}

/// One shown representation with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Cartoon.
    Cartoon(CartoonGeometry),
    /// Surface (quality comes from the lighting settings).
    Surface,
    /// Sticks.
    Sticks {
        /// Cylinder radius (0.05..=1).
        radius: f32,
        /// Cap sticks with balls.
        ball: bool,
    },
    /// Spheres.
    Spheres {
        /// Radius scale (0.1..=3).
        scale: f32,
        /// Drawing mode.
        mode: SphereMode,
    },
    /// Ribbon.
    Ribbon {
        /// Width (0.5..=10).
        width: f32,
        /// Smoothing cycles (0..=10).
        smooth: i32,
    },
    /// Lines.
    Lines {
        /// Width (0.5..=10).
        width: f32,
    },
    /// Mesh.
    Mesh {
        /// Width (0.1..=2).
        width: f32,
    },
    /// Dots.
    Dots {
        /// Density (1..=5).
        density: i32,
    },
}

impl Geometry {
    /// Renderer representation name.
    #[must_use]
    pub const fn representation(&self) -> &'static str {
        match self {
            Self::Cartoon(_) => "cartoon",
            Self::Surface => "surface",
            Self::Sticks { .. } => "sticks",
            Self::Spheres { .. } => "spheres",
            Self::Ribbon { .. } => "ribbon",
            Self::Lines { .. } => "lines",
            Self::Mesh { .. } => "mesh",
            Self::Dots { .. } => "dots",
        }
    }

    /// Transparency layer that applies to this representation, if any.
    #[must_use]
    pub const fn transparency_layer(&self) -> Option<TransparencyLayer> {
        match self {
            Self::Cartoon(_) => Some(TransparencyLayer::Cartoon),
            Self::Surface | Self::Mesh { .. } => {
                Some(TransparencyLayer::Surface)
            }
            Self::Sticks { .. } => Some(TransparencyLayer::Stick),
            Self::Spheres { .. } => Some(TransparencyLayer::Sphere),
            Self::Ribbon { .. } | Self::Lines { .. } | Self::Dots { .. } => {
                None
            }
        }
    }
}

impl RenderMode {
    /// Representations shown for this mode, in emission order.
    pub fn geometries(
        self,
        opts: &GeometryOptions,
        diag: &mut Diagnostics,
    ) -> Vec<Geometry> {
        match self {
            Self::Cartoon => vec![Geometry::Cartoon(cartoon(opts, diag))],
            Self::Surface => vec![Geometry::Surface],
            Self::Sticks => vec![sticks(opts, diag)],
            Self::BallAndStick => vec![
                sticks(opts, diag),
                Geometry::Spheres {
                    scale: BALL_SCALE,
                    mode: sphere_mode(opts, diag),
                },
            ],
            Self::Ribbon => vec![Geometry::Ribbon {
                width: diag.clamp_float(
                    "geometry.ribbon_width",
                    opts.ribbon_width,
                    (0.5, 10.0),
                    3.0,
                ),
                smooth: diag.clamp_int(
                    "geometry.ribbon_smooth",
                    opts.ribbon_smooth,
                    0,
                    10,
                ),
            }],
            Self::Lines => vec![Geometry::Lines {
                width: diag.clamp_float(
                    "geometry.line_width",
                    opts.line_width,
                    (0.5, 10.0),
                    1.5,
                ),
            }],
            Self::Spheres => vec![Geometry::Spheres {
                scale: diag.clamp_float(
                    "geometry.sphere_scale",
                    opts.sphere_scale,
                    (0.1, 3.0),
                    1.0,
                ),
                mode: sphere_mode(opts, diag),
            }],
            Self::Mesh => vec![Geometry::Mesh {
                width: diag.clamp_float(
                    "geometry.mesh_width",
                    opts.mesh_width,
                    (0.1, 2.0),
                    0.5,
                ),
            }],
            Self::Dots => vec![Geometry::Dots {
                density: diag.clamp_int(
                    "geometry.dot_density",
                    opts.dot_density,
                    1,
                    5,
                ),
            }],
        }
    }
}

fn cartoon(opts: &GeometryOptions, diag: &mut Diagnostics) -> CartoonGeometry {
    let style = CartoonStyle::parse(&opts.cartoon_style).unwrap_or_else(|| {
        diag.warn(
            "geometry.cartoon_style",
            &opts.cartoon_style,
            "unknown cartoon style, using oval",
        );
        CartoonStyle::Oval
    });
    CartoonGeometry {
        style,
        fancy_helices: opts.cartoon_fancy_helices,
        fancy_sheets: opts.cartoon_fancy_sheets,
        flat_sheets: opts.cartoon_flat_sheets,
        smooth_loops: diag.clamp_int(
            "geometry.cartoon_smooth_loops",
            opts.cartoon_smooth_loops,
            0,
            20,
        ),
        tube_radius: diag.clamp_float(
            "geometry.cartoon_tube_radius",
            opts.cartoon_tube_radius,
            (0.1, 2.0),
            0.5,
        ),
        helix_radius: diag.clamp_float(
            "geometry.cartoon_helix_radius",
            opts.cartoon_helix_radius,
            (0.5, 5.0),
            2.25,
        ),
        loop_radius: diag.clamp_float(
            "geometry.cartoon_loop_radius",
            opts.cartoon_loop_radius,
            (0.1, 1.0),
            0.3,
        ),
    }
}

fn sticks(opts: &GeometryOptions, diag: &mut Diagnostics) -> Geometry {
    Geometry::Sticks {
        radius: diag.clamp_float(
            "geometry.stick_radius",
            opts.stick_radius,
            (0.05, 1.0),
            0.25,
        ),
        ball: opts.stick_ball,
    }
}

fn sphere_mode(opts: &GeometryOptions, diag: &mut Diagnostics) -> SphereMode {
    SphereMode::parse(&opts.sphere_mode).unwrap_or_else(|| {
        diag.warn(
            "geometry.sphere_mode",
            &opts.sphere_mode,
            "unknown sphere mode, using default",
        );
        SphereMode::Default
    })
}
