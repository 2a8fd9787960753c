use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Representation style and its per-style sub-parameters.
pub struct GeometryOptions {
    /// One of `cartoon`, `surface`, `sticks`, `ball_and_stick`, `ribbon`,
    /// `lines`, `spheres`, `mesh`, `dots`.
    #[schemars(title = "Render Mode")]
    pub render_mode: String,
    /// Cartoon profile: `oval`, `loop`, `putty`, `rect`, `tube`, `arrow`,
    /// `dumbbell`.
    #[schemars(title = "Cartoon Style")]
    pub cartoon_style: String,
    /// Draw helices with the fancy (cylindrical edge) profile.
    #[schemars(title = "Fancy Helices")]
    pub cartoon_fancy_helices: bool,
    /// Draw sheets with arrowheads.
    #[schemars(title = "Fancy Sheets")]
    pub cartoon_fancy_sheets: bool,
    /// Flatten sheet geometry.
    #[schemars(title = "Flat Sheets")]
    pub cartoon_flat_sheets: bool,
    /// Loop smoothing cycles.
    #[schemars(title = "Smooth Loops", range(min = 0, max = 20))]
    pub cartoon_smooth_loops: i32,
    /// Tube radius for the `tube` profile.
    #[schemars(title = "Tube Radius", range(min = 0.1, max = 2.0), extend("step" = 0.1))]
    pub cartoon_tube_radius: f32,
    /// Helix radius for fancy helices.
    #[schemars(title = "Helix Radius", range(min = 0.5, max = 5.0), extend("step" = 0.25))]
    pub cartoon_helix_radius: f32,
    /// Loop radius.
    #[schemars(title = "Loop Radius", range(min = 0.1, max = 1.0), extend("step" = 0.1))]
    pub cartoon_loop_radius: f32,
    /// Stick cylinder radius in angstroms.
    #[schemars(title = "Stick Radius", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub stick_radius: f32,
    /// Cap sticks with small balls.
    #[schemars(title = "Stick Balls")]
    pub stick_ball: bool,
    /// Scale applied to van der Waals sphere radii.
    #[schemars(title = "Sphere Scale", range(min = 0.1, max = 3.0), extend("step" = 0.1))]
    pub sphere_scale: f32,
    /// Sphere drawing mode: `default`, `simple`, `shader`, `fast`.
    #[schemars(title = "Sphere Mode")]
    pub sphere_mode: String,
    /// Line width in pixels.
    #[schemars(title = "Line Width", range(min = 0.5, max = 10.0), extend("step" = 0.5))]
    pub line_width: f32,
    /// Mesh line width.
    #[schemars(title = "Mesh Width", range(min = 0.1, max = 2.0), extend("step" = 0.1))]
    pub mesh_width: f32,
    /// Dot surface sampling density.
    #[schemars(title = "Dot Density", range(min = 1, max = 5))]
    pub dot_density: i32,
    /// Ribbon width in pixels.
    #[schemars(title = "Ribbon Width", range(min = 0.5, max = 10.0), extend("step" = 0.5))]
    pub ribbon_width: f32,
    /// Ribbon smoothing cycles.
    #[schemars(title = "Ribbon Smoothing", range(min = 0, max = 10))]
    pub ribbon_smooth: i32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            render_mode: "cartoon".to_owned(),
            cartoon_style: "oval".to_owned(),
            cartoon_fancy_helices: true,
            cartoon_fancy_sheets: true,
            cartoon_flat_sheets: false,
            cartoon_smooth_loops: 5,
            cartoon_tube_radius: 0.5,
            cartoon_helix_radius: 2.25,
            cartoon_loop_radius: 0.3,
            stick_radius: 0.25,
            stick_ball: false,
            sphere_scale: 1.0,
            sphere_mode: "default".to_owned(),
            line_width: 1.5,
            mesh_width: 0.5,
            dot_density: 3,
            ribbon_width: 3.0,
            ribbon_smooth: 0,
        }
    }
}
