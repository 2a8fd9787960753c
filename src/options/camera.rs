use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera orientation. The rotation fields are only read in `custom` mode;
/// the zoom factor applies to every mode.
pub struct CameraOptions {
    /// One of `auto_orient`, `front`, `back`, `side`, `top`, `bottom`,
    /// `iso`, `custom`.
    #[schemars(title = "Camera")]
    pub camera: String,
    /// Rotation about the screen X axis in degrees.
    #[schemars(title = "Rotate X", range(min = -180.0, max = 180.0), extend("step" = 1.0))]
    pub rotate_x: f32,
    /// Rotation about the screen Y axis in degrees.
    #[schemars(title = "Rotate Y", range(min = -180.0, max = 180.0), extend("step" = 1.0))]
    pub rotate_y: f32,
    /// Rotation about the screen Z axis in degrees.
    #[schemars(title = "Rotate Z", range(min = -180.0, max = 180.0), extend("step" = 1.0))]
    pub rotate_z: f32,
    /// Zoom buffer around the visible atoms.
    #[schemars(title = "Zoom", range(min = 0.5, max = 5.0), extend("step" = 0.05))]
    pub zoom_factor: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            camera: "iso".to_owned(),
            rotate_x: 45.0,
            rotate_y: 30.0,
            rotate_z: 0.0,
            zoom_factor: 1.5,
        }
    }
}
