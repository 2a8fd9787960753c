use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Transparency layers. `global` is applied first; the per-representation
/// values are layered on top of it for the representations being shown.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Transparency", inline)]
#[serde(default)]
pub struct TransparencyOptions {
    /// Transparency applied to the whole selection.
    #[schemars(title = "Global", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub global: f32,
    /// Cartoon transparency.
    #[schemars(title = "Cartoon", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub cartoon: f32,
    /// Surface transparency.
    #[schemars(title = "Surface", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub surface: f32,
    /// Stick transparency.
    #[schemars(title = "Stick", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub stick: f32,
    /// Sphere transparency.
    #[schemars(title = "Sphere", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub sphere: f32,
}
