use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coloring options. Only the fields relevant to `color_mode` are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Color", inline)]
#[serde(default)]
pub struct ColorOptions {
    /// One of `chain`, `element`, `single`, `custom`, `spectrum`,
    /// `secondary_structure`, `b_factor`, `hydrophobicity`.
    #[schemars(title = "Color Mode")]
    pub color_mode: String,
    /// Named color used by `single` mode.
    #[schemars(title = "Single Color")]
    pub single_color: String,
    /// Per-chain colors for `custom` mode, e.g. `A:cyan,B:green`.
    #[schemars(title = "Per-Chain Colors")]
    pub custom_per_chain: String,
    /// Palette for the gradient modes (`spectrum`, `b_factor`,
    /// `hydrophobicity`).
    #[schemars(title = "Spectrum Palette")]
    pub spectrum_palette: String,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            color_mode: "chain".to_owned(),
            single_color: "deepsalmon".to_owned(),
            custom_per_chain: "A:cyan,B:green,C:yellow".to_owned(),
            spectrum_palette: "rainbow".to_owned(),
        }
    }
}
