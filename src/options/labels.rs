use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Labels", inline)]
#[serde(default)]
/// Text labels drawn on the structure.
pub struct LabelOptions {
    /// Draw labels at all.
    #[schemars(title = "Show Labels")]
    pub show: bool,
    /// Atoms to label, e.g. `name CA` or `resi 1+10+20`.
    #[schemars(title = "Label Selection")]
    pub selection: String,
    /// One of `resn`, `resi`, `name`, `chain`, `b`, `custom`.
    #[schemars(title = "Label Content")]
    pub content: String,
    /// Label font size.
    #[schemars(title = "Label Size", range(min = 5.0, max = 100.0), extend("step" = 5.0))]
    pub size: f32,
    /// Label color name.
    #[schemars(title = "Label Color")]
    pub color: String,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            show: false,
            selection: "name CA".to_owned(),
            content: "resi".to_owned(),
            size: 20.0,
            color: "black".to_owned(),
        }
    }
}
