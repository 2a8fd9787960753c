use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Smallest accepted image edge in pixels.
pub const MIN_IMAGE_EDGE: u32 = 256;
/// Largest accepted image edge in pixels.
pub const MAX_IMAGE_EDGE: u32 = 4096;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Output", inline)]
#[serde(default)]
/// Image size, background plate and destination.
pub struct OutputOptions {
    /// Image width in pixels. Out-of-range widths (negative ones included)
    /// are rejected at compile time, not clamped.
    #[schemars(
        title = "Width",
        range(min = 256, max = 4096),
        extend("step" = 64)
    )]
    pub width: i64,
    /// Image height in pixels. Out-of-range heights are rejected at compile
    /// time, not clamped.
    #[schemars(
        title = "Height",
        range(min = 256, max = 4096),
        extend("step" = 64)
    )]
    pub height: i64,
    /// `white`, `black` or `custom`.
    #[schemars(title = "Background")]
    pub background: String,
    /// Background color used when `background = "custom"`.
    #[schemars(title = "Custom Background")]
    pub bg_custom: String,
    /// Where the PNG is written.
    #[schemars(skip)]
    pub path: PathBuf,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            background: "white".to_owned(),
            bg_custom: "white".to_owned(),
            path: PathBuf::from("render.png"),
        }
    }
}
