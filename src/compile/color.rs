//! Color assignment: schemes, named colors, per-chain maps and spectra.

use super::selection::{is_plain, Selection};
use crate::diagnostics::Diagnostics;
use crate::keyword::keyword_enum;
use crate::options::ColorOptions;

/// Color substituted for an empty single color.
pub const DEFAULT_SINGLE_COLOR: &str = "deepsalmon";

keyword_enum! {
    /// Requested coloring mode.
    pub enum ColorMode {
        /// Distinct color per chain.
        Chain => "chain",
        /// CPK-style element colors.
        Element => "element",
        /// One color for the whole selection.
        Single => "single",
        /// Explicit per-chain mapping.
        Custom => "custom",
        /// Residue index gradient.
        Spectrum => "spectrum",
        /// Helix / sheet / loop colors.
        SecondaryStructure => "secondary_structure",
        /// Temperature factor gradient.
        BFactor => "b_factor",
        /// Hydropathy gradient.
        Hydrophobicity => "hydrophobicity",
    }
}

keyword_enum! {
    /// Built-in coloring schemes.
    pub enum ColorScheme {
        /// Distinct color per chain.
        Chain => "chain",
        /// Per-element colors on a grey base.
        Element => "element",
        /// Helix red, sheet yellow, loop green.
        SecondaryStructure => "secondary_structure",
    }
}

keyword_enum! {
    /// Gradient palette for spectrum coloring.
    pub enum SpectrumPalette {
        /// Full hue sweep.
        Rainbow => "rainbow",
        /// Blue through white to red.
        BlueWhiteRed => "blue_white_red",
        /// Green through white to magenta.
        GreenWhiteMagenta => "green_white_magenta",
        /// Cyan through white to yellow.
        CyanWhiteYellow => "cyan_white_yellow",
        /// Blue to green.
        BlueGreen => "blue_green",
        /// Yellow through cyan to white.
        YellowCyanWhite => "yellow_cyan_white",
    }
}

keyword_enum! {
    /// Quantity a spectrum is mapped over.
    pub enum SpectrumDomain {
        /// Residue index along the chain.
        ResidueIndex => "residue_index",
        /// Crystallographic B-factor.
        BFactor => "b_factor",
        /// Residue hydropathy.
        Hydropathy => "hydropathy",
    }
}

/// One entry of a per-chain color map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainColor {
    /// Chain identifier.
    pub chain: String,
    /// Named color.
    pub color: String,
}

/// Resolved coloring for the whole selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorAssignment {
    /// Built-in scheme.
    Scheme(ColorScheme),
    /// One named color.
    Single(String),
    /// Explicit chain colors, in the order given.
    PerChain(Vec<ChainColor>),
    /// Gradient over a per-atom quantity.
    Spectrum {
        /// Gradient colors.
        palette: SpectrumPalette,
        /// Quantity mapped.
        domain: SpectrumDomain,
    },
}

/// What a single color directive paints with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// Built-in scheme.
    Scheme(ColorScheme),
    /// Named color.
    Named(String),
    /// Gradient over a per-atom quantity.
    Spectrum {
        /// Gradient colors.
        palette: SpectrumPalette,
        /// Quantity mapped.
        domain: SpectrumDomain,
    },
}

impl ColorAssignment {
    /// Resolve `mode` against the color options, degrading soft fields.
    pub fn resolve(
        mode: ColorMode,
        opts: &ColorOptions,
        diag: &mut Diagnostics,
    ) -> Self {
        let spectrum = |domain, diag: &mut Diagnostics| Self::Spectrum {
            palette: palette(&opts.spectrum_palette, diag),
            domain,
        };
        match mode {
            ColorMode::Chain => Self::Scheme(ColorScheme::Chain),
            ColorMode::Element => Self::Scheme(ColorScheme::Element),
            ColorMode::SecondaryStructure => {
                Self::Scheme(ColorScheme::SecondaryStructure)
            }
            ColorMode::Single => Self::Single(diag.color(
                "color.single_color",
                &opts.single_color,
                DEFAULT_SINGLE_COLOR,
            )),
            ColorMode::Custom => {
                Self::PerChain(parse_per_chain(&opts.custom_per_chain, diag))
            }
            ColorMode::Spectrum => spectrum(SpectrumDomain::ResidueIndex, diag),
            ColorMode::BFactor => spectrum(SpectrumDomain::BFactor, diag),
            ColorMode::Hydrophobicity => {
                spectrum(SpectrumDomain::Hydropathy, diag)
            }
        }
    }

    /// Paint operations for `selection`, one per emitted directive.
    #[must_use]
    pub fn paints(&self, selection: &Selection) -> Vec<(Selection, Paint)> {
        match self {
            Self::Scheme(scheme) => {
                vec![(selection.clone(), Paint::Scheme(*scheme))]
            }
            Self::Single(color) => {
                vec![(selection.clone(), Paint::Named(color.clone()))]
            }
            Self::PerChain(entries) => entries
                .iter()
                .map(|e| {
                    (selection.chain(&e.chain), Paint::Named(e.color.clone()))
                })
                .collect(),
            Self::Spectrum { palette, domain } => vec![(
                selection.clone(),
                Paint::Spectrum {
                    palette: *palette,
                    domain: *domain,
                },
            )],
        }
    }
}

/// Whether `text` is usable as a color name: non-empty, plain and without
/// whitespace.
#[must_use]
pub fn is_color_name(text: &str) -> bool {
    !text.is_empty() && is_plain(text) && !text.contains(char::is_whitespace)
}

/// Parse `"A:cyan,B:green"` into chain colors, keeping order.
///
/// Empty segments are ignored. Segments without a colon, with an empty side,
/// with a chain id that is not alphanumeric or with a color that is not a
/// plain name are skipped with a warning.
pub fn parse_per_chain(raw: &str, diag: &mut Diagnostics) -> Vec<ChainColor> {
    let mut entries = Vec::new();
    for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let parsed = segment
            .split_once(':')
            .map(|(chain, color)| (chain.trim(), color.trim()))
            .filter(|(chain, color)| {
                !chain.is_empty()
                    && chain.chars().all(|c| c.is_ascii_alphanumeric())
                    && is_color_name(color)
            });
        match parsed {
            Some((chain, color)) => entries.push(ChainColor {
                chain: chain.to_owned(),
                color: color.to_owned(),
            }),
            None => diag.warn(
                "color.custom_per_chain",
                segment,
                "expected <chain>:<color>, segment skipped",
            ),
        }
    }
    entries
}

fn palette(raw: &str, diag: &mut Diagnostics) -> SpectrumPalette {
    SpectrumPalette::parse(raw).unwrap_or_else(|| {
        diag.warn(
            "color.spectrum_palette",
            raw,
            "unknown palette, using rainbow",
        );
        SpectrumPalette::Rainbow
    })
}
