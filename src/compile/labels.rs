//! Per-atom text labels.

use super::selection::Selection;
use super::ValidationError;
use crate::diagnostics::Diagnostics;
use crate::keyword::keyword_enum;
use crate::options::LabelOptions;

/// Selection labelled when none is given.
pub const DEFAULT_LABEL_SELECTION: &str = "name CA";

keyword_enum! {
    /// Per-atom text drawn by a label.
    pub enum LabelContent {
        /// Residue name.
        Resn => "resn",
        /// Residue number.
        Resi => "resi",
        /// Atom name.
        Name => "name",
        /// Chain identifier.
        Chain => "chain",
        /// B-factor.
        B => "b",
        /// `<resn>-<resi>`.
        Custom => "custom",
    }
}

impl LabelContent {
    /// Renderer expression evaluated per labelled atom.
    #[must_use]
    pub const fn expression(self) -> &'static str {
        match self {
            Self::Resn => "resn",
            Self::Resi => "resi",
            Self::Name => "name",
            Self::Chain => "chain",
            Self::B => "b",
            Self::Custom => "\"%s-%s\" % (resn, resi)",
        }
    }
}

/// Resolved label request.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    /// Atoms to label, already intersected with the render selection.
    pub selection: Selection,
    /// What each label shows.
    pub content: LabelContent,
    /// Font size (5..=100).
    pub size: f32,
    /// Text color.
    pub color: String,
}

impl LabelSpec {
    /// `None` unless labels are switched on.
    ///
    /// A label selection that could escape its directive is rejected even
    /// though the rest of the label block only degrades.
    pub fn resolve(
        opts: &LabelOptions,
        base: &Selection,
        diag: &mut Diagnostics,
    ) -> Result<Option<Self>, ValidationError> {
        if !opts.show {
            return Ok(None);
        }
        let own = Selection::parse(
            "labels.selection",
            &opts.selection,
            DEFAULT_LABEL_SELECTION,
        )?;
        let content = LabelContent::parse(&opts.content).unwrap_or_else(|| {
            diag.warn(
                "labels.content",
                &opts.content,
                "unknown label content, using resi",
            );
            LabelContent::Resi
        });
        let color = diag.color("labels.color", &opts.color, "black");
        Ok(Some(Self {
            selection: base.and(&own),
            content,
            size: diag.clamp_float(
                "labels.size",
                opts.size,
                (5.0, 100.0),
                20.0,
            ),
            color,
        }))
    }
}
