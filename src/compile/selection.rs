//! Atom selection expressions.

use std::fmt;

use super::ValidationError;

/// Selection that matches every atom.
pub const ALL: &str = "all";

/// Characters that end a script command, split its arguments or close a
/// quoted string.
const SCRIPT_DELIMITERS: [char; 4] = [';', ',', '"', '`'];

/// Whether `text` stays inside a single script argument: no control
/// characters and no [`SCRIPT_DELIMITERS`].
#[must_use]
pub fn is_plain(text: &str) -> bool {
    !text
        .chars()
        .any(|c| c.is_control() || SCRIPT_DELIMITERS.contains(&c))
}

/// A normalized atom selection expression.
///
/// Opaque beyond trimming: syntax errors are only detected by the renderer.
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection(String);

impl Selection {
    /// Trim `raw`, defaulting to `all` when nothing is left.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self::normalize_or(raw, ALL)
    }

    /// Like [`Selection::normalize_or`], but rejects text that would escape
    /// its directive once written into a script.
    pub fn parse(
        field: &str,
        raw: &str,
        fallback: &str,
    ) -> Result<Self, ValidationError> {
        if is_plain(raw) {
            Ok(Self::normalize_or(raw, fallback))
        } else {
            Err(ValidationError::new(
                field,
                raw,
                "selection must not contain control characters or any of \
                 ; , \" `",
            ))
        }
    }

    /// Trim `raw`, defaulting to `fallback` when nothing is left.
    #[must_use]
    pub fn normalize_or(raw: &str, fallback: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            let fallback = fallback.trim();
            Self(if fallback.is_empty() { ALL } else { fallback }.to_owned())
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// The whole structure.
    #[must_use]
    pub fn all() -> Self {
        Self(ALL.to_owned())
    }

    /// Whether this selects everything.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0.eq_ignore_ascii_case(ALL)
    }

    /// Expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Intersection with another expression.
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        match (self.is_all(), other.is_all()) {
            (true, _) => other.clone(),
            (false, true) => self.clone(),
            (false, false) => Self(format!("({}) and ({})", self.0, other.0)),
        }
    }

    /// This selection restricted to one chain.
    #[must_use]
    pub fn chain(&self, chain_id: &str) -> Self {
        self.and(&Self(format!("chain {chain_id}")))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_selection_becomes_all() {
        assert_eq!(Selection::normalize("   "), Selection::all());
        assert_eq!(Selection::normalize(""), Selection::all());
        assert_eq!(Selection::normalize(" chain A ").as_str(), "chain A");
    }

    #[test]
    fn fallback_is_used_only_when_blank() {
        assert_eq!(Selection::normalize_or("", "name CA").as_str(), "name CA");
        assert_eq!(
            Selection::normalize_or("resi 5", "name CA").as_str(),
            "resi 5"
        );
        assert!(Selection::normalize_or("", "  ").is_all());
    }

    #[test]
    fn command_separators_are_rejected() {
        for raw in [
            "chain A\nsystem touch /tmp/x",
            "chain A; system id",
            "chain A), state",
            "chain A\") or (\"",
            "resi 1\r",
        ] {
            let err = Selection::parse("selection", raw, ALL).unwrap_err();
            assert_eq!(err.field, "selection");
            assert_eq!(err.value, raw);
        }
        assert_eq!(
            Selection::parse("selection", " chain A and resi 1-10 ", ALL)
                .unwrap()
                .as_str(),
            "chain A and resi 1-10"
        );
        assert!(Selection::parse("selection", "", ALL).unwrap().is_all());
    }

    #[test]
    fn intersection_skips_all() {
        let all = Selection::all();
        let a = Selection::normalize("chain A");
        assert_eq!(all.and(&a), a);
        assert_eq!(a.and(&all), a);
        assert_eq!(
            a.and(&Selection::normalize("resi 1-10")).as_str(),
            "(chain A) and (resi 1-10)"
        );
        assert_eq!(all.chain("B").as_str(), "chain B");
        assert_eq!(
            Selection::normalize("resi 1-50").chain("B").as_str(),
            "(resi 1-50) and (chain B)"
        );
    }
}
