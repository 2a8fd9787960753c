//! Non-fatal degradations recorded while resolving a request.
//!
//! Fields with a sensible default never abort a render. Instead the
//! offending value is replaced and a [`Warning`] is recorded here (and
//! logged at `warn` level) so callers can surface it next to the image.

use std::fmt;

use crate::compile::is_color_name;

/// One degraded field: what was supplied and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Option name, dotted by section (e.g. `geometry.stick_radius`).
    pub field: String,
    /// The value as supplied by the caller.
    pub value: String,
    /// What was substituted and why.
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:?}: {}", self.field, self.value, self.message)
    }
}

/// Ordered collector of [`Warning`]s plus the clamping helpers that feed it.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a degradation for `field`.
    pub fn warn(
        &mut self,
        field: &str,
        value: impl fmt::Display,
        message: impl Into<String>,
    ) {
        let warning = Warning {
            field: field.to_owned(),
            value: value.to_string(),
            message: message.into(),
        };
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Trimmed color name from `raw`, or `fallback` with a warning when the
    /// name is empty or could not be written into a script as one word.
    pub fn color(&mut self, field: &str, raw: &str, fallback: &str) -> String {
        let color = raw.trim();
        if color.is_empty() {
            self.warn(field, raw, format!("empty color, using {fallback}"));
            fallback.to_owned()
        } else if is_color_name(color) {
            color.to_owned()
        } else {
            self.warn(
                field,
                raw,
                format!("not a plain color name, using {fallback}"),
            );
            fallback.to_owned()
        }
    }

    /// Clamp an integer option into `[min, max]`, warning when it moved.
    pub fn clamp_int(
        &mut self,
        field: &str,
        value: i32,
        min: i32,
        max: i32,
    ) -> i32 {
        let clamped = value.clamp(min, max);
        if clamped != value {
            self.warn(
                field,
                value,
                format!("outside {min}..={max}, clamped to {clamped}"),
            );
        }
        clamped
    }

    /// Clamp a float option into `[min, max]`, warning when it moved.
    ///
    /// Non-finite input cannot be clamped meaningfully and is replaced by
    /// `default`.
    pub fn clamp_float(
        &mut self,
        field: &str,
        value: f32,
        (min, max): (f32, f32),
        default: f32,
    ) -> f32 {
        if !value.is_finite() {
            self.warn(
                field,
                value,
                format!("not a finite number, using {default}"),
            );
            return default;
        }
        let clamped = value.clamp(min, max);
        if clamped != value {
            self.warn(
                field,
                value,
                format!("outside {min}..={max}, clamped to {clamped}"),
            );
        }
        clamped
    }

    /// Warnings recorded so far, in order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Whether any warning was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consume the collector, yielding its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_values_pass_silently() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.clamp_float("a", 0.5, (0.0, 1.0), 0.0), 0.5);
        assert_eq!(diag.clamp_int("b", 3, 1, 5), 3);
        assert!(diag.is_empty());
    }

    #[test]
    fn out_of_range_values_clamp_and_warn() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.clamp_float("a", 7.0, (0.0, 1.0), 0.0), 1.0);
        assert_eq!(diag.clamp_int("b", -4, 1, 5), 1);
        let warnings = diag.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].field, "a");
        assert_eq!(warnings[0].value, "7");
        assert_eq!(warnings[1].value, "-4");
    }

    #[test]
    fn color_names_are_trimmed_or_replaced() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.color("c", " grey20 ", "white"), "grey20");
        assert!(diag.is_empty());
        assert_eq!(diag.color("c", "", "white"), "white");
        assert_eq!(diag.color("c", "red;system id", "white"), "white");
        assert_eq!(diag.color("c", "0xff0000\nquit", "white"), "white");
        let warnings = diag.into_warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].message.starts_with("empty color"));
        assert!(warnings[1].message.starts_with("not a plain color name"));
    }

    #[test]
    fn nan_falls_back_to_default() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.clamp_float("a", f32::NAN, (0.0, 1.0), 0.25), 0.25);
        assert_eq!(diag.warnings().len(), 1);
    }
}
