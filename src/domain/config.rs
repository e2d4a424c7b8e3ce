// ============================================================================
// Formatting Configuration
// Output dialect, rounding rule and precision policy for one formatting call
// ============================================================================

use crate::numeric::{RoundError, RoundResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Display Mode
// ============================================================================

/// Output dialect; selects the symbol table used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Plain terminal text with Unicode symbols
    #[default]
    Terminal,
    /// LaTeX math
    Tex,
    /// typst math
    Typst,
    /// gnuplot enhanced-text labels
    Gnuplot,
}

impl Mode {
    /// Math-like dialects wrap asymmetric uncertainties in super/subscripts.
    #[inline]
    pub fn is_math(self) -> bool {
        !matches!(self, Mode::Terminal)
    }
}

// ============================================================================
// Rounding Algorithm
// ============================================================================

/// Significant-digit rounding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoundingAlgorithm {
    /// Particle Data Group convention (1 or 2 digits by magnitude band)
    #[default]
    Pdg,
    /// Always two significant digits, round half up
    TwoDigit,
}

// ============================================================================
// Format Options
// ============================================================================

/// Default threshold below which an asymmetric pair is symmetrized (10%)
pub const DEFAULT_SYMMETRIZE_THRESHOLD: f64 = 0.10;

/// Complete configuration for one formatting call
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Output dialect
    pub mode: Mode,

    /// Significant-digit rounding rule
    pub algorithm: RoundingAlgorithm,

    /// Collapse asymmetric pairs whose halves differ by less than the threshold
    pub symmetrize_errors: bool,

    /// Relative difference below which a pair is symmetrized
    pub symmetrize_threshold: f64,

    /// Shared exponent from the quadrature sum of all uncertainties.
    /// Takes precedence over `precision_to_larger_error`.
    pub precision_to_total_error: bool,

    /// Shared exponent from the least precise uncertainty
    pub precision_to_larger_error: bool,

    /// Factor a power of ten out of the whole expression
    pub factorize_powers: bool,

    /// ASCII replacements for the multiplication and plus-minus glyphs
    pub no_utf8: bool,

    /// "·" instead of "×"
    pub use_alternate_multiplication_symbol: bool,

    /// One label per symmetric uncertainty or asymmetric pair
    pub labels: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Terminal,
            algorithm: RoundingAlgorithm::Pdg,
            symmetrize_errors: false,
            symmetrize_threshold: DEFAULT_SYMMETRIZE_THRESHOLD,
            precision_to_total_error: false,
            precision_to_larger_error: true,
            factorize_powers: false,
            no_utf8: false,
            use_alternate_multiplication_symbol: false,
            labels: Vec::new(),
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set the output dialect
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: Set the rounding rule
    pub fn with_algorithm(mut self, algorithm: RoundingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Builder method: Enable or disable symmetrization
    pub fn with_symmetrize_errors(mut self, enabled: bool) -> Self {
        self.symmetrize_errors = enabled;
        self
    }

    /// Builder method: Set the symmetrization threshold (a fraction, 0.1 = 10%)
    pub fn with_symmetrize_threshold(mut self, threshold: f64) -> Self {
        self.symmetrize_threshold = threshold;
        self
    }

    /// Builder method: Take the precision from the total error
    pub fn with_precision_to_total_error(mut self, enabled: bool) -> Self {
        self.precision_to_total_error = enabled;
        self
    }

    /// Builder method: Take the precision from the larger error
    pub fn with_precision_to_larger_error(mut self, enabled: bool) -> Self {
        self.precision_to_larger_error = enabled;
        self
    }

    /// Builder method: Factor out the power of ten
    pub fn with_factorize_powers(mut self, enabled: bool) -> Self {
        self.factorize_powers = enabled;
        self
    }

    /// Builder method: ASCII-only symbols
    pub fn with_no_utf8(mut self, enabled: bool) -> Self {
        self.no_utf8 = enabled;
        self
    }

    /// Builder method: Use the alternate multiplication symbol
    pub fn with_alternate_multiplication_symbol(mut self, enabled: bool) -> Self {
        self.use_alternate_multiplication_symbol = enabled;
        self
    }

    /// Builder method: Set the labels
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Diagnostics stay quiet for the terminal + factorized combination.
    #[inline]
    pub fn quiet_diagnostics(&self) -> bool {
        self.mode == Mode::Terminal && self.factorize_powers
    }

    /// Validate the configuration
    pub fn validate(&self) -> RoundResult<()> {
        if !self.symmetrize_threshold.is_finite() || self.symmetrize_threshold <= 0.0 {
            return Err(RoundError::InvalidThreshold);
        }
        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl FormatOptions {
    /// LaTeX math output with default rounding
    pub fn latex() -> Self {
        Self::new().with_mode(Mode::Tex)
    }

    /// typst math output with default rounding
    pub fn typst() -> Self {
        Self::new().with_mode(Mode::Typst)
    }

    /// gnuplot label output with default rounding
    pub fn gnuplot() -> Self {
        Self::new().with_mode(Mode::Gnuplot)
    }

    /// Two significant digits, precision from the total (quadrature) error
    pub fn combined() -> Self {
        Self::new()
            .with_algorithm(RoundingAlgorithm::TwoDigit)
            .with_precision_to_total_error(true)
    }

    /// Starting point of the compact flag mini-protocol and of
    /// [`Measurement`](crate::domain::Measurement)
    pub fn measurement_defaults() -> Self {
        Self::combined()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FormatOptions::default();
        assert_eq!(options.mode, Mode::Terminal);
        assert_eq!(options.algorithm, RoundingAlgorithm::Pdg);
        assert!(options.precision_to_larger_error);
        assert!(!options.precision_to_total_error);
        assert!(!options.symmetrize_errors);
        assert!(!options.factorize_powers);
        assert_eq!(options.symmetrize_threshold, 0.10);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let options = FormatOptions::latex()
            .with_algorithm(RoundingAlgorithm::TwoDigit)
            .with_labels(["(stat)", "(syst)"])
            .with_factorize_powers(true);

        assert_eq!(options.mode, Mode::Tex);
        assert_eq!(options.labels, vec!["(stat)", "(syst)"]);
        assert!(!options.quiet_diagnostics());
    }

    #[test]
    fn test_quiet_diagnostics() {
        let options = FormatOptions::new().with_factorize_powers(true);
        assert!(options.quiet_diagnostics());
        assert!(!FormatOptions::new().quiet_diagnostics());
    }

    #[test]
    fn test_validation() {
        let options = FormatOptions::new().with_symmetrize_threshold(0.0);
        assert_eq!(options.validate(), Err(RoundError::InvalidThreshold));

        let options = FormatOptions::new().with_symmetrize_threshold(f64::NAN);
        assert_eq!(options.validate(), Err(RoundError::InvalidThreshold));
    }

    #[test]
    fn test_preset_configs() {
        let combined = FormatOptions::combined();
        assert_eq!(combined.algorithm, RoundingAlgorithm::TwoDigit);
        assert!(combined.precision_to_total_error);

        assert_eq!(FormatOptions::typst().mode, Mode::Typst);
        assert_eq!(FormatOptions::gnuplot().mode, Mode::Gnuplot);
        assert!(Mode::Gnuplot.is_math());
        assert!(!Mode::Terminal.is_math());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let options = FormatOptions::latex().with_labels(["(stat)"]);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"tex\""));
        let back: FormatOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);

        let partial: FormatOptions = serde_json::from_str(r#"{"algorithm":"two_digit"}"#).unwrap();
        assert_eq!(partial.algorithm, RoundingAlgorithm::TwoDigit);
        assert!(partial.precision_to_larger_error);
    }
}
