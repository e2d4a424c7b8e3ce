// ============================================================================
// Formatter Factory
// Creates formatters with validated configuration
// ============================================================================

use crate::domain::{FormatOptions, Mode, RoundingAlgorithm};
use crate::engine::Formatter;
use crate::interfaces::{DiagnosticSink, LoggingDiagnostics};
use crate::numeric::RoundResult;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a formatter from options
///
/// # Arguments
/// * `options` - Rounding and rendering configuration
/// * `diagnostics` - Sink for non-fatal diagnostics
///
/// # Example
/// ```
/// use pubround::prelude::*;
/// use std::sync::Arc;
///
/// let formatter = create_from_options(FormatOptions::latex(), Arc::new(NoOpDiagnostics)).unwrap();
/// assert_eq!(formatter.format("1.234", &["0.012"]).unwrap(), "1.234 \\pm 0.012");
/// ```
pub fn create_from_options(
    options: FormatOptions,
    diagnostics: Arc<dyn DiagnosticSink>,
) -> RoundResult<Formatter> {
    options.validate()?;
    Ok(Formatter::new(options, diagnostics))
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for formatters with a fluent API
///
/// # Example
/// ```
/// use pubround::prelude::*;
///
/// let formatter = FormatterBuilder::new()
///     .two_digit_rounding()
///     .precision_to_total_error()
///     .tex()
///     .with_labels(["(stat)", "(syst)"])
///     .build()
///     .unwrap();
/// assert_eq!(formatter.options().mode, Mode::Tex);
/// ```
pub struct FormatterBuilder {
    options: FormatOptions,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Default for FormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterBuilder {
    /// Start from the default options, logging diagnostics
    pub fn new() -> Self {
        Self {
            options: FormatOptions::default(),
            diagnostics: Arc::new(LoggingDiagnostics),
        }
    }

    /// Start from existing options
    pub fn from_options(options: FormatOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    // ========================================================================
    // Output Dialect
    // ========================================================================

    pub fn terminal(mut self) -> Self {
        self.options.mode = Mode::Terminal;
        self
    }

    pub fn tex(mut self) -> Self {
        self.options.mode = Mode::Tex;
        self
    }

    pub fn typst(mut self) -> Self {
        self.options.mode = Mode::Typst;
        self
    }

    pub fn gnuplot(mut self) -> Self {
        self.options.mode = Mode::Gnuplot;
        self
    }

    // ========================================================================
    // Rounding Configuration
    // ========================================================================

    /// Particle Data Group rounding (default)
    pub fn pdg_rounding(mut self) -> Self {
        self.options.algorithm = RoundingAlgorithm::Pdg;
        self
    }

    /// Two significant digits
    pub fn two_digit_rounding(mut self) -> Self {
        self.options.algorithm = RoundingAlgorithm::TwoDigit;
        self
    }

    /// Share the precision of the total (quadrature) error
    pub fn precision_to_total_error(mut self) -> Self {
        self.options.precision_to_total_error = true;
        self
    }

    /// Share the precision of the least precise error (default)
    pub fn precision_to_larger_error(mut self) -> Self {
        self.options.precision_to_larger_error = true;
        self
    }

    /// Round every value on its own
    pub fn independent_precision(mut self) -> Self {
        self.options.precision_to_total_error = false;
        self.options.precision_to_larger_error = false;
        self
    }

    /// Symmetrize asymmetric pairs closer than `threshold`
    pub fn symmetrize(mut self, threshold: f64) -> Self {
        self.options.symmetrize_errors = true;
        self.options.symmetrize_threshold = threshold;
        self
    }

    // ========================================================================
    // Rendering Configuration
    // ========================================================================

    pub fn factorize_powers(mut self) -> Self {
        self.options.factorize_powers = true;
        self
    }

    pub fn ascii(mut self) -> Self {
        self.options.no_utf8 = true;
        self
    }

    pub fn alternate_multiplication(mut self) -> Self {
        self.options.use_alternate_multiplication_symbol = true;
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Route diagnostics to `sink` instead of the log
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the formatter
    pub fn build(self) -> RoundResult<Formatter> {
        create_from_options(self.options, self.diagnostics)
    }

    /// Get the options without building (for inspection)
    pub fn get_options(&self) -> &FormatOptions {
        &self.options
    }
}
