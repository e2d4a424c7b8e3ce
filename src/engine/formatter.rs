// ============================================================================
// Formatter
// Primary operation: round a measurement and render it in one call
// ============================================================================

use crate::domain::{CentralValue, FormatOptions, Measurement, Uncertainties, Uncertainty};
use crate::engine::reconciler::reconcile;
use crate::engine::renderer::render;
use crate::interfaces::{DiagnosticSink, LoggingDiagnostics};
use crate::numeric::{NumericInput, RoundResult};
use std::sync::Arc;

/// Reusable formatter holding its options and diagnostic sink.
///
/// Options are read-only once built, so one formatter can be shared across
/// threads behind an `Arc`.
pub struct Formatter {
    /// Rounding and rendering configuration
    options: FormatOptions,

    /// Receives non-fatal diagnostics
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Formatter {
    /// Create a formatter; see [`create_from_options`](crate::engine::create_from_options)
    /// for the validating constructor.
    pub fn new(options: FormatOptions, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            options,
            diagnostics,
        }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format text tokens. Uncertainties carrying `+` or `-` are the upper
    /// and lower halves of an asymmetric pair.
    pub fn format<S: AsRef<str>>(&self, central: &str, uncertainties: &[S]) -> RoundResult<String> {
        let central = central.parse()?;
        let uncertainties = uncertainties
            .iter()
            .map(|token| token.as_ref().parse())
            .collect::<RoundResult<Uncertainties>>()?;
        self.format_parts(central, uncertainties, &self.options.labels)
    }

    /// Format host values (integers, floats, decimals or text).
    pub fn format_values<C, I, U>(&self, central: C, uncertainties: I) -> RoundResult<String>
    where
        C: Into<NumericInput>,
        I: IntoIterator<Item = U>,
        U: Into<NumericInput>,
    {
        let central = CentralValue::from_input(central)?;
        let uncertainties = uncertainties
            .into_iter()
            .map(Uncertainty::from_input)
            .collect::<RoundResult<Uncertainties>>()?;
        self.format_parts(central, uncertainties, &self.options.labels)
    }

    /// Format already-typed values with explicit labels.
    pub fn format_parts(
        &self,
        central: CentralValue,
        uncertainties: Uncertainties,
        labels: &[String],
    ) -> RoundResult<String> {
        format_with(
            central,
            uncertainties,
            labels,
            &self.options,
            self.diagnostics.as_ref(),
        )
    }
}

fn format_with(
    central: CentralValue,
    uncertainties: Uncertainties,
    labels: &[String],
    options: &FormatOptions,
    diagnostics: &dyn DiagnosticSink,
) -> RoundResult<String> {
    options.validate()?;
    let rounded = reconcile(central, uncertainties, options, diagnostics)?;
    Ok(render(&rounded, labels, options))
}

// ============================================================================
// Free Functions
// ============================================================================

/// Round and render text tokens, logging diagnostics through `tracing`.
///
/// # Example
/// ```
/// use pubround::prelude::*;
///
/// let options = FormatOptions::new().with_algorithm(RoundingAlgorithm::TwoDigit);
/// let text = pubround::engine::format("27.432", &["2.134", "0.125"], &options).unwrap();
/// assert_eq!(text, "27.4 ± 2.1 ± 0.1");
/// ```
pub fn format<S: AsRef<str>>(
    central: &str,
    uncertainties: &[S],
    options: &FormatOptions,
) -> RoundResult<String> {
    Formatter::new(options.clone(), Arc::new(LoggingDiagnostics)).format(central, uncertainties)
}

/// Round and render host values, logging diagnostics through `tracing`.
pub fn format_values<C, I, U>(
    central: C,
    uncertainties: I,
    options: &FormatOptions,
) -> RoundResult<String>
where
    C: Into<NumericInput>,
    I: IntoIterator<Item = U>,
    U: Into<NumericInput>,
{
    Formatter::new(options.clone(), Arc::new(LoggingDiagnostics))
        .format_values(central, uncertainties)
}

/// Round and render a [`Measurement`] with its own options. The measurement's
/// labels take over from the option labels when present.
pub fn format_measurement(
    measurement: &Measurement,
    diagnostics: &dyn DiagnosticSink,
) -> RoundResult<String> {
    let labels = if measurement.labels.is_empty() {
        &measurement.options.labels
    } else {
        &measurement.labels
    };
    format_with(
        measurement.central,
        measurement.uncertainties.clone(),
        labels,
        &measurement.options,
        diagnostics,
    )
}
