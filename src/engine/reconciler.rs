// ============================================================================
// Precision Reconciler
// Chooses one shared decimal place for a central value and its uncertainties
// ============================================================================

use crate::domain::{CentralValue, FormatOptions, Uncertainties};
use crate::engine::combiner::{quadrature_sum, symmetrize_errors};
use crate::engine::rounding::{round_to_exponent, rounding_rule};
use crate::interfaces::{DiagnosticSink, NoOpDiagnostics};
use crate::numeric::RoundResult;
use smallvec::SmallVec;

/// Central value and uncertainties after rounding, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedMeasurement {
    pub central: CentralValue,
    pub uncertainties: Uncertainties,
    /// Exponent every value was aligned to, if precision was shared
    pub shared_exponent: Option<i32>,
    /// Input position of each entry in `uncertainties`
    pub origins: SmallVec<[usize; 4]>,
    /// Number of uncertainties before symmetrization
    pub input_len: usize,
}

impl RoundedMeasurement {
    /// A measurement whose uncertainties are exactly the input list.
    pub fn new(
        central: CentralValue,
        uncertainties: Uncertainties,
        shared_exponent: Option<i32>,
    ) -> Self {
        let input_len = uncertainties.len();
        Self {
            central,
            uncertainties,
            shared_exponent,
            origins: (0..input_len).collect(),
            input_len,
        }
    }

    /// True if the input list held any asymmetric entry, merged or not.
    pub fn had_asymmetric_input(&self) -> bool {
        self.uncertainties.len() < self.input_len
            || self.uncertainties.iter().any(|u| u.shape.is_asymmetric())
    }
}

/// Round a measurement according to `options`.
///
/// 1. Optionally symmetrize near-equal asymmetric pairs.
/// 2. With `precision_to_total_error`, the rounded quadrature sum fixes the
///    shared exponent.
/// 3. Otherwise, with `precision_to_larger_error`, every uncertainty is rounded
///    on its own and the coarsest exponent is shared.
/// 4. A shared exponent is applied to everything with [`round_to_exponent`];
///    without one each value is rounded independently by the rule.
///
/// Diagnostics are dropped in terminal mode with factorized powers.
pub fn reconcile(
    mut central: CentralValue,
    mut uncertainties: Uncertainties,
    options: &FormatOptions,
    diagnostics: &dyn DiagnosticSink,
) -> RoundResult<RoundedMeasurement> {
    let diagnostics: &dyn DiagnosticSink = if options.quiet_diagnostics() {
        &NoOpDiagnostics
    } else {
        diagnostics
    };
    let rule = rounding_rule(options.algorithm);

    let input_len = uncertainties.len();
    let origins: SmallVec<[usize; 4]> = if options.symmetrize_errors {
        let folded = symmetrize_errors(
            &mut uncertainties,
            options.symmetrize_threshold,
            diagnostics,
        )?;
        (0..input_len).filter(|i| !folded.contains(i)).collect()
    } else {
        (0..input_len).collect()
    };

    let shared_exponent = if uncertainties.is_empty() {
        None
    } else if options.precision_to_total_error {
        let total = quadrature_sum(&uncertainties, diagnostics)?;
        Some(rule.round(total.value, diagnostics)?.exponent())
    } else if options.precision_to_larger_error {
        for uncertainty in uncertainties.iter_mut() {
            uncertainty.value = rule.round(uncertainty.value, diagnostics)?;
        }
        uncertainties.iter().map(|u| u.value.exponent()).max()
    } else {
        None
    };

    match shared_exponent {
        Some(exponent) => {
            central.value = round_to_exponent(central.value, exponent)?;
            for uncertainty in uncertainties.iter_mut() {
                uncertainty.value = round_to_exponent(uncertainty.value, exponent)?;
            }
        }
        None => {
            central.value = rule.round(central.value, diagnostics)?;
            for uncertainty in uncertainties.iter_mut() {
                uncertainty.value = rule.round(uncertainty.value, diagnostics)?;
            }
        }
    }

    tracing::trace!(
        rule = rule.name(),
        ?shared_exponent,
        central = %central,
        "reconciled precision"
    );

    Ok(RoundedMeasurement {
        central,
        uncertainties,
        shared_exponent,
        origins,
        input_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mode, RoundingAlgorithm};
    use crate::interfaces::{CollectingDiagnostics, Diagnostic};
    use crate::numeric::{DecimalValue, RoundError};

    fn run(
        central: &str,
        uncertainties: &[&str],
        options: &FormatOptions,
    ) -> RoundResult<RoundedMeasurement> {
        let central = central.parse()?;
        let uncertainties = uncertainties
            .iter()
            .map(|t| t.parse())
            .collect::<RoundResult<Uncertainties>>()?;
        reconcile(central, uncertainties, options, &NoOpDiagnostics)
    }

    fn texts(rounded: &RoundedMeasurement) -> Vec<String> {
        std::iter::once(rounded.central.to_string())
            .chain(rounded.uncertainties.iter().map(|u| u.to_string()))
            .collect()
    }

    #[test]
    fn test_larger_error_precision() {
        let options = FormatOptions::new().with_algorithm(RoundingAlgorithm::TwoDigit);
        let rounded = run("27.432", &["2.134", "0.125"], &options).unwrap();
        assert_eq!(rounded.shared_exponent, Some(-1));
        assert_eq!(texts(&rounded), vec!["27.4", "2.1", "0.1"]);
    }

    #[test]
    fn test_total_error_precision() {
        let options = FormatOptions::combined();
        let rounded = run("27.462", &["+0.3134", "-0.292", "0.0124"], &options).unwrap();
        assert_eq!(rounded.shared_exponent, Some(-2));
        assert_eq!(texts(&rounded), vec!["27.46", "+0.31", "-0.29", "0.01"]);
    }

    #[test]
    fn test_total_error_takes_precedence() {
        let options = FormatOptions::new();
        let rounded = run("10.1234", &["0.3", "0.3"], &options).unwrap();
        assert_eq!(rounded.shared_exponent, Some(-2));
        assert_eq!(texts(&rounded), vec!["10.12", "0.30", "0.30"]);

        // sqrt(0.18) = 0.424... -> PDG 4e-1, even though larger-error is still on
        let options = options.with_precision_to_total_error(true);
        let rounded = run("10.1234", &["0.3", "0.3"], &options).unwrap();
        assert_eq!(rounded.shared_exponent, Some(-1));
        assert_eq!(texts(&rounded), vec!["10.1", "0.3", "0.3"]);
    }

    #[test]
    fn test_independent_rounding() {
        let options = FormatOptions::new().with_precision_to_larger_error(false);
        let rounded = run("27.432", &["2.134", "0.125"], &options).unwrap();
        assert_eq!(rounded.shared_exponent, None);
        // PDG on each value separately: 274 keeps two digits
        assert_eq!(texts(&rounded), vec!["27", "2.1", "0.13"]);

        // 474 falls in the one-digit band and rounds up
        let rounded = run("47.432", &["2.134", "0.125"], &options).unwrap();
        assert_eq!(texts(&rounded), vec!["50", "2.1", "0.13"]);
    }

    #[test]
    fn test_no_uncertainties_rounds_central_alone() {
        let options = FormatOptions::new().with_algorithm(RoundingAlgorithm::TwoDigit);
        let rounded = run("27.432", &[], &options).unwrap();
        assert_eq!(rounded.shared_exponent, None);
        assert_eq!(texts(&rounded), vec!["27"]);
    }

    #[test]
    fn test_symmetrize_before_rounding() {
        let options = FormatOptions::new().with_symmetrize_errors(true);
        let rounded = run("10.000", &["+2.5", "-2.375"], &options).unwrap();
        assert_eq!(rounded.uncertainties.len(), 1);
        // mean 2.4375 -> PDG 2.4
        assert_eq!(texts(&rounded), vec!["10.0", "2.4"]);
        assert_eq!(rounded.input_len, 2);
        assert!(rounded.had_asymmetric_input());
    }

    #[test]
    fn test_symmetrize_tracks_input_positions() {
        let options = FormatOptions::new().with_symmetrize_errors(true);
        let rounded = run("10.000", &["0.1", "+2.5", "-2.375", "+0.5", "-0.2"], &options).unwrap();
        assert_eq!(texts(&rounded), vec!["10.0", "0.1", "2.4", "+0.5", "-0.2"]);
        assert_eq!(rounded.origins.as_slice(), &[0, 1, 3, 4]);
        assert_eq!(rounded.input_len, 5);

        let rounded = run("10.000", &["0.1", "0.2"], &options).unwrap();
        assert_eq!(rounded.origins.as_slice(), &[0, 1]);
        assert!(!rounded.had_asymmetric_input());
    }

    #[test]
    fn test_central_coarser_than_shared_precision_fails() {
        let options = FormatOptions::new();
        assert_eq!(
            run("27", &["0.5"], &options),
            Err(RoundError::CoarserPrecision {
                exponent: 0,
                target: -1
            })
        );
    }

    #[test]
    fn test_diagnostics_reported() {
        let sink = CollectingDiagnostics::new();
        let central = "12.34".parse().unwrap();
        let uncertainties: Uncertainties = ["0.5"].iter().map(|t| t.parse().unwrap()).collect();
        reconcile(central, uncertainties, &FormatOptions::new(), &sink).unwrap();
        assert_eq!(sink.take(), vec![Diagnostic::PaddedWithZeros { mantissa: 5 }]);
    }

    #[test]
    fn test_diagnostics_quiet_in_factorized_terminal_mode() {
        let sink = CollectingDiagnostics::new();
        let options = FormatOptions::new().with_factorize_powers(true);
        let central = "12.34".parse().unwrap();
        let uncertainties: Uncertainties = ["0.5"].iter().map(|t| t.parse().unwrap()).collect();
        reconcile(central, uncertainties.clone(), &options, &sink).unwrap();
        assert!(sink.is_empty());

        let options = options.with_mode(Mode::Tex);
        reconcile(central, uncertainties, &options, &sink).unwrap();
        assert!(!sink.is_empty());
    }

    #[test]
    fn test_uncertainty_values_are_exact() {
        let options = FormatOptions::new();
        let rounded = run("1.23456", &["0.0123"], &options).unwrap();
        assert_eq!(
            rounded.uncertainties[0].value,
            DecimalValue::new(12, -3)
        );
        assert_eq!(rounded.central.value, DecimalValue::new(1235, -3));
    }
}
