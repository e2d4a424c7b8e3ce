// ============================================================================
// Error Combiner
// Quadrature sum and symmetrization of uncertainties
// ============================================================================

use crate::domain::{ErrorShape, Uncertainty};
use crate::interfaces::{Diagnostic, DiagnosticSink};
use crate::numeric::{DecimalValue, RoundResult};
use smallvec::SmallVec;

/// Total uncertainty from [`quadrature_sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureSum {
    pub value: DecimalValue,
    /// False when asymmetric terms did not come in pairs
    pub reliable: bool,
}

/// Square root of the sum of squared uncertainties.
///
/// Asymmetric halves are averaged: each magnitude is halved before squaring,
/// and whenever a pair completes, half the running product of all halved
/// asymmetric magnitudes is added to stand in for the missing cross term.
/// Accumulation uses Kahan compensated summation.
///
/// A single uncertainty is returned unchanged; an empty list sums to zero.
/// Roots too large for the shortest decimal text to fit a u64 mantissa keep
/// at most 17 significant digits.
pub fn quadrature_sum(
    errors: &[Uncertainty],
    diagnostics: &dyn DiagnosticSink,
) -> RoundResult<QuadratureSum> {
    if let [single] = errors {
        return Ok(QuadratureSum {
            value: single.value,
            reliable: true,
        });
    }

    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;
    let mut asymmetric = 0usize;
    let mut product = 1.0f64;

    for error in errors {
        let mut magnitude = error.value.to_f64();
        let mut completes_pair = false;
        if error.shape.is_asymmetric() {
            asymmetric += 1;
            magnitude *= 0.5;
            product *= magnitude;
            completes_pair = asymmetric % 2 == 0;
        }

        let mut y = magnitude * magnitude - compensation;
        if completes_pair {
            y += 0.5 * product;
        }
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }

    let reliable = asymmetric % 2 == 0;
    if !reliable {
        diagnostics.on_diagnostic(Diagnostic::UnreliableTotalError);
    }

    Ok(QuadratureSum {
        value: DecimalValue::from_f64_magnitude(sum.sqrt())?,
        reliable,
    })
}

/// Replace adjacent asymmetric pairs whose magnitudes differ by less than
/// `threshold` (relative) with one symmetric uncertainty equal to their mean.
///
/// Pairs are formed from the end of the list and need one upper and one
/// lower half. An asymmetric entry whose neighbor is symmetric or has the
/// same shape, or that is left over at the front, is reported as
/// [`Diagnostic::UnpairedAsymmetric`] and kept as is.
///
/// Returns the input positions of the entries folded into their earlier
/// neighbor, last first.
///
/// # Errors
/// `MantissaOverflow` if a mean cannot be represented.
pub fn symmetrize_errors<A>(
    errors: &mut SmallVec<A>,
    threshold: f64,
    diagnostics: &dyn DiagnosticSink,
) -> RoundResult<SmallVec<[usize; 4]>>
where
    A: smallvec::Array<Item = Uncertainty>,
{
    let mut folded = SmallVec::new();
    let mut i = errors.len();
    while i > 0 {
        i -= 1;
        let later = errors[i];
        if !later.shape.is_asymmetric() {
            continue;
        }
        let pairs = i > 0 && {
            let shape = errors[i - 1].shape;
            shape.is_asymmetric() && shape != later.shape
        };
        if !pairs {
            diagnostics.on_diagnostic(Diagnostic::UnpairedAsymmetric);
            continue;
        }

        i -= 1;
        let earlier = errors[i];
        let e1 = later.value.to_f64();
        let e2 = earlier.value.to_f64();
        if (e1 / e2 - 1.0).abs() < threshold {
            let mean = DecimalValue::from_f64_magnitude(0.5 * (e1 + e2))?;
            errors[i] = Uncertainty::new(ErrorShape::Symmetric, mean);
            // Only later entries have shifted, so i + 1 is still the input position
            errors.remove(i + 1);
            folded.push(i + 1);
        }
    }
    Ok(folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Uncertainties;
    use crate::interfaces::{CollectingDiagnostics, NoOpDiagnostics};
    use proptest::prelude::*;

    fn errors(tokens: &[&str]) -> Uncertainties {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_quadrature_of_symmetric_errors() {
        let total = quadrature_sum(&errors(&["3", "4"]), &NoOpDiagnostics).unwrap();
        assert_eq!(total.value, DecimalValue::new(5, 0));
        assert!(total.reliable);
    }

    #[test]
    fn test_quadrature_single_error_unchanged() {
        let total = quadrature_sum(&errors(&["+0.3134"]), &NoOpDiagnostics).unwrap();
        assert_eq!(total.value, DecimalValue::new(3134, -4));
        assert!(total.reliable);
    }

    #[test]
    fn test_quadrature_empty_is_zero() {
        let total = quadrature_sum(&[], &NoOpDiagnostics).unwrap();
        assert!(total.value.is_zero());
    }

    #[test]
    fn test_quadrature_with_asymmetric_pair() {
        let total =
            quadrature_sum(&errors(&["+0.3134", "-0.292", "0.0124"]), &NoOpDiagnostics).unwrap();
        // 0.1567² + 0.146² + 0.5·0.1567·0.146 + 0.0124²
        let expected = (0.1567f64.powi(2) + 0.146f64.powi(2) + 0.5 * 0.1567 * 0.146
            + 0.0124f64.powi(2))
        .sqrt();
        assert!((total.value.to_f64() - expected).abs() < 1e-12);
        assert!(total.reliable);
    }

    #[test]
    fn test_quadrature_unpaired_is_unreliable() {
        let sink = CollectingDiagnostics::new();
        let total = quadrature_sum(&errors(&["+0.3", "0.4"]), &sink).unwrap();
        assert!(!total.reliable);
        assert_eq!(sink.take(), vec![Diagnostic::UnreliableTotalError]);
        // Halved upper term: sqrt(0.15² + 0.4²)
        let expected = (0.15f64.powi(2) + 0.16).sqrt();
        assert!((total.value.to_f64() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_quadrature_root_beyond_u64() {
        let big = "15000000000000000000";
        let total = quadrature_sum(&errors(&[big, big]), &NoOpDiagnostics).unwrap();
        let expected = 1.5e19 * 2f64.sqrt();
        assert!((total.value.to_f64() - expected).abs() <= expected * 1e-12);
        assert!(total.value.exponent() > 0);
    }

    #[test]
    fn test_symmetrize_close_pair() {
        let mut list = errors(&["+2.5", "-2.375", "0.05"]);
        let folded = symmetrize_errors(&mut list, 0.1, &NoOpDiagnostics).unwrap();
        assert_eq!(list.as_slice(), errors(&["2.4375", "0.05"]).as_slice());
        assert_eq!(folded.as_slice(), &[1]);
    }

    #[test]
    fn test_symmetrize_keeps_distant_pair() {
        let mut list = errors(&["+0.5", "-0.2"]);
        symmetrize_errors(&mut list, 0.1, &NoOpDiagnostics).unwrap();
        assert_eq!(list.as_slice(), errors(&["+0.5", "-0.2"]).as_slice());
    }

    #[test]
    fn test_symmetrize_threshold_is_strict() {
        // |3/4 - 1| = 0.25, not below 0.25
        let mut list = errors(&["+4", "-3"]);
        symmetrize_errors(&mut list, 0.25, &NoOpDiagnostics).unwrap();
        assert_eq!(list.len(), 2);

        symmetrize_errors(&mut list, 0.26, &NoOpDiagnostics).unwrap();
        assert_eq!(list.as_slice(), errors(&["3.5"]).as_slice());
    }

    #[test]
    fn test_symmetrize_reports_unpaired() {
        let sink = CollectingDiagnostics::new();
        let mut list = errors(&["0.1", "+0.3"]);
        symmetrize_errors(&mut list, 0.1, &sink).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(sink.take(), vec![Diagnostic::UnpairedAsymmetric]);

        let mut list = errors(&["-0.3", "0.1"]);
        symmetrize_errors(&mut list, 0.1, &sink).unwrap();
        assert_eq!(sink.take(), vec![Diagnostic::UnpairedAsymmetric]);
    }

    #[test]
    fn test_symmetrize_needs_opposite_halves() {
        let sink = CollectingDiagnostics::new();
        let mut list = errors(&["+0.3", "+0.29"]);
        let folded = symmetrize_errors(&mut list, 0.1, &sink).unwrap();
        assert!(folded.is_empty());
        assert_eq!(list.as_slice(), errors(&["+0.3", "+0.29"]).as_slice());
        assert_eq!(sink.len(), 2);
        assert!(sink.contains(&Diagnostic::UnpairedAsymmetric));

        // The stray upper half does not block the pair before it
        let mut list = errors(&["-0.5", "+0.5625", "+0.3"]);
        let folded = symmetrize_errors(&mut list, 0.2, &sink).unwrap();
        assert_eq!(list.as_slice(), errors(&["0.53125", "+0.3"]).as_slice());
        assert_eq!(folded.as_slice(), &[1]);
    }

    #[test]
    fn test_symmetrize_multiple_pairs() {
        let mut list = errors(&["+4", "-3.75", "0.2", "+2", "-2.125"]);
        let folded = symmetrize_errors(&mut list, 0.1, &NoOpDiagnostics).unwrap();
        assert_eq!(list.as_slice(), errors(&["3.875", "0.2", "2.0625"]).as_slice());
        assert_eq!(folded.as_slice(), &[4, 1]);
    }

    fn shaped() -> impl Strategy<Value = Uncertainty> {
        (1u64..2000, -3i32..2, 0u8..3).prop_map(|(mantissa, exponent, shape)| {
            let shape = match shape {
                0 => ErrorShape::Symmetric,
                1 => ErrorShape::Upper,
                _ => ErrorShape::Lower,
            };
            Uncertainty::new(shape, DecimalValue::new(mantissa, exponent))
        })
    }

    proptest! {
        #[test]
        fn symmetrization_is_idempotent(list in proptest::collection::vec(shaped(), 0..8)) {
            let mut once: Uncertainties = list.into_iter().collect();
            symmetrize_errors(&mut once, 0.1, &NoOpDiagnostics).unwrap();
            let mut twice = once.clone();
            symmetrize_errors(&mut twice, 0.1, &NoOpDiagnostics).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn quadrature_of_symmetric_matches_hypot(a in 1u64..10_000, b in 1u64..10_000) {
            let list: Uncertainties = [a, b]
                .iter()
                .map(|m| Uncertainty::symmetric(DecimalValue::new(*m, -2)))
                .collect();
            let total = quadrature_sum(&list, &NoOpDiagnostics).unwrap();
            let expected = (a as f64 / 100.0).hypot(b as f64 / 100.0);
            prop_assert!((total.value.to_f64() - expected).abs() <= expected * 1e-12);
        }
    }
}
