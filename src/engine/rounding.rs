// ============================================================================
// Rounding Algorithms
// Digit-exact significant-digit rounding on mantissa/exponent pairs
// ============================================================================
//
// Nothing here touches floating point: every step is integer division or
// multiplication of the mantissa with the opposite exponent adjustment, so
// the only rounding error is the intended rounding decision.

use crate::domain::RoundingAlgorithm;
use crate::interfaces::{Diagnostic, DiagnosticSink, RoundingRule};
use crate::numeric::{DecimalValue, RoundError, RoundResult};

/// Decimal digit count of a non-negative integer; `0` has one digit.
#[inline]
pub fn digit_count(mantissa: u64) -> u32 {
    match mantissa.checked_ilog10() {
        Some(log) => log + 1,
        None => 1,
    }
}

/// Scale to exactly three significant digits.
///
/// Short mantissas are padded with zeros (reported as
/// [`Diagnostic::PaddedWithZeros`]); long ones are truncated, the actual
/// rounding happens in the rule applied afterwards.
pub fn reduce_to_three_significant_digits(
    value: DecimalValue,
    diagnostics: &dyn DiagnosticSink,
) -> DecimalValue {
    let mut mantissa = value.mantissa();
    let mut exponent = value.exponent();

    match digit_count(mantissa) {
        1 => {
            diagnostics.on_diagnostic(Diagnostic::PaddedWithZeros { mantissa });
            mantissa *= 100;
            exponent -= 2;
        }
        2 => {
            diagnostics.on_diagnostic(Diagnostic::PaddedWithZeros { mantissa });
            mantissa *= 10;
            exponent -= 1;
        }
        digits => {
            for _ in 3..digits {
                mantissa /= 10;
                exponent += 1;
            }
        }
    }

    DecimalValue::new(mantissa, exponent)
}

/// Particle Data Group rule on a three-digit mantissa.
///
/// | mantissa  | result                                   |
/// |-----------|------------------------------------------|
/// | 100..=354 | two digits, last digit rounded half up    |
/// | 355..=949 | one digit, tens digit rounded half up     |
/// | 950..=999 | `10` at the next power of ten             |
///
/// # Errors
/// `NotThreeDigits` if the mantissa is not in `100..=999`.
pub fn pdg_rule(value: DecimalValue) -> RoundResult<DecimalValue> {
    let mantissa = value.mantissa();
    let exponent = value.exponent();

    match mantissa {
        100..=354 => {
            let rounded = mantissa / 10 + u64::from(mantissa % 10 >= 5);
            Ok(DecimalValue::new(rounded, exponent + 1))
        }
        355..=949 => {
            let rounded = mantissa / 100 + u64::from((mantissa / 10) % 10 >= 5);
            Ok(DecimalValue::new(rounded, exponent + 2))
        }
        950..=999 => Ok(DecimalValue::new(10, exponent + 2)),
        _ => Err(RoundError::NotThreeDigits { mantissa }),
    }
}

/// Three significant digits, then the PDG rule.
pub fn pdg_round(
    value: DecimalValue,
    diagnostics: &dyn DiagnosticSink,
) -> RoundResult<DecimalValue> {
    pdg_rule(reduce_to_three_significant_digits(value, diagnostics))
}

/// Three significant digits, then round half up to two.
///
/// A carry out of `99` is renormalized to `10` at the next exponent so the
/// result always has exactly two significant digits.
pub fn two_digit_round(value: DecimalValue, diagnostics: &dyn DiagnosticSink) -> DecimalValue {
    let three = reduce_to_three_significant_digits(value, diagnostics);
    let mantissa = three.mantissa();
    let rounded = mantissa / 10 + u64::from(mantissa % 10 >= 5);

    if rounded == 100 {
        DecimalValue::new(10, three.exponent() + 2)
    } else {
        DecimalValue::new(rounded, three.exponent() + 1)
    }
}

/// Round to the decimal place `10^target`.
///
/// Drops one digit at a time and rounds half up on the last digit dropped.
///
/// # Errors
/// `CoarserPrecision` if the value's exponent is already above `target`:
/// the missing digits cannot be made up.
pub fn round_to_exponent(value: DecimalValue, target: i32) -> RoundResult<DecimalValue> {
    let mut mantissa = value.mantissa();
    let mut exponent = value.exponent();

    if exponent > target {
        return Err(RoundError::CoarserPrecision { exponent, target });
    }

    let mut dropped = 0;
    while exponent < target {
        dropped = mantissa % 10;
        mantissa /= 10;
        exponent += 1;
    }
    if dropped >= 5 {
        mantissa += 1;
    }

    Ok(DecimalValue::new(mantissa, exponent))
}

// ============================================================================
// Rule Strategies
// ============================================================================

/// PDG rounding strategy
pub struct PdgRounding;

impl RoundingRule for PdgRounding {
    fn round(
        &self,
        value: DecimalValue,
        diagnostics: &dyn DiagnosticSink,
    ) -> RoundResult<DecimalValue> {
        pdg_round(value, diagnostics)
    }

    fn name(&self) -> &str {
        "PDG"
    }
}

/// Two-significant-digit rounding strategy
pub struct TwoDigitRounding;

impl RoundingRule for TwoDigitRounding {
    fn round(
        &self,
        value: DecimalValue,
        diagnostics: &dyn DiagnosticSink,
    ) -> RoundResult<DecimalValue> {
        Ok(two_digit_round(value, diagnostics))
    }

    fn name(&self) -> &str {
        "two-digit"
    }
}

/// Strategy for the configured algorithm
pub fn rounding_rule(algorithm: RoundingAlgorithm) -> &'static dyn RoundingRule {
    match algorithm {
        RoundingAlgorithm::Pdg => &PdgRounding,
        RoundingAlgorithm::TwoDigit => &TwoDigitRounding,
    }
}
