// ============================================================================
// Decimal Value
// Exact mantissa/exponent representation with loss-free text round-trip
// ============================================================================

use super::errors::{RoundError, RoundResult};
use crate::engine::digit_count;
use arrayvec::ArrayString;
use std::fmt::{self, Write};

/// Exact non-negative decimal magnitude: `mantissa × 10^exponent`.
///
/// The sign (or the uncertainty shape) is not stored here; the role types in
/// [`crate::domain`] carry it. Leading zeros are never stored and trailing
/// zero padding is synthesized by [`DecimalValue::to_decimal_string`].
///
/// # Example
/// ```
/// use pubround::numeric::DecimalValue;
///
/// let v: DecimalValue = "0.0124".parse().unwrap();
/// assert_eq!(v.mantissa(), 124);
/// assert_eq!(v.exponent(), -4);
/// assert_eq!(v.to_string(), "0.0124");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecimalValue {
    mantissa: u64,
    exponent: i32,
}

/// Explicit sign character found in front of a decimal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignPrefix {
    /// No sign character
    #[default]
    Unsigned,
    /// Leading `+`
    Plus,
    /// Leading `-`
    Minus,
}

impl DecimalValue {
    /// Zero with exponent 0
    pub const ZERO: Self = Self {
        mantissa: 0,
        exponent: 0,
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw parts.
    #[inline]
    pub const fn new(mantissa: u64, exponent: i32) -> Self {
        Self { mantissa, exponent }
    }

    /// Parse a decimal token, returning its sign prefix separately.
    ///
    /// Accepted grammar after trimming: an optional `+`/`-`, then digits with
    /// at most one decimal point. No exponent notation, no separators.
    ///
    /// # Errors
    /// - `EmptyInput` for a blank token
    /// - `InvalidCharacter` for anything outside `[0-9.]` after the sign
    /// - `MultipleDecimalPoints`, `NoDigits`
    /// - `MantissaOverflow` if the digits do not fit a u64
    pub fn parse_signed(token: &str) -> RoundResult<(SignPrefix, Self)> {
        let token = token.trim();
        if token.is_empty() {
            return Err(RoundError::EmptyInput);
        }

        let (sign, body) = if let Some(rest) = token.strip_prefix('+') {
            (SignPrefix::Plus, rest)
        } else if let Some(rest) = token.strip_prefix('-') {
            (SignPrefix::Minus, rest)
        } else {
            (SignPrefix::Unsigned, token)
        };

        let mut dot = None;
        let mut digits = 0usize;
        for (i, c) in body.char_indices() {
            match c {
                '.' if dot.is_some() => return Err(RoundError::MultipleDecimalPoints),
                '.' => dot = Some(i),
                '0'..='9' => digits += 1,
                other => return Err(RoundError::InvalidCharacter(other)),
            }
        }
        if digits == 0 {
            return Err(RoundError::NoDigits);
        }

        let mantissa = body
            .bytes()
            .filter(|b| *b != b'.')
            .try_fold(0u64, |acc, b| {
                acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
            })
            .ok_or(RoundError::MantissaOverflow)?;

        let exponent = match dot {
            None => 0,
            Some(pos) => {
                let after = body.len() - pos - 1;
                -i32::try_from(after).map_err(|_| RoundError::MantissaOverflow)?
            }
        };

        Ok((sign, Self { mantissa, exponent }))
    }

    /// Convert the magnitude of a finite float through its shortest
    /// round-trip decimal text.
    ///
    /// Magnitudes whose plain text has too many digits for a u64 (from about
    /// 1.8e19 up) go through scientific notation instead, which never needs
    /// more than 17 significant digits.
    ///
    /// # Errors
    /// `NonFiniteValue` for NaN or infinities.
    pub fn from_f64_magnitude(value: f64) -> RoundResult<Self> {
        if !value.is_finite() {
            return Err(RoundError::NonFiniteValue);
        }
        let magnitude = value.abs();
        match Self::parse_signed(&magnitude.to_string()) {
            Ok((_, decimal)) => Ok(decimal),
            Err(RoundError::MantissaOverflow) => Self::from_scientific(&format!("{:e}", magnitude)),
            Err(e) => Err(e),
        }
    }

    /// Parse `digits e power` as produced by `{:e}` on a float.
    fn from_scientific(text: &str) -> RoundResult<Self> {
        let (digits, power) = text
            .split_once('e')
            .ok_or(RoundError::InvalidCharacter('e'))?;
        let power: i32 = power.parse().map_err(|_| RoundError::MantissaOverflow)?;
        let (_, decimal) = Self::parse_signed(digits)?;
        let exponent = decimal
            .exponent
            .checked_add(power)
            .ok_or(RoundError::MantissaOverflow)?;
        Ok(Self::new(decimal.mantissa, exponent))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn mantissa(self) -> u64 {
        self.mantissa
    }

    #[inline]
    pub const fn exponent(self) -> i32 {
        self.exponent
    }

    /// Number of decimal digits of the mantissa (zero counts as one).
    #[inline]
    pub fn digit_count(self) -> u32 {
        digit_count(self.mantissa)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.mantissa == 0
    }

    /// Lossy conversion used only for combining magnitudes, never for display.
    pub fn to_f64(self) -> f64 {
        let mantissa = self.mantissa as f64;
        match self.exponent {
            // Powers of ten up to 1e22 are exact, so the division rounds once
            exponent @ -22..=-1 => mantissa / 10f64.powi(-exponent),
            exponent => mantissa * 10f64.powi(exponent),
        }
    }

    /// Internal representation, e.g. `n=124 p10=-4 - 0.0124`.
    pub fn describe(self) -> String {
        format!("n={} p10={} - {}", self.mantissa, self.exponent, self)
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Canonical decimal text of the magnitude.
    ///
    /// With `factorized` set only the mantissa digits are written; the power
    /// of ten is expected to be rendered separately.
    pub fn to_decimal_string(self, factorized: bool) -> String {
        let mut out = String::with_capacity(self.exponent.unsigned_abs() as usize + 22);
        self.write_decimal(&mut out, factorized);
        out
    }

    /// Append the decimal text of the magnitude to `out`.
    pub fn write_decimal(self, out: &mut String, factorized: bool) {
        let digits = self.mantissa_digits();
        let len = digits.len();

        if self.exponent >= 0 || factorized {
            out.push_str(&digits);
            if !factorized {
                out.extend(std::iter::repeat('0').take(self.exponent as usize));
            }
            return;
        }

        let shift = self.exponent.unsigned_abs() as usize;
        if shift >= len {
            out.push_str("0.");
            out.extend(std::iter::repeat('0').take(shift - len));
            out.push_str(&digits);
        } else {
            let int_len = len - shift;
            out.push_str(&digits[..int_len]);
            out.push('.');
            out.push_str(&digits[int_len..]);
        }
    }

    fn mantissa_digits(self) -> ArrayString<20> {
        let mut digits = ArrayString::new();
        write!(digits, "{}", self.mantissa).expect("u64 has at most 20 digits");
        digits
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string(false))
    }
}

impl std::str::FromStr for DecimalValue {
    type Err = RoundError;

    /// Parse the magnitude of a decimal token; a sign prefix is accepted and
    /// dropped. Use the role types to keep it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_signed(s).map(|(_, value)| value)
    }
}
