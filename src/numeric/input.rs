// ============================================================================
// Numeric Input
// Accepted host input shapes and their exact conversion to DecimalValue
// ============================================================================

use super::decimal_value::{DecimalValue, SignPrefix};
use super::errors::{RoundError, RoundResult};

/// A central value or uncertainty as supplied by the host.
///
/// Text tokens are parsed as-is. Numbers go through their exact decimal
/// form: integers digit for digit, floats through the shortest text that
/// round-trips (never exponent notation), `rust_decimal::Decimal` through its
/// mantissa and scale.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Decimal(rust_decimal::Decimal),
}

impl NumericInput {
    /// Convert to an exact decimal magnitude plus the sign found in the input.
    ///
    /// # Errors
    /// Any parse error of the text form, `NonFiniteValue` for NaN/infinite
    /// floats, `MantissaOverflow` for decimals wider than a u64.
    pub fn to_signed_decimal(&self) -> RoundResult<(SignPrefix, DecimalValue)> {
        match self {
            NumericInput::Text(text) => DecimalValue::parse_signed(text),
            NumericInput::Integer(value) => {
                let sign = if *value < 0 {
                    SignPrefix::Minus
                } else {
                    SignPrefix::Unsigned
                };
                Ok((sign, DecimalValue::new(value.unsigned_abs(), 0)))
            }
            NumericInput::Unsigned(value) => Ok((SignPrefix::Unsigned, DecimalValue::new(*value, 0))),
            NumericInput::Float(value) => {
                if !value.is_finite() {
                    return Err(RoundError::NonFiniteValue);
                }
                DecimalValue::parse_signed(&value.to_string())
            }
            NumericInput::Decimal(value) => {
                let mantissa = value.mantissa();
                let magnitude =
                    u64::try_from(mantissa.unsigned_abs()).map_err(|_| RoundError::MantissaOverflow)?;
                let exponent = -(value.scale() as i32);
                let sign = if mantissa < 0 {
                    SignPrefix::Minus
                } else {
                    SignPrefix::Unsigned
                };
                Ok((sign, DecimalValue::new(magnitude, exponent)))
            }
        }
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl From<&String> for NumericInput {
    fn from(value: &String) -> Self {
        NumericInput::Text(value.clone())
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Integer(value)
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        NumericInput::Integer(i64::from(value))
    }
}

impl From<u64> for NumericInput {
    fn from(value: u64) -> Self {
        NumericInput::Unsigned(value)
    }
}

impl From<u32> for NumericInput {
    fn from(value: u32) -> Self {
        NumericInput::Unsigned(u64::from(value))
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Float(value)
    }
}

impl From<f32> for NumericInput {
    // Widen through the shortest f32 text so 0.1f32 stays "0.1"
    fn from(value: f32) -> Self {
        NumericInput::Float(value.to_string().parse().unwrap_or(f64::NAN))
    }
}

impl From<rust_decimal::Decimal> for NumericInput {
    fn from(value: rust_decimal::Decimal) -> Self {
        NumericInput::Decimal(value)
    }
}
