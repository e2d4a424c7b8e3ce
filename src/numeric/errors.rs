// ============================================================================
// Rounding Errors
// Fatal error kinds for parsing, rounding and formatting
// ============================================================================

use std::fmt;

/// Fatal errors: any of these aborts the whole formatting call.
///
/// Non-fatal conditions (zero padding, unpaired asymmetric uncertainties,
/// unknown flags) are reported through a
/// [`DiagnosticSink`](crate::interfaces::DiagnosticSink) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundError {
    /// Token was empty after trimming whitespace
    EmptyInput,
    /// Token contained a character outside `[0-9.]` after the sign
    InvalidCharacter(char),
    /// Token contained more than one decimal point
    MultipleDecimalPoints,
    /// Token contained no digit at all
    NoDigits,
    /// Mantissa does not fit in a u64
    MantissaOverflow,
    /// The PDG rule was handed a mantissa without exactly 3 digits
    NotThreeDigits { mantissa: u64 },
    /// Rounding to `target` requested for a value already coarser than that
    CoarserPrecision { exponent: i32, target: i32 },
    /// NaN or infinite floating input
    NonFiniteValue,
    /// Brace-wrapped flag spec without its closing brace
    UnterminatedFlags,
    /// Symmetrization threshold is not a finite positive fraction
    InvalidThreshold,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::EmptyInput => write!(f, "empty number"),
            RoundError::InvalidCharacter(c) => write!(f, "invalid character {:?} in number", c),
            RoundError::MultipleDecimalPoints => write!(f, "multiple decimal points in number"),
            RoundError::NoDigits => write!(f, "no digits in number"),
            RoundError::MantissaOverflow => {
                write!(f, "mantissa overflow: number has too many digits")
            },
            RoundError::NotThreeDigits { mantissa } => {
                write!(f, "number {} does not have 3 digits", mantissa)
            },
            RoundError::CoarserPrecision { exponent, target } => write!(
                f,
                "cannot round a value with exponent {} to precision {}",
                exponent, target
            ),
            RoundError::NonFiniteValue => write!(f, "cannot convert a non-finite value"),
            RoundError::UnterminatedFlags => write!(f, "invalid format: unterminated flag spec"),
            RoundError::InvalidThreshold => {
                write!(f, "symmetrization threshold must be finite and positive")
            },
        }
    }
}

impl std::error::Error for RoundError {}

/// Result type alias for rounding operations
pub type RoundResult<T> = Result<T, RoundError>;
