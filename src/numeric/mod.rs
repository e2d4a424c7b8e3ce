// ============================================================================
// Numeric Module
// Exact decimal values for publication-style rounding
// ============================================================================
//
// This module provides:
// - DecimalValue: mantissa/exponent magnitude, parsed and printed loss-free
// - NumericInput: the host input shapes accepted by the formatter
// - RoundError: fatal error kinds shared by every stage
//
// Design principles:
// - No floating-point step on the rounding path
// - All fallible operations return Result (no panics, no process exit)
// - Floats appear only when combining magnitudes (quadrature sum)

mod decimal_value;
mod errors;
mod input;

pub use decimal_value::{DecimalValue, SignPrefix};
pub use errors::{RoundError, RoundResult};
pub use input::NumericInput;
