// ============================================================================
// Engine Module
// Rounding, precision reconciliation and rendering
// ============================================================================

mod combiner;
mod formatter;
mod reconciler;
mod renderer;
mod rounding;
mod symbols;

pub mod factory;

pub use combiner::{quadrature_sum, symmetrize_errors, QuadratureSum};
pub use factory::{create_from_options, FormatterBuilder};
pub use formatter::{format, format_measurement, format_values, Formatter};
pub use reconciler::{reconcile, RoundedMeasurement};
pub use renderer::render;
pub use rounding::{
    digit_count, pdg_round, pdg_rule, reduce_to_three_significant_digits, round_to_exponent,
    rounding_rule, two_digit_round, PdgRounding, TwoDigitRounding,
};
pub use symbols::SymbolTable;
