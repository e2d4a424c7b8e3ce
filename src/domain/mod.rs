// ============================================================================
// Domain Models Module
// Measurement value objects and formatting configuration
// ============================================================================

pub mod config;
pub mod flags;
pub mod measurement;

pub use config::{FormatOptions, Mode, RoundingAlgorithm, DEFAULT_SYMMETRIZE_THRESHOLD};
pub use measurement::{CentralValue, ErrorShape, Measurement, Sign, Uncertainties, Uncertainty};
