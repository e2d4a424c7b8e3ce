// ============================================================================
// Rounding Rule Interface
// Contract for significant-digit rounding strategies
// ============================================================================

use super::DiagnosticSink;
use crate::numeric::{DecimalValue, RoundResult};

/// Strategy interface for significant-digit rounding.
/// Implementations: PDG rule, two-digit rule.
pub trait RoundingRule: Send + Sync {
    /// Round `value` to the rule's number of significant digits.
    ///
    /// # Arguments
    /// * `value` - Magnitude to round
    /// * `diagnostics` - Receives zero-padding warnings
    ///
    /// # Returns
    /// The rounded magnitude; its exponent is the decimal place that the
    /// rest of the measurement may be aligned to
    fn round(
        &self,
        value: DecimalValue,
        diagnostics: &dyn DiagnosticSink,
    ) -> RoundResult<DecimalValue>;

    /// Rule name for logging
    fn name(&self) -> &str;
}
