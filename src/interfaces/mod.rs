// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod diagnostics;
mod rounding_rule;

pub use diagnostics::{
    CollectingDiagnostics, Diagnostic, DiagnosticSink, LoggingDiagnostics, NoOpDiagnostics,
};
pub use rounding_rule::RoundingRule;
