// ============================================================================
// Diagnostics Interface
// Non-fatal conditions raised while rounding and how they are reported
// ============================================================================

use parking_lot::Mutex;
use std::fmt;

/// Non-fatal conditions. Processing continues with the best interpretation
/// of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// Fewer than 3 significant digits; zeros were appended
    PaddedWithZeros { mantissa: u64 },

    /// An asymmetric uncertainty has no adjacent asymmetric partner
    UnpairedAsymmetric,

    /// Odd number of asymmetric terms in the quadrature sum
    UnreliableTotalError,

    /// Unrecognized character in a flag spec
    UnknownFlag(char),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PaddedWithZeros { mantissa } => write!(
                f,
                "not enough significant digits in {}, padding with zeros",
                mantissa
            ),
            Diagnostic::UnpairedAsymmetric => {
                write!(f, "asymmetric errors do not seem to come in pairs")
            }
            Diagnostic::UnreliableTotalError => write!(
                f,
                "asymmetric errors do not come in pairs, the total error computation is wrong"
            ),
            Diagnostic::UnknownFlag(flag) => write!(f, "option {:?} not recognized", flag),
        }
    }
}

/// Receiver for diagnostics.
/// Implementations can log, collect or drop them.
pub trait DiagnosticSink: Send + Sync {
    /// Handle one diagnostic
    fn on_diagnostic(&self, diagnostic: Diagnostic);

    /// Batch handler (optional optimization)
    fn on_diagnostics(&self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.on_diagnostic(diagnostic);
        }
    }
}

/// Drops everything
pub struct NoOpDiagnostics;

impl DiagnosticSink for NoOpDiagnostics {
    fn on_diagnostic(&self, _diagnostic: Diagnostic) {}
}

/// Emits every diagnostic as a `tracing` warning
pub struct LoggingDiagnostics;

impl DiagnosticSink for LoggingDiagnostics {
    fn on_diagnostic(&self, diagnostic: Diagnostic) {
        tracing::warn!(?diagnostic, "{}", diagnostic);
    }
}

/// Buffers diagnostics for later inspection
#[derive(Default)]
pub struct CollectingDiagnostics {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything collected so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.collected.lock())
    }

    pub fn len(&self) -> usize {
        self.collected.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.lock().is_empty()
    }

    pub fn contains(&self, diagnostic: &Diagnostic) -> bool {
        self.collected.lock().contains(diagnostic)
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn on_diagnostic(&self, diagnostic: Diagnostic) {
        self.collected.lock().push(diagnostic);
    }
}
