// ============================================================================
// Compact Flag Specs
// One character per option, as used by host format strings and the CLI
// ============================================================================
//
// | flag | effect                                   |
// |------|------------------------------------------|
// | c    | two-digit rounding + total-error precision |
// | e    | precision from the total error           |
// | l    | precision from the larger error          |
// | p    | PDG rounding                             |
// | s    | symmetrize near-equal asymmetric pairs   |
// | t    | two-digit rounding                       |
// | D    | alternate multiplication symbol          |
// | F    | factorize powers of ten                  |
// | G    | gnuplot mode                             |
// | T    | typst mode                               |
// | U    | ASCII-only symbols                       |
// | X    | LaTeX mode                               |
//
// `L` (labels) and `N` (newline) only make sense on the command line; they
// are accepted and ignored here.

use super::config::{FormatOptions, Mode, RoundingAlgorithm};
use crate::interfaces::{Diagnostic, DiagnosticSink};
use crate::numeric::{RoundError, RoundResult};

impl FormatOptions {
    /// Build options from a flag spec, starting from
    /// [`FormatOptions::measurement_defaults`].
    ///
    /// The spec may be bare (`"csF"`) or brace-wrapped (`"{:csF}"`).
    ///
    /// # Errors
    /// `UnterminatedFlags` if a brace-wrapped spec has no closing brace.
    pub fn from_flags(spec: &str, diagnostics: &dyn DiagnosticSink) -> RoundResult<Self> {
        let mut options = Self::measurement_defaults();
        options.apply_flags(spec, diagnostics)?;
        Ok(options)
    }

    /// Apply every flag of `spec` in order. Unknown characters are reported
    /// and skipped.
    pub fn apply_flags(&mut self, spec: &str, diagnostics: &dyn DiagnosticSink) -> RoundResult<()> {
        for flag in flag_body(spec)?.chars() {
            if !self.apply_flag(flag) {
                diagnostics.on_diagnostic(Diagnostic::UnknownFlag(flag));
            }
        }
        Ok(())
    }

    /// Apply a single flag; returns `false` if it is not recognized.
    pub fn apply_flag(&mut self, flag: char) -> bool {
        match flag {
            'c' => {
                self.algorithm = RoundingAlgorithm::TwoDigit;
                self.precision_to_total_error = true;
            }
            'e' => self.precision_to_total_error = true,
            'l' => self.precision_to_larger_error = true,
            'p' => self.algorithm = RoundingAlgorithm::Pdg,
            's' => self.symmetrize_errors = true,
            't' => self.algorithm = RoundingAlgorithm::TwoDigit,
            'D' => self.use_alternate_multiplication_symbol = true,
            'F' => self.factorize_powers = true,
            'G' => self.mode = Mode::Gnuplot,
            'T' => self.mode = Mode::Typst,
            'U' => self.no_utf8 = true,
            'X' => self.mode = Mode::Tex,
            'L' | 'N' => {}
            _ => return false,
        }
        true
    }
}

/// Characters between the optional `{:` … `}` wrapper. A bare spec stops at
/// the first `}` if there is one.
fn flag_body(spec: &str) -> RoundResult<&str> {
    let spec = spec.trim();
    match spec.strip_prefix('{') {
        Some(inner) => {
            let inner = inner.strip_prefix(':').unwrap_or(inner);
            let end = inner.find('}').ok_or(RoundError::UnterminatedFlags)?;
            Ok(&inner[..end])
        }
        None => Ok(spec.find('}').map_or(spec, |end| &spec[..end])),
    }
}
