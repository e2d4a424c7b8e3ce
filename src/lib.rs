// ============================================================================
// Publication-Style Rounding Library
// Rounds a measurement and its uncertainties and renders it for print
// ============================================================================

//! # pubround
//!
//! Rounds a central value and its uncertainties to a consistent, conventional
//! precision and renders the result as terminal text, LaTeX, typst or gnuplot
//! labels.
//!
//! ## Features
//!
//! - **Exact decimal arithmetic**: inputs are parsed into mantissa/exponent
//!   pairs and rounded without binary floating point
//! - **Pluggable rounding rules** (Particle Data Group, two significant digits)
//! - **Shared precision** from the larger or the total (quadrature) error
//! - **Asymmetric uncertainties** with optional symmetrization
//! - **Four output dialects** with ASCII and factorized-power variants
//!
//! ## Example
//!
//! ```rust
//! use pubround::prelude::*;
//!
//! // Two significant digits, precision from the larger error
//! let options = FormatOptions::new().with_algorithm(RoundingAlgorithm::TwoDigit);
//! let text = format("27.432", &["2.134", "0.125"], &options).unwrap();
//! assert_eq!(text, "27.4 ± 2.1 ± 0.1");
//!
//! // Asymmetric pair in LaTeX with labels
//! let m = Measurement::parse("27.462", &["+0.3134", "-0.292", "0.0124"])
//!     .unwrap()
//!     .with_flags("X")
//!     .unwrap()
//!     .with_labels(["(stat)", "(syst)", "(theo)"]);
//! assert_eq!(
//!     m.format().unwrap(),
//!     "27.46 \\,^{+0.31} _{-0.29} \\text{(stat)} \\pm 0.01 \\text{(theo)}"
//! );
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        CentralValue, ErrorShape, FormatOptions, Measurement, Mode, RoundingAlgorithm, Sign,
        Uncertainties, Uncertainty,
    };
    pub use crate::engine::{
        create_from_options, format, format_measurement, format_values, Formatter,
        FormatterBuilder, RoundedMeasurement,
    };
    pub use crate::interfaces::{
        CollectingDiagnostics, Diagnostic, DiagnosticSink, LoggingDiagnostics, NoOpDiagnostics,
        RoundingRule,
    };
    pub use crate::numeric::{DecimalValue, NumericInput, RoundError, RoundResult};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    fn quiet(options: FormatOptions) -> Formatter {
        create_from_options(options, Arc::new(NoOpDiagnostics)).unwrap()
    }

    #[test]
    fn test_end_to_end_larger_error() {
        let formatter = quiet(FormatOptions::new().with_algorithm(RoundingAlgorithm::TwoDigit));
        assert_eq!(
            formatter.format("27.432", &["2.134", "0.125"]).unwrap(),
            "27.4 ± 2.1 ± 0.1"
        );
    }

    #[test]
    fn test_end_to_end_total_error_tex() {
        let formatter = quiet(
            FormatOptions::latex()
                .with_algorithm(RoundingAlgorithm::TwoDigit)
                .with_precision_to_total_error(true)
                .with_labels(["(stat)", "(syst)", "(theo)"]),
        );
        let text = formatter
            .format("27.462", &["+0.3134", "-0.292", "0.0124"])
            .unwrap();
        assert!(text.contains("^{+0.31}"));
        assert!(text.contains("_{-0.29}"));
        assert!(text.ends_with("\\pm 0.01 \\text{(theo)}"));
    }

    #[test]
    fn test_malformed_tokens_fail() {
        let formatter = quiet(FormatOptions::new());
        assert_eq!(
            formatter.format("1.2.3", &["0.1"]),
            Err(RoundError::MultipleDecimalPoints)
        );
        assert_eq!(
            formatter.format("12a", &["0.1"]),
            Err(RoundError::InvalidCharacter('a'))
        );
        assert_eq!(formatter.format("", &["0.1"]), Err(RoundError::EmptyInput));
        assert_eq!(formatter.format(".", &["0.1"]), Err(RoundError::NoDigits));
    }

    #[test]
    fn test_finer_precision_than_data_fails() {
        let formatter = quiet(FormatOptions::new());
        assert_eq!(
            formatter.format("27", &["0.5"]),
            Err(RoundError::CoarserPrecision {
                exponent: 0,
                target: -1
            })
        );
    }

    #[test]
    fn test_total_error_beyond_u64() {
        let big = "15000000000000000000";
        let formatter = quiet(FormatOptions::new().with_precision_to_total_error(true));
        assert_eq!(
            formatter.format(big, &[big, big]).unwrap(),
            format!("{big} ± {big} ± {big}")
        );
    }

    #[test]
    fn test_factorized_outputs() {
        let options = FormatOptions::new().with_factorize_powers(true);
        assert_eq!(
            quiet(options.clone()).format("123456", &["1234"]).unwrap(),
            "(1235 ± 12)×10^2"
        );
        assert_eq!(
            quiet(options.clone().with_alternate_multiplication_symbol(true))
                .format("123456", &["1234"])
                .unwrap(),
            "(1235 ± 12)·10^2"
        );
        assert_eq!(
            quiet(options.with_mode(Mode::Tex))
                .format("123456", &["1234"])
                .unwrap(),
            "\\left( 1235 \\pm 12 \\right) \\times 10^{2}"
        );
    }

    #[test]
    fn test_other_dialects() {
        assert_eq!(
            quiet(FormatOptions::typst())
                .format("1.500", &["+0.2", "-0.1"])
                .unwrap(),
            "1.50 #h(0.0em)^(+0.20) _(-0.10)"
        );
        assert_eq!(
            quiet(FormatOptions::gnuplot().with_no_utf8(true))
                .format("1.500", &["0.25"])
                .unwrap(),
            "1.50 +/- 0.25"
        );
    }

    #[test]
    fn test_negative_central_value() {
        assert_eq!(
            quiet(FormatOptions::new())
                .format("-0.0012345", &["0.0000123"])
                .unwrap(),
            "-0.001235 ± 0.000012"
        );
    }

    #[test]
    fn test_measurement_with_flags() {
        let m = Measurement::parse("123456", &["1234"])
            .unwrap()
            .with_flags("{:tF}")
            .unwrap();
        assert_eq!(m.format().unwrap(), "(1235 ± 12)×10^2");

        let m = Measurement::parse("10.0", &["+2.5", "-2.375"])
            .unwrap()
            .with_flags("s")
            .unwrap();
        assert_eq!(m.format().unwrap(), "10.0 ± 2.4");

        let unterminated = Measurement::parse("1", &["1"]).unwrap().with_flags("{:tF");
        assert_eq!(unterminated, Err(RoundError::UnterminatedFlags));
    }

    #[test]
    fn test_diagnostics_collected() {
        let sink = Arc::new(CollectingDiagnostics::new());
        let formatter = FormatterBuilder::new()
            .two_digit_rounding()
            .precision_to_total_error()
            .with_diagnostics(sink.clone())
            .build()
            .unwrap();
        formatter.format("27.462", &["+0.3134", "0.0124"]).unwrap();
        assert!(sink.contains(&Diagnostic::UnreliableTotalError));
    }
}
