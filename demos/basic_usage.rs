// ============================================================================
// Basic Usage Example
// ============================================================================

use pubround::prelude::*;
use std::sync::Arc;

fn main() {
    println!("=== Publication Rounding Example ===\n");

    // Two significant digits, precision from the larger error
    let options = FormatOptions::new().with_algorithm(RoundingAlgorithm::TwoDigit);
    match format("27.432", &["2.134", "0.125"], &options) {
        Ok(text) => println!("Two digits:   {}", text),
        Err(e) => println!("Two digits:   error: {}", e),
    }

    // One measurement with an asymmetric pair, rendered in every dialect
    println!("\n=== Output Dialects ===");
    let sink = Arc::new(CollectingDiagnostics::new());
    for (name, mode) in [
        ("terminal", Mode::Terminal),
        ("tex", Mode::Tex),
        ("typst", Mode::Typst),
        ("gnuplot", Mode::Gnuplot),
    ] {
        let formatter = FormatterBuilder::from_options(FormatOptions::combined().with_mode(mode))
            .with_labels(["(stat)", "(syst)", "(theo)"])
            .with_diagnostics(sink.clone())
            .build();
        let formatter = match formatter {
            Ok(formatter) => formatter,
            Err(e) => {
                println!("{:<10} invalid options: {}", name, e);
                continue;
            }
        };
        match formatter.format("27.462", &["+0.3134", "-0.292", "0.0124"]) {
            Ok(text) => println!("{:<10} {}", name, text),
            Err(e) => println!("{:<10} error: {}", name, e),
        }
    }

    // Factorized powers of ten
    println!("\n=== Factorized ===");
    let options = FormatOptions::new().with_factorize_powers(true);
    for mode in [Mode::Terminal, Mode::Tex] {
        match format("123456", &["1234"], &options.clone().with_mode(mode)) {
            Ok(text) => println!("{}", text),
            Err(e) => println!("error: {}", e),
        }
    }

    // Flag spec, symmetrization and a failing measurement
    println!("\n=== Measurements ===");
    let measurements = [
        Measurement::parse("10.000", &["+2.5", "-2.375", "0.1"])
            .and_then(|m| m.with_flags("s"))
            .map(|m| m.with_labels(["stat", "syst", "theo"])),
        Measurement::parse("27", &["0.5"]).and_then(|m| m.with_flags("p")),
    ];
    for measurement in measurements {
        match measurement.and_then(|m| m.format()) {
            Ok(text) => println!("{}", text),
            Err(e) => println!("error: {}", e),
        }
    }

    println!("\n=== Diagnostics ===");
    for diagnostic in sink.take() {
        println!("  {}", diagnostic);
    }
}
