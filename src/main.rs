//! pubround CLI Entry Point
//!
//! Rounds a measurement given on the command line and prints it in
//! publication style.
//!
//! ```text
//! pubround 27.462 +0.3134 -0.292 0.0124 -c -X -L "(stat),(theo)"
//! ```

use anyhow::Context;
use clap::Parser;
use pubround::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Short flags the command line understands, besides `-L`.
const KNOWN_FLAGS: &str = "celwpstDFGTXUNhV";

/// Round a central value and its uncertainties for publication
///
/// Arguments go through [`normalize_args`] first: values with a bare leading
/// point such as `-.5` become `-0.5`, and unknown single-letter flags are
/// reported as warnings and skipped instead of failing the parse.
#[derive(Parser, Debug)]
#[command(name = "pubround", version, about)]
struct Cli {
    /// Central value followed by its uncertainties; `+x`/`-x` mark the
    /// upper and lower halves of an asymmetric pair
    #[arg(required = true, value_name = "VALUE", allow_negative_numbers = true)]
    values: Vec<String>,

    /// Two significant digits with precision from the total error
    #[arg(short = 'c')]
    combined: bool,

    /// Precision from the total (quadrature) error
    #[arg(short = 'e')]
    total_error: bool,

    /// Precision from the larger error (default)
    #[arg(short = 'l', short_alias = 'w')]
    larger_error: bool,

    /// Particle Data Group rounding (default)
    #[arg(short = 'p', overrides_with = "two_digit")]
    pdg: bool,

    /// Two significant digits
    #[arg(short = 't', overrides_with = "pdg")]
    two_digit: bool,

    /// Symmetrize asymmetric pairs within 10%
    #[arg(short = 's')]
    symmetrize: bool,

    /// Use the alternate multiplication symbol
    #[arg(short = 'D')]
    cdot: bool,

    /// Factorize powers of ten
    #[arg(short = 'F')]
    factorize: bool,

    /// gnuplot output
    #[arg(short = 'G', overrides_with_all = ["typst", "tex"])]
    gnuplot: bool,

    /// typst output
    #[arg(short = 'T', overrides_with_all = ["gnuplot", "tex"])]
    typst: bool,

    /// LaTeX output
    #[arg(short = 'X', overrides_with_all = ["gnuplot", "typst"])]
    tex: bool,

    /// ASCII-only symbols
    #[arg(short = 'U')]
    ascii: bool,

    /// Comma-separated labels, one per uncertainty or asymmetric pair
    #[arg(short = 'L', value_name = "LIST")]
    labels: Option<String>,

    /// Do not print a trailing newline
    #[arg(short = 'N')]
    no_newline: bool,
}

impl Cli {
    fn options(&self) -> FormatOptions {
        let mut options = FormatOptions::default();
        if self.combined {
            options.algorithm = RoundingAlgorithm::TwoDigit;
            options.precision_to_total_error = true;
        }
        if self.total_error {
            options.precision_to_total_error = true;
        }
        if self.larger_error {
            options.precision_to_larger_error = true;
        }
        if self.pdg {
            options.algorithm = RoundingAlgorithm::Pdg;
        }
        if self.two_digit {
            options.algorithm = RoundingAlgorithm::TwoDigit;
        }
        if self.gnuplot {
            options.mode = Mode::Gnuplot;
        }
        if self.typst {
            options.mode = Mode::Typst;
        }
        if self.tex {
            options.mode = Mode::Tex;
        }
        options.symmetrize_errors = self.symmetrize;
        options.use_alternate_multiplication_symbol = self.cdot;
        options.factorize_powers = self.factorize;
        options.no_utf8 = self.ascii;
        if let Some(list) = &self.labels {
            options.labels = parse_label_list(list);
        }
        options
    }

    /// Formatted output, including the trailing newline unless `-N`.
    fn render(&self) -> anyhow::Result<String> {
        let (central, uncertainties) = self
            .values
            .split_first()
            .context("missing central value")?;
        let mut text = format(central, uncertainties, &self.options())
            .with_context(|| format!("cannot format {}", self.values.join(" ")))?;
        if !self.no_newline {
            text.push('\n');
        }
        Ok(text)
    }
}

/// Rewrite raw arguments before clap sees them.
///
/// `-.5` is a negative number, not a flag cluster. Flag clusters lose any
/// letter that is not a known flag, each reported as
/// [`Diagnostic::UnknownFlag`]. Everything after `L` in a cluster, and the
/// argument following a bare `-L`, is a label list and passes untouched.
fn normalize_args<I>(args: I, diagnostics: &dyn DiagnosticSink) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    let mut label_value = false;
    for arg in args {
        if std::mem::take(&mut label_value) {
            out.push(arg);
            continue;
        }
        if let Some(rest) = arg.strip_prefix("-.") {
            if rest.starts_with(|c: char| c.is_ascii_digit()) {
                out.push(format!("-0.{rest}"));
                continue;
            }
        }
        match arg.strip_prefix('-') {
            Some(cluster)
                if !cluster.is_empty() && cluster.chars().all(|c| c.is_ascii_alphabetic()) =>
            {
                let mut kept = String::from("-");
                for (i, flag) in cluster.char_indices() {
                    if flag == 'L' {
                        kept.push_str(&cluster[i..]);
                        label_value = i + 1 == cluster.len();
                        break;
                    }
                    if KNOWN_FLAGS.contains(flag) {
                        kept.push(flag);
                    } else {
                        diagnostics.on_diagnostic(Diagnostic::UnknownFlag(flag));
                    }
                }
                if kept.len() > 1 {
                    out.push(kept);
                }
            }
            _ => out.push(arg),
        }
    }
    out
}

/// Split a comma-separated list, trimming whitespace and dropping empty items.
fn parse_label_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args(), &LoggingDiagnostics));
    tracing::debug!(?cli, "parsed arguments");

    print!("{}", cli.render()?);
    Ok(())
}
