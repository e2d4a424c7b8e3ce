// ============================================================================
// Measurement Domain Model
// Central value, uncertainties and their role tags
// ============================================================================

use crate::domain::config::FormatOptions;
use crate::interfaces::DiagnosticSink;
use crate::numeric::{DecimalValue, NumericInput, RoundResult, SignPrefix};
use smallvec::SmallVec;
use std::fmt;

// ============================================================================
// Value Objects
// ============================================================================

/// Literal sign of a central value. A leading `+` is not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sign {
    Negative,
    #[default]
    NonNegative,
}

/// Shape of an uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorShape {
    /// Rendered with "±"
    #[default]
    Symmetric,
    /// Upper half of an asymmetric pair (`+x`)
    Upper,
    /// Lower half of an asymmetric pair (`-x`)
    Lower,
}

impl ErrorShape {
    #[inline]
    pub fn is_asymmetric(self) -> bool {
        !matches!(self, ErrorShape::Symmetric)
    }
}

impl From<SignPrefix> for Sign {
    fn from(prefix: SignPrefix) -> Self {
        match prefix {
            SignPrefix::Minus => Sign::Negative,
            SignPrefix::Plus | SignPrefix::Unsigned => Sign::NonNegative,
        }
    }
}

impl From<SignPrefix> for ErrorShape {
    fn from(prefix: SignPrefix) -> Self {
        match prefix {
            SignPrefix::Unsigned => ErrorShape::Symmetric,
            SignPrefix::Plus => ErrorShape::Upper,
            SignPrefix::Minus => ErrorShape::Lower,
        }
    }
}

// ============================================================================
// Central Value
// ============================================================================

/// The measured value being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CentralValue {
    pub sign: Sign,
    pub value: DecimalValue,
}

impl CentralValue {
    pub fn new(sign: Sign, value: DecimalValue) -> Self {
        Self { sign, value }
    }

    /// Convert any accepted host input.
    pub fn from_input(input: impl Into<NumericInput>) -> RoundResult<Self> {
        let (prefix, value) = input.into().to_signed_decimal()?;
        Ok(Self::new(prefix.into(), value))
    }

    pub fn to_f64(&self) -> f64 {
        match self.sign {
            Sign::Negative => -self.value.to_f64(),
            Sign::NonNegative => self.value.to_f64(),
        }
    }

    /// Append the signed decimal text; see [`DecimalValue::write_decimal`].
    pub fn write_decimal(&self, out: &mut String, factorized: bool) {
        if self.sign == Sign::Negative {
            out.push('-');
        }
        self.value.write_decimal(out, factorized);
    }

    pub fn to_decimal_string(&self, factorized: bool) -> String {
        let mut out = String::new();
        self.write_decimal(&mut out, factorized);
        out
    }
}

impl std::str::FromStr for CentralValue {
    type Err = crate::numeric::RoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, value) = DecimalValue::parse_signed(s)?;
        Ok(Self::new(prefix.into(), value))
    }
}

impl fmt::Display for CentralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string(false))
    }
}

// ============================================================================
// Uncertainty
// ============================================================================

/// One uncertainty of a measurement.
///
/// Asymmetric uncertainties are expected as adjacent `Upper`/`Lower` pairs;
/// this is checked (with diagnostics) but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uncertainty {
    pub shape: ErrorShape,
    pub value: DecimalValue,
}

impl Uncertainty {
    pub fn new(shape: ErrorShape, value: DecimalValue) -> Self {
        Self { shape, value }
    }

    pub fn symmetric(value: DecimalValue) -> Self {
        Self::new(ErrorShape::Symmetric, value)
    }

    pub fn upper(value: DecimalValue) -> Self {
        Self::new(ErrorShape::Upper, value)
    }

    pub fn lower(value: DecimalValue) -> Self {
        Self::new(ErrorShape::Lower, value)
    }

    /// Convert any accepted host input; the sign prefix selects the shape.
    pub fn from_input(input: impl Into<NumericInput>) -> RoundResult<Self> {
        let (prefix, value) = input.into().to_signed_decimal()?;
        Ok(Self::new(prefix.into(), value))
    }

    /// Convert a host input and force its shape, keeping only the magnitude.
    ///
    /// This is how plain numbers are marked as the upper or lower half of an
    /// asymmetric pair.
    pub fn from_input_with_shape(
        input: impl Into<NumericInput>,
        shape: ErrorShape,
    ) -> RoundResult<Self> {
        let (_, value) = input.into().to_signed_decimal()?;
        Ok(Self::new(shape, value))
    }

    /// Signed value: lower halves are negative.
    pub fn to_f64(&self) -> f64 {
        match self.shape {
            ErrorShape::Lower => -self.value.to_f64(),
            ErrorShape::Symmetric | ErrorShape::Upper => self.value.to_f64(),
        }
    }

    /// Append the decimal text; lower halves carry their `-`.
    pub fn write_decimal(&self, out: &mut String, factorized: bool) {
        if self.shape == ErrorShape::Lower {
            out.push('-');
        }
        self.value.write_decimal(out, factorized);
    }

    pub fn to_decimal_string(&self, factorized: bool) -> String {
        let mut out = String::new();
        self.write_decimal(&mut out, factorized);
        out
    }
}

impl std::str::FromStr for Uncertainty {
    type Err = crate::numeric::RoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, value) = DecimalValue::parse_signed(s)?;
        Ok(Self::new(prefix.into(), value))
    }
}

impl fmt::Display for Uncertainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shape == ErrorShape::Upper {
            f.write_str("+")?;
        }
        f.write_str(&self.to_decimal_string(false))
    }
}

/// Uncertainty list; measurements rarely carry more than a handful.
pub type Uncertainties = SmallVec<[Uncertainty; 4]>;

// ============================================================================
// Measurement
// ============================================================================

/// A central value with its uncertainties, labels and formatting options,
/// ready to be rendered in one call.
///
/// # Example
/// ```
/// use pubround::domain::Measurement;
///
/// let m = Measurement::parse("27.432", &["2.134", "0.125"])
///     .unwrap()
///     .with_flags("t")
///     .unwrap();
/// assert_eq!(m.format().unwrap(), "27.4 ± 2.1 ± 0.1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub central: CentralValue,
    pub uncertainties: Uncertainties,
    /// One label per symmetric uncertainty or asymmetric pair
    pub labels: Vec<String>,
    pub options: FormatOptions,
}

impl Measurement {
    /// Create with the measurement defaults (two-digit rounding, precision
    /// from the total error).
    pub fn new(central: CentralValue, uncertainties: impl IntoIterator<Item = Uncertainty>) -> Self {
        Self {
            central,
            uncertainties: uncertainties.into_iter().collect(),
            labels: Vec::new(),
            options: FormatOptions::measurement_defaults(),
        }
    }

    /// Parse a central value and uncertainties from text tokens.
    pub fn parse<S: AsRef<str>>(central: &str, uncertainties: &[S]) -> RoundResult<Self> {
        let central = central.parse()?;
        let uncertainties = uncertainties
            .iter()
            .map(|token| token.as_ref().parse())
            .collect::<RoundResult<Uncertainties>>()?;
        Ok(Self::new(central, uncertainties))
    }

    /// Builder method: set the labels
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: replace the options
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder method: apply a compact flag spec on top of the measurement
    /// defaults. Unknown flags are logged and ignored.
    pub fn with_flags(self, spec: &str) -> RoundResult<Self> {
        self.with_flags_reporting(spec, &crate::interfaces::LoggingDiagnostics)
    }

    /// Like [`Measurement::with_flags`], reporting unknown flags to `diagnostics`.
    pub fn with_flags_reporting(
        mut self,
        spec: &str,
        diagnostics: &dyn DiagnosticSink,
    ) -> RoundResult<Self> {
        self.options = FormatOptions::from_flags(spec, diagnostics)?;
        Ok(self)
    }

    /// Round and render.
    ///
    /// This is the fallible entry point. The `Display` impl writes the error
    /// message in place of the measurement when rounding fails.
    ///
    /// # Errors
    /// Any [`RoundError`](crate::numeric::RoundError) from rounding, e.g.
    /// `CoarserPrecision` when the central value is coarser than the shared
    /// precision.
    pub fn format(&self) -> RoundResult<String> {
        crate::engine::format_measurement(self, &crate::interfaces::LoggingDiagnostics)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Ok(text) => f.write_str(&text),
            Err(e) => write!(f, "{}", e),
        }
    }
}
