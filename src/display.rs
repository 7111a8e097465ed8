//! Utilities for displaying fitted lines
//!
//! Nothing in the fitting code prints. This module turns results into
//! human-readable text that callers can print, log, or write wherever they like.
//!
//! # Key Concepts
//! - **[`Report`]**: The dataset, the fitted line and the method that produced it, as one block of text.
//! - **[`format_equation`]**: Writes `Y = b0 + b1 * X` into any [`std::fmt::Write`] buffer.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//!
//! # Example
//! ```
//! # use linfit::{Dataset, Method, display::Report, fit};
//! let data = Dataset::new(vec![30.0, 30.0, 40.0, 40.0], vec![37.0, 47.0, 50.0, 60.0]).unwrap();
//! let line = fit::closed_form(&data, true, 3).unwrap();
//!
//! let report = Report::new(&data, line, Method::ClosedForm).with_label("Dataset #1");
//! assert_eq!(
//!     report.to_string(),
//!     "***\n\
//!      Regression function for Dataset #1:\n\
//!      X = [30, 30, 40, 40]\n\
//!      Y = [37, 47, 50, 60]\n\
//!      Y = 3 + 1.3 * X - using mathematical method"
//! );
//! ```
use crate::{dataset::Dataset, fit::Coefficients, fit::Method, value::Value};

/// Label used by [`Report`] when none is given
pub const DEFAULT_LABEL: &str = "dataset";

/// Represents the sign of a term in an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use linfit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if num_traits::float::FloatCore::is_sign_negative(coef) {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// Writes the equation of a line as `Y = b0 + b1 * X` into the provided buffer.
///
/// A negative slope is written as a subtraction, so `(3, -0.5)` becomes `Y = 3 - 0.5 * X`.
///
/// # Errors
/// Returns an error if writing to `buffer` fails.
///
/// # Example
/// ```
/// # use linfit::{Coefficients, display::format_equation};
/// let mut buf = String::new();
/// format_equation(&mut buf, &Coefficients::new(444.177, 2.621)).unwrap();
/// assert_eq!(buf, "Y = 444.177 + 2.621 * X");
/// ```
pub fn format_equation<T: Value, B: std::fmt::Write>(
    buffer: &mut B,
    line: &Coefficients<T>,
) -> std::fmt::Result {
    let slope = line.slope();
    let sign = Sign::from_coef(slope).char();
    let slope = Value::abs(slope);

    write!(buffer, "Y = {} {sign} {slope} * X", line.intercept())
}

/// Writes values as `[a, b, c]`
fn format_values<T: Value>(f: &mut std::fmt::Formatter<'_>, values: &[T]) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v}")?;
    }
    write!(f, "]")
}

/// A human-readable summary of one fit.
///
/// Renders the X and Y values, the equation of the fitted line, the name of the
/// method that produced it, and a label for the dataset (default [`DEFAULT_LABEL`]).
#[derive(Debug, Clone, Copy)]
pub struct Report<'a, T: Value = f64> {
    x: &'a [T],
    y: &'a [T],
    line: Coefficients<T>,
    method: Method,
    label: Option<&'a str>,
}
impl<'a, T: Value> Report<'a, T> {
    /// Creates a report for a line fitted to `data` by `method`
    #[must_use]
    pub fn new(data: &'a Dataset<'_, T>, line: Coefficients<T>, method: Method) -> Self {
        Self {
            x: data.x(),
            y: data.y(),
            line,
            method,
            label: None,
        }
    }

    /// Names the dataset in the report
    #[must_use]
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// The dataset label, or [`DEFAULT_LABEL`]
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.unwrap_or(DEFAULT_LABEL)
    }

    /// The line being reported
    #[must_use]
    pub fn line(&self) -> &Coefficients<T> {
        &self.line
    }

    /// The method that produced the line
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }
}
impl<T: Value> std::fmt::Display for Report<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "***")?;
        writeln!(f, "Regression function for {}:", self.label())?;

        write!(f, "X = ")?;
        format_values(f, self.x)?;
        writeln!(f)?;

        write!(f, "Y = ")?;
        format_values(f, self.y)?;
        writeln!(f)?;

        format_equation(f, &self.line)?;
        write!(f, " - using {}", self.method)
    }
}
