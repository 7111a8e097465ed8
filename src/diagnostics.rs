//! Hypothesis tests for checking whether a fitted line is trustworthy
//!
//! - [`shapiro_wilk`]: Are the residuals of the fit normally distributed?
//!   Linear regression assumes they are; a low p-value says otherwise.
//! - [`fisher_test`]: Does the line explain more variance than chance would?
//!   Compares the F statistic against the critical value at a [`Confidence`] level.
//!
//! Both return plain result structs with `Display` impls, so they can be logged or printed as-is.
//!
//! # Example
//! ```rust
//! # use linfit::{Dataset, fit, diagnostics::{fisher_test, shapiro_wilk, Confidence}};
//! let x = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
//! let y = [8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68];
//! let data = Dataset::new(&x[..], &y[..]).unwrap();
//! let line = fit::normal_equation(&data, 3).unwrap();
//!
//! let normality = shapiro_wilk(&line.residuals(&data)).unwrap();
//! assert!(normality.is_normal(0.05));
//!
//! let significance = fisher_test(&data, &line, Confidence::P95).unwrap();
//! assert!(significance.significant());
//! ```
use crate::error::{Error, Result};

mod special;

mod shapiro;
pub use shapiro::{shapiro_wilk, ShapiroWilk};

mod fisher;
pub use fisher::{fisher_test, FDistribution, FisherTest};

/// Standard confidence levels for hypothesis tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Confidence {
    /// 90% confidence level
    P90,

    /// 95% confidence level
    P95,

    /// 98% confidence level
    P98,

    /// 99% confidence level
    P99,

    /// Custom confidence level, as a fraction in `(0, 1)`
    Custom(f64),
}

impl Confidence {
    /// Returns the confidence level as a fraction.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        match self {
            Confidence::P90 => 0.9,
            Confidence::P95 => 0.95,
            Confidence::P98 => 0.98,
            Confidence::P99 => 0.99,
            Confidence::Custom(p) => *p,
        }
    }

    /// Returns the significance level, `α = 1 - confidence`.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        1.0 - self.percentage()
    }

    /// Checks that the level is a usable probability.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] unless the level is strictly between 0 and 1.
    pub fn validate(&self) -> Result<()> {
        let p = self.percentage();
        if p > 0.0 && p < 1.0 {
            Ok(())
        } else {
            Err(Error::InvalidParameter {
                name: "confidence",
                reason: "must be strictly between 0 and 1",
            })
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::P90 => write!(f, "90%"),
            Confidence::P95 => write!(f, "95%"),
            Confidence::P98 => write!(f, "98%"),
            Confidence::P99 => write!(f, "99%"),
            Confidence::Custom(p) => write!(f, "{}%", p * 100.0),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn confidence_levels() {
        assert_close!(Confidence::P95.alpha(), 0.05, tol = 1e-12);
        assert_close!(Confidence::P99.alpha(), 0.01, tol = 1e-12);
        assert_eq!(Confidence::Custom(0.8).percentage(), 0.8);
        assert_eq!(Confidence::P90.to_string(), "90%");
        assert_eq!(Confidence::Custom(0.5).to_string(), "50%");
    }

    #[test]
    fn confidence_validation() {
        assert!(Confidence::P98.validate().is_ok());
        assert!(Confidence::Custom(0.0).validate().is_err());
        assert!(Confidence::Custom(1.0).validate().is_err());
        assert!(Confidence::Custom(f64::NAN).validate().is_err());
    }
}
