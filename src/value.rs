//! Numeric types for regression inputs and coefficients.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used in fitting, ensuring compatibility with nalgebra,
//! floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `ComplexField` to provide:
//!   - A canonical `two()` constant.
//!   - `try_cast` for safe type conversion with error handling.
//!   - `powi` and `abs` without method ambiguity between the numeric traits.
//!   - `round_to` for rounding to a number of decimal digits.
//!
//! # Example
//!
//! ```rust
//! use linfit::value::Value;
//!
//! let two = f64::two();
//! let squared = Value::powi(two, 2);
//! assert_eq!(Value::round_to(2.62053_f64, 3), 2.621);
//! ```
use crate::error::Error;

/// Numeric type for datasets and coefficients
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
    + std::fmt::Display
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Check if the value is neither infinite nor NaN
    fn is_finite_value(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Rounds the value to `digits` decimal places.
    ///
    /// Halfway cases round away from zero, not to even: `0.125` becomes `0.13` at 2 digits,
    /// where banker's rounding (as in Python's `round`) would give `0.12`.
    #[must_use]
    fn round_to(self, digits: u32) -> Self {
        let digits = i32::try_from(digits).unwrap_or(i32::MAX);
        let scale = Value::powi(Self::from_positive_int(10), digits);
        if !scale.is_finite_value() {
            return self;
        }

        let rounded = nalgebra::ComplexField::round(self * scale) / scale;
        if rounded.is_finite_value() {
            rounded
        } else {
            self
        }
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
        + std::fmt::Display
{
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn round_to_digits() {
        assert_eq!(Value::round_to(444.177_357_324_359_6_f64, 3), 444.177);
        assert_eq!(Value::round_to(2.620_538_882_402_765_f64, 3), 2.621);
        assert_eq!(Value::round_to(5.889_820_420_132_689_f64, 5), 5.889_82);
        assert_eq!(Value::round_to(-1.25_f64, 1), -1.3);
        assert_eq!(Value::round_to(0.125_f64, 2), 0.13);
        assert_eq!(Value::round_to(7.0_f64, 0), 7.0);
    }

    #[test]
    fn round_to_huge_precision_is_identity() {
        let x = 1.234_567_f64;
        assert_eq!(Value::round_to(x, 400), x);
    }

    #[test]
    fn round_to_f32() {
        let x = Value::round_to(3.14159_f32, 2);
        assert!((x - 3.14).abs() < 1e-6);
    }

    #[test]
    fn casts() {
        assert_eq!(<f64 as Value>::try_cast(3_usize).unwrap(), 3.0);
        assert_eq!(f64::from_positive_int(10), 10.0);
        assert_eq!(f64::two(), 2.0);
    }
}
