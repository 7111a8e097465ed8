//! Paired observations used as regression input.
use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// A validated set of paired observations `(x, y)`.
///
/// The X values are the feature, the Y values the dependent variable. A dataset
/// always has at least one point, X and Y always have the same length, and
/// every value is finite; [`Dataset::new`] enforces all three.
///
/// The values can be borrowed, so fitting literal arrays does not copy them.
///
/// # Example
/// ```
/// # use linfit::Dataset;
/// let salary = [35.0, 45.0, 190.0, 200.0, 40.0];
/// let score = [401.0, 574.0, 874.0, 919.0, 459.0];
/// let data = Dataset::new(&salary[..], &score[..]).unwrap();
/// assert_eq!(data.len(), 5);
///
/// assert!(Dataset::new(&salary[..], &score[..4]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<'data, T: Value = f64> {
    x: Cow<'data, [T]>,
    y: Cow<'data, [T]>,
}
impl<'data, T: Value> Dataset<'data, T> {
    /// Creates a dataset from X and Y values.
    ///
    /// # Errors
    /// - [`Error::NoData`] if there are no values.
    /// - [`Error::LengthMismatch`] if X and Y differ in length.
    /// - [`Error::InvalidParameter`] if a value is NaN or infinite.
    pub fn new(x: impl Into<Cow<'data, [T]>>, y: impl Into<Cow<'data, [T]>>) -> Result<Self> {
        let (x, y) = (x.into(), y.into());

        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        } else if x.is_empty() {
            return Err(Error::NoData);
        }

        if !x.iter().all(Value::is_finite_value) {
            return Err(Error::InvalidParameter {
                name: "x",
                reason: "values must be finite",
            });
        }
        if !y.iter().all(Value::is_finite_value) {
            return Err(Error::InvalidParameter {
                name: "y",
                reason: "values must be finite",
            });
        }

        Ok(Self { x, y })
    }

    /// Creates an owned dataset from `(x, y)` pairs.
    ///
    /// # Errors
    /// Same as [`Dataset::new`].
    pub fn from_pairs(pairs: &[(T, T)]) -> Result<Dataset<'static, T>> {
        let (x, y): (Vec<T>, Vec<T>) = pairs.iter().copied().unzip();
        Dataset::new(x, y)
    }

    /// The feature values
    #[must_use]
    pub fn x(&self) -> &[T] {
        &self.x
    }

    /// The dependent values
    #[must_use]
    pub fn y(&self) -> &[T] {
        &self.y
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; a dataset cannot be constructed empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of observations, as `T`
    #[must_use]
    pub fn n(&self) -> T {
        T::from_positive_int(self.len())
    }

    /// Iterates over the `(x, y)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Inclusive range of the X values
    #[must_use]
    pub fn x_range(&self) -> RangeInclusive<T> {
        bounds(&self.x)
    }

    /// Inclusive range of the Y values
    #[must_use]
    pub fn y_range(&self) -> RangeInclusive<T> {
        bounds(&self.y)
    }

    /// Number of distinct X values
    ///
    /// A straight line needs at least 2 to be determined.
    #[must_use]
    pub fn distinct_x(&self) -> usize {
        let mut xs = self.x.to_vec();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        xs.dedup();
        xs.len()
    }
}

fn bounds<T: Value>(values: &[T]) -> RangeInclusive<T> {
    let min = values
        .iter()
        .copied()
        .fold(T::infinity(), <T as nalgebra::RealField>::min);
    let max = values
        .iter()
        .copied()
        .fold(T::neg_infinity(), <T as nalgebra::RealField>::max);
    min..=max
}
