//! The three ways of estimating a straight line `y = b0 + b1·x`
//!
//! All three take a [`Dataset`] and return [`Coefficients`], rounded to the requested
//! number of decimal digits. None of them depends on another, and none of them prints anything.
//!
//! - [`closed_form`]: ordinary least squares straight from the sample moments.
//!   Can also fit a line through the origin (`b0 = 0`).
//! - [`normal_equation`]: builds the design matrix and solves `B = (XᵀX)⁻¹ XᵀY`.
//!   Always fits an intercept.
//! - [`gradient_descent`]: batch gradient descent on the squared error, with an early stop
//!   once the degree of change drops below [`CONVERGENCE_THRESHOLD`].
//!
//! On well-conditioned data the first two agree to within rounding, and the third converges
//! toward them given enough epochs and a small enough learning rate.
//!
//! # Example
//! ```
//! # use linfit::{Dataset, fit};
//! let salary = [35.0, 45.0, 190.0, 200.0, 40.0, 70.0, 54.0, 150.0, 120.0, 110.0];
//! let score = [401.0, 574.0, 874.0, 919.0, 459.0, 739.0, 653.0, 902.0, 746.0, 832.0];
//! let data = Dataset::new(&salary[..], &score[..]).unwrap();
//!
//! let scalar = fit::closed_form(&data, true, 3).unwrap();
//! let matrix = fit::normal_equation(&data, 3).unwrap();
//! assert_eq!(scalar.intercept(), 444.177);
//! assert_eq!(matrix.slope(), 2.621);
//! ```
use crate::{dataset::Dataset, value::Value};

mod closed_form;
pub use closed_form::closed_form;

mod matrix;
pub use matrix::{design_matrix, normal_equation};

mod descent;
pub use descent::*;

/// Number of decimal digits coefficients are rounded to unless asked otherwise
pub const DEFAULT_PRECISION: u32 = 3;

/// Intercept and slope of the line `y = b0 + b1·x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients<T: Value = f64> {
    intercept: T,
    slope: T,
}
impl<T: Value> Coefficients<T> {
    /// Creates a coefficient pair from `b0` and `b1`
    #[must_use]
    pub fn new(intercept: T, slope: T) -> Self {
        Self { intercept, slope }
    }

    /// `b0`, the value of the line at `x = 0`
    #[must_use]
    pub fn intercept(&self) -> T {
        self.intercept
    }

    /// `b1`, the change in `y` per unit of `x`
    #[must_use]
    pub fn slope(&self) -> T {
        self.slope
    }

    /// Returns `(b0, b1)`
    #[must_use]
    pub fn as_tuple(&self) -> (T, T) {
        (self.intercept, self.slope)
    }

    /// Evaluates the line at `x`
    #[must_use]
    pub fn y(&self, x: T) -> T {
        self.intercept + self.slope * x
    }

    /// Both coefficients rounded to `digits` decimal places
    #[must_use]
    pub fn rounded(&self, digits: u32) -> Self {
        Self::new(
            Value::round_to(self.intercept, digits),
            Value::round_to(self.slope, digits),
        )
    }

    /// The predicted `y` for every `x` in the dataset
    #[must_use]
    pub fn predict(&self, data: &Dataset<T>) -> Vec<T> {
        data.x().iter().map(|&x| self.y(x)).collect()
    }

    /// Observed minus predicted `y` for every point in the dataset
    #[must_use]
    pub fn residuals(&self, data: &Dataset<T>) -> Vec<T> {
        data.iter().map(|(x, y)| y - self.y(x)).collect()
    }

    /// R² of this line against the dataset.
    ///
    /// See [`crate::statistics::r_squared`].
    #[must_use]
    pub fn r_squared(&self, data: &Dataset<T>) -> T {
        crate::statistics::r_squared(data.y().iter().copied(), self.predict(data).into_iter())
    }
}
impl<T: Value> From<(T, T)> for Coefficients<T> {
    fn from((intercept, slope): (T, T)) -> Self {
        Self::new(intercept, slope)
    }
}
impl<T: Value> std::fmt::Display for Coefficients<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::display::format_equation(f, self)
    }
}

/// The estimation method that produced a set of coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// [`closed_form`]
    ClosedForm,

    /// [`normal_equation`]
    Matrix,

    /// [`gradient_descent`]
    GradientDescent,
}
impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::ClosedForm => write!(f, "mathematical method"),
            Method::Matrix => write!(f, "matrix method"),
            Method::GradientDescent => write!(f, "gradient descent method"),
        }
    }
}
