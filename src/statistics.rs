//! Functions for describing datasets and evaluating fitted lines
//!
//! # Goodness of Fit
//! - [`r_squared`]: Proportion of variance explained by the predictions. Higher is better (0 to 1).
//! - [`coefficient_of_determination`]: Squared Pearson correlation between X and Y.
//!   For a least-squares line with an intercept this equals [`r_squared`] of the fit.
//! - [`residual_variance`]: Unbiased estimate of the variance of errors after fitting.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//! - [`min`]: Smallest value of a dataset.
//! - [`pearson_correlation`]: Linear correlation between two series.
//!
//! For hypothesis tests on a fit (residual normality, model significance), see [`crate::diagnostics`].
//!
//! # Examples
//!
//! ```rust
//! use linfit::statistics::{r_squared, residual_variance};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! println!("R² = {r2}");
//!
//! let variance = residual_variance(&y, &y_fit, 2).unwrap();
//! println!("σ² = {variance}");
//! ```
use crate::{
    error::{Error, Result},
    value::Value,
};

/// Unbiased variance of the residuals left by a model with `parameters` coefficients.
///
/// This is the mean square of the residuals, the denominator of the Fisher F statistic.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (n - k)
/// where
///   n = number of observations, k = number of model parameters
/// ```
/// </div>
///
/// # Errors
/// [`Error::InsufficientData`] if there are no more observations than parameters,
/// since no degrees of freedom are left for the residuals.
///
/// # Example
/// ```rust
/// # use linfit::statistics::residual_variance;
/// let y = [1.0, 2.0, 3.0];
/// let y_fit = [1.0, 2.0, 5.0];
/// assert_eq!(residual_variance(&y, &y_fit, 2).unwrap(), 4.0);
/// assert!(residual_variance(&y[..2], &y_fit[..2], 2).is_err());
/// ```
pub fn residual_variance<T: Value>(y: &[T], y_fit: &[T], parameters: usize) -> Result<T> {
    let n = y.len().min(y_fit.len());
    if n <= parameters {
        return Err(Error::InsufficientData {
            needed: parameters + 1,
            got: n,
        });
    }

    let ss_residual = y
        .iter()
        .zip(y_fit)
        .fold(T::zero(), |acc, (&y, &y_fit)| acc + Value::powi(y - y_fit, 2));
    Ok(ss_residual / T::try_cast(n - parameters)?)
}

/// Calculate the R-squared value for a set of predictions.
///
/// R-squared tells you how well the predictions explain the data:
/// - `0` means the predictions explain none of the variation.
/// - `1` means they explain all of it.
/// - Negative values mean the predictions are worse than the mean of `y`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// # Parameters
/// - `y`: The actual (observed) values.
/// - `y_fit`: The predicted values from the model.
///
/// # Returns
/// The proportion of variance explained. NaN if `y` is constant.
///
/// # Example
/// ```rust
/// # use linfit::statistics::r_squared;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let r2 = r_squared(y.into_iter(), y_fit.into_iter());
/// assert!(r2 > 0.98);
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    T::one() - (ss_residual / ss_total)
}

/// Computes the arithmetic mean of a sequence of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
/// </div>
///
/// # Returns
/// The arithmetic mean of all elements in `data`.
/// - Returns NaN if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = linfit::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}

/// Smallest value in a sequence.
///
/// Returns `T::infinity()` if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![401.0, 574.0, 874.0];
/// assert_eq!(linfit::statistics::min(values.into_iter()), 401.0);
/// ```
pub fn min<T: Value>(data: impl Iterator<Item = T>) -> T {
    data.fold(T::infinity(), <T as nalgebra::RealField>::min)
}

/// Pearson correlation coefficient between two series.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// r = Σ (x_i - x_mean)(y_i - y_mean) / sqrt( Σ (x_i - x_mean)² · Σ (y_i - y_mean)² )
/// ```
/// </div>
///
/// # Errors
/// [`Error::DivisionByZero`] if either series is constant (or empty).
///
/// # Example
/// ```
/// # use linfit::statistics::pearson_correlation;
/// let r = pearson_correlation(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.5]).unwrap();
/// assert!(r > 0.99);
/// assert!(pearson_correlation(&[1.0, 1.0], &[2.0, 3.0]).is_err());
/// ```
pub fn pearson_correlation<T: Value>(x: &[T], y: &[T]) -> Result<T> {
    let x_mean = mean(x.iter().copied());
    let y_mean = mean(y.iter().copied());

    let mut covariance = T::zero();
    let mut x_ss = T::zero();
    let mut y_ss = T::zero();
    for (&x, &y) in x.iter().zip(y) {
        covariance += (x - x_mean) * (y - y_mean);
        x_ss += Value::powi(x - x_mean, 2);
        y_ss += Value::powi(y - y_mean, 2);
    }

    let denominator = (x_ss * y_ss).sqrt();
    if denominator.is_zero() || !denominator.is_finite_value() {
        return Err(Error::DivisionByZero("correlation of a constant series"));
    }

    Ok(covariance / denominator)
}

/// Coefficient of determination of the linear relationship between X and Y.
///
/// This is the squared [`pearson_correlation`]. It does not depend on any fitted
/// coefficients; to score a specific line use [`r_squared`] or
/// [`crate::Coefficients::r_squared`].
///
/// # Errors
/// [`Error::DivisionByZero`] if either series is constant.
///
/// # Example
/// ```
/// # use linfit::statistics::coefficient_of_determination;
/// let x = [30.0, 30.0, 40.0, 40.0];
/// let y = [37.0, 47.0, 50.0, 60.0];
/// let r2 = coefficient_of_determination(&x, &y).unwrap();
/// assert!((r2 - 0.62825_f64).abs() < 1e-5);
/// ```
pub fn coefficient_of_determination<T: Value>(x: &[T], y: &[T]) -> Result<T> {
    Ok(Value::powi(pearson_correlation(x, y)?, 2))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn residual_variance_zero_error() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(residual_variance(&y, &y, 1), Ok(0.0));
    }

    #[test]
    fn residual_variance_simple_case() {
        // errors: [1, 2], squared = [1, 4], sum = 5
        // n=2, n-k=1, variance = 5
        let var = residual_variance(&[1.0, 2.0], &[0.0, 0.0], 1).unwrap();
        assert_eq!(var, 5.0);
    }

    #[test]
    fn residual_variance_needs_degrees_of_freedom() {
        assert_eq!(
            residual_variance(&[1.0, 2.0], &[1.0, 2.0], 2),
            Err(Error::InsufficientData { needed: 3, got: 2 })
        );
    }

    #[test]
    fn residual_variance_of_a_fitted_line() {
        // Anscombe I around y = 3 + 0.5x leaves SSo = 13.7627 over 9 degrees of freedom
        let data = crate::Dataset::new(
            vec![10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0],
            vec![8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68],
        )
        .unwrap();
        let predicted = crate::Coefficients::new(3.0, 0.5).predict(&data);
        let var = residual_variance(data.y(), &predicted, 2).unwrap();
        assert_close!(var, 13.7627 / 9.0, tol = 1e-4);
    }

    #[test]
    fn r_squared_perfect_fit() {
        let y = vec![1.0, 2.0, 3.0];
        let r2 = r_squared::<f64>(y.clone().into_iter(), y.into_iter());
        assert_eq!(r2, 1.0);
    }

    #[test]
    fn r_squared_bad_fit() {
        // mean(y) = 2, SST = SSE = 2
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 2.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, 0.0);
    }

    #[test]
    fn r_squared_negative_case() {
        // SST = 2, SSE = 9² + 8² + 7² = 194
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![10.0, 10.0, 10.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, -96.0);
    }

    #[test]
    fn r_squared_constant_y() {
        let y = vec![2.0, 2.0, 2.0];
        let r2 = r_squared::<f64>(y.clone().into_iter(), y.into_iter());
        assert!(r2.is_nan());
    }

    #[test]
    fn descriptive() {
        let values = [2.0, 5.0, 1.0, 9.0];
        assert_eq!(mean(values.iter().copied()), 4.25);
        assert_eq!(min(values.iter().copied()), 1.0);
        assert_eq!(min(std::iter::empty::<f64>()), f64::INFINITY);
        assert!(mean(std::iter::empty::<f64>()).is_nan());
    }

    #[test]
    fn correlation_signs() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_close!(pearson_correlation(&x, &[2.0, 4.0, 6.0, 8.0]).unwrap(), 1.0, tol = 1e-12);
        assert_close!(pearson_correlation(&x, &[8.0, 6.0, 4.0, 2.0]).unwrap(), -1.0, tol = 1e-12);
    }

    #[test]
    fn correlation_of_constant_fails() {
        assert_eq!(
            pearson_correlation(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]),
            Err(Error::DivisionByZero("correlation of a constant series"))
        );
        assert!(coefficient_of_determination(&[4.0, 4.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn determination_matches_fit_r_squared() {
        let data = crate::test::credit_scoring();
        let r2 = coefficient_of_determination(data.x(), data.y()).unwrap();
        assert_close!(r2, 0.787_64, tol = 1e-5);

        let line = crate::fit::closed_form(&data, true, 12).unwrap();
        assert_close!(line.r_squared(&data), r2, tol = 1e-9);
    }
}
