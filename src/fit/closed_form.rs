use crate::{
    dataset::Dataset,
    error::{Error, Result},
    fit::Coefficients,
    statistics::mean,
    value::Value,
};

/// Ordinary least squares from the sample moments of the dataset.
///
/// With `intercept` the line is free to cross the Y axis anywhere; without it the
/// line is forced through the origin and `b0` is exactly zero.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// with intercept:
///   b1 = (mean(X·Y) - mean(X)·mean(Y)) / (mean(X²) - mean(X)²)
///   b0 = mean(Y) - b1·mean(X)
///
/// through the origin:
///   b1 = Σ(X·Y) / Σ(X²)
///   b0 = 0
/// ```
/// </div>
///
/// Both coefficients are rounded to `precision` decimal digits.
///
/// # Errors
/// [`Error::DivisionByZero`] if the denominator vanishes:
/// - with `intercept`, when every X is the same value
/// - without, when every X is zero
///
/// # Example
/// ```
/// # use linfit::{Dataset, fit::closed_form};
/// let data = Dataset::new(vec![30.0, 30.0, 40.0, 40.0], vec![37.0, 47.0, 50.0, 60.0]).unwrap();
/// let line = closed_form(&data, true, 3).unwrap();
/// assert_eq!(line.as_tuple(), (3.0, 1.3));
/// ```
pub fn closed_form<T: Value>(
    data: &Dataset<T>,
    intercept: bool,
    precision: u32,
) -> Result<Coefficients<T>> {
    let line = if intercept {
        with_intercept(data)?
    } else {
        through_origin(data)?
    };

    Ok(line.rounded(precision))
}

fn with_intercept<T: Value>(data: &Dataset<T>) -> Result<Coefficients<T>> {
    if data.distinct_x() < 2 {
        return Err(Error::DivisionByZero("X has no variance"));
    }

    let x_mean = mean(data.x().iter().copied());
    let y_mean = mean(data.y().iter().copied());
    let xy_mean = mean(data.iter().map(|(x, y)| x * y));
    let xx_mean = mean(data.x().iter().map(|&x| x * x));

    let denominator = xx_mean - x_mean * x_mean;
    if denominator <= T::zero() || !denominator.is_finite_value() {
        return Err(Error::DivisionByZero("X has no variance"));
    }

    let slope = (xy_mean - x_mean * y_mean) / denominator;
    let intercept = y_mean - slope * x_mean;
    Ok(Coefficients::new(intercept, slope))
}

fn through_origin<T: Value>(data: &Dataset<T>) -> Result<Coefficients<T>> {
    let xy_sum = data.iter().fold(T::zero(), |acc, (x, y)| acc + x * y);
    let xx_sum = data.x().iter().fold(T::zero(), |acc, &x| acc + x * x);

    if xx_sum.is_zero() || !xx_sum.is_finite_value() {
        return Err(Error::DivisionByZero("every X is zero"));
    }

    Ok(Coefficients::new(T::zero(), xy_sum / xx_sum))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_close, test::credit_scoring};

    #[test]
    fn credit_scoring_with_intercept() {
        let line = closed_form(&credit_scoring(), true, 3).unwrap();
        assert_eq!(line.as_tuple(), (444.177, 2.621));
    }

    #[test]
    fn credit_scoring_through_origin() {
        let line = closed_form(&credit_scoring(), false, 5).unwrap();
        assert_eq!(line.intercept(), 0.0);
        assert_eq!(line.slope(), 5.889_82);
    }

    #[test]
    fn exact_line_is_recovered() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|x| 2.0 + 3.0 * x).collect();
        let data = Dataset::new(&x[..], y).unwrap();

        let line = closed_form(&data, true, 6).unwrap();
        assert_close!(line.intercept(), 2.0, tol = 1e-9);
        assert_close!(line.slope(), 3.0, tol = 1e-9);
    }

    #[test]
    fn precision_controls_rounding() {
        let data = credit_scoring();
        let line = closed_form(&data, true, 1).unwrap();
        assert_eq!(line.as_tuple(), (444.2, 2.6));

        let exact = closed_form(&data, true, 10).unwrap();
        assert_close!(exact.intercept(), 444.177_357_3, tol = 1e-6);
    }

    #[test]
    fn constant_x_is_rejected() {
        let data = Dataset::new(vec![4.0, 4.0, 4.0], vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            closed_form(&data, true, 3),
            Err(Error::DivisionByZero("X has no variance"))
        );

        // A line through the origin only needs one non-zero X
        let line = closed_form(&data, false, 3).unwrap();
        assert_eq!(line.slope(), 0.5);
    }

    #[test]
    fn zero_x_through_origin_is_rejected() {
        let data = Dataset::new(vec![0.0, 0.0], vec![1.0, 2.0]).unwrap();
        assert_eq!(
            closed_form(&data, false, 3),
            Err(Error::DivisionByZero("every X is zero"))
        );
    }

    #[test]
    fn single_point() {
        let data = Dataset::new(vec![2.0], vec![6.0]).unwrap();
        assert!(closed_form(&data, true, 3).is_err());
        assert_eq!(closed_form(&data, false, 3).unwrap().slope(), 3.0);
    }

    #[test]
    fn works_for_f32() {
        let data = Dataset::new(vec![30.0_f32, 30.0, 40.0, 40.0], vec![37.0, 47.0, 50.0, 60.0]).unwrap();
        let line = closed_form(&data, true, 2).unwrap();
        assert_close!(line.intercept(), 3.0, tol = 1e-2);
        assert_close!(line.slope(), 1.3, tol = 1e-3);
    }
}
