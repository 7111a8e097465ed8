use nalgebra::{DMatrix, DVector};

use crate::{
    dataset::Dataset,
    error::{Error, Result},
    fit::Coefficients,
    value::Value,
};

/// Number of coefficients in a straight line with intercept
const K: usize = 2;

/// Builds the `N x 2` design matrix of a dataset.
///
/// Column 0 is all ones (the intercept term), column 1 holds the raw X values.
///
/// # Example
/// ```
/// # use linfit::{Dataset, fit::design_matrix};
/// let data = Dataset::new(vec![30.0, 40.0], vec![37.0, 50.0]).unwrap();
/// let m = design_matrix(&data);
/// assert_eq!(m.shape(), (2, 2));
/// assert_eq!(m[(1, 0)], 1.0);
/// assert_eq!(m[(1, 1)], 40.0);
/// ```
#[must_use]
pub fn design_matrix<T: Value>(data: &Dataset<T>) -> DMatrix<T> {
    let mut matrix = DMatrix::zeros(data.len(), K);
    for (mut row, &x) in matrix.row_iter_mut().zip(data.x()) {
        row[0] = T::one();
        row[1] = x;
    }

    matrix
}

/// Least squares via the normal equations.
///
/// Always fits an intercept.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// M = [1 | X]             (N x 2 design matrix)
/// B = (MᵀM)⁻¹ · Mᵀ · Y
/// b0 = B[0], b1 = B[1]
/// ```
/// </div>
///
/// Both coefficients are rounded to `precision` decimal digits.
///
/// # Errors
/// [`Error::SingularMatrix`] if `MᵀM` cannot be inverted, which for a line
/// means X has fewer than two distinct values.
///
/// # Example
/// ```
/// # use linfit::{Dataset, fit::normal_equation};
/// let data = Dataset::new(vec![30.0, 30.0, 40.0, 40.0], vec![37.0, 47.0, 50.0, 60.0]).unwrap();
/// let line = normal_equation(&data, 3).unwrap();
/// assert_eq!(line.as_tuple(), (3.0, 1.3));
/// ```
pub fn normal_equation<T: Value>(data: &Dataset<T>, precision: u32) -> Result<Coefficients<T>> {
    let singular = Error::SingularMatrix {
        n: data.len(),
        k: K,
    };

    // Rank deficient even if rounding makes the inverse look usable
    if data.distinct_x() < K {
        return Err(singular);
    }

    let m = design_matrix(data);
    let y = DVector::from_column_slice(data.y());

    let mt = m.transpose();
    let xtx_inv = (&mt * &m).try_inverse().ok_or_else(|| singular.clone())?;
    let b = xtx_inv * (mt * y);

    if b.iter().any(|c| !c.is_finite_value()) {
        return Err(singular);
    }

    Ok(Coefficients::new(b[0], b[1]).rounded(precision))
}
