use crate::{
    diagnostics::special::{normal_ppf, normal_sf, polynomial},
    error::{Error, Result},
    value::Value,
};

/// Result of a [`shapiro_wilk`] test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    /// The W statistic, in `(0, 1]`; close to 1 for normal samples
    pub w: f64,

    /// Probability of a W this small if the sample were drawn from a normal distribution
    pub p_value: f64,
}
impl ShapiroWilk {
    /// True if normality cannot be rejected at significance level `alpha`
    #[must_use]
    pub fn is_normal(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}
impl std::fmt::Display for ShapiroWilk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W = {}, p = {}", self.w, self.p_value)
    }
}

/// Shapiro-Wilk test of the hypothesis that a sample comes from a normal distribution.
///
/// Typically applied to the residuals of a fit: a linear model assumes they are normal.
/// A small p-value is evidence against normality.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// Royston's approximation (AS R94), valid for 3 to 5000 values.
/// ```math
/// W = (Σ a_i · (x_(n+1-i) - x_(i)))² / Σ (x_i - mean)²
/// where
///   x_(i) = i-th smallest value
///   a_i   = coefficients derived from the expected normal order statistics
/// ```
/// The p-value comes from a normalizing transform of `ln(1 - W)` whose mean and
/// deviation are polynomials in `n` (n ≤ 11) or `ln n` (n ≥ 12). For `n = 3` it is exact.
/// </div>
///
/// # Errors
/// - [`Error::InsufficientData`] for fewer than 3 values.
/// - [`Error::DivisionByZero`] if every value is the same.
/// - [`Error::CastFailed`] if a value cannot be represented as `f64`.
///
/// # Example
/// ```
/// # use linfit::diagnostics::shapiro_wilk;
/// let sample = [2.1, 3.4, 1.9, 5.6, 4.4, 3.3, 2.8, 4.1, 3.9, 3.0, 3.7, 2.5];
/// let test = shapiro_wilk(&sample).unwrap();
/// assert!(test.w > 0.97);
/// assert!(test.is_normal(0.05));
/// ```
pub fn shapiro_wilk<T: Value>(sample: &[T]) -> Result<ShapiroWilk> {
    let n = sample.len();
    if n < 3 {
        return Err(Error::InsufficientData { needed: 3, got: n });
    }

    let mut x = sample
        .iter()
        .map(|v| v.to_f64().ok_or(Error::CastFailed))
        .collect::<Result<Vec<_>>>()?;
    x.sort_by(f64::total_cmp);

    let range = x[n - 1] - x[0];
    if range <= 0.0 || !range.is_finite() {
        return Err(Error::DivisionByZero("sample has zero range"));
    }

    let a = coefficients(n);
    let nf = n as f64;
    let mean = x.iter().sum::<f64>() / nf;
    let ss = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    let numerator = a
        .iter()
        .enumerate()
        .map(|(i, a)| a * (x[n - 1 - i] - x[i]))
        .sum::<f64>()
        .powi(2);
    let w = (numerator / ss).min(1.0);

    let p_value = p_value(w, n);
    log::debug!("Shapiro-Wilk over {n} values: W = {w}, p = {p_value}");

    Ok(ShapiroWilk { w, p_value })
}

/// The antisymmetric weights `a_1..a_(n/2)` for the ordered sample
fn coefficients(n: usize) -> Vec<f64> {
    const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_19, 4.434_685, -2.706_056];
    const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];

    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let half = n / 2;
    let nf = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal_ppf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();

    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let mut a = vec![0.0; half];
    a[0] = polynomial(&C1, rsn) - m[0] / ssumm2;

    let (first_free, fac) = if n > 5 {
        a[1] = -m[1] / ssumm2 + polynomial(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a[0].powi(2) - 2.0 * a[1].powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a[0].powi(2))).sqrt();
        (1, fac)
    };

    for i in first_free..half {
        a[i] = -m[i] / fac;
    }

    a
}

/// Significance of W for a sample of `n` values
fn p_value(w: f64, n: usize) -> f64 {
    // Exact for n = 3: 6/π · (asin(√W) - asin(√0.75))
    const PI6: f64 = 1.909_859_317_102_744;
    const STQR: f64 = 1.047_197_551_196_598;

    const SMALL_GAMMA: [f64; 2] = [-2.273, 0.459];
    const SMALL_MEAN: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
    const SMALL_SIGMA: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
    const LARGE_MEAN: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
    const LARGE_SIGMA: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];

    if n == 3 {
        return (PI6 * (w.sqrt().asin() - STQR)).clamp(0.0, 1.0);
    }

    let nf = n as f64;
    let w1 = (1.0 - w).ln();

    let (y, mean, sigma) = if n <= 11 {
        let gamma = polynomial(&SMALL_GAMMA, nf);
        if w1 >= gamma {
            return 1e-99;
        }

        let y = -(gamma - w1).ln();
        (y, polynomial(&SMALL_MEAN, nf), polynomial(&SMALL_SIGMA, nf).exp())
    } else {
        let ln_n = nf.ln();
        (w1, polynomial(&LARGE_MEAN, ln_n), polynomial(&LARGE_SIGMA, ln_n).exp())
    };

    normal_sf((y - mean) / sigma)
}
