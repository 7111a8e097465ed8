use crate::{
    dataset::Dataset,
    diagnostics::{special, Confidence},
    error::{Error, Result},
    fit::Coefficients,
    statistics::{mean, residual_variance},
    value::Value,
};

/// F distribution (Fisher-Snedecor) with `d1` and `d2` degrees of freedom.
///
/// The distribution of the ratio of two chi-squared variables, each divided by
/// its degrees of freedom.
///
/// # Example
/// ```
/// # use linfit::diagnostics::FDistribution;
/// let f = FDistribution::new(1.0, 9.0).unwrap();
/// let critical = f.ppf(0.95).unwrap();
/// assert!((critical - 5.117).abs() < 1e-3);
/// assert!((f.sf(critical) - 0.05).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FDistribution {
    d1: f64,
    d2: f64,
}
impl FDistribution {
    /// Bisection steps when inverting the CDF
    const PPF_ITERATIONS: usize = 200;

    /// Create a new F distribution.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if either degree of freedom is not positive and finite.
    pub fn new(d1: f64, d2: f64) -> Result<Self> {
        if !d1.is_finite() || d1 <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "d1",
                reason: "numerator degrees of freedom must be positive",
            });
        }
        if !d2.is_finite() || d2 <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "d2",
                reason: "denominator degrees of freedom must be positive",
            });
        }

        Ok(Self { d1, d2 })
    }

    /// Numerator degrees of freedom
    #[must_use]
    pub fn dfn(&self) -> f64 {
        self.d1
    }

    /// Denominator degrees of freedom
    #[must_use]
    pub fn dfd(&self) -> f64 {
        self.d2
    }

    /// `P(F ≤ x)`
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }

        // CDF = I_{d1*x/(d1*x+d2)}(d1/2, d2/2)
        let t = self.d1 * x / (self.d1 * x + self.d2);
        special::betainc(self.d1 / 2.0, self.d2 / 2.0, t)
    }

    /// `P(F > x)`
    #[must_use]
    pub fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }

        // SF = I_{d2/(d1*x+d2)}(d2/2, d1/2)
        let t = self.d2 / (self.d1 * x + self.d2);
        special::betainc(self.d2 / 2.0, self.d1 / 2.0, t)
    }

    /// Quantile function, the `x` for which `cdf(x) = p`.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if `p` is outside of `[0, 1]`.
    pub fn ppf(&self, p: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidParameter {
                name: "p",
                reason: "probability must be within [0, 1]",
            });
        }

        if p == 0.0 {
            return Ok(0.0);
        } else if p == 1.0 {
            return Ok(f64::INFINITY);
        }

        // Bracket, then bisect; the CDF is monotone
        let mut lo = 0.0;
        let mut hi = 1.0;
        while self.cdf(hi) < p {
            lo = hi;
            hi *= 2.0;
            if !hi.is_finite() {
                return Ok(f64::INFINITY);
            }
        }

        for _ in 0..Self::PPF_ITERATIONS {
            let mid = 0.5 * (lo + hi);
            if self.cdf(mid) < p {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Ok(0.5 * (lo + hi))
    }
}

/// Result of a [`fisher_test`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisherTest {
    /// The F statistic, `MSf / MSo`
    pub f: f64,

    /// Critical value of F at the chosen significance level
    pub critical: f64,

    /// Probability of an F at least this large if the model explained nothing
    pub p_value: f64,

    /// Numerator degrees of freedom, `p - 1`
    pub df1: usize,

    /// Denominator degrees of freedom, `n - p`
    pub df2: usize,

    /// Significance level the critical value was taken at
    pub alpha: f64,
}
impl FisherTest {
    /// True if the model is statistically significant: `F > critical`
    #[must_use]
    pub fn significant(&self) -> bool {
        self.f > self.critical
    }
}
impl std::fmt::Display for FisherTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fisher criterion = {}", self.f)?;
        writeln!(
            f,
            "Critical value (alpha = {}, df = {}, {}) = {}",
            self.alpha, self.df1, self.df2, self.critical
        )?;
        if self.significant() {
            write!(f, "The model is statistically significant")
        } else {
            write!(f, "The relationship is explained by random factors")
        }
    }
}

/// Number of parameters in a straight line
const PARAMETERS: usize = 2;

/// Fisher F-test of the significance of a fitted line.
///
/// Compares the variance the line explains with the variance it leaves in the
/// residuals. The model is significant when `F` exceeds the critical value of the
/// F distribution at `1 - alpha`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// SSf = Σ (ŷ_i - mean(y))²      df1 = p - 1
/// SSo = Σ (y_i - ŷ_i)²          df2 = n - p
/// F   = (SSf / df1) / (SSo / df2)    SSo / df2 is the residual variance
/// where
///   ŷ_i = b0 + b1·x_i, p = 2 parameters
/// ```
/// </div>
///
/// # Errors
/// - [`Error::InsufficientData`] if there are 2 points or fewer.
/// - [`Error::DivisionByZero`] if the line passes through every point.
/// - [`Error::InvalidParameter`] if the confidence level is not within `(0, 1)`.
///
/// # Example
/// ```
/// # use linfit::{Dataset, fit, diagnostics::{fisher_test, Confidence}};
/// let x = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
/// let y = [8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68];
/// let data = Dataset::new(&x[..], &y[..]).unwrap();
/// let line = fit::normal_equation(&data, 3).unwrap();
///
/// let test = fisher_test(&data, &line, Confidence::P95).unwrap();
/// assert!(test.significant());
/// ```
pub fn fisher_test<T: Value>(
    data: &Dataset<T>,
    line: &Coefficients<T>,
    confidence: Confidence,
) -> Result<FisherTest> {
    confidence.validate()?;
    let alpha = confidence.alpha();

    let predicted = line.predict(data);
    let ms_residual = residual_variance(data.y(), &predicted, PARAMETERS)?;
    let ms_residual = ms_residual.to_f64().ok_or(Error::CastFailed)?;
    if ms_residual <= 0.0 {
        return Err(Error::DivisionByZero("residual sum of squares is zero"));
    }

    let y_mean = mean(data.y().iter().copied());
    let ss_fact = predicted
        .iter()
        .fold(T::zero(), |acc, &p| acc + Value::powi(p - y_mean, 2));
    let ss_fact = ss_fact.to_f64().ok_or(Error::CastFailed)?;

    let (df1, df2) = (PARAMETERS - 1, data.len() - PARAMETERS);
    let f = (ss_fact / df1 as f64) / ms_residual;

    let distribution = FDistribution::new(df1 as f64, df2 as f64)?;
    let critical = distribution.ppf(1.0 - alpha)?;
    let p_value = distribution.sf(f);

    log::debug!("Fisher test: F = {f}, critical = {critical}, p = {p_value}");
    Ok(FisherTest {
        f,
        critical,
        p_value,
        df1,
        df2,
        alpha,
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_close;

    fn anscombe() -> Dataset<'static> {
        Dataset::new(
            vec![10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0],
            vec![8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68],
        )
        .unwrap()
    }

    #[test]
    fn f_distribution_creation() {
        let f = FDistribution::new(5.0, 10.0).unwrap();
        assert_eq!(f.dfn(), 5.0);
        assert_eq!(f.dfd(), 10.0);
        assert!(FDistribution::new(0.0, 10.0).is_err());
        assert!(FDistribution::new(5.0, -1.0).is_err());
        assert!(FDistribution::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn f_distribution_quantiles() {
        let f = FDistribution::new(5.0, 10.0).unwrap();
        assert_close!(f.ppf(0.95).unwrap(), 3.325_835, tol = 1e-5);
        assert_close!(f.cdf(3.325_835), 0.95, tol = 1e-6);

        let f = FDistribution::new(1.0, 8.0).unwrap();
        assert_close!(f.ppf(0.95).unwrap(), 5.317_655, tol = 1e-5);

        assert_eq!(f.ppf(0.0).unwrap(), 0.0);
        assert_eq!(f.ppf(1.0).unwrap(), f64::INFINITY);
        assert!(f.ppf(1.5).is_err());
    }

    #[test]
    fn f_distribution_tails_sum_to_one() {
        let f = FDistribution::new(3.0, 20.0).unwrap();
        for x in [0.1, 0.5, 1.0, 3.5, 10.0] {
            assert_close!(f.cdf(x) + f.sf(x), 1.0, tol = 1e-12);
        }
        assert_eq!(f.cdf(-1.0), 0.0);
        assert_eq!(f.sf(0.0), 1.0);
    }

    #[test]
    fn anscombe_is_significant() {
        let data = anscombe();
        let line = Coefficients::new(3.0, 0.5);
        let test = fisher_test(&data, &line, Confidence::P95).unwrap();

        assert_close!(test.f, 17.983_396, tol = 1e-5);
        assert_close!(test.critical, 5.117_355, tol = 1e-5);
        assert_close!(test.p_value, 0.002_172, tol = 1e-5);
        assert_eq!((test.df1, test.df2), (1, 9));
        assert_close!(test.alpha, 0.05, tol = 1e-12);
        assert!(test.significant());
    }

    #[test]
    fn denominator_is_the_residual_variance() {
        let data = anscombe();
        let line = Coefficients::new(3.0, 0.5);
        let test = fisher_test(&data, &line, Confidence::P95).unwrap();

        let predicted = line.predict(&data);
        let y_mean = mean(data.y().iter().copied());
        let ss_fact: f64 = predicted.iter().map(|p| (p - y_mean) * (p - y_mean)).sum();
        let ms_residual = residual_variance(data.y(), &predicted, 2).unwrap();
        assert_close!(test.f, ss_fact / ms_residual, tol = 1e-9);
    }

    #[test]
    fn flat_line_is_not_significant() {
        let data = Dataset::new(vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 3.0, 1.0, 3.0]).unwrap();
        let line = Coefficients::new(1.0, 0.4);
        let test = fisher_test(&data, &line, Confidence::P95).unwrap();
        assert!(!test.significant());
        assert!(test.to_string().ends_with("random factors"));
    }

    #[test]
    fn too_few_points() {
        let data = Dataset::new(vec![1.0, 2.0], vec![1.0, 3.0]).unwrap();
        let line = Coefficients::new(-1.0, 2.0);
        assert_eq!(
            fisher_test(&data, &line, Confidence::P95),
            Err(Error::InsufficientData { needed: 3, got: 2 })
        );
    }

    #[test]
    fn perfect_fit_has_no_residual_variance() {
        let data = Dataset::new(vec![1.0, 2.0, 3.0], vec![3.0, 5.0, 7.0]).unwrap();
        let line = Coefficients::new(1.0, 2.0);
        assert_eq!(
            fisher_test(&data, &line, Confidence::P95),
            Err(Error::DivisionByZero("residual sum of squares is zero"))
        );
    }

    #[test]
    fn invalid_confidence() {
        let data = anscombe();
        let line = Coefficients::new(3.0, 0.5);
        assert!(matches!(
            fisher_test(&data, &line, Confidence::Custom(1.5)),
            Err(Error::InvalidParameter { name: "confidence", .. })
        ));
    }
}
