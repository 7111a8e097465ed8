use std::ops::ControlFlow;

use crate::{
    dataset::Dataset,
    error::{Error, Result},
    fit::{Coefficients, DEFAULT_PRECISION},
    statistics::{mean, min},
    value::Value,
};

/// Gradient descent stops early once the degree of change drops below this
pub const CONVERGENCE_THRESHOLD: f64 = 1e-6;

/// Configuration for [`gradient_descent`].
///
/// ```
/// # use linfit::fit::DescentOptions;
/// let options = DescentOptions {
///     intercept: true,
///     max_epochs: 1_000_000,
///     learning_rate: 3e-5,
///     ..Default::default()
/// };
/// assert!(options.reports(50_000));
/// assert!(!options.reports(50_001));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentOptions {
    /// Fit `b0` as well; otherwise the line passes through the origin
    pub intercept: bool,

    /// Upper bound on the number of epochs
    pub max_epochs: usize,

    /// Step size applied to each gradient
    pub learning_rate: f64,

    /// Decimal digits the final coefficients are rounded to
    pub precision: u32,
}
impl Default for DescentOptions {
    fn default() -> Self {
        Self {
            intercept: false,
            max_epochs: 100,
            learning_rate: 1e-6,
            precision: DEFAULT_PRECISION,
        }
    }
}
impl DescentOptions {
    /// True if progress is observed at epoch `index`.
    ///
    /// Progress is observed at every epoch that is a whole multiple of `max_epochs / 20`.
    /// That step may be fractional: with `max_epochs = 30` it is 1.5, so epochs 0, 3, 6... report.
    /// In general every `max_epochs / gcd(max_epochs, 20)`-th epoch reports, so a budget
    /// of 7 epochs reports only epoch 0.
    #[must_use]
    pub fn reports(&self, index: usize) -> bool {
        (index as u128 * 20) % self.max_epochs.max(1) as u128 == 0
    }

    /// Checks that the options describe a run that can make progress.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if `max_epochs` is zero, or `learning_rate`
    /// is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.max_epochs == 0 {
            return Err(Error::InvalidParameter {
                name: "max_epochs",
                reason: "must be at least 1",
            });
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "learning_rate",
                reason: "must be positive and finite",
            });
        }

        Ok(())
    }
}

/// State of a gradient descent run after one epoch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epoch<T: Value = f64> {
    /// Zero-based epoch number
    pub index: usize,

    /// Unrounded coefficients after this epoch's update
    pub coefficients: Coefficients<T>,

    /// `(Σ residual)² / N` at the updated coefficients
    pub loss: T,

    /// `sqrt(loss) / mean(Y)`
    pub degree_of_change: T,
}

/// Receives progress from [`gradient_descent`].
///
/// Called for the epochs selected by [`DescentOptions::reports`], and for the epoch
/// that triggers the early stop.
///
/// Implemented for closures, so you can collect the epochs yourself:
/// ```
/// # use linfit::{Dataset, fit::{gradient_descent, DescentOptions, Epoch}};
/// let data = Dataset::new(vec![1.0, 2.0, 3.0], vec![2.0, 4.1, 5.9]).unwrap();
/// let mut seen = vec![];
/// let mut collect = |e: &Epoch| seen.push(e.index);
/// gradient_descent(&data, &DescentOptions::default(), &mut collect).unwrap();
/// assert_eq!(seen[..3], [0, 5, 10]);
/// ```
pub trait DescentObserver<T: Value> {
    /// Called with the state after a reported epoch
    fn observe(&mut self, epoch: &Epoch<T>);
}
impl<T: Value, F: FnMut(&Epoch<T>)> DescentObserver<T> for F {
    fn observe(&mut self, epoch: &Epoch<T>) {
        self(epoch);
    }
}

/// Ignores all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct Quiet;
impl<T: Value> DescentObserver<T> for Quiet {
    fn observe(&mut self, _: &Epoch<T>) {}
}

/// Reports progress through the [`log`] facade at `info` level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;
impl<T: Value> DescentObserver<T> for LogProgress {
    fn observe(&mut self, epoch: &Epoch<T>) {
        let (b0, b1) = epoch.coefficients.as_tuple();
        let percent = epoch.degree_of_change * T::from_positive_int(100);
        log::info!(
            "Epoch {}: (b0, b1) = ({b0}, {b1}), loss = {:e}, change = {percent:e}%",
            epoch.index,
            epoch.loss,
        );
    }
}

/// Outcome of a [`gradient_descent`] run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descent<T: Value = f64> {
    coefficients: Coefficients<T>,
    unrounded: Coefficients<T>,
    epochs: usize,
    loss: T,
    degree_of_change: T,
    converged: bool,
}
impl<T: Value> Descent<T> {
    /// Final coefficients, rounded to [`DescentOptions::precision`]
    #[must_use]
    pub fn coefficients(&self) -> Coefficients<T> {
        self.coefficients
    }

    /// Final coefficients before rounding
    #[must_use]
    pub fn unrounded(&self) -> Coefficients<T> {
        self.unrounded
    }

    /// Number of epochs that ran
    #[must_use]
    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Loss after the last epoch
    #[must_use]
    pub fn loss(&self) -> T {
        self.loss
    }

    /// Degree of change after the last epoch
    #[must_use]
    pub fn degree_of_change(&self) -> T {
        self.degree_of_change
    }

    /// True if the run stopped early on [`CONVERGENCE_THRESHOLD`]
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Batch gradient descent on a straight line.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// start:
///   b0 = min(Y) with intercept, else 0
///   b1 = mean((Y - b0) / X)
///
/// each epoch, from the previous b0 and b1:
///   r_i  = b0 + b1·x_i - y_i
///   b1' = b1 - lr · (2/N) · Σ(r_i · x_i)
///   b0' = b0 - lr · (2/N) · Σ r_i       (stays 0 without intercept)
///
///   loss = (Σ r'_i)² / N
///   change = sqrt(loss) / mean(Y)
/// ```
/// The run stops after the first epoch whose change is below [`CONVERGENCE_THRESHOLD`],
/// or after `max_epochs`.
///
/// The loss squares the summed residuals rather than summing squared residuals,
/// so it measures how balanced the residuals are, not how small.
/// </div>
///
/// Progress goes to `observer`; pass [`Quiet`] to ignore it or [`LogProgress`] to log it.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `options` fail [`DescentOptions::validate`].
/// - [`Error::DivisionByZero`] if any X is zero, or the mean of Y is zero.
/// - [`Error::Diverged`] if the coefficients stop being finite; lower the learning rate.
/// - [`Error::CastFailed`] if the learning rate does not fit in `T`.
///
/// # Example
/// ```
/// # use linfit::{Dataset, fit::{gradient_descent, DescentOptions, Quiet}};
/// let data = Dataset::new(
///     vec![35.0, 45.0, 190.0, 200.0, 40.0, 70.0, 54.0, 150.0, 120.0, 110.0],
///     vec![401.0, 574.0, 874.0, 919.0, 459.0, 739.0, 653.0, 902.0, 746.0, 832.0],
/// ).unwrap();
///
/// let options = DescentOptions { max_epochs: 10_000, learning_rate: 1e-5, precision: 5, ..Default::default() };
/// let run = gradient_descent(&data, &options, &mut Quiet).unwrap();
/// assert_eq!(run.coefficients().as_tuple(), (0.0, 5.88982));
/// ```
pub fn gradient_descent<T: Value>(
    data: &Dataset<T>,
    options: &DescentOptions,
    observer: &mut impl DescentObserver<T>,
) -> Result<Descent<T>> {
    options.validate()?;
    let learning_rate = T::try_cast(options.learning_rate)?;
    let threshold = T::try_cast(CONVERGENCE_THRESHOLD)?;

    if data.x().iter().any(|x| x.is_zero()) {
        return Err(Error::DivisionByZero("X contains zero"));
    }

    let y_mean = mean(data.y().iter().copied());
    if y_mean.is_zero() {
        return Err(Error::DivisionByZero("mean of Y is zero"));
    }

    let b0 = if options.intercept {
        min(data.y().iter().copied())
    } else {
        T::zero()
    };
    let b1 = mean(data.iter().map(|(x, y)| (y - b0) / x));
    let start = Coefficients::new(b0, b1);

    log::debug!(
        "Gradient descent over {} points: start = {start:?}, {options:?}",
        data.len()
    );

    let stepper = Stepper {
        data,
        intercept: options.intercept,
        learning_rate,
        y_mean,
    };
    let seed = stepper.evaluate(usize::MAX, start);

    let outcome = (0..options.max_epochs).try_fold(seed, |previous, index| {
        let epoch = stepper.step(index, previous.coefficients);

        let (b0, b1) = epoch.coefficients.as_tuple();
        if !b0.is_finite_value() || !b1.is_finite_value() || !epoch.loss.is_finite_value() {
            return ControlFlow::Break(Err(Error::Diverged { epoch: index }));
        }

        let converged = epoch.degree_of_change < threshold;
        if options.reports(index) || converged {
            observer.observe(&epoch);
        }

        if converged {
            ControlFlow::Break(Ok(epoch))
        } else {
            ControlFlow::Continue(epoch)
        }
    });

    let (last, converged) = match outcome {
        ControlFlow::Continue(last) => (last, false),
        ControlFlow::Break(Ok(last)) => (last, true),
        ControlFlow::Break(Err(e)) => return Err(e),
    };

    let descent = Descent {
        coefficients: last.coefficients.rounded(options.precision),
        unrounded: last.coefficients,
        epochs: last.index + 1,
        loss: last.loss,
        degree_of_change: last.degree_of_change,
        converged,
    };

    log::debug!(
        "Gradient descent finished after {} epochs (converged: {converged})",
        descent.epochs
    );
    Ok(descent)
}

/// The per-epoch arithmetic, borrowed from one run
struct Stepper<'a, 'data, T: Value> {
    data: &'a Dataset<'data, T>,
    intercept: bool,
    learning_rate: T,
    y_mean: T,
}
impl<T: Value> Stepper<'_, '_, T> {
    /// Applies one simultaneous update to both coefficients
    fn step(&self, index: usize, line: Coefficients<T>) -> Epoch<T> {
        let n = self.data.n();
        let two = T::two();

        let mut residual_x_sum = T::zero();
        let mut residual_sum = T::zero();
        for (x, y) in self.data.iter() {
            let residual = line.y(x) - y;
            residual_x_sum += residual * x;
            residual_sum += residual;
        }

        let grad_b1 = two / n * residual_x_sum;
        let grad_b0 = if self.intercept {
            two / n * residual_sum
        } else {
            T::zero()
        };

        let updated = Coefficients::new(
            line.intercept() - self.learning_rate * grad_b0,
            line.slope() - self.learning_rate * grad_b1,
        );
        self.evaluate(index, updated)
    }

    /// Loss and degree of change of a coefficient pair
    fn evaluate(&self, index: usize, line: Coefficients<T>) -> Epoch<T> {
        let residual_sum = self
            .data
            .iter()
            .fold(T::zero(), |acc, (x, y)| acc + line.y(x) - y);
        let loss = Value::powi(residual_sum, 2) / self.data.n();

        Epoch {
            index,
            coefficients: line,
            loss,
            degree_of_change: loss.sqrt() / self.y_mean,
        }
    }
}
