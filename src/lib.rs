//! # Linfit
//! ## Three ways to draw a straight line through a cloud of points
//!
//! Fitting `y = b0 + b1·x` is the first thing anyone does with paired data, and there is more than
//! one way to get there. This crate provides the three classic ones side by side, so their answers
//! can be compared on the same data:
//! - **Closed form**: ordinary least squares, straight from the sample moments. Optionally through the origin.
//! - **Matrix**: the normal equation `B = (XᵀX)⁻¹ XᵀY`, built on [`nalgebra`].
//! - **Gradient descent**: iterative, with a learning rate, an epoch budget, and an early stop.
//!
//! On top of the fits it provides the tools needed to judge them:
//! - Goodness of fit ([`statistics::r_squared`], [`statistics::coefficient_of_determination`])
//! - Normality of the residuals ([`diagnostics::shapiro_wilk`])
//! - Significance of the whole model ([`diagnostics::fisher_test`])
//! - Human-readable reports ([`display::Report`]) and plots (`plotting` feature)
//!
//! ```rust
//! # use linfit::{Dataset, fit::{self, DescentOptions, Quiet}};
//! let salary = [35.0, 45.0, 190.0, 200.0, 40.0, 70.0, 54.0, 150.0, 120.0, 110.0];
//! let score = [401.0, 574.0, 874.0, 919.0, 459.0, 739.0, 653.0, 902.0, 746.0, 832.0];
//! let data = Dataset::new(&salary[..], &score[..]).unwrap();
//!
//! let line = fit::closed_form(&data, true, 3).unwrap();
//! assert_eq!(line.as_tuple(), (444.177, 2.621));
//!
//! let origin = fit::closed_form(&data, false, 5).unwrap();
//! assert_eq!(origin.slope(), 5.88982);
//!
//! let options = DescentOptions { max_epochs: 10_000, learning_rate: 1e-5, ..Default::default() };
//! let descent = fit::gradient_descent(&data, &options, &mut Quiet).unwrap();
//! assert!((descent.coefficients().slope() - 5.89_f64).abs() < 1e-2);
//! ```
//!
//! # Core Concepts
//! - A [`Dataset`] is a pair of equal-length, non-empty sequences `X` and `Y`.
//!     - It borrows its data when it can, and owns it when it must.
//! - [`Coefficients`] are the intercept `b0` and slope `b1` of a fitted line.
//!     - Every fit rounds them to a requested number of decimal digits, [`fit::DEFAULT_PRECISION`] by default.
//! - A [`Method`] names the estimator that produced a set of coefficients.
//! - Every fallible operation returns an [`error::Error`]; nothing panics on bad data.
//!
//! # Logging
//! Fits and tests log through the [`log`] facade: progress at `info`, internals at `debug`.
//! Install any logger (the `homework` binary uses `env_logger`) to see them.
//!
//! # Testing utilities
//!
//! This crate includes a set of assertion macros for comparing floating point results. See [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![cfg_attr(docsrs, feature(doc_cfg))]


#[cfg(feature = "plotting")]
#[cfg_attr(docsrs, doc(cfg(feature = "plotting")))]
pub mod plotting;

pub mod diagnostics;
pub mod display;
pub mod error;
pub mod fit;
pub mod statistics;
pub mod value;

mod dataset;
pub use dataset::Dataset;

pub use fit::{Coefficients, Method};

pub use nalgebra;
pub use num_traits;
