//! Error types for linear regression fitting
//!
//! This module defines the common errors encountered when building datasets,
//! fitting coefficients, or running diagnostics on a fit, along with a
//! convenient `Result` alias.
//!
//! Every variant is a deterministic input-validation failure: retrying with the
//! same input will fail the same way.

/// Errors that can occur during fitting or diagnostics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Cannot fit anything because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// The X and Y sequences do not pair up.
    #[error("X and Y must have the same length [x: {x}, y: {y}]")]
    LengthMismatch {
        /// Number of X values
        x: usize,
        /// Number of Y values
        y: usize,
    },

    /// A formula would divide by zero for this input.
    ///
    /// Usually the X values have no variance, or a value used as a divisor is zero.
    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),

    /// Cannot solve the normal equations because `X^T X` is singular.
    ///
    /// For a straight line this means X has fewer than 2 distinct values.
    #[error(
        "Design matrix (X^T X) is not invertible; X needs at least two distinct values. [n: {n}, k: {k}]"
    )]
    SingularMatrix {
        /// Number of data points
        n: usize,
        /// Number of coefficients
        k: usize,
    },

    /// A configuration value is out of range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the parameter
        name: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Gradient descent left the finite numbers, usually because the learning rate is too large.
    #[error("Gradient descent diverged at epoch {epoch}; try a smaller learning rate")]
    Diverged {
        /// Epoch at which a coefficient stopped being finite
        epoch: usize,
    },

    /// The sample is too small for the requested test.
    #[error("Not enough data: need at least {needed} points, got {got}")]
    InsufficientData {
        /// Minimum number of points
        needed: usize,
        /// Number of points supplied
        got: usize,
    },

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,
}

/// Result type for fitting and diagnostics
pub type Result<T> = std::result::Result<T, Error>;
