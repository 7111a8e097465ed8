use std::ops::Range;

use crate::value::Value;

pub mod plotters;

/// Trait for plot backends
pub trait PlotBackend {
    /// Error type for the plot backend
    type Error: std::error::Error;

    /// Root type for the plot backend
    type Root;

    /// Color type for the plot backend
    type Color: Clone;

    /// Get the next color in the palette
    fn next_color(&mut self) -> Self::Color;

    /// Create a new plot with the given title and ranges on the given root
    ///
    /// # Errors
    /// Returns an error if the plot cannot be created.
    fn new_plot<T: Value>(
        root: &Self::Root,
        title: &str,
        x_label: Option<&str>,
        y_label: Option<&str>,
        x_range: Range<T>,
        y_range: Range<T>,
        hide_legend: bool,
    ) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Add a line through the given points to the plot
    ///
    /// # Errors
    /// Returns an error if the plot cannot be modified.
    fn add_line<T: Value>(
        &mut self,
        data: &[(T, T)],
        label: &str,
        width: u32,
        color: Self::Color,
    ) -> Result<(), Self::Error>;

    /// Add unconnected points to the plot
    ///
    /// # Errors
    /// Returns an error if the plot cannot be modified.
    fn add_points<T: Value>(
        &mut self,
        data: &[(T, T)],
        label: &str,
        color: Self::Color,
    ) -> Result<(), Self::Error>;

    /// Finalize the plot
    ///
    /// # Errors
    /// Returns an error if the plot cannot be modified.
    fn finalize(self) -> Result<(), Self::Error>;
}
