//! Plotting fitted lines over their data
//!
//! Mainly used through the [`crate::plot!`] macro, or directly through [`Plot`] for more control.
//!
//! The [`crate::plot_filename!`] macro generates a unique filename for each plot,
//! under `$TARGET_DIR/plot_output` (default `target/plot_output`).
use std::ops::{Range, RangeInclusive};

use crate::{dataset::Dataset, fit::Coefficients, value::Value};

mod backend;
pub use backend::*;

/// Options for plotting
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Caption for the plot
    pub title: String,

    /// X-axis label
    pub x_label: String,

    /// Y-axis label
    pub y_label: String,

    /// Size of the output image in pixels
    pub size: (u32, u32),

    /// Whether to leave the axis labels off
    pub hide_labels: bool,

    /// Whether to show the legend
    pub hide_legend: bool,
}
impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "Dependent data y = F(x)".into(),
            x_label: "X data".into(),
            y_label: "dependent Y data".into(),
            size: (640, 480),
            hide_labels: false,
            hide_legend: false,
        }
    }
}

/// Pads a range by 5% on each side so points do not sit on the border
fn padded<T: Value>(range: RangeInclusive<T>) -> Range<T> {
    let (min, max) = range.into_inner();
    let pad = (max - min) / T::from_positive_int(20);
    let pad = if pad > T::zero() { pad } else { T::one() };
    (min - pad)..(max + pad)
}

/// A scatter of a dataset and any number of lines fitted to it, using a given backend.
pub struct Plot<P, T>
where
    P: PlotBackend,
    T: Value,
{
    plot: P,
    x_range: Range<T>,
    y_range: Range<T>,
}

impl<P, T> Plot<P, T>
where
    P: PlotBackend,
    T: Value,
{
    /// Create a new plot with the given root and options, drawing `data` as a scatter.
    ///
    /// The axis ranges are those of the data, padded slightly.
    ///
    /// # Errors
    /// Returns an error if the plot cannot be created.
    pub fn new(root: &P::Root, options: &PlotOptions, data: &Dataset<'_, T>) -> Result<Self, P::Error> {
        let x_range = padded(data.x_range());
        let y_range = padded(data.y_range());

        let (x_label, y_label) = if options.hide_labels {
            (None, None)
        } else {
            (Some(options.x_label.as_str()), Some(options.y_label.as_str()))
        };

        let mut plot = P::new_plot(
            root,
            &options.title,
            x_label,
            y_label,
            x_range.clone(),
            y_range.clone(),
            options.hide_legend,
        )?;

        let points: Vec<(T, T)> = data.iter().collect();
        let color = plot.next_color();
        plot.add_points(&points, "Data", color)?;

        Ok(Self {
            plot,
            x_range,
            y_range,
        })
    }

    /// Draws a fitted line across the plot, cut off where it leaves the axis ranges.
    ///
    /// A line that never crosses the plotted area is skipped.
    ///
    /// # Errors
    /// Returns an error if the line cannot be drawn.
    pub fn with_line(&mut self, line: &Coefficients<T>, label: &str) -> Result<&mut Self, P::Error> {
        let (mut start, mut end) = (self.x_range.start, self.x_range.end);

        let slope = line.slope();
        if slope != T::zero() {
            let a = (self.y_range.start - line.intercept()) / slope;
            let b = (self.y_range.end - line.intercept()) / slope;
            let (low, high) = if a < b { (a, b) } else { (b, a) };
            if low > start {
                start = low;
            }
            if high < end {
                end = high;
            }
        } else if !self.y_range.contains(&line.intercept()) {
            return Ok(self);
        }

        if start >= end {
            return Ok(self);
        }

        let points = [(start, line.y(start)), (end, line.y(end))];

        let color = self.plot.next_color();
        self.plot.add_line(&points, label, 2, color)?;
        Ok(self)
    }

    /// Finalize the plot and write it to the output.
    ///
    /// # Errors
    /// Returns an error if the plot cannot be finalized.
    pub fn finish(self) -> Result<(), P::Error> {
        self.plot.finalize()
    }
}

/// Plot a dataset and the lines fitted to it to a PNG file.
///
/// Generates a filename based on the source file and line number, see [`crate::plot_filename!`].
/// - Creates the necessary directories if they don't exist.
/// - Evaluates to a `Result` holding the path of the generated file, or the error as a string.
/// - If prefix is specified, it is prepended to the filename.
///
/// # Examples
/// ```ignore
/// plot!(data, [line]);
/// plot!(data, [mathematical, gradient], { title: "Credit scoring".into() });
/// plot!(data, [line], prefix = "anscombe");
/// ```
#[macro_export]
macro_rules! plot {
    ($data:expr, [$($line:expr),* $(,)?], { $( $name:ident : $value:expr ),* $(,)? } $( , prefix = $prefix:expr )?) => {{
        #[allow(unused_mut)] let mut options = $crate::plotting::PlotOptions::default();
        $( options.$name = $value; )*

        #[allow(unused)] let mut prefix: Option<String> = None; $( prefix = Some($prefix.to_string()); )?
        let path = $crate::plot_filename!(prefix);

        let result = $crate::plotting::plotters::plot_lines(&path, &options, &$data, &[$($line),*])
            .map_err(|e| e.to_string());
        result.map(|()| path)
    }};

    ($data:expr, [$($line:expr),* $(,)?] $( , prefix = $prefix:expr )?) => {
        $crate::plot!($data, [$($line),*], {} $(, prefix = $prefix)?)
    };
}

/// Generate a filename for a plot: `target/plot_output/{file}_line_{line}.png`
///
/// Creates the necessary directories if they don't exist.
///
/// `plot_filename!(Some("prefix"))` will prepend `prefix_` to the filename.
#[macro_export]
macro_rules! plot_filename {
    ($prefix:expr) => {{
        let prefix: Option<String> = $prefix.map(|s| s.to_string());
        let prefix = match prefix {
            Some(p) if !p.is_empty() => format!("{p}_"),
            _ => String::new(),
        };

        let file = file!().replace(['/', '\\'], "_");
        let line = line!();

        let target_dir = ::std::env::var("TARGET_DIR").unwrap_or_else(|_| "target".into());
        let plots_dir = ::std::path::Path::new(&target_dir).join("plot_output");
        let _ = std::fs::create_dir_all(&plots_dir);

        let filename = format!("{prefix}{file}_line_{line}.png");

        plots_dir.join(filename)
    }};
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test::credit_scoring;

    #[test]
    fn default_options() {
        let options = PlotOptions::default();
        assert_eq!(options.title, "Dependent data y = F(x)");
        assert_eq!(options.x_label, "X data");
        assert_eq!(options.y_label, "dependent Y data");
        assert!(!options.hide_labels);
        assert!(!options.hide_legend);
    }

    #[test]
    fn padding() {
        assert_eq!(padded(0.0..=100.0), -5.0..105.0);
        assert_eq!(padded(3.0..=3.0), 2.0..4.0);
    }

    #[test]
    fn clipped_line() {
        use crate::plotting::plotters::{Backend, Root};

        let data = crate::Dataset::new(vec![0.0, 10.0], vec![0.0, 10.0]).unwrap();
        let path = crate::plot_filename!(Some("clipped"));
        let root = Root::new(&path, (320, 240)).unwrap();
        let mut plot = Plot::<Backend, f64>::new(&root, &PlotOptions::default(), &data).unwrap();

        // Steep, flat inside, and flat outside of the plot
        plot.with_line(&Coefficients::new(0.0, 100.0), "steep").unwrap();
        plot.with_line(&Coefficients::new(5.0, 0.0), "flat").unwrap();
        plot.with_line(&Coefficients::new(500.0, 0.0), "outside").unwrap();
        plot.finish().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn filename_prefix() {
        let path = crate::plot_filename!(Some("credit"));
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with("credit_src_plotting.rs_line_"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn plot_to_file() {
        let data = credit_scoring();
        let scalar = crate::fit::closed_form(&data, true, 3).unwrap();
        let origin = crate::fit::closed_form(&data, false, 3).unwrap();
        let path = crate::plot!(data, [scalar, origin], { hide_legend: true }, prefix = "test").unwrap();
        assert!(path.exists());
    }
}
