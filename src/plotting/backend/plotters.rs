//! Plotting backend using the `plotters` crate
//!
//! Everything is coerced to `f64` for plotting purposes.
//!
//! Uses the bitmap backend to create PNG files.
use std::{ops::Range, path::Path};

use plotters::{coord::Shift, prelude::*};

use crate::{
    dataset::Dataset,
    fit::Coefficients,
    plotting::{Plot, PlotBackend, PlotOptions},
    value::Value,
};

const MAX_LBL_WIDTH: usize = 120;

/// Plot a dataset and any number of fitted lines to a PNG file at `path`
///
/// Each line is labelled with its equation.
///
/// # Errors
/// Returns an error if the plot could not be created or drawn
pub fn plot_lines<T: Value>(
    path: &Path,
    options: &PlotOptions,
    data: &Dataset<'_, T>,
    lines: &[Coefficients<T>],
) -> Result<(), Error> {
    let root = Root::new(path, options.size)?;
    let mut plot = Plot::<Backend, T>::new(&root, options, data)?;
    for line in lines {
        plot.with_line(line, &line.to_string())?;
    }
    plot.finish()
}

/// Plot a dataset, and optionally a fitted line, onto one panel of a split root
///
/// See [`Root::new_grid`].
///
/// # Errors
/// Returns an error if the plot could not be created or drawn
pub fn plot_panel<T: Value>(
    root: &Root<'_>,
    options: &PlotOptions,
    data: &Dataset<'_, T>,
    line: Option<&Coefficients<T>>,
) -> Result<(), Error> {
    let mut plot = Plot::<Backend, T>::new(root, options, data)?;
    if let Some(line) = line {
        plot.with_line(line, &line.to_string())?;
    }
    plot.finish()
}

/// A drawing area root for plotters
pub struct Root<'a>(DrawingArea<BitMapBackend<'a>, Shift>);
impl<'a> AsRef<DrawingArea<BitMapBackend<'a>, Shift>> for Root<'a> {
    fn as_ref(&self) -> &DrawingArea<BitMapBackend<'a>, Shift> {
        &self.0
    }
}
impl<'a> Root<'a> {
    /// Create a new drawing area root for plotters
    ///
    /// Will create a PNG file at the given path with the given size
    ///
    /// # Errors
    /// Returns an error if the drawing area cannot be cleared
    pub fn new(path: &'a Path, size: (u32, u32)) -> Result<Self, Error> {
        let backend = BitMapBackend::new(path, size);
        let root = IntoDrawingArea::into_drawing_area(backend);
        root.fill(&WHITE)?;
        Ok(Self(root))
    }

    /// Create a grid of drawing area roots for plotters, `rows` by `columns`
    ///
    /// Will create a single PNG file at the given path with the given size.
    /// Panels are returned row by row.
    ///
    /// # Errors
    /// Returns an error if the drawing areas cannot be cleared
    pub fn new_grid(
        path: &'a Path,
        size: (u32, u32),
        rows: usize,
        columns: usize,
    ) -> Result<Vec<Self>, Error> {
        let backend = BitMapBackend::new(path, size);
        let root = IntoDrawingArea::into_drawing_area(backend);
        root.fill(&WHITE)?;

        root.split_evenly((rows, columns))
            .into_iter()
            .map(|area| -> Result<Self, Error> {
                area.fill(&WHITE)?;
                Ok(Self(area))
            })
            .collect()
    }
}

/// Cycles through a fixed set of colors
struct ColorSource {
    colors: Vec<RGBAColor>,
    index: usize,
}
impl ColorSource {
    fn next_color(&mut self) -> RGBAColor {
        let color = self.colors[self.index];
        self.index = (self.index + 1) % self.colors.len();
        color
    }
}
impl Default for ColorSource {
    fn default() -> Self {
        Self {
            colors: vec![
                BLUE.into(),
                RED.into(),
                GREEN.into(),
                MAGENTA.into(),
                CYAN.into(),
                BLACK.into(),
                RGBColor(255, 165, 0).into(), // Orange
                RGBColor(128, 0, 128).into(), // Purple
            ],
            index: 0,
        }
    }
}

/// A series waiting to be drawn
enum Series {
    Line(Vec<(f64, f64)>, String, ShapeStyle),
    Points(Vec<(f64, f64)>, String, ShapeStyle),
}

/// Plotters backend for plotting
///
/// Series are collected as they are added, and the chart is built and drawn in one go on
/// [`PlotBackend::finalize`].
pub struct Backend<'root> {
    area: DrawingArea<BitMapBackend<'root>, Shift>,
    title: String,
    x_range: Range<f64>,
    y_range: Range<f64>,
    palette: ColorSource,
    series: Vec<Series>,

    x_label: Option<String>,
    y_label: Option<String>,

    hide_legend: bool,
}
impl<'root> PlotBackend for Backend<'root> {
    type Error = Error;
    type Color = RGBAColor;
    type Root = Root<'root>;

    fn next_color(&mut self) -> Self::Color {
        self.palette.next_color()
    }

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
        Self: Sized,
    {
        //
        // T(Range) -> f64(Range)
        let x_range: Range<f64> = cast(x_range.start)?..cast(x_range.end)?;
        let y_range: Range<f64> = cast(y_range.start)?..cast(y_range.end)?;

        Ok(Self {
            area: root.as_ref().clone(),
            title: title.to_string(),
            x_range,
            y_range,
            palette: ColorSource::default(),
            series: Vec::new(),

            x_label: x_label.map(str::to_string),
            y_label: y_label.map(str::to_string),

            hide_legend,
        })
    }

    fn add_line<T: Value>(
        &mut self,
        data: &[(T, T)],
        label: &str,
        width: u32,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let style = ShapeStyle::from(color).stroke_width(width);
        self.series
            .push(Series::Line(as_f64(data)?, shorten(label), style));
        Ok(())
    }

    fn add_points<T: Value>(
        &mut self,
        data: &[(T, T)],
        label: &str,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let style = ShapeStyle::from(color).filled();
        self.series
            .push(Series::Points(as_f64(data)?, shorten(label), style));
        Ok(())
    }

    fn finalize(self) -> Result<(), Self::Error> {
        let mut builder = ChartBuilder::on(&self.area);
        builder
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(60);

        if !self.title.is_empty() {
            builder.caption(&self.title, (FontFamily::SansSerif, 16).into_font());
        }

        let mut context = builder.build_cartesian_2d(self.x_range.clone(), self.y_range.clone())?;

        //
        // Mesh and axes
        let mut mesh = context.configure_mesh();
        mesh.label_style((FontFamily::SansSerif, 12));

        if let Some(x_label) = &self.x_label {
            mesh.x_desc(x_label);
        }

        if let Some(y_label) = &self.y_label {
            mesh.y_desc(y_label);
        }

        mesh.draw()?;

        for series in self.series {
            match series {
                Series::Line(data, label, style) => {
                    context
                        .draw_series(LineSeries::new(data, style))?
                        .label(label)
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
                }

                Series::Points(data, label, style) => {
                    context
                        .draw_series(data.into_iter().map(|point| Circle::new(point, 3, style)))?
                        .label(label)
                        .legend(move |(x, y)| Circle::new((x + 10, y), 3, style));
                }
            }
        }

        if !self.hide_legend {
            //
            // Legend
            context
                .configure_series_labels()
                .label_font((FontFamily::SansSerif, 10))
                .background_style(WHITE.mix(0.5))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperLeft)
                .draw()?;
        }

        self.area.present()?;
        Ok(())
    }
}

/// Shorten label and add [...] if too long
fn shorten(label: &str) -> String {
    if label.len() > MAX_LBL_WIDTH {
        let mut s: String = label.chars().take(MAX_LBL_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        label.to_string()
    }
}

fn cast<T: Value>(value: T) -> Result<f64, Error> {
    value.to_f64().ok_or(Error::Cast)
}

fn as_f64<T: Value>(data: &[(T, T)]) -> Result<Vec<(f64, f64)>, Error> {
    data.iter().map(|&(x, y)| Ok((cast(x)?, cast(y)?))).collect()
}

/// Error occurring during plotting
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error drawing the plot
    #[error("Error drawing plot: {0}")]
    Draw(String),

    /// Error casting a value
    #[error("A value could not be represented as f64")]
    Cast,
}
impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        Self::Draw(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_shortening() {
        assert_eq!(shorten("Y = 3 + 0.5 * X"), "Y = 3 + 0.5 * X");

        let long = "x".repeat(200);
        let short = shorten(&long);
        assert_eq!(short.len(), MAX_LBL_WIDTH);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn palette_cycles() {
        let mut palette = ColorSource::default();
        let first = palette.next_color();
        for _ in 1..palette.colors.len() {
            palette.next_color();
        }
        let again = palette.next_color();
        assert_eq!((first.0, first.1, first.2), (again.0, again.1, again.2));
    }

    #[test]
    fn grid_panels() {
        let path = crate::plot_filename!(Some("grid"));
        let roots = Root::new_grid(&path, (800, 600), 2, 2).unwrap();
        assert_eq!(roots.len(), 4);
    }
}
