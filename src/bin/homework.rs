//! Replays the linear regression homework, start to finish.
//!
//! Practice tasks 1-3 fit the credit scoring data with all three methods.
//! Seminar task 1 compares three nested datasets; seminar task 2 checks whether a line
//! is a sensible model for Anscombe's quartet, then tests the residuals and the model itself.
//!
//! Set `RUST_LOG=debug` to see the internals, or `RUST_LOG=warn` to silence gradient descent progress.
//! With the `plotting` feature, every chart is written under `$TARGET_DIR/plot_output`.
use linfit::{
    diagnostics::{fisher_test, shapiro_wilk, Confidence},
    display::Report,
    error::Result,
    fit::{self, DescentOptions, LogProgress},
    statistics::coefficient_of_determination,
    value::Value,
    Coefficients, Dataset, Method,
};

const CREDIT_SCORING: &str = "Credit scoring";
const SALARY: [f64; 10] = [35.0, 45.0, 190.0, 200.0, 40.0, 70.0, 54.0, 150.0, 120.0, 110.0];
const SCORE: [f64; 10] = [
    401.0, 574.0, 874.0, 919.0, 459.0, 739.0, 653.0, 902.0, 746.0, 832.0,
];

const X1: [f64; 4] = [30.0, 30.0, 40.0, 40.0];
const Y1: [f64; 4] = [37.0, 47.0, 50.0, 60.0];
const X2: [f64; 8] = [30.0, 30.0, 40.0, 40.0, 20.0, 20.0, 50.0, 50.0];
const Y2: [f64; 8] = [37.0, 47.0, 50.0, 60.0, 25.0, 35.0, 62.0, 72.0];
const X3: [f64; 12] = [
    30.0, 30.0, 40.0, 40.0, 20.0, 20.0, 50.0, 50.0, 10.0, 10.0, 60.0, 60.0,
];
const Y3: [f64; 12] = [
    37.0, 47.0, 50.0, 60.0, 25.0, 35.0, 62.0, 72.0, 13.0, 23.0, 74.0, 84.0,
];

const ANSCOMBE_X: [f64; 11] = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
const ANSCOMBE_Y1: [f64; 11] = [8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68];
const ANSCOMBE_Y2: [f64; 11] = [9.14, 8.14, 8.74, 8.77, 9.26, 8.10, 6.13, 3.10, 9.13, 7.26, 4.74];
const ANSCOMBE_Y3: [f64; 11] = [7.46, 6.77, 12.74, 7.11, 7.81, 8.84, 6.08, 5.39, 8.15, 6.42, 5.73];
const ANSCOMBE_X4: [f64; 11] = [8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 19.0, 8.0, 8.0, 8.0];
const ANSCOMBE_Y4: [f64; 11] = [6.58, 5.76, 7.71, 8.84, 8.47, 7.04, 5.25, 12.5, 5.56, 7.91, 6.89];
const EXTENDED_X: [f64; 14] = [
    10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0, 15.0, 16.0, 18.0,
];
const EXTENDED_Y: [f64; 14] = [
    9.14, 8.14, 8.74, 8.77, 9.26, 8.10, 6.13, 3.10, 9.13, 7.26, 4.74, 6.5, 5.0, 2.9,
];

/// Index of the outlier in the third Anscombe set
const ANSCOMBE_Y3_OUTLIER: usize = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    step("Practice task 1", practice_closed_form);
    step("Practice task 2", practice_descent_through_origin);
    step("Practice task 3", practice_descent_with_intercept);
    step("Seminar task 1", seminar_nested_datasets);
    step("Seminar task 2", seminar_anscombe);
}

/// Runs one task, logging its failure instead of stopping the run
fn step(name: &str, task: impl FnOnce() -> Result<()>) {
    println!("\n--------------------------------------------");
    println!("{name}");
    if let Err(e) = task() {
        log::error!("{name} failed: {e}");
    }
}

fn print_r_squared(data: &Dataset) -> Result<()> {
    let r2 = coefficient_of_determination(data.x(), data.y())?;
    println!("Coefficient of determination R² = {}", r2.round_to(4));
    Ok(())
}

/// Salary against credit score, with and without an intercept
fn practice_closed_form() -> Result<()> {
    let data = Dataset::new(&SALARY[..], &SCORE[..])?;
    println!("X - salary");
    println!("Y - credit score");

    println!("\n1) Linear regression with an intercept:");
    let scalar = fit::closed_form(&data, true, fit::DEFAULT_PRECISION)?;
    let matrix = fit::normal_equation(&data, fit::DEFAULT_PRECISION)?;
    println!("{}", Report::new(&data, scalar, Method::ClosedForm).with_label(CREDIT_SCORING));
    println!("{}", Report::new(&data, matrix, Method::Matrix).with_label(CREDIT_SCORING));
    plot(&data, Some(&scalar), CREDIT_SCORING);

    println!("\n2) Linear regression through the origin:");
    let origin = fit::closed_form(&data, false, 5)?;
    println!("{}", Report::new(&data, origin, Method::ClosedForm).with_label(CREDIT_SCORING));
    plot(&data, Some(&origin), "Credit scoring through the origin");

    print_r_squared(&data)
}

/// Gradient descent through the origin
fn practice_descent_through_origin() -> Result<()> {
    let data = Dataset::new(&SALARY[..], &SCORE[..])?;
    let options = DescentOptions {
        intercept: false,
        max_epochs: 10_000,
        learning_rate: 1e-5,
        precision: 5,
    };

    let run = fit::gradient_descent(&data, &options, &mut LogProgress)?;
    println!(
        "{}",
        Report::new(&data, run.coefficients(), Method::GradientDescent).with_label(CREDIT_SCORING)
    );
    Ok(())
}

/// Gradient descent with an intercept, updating both coefficients together
fn practice_descent_with_intercept() -> Result<()> {
    let data = Dataset::new(&SALARY[..], &SCORE[..])?;
    let options = DescentOptions {
        intercept: true,
        max_epochs: 1_000_000,
        learning_rate: 3e-5,
        precision: 3,
    };

    let run = fit::gradient_descent(&data, &options, &mut LogProgress)?;
    if !run.converged() {
        log::warn!("Gradient descent used all {} epochs", run.epochs());
    }
    println!(
        "{}",
        Report::new(&data, run.coefficients(), Method::GradientDescent).with_label(CREDIT_SCORING)
    );
    Ok(())
}

/// Three datasets, each the previous one plus a few more points along the same trend
fn seminar_nested_datasets() -> Result<()> {
    let sets: [(&str, &[f64], &[f64]); 3] = [
        ("Dataset #1", &X1[..], &Y1[..]),
        ("Dataset #2", &X2[..], &Y2[..]),
        ("Dataset #3", &X3[..], &Y3[..]),
    ];

    for (i, (label, x, y)) in sets.into_iter().enumerate() {
        let data = Dataset::new(x, y)?;
        let line = fit::closed_form(&data, true, fit::DEFAULT_PRECISION)?;
        println!("{}", Report::new(&data, line, Method::ClosedForm).with_label(label));

        // The last one is checked against the matrix method as well
        if i == sets.len() - 1 {
            let matrix = fit::normal_equation(&data, fit::DEFAULT_PRECISION)?;
            println!("{}", Report::new(&data, matrix, Method::Matrix).with_label(label));
        }

        print_r_squared(&data)?;
        plot(&data, Some(&line), label);
    }

    Ok(())
}

/// Which of Anscombe's sets suit a straight line, and how good is the line?
fn seminar_anscombe() -> Result<()> {
    let overview = [
        ("Data (x, y1)", Dataset::new(&ANSCOMBE_X[..], &ANSCOMBE_Y1[..])?),
        ("Data (x, y2)", Dataset::new(&ANSCOMBE_X[..], &ANSCOMBE_Y2[..])?),
        ("Data (x, y3)", Dataset::new(&ANSCOMBE_X[..], &ANSCOMBE_Y3[..])?),
        ("Data (x4, y4)", Dataset::new(&ANSCOMBE_X4[..], &ANSCOMBE_Y4[..])?),
        ("Data (x0, y0)", Dataset::new(&EXTENDED_X[..], &EXTENDED_Y[..])?),
    ];
    plot_overview(&overview);

    // Only the first and third sets look linear
    let mut lines = vec![];
    for (label, data) in [&overview[0], &overview[2]] {
        let line = fit::normal_equation(data, fit::DEFAULT_PRECISION)?;
        println!("{}", Report::new(data, line, Method::Matrix).with_label(label));
        print_r_squared(data)?;
        plot(data, Some(&line), label);
        lines.push(line);
    }

    // The third without its outlier
    let (x, y): (Vec<f64>, Vec<f64>) = overview[2]
        .1
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != ANSCOMBE_Y3_OUTLIER)
        .map(|(_, point)| point)
        .unzip();
    let trimmed = Dataset::new(x, y)?;
    let line = fit::normal_equation(&trimmed, fit::DEFAULT_PRECISION)?;
    println!("{}", Report::new(&trimmed, line, Method::Matrix).with_label("Data (x, y3) without the outlier"));
    print_r_squared(&trimmed)?;
    plot(&trimmed, Some(&line), "Data (x, y3) without the outlier");

    // Are the residuals of the first set normal?
    let (first, line) = (&overview[0].1, lines[0]);
    let residuals = line.residuals(first);
    let normality = shapiro_wilk(&residuals)?;
    println!("\nShapiro-Wilk test => {normality}");
    let residual_plot = Dataset::new(line.predict(first), residuals)?;
    plot(&residual_plot, None, "Residuals of the linear regression");

    // Is the model significant?
    let significance = fisher_test(first, &line, Confidence::P95)?;
    println!("\n-----------------------------\n{significance}");

    Ok(())
}

#[cfg(feature = "plotting")]
fn plot(data: &Dataset, line: Option<&Coefficients>, title: &str) {
    let lines: Vec<Coefficients> = line.into_iter().copied().collect();
    let path = linfit::plot_filename!(Some(title.replace([' ', '#', '(', ')', ','], "")));
    let options = linfit::plotting::PlotOptions {
        title: title.to_string(),
        ..Default::default()
    };

    match linfit::plotting::plotters::plot_lines(&path, &options, data, &lines) {
        Ok(()) => log::info!("Wrote plot to {}", path.display()),
        Err(e) => log::error!("Could not plot {title}: {e}"),
    }
}

#[cfg(not(feature = "plotting"))]
fn plot(_: &Dataset, _: Option<&Coefficients>, _: &str) {}

/// Every Anscombe set on one image, two rows of three
#[cfg(feature = "plotting")]
fn plot_overview(sets: &[(&str, Dataset)]) {
    use linfit::plotting::plotters::{plot_panel, Root};

    let path = linfit::plot_filename!(Some("anscombe"));
    let result = Root::new_grid(&path, (1500, 800), 2, 3).and_then(|panels| {
        for (i, ((title, data), panel)) in sets.iter().zip(&panels).enumerate() {
            let options = linfit::plotting::PlotOptions {
                title: (*title).to_string(),
                hide_labels: i < 3,
                hide_legend: true,
                ..Default::default()
            };
            plot_panel(panel, &options, data, None)?;
        }
        Ok(())
    });

    match result {
        Ok(()) => log::info!("Wrote plot to {}", path.display()),
        Err(e) => log::error!("Could not plot the overview: {e}"),
    }
}

#[cfg(not(feature = "plotting"))]
fn plot_overview(_: &[(&str, Dataset)]) {}
