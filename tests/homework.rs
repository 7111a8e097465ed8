//! End-to-end checks of the homework results through the public API.
use linfit::{
    assert_all_close, assert_close, assert_coefficients,
    diagnostics::{fisher_test, shapiro_wilk, Confidence},
    display::Report,
    error::Error,
    fit::{self, DescentOptions, Epoch, Quiet},
    statistics::{coefficient_of_determination, pearson_correlation},
    Coefficients, Dataset, Method,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

fn credit_scoring() -> Dataset<'static> {
    Dataset::new(
        vec![35.0, 45.0, 190.0, 200.0, 40.0, 70.0, 54.0, 150.0, 120.0, 110.0],
        vec![401.0, 574.0, 874.0, 919.0, 459.0, 739.0, 653.0, 902.0, 746.0, 832.0],
    )
    .unwrap()
}

fn anscombe_first() -> Dataset<'static> {
    Dataset::new(
        vec![10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0],
        vec![8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68],
    )
    .unwrap()
}

#[test]
fn credit_scoring_closed_form_and_matrix_agree() {
    let data = credit_scoring();

    let scalar = fit::closed_form(&data, true, 3).unwrap();
    let matrix = fit::normal_equation(&data, 3).unwrap();
    assert_coefficients!(scalar, (444.177, 2.621), tol = 1e-9);
    assert_coefficients!(matrix, (444.177, 2.621), tol = 1e-9);

    let origin = fit::closed_form(&data, false, 5).unwrap();
    assert_coefficients!(origin, (0.0, 5.889_82), tol = 1e-9);
}

#[test]
fn credit_scoring_coefficient_of_determination() {
    let data = credit_scoring();
    let r2 = coefficient_of_determination(data.x(), data.y()).unwrap();
    assert_close!(r2, 0.787_64, tol = 1e-5);

    let r = pearson_correlation(data.x(), data.y()).unwrap();
    assert_close!(r * r, r2, tol = 1e-12);
}

#[test]
fn credit_scoring_gradient_descent() {
    let data = credit_scoring();

    let origin = DescentOptions {
        max_epochs: 10_000,
        learning_rate: 1e-5,
        precision: 5,
        ..Default::default()
    };
    let run = fit::gradient_descent(&data, &origin, &mut Quiet).unwrap();
    assert_coefficients!(run.coefficients(), (0.0, 5.889_82), tol = 1e-9);

    let intercept = DescentOptions {
        intercept: true,
        max_epochs: 1_000_000,
        learning_rate: 3e-5,
        precision: 3,
    };
    let mut reported = 0;
    let run = fit::gradient_descent(&data, &intercept, &mut |_: &Epoch| reported += 1).unwrap();
    assert!(run.converged());
    assert!(reported > 0);
    assert_coefficients!(run.coefficients(), (444.177, 2.621), tol = 1e-2);
}

#[test]
fn nested_datasets() {
    let sets = [
        (vec![30.0, 30.0, 40.0, 40.0], vec![37.0, 47.0, 50.0, 60.0]),
        (
            vec![30.0, 30.0, 40.0, 40.0, 20.0, 20.0, 50.0, 50.0],
            vec![37.0, 47.0, 50.0, 60.0, 25.0, 35.0, 62.0, 72.0],
        ),
        (
            vec![30.0, 30.0, 40.0, 40.0, 20.0, 20.0, 50.0, 50.0, 10.0, 10.0, 60.0, 60.0],
            vec![37.0, 47.0, 50.0, 60.0, 25.0, 35.0, 62.0, 72.0, 13.0, 23.0, 74.0, 84.0],
        ),
    ];

    let mut previous_r2 = 0.0;
    for (x, y) in sets {
        let data = Dataset::new(x, y).unwrap();
        let scalar = fit::closed_form(&data, true, 3).unwrap();
        let matrix = fit::normal_equation(&data, 3).unwrap();
        assert_coefficients!(scalar, matrix.as_tuple(), tol = 1e-2);

        // More points along the same trend explain more of the variance
        let r2 = coefficient_of_determination(data.x(), data.y()).unwrap();
        assert!(r2 > previous_r2);
        previous_r2 = r2;
    }

    let first = Dataset::new(vec![30.0, 30.0, 40.0, 40.0], vec![37.0, 47.0, 50.0, 60.0]).unwrap();
    let line = fit::closed_form(&first, true, 3).unwrap();
    assert_coefficients!(line, (3.0, 1.3), tol = 1e-9);
    assert_close!(line.r_squared(&first), 0.628_25, tol = 1e-5);
}

#[test]
fn anscombe_diagnostics() {
    let data = anscombe_first();
    let line = fit::normal_equation(&data, 3).unwrap();
    assert_coefficients!(line, (3.0, 0.5), tol = 1e-2);
    assert_close!(line.r_squared(&data), 0.6665, tol = 1e-3);

    let normality = shapiro_wilk(&line.residuals(&data)).unwrap();
    assert_close!(normality.w, 0.942, tol = 1e-3);
    assert_close!(normality.p_value, 0.545, tol = 1e-2);
    assert!(normality.is_normal(Confidence::P95.alpha()));

    let significance = fisher_test(&data, &line, Confidence::P95).unwrap();
    assert_close!(significance.f, 17.98, tol = 1e-2);
    assert_close!(significance.critical, 5.117, tol = 1e-3);
    assert!(significance.significant());
    assert!(significance
        .to_string()
        .ends_with("The model is statistically significant"));
}

#[test]
fn anscombe_outlier_removal_improves_fit() {
    let x = vec![10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
    let y = vec![7.46, 6.77, 12.74, 7.11, 7.81, 8.84, 6.08, 5.39, 8.15, 6.42, 5.73];
    let with_outlier = Dataset::new(x, y).unwrap();

    let without = Dataset::from_pairs(
        &with_outlier
            .iter()
            .filter(|&(_, y)| y < 12.0)
            .collect::<Vec<_>>(),
    )
    .unwrap();
    assert_eq!(without.len(), 10);

    let before = coefficient_of_determination(with_outlier.x(), with_outlier.y()).unwrap();
    let after = coefficient_of_determination(without.x(), without.y()).unwrap();
    assert!(after > 0.99);
    assert!(after > before);
}

#[test]
fn methods_agree_on_noisy_data() {
    for seed in 0..5 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 2.0).unwrap();
        let (b0, b1) = (rng.random_range(-20.0..20.0), rng.random_range(-3.0..3.0));

        let (x, y): (Vec<f64>, Vec<f64>) = (0..40)
            .map(|_| {
                let x: f64 = rng.random_range(1.0..50.0);
                (x, b0 + b1 * x + noise.sample(&mut rng))
            })
            .unzip();
        let data = Dataset::new(x, y).unwrap();

        let scalar = fit::closed_form(&data, true, 6).unwrap();
        let matrix = fit::normal_equation(&data, 6).unwrap();
        assert_coefficients!(scalar, matrix.as_tuple(), tol = 1e-2);
        assert_all_close!(scalar.predict(&data), matrix.predict(&data), tol = 1e-1);
    }
}

#[test]
fn degenerate_inputs() {
    assert_eq!(Dataset::<f64>::new(vec![], vec![]), Err(Error::NoData));
    assert_eq!(
        Dataset::new(vec![1.0, 2.0], vec![1.0]),
        Err(Error::LengthMismatch { x: 2, y: 1 })
    );

    let constant_x = Dataset::new(vec![5.0, 5.0, 5.0], vec![1.0, 2.0, 3.0]).unwrap();
    assert!(matches!(
        fit::closed_form(&constant_x, true, 3),
        Err(Error::DivisionByZero(_))
    ));
    assert!(matches!(
        fit::normal_equation(&constant_x, 3),
        Err(Error::SingularMatrix { .. })
    ));

    let single = Dataset::new(vec![2.0], vec![4.0]).unwrap();
    assert_coefficients!(fit::closed_form(&single, false, 3).unwrap(), (0.0, 2.0), tol = 1e-12);
}

#[test]
fn report_mentions_everything() {
    let data = credit_scoring();
    let line = Coefficients::new(444.177, 2.621);
    let text = Report::new(&data, line, Method::ClosedForm)
        .with_label("Credit scoring")
        .to_string();

    for needle in [
        "Credit scoring",
        "[35, 45, 190, 200, 40, 70, 54, 150, 120, 110]",
        "[401, 574, 874, 919, 459, 739, 653, 902, 746, 832]",
        "Y = 444.177 + 2.621 * X",
        "mathematical method",
    ] {
        assert!(text.contains(needle), "{needle:?} missing from:\n{text}");
    }
}
