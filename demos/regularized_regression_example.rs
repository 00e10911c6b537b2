use gradlin::{
    gradient_descent, gradient_descent_reg, CostFunction, Dataset, Features, GradientFunction,
    Matrix, Params, RegularizedSquaredError, RidgeRegression, SquaredError,
};
use ndarray::array;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Regularized Linear Regression ===\n");

    // y = 3*x1 + 2*x2 + small noise, x3 and x4 are irrelevant
    let x = array![
        [1.0, 2.0, 0.5, -0.3],
        [2.0, 3.0, -0.2, 0.8],
        [3.0, 1.0, 1.1, -0.5],
        [4.0, 4.0, 0.3, 0.2],
        [5.0, 2.0, -0.8, 0.7],
        [6.0, 5.0, 0.9, -0.1],
        [7.0, 3.0, -0.4, 0.6],
        [8.0, 6.0, 0.7, -0.9],
        [9.0, 4.0, -0.1, 0.4],
        [10.0, 7.0, 0.2, -0.2]
    ];
    let y = array![7.1, 11.9, 12.8, 19.7, 18.9, 27.8, 26.7, 35.9, 34.8, 43.1];

    println!("Training data: {} samples, {} features\n", x.nrows(), x.ncols());

    let data = Dataset::new(x, y)?;
    let plain = gradient_descent(&data, Params::zeros(data.shape()), 0.01, 2_000)?;
    println!("{:<20} {:>12}  {}", "Model", "Final cost", "Weights");
    println!("{}", "-".repeat(80));
    println!(
        "{:<20} {:>12.4e}  {}",
        "Plain",
        plain.history.last_cost().unwrap_or(f64::NAN),
        plain.params.weights
    );

    for lambda in [0.1, 1.0, 10.0] {
        let fitted = gradient_descent_reg(&data, Params::zeros(data.shape()), 0.01, 2_000, lambda)?;
        println!(
            "{:<20} {:>12.4e}  {}",
            format!("Ridge (lambda={lambda})"),
            fitted.history.last_cost().unwrap_or(f64::NAN),
            fitted.params.weights
        );
    }

    println!("\n=== Cost and gradient at random parameters ===\n");

    // Small random start, the same for both stages
    let mut rng = StdRng::seed_from_u64(1);
    let x = Matrix::random_using((5, 6), Uniform::new(0.0, 1.0), &mut rng);
    let y = array![0.0, 1.0, 0.0, 1.0, 0.0];
    let data = Dataset::new(x, y)?;
    let params = Params::random_using(data.shape(), 0.5, &mut rng)?;

    let reg = RegularizedSquaredError::new(0.7);
    println!("Plain cost:       {:.6}", SquaredError.cost(&data, &params));
    println!("Regularized cost: {:.6}", reg.cost(&data, &params));

    let grads = reg.gradient(&data, &params);
    println!("dj_db: {:.6}", grads.db);
    println!("dj_dw: {}", grads.dw);

    println!("\n=== Ridge estimator ===\n");

    let features = Features::Multivariate(x_scaled());
    let target = array![1.0, 2.0, 3.0, 4.0, 5.0];
    let mut model = RidgeRegression::new().lambda(0.5).learning_rate(0.1).num_iters(1_000);
    model.fit(&features, &target)?;
    println!("Weights: {}", model.params()?.weights);
    println!("R²: {:.4}", model.score(&features, &target)?);

    Ok(())
}

fn x_scaled() -> Matrix {
    array![[-1.0, 0.5], [-0.5, 0.0], [0.0, -0.5], [0.5, 0.2], [1.0, 0.1]]
}
