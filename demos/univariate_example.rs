use gradlin::{gradient_descent, Dataset, Features, LinearRegression, Params};
use ndarray::Array1;
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=info shows the per-iteration progress lines
    env_logger::init();

    println!("=== Univariate Linear Regression ===\n");

    // Housing-style data: size in 1000 sqft against price in $1000s
    let x = ndarray::array![1.0, 1.7, 2.0, 2.5, 3.0, 3.2];
    let y = ndarray::array![250.0, 300.0, 480.0, 430.0, 630.0, 730.0];

    let data = Dataset::new(x, y)?;
    let fitted = gradient_descent(&data, Params::new(0.0, 0.0), 0.01, 10_000)?;

    println!("Final parameters: w = {}, b = {:.4}", fitted.params.weights, fitted.params.bias);
    println!(
        "Cost: first {:.4e}, last {:.4e} over {} recorded iterations",
        fitted.history.costs[0],
        fitted.history.last_cost().unwrap_or(f64::NAN),
        fitted.history.len()
    );

    for size in [1.2, 2.0] {
        let price = fitted.params.predict(&Features::Univariate(ndarray::array![size]))?;
        println!("  {size:.1} thousand sqft -> ${:.1} thousand", price[0]);
    }

    println!("\n=== Noisy line y = 2x + 1 through the estimator ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let x = Array1::linspace(0.0, 5.0, 50);
    let noise = Array1::random_using(50, Normal::new(0.0, 0.2)?, &mut rng);
    let y = x.mapv(|x| 2.0 * x + 1.0) + noise;
    let features = Features::Univariate(x);

    let mut model = LinearRegression::new().learning_rate(0.05).num_iters(5_000);
    model.fit(&features, &y)?;

    let params = model.params()?;
    println!("Learned: w = {}, b = {:.3}", params.weights, params.bias);
    println!("R² on training data: {:.4}", model.score(&features, &y)?);

    if let Some(history) = model.history() {
        let json = history.to_json()?;
        println!("History JSON: {} bytes for {} entries", json.len(), history.len());
    }

    Ok(())
}
