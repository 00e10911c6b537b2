use gradlin::metrics::accuracy;
use gradlin::{logistic_gradient_descent, sigmoid, Dataset, Features, LogisticRegression, Params};
use ndarray::{array, Array1, Array2, Axis};
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Logistic Regression ===\n");

    println!("sigmoid(-10) = {:.6}", sigmoid(-10.0));
    println!("sigmoid(0)   = {:.6}", sigmoid(0.0));
    println!("sigmoid(10)  = {:.6}\n", sigmoid(10.0));

    let x = array![
        [0.5, 1.5],
        [1.0, 1.0],
        [1.5, 0.5],
        [3.0, 0.5],
        [2.0, 2.0],
        [1.0, 2.5]
    ];
    let y = array![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];

    let data = Dataset::new(x, y)?;
    let fitted = logistic_gradient_descent(&data, Params::zeros(data.shape()), 0.1, 10_000)?;

    println!("Updated parameters: w = {}, b = {:.4}", fitted.params.weights, fitted.params.bias);
    println!("Final log-loss: {:.4e}\n", fitted.history.last_cost().unwrap_or(f64::NAN));

    println!("=== Two Gaussian blobs through the estimator ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0, 0.6)?;
    let negatives = Array2::random_using((40, 2), noise, &mut rng) - 1.5;
    let positives = Array2::random_using((40, 2), noise, &mut rng) + 1.5;
    let x = ndarray::concatenate(Axis(0), &[negatives.view(), positives.view()])?;
    let labels = (Array1::<f64>::zeros(40), Array1::<f64>::ones(40));
    let y = ndarray::concatenate(Axis(0), &[labels.0.view(), labels.1.view()])?;
    let features = Features::Multivariate(x);

    let mut model = LogisticRegression::new().learning_rate(0.5).num_iters(2_000);
    model.fit(&features, &y)?;

    let predictions = model.predict(&features)?;
    let probabilities = model.predict_proba(&features)?;
    println!("Training accuracy: {:.2}%", accuracy(&y, &predictions)? * 100.0);
    println!("First probabilities: {:.3}", probabilities.slice(ndarray::s![..3]));
    println!("Last probabilities:  {:.3}", probabilities.slice(ndarray::s![-3..]));

    Ok(())
}
