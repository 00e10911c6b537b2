//! Estimators that fit linear models by batch gradient descent.
//!
//! - `LinearRegression`: plain squared-error cost
//! - `RidgeRegression`: squared error with an L2 penalty on the weights
//! - `LogisticRegression`: log-loss over sigmoid probabilities, binary targets
//!
//! # Examples
//!
//! ## Linear Regression
//! ```rust
//! use gradlin::{Features, LinearRegression};
//! use ndarray::array;
//!
//! let x = Features::Univariate(array![1.0, 2.0, 3.0, 4.0]);
//! let y = array![3.0, 5.0, 7.0, 9.0];
//!
//! let mut model = LinearRegression::new().learning_rate(0.01).num_iters(10_000);
//! model.fit(&x, &y).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! assert!((predictions[3] - 9.0).abs() < 0.1);
//! ```
//!
//! ## Logistic Regression
//! ```rust
//! use gradlin::{Features, LogisticRegression};
//! use ndarray::array;
//!
//! let x = Features::Multivariate(array![[1.0], [2.0], [3.0], [4.0]]);
//! let y = array![0.0, 0.0, 1.0, 1.0];
//!
//! let mut model = LogisticRegression::new();
//! model.fit(&x, &y).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! let probabilities = model.predict_proba(&x).unwrap();
//! ```

mod linear_regression;
mod logistic_regression;
mod ridge;

pub use linear_regression::LinearRegression;
pub use logistic_regression::LogisticRegression;
pub use ridge::RidgeRegression;
