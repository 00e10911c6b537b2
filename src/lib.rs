//! Batch gradient descent for linear and logistic regression.
//!
//! The optimizer loop in [`optimizer`] is driven by three pluggable stages:
//! a [`Model`] producing predictions, a [`CostFunction`] reducing them to a
//! scalar loss and a [`GradientFunction`] producing `(dw, db)`. The
//! estimators in [`linear_model`] wrap the loop behind `fit`/`predict`.
//!
//! ```rust
//! use gradlin::{gradient_descent, Dataset, Features, Params};
//! use ndarray::array;
//!
//! let data = Dataset::new(
//!     Features::Univariate(array![1.0, 2.0, 3.0, 4.0]),
//!     array![3.0, 5.0, 7.0, 9.0],
//! ).unwrap();
//!
//! let fitted = gradient_descent(&data, Params::zeros(data.shape()), 0.01, 10_000).unwrap();
//! assert!((fitted.params.bias - 1.0).abs() < 0.05);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod config;
pub mod cost;
pub mod dataset;
pub mod error;
pub mod gradient;
pub mod linear_model;
pub mod metrics;
pub mod model;
pub mod observer;
pub mod optimizer;
pub mod params;

pub use config::{DescentConfig, HistoryMode};
pub use cost::{CostFunction, LogLoss, RegularizedSquaredError, SquaredError};
pub use dataset::{Dataset, Features, Shape};
pub use error::{GdError, Result};
pub use gradient::GradientFunction;
pub use linear_model::{LinearRegression, LogisticRegression, RidgeRegression};
pub use model::{sigmoid, Linear, Model, Sigmoid};
pub use observer::{LogObserver, Observer, Progress, Silent};
pub use optimizer::{
    gradient_descent, gradient_descent_reg, logistic_gradient_descent, Fitted, GradientDescent,
    History,
};
pub use params::{Gradients, Params, Weights};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
