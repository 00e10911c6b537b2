use crate::config::DescentConfig;
use crate::cost::{CostFunction, RegularizedSquaredError};
use crate::dataset::{Dataset, Features};
use crate::error::{GdError, Result};
use crate::optimizer::{Fitted, GradientDescent, History};
use crate::params::Params;
use crate::Vector;

/// Linear regression with an L2 penalty `(lambda / 2m) * sum(w_j^2)`.
#[derive(Clone, Debug)]
pub struct RidgeRegression {
    pub fitted: Option<Fitted>,
    config: DescentConfig,
}

impl RidgeRegression {
    pub fn new() -> Self {
        Self::with_config(DescentConfig::linear(0.01, 1000))
    }

    pub fn with_config(config: DescentConfig) -> Self {
        Self {
            fitted: None,
            config,
        }
    }

    /// Regularization strength; negative values are rejected by `fit`.
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.config.lambda = lambda;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    pub fn num_iters(mut self, num_iters: usize) -> Self {
        self.config.num_iters = num_iters;
        self
    }

    pub fn fit(&mut self, x: &Features, y: &Vector) -> Result<()> {
        let data = Dataset::new(x.clone(), y.clone())?;
        let initial = Params::zeros(data.shape());

        let fitted = GradientDescent::regularized(self.config.clone()).run(&data, initial)?;
        self.fitted = Some(fitted);
        Ok(())
    }

    pub fn params(&self) -> Result<&Params> {
        self.fitted
            .as_ref()
            .map(|fitted| &fitted.params)
            .ok_or(GdError::NotFitted)
    }

    pub fn history(&self) -> Option<&History> {
        self.fitted.as_ref().map(|fitted| &fitted.history)
    }

    pub fn predict(&self, x: &Features) -> Result<Vector> {
        self.params()?.predict(x)
    }

    pub fn score(&self, x: &Features, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }

    /// Regularized cost of the fitted parameters on `(x, y)`.
    pub fn cost(&self, x: &Features, y: &Vector) -> Result<f64> {
        let params = self.params()?;
        let data = Dataset::new(x.clone(), y.clone())?;
        params.check_shape(data.shape())?;
        Ok(RegularizedSquaredError::new(self.config.lambda).cost(&data, params))
    }
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn weight_norm(model: &RidgeRegression) -> f64 {
        model.params().unwrap().weights.squared_norm()
    }

    #[test]
    fn test_ridge_simple() {
        let x = Features::Univariate(array![1.0, 2.0, 3.0, 4.0]);
        let y = array![2.0, 4.0, 6.0, 8.0];

        let mut model = RidgeRegression::new().lambda(0.0).num_iters(10_000);
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        for (pred, actual) in predictions.iter().zip(y.iter()) {
            assert!((pred - actual).abs() < 0.1);
        }
    }

    #[test]
    fn test_ridge_shrinks_weights() {
        let x = Features::Multivariate(array![[1.0, 2.0], [2.0, 3.0], [3.0, 4.0], [4.0, 5.0]]);
        let y = array![5.0, 8.0, 11.0, 14.0];

        let mut weak = RidgeRegression::new().lambda(0.0).num_iters(5_000);
        weak.fit(&x, &y).unwrap();
        let mut strong = RidgeRegression::new().lambda(10.0).num_iters(5_000);
        strong.fit(&x, &y).unwrap();

        assert!(weight_norm(&strong) < weight_norm(&weak));
        assert!(strong.score(&x, &y).unwrap() > 0.5);
    }

    #[test]
    fn test_ridge_invalid_lambda() {
        let x = Features::Univariate(array![1.0, 2.0]);
        let mut model = RidgeRegression::new().lambda(-1.0);

        assert!(matches!(
            model.fit(&x, &array![1.0, 2.0]),
            Err(GdError::InvalidHyperparameter { name: "lambda", .. })
        ));
        assert!(model.fitted.is_none());
    }

    #[test]
    fn test_ridge_cost_matches_history() {
        let x = Features::Univariate(array![1.0, 2.0, 3.0]);
        let y = array![1.0, 3.0, 2.0];

        let mut model = RidgeRegression::new().lambda(0.5).num_iters(100);
        model.fit(&x, &y).unwrap();

        let last = model.history().unwrap().last_cost().unwrap();
        assert_eq!(model.cost(&x, &y).unwrap(), last);
    }

    #[test]
    fn test_ridge_predict_without_fit() {
        let x = Features::Univariate(array![1.0, 2.0]);
        let model = RidgeRegression::new();

        assert!(model.predict(&x).is_err());
    }
}
