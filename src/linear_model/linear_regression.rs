use crate::config::DescentConfig;
use crate::dataset::{Dataset, Features};
use crate::error::{GdError, Result};
use crate::optimizer::{Fitted, GradientDescent, History};
use crate::params::Params;
use crate::Vector;

#[derive(Clone, Debug)]
pub struct LinearRegression {
    pub fitted: Option<Fitted>,
    config: DescentConfig,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::with_config(DescentConfig::linear(0.01, 1000))
    }

    pub fn with_config(config: DescentConfig) -> Self {
        Self {
            fitted: None,
            config,
        }
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    pub fn num_iters(mut self, num_iters: usize) -> Self {
        self.config.num_iters = num_iters;
        self
    }

    pub fn config(&self) -> &DescentConfig {
        &self.config
    }

    /// Fits from zero-initialized parameters.
    pub fn fit(&mut self, x: &Features, y: &Vector) -> Result<()> {
        let data = Dataset::new(x.clone(), y.clone())?;
        let initial = Params::zeros(data.shape());

        let fitted = GradientDescent::linear(self.config.clone()).run(&data, initial)?;
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

    /// Coefficient of determination of the predictions on `x`.
    pub fn score(&self, x: &Features, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}
