use crate::config::DescentConfig;
use crate::dataset::{Dataset, Features};
use crate::error::{GdError, Result};
use crate::model::{Linear, Model, Sigmoid};
use crate::optimizer::{Fitted, GradientDescent, History};
use crate::params::Params;
use crate::Vector;

/// Binary classifier fit by gradient descent on the log-loss.
///
/// Runs `num_iters` iterations and keeps at most
/// [`LOGISTIC_HISTORY_CAP`](crate::config::LOGISTIC_HISTORY_CAP) history entries.
#[derive(Clone, Debug)]
pub struct LogisticRegression {
    pub fitted: Option<Fitted>,
    config: DescentConfig,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::with_config(DescentConfig::logistic(0.01, 1000))
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

    pub fn fit(&mut self, x: &Features, y: &Vector) -> Result<()> {
        let data = Dataset::new(x.clone(), y.clone())?;
        data.validate_binary_targets()?;
        let initial = Params::zeros(data.shape());

        let fitted = GradientDescent::logistic(self.config.clone()).run(&data, initial)?;
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

    /// Probability of the positive class for each example.
    pub fn predict_proba(&self, x: &Features) -> Result<Vector> {
        let params = self.params()?;
        params.check_shape(x.shape())?;
        Ok(Sigmoid::<Linear>::default().predict(x, params))
    }

    /// Class labels, thresholding the probability at 0.5.
    pub fn predict(&self, x: &Features) -> Result<Vector> {
        let probabilities = self.predict_proba(x)?;
        Ok(probabilities.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }

    /// Accuracy of the predicted labels.
    pub fn score(&self, x: &Features, y: &Vector) -> Result<f64> {
        let predictions = self.predict(x)?;
        crate::metrics::accuracy(y, &predictions)
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}
