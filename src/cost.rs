//! Cost stages. Every cost reduces per-example error to one scalar,
//! summing then normalizing by the example count `m`.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{GdError, Result};
use crate::model::{Linear, Model, Sigmoid};
use crate::params::Params;

/// Default probability clamp for [`LogLoss`].
pub const LOG_LOSS_EPSILON: f64 = 1e-15;

/// Scalar loss of a dataset under the given parameters.
///
/// The prediction stage is a parameter of [`cost_with`](CostFunction::cost_with);
/// [`cost`](CostFunction::cost) uses the stage the loss is defined against.
pub trait CostFunction {
    /// Prediction stage used by [`cost`](CostFunction::cost).
    type DefaultModel: Model + Default;

    fn cost_with<M: Model + ?Sized>(&self, model: &M, data: &Dataset, params: &Params) -> f64;

    fn cost(&self, data: &Dataset, params: &Params) -> f64 {
        self.cost_with(&Self::DefaultModel::default(), data, params)
    }

    /// Rejects invalid stage settings before a run starts.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// `sum((f - y)^2) / 2m`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SquaredError;

impl CostFunction for SquaredError {
    type DefaultModel = Linear;

    fn cost_with<M: Model + ?Sized>(&self, model: &M, data: &Dataset, params: &Params) -> f64 {
        let m = data.n_samples() as f64;
        let f_wb = model.predict(data.features(), params);

        let mut cost = 0.0;
        for (f, y) in f_wb.iter().zip(data.targets().iter()) {
            let err = f - y;
            cost += err * err;
        }
        cost / (2.0 * m)
    }
}

/// [`SquaredError`] plus the L2 penalty `(lambda / 2m) * sum(w_j^2)`.
/// The bias is not penalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegularizedSquaredError {
    pub lambda: f64,
}

impl RegularizedSquaredError {
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }
}

impl Default for RegularizedSquaredError {
    fn default() -> Self {
        Self { lambda: 1.0 }
    }
}

impl CostFunction for RegularizedSquaredError {
    type DefaultModel = Linear;

    fn cost_with<M: Model + ?Sized>(&self, model: &M, data: &Dataset, params: &Params) -> f64 {
        let m = data.n_samples() as f64;
        let cost = SquaredError.cost_with(model, data, params);
        let reg_cost = params.weights.squared_norm() * (self.lambda / (2.0 * m));
        cost + reg_cost
    }

    fn validate(&self) -> Result<()> {
        check_lambda(self.lambda)
    }
}

/// Mean negative log-likelihood of binary targets.
///
/// Probabilities are clamped to `[epsilon, 1 - epsilon]` before the logarithm,
/// so a saturated prediction yields a large finite cost instead of infinity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogLoss {
    pub epsilon: f64,
}

impl LogLoss {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

impl Default for LogLoss {
    fn default() -> Self {
        Self {
            epsilon: LOG_LOSS_EPSILON,
        }
    }
}

impl CostFunction for LogLoss {
    type DefaultModel = Sigmoid<Linear>;

    fn cost_with<M: Model + ?Sized>(&self, model: &M, data: &Dataset, params: &Params) -> f64 {
        let m = data.n_samples() as f64;
        let probabilities = model.predict(data.features(), params);

        let mut cost = 0.0;
        for (&p, &y) in probabilities.iter().zip(data.targets().iter()) {
            let p = p.max(self.epsilon).min(1.0 - self.epsilon);
            cost += -y * p.ln() - (1.0 - y) * (1.0 - p).ln();
        }
        cost / m
    }

    fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0 && self.epsilon < 0.5) {
            return Err(GdError::hyperparameter(
                "epsilon",
                self.epsilon,
                "must lie strictly between 0 and 0.5",
            ));
        }
        Ok(())
    }
}

pub(crate) fn check_lambda(lambda: f64) -> Result<()> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(GdError::hyperparameter(
            "lambda",
            lambda,
            "must be finite and non-negative",
        ));
    }
    Ok(())
}
