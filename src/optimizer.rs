//! The batch gradient-descent loop.
//!
//! One iteration computes `(dw, db)` at the current parameters, applies the
//! simultaneous update `w -= alpha * dw`, `b -= alpha * db`, evaluates the
//! cost at the new parameters and appends cost and parameters to the
//! history. Every `ceil(num_iters / 10)` iterations the observer receives a
//! [`Progress`].
//!
//! Inputs are validated once, before the first iteration. Numerical trouble
//! (an unstable learning rate, degenerate probabilities) is not caught: NaN
//! and infinity flow into the history and the returned parameters.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::DescentConfig;
use crate::cost::{CostFunction, LogLoss, RegularizedSquaredError, SquaredError};
use crate::dataset::Dataset;
use crate::error::{GdError, Result};
use crate::gradient::GradientFunction;
use crate::model::{Linear, Model, Sigmoid};
use crate::observer::{LogObserver, Observer, Progress};
use crate::params::{describe, Params};

/// Cost and parameter snapshot per recorded iteration, in iteration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub costs: Vec<f64>,
    pub params: Vec<Params>,
}

impl History {
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn last_cost(&self) -> Option<f64> {
        self.costs.last().copied()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn push(&mut self, cost: f64, params: Params) {
        self.costs.push(cost);
        self.params.push(params);
    }
}

/// Final parameters and the history of the run that produced them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fitted {
    pub params: Params,
    pub history: History,
}

/// Gradient descent over a model `M`, cost `C` and gradient `G`.
#[derive(Clone, Debug)]
pub struct GradientDescent<M = Linear, C = SquaredError, G = SquaredError> {
    model: M,
    cost: C,
    gradient: G,
    config: DescentConfig,
}

impl GradientDescent {
    /// Plain linear regression: [`Linear`] with [`SquaredError`].
    pub fn linear(config: DescentConfig) -> Self {
        Self::new(Linear, SquaredError, SquaredError, config)
    }
}

impl GradientDescent<Linear, RegularizedSquaredError, RegularizedSquaredError> {
    /// L2-regularized linear regression with `config.lambda`.
    pub fn regularized(config: DescentConfig) -> Self {
        let stage = RegularizedSquaredError::new(config.lambda);
        Self::new(Linear, stage, stage, config)
    }
}

impl GradientDescent<Sigmoid<Linear>, LogLoss, LogLoss> {
    /// Logistic regression: [`Sigmoid`] over [`Linear`] with [`LogLoss`].
    pub fn logistic(config: DescentConfig) -> Self {
        Self::new(Sigmoid::default(), LogLoss::default(), LogLoss::default(), config)
    }
}

impl<M, C, G> GradientDescent<M, C, G>
where
    M: Model,
    C: CostFunction,
    G: GradientFunction,
{
    pub fn new(model: M, cost: C, gradient: G, config: DescentConfig) -> Self {
        Self {
            model,
            cost,
            gradient,
            config,
        }
    }

    pub fn with_model<M2: Model>(self, model: M2) -> GradientDescent<M2, C, G> {
        GradientDescent::new(model, self.cost, self.gradient, self.config)
    }

    pub fn with_cost<C2: CostFunction>(self, cost: C2) -> GradientDescent<M, C2, G> {
        GradientDescent::new(self.model, cost, self.gradient, self.config)
    }

    pub fn with_gradient<G2: GradientFunction>(self, gradient: G2) -> GradientDescent<M, C, G2> {
        GradientDescent::new(self.model, self.cost, gradient, self.config)
    }

    pub fn config(&self) -> &DescentConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Runs the loop, reporting progress through the `log` facade.
    pub fn run(&self, data: &Dataset, initial: Params) -> Result<Fitted> {
        self.run_with_observer(data, initial, &mut LogObserver)
    }

    pub fn run_with_observer<O>(
        &self,
        data: &Dataset,
        initial: Params,
        observer: &mut O,
    ) -> Result<Fitted>
    where
        O: Observer + ?Sized,
    {
        self.validate(data, &initial)?;

        let shape = data.shape();
        let alpha = self.config.learning_rate;
        let iterations = self.config.iterations();
        let every = self.config.report_every();
        let cap = self.config.max_history.unwrap_or(usize::MAX);

        debug!(
            "gradient descent: {} examples, {:?}, alpha = {}, {} iterations",
            data.n_samples(),
            shape,
            alpha,
            iterations
        );

        let mut params = initial;
        let mut history = History::default();
        let mut diverged = false;

        for i in 0..iterations {
            let gradients = self.gradient.gradient_with(&self.model, data, &params);
            if gradients.dw.shape() != shape {
                return Err(GdError::shape(
                    format!("gradient with {}", describe(shape)),
                    format!("gradient with {}", describe(gradients.dw.shape())),
                ));
            }

            params.step(alpha, &gradients);
            let cost = self.cost.cost_with(&self.model, data, &params);

            if !cost.is_finite() && !diverged {
                warn!(
                    "cost became {} at iteration {}; learning rate {} may be too large",
                    cost, i, alpha
                );
                diverged = true;
            }

            if history.len() < cap {
                history.push(cost, params.clone());
            } else if i == cap {
                debug!("history cap of {} entries reached, later iterations are not recorded", cap);
            }

            if i % every == 0 {
                observer.observe(&Progress {
                    iteration: i,
                    cost,
                    gradients: &gradients,
                    params: &params,
                });
            }
        }

        debug!(
            "gradient descent finished: final cost {:?}, bias {}",
            history.last_cost(),
            params.bias
        );

        Ok(Fitted { params, history })
    }

    fn validate(&self, data: &Dataset, initial: &Params) -> Result<()> {
        self.config.validate()?;
        self.cost.validate()?;
        self.gradient.validate()?;
        initial.check_shape(data.shape())
    }
}

/// Plain linear regression over `num_iters + 1` iterations.
pub fn gradient_descent(
    data: &Dataset,
    initial: Params,
    alpha: f64,
    num_iters: usize,
) -> Result<Fitted> {
    GradientDescent::linear(DescentConfig::linear(alpha, num_iters)).run(data, initial)
}

/// L2-regularized linear regression over `num_iters + 1` iterations.
pub fn gradient_descent_reg(
    data: &Dataset,
    initial: Params,
    alpha: f64,
    num_iters: usize,
    lambda: f64,
) -> Result<Fitted> {
    let config = DescentConfig::linear(alpha, num_iters).lambda(lambda);
    GradientDescent::regularized(config).run(data, initial)
}

/// Logistic regression over `num_iters` iterations, history capped at
/// [`LOGISTIC_HISTORY_CAP`](crate::config::LOGISTIC_HISTORY_CAP) entries.
pub fn logistic_gradient_descent(
    data: &Dataset,
    initial: Params,
    alpha: f64,
    num_iters: usize,
) -> Result<Fitted> {
    GradientDescent::logistic(DescentConfig::logistic(alpha, num_iters)).run(data, initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistoryMode;
    use crate::observer::Silent;
    use crate::params::Weights;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn line() -> Dataset {
        Dataset::new(array![1.0, 2.0, 3.0, 4.0], array![3.0, 5.0, 7.0, 9.0]).unwrap()
    }

    #[test]
    fn test_univariate_converges() {
        let fitted = gradient_descent(&line(), Params::new(0.0, 0.0), 0.01, 10_000).unwrap();

        let w = fitted.params.weights.as_scalar().unwrap();
        assert_abs_diff_eq!(w, 2.0, epsilon = 0.05);
        assert_abs_diff_eq!(fitted.params.bias, 1.0, epsilon = 0.05);
    }

    #[test]
    fn test_history_lengths() {
        let data = line();
        let linear = gradient_descent(&data, Params::zeros(data.shape()), 0.01, 25).unwrap();
        assert_eq!(linear.history.costs.len(), 26);
        assert_eq!(linear.history.params.len(), 26);

        let reg = gradient_descent_reg(&data, Params::zeros(data.shape()), 0.01, 25, 1.0).unwrap();
        assert_eq!(reg.history.len(), 26);

        let labels = Dataset::new(array![-2.0, -1.0, 1.0, 2.0], array![0.0, 0.0, 1.0, 1.0]).unwrap();
        let logistic =
            logistic_gradient_descent(&labels, Params::zeros(labels.shape()), 0.1, 25).unwrap();
        assert_eq!(logistic.history.costs.len(), 25);
        assert_eq!(logistic.history.params.len(), 25);
    }

    #[test]
    fn test_zero_iterations() {
        let data = line();
        let linear = gradient_descent(&data, Params::zeros(data.shape()), 0.01, 0).unwrap();
        assert_eq!(linear.history.len(), 1);

        let logistic = GradientDescent::logistic(DescentConfig::logistic(0.1, 0))
            .run_with_observer(&data, Params::zeros(data.shape()), &mut Silent)
            .unwrap();
        assert!(logistic.history.is_empty());
        assert_eq!(logistic.params, Params::zeros(data.shape()));
    }

    #[test]
    fn test_last_snapshot_is_final_params() {
        let fitted = gradient_descent(&line(), Params::new(0.0, 0.0), 0.01, 50).unwrap();
        assert_eq!(fitted.history.params.last(), Some(&fitted.params));
    }

    #[test]
    fn test_reporting_cadence() {
        let data = line();
        let mut seen = Vec::new();
        let mut record = |p: &Progress<'_>| seen.push(p.iteration);

        GradientDescent::linear(DescentConfig::linear(0.01, 25))
            .run_with_observer(&data, Params::zeros(data.shape()), &mut record)
            .unwrap();

        // every ceil(25 / 10) = 3 iterations over 0..=25
        assert_eq!(seen, vec![0, 3, 6, 9, 12, 15, 18, 21, 24]);
    }

    #[test]
    fn test_progress_cost_matches_history() {
        let data = line();
        let mut reported = Vec::new();
        let mut record = |p: &Progress<'_>| reported.push((p.iteration, p.cost));

        let fitted = GradientDescent::linear(DescentConfig::linear(0.01, 5))
            .run_with_observer(&data, Params::zeros(data.shape()), &mut record)
            .unwrap();

        for (i, cost) in reported {
            assert_eq!(fitted.history.costs[i], cost);
        }
    }

    #[test]
    fn test_history_cap() {
        let data = line();
        let config = DescentConfig::linear(0.01, 20).max_history(Some(5));
        let fitted = GradientDescent::linear(config)
            .run_with_observer(&data, Params::zeros(data.shape()), &mut Silent)
            .unwrap();

        assert_eq!(fitted.history.len(), 5);
        // iterations past the cap still update the parameters
        assert_ne!(fitted.history.params[4], fitted.params);
    }

    #[test]
    fn test_shape_mismatch_fails_fast() {
        let data = Dataset::new(array![[1.0, 2.0], [3.0, 4.0]], array![1.0, 2.0]).unwrap();

        let result = gradient_descent(&data, Params::new(array![0.0, 0.0, 0.0], 0.0), 0.01, 10);
        assert!(matches!(result, Err(GdError::ShapeMismatch { .. })));

        let result = gradient_descent(&data, Params::new(0.0, 0.0), 0.01, 10);
        assert!(matches!(result, Err(GdError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_invalid_hyperparameters() {
        let data = line();
        let initial = Params::zeros(data.shape());

        assert!(matches!(
            gradient_descent(&data, initial.clone(), -0.01, 10),
            Err(GdError::InvalidHyperparameter { name: "learning_rate", .. })
        ));
        assert!(matches!(
            gradient_descent_reg(&data, initial, 0.01, 10, -1.0),
            Err(GdError::InvalidHyperparameter { name: "lambda", .. })
        ));
    }

    #[test]
    fn test_lambda_ignored_by_unregularized_runs() {
        let data = line();
        let config = DescentConfig::linear(0.01, 10).lambda(-1.0);

        let plain = GradientDescent::linear(config.clone()).run(&data, Params::zeros(data.shape()));
        assert!(plain.is_ok());

        let logistic = GradientDescent::logistic(DescentConfig::logistic(0.1, 10).lambda(-1.0))
            .run(&data, Params::zeros(data.shape()));
        assert!(logistic.is_ok());

        assert!(matches!(
            GradientDescent::regularized(config).run(&data, Params::zeros(data.shape())),
            Err(GdError::InvalidHyperparameter { name: "lambda", .. })
        ));
    }

    #[test]
    fn test_divergence_propagates() {
        let data = line();
        let fitted = gradient_descent(&data, Params::zeros(data.shape()), 10.0, 500).unwrap();

        assert_eq!(fitted.history.len(), 501);
        assert!(!fitted.history.last_cost().unwrap().is_finite());
    }

    #[test]
    fn test_injected_stages() {
        // A gradient stage that always returns zero leaves the parameters alone.
        struct Frozen;
        impl GradientFunction for Frozen {
            type DefaultModel = Linear;
            fn gradient_with<M: Model + ?Sized>(
                &self,
                _model: &M,
                data: &Dataset,
                _params: &Params,
            ) -> crate::params::Gradients {
                crate::params::Gradients {
                    dw: Weights::zeros(data.shape()),
                    db: 0.0,
                }
            }
        }

        let data = line();
        let initial = Params::new(0.5, -0.5);
        let fitted = GradientDescent::linear(DescentConfig::linear(0.1, 10))
            .with_gradient(Frozen)
            .run_with_observer(&data, initial.clone(), &mut Silent)
            .unwrap();
        assert_eq!(fitted.params, initial);
    }

    #[test]
    fn test_misshapen_gradient_is_an_error() {
        struct Wrong;
        impl GradientFunction for Wrong {
            type DefaultModel = Linear;
            fn gradient_with<M: Model + ?Sized>(
                &self,
                _model: &M,
                _data: &Dataset,
                _params: &Params,
            ) -> crate::params::Gradients {
                crate::params::Gradients {
                    dw: Weights::Vector(array![1.0, 1.0]),
                    db: 0.0,
                }
            }
        }

        let data = line();
        let result = GradientDescent::linear(DescentConfig::linear(0.1, 10))
            .with_gradient(Wrong)
            .run_with_observer(&data, Params::zeros(data.shape()), &mut Silent);
        assert!(matches!(result, Err(GdError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_exclusive_mode_on_linear_stages() {
        let data = line();
        let config = DescentConfig::linear(0.01, 7).history(HistoryMode::Exclusive);
        let fitted = GradientDescent::linear(config)
            .run_with_observer(&data, Params::zeros(data.shape()), &mut Silent)
            .unwrap();
        assert_eq!(fitted.history.len(), 7);
    }

    #[test]
    fn test_logistic_separates() {
        let data = Dataset::new(
            array![[0.5, 1.5], [1.0, 1.0], [1.5, 0.5], [3.0, 0.5], [2.0, 2.0], [1.0, 2.5]],
            array![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        )
        .unwrap();

        let fitted =
            logistic_gradient_descent(&data, Params::zeros(data.shape()), 0.1, 10_000).unwrap();
        let costs = &fitted.history.costs;
        assert!(costs.last().unwrap() < &costs[0]);

        let p = Sigmoid::<Linear>::default().predict(data.features(), &fitted.params);
        for (prob, y) in p.iter().zip(data.targets().iter()) {
            assert_eq!(*prob >= 0.5, *y == 1.0);
        }
    }
}
