//! Gradient stages, paired with the costs in [`crate::cost`].
//!
//! All three compute the residual `prediction - target` once, then
//! accumulate `residual * x[i, j]` per example per feature and `residual`
//! alone for the bias, normalizing both by `m`.

use crate::cost::{check_lambda, LogLoss, RegularizedSquaredError, SquaredError};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::model::{Linear, Model, Sigmoid};
use crate::params::{Gradients, Params, Weights};
use crate::Vector;

/// Partial derivatives `(dw, db)` of a cost, `dw` shaped like the weight.
pub trait GradientFunction {
    /// Prediction stage used by [`gradient`](GradientFunction::gradient).
    type DefaultModel: Model + Default;

    fn gradient_with<M: Model + ?Sized>(
        &self,
        model: &M,
        data: &Dataset,
        params: &Params,
    ) -> Gradients;

    fn gradient(&self, data: &Dataset, params: &Params) -> Gradients {
        self.gradient_with(&Self::DefaultModel::default(), data, params)
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn residual_gradient<M: Model + ?Sized>(model: &M, data: &Dataset, params: &Params) -> Gradients {
    let m = data.n_samples() as f64;
    let x = data.features().design();
    let err = model.predict(data.features(), params) - data.targets();

    let n = x.ncols();
    let mut dj_dw = Vector::zeros(n);
    let mut dj_db = 0.0;
    for (i, row) in x.outer_iter().enumerate() {
        for j in 0..n {
            dj_dw[j] += err[i] * row[j];
        }
        dj_db += err[i];
    }
    dj_dw /= m;
    dj_db /= m;

    Gradients {
        dw: Weights::from_components(data.shape(), dj_dw),
        db: dj_db,
    }
}

impl GradientFunction for SquaredError {
    type DefaultModel = Linear;

    fn gradient_with<M: Model + ?Sized>(
        &self,
        model: &M,
        data: &Dataset,
        params: &Params,
    ) -> Gradients {
        residual_gradient(model, data, params)
    }
}

impl GradientFunction for RegularizedSquaredError {
    type DefaultModel = Linear;

    fn gradient_with<M: Model + ?Sized>(
        &self,
        model: &M,
        data: &Dataset,
        params: &Params,
    ) -> Gradients {
        let m = data.n_samples() as f64;
        let mut grads = residual_gradient(model, data, params);
        grads.dw.add_scaled(self.lambda / m, &params.weights);
        grads
    }

    fn validate(&self) -> Result<()> {
        check_lambda(self.lambda)
    }
}

/// Same form as [`SquaredError`]'s gradient; the residual is taken on the
/// model's probability output.
impl GradientFunction for LogLoss {
    type DefaultModel = Sigmoid<Linear>;

    fn gradient_with<M: Model + ?Sized>(
        &self,
        model: &M,
        data: &Dataset,
        params: &Params,
    ) -> Gradients {
        residual_gradient(model, data, params)
    }

    fn validate(&self) -> Result<()> {
        <Self as crate::cost::CostFunction>::validate(self)
    }
}
