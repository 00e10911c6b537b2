//! Prediction stages: the linear hypothesis and its logistic squash.

use crate::dataset::Features;
use crate::params::{Params, Weights};
use crate::Vector;

/// Largest `f64` strictly below 1.
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

/// Maps features and parameters to one prediction per example.
///
/// Cost and gradient stages take the model as a parameter, so any
/// implementation can drive the same reductions.
pub trait Model {
    /// # Panics
    ///
    /// If the weight cannot be combined with the features (a weight vector
    /// whose length differs from the feature count). The optimizer rejects
    /// such pairs before any stage runs.
    fn predict(&self, features: &Features, params: &Params) -> Vector;
}

/// `f(x) = x · w + b`. The default prediction stage for linear regression.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linear;

impl Model for Linear {
    fn predict(&self, features: &Features, params: &Params) -> Vector {
        let b = params.bias;
        match (features, &params.weights) {
            (Features::Univariate(x), Weights::Scalar(w)) => x.mapv(|x| x * w + b),
            (Features::Multivariate(x), Weights::Vector(w)) => x.dot(w) + b,
            (features, weights) => features.design().dot(&weights.to_vector()) + b,
        }
    }
}

/// Logistic squash over an inner model, one probability per example.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid<M = Linear> {
    inner: M,
}

impl<M: Model> Sigmoid<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Model> Model for Sigmoid<M> {
    fn predict(&self, features: &Features, params: &Params) -> Vector {
        self.inner.predict(features, params).mapv_into(sigmoid)
    }
}

/// `1 / (1 + exp(-z))`, evaluated without overflow and kept strictly inside (0, 1).
pub fn sigmoid(z: f64) -> f64 {
    let g = if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    };
    g.clamp(f64::MIN_POSITIVE, ONE_BELOW)
}
