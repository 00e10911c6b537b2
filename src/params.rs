use std::fmt;

use ndarray_rand::rand_distr::{Distribution, Uniform};
use ndarray_rand::RandomExt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dataset::{Features, Shape};
use crate::error::{GdError, Result};
use crate::model::{Linear, Model};
use crate::Vector;

/// Weight component of the parameter state, shaped like the features.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Weights {
    Scalar(f64),
    Vector(Vector),
}

impl Weights {
    pub fn zeros(shape: Shape) -> Self {
        match shape {
            Shape::Univariate => Weights::Scalar(0.0),
            Shape::Multivariate(n) => Weights::Vector(Vector::zeros(n)),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Weights::Scalar(_) => Shape::Univariate,
            Weights::Vector(w) => Shape::Multivariate(w.len()),
        }
    }

    /// Components as a vector: length 1 for a scalar weight.
    pub fn to_vector(&self) -> Vector {
        match self {
            Weights::Scalar(w) => Vector::from_elem(1, *w),
            Weights::Vector(w) => w.clone(),
        }
    }

    /// Packs per-feature components back into the variant `shape` calls for.
    pub(crate) fn from_components(shape: Shape, components: Vector) -> Self {
        match shape {
            Shape::Univariate => Weights::Scalar(components[0]),
            Shape::Multivariate(_) => Weights::Vector(components),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Weights::Scalar(w) => Some(*w),
            Weights::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Weights::Scalar(_) => None,
            Weights::Vector(w) => Some(w),
        }
    }

    /// `sum(w_j^2)` over all components.
    pub fn squared_norm(&self) -> f64 {
        match self {
            Weights::Scalar(w) => w * w,
            Weights::Vector(w) => {
                let mut total = 0.0;
                for &wj in w.iter() {
                    total += wj * wj;
                }
                total
            }
        }
    }

    /// `self[j] += k * other[j]`. Both sides must share a shape.
    pub(crate) fn add_scaled(&mut self, k: f64, other: &Weights) {
        match (self, other) {
            (Weights::Scalar(a), Weights::Scalar(b)) => *a += k * b,
            (Weights::Vector(a), Weights::Vector(b)) => a.zip_mut_with(b, |a, &b| *a += k * b),
            (a, b) => unreachable!("weight shapes diverged: {:?} vs {:?}", a.shape(), b.shape()),
        }
    }

    /// `self[j] -= alpha * grad[j]`. Both sides must share a shape.
    pub(crate) fn descend(&mut self, alpha: f64, grad: &Weights) {
        match (self, grad) {
            (Weights::Scalar(w), Weights::Scalar(g)) => *w -= alpha * g,
            (Weights::Vector(w), Weights::Vector(g)) => w.zip_mut_with(g, |w, &g| *w -= alpha * g),
            (w, g) => unreachable!("weight shapes diverged: {:?} vs {:?}", w.shape(), g.shape()),
        }
    }
}

impl From<f64> for Weights {
    fn from(w: f64) -> Self {
        Weights::Scalar(w)
    }
}

impl From<Vector> for Weights {
    fn from(w: Vector) -> Self {
        Weights::Vector(w)
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weights::Scalar(w) => write!(f, "{:.3e}", w),
            Weights::Vector(w) => {
                write!(f, "[")?;
                for (j, wj) in w.iter().enumerate() {
                    if j > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:.3e}", wj)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Weight and bias of a linear model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub weights: Weights,
    pub bias: f64,
}

impl Params {
    pub fn new(weights: impl Into<Weights>, bias: f64) -> Self {
        Self {
            weights: weights.into(),
            bias,
        }
    }

    pub fn zeros(shape: Shape) -> Self {
        Self::new(Weights::zeros(shape), 0.0)
    }

    /// Weights drawn uniformly from `[-scale, scale]`, zero bias.
    pub fn random_using<R: Rng + ?Sized>(shape: Shape, scale: f64, rng: &mut R) -> Result<Self> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(GdError::hyperparameter(
                "scale",
                scale,
                "must be finite and non-negative",
            ));
        }

        let dist = Uniform::new_inclusive(-scale, scale);
        let weights = match shape {
            Shape::Univariate => Weights::Scalar(dist.sample(rng)),
            Shape::Multivariate(n) => Weights::Vector(Vector::random_using(n, dist, rng)),
        };
        Ok(Self::new(weights, 0.0))
    }

    pub fn shape(&self) -> Shape {
        self.weights.shape()
    }

    pub fn check_shape(&self, expected: Shape) -> Result<()> {
        let got = self.shape();
        if got != expected {
            return Err(GdError::shape(describe(expected), describe(got)));
        }
        Ok(())
    }

    /// Raw linear prediction `x · w + b` for each example.
    pub fn predict(&self, features: &Features) -> Result<Vector> {
        self.check_shape(features.shape())?;
        Ok(Linear.predict(features, self))
    }

    /// Simultaneous update of weight and bias from the same gradient.
    pub(crate) fn step(&mut self, alpha: f64, gradients: &Gradients) {
        self.bias -= alpha * gradients.db;
        self.weights.descend(alpha, &gradients.dw);
    }
}

/// Partial derivatives of the cost w.r.t. the weight and the bias.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradients {
    pub dw: Weights,
    pub db: f64,
}

pub(crate) fn describe(shape: Shape) -> String {
    match shape {
        Shape::Univariate => "a scalar weight (univariate features)".to_string(),
        Shape::Multivariate(n) => format!("a weight vector of {} features", n),
    }
}
