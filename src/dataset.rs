use crate::error::{GdError, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Dimensionality of a dataset, resolved once from the feature layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// One scalar feature per example; the weight is a scalar.
    Univariate,
    /// `n` features per example; the weight is an `n`-vector.
    Multivariate(usize),
}

impl Shape {
    pub fn n_features(&self) -> usize {
        match self {
            Shape::Univariate => 1,
            Shape::Multivariate(n) => *n,
        }
    }
}

/// Feature data for `m` examples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Features {
    /// `m` scalar examples.
    Univariate(Vector),
    /// `m × n` design matrix, one example per row.
    Multivariate(Matrix),
}

impl Features {
    pub fn shape(&self) -> Shape {
        match self {
            Features::Univariate(_) => Shape::Univariate,
            Features::Multivariate(x) => Shape::Multivariate(x.ncols()),
        }
    }

    pub fn n_samples(&self) -> usize {
        match self {
            Features::Univariate(x) => x.len(),
            Features::Multivariate(x) => x.nrows(),
        }
    }

    /// Row-per-example view; univariate data is seen as a single `m × 1` column.
    pub fn design(&self) -> ArrayView2<'_, f64> {
        match self {
            Features::Univariate(x) => x.view().insert_axis(Axis(1)),
            Features::Multivariate(x) => x.view(),
        }
    }
}

impl From<Vector> for Features {
    fn from(x: Vector) -> Self {
        Features::Univariate(x)
    }
}

impl From<Matrix> for Features {
    fn from(x: Matrix) -> Self {
        Features::Multivariate(x)
    }
}

/// Features paired with one target per example. Immutable once built.
#[derive(Clone, Debug)]
pub struct Dataset {
    features: Features,
    targets: Vector,
}

impl Dataset {
    pub fn new(features: impl Into<Features>, targets: Vector) -> Result<Self> {
        let features = features.into();
        let m = features.n_samples();

        if m != targets.len() {
            return Err(GdError::shape(
                format!("{} targets (one per example)", m),
                format!("{} targets", targets.len()),
            ));
        }
        if m == 0 {
            return Err(GdError::EmptyDataset);
        }

        Ok(Self { features, targets })
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn targets(&self) -> &Vector {
        &self.targets
    }

    pub fn shape(&self) -> Shape {
        self.features.shape()
    }

    pub fn n_samples(&self) -> usize {
        self.features.n_samples()
    }

    pub fn n_features(&self) -> usize {
        self.shape().n_features()
    }

    /// Checks that every target is exactly 0 or 1.
    pub fn validate_binary_targets(&self) -> Result<()> {
        for &label in self.targets.iter() {
            if label != 0.0 && label != 1.0 {
                return Err(GdError::InvalidLabel(label));
            }
        }
        Ok(())
    }
}
