//! Progress reporting side-channel for the optimizer loop.

use log::info;

use crate::params::{Gradients, Params};

/// One progress observation, emitted at the reporting cadence.
#[derive(Clone, Copy, Debug)]
pub struct Progress<'a> {
    pub iteration: usize,
    /// Cost at the parameters after this iteration's update.
    pub cost: f64,
    /// Gradient this iteration's update was taken from.
    pub gradients: &'a Gradients,
    pub params: &'a Params,
}

pub trait Observer {
    fn observe(&mut self, progress: &Progress<'_>);
}

/// Default observer: one `info` log line per observation.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn observe(&mut self, p: &Progress<'_>) {
        info!(
            "Iteration {:6}: Cost {:0.2e}  dj_dw: {}, dj_db: {:0.3e}  w: {}, b: {:0.5e}",
            p.iteration, p.cost, p.gradients.dw, p.gradients.db, p.params.weights, p.params.bias
        );
    }
}

/// Discards every observation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Observer for Silent {
    fn observe(&mut self, _progress: &Progress<'_>) {}
}

impl<F> Observer for F
where
    F: FnMut(&Progress<'_>),
{
    fn observe(&mut self, progress: &Progress<'_>) {
        self(progress)
    }
}

/// Reporting cadence for a run of `num_iters` iterations: `ceil(num_iters / 10)`, at least 1.
pub fn report_every(num_iters: usize) -> usize {
    num_iters.div_ceil(10).max(1)
}
