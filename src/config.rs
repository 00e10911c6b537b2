//! Hyperparameters of one optimization run.

use serde::{Deserialize, Serialize};

use crate::error::{GdError, Result};

/// History cap used by the logistic preset.
pub const LOGISTIC_HISTORY_CAP: usize = 100_000;

/// How many iterations a run of `num_iters` performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// Iterations `0..=num_iters`: a trailing update after the last counted
    /// one, so history holds `num_iters + 1` entries. Linear variants.
    #[default]
    Inclusive,
    /// Iterations `0..num_iters`, history holds `num_iters` entries. Logistic variant.
    Exclusive,
}

impl HistoryMode {
    pub fn iterations(&self, num_iters: usize) -> usize {
        match self {
            HistoryMode::Inclusive => num_iters.saturating_add(1),
            HistoryMode::Exclusive => num_iters,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescentConfig {
    /// Step size `alpha`. Zero leaves the parameters untouched.
    pub learning_rate: f64,
    pub num_iters: usize,
    /// L2 strength for the regularized stages.
    pub lambda: f64,
    pub history: HistoryMode,
    /// Maximum entries kept in each history sequence; `None` keeps all.
    pub max_history: Option<usize>,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            num_iters: 1000,
            lambda: 1.0,
            history: HistoryMode::Inclusive,
            max_history: None,
        }
    }
}

impl DescentConfig {
    pub fn linear(learning_rate: f64, num_iters: usize) -> Self {
        Self {
            learning_rate,
            num_iters,
            ..Self::default()
        }
    }

    pub fn logistic(learning_rate: f64, num_iters: usize) -> Self {
        Self {
            learning_rate,
            num_iters,
            history: HistoryMode::Exclusive,
            max_history: Some(LOGISTIC_HISTORY_CAP),
            ..Self::default()
        }
    }

    /// Parses a JSON document; missing fields take their [`Default`] values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn num_iters(mut self, num_iters: usize) -> Self {
        self.num_iters = num_iters;
        self
    }

    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    pub fn max_history(mut self, max_history: Option<usize>) -> Self {
        self.max_history = max_history;
        self
    }

    /// Number of iterations a run with this config performs.
    pub fn iterations(&self) -> usize {
        self.history.iterations(self.num_iters)
    }

    /// Reporting cadence: `ceil(num_iters / 10)`, at least 1.
    pub fn report_every(&self) -> usize {
        crate::observer::report_every(self.num_iters)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(GdError::hyperparameter(
                "learning_rate",
                self.learning_rate,
                "must be finite and non-negative",
            ));
        }
        if self.max_history == Some(0) {
            return Err(GdError::InvalidHyperparameter {
                name: "max_history",
                value: "0".to_string(),
                reason: "must keep at least one entry",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let linear = DescentConfig::linear(0.1, 50);
        assert_eq!(linear.iterations(), 51);
        assert_eq!(linear.max_history, None);

        let logistic = DescentConfig::logistic(0.1, 50);
        assert_eq!(logistic.iterations(), 50);
        assert_eq!(logistic.max_history, Some(LOGISTIC_HISTORY_CAP));
    }

    #[test]
    fn test_validate() {
        assert!(DescentConfig::default().validate().is_ok());
        assert!(DescentConfig::default().learning_rate(0.0).validate().is_ok());
        assert!(DescentConfig::default().learning_rate(-0.1).validate().is_err());
        assert!(DescentConfig::default().learning_rate(f64::NAN).validate().is_err());
        // only the regularized stage reads lambda
        assert!(DescentConfig::default().lambda(-1.0).validate().is_ok());
        assert!(DescentConfig::default().max_history(Some(0)).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DescentConfig::from_json(r#"{"learning_rate": 0.5, "history": "exclusive"}"#)
            .unwrap();
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.num_iters, 1000);
        assert_eq!(config.lambda, 1.0);
        assert_eq!(config.history, HistoryMode::Exclusive);
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        assert!(matches!(
            DescentConfig::from_json(r#"{"learning_rate": -2.0}"#),
            Err(GdError::InvalidHyperparameter { name: "learning_rate", .. })
        ));
        assert!(matches!(
            DescentConfig::from_json(r#"{"num_iters": -1}"#),
            Err(GdError::Config(_))
        ));
    }

    #[test]
    fn test_iterations_saturate() {
        assert_eq!(HistoryMode::Inclusive.iterations(usize::MAX), usize::MAX);
    }
}
