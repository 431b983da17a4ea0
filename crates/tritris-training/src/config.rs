use serde::{Deserialize, Serialize};
use tritris_engine::FeatureLayout;

use crate::ActionSet;

/// Hyperparameters of a [`Trainer`](crate::Trainer).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TrainerConfig {
    /// Learning rate.
    pub alpha: f64,
    /// Discount applied to the bootstrapped term of the TD target.
    pub gamma: f64,
    /// Probability of picking a uniformly random move while training.
    pub epsilon: f64,
    /// Step cap per episode.
    pub max_game_len: usize,
    pub feature_layout: FeatureLayout,
    pub action_set: ActionSet,
}

/// Largest learning rate accepted by [`TrainerConfig::validate`].
///
/// A feature vector holds up to 25 ones plus the pivot coordinates, and the TD
/// update only stays bounded while `alpha * |x|^2` remains small.
pub const MAX_ALPHA: f64 = 0.01;

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.001,
            gamma: 0.9,
            epsilon: 0.1,
            max_game_len: 25,
            feature_layout: FeatureLayout::default(),
            action_set: ActionSet::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("alpha must be in (0, 0.01], got {_0}")]
    InvalidAlpha(#[error(not(source))] f64),
    #[display("gamma must be in [0, 1], got {_0}")]
    InvalidGamma(#[error(not(source))] f64),
    #[display("epsilon must be in [0, 1], got {_0}")]
    InvalidEpsilon(#[error(not(source))] f64),
    #[display("max_game_len must be > 0")]
    ZeroGameLength,
    #[display("weight vector has {actual} entries, feature layout needs {expected}")]
    WeightDimensionMismatch { expected: usize, actual: usize },
    #[display("weight vector contains NaN or infinite entries")]
    NonFiniteWeights,
}

impl TrainerConfig {
    /// Checks that every hyperparameter is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha <= MAX_ALPHA) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.max_game_len == 0 {
            return Err(ConfigError::ZeroGameLength);
        }
        Ok(())
    }

    /// Number of weights needed by the configured feature layout.
    #[must_use]
    pub const fn weight_len(&self) -> usize {
        self.feature_layout.dimension()
    }
}
