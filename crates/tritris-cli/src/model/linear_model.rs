use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tritris_training::{Trainer, TrainerConfig, Weights};

/// Trained linear value function as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LinearModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub config: TrainerConfig,
    pub weights: Weights,
}

impl LinearModel {
    /// Wraps freshly trained weights, stamped with the current time.
    pub(crate) fn new(
        name: String,
        config: TrainerConfig,
        weights: Weights,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            weights.is_finite(),
            "Refusing to save model {name}: weights contain NaN or infinite values"
        );
        Ok(Self {
            name,
            trained_at: Utc::now(),
            config,
            weights,
        })
    }

    /// Builds a trainer that evaluates states with this model's weights.
    pub(crate) fn into_trainer(self, seed: u64) -> anyhow::Result<Trainer> {
        let name = self.name;
        Trainer::with_weights(self.config, self.weights, seed)
            .with_context(|| format!("Model {name} is inconsistent with its config"))
    }
}
