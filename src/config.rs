use clap::Args;

use crate::error::{InvalidArgument, Result};

// Hyperparameters for CD-1 training. Field docs double as the CLI help text.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct TrainConfig {
    /// Step size applied to the batch-normalized gradients
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Full passes over the (reshuffled) dataset
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Rows per mini-batch; also the gradient normalizer
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: 0.1,
            epochs: 10,
            batch_size: 100,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(InvalidArgument::Hyperparameter {
                name: "batch_size",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if !self.learning_rate.is_finite() {
            return Err(InvalidArgument::Hyperparameter {
                name: "learning_rate",
                reason: format!("must be finite, got {}", self.learning_rate),
            }
            .into());
        }
        Ok(())
    }
}
