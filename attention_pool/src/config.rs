use crate::error::{AttentionError, Result};
use serde::{Deserialize, Serialize};

fn default_mask_value() -> f64 {
    0.0
}

/// Hyperparameters of an [`AttentionScorer`](crate::AttentionScorer).
///
/// `input_size` fixes the length of the weight vector and has no default.
/// `mask_value` is the feature-level padding sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttentionConfig {
    pub input_size: usize,
    #[serde(default = "default_mask_value")]
    pub mask_value: f64,
}

impl AttentionConfig {
    pub fn new(input_size: usize) -> Self {
        Self {
            input_size,
            mask_value: default_mask_value(),
        }
    }

    pub fn with_mask_value(mut self, mask_value: f64) -> Self {
        self.mask_value = mask_value;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(AttentionError::InvalidConfig(
                "input_size must be positive".to_string(),
            ));
        }
        // NaN never compares equal, so it could not mark anything as padding.
        if self.mask_value.is_nan() {
            return Err(AttentionError::InvalidConfig(
                "mask_value must not be NaN".to_string(),
            ));
        }
        Ok(())
    }
}
