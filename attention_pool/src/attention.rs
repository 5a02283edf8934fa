use crate::batch::SequenceBatch;
use crate::config::AttentionConfig;
use crate::error::{AttentionError, Result};
use crate::ops;
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Masked attention scorer over sequences of feature vectors.
///
/// Holds a single learned weight vector `w` of length `input_size`. Scoring
/// projects every position onto `w`, sends fully padded positions to `-inf`
/// and softmaxes over the sequence.
#[derive(Debug, Clone)]
pub struct AttentionScorer {
    config: AttentionConfig,
    weights: DVector<f64>,
}

impl AttentionScorer {
    /// Create a scorer with randomly initialized weights.
    pub fn new(config: AttentionConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::rng())
    }

    /// Weights are drawn from `U(-1/sqrt(n), 1/sqrt(n))`, `n = input_size`.
    pub fn with_rng<R: Rng>(config: AttentionConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let bound = 1.0 / (config.input_size as f64).sqrt();
        let weights = DVector::from_fn(config.input_size, |_, _| rng.random_range(-bound..bound));
        debug!(
            input_size = config.input_size,
            mask_value = config.mask_value,
            "initialized attention scorer"
        );
        Ok(Self { config, weights })
    }

    pub fn from_weights(config: AttentionConfig, weights: DVector<f64>) -> Result<Self> {
        config.validate()?;
        check_width(config.input_size, weights.len())?;
        Ok(Self { config, weights })
    }

    pub fn config(&self) -> &AttentionConfig {
        &self.config
    }
    pub fn input_size(&self) -> usize {
        self.config.input_size
    }
    pub fn mask_value(&self) -> f64 {
        self.config.mask_value
    }
    pub fn weights(&self) -> &DVector<f64> {
        &self.weights
    }

    /// Replace the weight vector, e.g. after an external optimizer step.
    pub fn set_weights(&mut self, weights: DVector<f64>) -> Result<()> {
        check_width(self.config.input_size, weights.len())?;
        self.weights = weights;
        Ok(())
    }

    /// Attention weights of shape `(batch, seq_len)`.
    ///
    /// Every row sums to 1 unless all of its positions are padding, in which
    /// case the whole row is NaN. The output keeps its batch dimension even
    /// when `batch == 1`.
    pub fn score(&self, batch: &SequenceBatch) -> Result<DMatrix<f64>> {
        check_width(self.config.input_size, batch.feature_dim())?;
        let rows: Vec<_> = batch.rows().iter().map(|x| self.score_row(x)).collect();
        Ok(self.assemble(batch, rows))
    }

    /// Same as [`score`](Self::score) with batch rows scored on the rayon pool.
    pub fn par_score(&self, batch: &SequenceBatch) -> Result<DMatrix<f64>> {
        check_width(self.config.input_size, batch.feature_dim())?;
        let rows: Vec<_> = batch.rows().par_iter().map(|x| self.score_row(x)).collect();
        Ok(self.assemble(batch, rows))
    }

    fn score_row(&self, x: &DMatrix<f64>) -> (DVector<f64>, usize) {
        let mask_value = self.config.mask_value;
        let mut logits = ops::project(x, &self.weights);

        // The indicator mean is compared against the sentinel itself, so with
        // the default sentinel of 0 only fully padded positions are masked.
        let padded: Vec<bool> = ops::real_fraction(x, mask_value)
            .iter()
            .map(|&frac| frac == mask_value)
            .collect();
        ops::masked_fill(&mut logits, &padded, f64::NEG_INFINITY);

        let masked = padded.iter().filter(|&&p| p).count();
        (ops::softmax(&logits), masked)
    }

    fn assemble(&self, batch: &SequenceBatch, rows: Vec<(DVector<f64>, usize)>) -> DMatrix<f64> {
        let (batch_size, seq_len, _) = batch.shape();
        let mut scores = DMatrix::zeros(batch_size, seq_len);
        let mut total_masked = 0;
        for (b, (row, masked)) in rows.into_iter().enumerate() {
            if seq_len > 0 && masked == seq_len {
                trace!(row = b, "every position is padding, scores are NaN");
            }
            total_masked += masked;
            scores.set_row(b, &row.transpose());
        }
        debug!(batch_size, seq_len, masked = total_masked, "scored batch");
        scores
    }
}

fn check_width(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(AttentionError::ShapeMismatch { expected, actual });
    }
    Ok(())
}
