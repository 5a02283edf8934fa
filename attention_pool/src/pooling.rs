use crate::attention::AttentionScorer;
use crate::batch::SequenceBatch;
use crate::error::Result;
use nalgebra::DMatrix;

/// Pools each sequence into one `input_size` vector using attention weights.
#[derive(Debug, Clone)]
pub struct AttentionPooling {
    scorer: AttentionScorer,
}

impl AttentionPooling {
    pub fn new(scorer: AttentionScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &AttentionScorer {
        &self.scorer
    }
    pub fn scorer_mut(&mut self) -> &mut AttentionScorer {
        &mut self.scorer
    }

    /// Pooled representation of shape `(batch, input_size)`.
    pub fn pool(&self, batch: &SequenceBatch) -> Result<DMatrix<f64>> {
        self.pool_with_scores(batch).map(|(_, pooled)| pooled)
    }

    /// Returns `(scores, pooled)` where `pooled[b] = sum_l scores[b, l] * x[b, l, :]`.
    pub fn pool_with_scores(&self, batch: &SequenceBatch) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
        let scores = self.scorer.score(batch)?;
        let mut pooled = DMatrix::zeros(batch.batch_size(), batch.feature_dim());
        for (b, x) in batch.rows().iter().enumerate() {
            pooled.set_row(b, &(scores.row(b) * x));
        }
        Ok((scores, pooled))
    }
}

impl From<AttentionScorer> for AttentionPooling {
    fn from(scorer: AttentionScorer) -> Self {
        Self::new(scorer)
    }
}
