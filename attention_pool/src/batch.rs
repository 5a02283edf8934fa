use crate::error::{AttentionError, Result};
use nalgebra::DMatrix;

/// A batch of equally long sequences, shape `(batch, seq_len, feature_dim)`.
///
/// Each batch row is stored as a `(seq_len, feature_dim)` matrix so one
/// sequence position is one matrix row.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceBatch {
    rows: Vec<DMatrix<f64>>,
    seq_len: usize,
    feature_dim: usize,
}

impl SequenceBatch {
    pub fn new(rows: Vec<DMatrix<f64>>) -> Result<Self> {
        let (seq_len, feature_dim) = rows.first().map_or((0, 0), |m| m.shape());
        for (row, m) in rows.iter().enumerate() {
            if m.shape() != (seq_len, feature_dim) {
                return Err(AttentionError::InconsistentBatch {
                    row,
                    expected: (seq_len, feature_dim),
                    actual: m.shape(),
                });
            }
        }
        Ok(Self {
            rows,
            seq_len,
            feature_dim,
        })
    }

    /// Builds a batch from row-major data laid out as `[b][l][k]`.
    pub fn from_flat(shape: (usize, usize, usize), data: &[f64]) -> Result<Self> {
        let (batch, seq_len, feature_dim) = shape;
        let expected = batch * seq_len * feature_dim;
        if data.len() != expected {
            return Err(AttentionError::DataLength {
                shape,
                expected,
                actual: data.len(),
            });
        }
        let stride = seq_len * feature_dim;
        let rows = (0..batch)
            .map(|b| {
                let chunk = &data[b * stride..(b + 1) * stride];
                DMatrix::from_row_slice(seq_len, feature_dim, chunk)
            })
            .collect();
        Ok(Self {
            rows,
            seq_len,
            feature_dim,
        })
    }

    /// Builds a batch from nested `batch -> position -> features` vectors.
    pub fn from_nested(data: Vec<Vec<Vec<f64>>>) -> Result<Self> {
        let batch = data.len();
        let seq_len = data.first().map_or(0, Vec::len);
        let feature_dim = data
            .first()
            .and_then(|row| row.first())
            .map_or(0, Vec::len);

        let mut flat = Vec::with_capacity(batch * seq_len * feature_dim);
        for (b, row) in data.into_iter().enumerate() {
            if row.len() != seq_len {
                return Err(AttentionError::InconsistentBatch {
                    row: b,
                    expected: (seq_len, feature_dim),
                    actual: (row.len(), row.first().map_or(0, Vec::len)),
                });
            }
            for position in row {
                if position.len() != feature_dim {
                    return Err(AttentionError::InconsistentBatch {
                        row: b,
                        expected: (seq_len, feature_dim),
                        actual: (seq_len, position.len()),
                    });
                }
                flat.extend(position);
            }
        }
        Self::from_flat((batch, seq_len, feature_dim), &flat)
    }

    pub fn batch_size(&self) -> usize {
        self.rows.len()
    }
    pub fn seq_len(&self) -> usize {
        self.seq_len
    }
    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows.len(), self.seq_len, self.feature_dim)
    }

    pub fn row(&self, b: usize) -> Option<&DMatrix<f64>> {
        self.rows.get(b)
    }
    pub fn rows(&self) -> &[DMatrix<f64>] {
        &self.rows
    }
}
