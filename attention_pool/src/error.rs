use thiserror::Error;

pub type Result<T> = std::result::Result<T, AttentionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttentionError {
    /// Trailing feature dimension of the input disagrees with `input_size`.
    #[error("shape mismatch: expected feature dim {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A batch row whose `(seq_len, feature_dim)` differs from the first row.
    #[error("batch row {row} has shape {actual:?}, expected {expected:?}")]
    InconsistentBatch {
        row: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("flat data has {actual} values, shape {shape:?} needs {expected}")]
    DataLength {
        shape: (usize, usize, usize),
        expected: usize,
        actual: usize,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
