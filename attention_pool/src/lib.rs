pub mod attention;
pub mod batch;
pub mod config;
pub mod error;
pub mod ops;
pub mod pooling;

pub use attention::AttentionScorer;
pub use batch::SequenceBatch;
pub use config::AttentionConfig;
pub use error::{AttentionError, Result};
pub use pooling::AttentionPooling;
