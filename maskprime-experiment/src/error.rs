use thiserror::Error;

/// Failures that abort sequencing. Configuration errors mean the experiment
/// definition is un-runnable; pool errors mean a trial could not be
/// constructed, and skipping it would desynchronize block sizes.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("separator chunk size must be a positive number")]
    ChunkSize,

    #[error("jitter bounds are malformed: max {max} ms < min {min} ms")]
    JitterBounds { min: u64, max: u64 },

    #[error("jitter step must be positive")]
    JitterStep,

    #[error("failed to read trial pool: {0}")]
    Pool(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
