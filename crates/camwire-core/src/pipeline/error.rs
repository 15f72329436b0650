use thiserror::Error;

use crate::protocols::game::DecodeError;
use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("pipeline task failed: {0}")]
    Task(String),
    #[error("pipeline cancelled")]
    Cancelled,
}
