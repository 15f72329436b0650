mod cam;

pub use cam::{CamFileSource, FrameReader};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// One timestamped payload read from a capture.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw tick stamped on the frame (milliseconds).
    pub tick: u64,
    /// Offset relative to the first frame's tick.
    pub time_offset: Duration,
    /// Absolute offset of the payload within the capture.
    pub offset: u64,
    pub payload: Arc<[u8]>,
}

pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open capture {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<cam::error::CamSourceError> for SourceError {
    fn from(value: cam::error::CamSourceError) -> Self {
        match value {
            cam::error::CamSourceError::Open { path, source } => SourceError::Open { path, source },
            cam::error::CamSourceError::Io { context, source } => SourceError::Io(
                std::io::Error::new(source.kind(), format!("{context}: {source}")),
            ),
        }
    }
}
