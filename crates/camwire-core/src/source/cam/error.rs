use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CamSourceError {
    #[error("cannot open capture {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("capture read failed ({context}): {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}
