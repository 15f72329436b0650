use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read item catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("item catalog too short: need {needed} bytes for the signature, got {actual}")]
    MissingSignature { needed: usize, actual: usize },
}
