use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures while loading the inventory source. No partial dataset is
/// produced for any of these.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read source file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV headers: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },
}
