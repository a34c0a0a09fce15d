//! Domain errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeScanError {
    #[error("The path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A directory that should have been visited has no statistics record.
    #[error("no statistics recorded for {}", .0.display())]
    MissingStats(PathBuf),

    #[error("cannot render template `{name}`")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("invalid config file {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}
