use std::path::PathBuf;

use thiserror::Error;

use crate::env_file::EnvParseError;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read env file {}", path.display())]
    ReadEnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse env file {}", path.display())]
    ParseEnvFile {
        path: PathBuf,
        #[source]
        source: EnvParseError,
    },

    #[error("failed to write {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render config module")]
    Render(#[from] minijinja::Error),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}
