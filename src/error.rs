//! Error types for startup and configuration.
//!
//! The per-frame camera path is infallible; everything here can only fail
//! before the first frame is drawn.

use std::path::PathBuf;

/// Configuration could not be read or holds values the camera cannot run with.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Fatal startup error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("OpenGL error: {0}")]
    Gl(String),
}
