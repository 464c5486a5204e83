//! Error types shared across the showcase
//!
//! Everything fallible in the library funnels into [`SiteError`]; the binary
//! wraps it with `anyhow` context at startup.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T, E = SiteError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("session storage error at {path}")]
    SessionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session data is not valid JSON")]
    SessionFormat(#[from] serde_json::Error),

    #[error("no data directory available for session storage")]
    NoDataDir,

    #[error("renderer setup failed: {0}")]
    Renderer(String),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("shader '{0}' has not been loaded")]
    MissingShader(String),

    #[error("UI rendering failed: {0}")]
    Ui(String),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
