use std::path::PathBuf;

/// Failures loading or checking a [`crate::config::LabItaConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid skin type table: {0}")]
    InvalidTable(String),
}

/// Failures scheduling a debounced validation.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("real-time validation needs a running tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
