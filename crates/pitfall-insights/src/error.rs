use pitfall_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
