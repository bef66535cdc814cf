/// Error types for index-service
///
/// Each variant names the stage of an index request that failed, so callers
/// can tell "feature absent" apart from "storage down" apart from "no results".
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    /// Strategy exists but has no behaviour yet. Never retried.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Post repository error: {0:#}")]
    Repository(anyhow::Error),

    #[error("Post formatter error: {0:#}")]
    Formatter(anyhow::Error),

    #[error("Relationship graph error: {0:#}")]
    GraphLookup(anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IndexError {
    /// Stage label used for metrics and structured logs
    pub fn stage(&self) -> &'static str {
        match self {
            IndexError::NotImplemented(_) => "not_implemented",
            IndexError::InvalidInput(_) => "validation",
            IndexError::Repository(_) => "repository",
            IndexError::Formatter(_) => "formatter",
            IndexError::GraphLookup(_) => "graph",
            IndexError::Config(_) => "config",
        }
    }
}

impl From<sqlx::Error> for IndexError {
    fn from(err: sqlx::Error) -> Self {
        IndexError::Repository(err.into())
    }
}

/// Convert IndexError to tonic::Status for gRPC responses
impl From<IndexError> for tonic::Status {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::NotImplemented(what) => tonic::Status::unimplemented(what),
            IndexError::InvalidInput(msg) => tonic::Status::invalid_argument(msg),
            IndexError::Repository(e) => {
                tonic::Status::unavailable(format!("Post repository error: {:#}", e))
            }
            IndexError::Formatter(e) => {
                tonic::Status::internal(format!("Post formatter error: {:#}", e))
            }
            IndexError::GraphLookup(e) => {
                tonic::Status::unavailable(format!("Relationship graph error: {:#}", e))
            }
            IndexError::Config(msg) => tonic::Status::internal(format!("Config error: {}", msg)),
        }
    }
}

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;
