use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use storytag_engine::Story;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid generator endpoint {url}: {message}")]
    InvalidEndpoint { url: String, message: String },
    #[error("Failed to build HTTP client: {source}")]
    ClientBuild { source: reqwest::Error },
    #[error("Network error: {source}")]
    Network { source: reqwest::Error },
    #[error("Generator returned HTTP {status}")]
    HttpStatus { status: StatusCode },
    #[error("Generator response is invalid: {message}")]
    InvalidResponse { message: String },
    #[error("Generation timed out after {0:?}")]
    TimedOut(Duration),
    #[error("Generation task ended abnormally")]
    TaskFailed,
}

/// Produces the test source for one story.
#[async_trait]
pub trait TestGenerator: Send + Sync {
    async fn generate(&self, story: &Story) -> Result<String, GenerationError>;
}
