use thiserror::Error;

/// A request that produced no HTTP status. Recovered per iteration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("connect: {0}")]
    Connect(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest marks a connect timeout as both; report it as a timeout
        if e.is_timeout() {
            RequestError::Timeout(e.to_string())
        } else if e.is_connect() {
            RequestError::Connect(e.to_string())
        } else {
            RequestError::Request(e.to_string())
        }
    }
}

/// Errors that end the whole run.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("virtual user task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("outcome reporter stopped before all requests finished")]
    ReporterClosed,
    #[error("failed to write outcome: {0}")]
    Io(#[from] std::io::Error),
}
