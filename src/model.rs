use crate::error::{DriverError, RequestError};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Values used when nothing overrides them on the command line.
pub mod defaults {
    pub const URL: &str = "http://localhost/auth/login";
    pub const USERS: usize = 10;
    pub const REQUESTS_PER_USER: usize = 100;
    pub const USERNAME: &str = "test1";
    pub const PASSWORD: &str = "test123";
    pub const TIMEOUT_SECS: u64 = 10;
}

/// JSON body posted on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The fixed POST target and body shared by every virtual user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: String,
    pub body: LoginRequest,
}

impl RequestSpec {
    pub fn new(url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: LoginRequest {
                username: username.into(),
                password: password.into(),
            },
        }
    }
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self::new(defaults::URL, defaults::USERNAME, defaults::PASSWORD)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub vus: usize,
    pub requests_per_user: usize,
    /// `None` waits on each request for as long as the server takes.
    pub timeout: Option<Duration>,
    pub progress: bool,
    pub spec: Arc<RequestSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vus: defaults::USERS,
            requests_per_user: defaults::REQUESTS_PER_USER,
            timeout: Some(Duration::from_secs(defaults::TIMEOUT_SECS)),
            progress: true,
            spec: Arc::new(RequestSpec::default()),
        }
    }
}

impl Config {
    pub fn total_requests(&self) -> usize {
        self.vus.saturating_mul(self.requests_per_user)
    }

    /// Builds the connection pool owned by a single virtual user.
    pub fn client(&self) -> Result<reqwest::Client, DriverError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(DriverError::Client)
    }
}

#[derive(Debug)]
pub enum Status {
    Code(u16),
    Failed(RequestError),
}

impl Status {
    pub fn code(&self) -> Option<u16> {
        match self {
            Status::Code(code) => Some(*code),
            Status::Failed(_) => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Code(code) => write!(f, "{code}"),
            Status::Failed(e) => write!(f, "error: {e}"),
        }
    }
}

/// Result of a single request by one virtual user.
#[derive(Debug)]
pub struct Outcome {
    pub rank: usize,
    pub ite: usize,
    pub status: Status,
    pub sent_at: chrono::DateTime<chrono::Utc>,
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user-{} -> {}", self.rank, self.status)
    }
}
