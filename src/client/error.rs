use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Storage error: {0}")]
    Storage(#[from] TokenStorageError),
    #[error("email and password are required, and no login may be pending")]
    NotReady,
}

impl ClientError {
    /// True when the server refused the credentials or token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

#[derive(Debug, Error)]
pub enum TokenStorageError {
    #[error("token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
