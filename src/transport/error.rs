use thiserror::Error;

/// Failure of a call to the agent service.
///
/// `Display` yields the most readable explanation available, which the chat
/// shows verbatim as an error reply.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (connection, TLS, timeout).
    #[error("{0}")]
    Http(String),
    /// The service answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The body could not be decoded.
    #[error("{message}")]
    ResponseFormat {
        message: String,
        raw_response: String,
    },
    #[error("invalid endpoint: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(err.to_string())
    }
}
