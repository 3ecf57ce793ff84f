use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The synthesis endpoint answered with a non-success status.
    #[error("speech synthesis returned {status}: {body}")]
    Synthesis { status: u16, body: String },
    #[error("speech request failed: {0}")]
    Http(String),
    #[error("audio device unavailable: {0}")]
    Device(String),
    #[error("audio could not be decoded: {0}")]
    Decode(String),
    #[error("player `{program}` failed: {message}")]
    Player { program: String, message: String },
    #[error("playback task failed: {0}")]
    Task(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for PlaybackError {
    fn from(err: reqwest::Error) -> Self {
        PlaybackError::Http(err.to_string())
    }
}
