// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request was rejected before reaching the queue.
    InvalidRequest(RequestError),
    /// A toaster handle was used after its session ended.
    NoActiveSession,
    Config(String),
    Io(String),
}

/// Reasons a notification request is refused at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Title is empty or whitespace only.
    MissingTitle,
    /// Delay is longer than the supported maximum.
    DelayTooLong { delay_ms: u128, max_ms: u64 },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingTitle => write!(f, "notification title is required"),
            RequestError::DelayTooLong { delay_ms, max_ms } => {
                write!(f, "dismiss delay {}ms exceeds maximum of {}ms", delay_ms, max_ms)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRequest(e) => write!(f, "Invalid Request: {}", e),
            Error::NoActiveSession => {
                write!(f, "Toaster used outside of an active session")
            }
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        Error::InvalidRequest(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
