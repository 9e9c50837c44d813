//! Error type definitions for the playlist curator

use thiserror::Error;

/// Exit status for a clean run
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status when the process cannot start (bad configuration, no HTTP client)
pub const EXIT_STARTUP_FAILURE: u8 = 1;
/// Exit status for an unexpected failure while the pipeline is running
pub const EXIT_RUNTIME_FAILURE: u8 = 2;

/// Top-level application error type
///
/// Only errors that should stop the whole run are represented here. A failed
/// download is a [`SourceError`] and is handled inside the pipeline.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required runtime component could not be initialised
    #[error("Startup failed: {message} (hint: {hint})")]
    Startup { message: String, hint: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem errors while writing the playlist
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Failure to retrieve a single playlist source
///
/// Every variant carries the source URL so callers can report which source
/// failed without keeping extra context around.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request did not complete within the configured timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// The server answered with a non-success status
    #[error("HTTP error: {status} - {url}")]
    Http { url: String, status: u16 },

    /// Connection or transport failure
    #[error("Network error: {url} - {message}")]
    Network { url: String, message: String },

    /// The body could not be read or decoded as text
    #[error("Decode error: {url} - {message}")]
    Decode { url: String, message: String },
}

impl AppError {
    /// Create a startup error with a remediation hint
    pub fn startup<M: Into<String>, H: Into<String>>(message: M, hint: H) -> Self {
        Self::Startup {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Process exit status for this error kind
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Startup { .. } | Self::Configuration { .. } => EXIT_STARTUP_FAILURE,
            Self::Io(_) | Self::Internal { .. } => EXIT_RUNTIME_FAILURE,
        }
    }
}

impl SourceError {
    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create an HTTP status error
    pub fn http<U: Into<String>>(url: U, status: u16) -> Self {
        Self::Http {
            url: url.into(),
            status,
        }
    }

    /// Create a network error
    pub fn network<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }
}
