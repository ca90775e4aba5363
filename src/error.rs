//! Error types for catalogue synchronization.
//!
//! Every failure raised by the core, the providers and the collaborators is an
//! [`Error`]. Errors are never caught between domains or locales: the first one
//! aborts the whole read, write or delete call.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::http::Response;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A factory was asked for a DSN scheme it does not build.
    #[error(
        "The \"{scheme}\" scheme is not supported{}; supported schemes are: \"{}\".",
        provider.as_deref().map(|p| format!(" for the \"{p}\" provider")).unwrap_or_default(),
        supported.join("\", \"")
    )]
    UnsupportedScheme {
        scheme: String,
        provider: Option<String>,
        supported: Vec<String>,
    },

    /// Required credentials are missing from the DSN.
    #[error("Invalid \"{dsn}\" provider DSN: {reason}")]
    IncompleteDsn { dsn: String, reason: String },

    #[error("Invalid \"{dsn}\" provider DSN: {reason}")]
    InvalidDsn { dsn: String, reason: String },

    /// A remote call answered with an unexpected status or an unreadable body.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Unknown provider \"{name}\"; available providers are: \"{}\".", available.join("\", \""))]
    UnknownProvider { name: String, available: Vec<String> },

    /// The HTTP transport failed before a response was received.
    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Unable to process \"{format}\" catalogue: {message}")]
    Format { format: String, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(format: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Format {
            format: format.into(),
            message: message.to_string(),
        }
    }
}

/// Error raised by a provider when the remote API misbehaves.
///
/// Carries the offending response so the caller can diagnose what the vendor
/// actually answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status code: {status})")]
pub struct ProviderError {
    pub message: String,
    pub status: u16,
    pub body: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>, response: &Response) -> Self {
        Self {
            message: message.into(),
            status: response.status,
            body: response.body.clone(),
        }
    }
}
