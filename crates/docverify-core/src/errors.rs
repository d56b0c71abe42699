use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

use crate::messages::DEFAULT_MISSING_CONFIG_ERROR;

/// Configuration errors. These halt initialization instead of being shown
/// to an end user.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration was supplied.
    #[error("{}", DEFAULT_MISSING_CONFIG_ERROR)]
    Missing,
    /// The verification endpoint is empty.
    #[error("verification endpoint must not be empty")]
    EmptyEndpoint,
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for this schema.
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Classification of a failed verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationErrorKind {
    /// No identifier was supplied.
    MissingIdentifier,
    /// The endpoint answered 404.
    NotFound,
    /// The endpoint answered any other non-success status.
    VerificationFailed,
    /// The endpoint could not be reached.
    Network,
    /// The endpoint answered success with an unusable body.
    Unknown,
}

/// A failed verification attempt.
///
/// The message is the user-facing text selected for the classification;
/// the source, when present, is the underlying cause for logging.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct VerificationError {
    kind: VerificationErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl VerificationError {
    /// Creates an error without an underlying cause.
    pub fn new(kind: VerificationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Classification of the failure.
    pub fn kind(&self) -> VerificationErrorKind {
        self.kind
    }

    /// User-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the error, keeping only the message.
    pub fn into_message(self) -> String {
        self.message
    }
}
