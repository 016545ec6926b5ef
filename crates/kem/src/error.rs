//! Error handling for the KEM envelope

use core::fmt;

/// The error type for KEM envelope operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A symmetric-engine operation failed.
    Engine(algorithms::Error),

    /// Envelope authentication failed; no plaintext was released.
    Authentication {
        /// Operation whose tag did not verify
        context: &'static str,
    },

    /// The envelope bytes are malformed.
    InvalidFormat {
        /// Operation that rejected the envelope
        context: &'static str,
        /// Why the envelope was rejected
        reason: &'static str,
    },
}

/// Result type for KEM envelope operations.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Engine(inner) => write!(f, "symmetric engine error: {}", inner),
            Error::Authentication { context } => {
                write!(f, "envelope authentication failed in {}", context)
            }
            Error::InvalidFormat { context, reason } => {
                write!(f, "malformed envelope in {}: {}", context, reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Engine(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<algorithms::Error> for Error {
    fn from(err: algorithms::Error) -> Self {
        match err {
            algorithms::Error::Authentication { .. } => Error::Authentication {
                context: "envelope",
            },
            other => Error::Engine(other),
        }
    }
}
