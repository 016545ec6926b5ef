//! Error handling for the symmetric engine
//!
//! Every fallible operation in this crate returns one of the kinds
//! below. Errors surface to the caller of the primitive; nothing is
//! caught and retried internally.

use core::fmt;

/// The error type for symmetric-engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key material was rejected: wrong length, empty, or otherwise
    /// outside the primitive's legal key sizes.
    InvalidKey {
        /// Primitive that rejected the key
        context: &'static str,
        /// Why the key was rejected
        reason: &'static str,
    },

    /// A call arrived out of sequence, e.g. a transform before
    /// `initialize`, associated data after ciphertext, or a second
    /// finalization.
    InvalidState {
        /// Primitive reporting the sequencing violation
        context: &'static str,
        /// What was out of order
        reason: &'static str,
    },

    /// An argument was malformed: a length not matching the mode, an
    /// offset past the end of a buffer, an empty output request.
    InvalidArgument {
        /// Primitive that rejected the argument
        context: &'static str,
        /// Why the argument was rejected
        reason: &'static str,
    },

    /// AEAD tag verification failed.
    Authentication {
        /// Algorithm whose tag did not verify
        algorithm: &'static str,
    },

    /// A generator hit its output, request, or reseed ceiling.
    Exhausted {
        /// Generator that ran out
        context: &'static str,
        /// The ceiling that was reached
        limit: u64,
    },

    /// An entropy source could not supply the requested bytes.
    EntropyFailure {
        /// Source that failed
        source: &'static str,
        /// What went wrong
        reason: &'static str,
    },

    /// A feature is unavailable: missing CPU capability or a parameter
    /// set this build does not carry.
    Unsupported {
        /// The unavailable feature
        feature: &'static str,
    },
}

impl Error {
    /// Shorthand for an [`Error::InvalidKey`].
    #[inline]
    pub fn key(context: &'static str, reason: &'static str) -> Self {
        Error::InvalidKey { context, reason }
    }

    /// Shorthand for an [`Error::InvalidState`].
    #[inline]
    pub fn state(context: &'static str, reason: &'static str) -> Self {
        Error::InvalidState { context, reason }
    }

    /// Shorthand for an [`Error::InvalidArgument`].
    #[inline]
    pub fn arg(context: &'static str, reason: &'static str) -> Self {
        Error::InvalidArgument { context, reason }
    }

    /// Shorthand for an [`Error::Authentication`].
    #[inline]
    pub fn auth(algorithm: &'static str) -> Self {
        Error::Authentication { algorithm }
    }

    /// Shorthand for an [`Error::Exhausted`].
    #[inline]
    pub fn exhausted(context: &'static str, limit: u64) -> Self {
        Error::Exhausted { context, limit }
    }

    /// Shorthand for an [`Error::EntropyFailure`].
    #[inline]
    pub fn entropy(source: &'static str, reason: &'static str) -> Self {
        Error::EntropyFailure { source, reason }
    }

    /// Shorthand for an [`Error::Unsupported`].
    #[inline]
    pub fn unsupported(feature: &'static str) -> Self {
        Error::Unsupported { feature }
    }
}

/// Result type for symmetric-engine operations.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKey { context, reason } => {
                write!(f, "invalid key for {}: {}", context, reason)
            }
            Error::InvalidState { context, reason } => {
                write!(f, "invalid state in {}: {}", context, reason)
            }
            Error::InvalidArgument { context, reason } => {
                write!(f, "invalid argument to {}: {}", context, reason)
            }
            Error::Authentication { algorithm } => {
                write!(f, "authentication failed for {}", algorithm)
            }
            Error::Exhausted { context, limit } => {
                write!(f, "{} exhausted: limit of {} reached", context, limit)
            }
            Error::EntropyFailure { source, reason } => {
                write!(f, "entropy source {} failed: {}", source, reason)
            }
            Error::Unsupported { feature } => {
                write!(f, "unsupported feature: {}", feature)
            }
        }
    }
}

impl std::error::Error for Error {}

pub mod validate;
