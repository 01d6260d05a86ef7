//! Unified error type for all store operations.

use thiserror::Error;

/// Things that can go wrong when using the store.
///
/// Callers map these onto their own failure modes: [`Error::NotFound`] is an
/// ordinary outcome of a lookup, [`Error::Validation`] is the caller's fault,
/// and everything [`is_storage`](Error::is_storage) reports is a broken or
/// unreadable backing file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The backing file could not be created when the store was opened.
    #[error("startup error: {0}")]
    Startup(String),
    /// File system problem (read, write, rename, remove).
    #[error("i/o error: {0}")]
    Io(String),
    /// Failed to serialize the document to bytes.
    #[error("serialization error: {0}")]
    Serialize(String),
    /// The file on disk is not valid JSON for a document.
    #[error("deserialization error: {0}")]
    Deserialize(String),
    /// The file parsed but breaks a document invariant.
    #[error("corrupt document: {0}")]
    Corrupt(String),
    /// No entity of this kind has the requested id.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"post"`.
        kind: &'static str,
        /// The id that was looked up.
        id: u64,
    },
    /// Caller-supplied content breaks a constraint.
    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// `true` for a lookup that found nothing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// `true` when the backing file could not be read, written or decoded.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Startup(_)
                | Error::Io(_)
                | Error::Serialize(_)
                | Error::Deserialize(_)
                | Error::Corrupt(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
