//! # Error Types
//!
//! Error handling for codec resolution and command-argument encoding.
//!
//! Every failure in this crate is returned to the caller unchanged; nothing is
//! retried or recovered locally. The replication layer is expected to treat any
//! of these as a non-retryable protocol or programming error.
//!
//! ## Error Categories
//! - **Resolution Errors**: no codec registered for a type or any of its ancestors
//! - **List Errors**: missing or mismatched element-type tags, element decode failures
//! - **Bootstrap Errors**: duplicate registrations, unresolvable list element types
//! - **Value Errors**: a codec handed an argument of the wrong kind, malformed bytes
//! - **Configuration Errors**: invalid or unreadable configuration
//!
//! ## Example Usage
//! ```rust
//! use scm_codec::core::types::TypeInfo;
//! use scm_codec::error::CodecError;
//! use scm_codec::registry::CodecRegistry;
//! use tracing::error;
//!
//! let registry = CodecRegistry::with_defaults().expect("bootstrap");
//! match registry.resolve(&TypeInfo::leaf("float")) {
//!     Ok(_) => unreachable!(),
//!     Err(CodecError::CodecNotFound(name)) => error!(%name, "No codec for type"),
//!     Err(e) => error!(error = %e, "Unexpected failure"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Envelope errors
    pub const ERR_MISSING_TYPE_TAG: &str = "List envelope is missing its element type tag";
    pub const ERR_EMPTY_CERTIFICATE: &str = "Certificate encoding is empty";
    pub const ERR_EMPTY_BIG_INTEGER: &str = "Big integer encoding is empty";

    /// Primitive decode errors
    pub const ERR_INVALID_UTF8: &str = "Text is not valid UTF-8";
    pub const ERR_INVALID_BOOLEAN: &str = "Boolean must be encoded as a single 0 or 1 byte";
}

/// Primary error type for all codec operations
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Codec for {0} not found")]
    CodecNotFound(String),

    #[error("{}", constants::ERR_MISSING_TYPE_TAG)]
    MissingTypeTag,

    #[error("List element type mismatch: expected={expected}, actual={actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Failed to decode list element {index}: {source}")]
    ElementDecodeFailure {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },

    #[error("Failed to initialize codec for list element type {element}: {source}")]
    ElementTypeMismatch {
        element: String,
        #[source]
        source: Box<CodecError>,
    },

    #[error("Codec already registered for {0}")]
    DuplicateRegistration(String),

    #[error("Unexpected argument: expected {expected}, got {actual}")]
    UnexpectedArgument { expected: String, actual: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Deserialize error: {0}")]
    DeserializeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CodecError {
    /// Shorthand for an argument/codec kind disagreement.
    pub(crate) fn unexpected(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        CodecError::UnexpectedArgument {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
