//! # Codec Capability
//!
//! The encode/decode contract every registered codec satisfies.

use crate::core::argument::Argument;
use crate::core::types::TypeInfo;
use crate::error::Result;
use bytes::Bytes;
use std::fmt::Debug;
use std::sync::Arc;

/// Paired encoder/decoder for one type (or family of types).
///
/// Implementations are stateless and reentrant; a single instance is shared by
/// every caller of the registry.
pub trait Codec: Debug + Send + Sync {
    /// Encodes `value`, failing if it is not a kind this codec handles.
    fn encode(&self, value: &Argument) -> Result<Bytes>;

    /// Decodes `bytes`. `hint` is the type the caller expects; codecs that serve
    /// a whole family (messages, enums) use it to restore the concrete type.
    fn decode(&self, bytes: &[u8], hint: &TypeInfo) -> Result<Argument>;
}

/// Codec handle as stored in the registry.
pub type SharedCodec = Arc<dyn Codec>;
