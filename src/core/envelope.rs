//! # List Envelope
//!
//! Wire container for an encoded list: the element type tag plus one opaque
//! blob per element, in order.
//!
//! The tag is optional on the wire so that payloads from peers that omit it can
//! be recognised and rejected, but [`ListEnvelope::tagged`] always sets it.
//!
//! Envelopes are serialized with bincode using fixed-width integers and a size
//! limit. Input longer than the limit is rejected before parsing, and the same
//! limit bounds every length prefix read while parsing.

use crate::error::{CodecError, Result};
use bincode::Options;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Encoded list as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListEnvelope {
    /// Canonical name of the element type
    pub type_tag: Option<String>,
    /// One encoded blob per element, order-significant
    pub values: Vec<Vec<u8>>,
}

impl ListEnvelope {
    /// An empty envelope tagged with `element`.
    pub fn tagged(element: impl Into<String>) -> Self {
        Self {
            type_tag: Some(element.into()),
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, blob: impl Into<Vec<u8>>) {
        self.values.push(blob.into());
    }

    /// Serializes the envelope, failing if it would exceed `limit` bytes.
    pub fn to_bytes(&self, limit: u64) -> Result<Bytes> {
        let encoded = wire_options(limit).serialize(self)?;
        check_limit(encoded.len(), limit)?;
        Ok(Bytes::from(encoded))
    }

    /// Parses an envelope of at most `limit` bytes. Trailing data is an error.
    pub fn from_bytes(data: &[u8], limit: u64) -> Result<Self> {
        check_limit(data.len(), limit)?;
        Ok(wire_options(limit).deserialize(data)?)
    }
}

fn check_limit(len: usize, limit: u64) -> Result<()> {
    if len as u64 > limit {
        return Err(CodecError::Serialization(Box::new(
            bincode::ErrorKind::SizeLimit,
        )));
    }
    Ok(())
}

/// Bincode settings for single records: fixed-width integers, no trailing bytes.
pub(crate) fn record_options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

fn wire_options(limit: u64) -> impl Options {
    record_options().with_limit(limit)
}
