//! # List Codecs
//!
//! Ordered, homogeneous lists travel as a [`ListEnvelope`]: the element type's
//! canonical name plus one blob per element, encoded by the element's own codec.
//!
//! [`ListCodec`] is fixed to one element type. [`ListDispatchCodec`] is the
//! single registry entry for "list"; it picks the right [`ListCodec`] from the
//! list value's element type when encoding, and from the wire tag when decoding.
//!
//! ## Decode Rules
//! 1. A missing tag is always rejected, before the value count is looked at.
//! 2. An envelope with no values decodes to an empty list without checking the tag.
//! 3. Otherwise the tag must equal the expected element name.
//! 4. Elements decode in order; the first failure aborts the whole list.
//!
//! Encoding is checked the other way round: every item must carry the list's
//! element type, so a capability codec cannot smuggle a foreign message type
//! under another type's tag.

use crate::core::argument::{convert_items, Argument, ArgumentType, ListArgument};
use crate::core::codec::{Codec, SharedCodec};
use crate::core::envelope::ListEnvelope;
use crate::core::types::{names, TypeInfo, TypeName};
use crate::error::{CodecError, Result};
use crate::utils::metrics::CodecMetrics;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Codec for lists of one fixed element type.
#[derive(Debug)]
pub struct ListCodec {
    element: TypeInfo,
    element_codec: SharedCodec,
    max_envelope_bytes: u64,
    metrics: Arc<CodecMetrics>,
}

impl ListCodec {
    pub fn new(
        element: TypeInfo,
        element_codec: SharedCodec,
        max_envelope_bytes: u64,
        metrics: Arc<CodecMetrics>,
    ) -> Self {
        Self {
            element,
            element_codec,
            max_envelope_bytes,
            metrics,
        }
    }

    /// Element type this codec is fixed to.
    pub fn element(&self) -> &TypeInfo {
        &self.element
    }

    /// Encodes `items` in order. The envelope is tagged even when `items` is empty.
    ///
    /// Fails with [`CodecError::TypeMismatch`] if any item is not of the element type.
    pub fn encode_items(&self, items: &[Argument]) -> Result<Bytes> {
        let mut envelope = ListEnvelope::tagged(self.element.name().as_str());
        for item in items {
            let actual = item.type_name();
            if actual != *self.element.name() {
                return Err(CodecError::TypeMismatch {
                    expected: self.element.name().to_string(),
                    actual: actual.to_string(),
                });
            }
            envelope.push(self.element_codec.encode(item)?);
        }
        let bytes = envelope.to_bytes(self.max_envelope_bytes)?;
        self.metrics.list_encoded(items.len() as u64);
        Ok(bytes)
    }

    /// Decodes an envelope expected to hold elements of this codec's type.
    pub fn decode_items(&self, bytes: &[u8]) -> Result<Vec<Argument>> {
        let envelope = ListEnvelope::from_bytes(bytes, self.max_envelope_bytes)
            .inspect_err(|_| self.metrics.list_decode_failed())?;
        self.decode_envelope(envelope)
    }

    pub(crate) fn decode_envelope(&self, envelope: ListEnvelope) -> Result<Vec<Argument>> {
        self.record(self.verify_and_decode(envelope))
    }

    fn record<R>(&self, result: Result<R>) -> Result<R> {
        match &result {
            Ok(_) => self.metrics.list_decoded(),
            Err(e) => {
                self.metrics.list_decode_failed();
                debug!(element = %self.element, error = %e, "List decode rejected");
            }
        }
        result
    }

    fn verify_and_decode(&self, envelope: ListEnvelope) -> Result<Vec<Argument>> {
        let actual = envelope.type_tag.ok_or(CodecError::MissingTypeTag)?;

        // Empty lists are accepted whatever their tag says.
        if envelope.values.is_empty() {
            if actual != self.element.name().as_str() {
                self.metrics.empty_list_bypassed();
                warn!(
                    expected = %self.element,
                    actual = %actual,
                    "Accepting empty list with mismatched element tag"
                );
            }
            return Ok(Vec::new());
        }

        if actual != self.element.name().as_str() {
            return Err(CodecError::TypeMismatch {
                expected: self.element.name().to_string(),
                actual,
            });
        }

        envelope
            .values
            .iter()
            .enumerate()
            .map(|(index, blob)| {
                self.element_codec
                    .decode(blob, &self.element)
                    .map_err(|source| CodecError::ElementDecodeFailure {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect()
    }

    /// Encodes typed values, failing if `T` is not this codec's element type.
    pub fn encode_values<T, I>(&self, values: I) -> Result<Bytes>
    where
        T: ArgumentType,
        I: IntoIterator<Item = T>,
    {
        self.ensure_element::<T>()?;
        let items = values
            .into_iter()
            .map(T::into_argument)
            .collect::<Result<Vec<_>>>()?;
        self.encode_items(&items)
    }

    /// Decodes into typed values, failing if `T` is not this codec's element type.
    ///
    /// Message bodies are parsed here, so a corrupt body fails the whole list
    /// with [`CodecError::ElementDecodeFailure`] like any other element error.
    pub fn decode_values<T: ArgumentType>(&self, bytes: &[u8]) -> Result<Vec<T>> {
        self.ensure_element::<T>()?;
        let envelope = ListEnvelope::from_bytes(bytes, self.max_envelope_bytes)
            .inspect_err(|_| self.metrics.list_decode_failed())?;
        self.record(
            self.verify_and_decode(envelope)
                .and_then(convert_items::<T>),
        )
    }

    fn ensure_element<T: ArgumentType>(&self) -> Result<()> {
        let requested = T::type_info();
        if requested.name() != self.element.name() {
            return Err(CodecError::TypeMismatch {
                expected: self.element.name().to_string(),
                actual: requested.name().to_string(),
            });
        }
        Ok(())
    }
}

impl Codec for ListCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::List(list) if list.element() == self.element.name() => {
                self.encode_items(list.items())
            }
            Argument::List(list) => Err(CodecError::TypeMismatch {
                expected: self.element.name().to_string(),
                actual: list.element().to_string(),
            }),
            other => Err(CodecError::unexpected(
                names::LIST.as_str(),
                other.type_name().as_str(),
            )),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        let items = self.decode_items(bytes)?;
        Ok(Argument::List(ListArgument::new(
            self.element.name().clone(),
            items,
        )?))
    }
}

/// Registry entry for "list": routes to a per-element [`ListCodec`].
#[derive(Debug)]
pub struct ListDispatchCodec {
    by_element: HashMap<TypeName, Arc<ListCodec>>,
    max_envelope_bytes: u64,
    metrics: Arc<CodecMetrics>,
}

impl ListDispatchCodec {
    pub fn new(
        by_element: HashMap<TypeName, Arc<ListCodec>>,
        max_envelope_bytes: u64,
        metrics: Arc<CodecMetrics>,
    ) -> Self {
        Self {
            by_element,
            max_envelope_bytes,
            metrics,
        }
    }

    fn lookup(&self, element: &str) -> Result<&Arc<ListCodec>> {
        self.by_element
            .get(element)
            .ok_or_else(|| CodecError::CodecNotFound(format!("{}<{element}>", names::LIST)))
    }
}

impl Codec for ListDispatchCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::List(list) => self.lookup(list.element().as_str())?.encode_items(list.items()),
            other => Err(CodecError::unexpected(
                names::LIST.as_str(),
                other.type_name().as_str(),
            )),
        }
    }

    /// The wire tag selects the element codec; `hint` is not consulted.
    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        let envelope = ListEnvelope::from_bytes(bytes, self.max_envelope_bytes)
            .inspect_err(|_| self.metrics.list_decode_failed())?;
        let codec = match envelope.type_tag.as_deref() {
            Some(tag) => self.lookup(tag),
            None => Err(CodecError::MissingTypeTag),
        }
        .inspect_err(|_| self.metrics.list_decode_failed())?;

        let items = codec.decode_envelope(envelope)?;
        Ok(Argument::List(ListArgument::new(
            codec.element().name().clone(),
            items,
        )?))
    }
}
