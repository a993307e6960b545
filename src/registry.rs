//! # Codec Registry
//!
//! Maps type identities to codecs, resolving through ancestors and capabilities
//! when a type has no entry of its own.
//!
//! The registry is built once with a [`RegistryBuilder`] and is immutable
//! afterwards: [`CodecRegistry`] exposes no way to add, replace or remove an
//! entry, so it can be shared across threads and read without locking.
//!
//! ## Resolution Order
//! For a type `T` the candidates are tried in this order, first match wins:
//! 1. `T` itself
//! 2. `T`'s superclasses, nearest first
//! 3. `T`'s capabilities, in declaration order
//!
//! ## Lists
//! A list value does not reveal its element type through its own type, so the
//! single "list" entry dispatches through a side table of per-element
//! [`ListCodec`]s keyed by canonical element name. Only element types on the
//! bootstrap allow-list can appear in a list.

use crate::codecs::list::{ListCodec, ListDispatchCodec};
use crate::codecs::message::{ProtocolEnumCodec, ProtocolMessageCodec};
use crate::codecs::primitive::{
    BigIntegerCodec, BooleanCodec, ByteStringCodec, IntegerCodec, LongCodec, TextCodec,
};
use crate::codecs::security::{CertificateCodec, SecretKeyCodec};
use crate::config::{CodecConfig, DEFAULT_MAX_ENVELOPE_BYTES};
use crate::core::argument::{Argument, ArgumentType};
use crate::core::codec::SharedCodec;
use crate::core::types::{names, TypeInfo, TypeName};
use crate::error::{CodecError, Result};
use crate::protocol::messages::{DeletedBlocksTransaction, PipelineId};
use crate::utils::metrics::CodecMetrics;
use bytes::Bytes;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// First registered candidate for `ty`, in resolution order.
fn lookup<'a>(
    codecs: &'a HashMap<TypeName, SharedCodec>,
    ty: &'a TypeInfo,
) -> Option<(&'a TypeName, &'a SharedCodec)> {
    ty.candidates()
        .find_map(|candidate| codecs.get(candidate).map(|codec| (candidate, codec)))
}

/// Mutable bootstrap phase of a [`CodecRegistry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    codecs: HashMap<TypeName, SharedCodec>,
    lists: HashMap<TypeName, Arc<ListCodec>>,
    max_envelope_bytes: u64,
    metrics: Arc<CodecMetrics>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
            lists: HashMap::new(),
            max_envelope_bytes: DEFAULT_MAX_ENVELOPE_BYTES,
            metrics: Arc::new(CodecMetrics::new()),
        }
    }

    /// Sets the envelope size limit used by list codecs registered afterwards.
    pub fn max_envelope_bytes(mut self, limit: u64) -> Self {
        self.max_envelope_bytes = limit;
        self
    }

    /// Binds `codec` to exactly `name`. Each name can be bound once.
    pub fn register(&mut self, name: impl Into<TypeName>, codec: SharedCodec) -> Result<&mut Self> {
        match self.codecs.entry(name.into()) {
            Entry::Occupied(entry) => {
                Err(CodecError::DuplicateRegistration(entry.key().to_string()))
            }
            Entry::Vacant(entry) => {
                debug!(type_name = %entry.key(), "Registered codec");
                entry.insert(codec);
                Ok(self)
            }
        }
    }

    /// Resolves against the entries registered so far.
    pub fn resolve(&self, ty: &TypeInfo) -> Result<SharedCodec> {
        lookup(&self.codecs, ty)
            .map(|(_, codec)| Arc::clone(codec))
            .ok_or_else(|| CodecError::CodecNotFound(ty.name().to_string()))
    }

    /// Allows lists of `element`, wrapping the element's resolved codec.
    ///
    /// Fails with [`CodecError::ElementTypeMismatch`] if the element type has no
    /// codec yet, so element codecs must be registered first.
    pub fn register_list_element(&mut self, element: TypeInfo) -> Result<&mut Self> {
        let element_codec =
            self.resolve(&element)
                .map_err(|source| CodecError::ElementTypeMismatch {
                    element: element.name().to_string(),
                    source: Box::new(source),
                })?;

        match self.lists.entry(element.name().clone()) {
            Entry::Occupied(entry) => Err(CodecError::DuplicateRegistration(format!(
                "{}<{}>",
                names::LIST,
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                debug!(element = %entry.key(), "Registered list element type");
                entry.insert(Arc::new(ListCodec::new(
                    element,
                    element_codec,
                    self.max_envelope_bytes,
                    Arc::clone(&self.metrics),
                )));
                Ok(self)
            }
        }
    }

    /// Binds the list dispatcher and freezes the table.
    pub fn build(mut self) -> Result<CodecRegistry> {
        let dispatch = ListDispatchCodec::new(
            self.lists.clone(),
            self.max_envelope_bytes,
            Arc::clone(&self.metrics),
        );
        self.register(names::LIST, Arc::new(dispatch))?;

        debug!(
            codecs = self.codecs.len(),
            list_elements = self.lists.len(),
            "Codec registry bootstrapped"
        );

        Ok(CodecRegistry {
            codecs: self.codecs,
            lists: self.lists,
            metrics: self.metrics,
        })
    }
}

/// Binds the built-in codecs and the list element allow-list.
pub fn register_defaults(builder: &mut RegistryBuilder) -> Result<()> {
    builder
        .register(names::PROTOCOL_MESSAGE, Arc::new(ProtocolMessageCodec))?
        .register(names::PROTOCOL_ENUM, Arc::new(ProtocolEnumCodec))?
        .register(names::INTEGER, Arc::new(IntegerCodec))?
        .register(names::LONG, Arc::new(LongCodec))?
        .register(names::TEXT, Arc::new(TextCodec))?
        .register(names::BOOLEAN, Arc::new(BooleanCodec))?
        .register(names::BIG_INTEGER, Arc::new(BigIntegerCodec))?
        .register(names::CERTIFICATE, Arc::new(CertificateCodec))?
        .register(names::BYTE_STRING, Arc::new(ByteStringCodec))?
        .register(names::SECRET_KEY, Arc::new(SecretKeyCodec))?;

    builder
        .register_list_element(String::type_info())?
        .register_list_element(i64::type_info())?
        .register_list_element(i32::type_info())?
        .register_list_element(PipelineId::type_info())?
        .register_list_element(DeletedBlocksTransaction::type_info())?;

    Ok(())
}

/// Immutable type-to-codec table.
#[derive(Debug)]
pub struct CodecRegistry {
    codecs: HashMap<TypeName, SharedCodec>,
    lists: HashMap<TypeName, Arc<ListCodec>>,
    metrics: Arc<CodecMetrics>,
}

impl CodecRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with the built-in codecs and default limits.
    pub fn with_defaults() -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        register_defaults(&mut builder)?;
        builder.build()
    }

    /// Registry with the built-in codecs, after validating `config`.
    #[instrument(skip(config))]
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate_strict()?;
        let mut builder = RegistryBuilder::new().max_envelope_bytes(config.limits.max_envelope_bytes);
        register_defaults(&mut builder)?;
        builder.build()
    }

    /// Codec for `ty`, resolved through its ancestors and capabilities.
    pub fn resolve(&self, ty: &TypeInfo) -> Result<SharedCodec> {
        match lookup(&self.codecs, ty) {
            Some((matched, codec)) => {
                self.metrics.resolution_hit();
                if matched != ty.name() {
                    debug!(type_name = %ty, resolved_as = %matched, "Resolved codec through ancestor");
                }
                Ok(Arc::clone(codec))
            }
            None => {
                self.metrics.resolution_miss();
                warn!(type_name = %ty, "No codec registered");
                Err(CodecError::CodecNotFound(ty.name().to_string()))
            }
        }
    }

    /// Codec for the runtime type of `value`.
    pub fn codec_for(&self, value: &Argument) -> Result<SharedCodec> {
        self.resolve(&value.type_info())
    }

    /// Encodes `value` with the codec resolved for its own type.
    pub fn encode(&self, value: &Argument) -> Result<Bytes> {
        self.codec_for(value)?.encode(value)
    }

    /// Decodes `bytes` with the codec resolved for `ty`, passing `ty` as the hint.
    pub fn decode(&self, bytes: &[u8], ty: &TypeInfo) -> Result<Argument> {
        self.resolve(ty)?.decode(bytes, ty)
    }

    /// Encodes a typed value.
    pub fn encode_value<T: ArgumentType>(&self, value: T) -> Result<Bytes> {
        self.encode(&value.into_argument()?)
    }

    /// Decodes a typed value.
    pub fn decode_value<T: ArgumentType>(&self, bytes: &[u8]) -> Result<T> {
        T::from_argument(self.decode(bytes, &T::type_info())?)
    }

    /// List codec for a registered element type.
    pub fn list_codec(&self, element: &TypeName) -> Result<Arc<ListCodec>> {
        self.lists
            .get(element)
            .cloned()
            .ok_or_else(|| CodecError::CodecNotFound(format!("{}<{element}>", names::LIST)))
    }

    /// Element types that may appear in a list, sorted by name.
    pub fn list_element_types(&self) -> Vec<&TypeName> {
        let mut elements: Vec<&TypeName> = self.lists.keys().collect();
        elements.sort();
        elements
    }

    /// True if `name` has an entry of its own (no ancestor walk).
    pub fn contains(&self, name: &TypeName) -> bool {
        self.codecs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    pub fn metrics(&self) -> &CodecMetrics {
        &self.metrics
    }
}
