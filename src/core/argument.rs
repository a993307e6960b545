//! # Command Arguments
//!
//! The closed set of values a replicated command can carry, and the checked
//! conversions between them and typed Rust values.
//!
//! Every [`Argument`] knows its own [`TypeInfo`], so the registry can resolve a
//! codec for a value without being told its type. Lists carry their element type
//! explicitly because an empty `Vec` has no element to inspect.

use crate::core::types::{names, TypeInfo, TypeName};
use crate::error::{constants, CodecError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Integer(i32),
    Long(i64),
    Text(String),
    Boolean(bool),
    BigInteger(BigInteger),
    ByteString(Bytes),
    Certificate(Certificate),
    SecretKey(ManagedSecretKey),
    Message(MessageArgument),
    Enum(EnumArgument),
    List(ListArgument),
}

impl Argument {
    /// Runtime type of this value.
    pub fn type_info(&self) -> TypeInfo {
        match self {
            Argument::Integer(_) => i32::type_info(),
            Argument::Long(_) => i64::type_info(),
            Argument::Text(_) => String::type_info(),
            Argument::Boolean(_) => bool::type_info(),
            Argument::BigInteger(_) => BigInteger::type_info(),
            Argument::ByteString(_) => Bytes::type_info(),
            Argument::Certificate(_) => Certificate::type_info(),
            Argument::SecretKey(_) => ManagedSecretKey::type_info(),
            Argument::Message(m) => m.message_type.clone(),
            Argument::Enum(e) => e.enum_type.clone(),
            Argument::List(_) => TypeInfo::leaf(names::LIST),
        }
    }

    /// Canonical name of this value's type.
    pub fn type_name(&self) -> TypeName {
        match self {
            Argument::Message(m) => m.message_type.name().clone(),
            Argument::Enum(e) => e.enum_type.name().clone(),
            other => other.type_info().name().clone(),
        }
    }
}

/// Rust types that can travel as a command argument.
///
/// Conversions are checked: taking a value back out of an [`Argument`] of a
/// different kind fails with [`CodecError::UnexpectedArgument`].
pub trait ArgumentType: Sized {
    fn type_info() -> TypeInfo;

    fn into_argument(self) -> Result<Argument>;

    fn from_argument(argument: Argument) -> Result<Self>;
}

fn mismatch<T: ArgumentType>(actual: &Argument) -> CodecError {
    CodecError::unexpected(T::type_info().name().as_str(), actual.type_name().as_str())
}

impl ArgumentType for i32 {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf(names::INTEGER).extends(names::NUMBER)
    }

    fn into_argument(self) -> Result<Argument> {
        Ok(Argument::Integer(self))
    }

    fn from_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::Integer(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl ArgumentType for i64 {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf(names::LONG).extends(names::NUMBER)
    }

    fn into_argument(self) -> Result<Argument> {
        Ok(Argument::Long(self))
    }

    fn from_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::Long(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl ArgumentType for String {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf(names::TEXT)
    }

    fn into_argument(self) -> Result<Argument> {
        Ok(Argument::Text(self))
    }

    fn from_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::Text(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl ArgumentType for bool {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf(names::BOOLEAN)
    }

    fn into_argument(self) -> Result<Argument> {
        Ok(Argument::Boolean(self))
    }

    fn from_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::Boolean(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl ArgumentType for Bytes {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf(names::BYTE_STRING)
    }

    fn into_argument(self) -> Result<Argument> {
        Ok(Argument::ByteString(self))
    }

    fn from_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::ByteString(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// Arbitrary-precision signed integer.
///
/// Stored as minimal two's-complement big-endian bytes, the same layout it has
/// on the wire.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInteger(Vec<u8>);

impl BigInteger {
    /// Builds a value from two's-complement big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CodecError::DeserializeError(
                constants::ERR_EMPTY_BIG_INTEGER.to_string(),
            ));
        }
        Ok(BigInteger(normalize(bytes)))
    }

    /// Minimal two's-complement big-endian encoding.
    pub fn as_be_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.first().is_some_and(|b| b & 0x80 != 0)
    }

    /// The value as an `i128`, if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        if self.0.len() > 16 {
            return None;
        }
        let fill = if self.is_negative() { 0xFF } else { 0x00 };
        let mut buf = [fill; 16];
        buf[16 - self.0.len()..].copy_from_slice(&self.0);
        Some(i128::from_be_bytes(buf))
    }
}

/// Strips redundant sign-extension bytes.
fn normalize(bytes: &[u8]) -> Vec<u8> {
    let mut start = 0;
    while start + 1 < bytes.len() {
        let (head, next) = (bytes[start], bytes[start + 1]);
        let redundant = (head == 0x00 && next & 0x80 == 0) || (head == 0xFF && next & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

impl From<i128> for BigInteger {
    fn from(value: i128) -> Self {
        BigInteger(normalize(&value.to_be_bytes()))
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        BigInteger::from(i128::from(value))
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_i128() {
            Some(v) => write!(f, "BigInteger({v})"),
            None => write!(f, "BigInteger({} bytes)", self.0.len()),
        }
    }
}

impl ArgumentType for BigInteger {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf(names::BIG_INTEGER).extends(names::NUMBER)
    }

    fn into_argument(self) -> Result<Argument> {
        Ok(Argument::BigInteger(self))
    }

    fn from_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::BigInteger(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// DER-encoded X.509 certificate. Parsing is left to the security layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Bytes,
}

impl Certificate {
    pub fn from_der(der: impl Into<Bytes>) -> Result<Self> {
        let der = der.into();
        if der.is_empty() {
            return Err(CodecError::DeserializeError(
                constants::ERR_EMPTY_CERTIFICATE.to_string(),
            ));
        }
        Ok(Self { der })
    }

    pub fn der(&self) -> &Bytes {
        &self.der
    }
}

impl ArgumentType for Certificate {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf(names::CERTIFICATE)
    }

    fn into_argument(self) -> Result<Argument> {
        Ok(Argument::Certificate(self))
    }

    fn from_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::Certificate(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// Symmetric key distributed by the control plane, with its validity window.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedSecretKey {
    id: Uuid,
    creation_time_ms: u64,
    expiry_time_ms: u64,
    algorithm: String,
    encoded: Vec<u8>,
}

impl ManagedSecretKey {
    pub fn new(
        id: Uuid,
        creation_time_ms: u64,
        expiry_time_ms: u64,
        algorithm: impl Into<String>,
        encoded: Vec<u8>,
    ) -> Self {
        Self {
            id,
            creation_time_ms,
            expiry_time_ms,
            algorithm: algorithm.into(),
            encoded,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn creation_time_ms(&self) -> u64 {
        self.creation_time_ms
    }

    pub fn expiry_time_ms(&self) -> u64 {
        self.expiry_time_ms
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expiry_time_ms
    }
}

// Key material stays out of logs.
impl fmt::Debug for ManagedSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedSecretKey")
            .field("id", &self.id)
            .field("creation_time_ms", &self.creation_time_ms)
            .field("expiry_time_ms", &self.expiry_time_ms)
            .field("algorithm", &self.algorithm)
            .field("encoded", &format_args!("<{} bytes>", self.encoded.len()))
            .finish()
    }
}

impl ArgumentType for ManagedSecretKey {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf(names::SECRET_KEY)
    }

    fn into_argument(self) -> Result<Argument> {
        Ok(Argument::SecretKey(self))
    }

    fn from_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::SecretKey(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// A protocol message in serialized form, tagged with its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageArgument {
    message_type: TypeInfo,
    body: Bytes,
}

impl MessageArgument {
    pub fn new(message_type: TypeInfo, body: impl Into<Bytes>) -> Self {
        Self {
            message_type,
            body: body.into(),
        }
    }

    pub fn message_type(&self) -> &TypeInfo {
        &self.message_type
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// A protocol enum constant, identified by its wire number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumArgument {
    enum_type: TypeInfo,
    number: i32,
}

impl EnumArgument {
    pub fn new(enum_type: TypeInfo, number: i32) -> Self {
        Self { enum_type, number }
    }

    pub fn enum_type(&self) -> &TypeInfo {
        &self.enum_type
    }

    pub fn number(&self) -> i32 {
        self.number
    }
}

/// An ordered, homogeneous list of arguments with an explicit element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListArgument {
    element: TypeName,
    items: Vec<Argument>,
}

impl ListArgument {
    /// Builds a list of `element` values.
    ///
    /// Fails with [`CodecError::TypeMismatch`] on the first item whose own type
    /// is not `element`.
    pub fn new(element: impl Into<TypeName>, items: Vec<Argument>) -> Result<Self> {
        let element = element.into();
        if let Some(foreign) = items.iter().find(|item| item.type_name() != element) {
            return Err(CodecError::TypeMismatch {
                expected: element.to_string(),
                actual: foreign.type_name().to_string(),
            });
        }
        Ok(Self { element, items })
    }

    /// Builds a list from typed values; the element type comes from `T`.
    pub fn from_values<T, I>(values: I) -> Result<Self>
    where
        T: ArgumentType,
        I: IntoIterator<Item = T>,
    {
        let items = values
            .into_iter()
            .map(T::into_argument)
            .collect::<Result<Vec<_>>>()?;
        Self::new(T::type_info().name().clone(), items)
    }

    /// Extracts typed values, failing if the element type is not `T`.
    pub fn into_values<T: ArgumentType>(self) -> Result<Vec<T>> {
        let expected = T::type_info();
        if self.element != *expected.name() {
            return Err(CodecError::TypeMismatch {
                expected: expected.name().to_string(),
                actual: self.element.to_string(),
            });
        }
        convert_items(self.items)
    }

    pub fn element(&self) -> &TypeName {
        &self.element
    }

    pub fn items(&self) -> &[Argument] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Converts decoded items to `T`, tagging the first failure with its index.
pub(crate) fn convert_items<T: ArgumentType>(items: Vec<Argument>) -> Result<Vec<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            T::from_argument(item).map_err(|source| CodecError::ElementDecodeFailure {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}
