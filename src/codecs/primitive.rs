//! Codecs for scalar values: fixed-width integers, text, booleans, big integers
//! and raw byte strings.

use crate::core::argument::{Argument, ArgumentType, BigInteger};
use crate::core::codec::Codec;
use crate::core::types::{names, TypeInfo};
use crate::error::{constants, CodecError, Result};
use bytes::Bytes;

fn fixed<const N: usize>(bytes: &[u8], what: &str) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| {
        CodecError::DeserializeError(format!(
            "{what} requires {} bytes, got {}",
            N,
            bytes.len()
        ))
    })
}

/// 32-bit integer, 4 bytes big-endian.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerCodec;

impl Codec for IntegerCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::Integer(v) => Ok(Bytes::copy_from_slice(&v.to_be_bytes())),
            other => Err(CodecError::unexpected(names::INTEGER.as_str(), other.type_name().as_str())),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        Ok(Argument::Integer(i32::from_be_bytes(fixed(bytes, "Integer")?)))
    }
}

/// 64-bit integer, 8 bytes big-endian.
#[derive(Debug, Default, Clone, Copy)]
pub struct LongCodec;

impl Codec for LongCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::Long(v) => Ok(Bytes::copy_from_slice(&v.to_be_bytes())),
            other => Err(CodecError::unexpected(names::LONG.as_str(), other.type_name().as_str())),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        Ok(Argument::Long(i64::from_be_bytes(fixed(bytes, "Long")?)))
    }
}

/// UTF-8 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCodec;

impl Codec for TextCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::Text(v) => Ok(Bytes::copy_from_slice(v.as_bytes())),
            other => Err(CodecError::unexpected(names::TEXT.as_str(), other.type_name().as_str())),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| CodecError::DeserializeError(constants::ERR_INVALID_UTF8.to_string()))?;
        Ok(Argument::Text(text.to_owned()))
    }
}

/// Boolean as a single 0/1 byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::Boolean(v) => Ok(Bytes::copy_from_slice(&[u8::from(*v)])),
            other => Err(CodecError::unexpected(names::BOOLEAN.as_str(), other.type_name().as_str())),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        match bytes {
            [0] => Ok(Argument::Boolean(false)),
            [1] => Ok(Argument::Boolean(true)),
            _ => Err(CodecError::DeserializeError(
                constants::ERR_INVALID_BOOLEAN.to_string(),
            )),
        }
    }
}

/// Arbitrary-precision integer as minimal two's-complement big-endian bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BigIntegerCodec;

impl Codec for BigIntegerCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::BigInteger(v) => Ok(Bytes::copy_from_slice(v.as_be_bytes())),
            other => Err(CodecError::unexpected(
                names::BIG_INTEGER.as_str(),
                other.type_name().as_str(),
            )),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        BigInteger::from_be_bytes(bytes)?.into_argument()
    }
}

/// Raw bytes, passed through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteStringCodec;

impl Codec for ByteStringCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::ByteString(v) => Ok(v.clone()),
            other => Err(CodecError::unexpected(
                names::BYTE_STRING.as_str(),
                other.type_name().as_str(),
            )),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        Ok(Argument::ByteString(Bytes::copy_from_slice(bytes)))
    }
}
