//! Capability codecs: one instance serves every protocol message type and every
//! protocol enum type.
//!
//! Neither codec knows the concrete type it is decoding; the caller's type hint
//! supplies it and must carry the matching capability.

use crate::core::argument::{Argument, EnumArgument, MessageArgument};
use crate::core::codec::Codec;
use crate::core::types::{names, TypeInfo};
use crate::error::{CodecError, Result};
use bytes::Bytes;

/// Protocol messages, carried as their already-serialized body.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProtocolMessageCodec;

impl Codec for ProtocolMessageCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::Message(message) => Ok(message.body().clone()),
            other => Err(CodecError::unexpected(
                names::PROTOCOL_MESSAGE.as_str(),
                other.type_name().as_str(),
            )),
        }
    }

    fn decode(&self, bytes: &[u8], hint: &TypeInfo) -> Result<Argument> {
        if !hint.is_a(&names::PROTOCOL_MESSAGE) {
            return Err(CodecError::unexpected(
                names::PROTOCOL_MESSAGE.as_str(),
                hint.name().as_str(),
            ));
        }
        Ok(Argument::Message(MessageArgument::new(
            hint.clone(),
            Bytes::copy_from_slice(bytes),
        )))
    }
}

/// Protocol enums, carried as their wire number (4 bytes big-endian).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProtocolEnumCodec;

impl Codec for ProtocolEnumCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::Enum(constant) => Ok(Bytes::copy_from_slice(&constant.number().to_be_bytes())),
            other => Err(CodecError::unexpected(
                names::PROTOCOL_ENUM.as_str(),
                other.type_name().as_str(),
            )),
        }
    }

    fn decode(&self, bytes: &[u8], hint: &TypeInfo) -> Result<Argument> {
        if !hint.is_a(&names::PROTOCOL_ENUM) {
            return Err(CodecError::unexpected(
                names::PROTOCOL_ENUM.as_str(),
                hint.name().as_str(),
            ));
        }
        let number: [u8; 4] = bytes.try_into().map_err(|_| {
            CodecError::DeserializeError(format!(
                "Enum number requires 4 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Argument::Enum(EnumArgument::new(
            hint.clone(),
            i32::from_be_bytes(number),
        )))
    }
}
