//! # Protocol Types
//!
//! Typed protocol messages and enums that travel as command arguments.
//!
//! A message type declares a canonical name and serializes its own body; the
//! registry resolves it through the shared "protocol message" capability, so new
//! message types need no registry entry of their own. Enums work the same way
//! through the "protocol enum" capability, carried as their wire number.
//!
//! ## Components
//! - **ProtocolMessage**: trait for message types with a serde body
//! - **ProtocolEnum**: trait for enums with a stable wire number
//! - **Messages**: control-plane types used as list elements

pub mod messages;


use crate::core::argument::{Argument, EnumArgument, MessageArgument};
use crate::core::envelope::record_options;
use crate::core::types::TypeInfo;
use crate::error::{CodecError, Result};
use bincode::Options;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A protocol message with a declared canonical name.
pub trait ProtocolMessage: Serialize + DeserializeOwned {
    const MESSAGE_NAME: &'static str;

    fn message_type() -> TypeInfo {
        TypeInfo::protocol_message(Self::MESSAGE_NAME)
    }

    /// Serializes the body and wraps it as a message argument.
    fn to_message_argument(&self) -> Result<Argument> {
        let body = record_options().serialize(self)?;
        Ok(Argument::Message(MessageArgument::new(
            Self::message_type(),
            Bytes::from(body),
        )))
    }

    /// Parses a message argument of this type back into `Self`.
    fn from_message_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::Message(message)
                if message.message_type().name().as_str() == Self::MESSAGE_NAME =>
            {
                Ok(record_options().deserialize(message.body())?)
            }
            other => Err(CodecError::unexpected(
                Self::MESSAGE_NAME,
                other.type_name().as_str(),
            )),
        }
    }
}

/// A protocol enum with stable wire numbers.
pub trait ProtocolEnum: Sized + Copy {
    const ENUM_NAME: &'static str;

    fn number(self) -> i32;

    fn from_number(number: i32) -> Option<Self>;

    fn enum_type() -> TypeInfo {
        TypeInfo::protocol_enum(Self::ENUM_NAME)
    }

    fn to_enum_argument(self) -> Argument {
        Argument::Enum(EnumArgument::new(Self::enum_type(), self.number()))
    }

    fn from_enum_argument(argument: Argument) -> Result<Self> {
        match argument {
            Argument::Enum(constant)
                if constant.enum_type().name().as_str() == Self::ENUM_NAME =>
            {
                Self::from_number(constant.number()).ok_or_else(|| {
                    CodecError::DeserializeError(format!(
                        "Unknown {} number: {}",
                        Self::ENUM_NAME,
                        constant.number()
                    ))
                })
            }
            other => Err(CodecError::unexpected(
                Self::ENUM_NAME,
                other.type_name().as_str(),
            )),
        }
    }
}

/// Implements [`ArgumentType`](crate::core::argument::ArgumentType) for message types.
macro_rules! message_argument_type {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::core::argument::ArgumentType for $ty {
            fn type_info() -> $crate::core::types::TypeInfo {
                <$ty as $crate::protocol::ProtocolMessage>::message_type()
            }

            fn into_argument(self) -> $crate::error::Result<$crate::core::argument::Argument> {
                $crate::protocol::ProtocolMessage::to_message_argument(&self)
            }

            fn from_argument(
                argument: $crate::core::argument::Argument,
            ) -> $crate::error::Result<Self> {
                <$ty as $crate::protocol::ProtocolMessage>::from_message_argument(argument)
            }
        }
    )+};
}

/// Implements [`ArgumentType`](crate::core::argument::ArgumentType) for enum types.
macro_rules! enum_argument_type {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::core::argument::ArgumentType for $ty {
            fn type_info() -> $crate::core::types::TypeInfo {
                <$ty as $crate::protocol::ProtocolEnum>::enum_type()
            }

            fn into_argument(self) -> $crate::error::Result<$crate::core::argument::Argument> {
                Ok($crate::protocol::ProtocolEnum::to_enum_argument(self))
            }

            fn from_argument(
                argument: $crate::core::argument::Argument,
            ) -> $crate::error::Result<Self> {
                <$ty as $crate::protocol::ProtocolEnum>::from_enum_argument(argument)
            }
        }
    )+};
}

pub(crate) use enum_argument_type;
pub(crate) use message_argument_type;
