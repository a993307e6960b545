//! # Concrete Codecs
//!
//! The codecs bound by [`register_defaults`](crate::registry::register_defaults).
//!
//! ## Components
//! - **Primitive**: integer, long, text, boolean, big integer, byte string
//! - **Security**: X.509 certificates, managed secret keys
//! - **Message**: capability codecs for protocol messages and enums
//! - **List**: per-element list codecs and the list dispatcher
//!
//! Every codec here is a stateless unit struct except the list codecs, which
//! hold their element codec and a shared metrics handle.

pub mod list;
pub mod message;
pub mod primitive;
pub mod security;

pub use list::{ListCodec, ListDispatchCodec};
pub use message::{ProtocolEnumCodec, ProtocolMessageCodec};
pub use primitive::{
    BigIntegerCodec, BooleanCodec, ByteStringCodec, IntegerCodec, LongCodec, TextCodec,
};
pub use security::{CertificateCodec, SecretKeyCodec};
