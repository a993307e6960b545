//! # scm-codec
//!
//! Serialization layer for commands replicated between the nodes of a storage
//! control-plane consensus group.
//!
//! Command arguments are encoded through a [`CodecRegistry`] that maps type
//! identities to codecs. A type without an entry of its own resolves through its
//! ancestors and capabilities, so one codec can serve every protocol message.
//! Lists are encoded in a tagged envelope that lets the receiver check it is
//! decoding the element type the sender encoded.
//!
//! ## Example
//! ```rust
//! use scm_codec::core::argument::ArgumentType;
//! use scm_codec::registry::CodecRegistry;
//!
//! let registry = CodecRegistry::with_defaults()?;
//!
//! let integers = registry.list_codec(i32::type_info().name())?;
//! let bytes = integers.encode_values(vec![1, 2, 3])?;
//! assert_eq!(integers.decode_values::<i32>(&bytes)?, vec![1, 2, 3]);
//!
//! let texts = registry.list_codec(String::type_info().name())?;
//! assert!(texts.decode_items(&bytes).is_err());
//! # Ok::<(), scm_codec::error::CodecError>(())
//! ```

pub mod codecs;
pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod utils;

pub use crate::core::argument::{Argument, ArgumentType, ListArgument};
pub use crate::core::codec::{Codec, SharedCodec};
pub use crate::core::types::{TypeInfo, TypeName};
pub use crate::error::{CodecError, Result};
pub use crate::registry::{CodecRegistry, RegistryBuilder};
