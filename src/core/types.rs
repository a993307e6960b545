//! # Type Identities
//!
//! Explicit type descriptors used as registry keys and list wire tags.
//!
//! A [`TypeName`] is the canonical, cross-process comparable name of a logical
//! type. A [`TypeInfo`] adds the type's ancestor chain and its implemented
//! capabilities, which is everything the registry needs to resolve a codec
//! without runtime reflection.
//!
//! ## Resolution Order
//! ```text
//! [exact name] [superclasses, nearest first] [capabilities, declaration order]
//! ```

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Canonical name of a logical type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(Cow<'static, str>);

impl TypeName {
    /// Name backed by a static string, usable in constants.
    pub const fn from_static(name: &'static str) -> Self {
        TypeName(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        TypeName(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TypeName {
    fn from(name: &'static str) -> Self {
        TypeName::from_static(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        TypeName::new(name)
    }
}

/// Canonical names of the built-in types and capabilities.
pub mod names {
    use super::TypeName;

    pub const NUMBER: TypeName = TypeName::from_static("number");
    pub const INTEGER: TypeName = TypeName::from_static("integer");
    pub const LONG: TypeName = TypeName::from_static("long");
    pub const BIG_INTEGER: TypeName = TypeName::from_static("big_integer");
    pub const TEXT: TypeName = TypeName::from_static("text");
    pub const BOOLEAN: TypeName = TypeName::from_static("boolean");
    pub const BYTE_STRING: TypeName = TypeName::from_static("byte_string");
    pub const CERTIFICATE: TypeName = TypeName::from_static("x509_certificate");
    pub const SECRET_KEY: TypeName = TypeName::from_static("managed_secret_key");
    pub const LIST: TypeName = TypeName::from_static("list");

    /// Common ancestor of every generated protocol message.
    pub const GENERATED_MESSAGE: TypeName = TypeName::from_static("generated_message");
    /// Capability implemented by every protocol message.
    pub const PROTOCOL_MESSAGE: TypeName = TypeName::from_static("protocol_message");
    /// Common ancestor of every protocol enum.
    pub const ENUM: TypeName = TypeName::from_static("enum");
    /// Capability implemented by every protocol enum.
    pub const PROTOCOL_ENUM: TypeName = TypeName::from_static("protocol_enum");
}

/// Runtime description of a type: its name, ancestors and capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    name: TypeName,
    superclasses: Vec<TypeName>,
    interfaces: Vec<TypeName>,
}

impl TypeInfo {
    /// A type with no ancestors and no capabilities.
    pub fn leaf(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            superclasses: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    /// Appends the next (further) ancestor.
    pub fn extends(mut self, ancestor: impl Into<TypeName>) -> Self {
        self.superclasses.push(ancestor.into());
        self
    }

    /// Appends the next implemented capability.
    pub fn implements(mut self, capability: impl Into<TypeName>) -> Self {
        self.interfaces.push(capability.into());
        self
    }

    /// Descriptor of a protocol message with the given declared name.
    pub fn protocol_message(name: impl Into<TypeName>) -> Self {
        Self::leaf(name)
            .extends(names::GENERATED_MESSAGE)
            .implements(names::PROTOCOL_MESSAGE)
    }

    /// Descriptor of a protocol enum with the given declared name.
    pub fn protocol_enum(name: impl Into<TypeName>) -> Self {
        Self::leaf(name)
            .extends(names::ENUM)
            .implements(names::PROTOCOL_ENUM)
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn superclasses(&self) -> &[TypeName] {
        &self.superclasses
    }

    pub fn interfaces(&self) -> &[TypeName] {
        &self.interfaces
    }

    /// Candidate names in resolution priority order.
    pub fn candidates(&self) -> impl Iterator<Item = &TypeName> {
        std::iter::once(&self.name)
            .chain(self.superclasses.iter())
            .chain(self.interfaces.iter())
    }

    /// True if `name` is this type, one of its ancestors or one of its capabilities.
    pub fn is_a(&self, name: &TypeName) -> bool {
        self.candidates().any(|candidate| candidate == name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}
