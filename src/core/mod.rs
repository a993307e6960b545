//! # Core Codec Components
//!
//! Type identities, the argument value model, the codec capability and the
//! list envelope wire format.
//!
//! ## Components
//! - **Types**: canonical names and ancestor/capability descriptors
//! - **Argument**: the closed set of values a replicated command carries
//! - **Codec**: the encode/decode trait every registered codec implements
//! - **Envelope**: bincode wire form of an encoded list
//!
//! ## Wire Format (list envelope, bincode fixint)
//! ```text
//! [HasTag(1)] [TagLen(8)] [Tag(N)] [Count(8)] ([BlobLen(8)] [Blob(M)])*
//! ```
//!
//! ## Security
//! - Envelope decoding is bounded by a configurable byte limit
//! - Trailing bytes after an envelope are rejected

pub mod argument;
pub mod codec;
pub mod envelope;
pub mod types;
