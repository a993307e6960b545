//! Codecs for security material: X.509 certificates and managed secret keys.

use crate::core::argument::{Argument, ArgumentType, Certificate, ManagedSecretKey};
use crate::core::codec::Codec;
use crate::core::envelope::record_options;
use crate::core::types::{names, TypeInfo};
use crate::error::{CodecError, Result};
use bincode::Options;
use bytes::Bytes;

/// Certificate as its DER encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct CertificateCodec;

impl Codec for CertificateCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::Certificate(cert) => Ok(cert.der().clone()),
            other => Err(CodecError::unexpected(
                names::CERTIFICATE.as_str(),
                other.type_name().as_str(),
            )),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        Certificate::from_der(Bytes::copy_from_slice(bytes))?.into_argument()
    }
}

/// Secret key record, bincode-encoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecretKeyCodec;

impl Codec for SecretKeyCodec {
    fn encode(&self, value: &Argument) -> Result<Bytes> {
        match value {
            Argument::SecretKey(key) => Ok(Bytes::from(record_options().serialize(key)?)),
            other => Err(CodecError::unexpected(
                names::SECRET_KEY.as_str(),
                other.type_name().as_str(),
            )),
        }
    }

    fn decode(&self, bytes: &[u8], _hint: &TypeInfo) -> Result<Argument> {
        let key: ManagedSecretKey = record_options().deserialize(bytes)?;
        Ok(Argument::SecretKey(key))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_certificate_roundtrip() {
        let cert = Certificate::from_der(vec![0x30, 0x82, 0x01, 0x0A]).unwrap();
        let value = Argument::Certificate(cert);
        let bytes = CertificateCodec.encode(&value).unwrap();
        assert_eq!(&bytes[..], &[0x30, 0x82, 0x01, 0x0A]);
        let decoded = CertificateCodec
            .decode(&bytes, &Certificate::type_info())
            .unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_empty_certificate_rejected() {
        assert!(CertificateCodec
            .decode(&[], &Certificate::type_info())
            .is_err());
    }

    #[test]
    fn test_secret_key_roundtrip() {
        let key = ManagedSecretKey::new(
            Uuid::new_v4(),
            1_700_000_000_000,
            1_700_086_400_000,
            "HmacSHA256",
            vec![7u8; 32],
        );
        let value = Argument::SecretKey(key);
        let bytes = SecretKeyCodec.encode(&value).unwrap();
        let decoded = SecretKeyCodec
            .decode(&bytes, &ManagedSecretKey::type_info())
            .unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_truncated_secret_key_rejected() {
        let key = ManagedSecretKey::new(Uuid::nil(), 0, 1, "AES", vec![1, 2, 3]);
        let bytes = SecretKeyCodec.encode(&Argument::SecretKey(key)).unwrap();
        assert!(matches!(
            SecretKeyCodec.decode(&bytes[..bytes.len() - 2], &ManagedSecretKey::type_info()),
            Err(CodecError::Serialization(_))
        ));
    }

    #[test]
    fn test_secret_key_with_trailing_bytes_rejected() {
        let key = ManagedSecretKey::new(Uuid::nil(), 0, 1, "AES", vec![1, 2, 3]);
        let mut bytes = SecretKeyCodec
            .encode(&Argument::SecretKey(key))
            .unwrap()
            .to_vec();
        bytes.push(0);
        assert!(matches!(
            SecretKeyCodec.decode(&bytes, &ManagedSecretKey::type_info()),
            Err(CodecError::Serialization(_))
        ));
    }
}
