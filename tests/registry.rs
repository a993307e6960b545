//! Integration tests for codec resolution and per-type round trips

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use bytes::Bytes;
use scm_codec::codecs::{IntegerCodec, LongCodec, TextCodec};
use scm_codec::core::argument::{
    Argument, ArgumentType, BigInteger, Certificate, ManagedSecretKey,
};
use scm_codec::core::types::{names, TypeInfo};
use scm_codec::error::CodecError;
use scm_codec::protocol::messages::{DeletedBlocksTransaction, PipelineId, ReplicationFactor};
use scm_codec::registry::{register_defaults, CodecRegistry, RegistryBuilder};
use std::sync::Arc;
use uuid::Uuid;

fn registry() -> CodecRegistry {
    CodecRegistry::with_defaults().expect("default registry")
}

fn assert_roundtrip<T>(registry: &CodecRegistry, value: T)
where
    T: ArgumentType + PartialEq + std::fmt::Debug + Clone,
{
    let bytes = registry.encode_value(value.clone()).expect("encode");
    let decoded: T = registry.decode_value(&bytes).expect("decode");
    assert_eq!(decoded, value);
}

#[test]
fn test_roundtrip_every_builtin_type() {
    let registry = registry();

    assert_roundtrip(&registry, 0i32);
    assert_roundtrip(&registry, i32::MIN);
    assert_roundtrip(&registry, i64::MAX);
    assert_roundtrip(&registry, String::new());
    assert_roundtrip(&registry, "datanode-7.rack-2".to_string());
    assert_roundtrip(&registry, true);
    assert_roundtrip(&registry, false);
    assert_roundtrip(&registry, BigInteger::from(i128::MAX));
    assert_roundtrip(&registry, BigInteger::from(-1i64));
    assert_roundtrip(&registry, Bytes::from_static(b"\x00\xffpayload"));
    assert_roundtrip(&registry, Bytes::new());
    assert_roundtrip(
        &registry,
        Certificate::from_der(vec![0x30, 0x82, 0x03, 0x01, 0x02]).unwrap(),
    );
    assert_roundtrip(
        &registry,
        ManagedSecretKey::new(Uuid::new_v4(), 10, 20, "HmacSHA256", vec![9u8; 32]),
    );
    assert_roundtrip(&registry, PipelineId::random());
    assert_roundtrip(
        &registry,
        DeletedBlocksTransaction {
            tx_id: 77,
            container_id: 5,
            local_ids: vec![1, 2, 3],
            count: 1,
        },
    );
    assert_roundtrip(&registry, ReplicationFactor::Three);
}

#[test]
fn test_message_types_resolve_through_capability() {
    let registry = registry();
    let message_codec = registry
        .resolve(&TypeInfo::leaf(names::PROTOCOL_MESSAGE))
        .unwrap();

    for ty in [
        PipelineId::type_info(),
        DeletedBlocksTransaction::type_info(),
        TypeInfo::protocol_message("hdds.ContainerReport"),
    ] {
        assert!(!registry.contains(ty.name()));
        let resolved = registry.resolve(&ty).unwrap();
        assert!(Arc::ptr_eq(&resolved, &message_codec), "{ty} did not resolve to the message codec");
    }
}

#[test]
fn test_enum_types_resolve_through_capability() {
    let registry = registry();
    let enum_codec = registry.resolve(&TypeInfo::leaf(names::PROTOCOL_ENUM)).unwrap();
    let resolved = registry.resolve(&ReplicationFactor::type_info()).unwrap();
    assert!(Arc::ptr_eq(&resolved, &enum_codec));
}

#[test]
fn test_repeated_resolution_is_stable() {
    let registry = registry();
    let first = registry.resolve(&i64::type_info()).unwrap();
    for _ in 0..10 {
        assert!(Arc::ptr_eq(&first, &registry.resolve(&i64::type_info()).unwrap()));
    }
}

#[test]
fn test_unknown_type_not_found() {
    let registry = registry();
    match registry.resolve(&TypeInfo::leaf("float").extends("decimal")) {
        Err(CodecError::CodecNotFound(name)) => assert_eq!(name, "float"),
        other => panic!("expected CodecNotFound, got {other:?}"),
    }
}

#[test]
fn test_superclass_entry_serves_subtypes() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(names::NUMBER, Arc::new(LongCodec))
        .unwrap()
        .register(names::TEXT, Arc::new(TextCodec))
        .unwrap();
    let registry = builder.build().unwrap();

    // Integer has no entry of its own but extends "number".
    let resolved = registry.resolve(&i32::type_info()).unwrap();
    let bytes = resolved.encode(&Argument::Long(5)).unwrap();
    assert_eq!(bytes.len(), 8);
}

#[test]
fn test_exact_entry_preferred_over_superclass() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(names::NUMBER, Arc::new(LongCodec))
        .unwrap()
        .register(names::INTEGER, Arc::new(IntegerCodec))
        .unwrap();
    let registry = builder.build().unwrap();

    let bytes = registry.encode(&Argument::Integer(5)).unwrap();
    assert_eq!(&bytes[..], &[0, 0, 0, 5]);
}

#[test]
fn test_custom_registry_extends_defaults() {
    let mut builder = RegistryBuilder::new();
    register_defaults(&mut builder).unwrap();
    builder
        .register("hdds.ContainerID", Arc::new(LongCodec))
        .unwrap();
    let registry = builder.build().unwrap();

    // Exact entry beats the protocol message capability.
    let ty = TypeInfo::protocol_message("hdds.ContainerID");
    let bytes = registry.resolve(&ty).unwrap().encode(&Argument::Long(1)).unwrap();
    assert_eq!(bytes.len(), 8);
}

#[test]
fn test_registering_defaults_twice_fails() {
    let mut builder = RegistryBuilder::new();
    register_defaults(&mut builder).unwrap();
    assert!(matches!(
        register_defaults(&mut builder),
        Err(CodecError::DuplicateRegistration(_))
    ));
}

#[test]
fn test_decode_with_wrong_hint_kind() {
    let registry = registry();
    let bytes = registry.encode_value(42i32).unwrap();
    assert!(matches!(
        registry.decode_value::<i64>(&bytes),
        Err(CodecError::DeserializeError(_))
    ));
}

#[test]
fn test_message_decoded_with_other_message_hint() {
    let registry = registry();
    let bytes = registry.encode_value(PipelineId::random()).unwrap();
    // The capability codec trusts the hint; the typed conversion then fails to parse.
    assert!(registry.decode_value::<DeletedBlocksTransaction>(&bytes).is_err());
}
