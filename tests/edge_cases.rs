#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests: malformed envelopes, size limits, boundary values and
//! argument/codec kind mismatches.

use scm_codec::config::CodecConfig;
use scm_codec::core::argument::{Argument, ArgumentType, BigInteger, ListArgument};
use scm_codec::core::envelope::ListEnvelope;
use scm_codec::core::types::{names, TypeInfo};
use scm_codec::error::CodecError;
use scm_codec::protocol::messages::ReplicationFactor;
use scm_codec::registry::CodecRegistry;

const LIMIT: u64 = 16 * 1024 * 1024;

fn registry() -> CodecRegistry {
    CodecRegistry::with_defaults().expect("default registry")
}

// ============================================================================
// ENVELOPE EDGE CASES
// ============================================================================

#[test]
fn test_empty_input_rejected() {
    let registry = registry();
    let integers = registry.list_codec(&names::INTEGER).unwrap();
    assert!(matches!(
        integers.decode_items(&[]),
        Err(CodecError::Serialization(_))
    ));
}

#[test]
fn test_length_prefix_claiming_huge_tag_rejected() {
    // presence flag, then a tag length far beyond the input
    let mut bytes = vec![1u8];
    bytes.extend_from_slice(&u64::MAX.to_le_bytes());
    bytes.extend_from_slice(b"integer");

    let registry = registry();
    let integers = registry.list_codec(&names::INTEGER).unwrap();
    assert!(matches!(
        integers.decode_items(&bytes),
        Err(CodecError::Serialization(_))
    ));
}

#[test]
fn test_value_count_beyond_input_rejected() {
    let mut bytes = ListEnvelope::tagged("integer").to_bytes(LIMIT).unwrap().to_vec();
    // Overwrite the trailing value count with a huge number.
    let count_at = bytes.len() - 8;
    bytes[count_at..].copy_from_slice(&(1u64 << 40).to_le_bytes());

    let registry = registry();
    let integers = registry.list_codec(&names::INTEGER).unwrap();
    assert!(integers.decode_items(&bytes).is_err());
}

#[test]
fn test_envelope_over_configured_limit_rejected() {
    let config = CodecConfig::default_with_overrides(|c| c.limits.max_envelope_bytes = 4096);
    let small = CodecRegistry::from_config(&config).unwrap();
    let large = registry();

    let texts = large.list_codec(&names::TEXT).unwrap();
    let bytes = texts.encode_values(vec!["z".repeat(8192)]).unwrap();
    assert!(matches!(
        small.decode(&bytes, &TypeInfo::leaf(names::LIST)),
        Err(CodecError::Serialization(_))
    ));
    assert!(large.decode(&bytes, &TypeInfo::leaf(names::LIST)).is_ok());
}

#[test]
fn test_non_ascii_tag_mismatch_reported_verbatim() {
    let bytes = ListEnvelope {
        type_tag: Some("entier-é".to_string()),
        values: vec![vec![0, 0, 0, 1]],
    }
    .to_bytes(LIMIT)
    .unwrap();

    let registry = registry();
    let integers = registry.list_codec(&names::INTEGER).unwrap();
    match integers.decode_items(&bytes) {
        Err(CodecError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, "integer");
            assert_eq!(actual, "entier-é");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn test_large_list_preserves_order() {
    let registry = registry();
    let longs = registry.list_codec(&names::LONG).unwrap();
    let values: Vec<i64> = (0..10_000).rev().collect();
    let bytes = longs.encode_values(values.clone()).unwrap();
    assert_eq!(longs.decode_values::<i64>(&bytes).unwrap(), values);
}

// ============================================================================
// VALUE EDGE CASES
// ============================================================================

#[test]
fn test_big_integer_beyond_i128() {
    let mut magnitude = vec![0x7F];
    magnitude.extend_from_slice(&[0xFF; 40]);
    let value = BigInteger::from_be_bytes(&magnitude).unwrap();

    let registry = registry();
    let bytes = registry.encode_value(value.clone()).unwrap();
    assert_eq!(bytes.len(), 41);
    let decoded: BigInteger = registry.decode_value(&bytes).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(decoded.to_i128(), None);
}

#[test]
fn test_unknown_enum_number_rejected() {
    let registry = registry();
    let bytes = registry.encode_value(7i32).unwrap();
    // Same 4-byte layout as an enum number, but 7 is not a replication factor.
    assert!(registry.decode_value::<ReplicationFactor>(&bytes).is_err());
}

#[test]
fn test_codec_rejects_other_argument_kind() {
    let registry = registry();
    let text_codec = registry.resolve(&String::type_info()).unwrap();
    match text_codec.encode(&Argument::Boolean(true)) {
        Err(CodecError::UnexpectedArgument { expected, actual }) => {
            assert_eq!(expected, "text");
            assert_eq!(actual, "boolean");
        }
        other => panic!("expected UnexpectedArgument, got {other:?}"),
    }
}

#[test]
fn test_list_codec_rejects_scalar() {
    let registry = registry();
    let list_codec = registry.resolve(&TypeInfo::leaf(names::LIST)).unwrap();
    assert!(matches!(
        list_codec.encode(&Argument::Integer(1)),
        Err(CodecError::UnexpectedArgument { .. })
    ));
}

#[test]
fn test_list_with_mixed_elements_fails_on_first_foreign_item() {
    let items = vec![
        Argument::Integer(1),
        Argument::Text("two".into()),
        Argument::Boolean(true),
    ];
    match ListArgument::new(names::INTEGER, items.clone()) {
        Err(CodecError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, "integer");
            assert_eq!(actual, "text");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }

    let registry = registry();
    let integers = registry.list_codec(&names::INTEGER).unwrap();
    assert!(matches!(
        integers.encode_items(&items),
        Err(CodecError::TypeMismatch { .. })
    ));
}

#[test]
fn test_configured_limit_applies_on_receive_path() {
    let config = CodecConfig::default_with_overrides(|c| c.limits.max_envelope_bytes = 1024);
    let small = CodecRegistry::from_config(&config).unwrap();
    let large = registry();

    let texts = large.list_codec(&names::TEXT).unwrap();
    let values: Vec<String> = (0..100).map(|n| format!("{n:04}-{}", "x".repeat(995))).collect();
    let bytes = texts.encode_values(values.clone()).unwrap();
    assert!(bytes.len() > 100_000);

    assert!(matches!(
        small.decode(&bytes, &TypeInfo::leaf(names::LIST)),
        Err(CodecError::Serialization(_))
    ));
    let small_texts = small.list_codec(&names::TEXT).unwrap();
    assert!(matches!(
        small_texts.decode_values::<String>(&bytes),
        Err(CodecError::Serialization(_))
    ));
    assert_eq!(small.metrics().snapshot().list_decode_failures, 2);

    assert_eq!(texts.decode_values::<String>(&bytes).unwrap(), values);
}

#[test]
fn test_configured_limit_applies_on_send_path() {
    let config = CodecConfig::default_with_overrides(|c| c.limits.max_envelope_bytes = 1024);
    let small = CodecRegistry::from_config(&config).unwrap();
    let texts = small.list_codec(&names::TEXT).unwrap();
    assert!(matches!(
        texts.encode_values(vec!["y".repeat(2048)]),
        Err(CodecError::Serialization(_))
    ));
}
