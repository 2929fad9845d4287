//! Tests for the row codec
//!
//! These tests verify:
//! - Encode/decode round trip
//! - Field length boundaries
//! - Id validation
//! - Fixed serialized width

use leafdb::error::Field;
use leafdb::row::{self, Row, EMAIL_SIZE, ROW_SIZE, USERNAME_SIZE};
use leafdb::LeafError;

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip() {
    let original = Row::new(1, "user1", "person1@example.com");

    let bytes = row::encode(&original).unwrap();
    let decoded = row::decode(&bytes).unwrap();

    assert_eq!(decoded, original);
}

#[test]
fn test_round_trip_maximum_lengths() {
    let original = Row::new(u32::MAX as i64, "a".repeat(USERNAME_SIZE), "a".repeat(EMAIL_SIZE));

    let bytes = row::encode(&original).unwrap();
    let decoded = row::decode(&bytes).unwrap();

    assert_eq!(decoded, original);
}

#[test]
fn test_round_trip_empty_strings() {
    let original = Row::new(3, "", "");

    let decoded = row::decode(&row::encode(&original).unwrap()).unwrap();

    assert_eq!(decoded, original);
}

#[test]
fn test_encoded_width_is_constant() {
    let short = row::encode(&Row::new(1, "a", "b")).unwrap();
    let long = row::encode(&Row::new(2, "a".repeat(32), "b".repeat(255))).unwrap();

    assert_eq!(short.len(), ROW_SIZE);
    assert_eq!(long.len(), ROW_SIZE);
    assert_eq!(ROW_SIZE, 291);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_username_too_long() {
    let row = Row::new(1, "a".repeat(USERNAME_SIZE + 1), "x@y.z");

    let err = row::encode(&row).unwrap_err();

    assert!(matches!(err, LeafError::FieldTooLong(Field::Username)));
    assert_eq!(err.to_string(), "username too long");
}

#[test]
fn test_email_too_long() {
    let row = Row::new(1, "a".repeat(USERNAME_SIZE), "a".repeat(EMAIL_SIZE + 1));

    let err = row::encode(&row).unwrap_err();

    assert!(matches!(err, LeafError::FieldTooLong(Field::Email)));
    assert_eq!(err.to_string(), "email too long");
}

#[test]
fn test_length_is_measured_in_bytes() {
    // 16 two-byte characters fill the slot exactly, 17 overflow it
    assert!(row::validate(&Row::new(1, "é".repeat(16), "e")).is_ok());
    assert!(matches!(
        row::validate(&Row::new(1, "é".repeat(17), "e")),
        Err(LeafError::FieldTooLong(Field::Username))
    ));
}

#[test]
fn test_nul_bytes_rejected() {
    let err = row::encode(&Row::new(1, "a\0b", "e")).unwrap_err();
    assert!(matches!(err, LeafError::FieldContainsNul(Field::Username)));
    assert_eq!(err.to_string(), "username can't contain NUL bytes");
    assert!(!err.is_fatal());

    assert!(matches!(
        row::validate(&Row::new(1, "a", "e\0")),
        Err(LeafError::FieldContainsNul(Field::Email))
    ));
}

#[test]
fn test_encode_keyed_returns_key_and_bytes() {
    let row = Row::new(9, "user9", "person9@example.com");

    let (key, bytes) = row::encode_keyed(&row).unwrap();

    assert_eq!(key, 9);
    assert_eq!(bytes, row::encode(&row).unwrap());
    assert_eq!(row::decode(&bytes).unwrap(), row);
}

#[test]
fn test_non_positive_ids_rejected() {
    for id in [0, -1, i64::MIN] {
        let err = row::validate_id(id).unwrap_err();
        assert!(matches!(err, LeafError::NonPositiveId));
        assert_eq!(err.to_string(), "ID can't be negative or zero");
    }
}

#[test]
fn test_id_too_large_rejected() {
    let too_large = u32::MAX as i64 + 1;
    assert!(matches!(
        row::validate_id(too_large),
        Err(LeafError::IdOutOfRange(id)) if id == too_large
    ));
}

#[test]
fn test_id_checked_before_fields() {
    let row = Row::new(-5, "a".repeat(40), "b".repeat(300));
    assert!(matches!(row::validate(&row), Err(LeafError::NonPositiveId)));
}

#[test]
fn test_validate_returns_key() {
    assert_eq!(row::validate(&Row::new(42, "u", "e")).unwrap(), 42);
}

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_wrong_width() {
    let err = row::decode(&[0u8; ROW_SIZE - 1]).unwrap_err();
    assert!(matches!(err, LeafError::CorruptNode(_)));
}

#[test]
fn test_display_format() {
    let row = Row::new(1, "user1", "person1@example.com");
    assert_eq!(row.to_string(), "(1, user1, person1@example.com)");
}
