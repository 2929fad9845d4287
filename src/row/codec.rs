//! Row codec
//!
//! Validation and fixed-width encoding of rows.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Field, LeafError, Result};

use super::{Row, EMAIL_SIZE, ROW_SIZE, USERNAME_SIZE};

/// Check that an id can be used as a key and return it in stored form
pub fn validate_id(id: i64) -> Result<u32> {
    if id <= 0 {
        return Err(LeafError::NonPositiveId);
    }
    u32::try_from(id).map_err(|_| LeafError::IdOutOfRange(id))
}

/// Validate every field of a row
///
/// Checks run id, username, email, and the first failure wins.
/// Returns the key the row will be stored under.
pub fn validate(row: &Row) -> Result<u32> {
    let key = validate_id(row.id)?;
    validate_field(&row.username, USERNAME_SIZE, Field::Username)?;
    validate_field(&row.email, EMAIL_SIZE, Field::Email)?;
    Ok(key)
}

/// Encode a row into its fixed-width form
///
/// Nothing is written unless the whole row validates.
pub fn encode(row: &Row) -> Result<Bytes> {
    encode_keyed(row).map(|(_, bytes)| bytes)
}

/// Validate and encode a row, returning the key alongside the bytes
pub fn encode_keyed(row: &Row) -> Result<(u32, Bytes)> {
    let key = validate(row)?;

    let mut buf = BytesMut::with_capacity(ROW_SIZE);
    buf.put_u32_le(key);
    put_padded(&mut buf, row.username.as_bytes(), USERNAME_SIZE);
    put_padded(&mut buf, row.email.as_bytes(), EMAIL_SIZE);

    debug_assert_eq!(buf.len(), ROW_SIZE);
    Ok((key, buf.freeze()))
}

/// Decode a row from exactly `ROW_SIZE` bytes
pub fn decode(bytes: &[u8]) -> Result<Row> {
    if bytes.len() != ROW_SIZE {
        return Err(LeafError::CorruptNode(format!(
            "row slot is {} bytes, expected {}",
            bytes.len(),
            ROW_SIZE
        )));
    }

    let mut buf = bytes;
    let id = buf.get_u32_le();
    let username = take_padded(&mut buf, USERNAME_SIZE);
    let email = take_padded(&mut buf, EMAIL_SIZE);

    Ok(Row {
        id: i64::from(id),
        username,
        email,
    })
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Slots are NUL padded, so a NUL inside the value would truncate it
fn validate_field(value: &str, width: usize, field: Field) -> Result<()> {
    if value.len() > width {
        return Err(LeafError::FieldTooLong(field));
    }
    if value.contains('\0') {
        return Err(LeafError::FieldContainsNul(field));
    }
    Ok(())
}

fn put_padded(buf: &mut BytesMut, value: &[u8], width: usize) {
    buf.put_slice(value);
    buf.put_bytes(0, width - value.len());
}

/// Read a fixed slot and strip the NUL padding
fn take_padded(buf: &mut &[u8], width: usize) -> String {
    let slot = &buf[..width];
    let len = slot.iter().position(|&b| b == 0).unwrap_or(width);
    let value = String::from_utf8_lossy(&slot[..len]).into_owned();
    buf.advance(width);
    value
}
