use super::cursor::UnitReader;
use super::path::FieldPath;
use super::writer::UnitWriter;
use crate::error::DecodingError;

/// Encodes an `i8` as one big-endian byte.
pub fn write_i8(out: &mut UnitWriter, value: i8) {
    out.write_uint(u64::from(value as u8), 1);
}

/// Encodes an `i16` in big-endian order.
pub fn write_i16(out: &mut UnitWriter, value: i16) {
    out.write_uint(u64::from(value as u16), 2);
}

/// Encodes an `i32` in big-endian order.
pub fn write_i32(out: &mut UnitWriter, value: i32) {
    out.write_uint(u64::from(value as u32), 4);
}

/// Encodes an `i64` in big-endian order.
pub fn write_i64(out: &mut UnitWriter, value: i64) {
    out.write_uint(value as u64, 8);
}

/// Encodes a `u32` length prefix or tag in big-endian order.
pub fn write_u32(out: &mut UnitWriter, value: u32) {
    out.write_uint(u64::from(value), 4);
}

/// Writes a boolean flag as a single unit.
pub fn write_bool(out: &mut UnitWriter, value: bool) {
    out.write_bool(value);
}

/// Converts a runtime length into a `u32` prefix.
///
/// Lengths reaching this point were already checked against a `u32`
/// capacity, so the conversion saturates instead of failing.
pub fn length_prefix(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Reads an `i8`.
pub fn read_i8(cursor: &mut UnitReader<'_>, path: &FieldPath<'_>) -> Result<i8, DecodingError> {
    Ok(cursor.read_uint(1, path)? as u8 as i8)
}

/// Reads an `i16` in big-endian order.
pub fn read_i16(cursor: &mut UnitReader<'_>, path: &FieldPath<'_>) -> Result<i16, DecodingError> {
    Ok(cursor.read_uint(2, path)? as u16 as i16)
}

/// Reads an `i32` in big-endian order.
pub fn read_i32(cursor: &mut UnitReader<'_>, path: &FieldPath<'_>) -> Result<i32, DecodingError> {
    Ok(cursor.read_uint(4, path)? as u32 as i32)
}

/// Reads an `i64` in big-endian order.
pub fn read_i64(cursor: &mut UnitReader<'_>, path: &FieldPath<'_>) -> Result<i64, DecodingError> {
    Ok(cursor.read_uint(8, path)? as i64)
}

/// Reads a `u32` length prefix or tag in big-endian order.
pub fn read_u32(cursor: &mut UnitReader<'_>, path: &FieldPath<'_>) -> Result<u32, DecodingError> {
    Ok(cursor.read_uint(4, path)? as u32)
}

/// Reads a boolean flag encoded as `0` or `1`.
pub fn read_bool(cursor: &mut UnitReader<'_>, path: &FieldPath<'_>) -> Result<bool, DecodingError> {
    cursor.read_bool(path)
}
