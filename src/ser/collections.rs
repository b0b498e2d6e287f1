use super::cursor::UnitReader;
use super::ints;
use super::path::FieldPath;
use super::writer::UnitWriter;
use crate::error::{DecodingError, EncodingError};

/// Writes `items` behind a `u32` count prefix and pads the remaining
/// `capacity - items.len()` slots with `default_units`.
///
/// `default_units` must be the encoding of the element default in the
/// writer's representation.
pub fn write_fixed_list<T, F>(
    out: &mut UnitWriter,
    items: &[T],
    capacity: u32,
    default_units: &[u8],
    path: &FieldPath<'_>,
    mut write_item: F,
) -> Result<(), EncodingError>
where
    F: FnMut(&mut UnitWriter, &T, &FieldPath<'_>) -> Result<(), EncodingError>,
{
    if items.len() > capacity as usize {
        return Err(EncodingError::CapacityExceeded {
            path: path.render(),
            actual: items.len(),
            allowed: capacity,
        });
    }
    ints::write_u32(out, ints::length_prefix(items.len()));
    for (index, item) in items.iter().enumerate() {
        write_item(out, item, &path.index(index))?;
    }
    for _ in items.len()..capacity as usize {
        out.write_units(default_units);
    }
    Ok(())
}

/// Reads a list written by [`write_fixed_list`], validating the prefix and
/// every padding slot.
pub fn read_fixed_list<T, F>(
    cursor: &mut UnitReader<'_>,
    capacity: u32,
    default_units: &[u8],
    path: &FieldPath<'_>,
    mut read_item: F,
) -> Result<Vec<T>, DecodingError>
where
    F: FnMut(&mut UnitReader<'_>, &FieldPath<'_>) -> Result<T, DecodingError>,
{
    let length = ints::read_u32(cursor, path)?;
    if length > capacity {
        return Err(DecodingError::PrefixExceedsCapacity {
            path: path.render(),
            length,
            capacity,
        });
    }
    let mut out = Vec::with_capacity(length as usize);
    for index in 0..length as usize {
        out.push(read_item(cursor, &path.index(index))?);
    }
    for index in length as usize..capacity as usize {
        cursor.expect_units(default_units, &path.index(index))?;
    }
    Ok(out)
}

/// Writes exactly `len` items without a prefix.
pub fn write_fixed_array<T, F>(
    out: &mut UnitWriter,
    items: &[T],
    len: u32,
    path: &FieldPath<'_>,
    mut write_item: F,
) -> Result<(), EncodingError>
where
    F: FnMut(&mut UnitWriter, &T, &FieldPath<'_>) -> Result<(), EncodingError>,
{
    if items.len() != len as usize {
        return Err(EncodingError::ArrayLength {
            path: path.render(),
            expected: len,
            actual: items.len(),
        });
    }
    for (index, item) in items.iter().enumerate() {
        write_item(out, item, &path.index(index))?;
    }
    Ok(())
}

/// Reads exactly `len` items without a prefix.
pub fn read_fixed_array<T, F>(
    cursor: &mut UnitReader<'_>,
    len: u32,
    path: &FieldPath<'_>,
    mut read_item: F,
) -> Result<Vec<T>, DecodingError>
where
    F: FnMut(&mut UnitReader<'_>, &FieldPath<'_>) -> Result<T, DecodingError>,
{
    let mut out = Vec::with_capacity(len as usize);
    for index in 0..len as usize {
        out.push(read_item(cursor, &path.index(index))?);
    }
    Ok(out)
}

/// Writes an optional value as a presence flag followed by either the value
/// or `default_units`.
pub fn write_option<T, F>(
    out: &mut UnitWriter,
    value: Option<&T>,
    default_units: &[u8],
    path: &FieldPath<'_>,
    mut write: F,
) -> Result<(), EncodingError>
where
    F: FnMut(&mut UnitWriter, &T, &FieldPath<'_>) -> Result<(), EncodingError>,
{
    match value {
        Some(inner) => {
            ints::write_bool(out, true);
            write(out, inner, path)?;
        }
        None => {
            ints::write_bool(out, false);
            out.write_units(default_units);
        }
    }
    Ok(())
}

/// Reads an optional value written by [`write_option`].
pub fn read_option<T, F>(
    cursor: &mut UnitReader<'_>,
    default_units: &[u8],
    path: &FieldPath<'_>,
    mut read: F,
) -> Result<Option<T>, DecodingError>
where
    F: FnMut(&mut UnitReader<'_>, &FieldPath<'_>) -> Result<T, DecodingError>,
{
    if ints::read_bool(cursor, path)? {
        Ok(Some(read(cursor, path)?))
    } else {
        cursor.expect_units(default_units, path)?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::Representation;

    fn write_int(out: &mut UnitWriter, value: &i32, _: &FieldPath<'_>) -> Result<(), EncodingError> {
        ints::write_i32(out, *value);
        Ok(())
    }

    fn read_int(cursor: &mut UnitReader<'_>, path: &FieldPath<'_>) -> Result<i32, DecodingError> {
        ints::read_i32(cursor, path)
    }

    #[test]
    fn pads_with_default_slots() {
        let root = FieldPath::root("values");
        let mut out = UnitWriter::new(Representation::Bytes);
        write_fixed_list(&mut out, &[1, 2], 3, &[0; 4], &root, write_int).unwrap();
        let bytes = out.into_bytes();
        assert_eq!(
            bytes,
            vec![0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 0]
        );

        let mut cursor = UnitReader::new(Representation::Bytes, &bytes);
        let values = read_fixed_list(&mut cursor, 3, &[0; 4], &root, read_int).unwrap();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn overflow_is_rejected_not_truncated() {
        let root = FieldPath::root("values");
        let mut out = UnitWriter::new(Representation::Bytes);
        let err = write_fixed_list(&mut out, &[1, 2, 3], 2, &[0; 4], &root, write_int)
            .expect_err("capacity 2");
        assert_eq!(
            err,
            EncodingError::CapacityExceeded {
                path: "values".into(),
                actual: 3,
                allowed: 2
            }
        );
    }

    #[test]
    fn dirty_padding_is_rejected() {
        let root = FieldPath::root("values");
        let bytes = [0, 0, 0, 1, 0, 0, 0, 7, 0, 0, 0, 9];
        let mut cursor = UnitReader::new(Representation::Bytes, &bytes);
        let err = read_fixed_list(&mut cursor, 2, &[0; 4], &root, read_int).expect_err("padding");
        assert_eq!(
            err,
            DecodingError::CorruptPadding {
                path: "values[1]".into()
            }
        );
    }

    #[test]
    fn prefix_above_capacity_is_rejected() {
        let root = FieldPath::root("values");
        let bytes = [0, 0, 0, 3, 0, 0, 0, 0];
        let mut cursor = UnitReader::new(Representation::Bytes, &bytes);
        let err = read_fixed_list(&mut cursor, 1, &[0; 4], &root, read_int).expect_err("prefix");
        assert!(matches!(
            err,
            DecodingError::PrefixExceedsCapacity {
                length: 3,
                capacity: 1,
                ..
            }
        ));
    }
}
