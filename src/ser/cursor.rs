use super::path::FieldPath;
use crate::error::DecodingError;
use crate::repr::Representation;

/// Cursor over encoded units providing structured reads with path context.
#[derive(Debug, Clone, Copy)]
pub struct UnitReader<'a> {
    repr: Representation,
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> UnitReader<'a> {
    /// Creates a new cursor over the provided units.
    pub fn new(repr: Representation, bytes: &'a [u8]) -> Self {
        Self {
            repr,
            bytes,
            offset: 0,
        }
    }

    /// Representation the cursor interprets.
    pub fn representation(&self) -> Representation {
        self.repr
    }

    /// Returns the current offset within the slice.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Returns the number of units remaining in the cursor.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Takes exactly `len` raw units from the cursor.
    pub fn take(&mut self, len: usize, path: &FieldPath<'_>) -> Result<&'a [u8], DecodingError> {
        if len > self.remaining() {
            return Err(DecodingError::UnexpectedEnd {
                path: path.render(),
            });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..start + len])
    }

    /// Reads a big-endian unsigned integer of `width` bytes.
    pub fn read_uint(&mut self, width: usize, path: &FieldPath<'_>) -> Result<u64, DecodingError> {
        let units = self.take(self.repr.units(width), path)?;
        match self.repr {
            Representation::Bytes => Ok(units
                .iter()
                .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))),
            Representation::Bits => units.iter().try_fold(0u64, |acc, &bit| match bit {
                0 | 1 => Ok((acc << 1) | u64::from(bit)),
                value => Err(DecodingError::InvalidBit {
                    path: path.render(),
                    value,
                }),
            }),
        }
    }

    /// Reads a boolean unit encoded as `0` or `1`.
    pub fn read_bool(&mut self, path: &FieldPath<'_>) -> Result<bool, DecodingError> {
        match self.take(1, path)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodingError::InvalidBoolean {
                path: path.render(),
                value,
            }),
        }
    }

    /// Reads `len` logical bytes, reassembling them from bits when needed.
    pub fn read_bytes(&mut self, len: usize, path: &FieldPath<'_>) -> Result<Vec<u8>, DecodingError> {
        match self.repr {
            Representation::Bytes => Ok(self.take(len, path)?.to_vec()),
            Representation::Bits => {
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    out.push(self.read_uint(1, path)? as u8);
                }
                Ok(out)
            }
        }
    }

    /// Consumes `len` units that must all be zero.
    pub fn expect_zero_units(&mut self, len: usize, path: &FieldPath<'_>) -> Result<(), DecodingError> {
        let units = self.take(len, path)?;
        if units.iter().all(|&unit| unit == 0) {
            Ok(())
        } else {
            Err(DecodingError::CorruptPadding {
                path: path.render(),
            })
        }
    }

    /// Consumes units that must equal `expected` byte for byte.
    pub fn expect_units(&mut self, expected: &[u8], path: &FieldPath<'_>) -> Result<(), DecodingError> {
        if self.take(expected.len(), path)? == expected {
            Ok(())
        } else {
            Err(DecodingError::CorruptPadding {
                path: path.render(),
            })
        }
    }
}
