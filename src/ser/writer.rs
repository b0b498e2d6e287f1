use crate::repr::Representation;

/// Output buffer that lays integers out in the configured unit representation.
#[derive(Debug, Clone)]
pub struct UnitWriter {
    repr: Representation,
    out: Vec<u8>,
}

impl UnitWriter {
    /// Creates an empty writer.
    pub fn new(repr: Representation) -> Self {
        Self {
            repr,
            out: Vec::new(),
        }
    }

    /// Creates a writer with room for `units` units.
    pub fn with_capacity(repr: Representation, units: usize) -> Self {
        Self {
            repr,
            out: Vec::with_capacity(units),
        }
    }

    /// Representation this writer emits.
    pub fn representation(&self) -> Representation {
        self.repr
    }

    /// Number of units written so far.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Writes the low `width` bytes of `value`, big-endian.
    pub fn write_uint(&mut self, value: u64, width: usize) {
        debug_assert!(width <= 8, "integer width above 8 bytes");
        match self.repr {
            Representation::Bytes => {
                self.out.extend_from_slice(&value.to_be_bytes()[8 - width..]);
            }
            Representation::Bits => {
                for bit in (0..width * 8).rev() {
                    self.out.push(((value >> bit) & 1) as u8);
                }
            }
        }
    }

    /// Writes a boolean as a single `0`/`1` unit.
    pub fn write_bool(&mut self, value: bool) {
        self.out.push(u8::from(value));
    }

    /// Writes each byte of `bytes` as a one-byte integer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        match self.repr {
            Representation::Bytes => self.out.extend_from_slice(bytes),
            Representation::Bits => {
                for &byte in bytes {
                    self.write_uint(u64::from(byte), 1);
                }
            }
        }
    }

    /// Copies units that were already laid out in this representation.
    pub fn write_units(&mut self, units: &[u8]) {
        self.out.extend_from_slice(units);
    }

    /// Appends `count` zero units.
    pub fn write_zero_units(&mut self, count: usize) {
        self.out.resize(self.out.len() + count, 0);
    }

    /// Consumes the writer and returns the encoded units.
    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}
