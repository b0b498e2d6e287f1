use super::cursor::UnitReader;
use super::ints;
use super::path::FieldPath;
use super::writer::UnitWriter;
use crate::config::{FIXED_WIDTH_FILLER, UTF16_FILLER, UTF8_FILLER};
use crate::error::{DecodingError, EncodingError};
use crate::schema::Charset;

impl Charset {
    /// Returns `true` for charsets whose capacity is counted in bytes.
    pub const fn is_variable_width(self) -> bool {
        matches!(self, Charset::Utf8 | Charset::Utf16)
    }

    /// Bytes occupied by one unit of capacity.
    pub const fn unit_width(self) -> usize {
        match self {
            Charset::Utf32 => 4,
            _ => 1,
        }
    }

    /// Name of the unit the capacity is counted in.
    pub const fn capacity_unit(self) -> &'static str {
        if self.is_variable_width() {
            "bytes"
        } else {
            "characters"
        }
    }

    /// Size of the content block reserved for `capacity`.
    pub fn capacity_bytes(self, capacity: u32) -> Option<usize> {
        (capacity as usize).checked_mul(self.unit_width())
    }
}

fn unencodable(path: &FieldPath<'_>, charset: Charset, ch: char) -> EncodingError {
    EncodingError::UnencodableChar {
        path: path.render(),
        charset,
        ch,
    }
}

/// Encodes `text` into charset bytes and returns them with the prefix value.
fn encode_content(
    text: &str,
    charset: Charset,
    path: &FieldPath<'_>,
) -> Result<(Vec<u8>, usize), EncodingError> {
    match charset {
        Charset::Ascii => {
            let mut out = Vec::with_capacity(text.len());
            for ch in text.chars() {
                if !ch.is_ascii() {
                    return Err(unencodable(path, charset, ch));
                }
                out.push(ch as u8);
            }
            let count = out.len();
            Ok((out, count))
        }
        Charset::Latin1 => {
            let mut out = Vec::with_capacity(text.len());
            for ch in text.chars() {
                let code = u32::from(ch);
                if code > 0xff {
                    return Err(unencodable(path, charset, ch));
                }
                out.push(code as u8);
            }
            let count = out.len();
            Ok((out, count))
        }
        Charset::Utf32 => {
            let mut out = Vec::with_capacity(text.len() * 4);
            let mut count = 0;
            for ch in text.chars() {
                out.extend_from_slice(&u32::from(ch).to_be_bytes());
                count += 1;
            }
            Ok((out, count))
        }
        Charset::Utf8 => {
            let out = text.as_bytes().to_vec();
            let count = out.len();
            Ok((out, count))
        }
        Charset::Utf16 => {
            let out: Vec<u8> = text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect();
            let count = out.len();
            Ok((out, count))
        }
    }
}

fn decode_content(bytes: &[u8], charset: Charset) -> Option<String> {
    match charset {
        Charset::Ascii => bytes
            .iter()
            .map(|&byte| byte.is_ascii().then_some(byte as char))
            .collect(),
        Charset::Latin1 => Some(bytes.iter().map(|&byte| byte as char).collect()),
        Charset::Utf32 => bytes
            .chunks_exact(4)
            .map(|chunk| char::from_u32(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
            .collect(),
        Charset::Utf8 => String::from_utf8(bytes.to_vec()).ok(),
        Charset::Utf16 => {
            let units = bytes
                .chunks_exact(2)
                .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]));
            char::decode_utf16(units).collect::<Result<String, _>>().ok()
        }
    }
}

/// Canonical filler occupying `len` bytes after the content of `charset`.
///
/// UTF-8 uses `0xFF`, which never occurs in UTF-8. UTF-16 uses an unpaired
/// low surrogate, which never follows complete UTF-16 content.
pub fn filler(charset: Charset, len: usize) -> Vec<u8> {
    match charset {
        Charset::Utf8 => vec![UTF8_FILLER; len],
        Charset::Utf16 => UTF16_FILLER
            .to_be_bytes()
            .iter()
            .copied()
            .cycle()
            .take(len)
            .collect(),
        Charset::Ascii | Charset::Latin1 | Charset::Utf32 => vec![FIXED_WIDTH_FILLER; len],
    }
}

/// Writes `text` as `[u32 prefix][content][filler]` occupying the full
/// capacity block.
pub fn write_text(
    out: &mut UnitWriter,
    text: &str,
    charset: Charset,
    capacity: u32,
    path: &FieldPath<'_>,
) -> Result<(), EncodingError> {
    let (content, prefix) = encode_content(text, charset, path)?;
    if prefix > capacity as usize {
        return Err(EncodingError::TextTooLong {
            path: path.render(),
            charset,
            unit: charset.capacity_unit(),
            actual: prefix,
            allowed: capacity,
        });
    }
    let block = capacity as usize * charset.unit_width();
    ints::write_u32(out, ints::length_prefix(prefix));
    out.write_bytes(&content);
    out.write_bytes(&filler(charset, block - content.len()));
    Ok(())
}

/// Writes the encoding of the empty string.
pub fn write_empty_text(out: &mut UnitWriter, charset: Charset, capacity: u32) {
    ints::write_u32(out, 0);
    out.write_bytes(&filler(charset, capacity as usize * charset.unit_width()));
}

/// Reads a text value written by [`write_text`].
pub fn read_text(
    cursor: &mut UnitReader<'_>,
    charset: Charset,
    capacity: u32,
    path: &FieldPath<'_>,
) -> Result<String, DecodingError> {
    let prefix = ints::read_u32(cursor, path)?;
    if prefix > capacity {
        return Err(DecodingError::PrefixExceedsCapacity {
            path: path.render(),
            length: prefix,
            capacity,
        });
    }
    let invalid = || DecodingError::InvalidText {
        path: path.render(),
        charset,
    };
    let content_len = prefix as usize * charset.unit_width();
    if charset == Charset::Utf16 && content_len % 2 != 0 {
        return Err(invalid());
    }
    let block = cursor.read_bytes(capacity as usize * charset.unit_width(), path)?;
    let (content, padding) = block.split_at(content_len);
    if padding != filler(charset, padding.len()).as_slice() {
        return Err(DecodingError::CorruptPadding {
            path: path.render(),
        });
    }
    decode_content(content, charset).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::Representation;

    fn encode(text: &str, charset: Charset, capacity: u32) -> Result<Vec<u8>, EncodingError> {
        let mut out = UnitWriter::new(Representation::Bytes);
        write_text(&mut out, text, charset, capacity, &FieldPath::root("memo"))?;
        Ok(out.into_bytes())
    }

    fn decode(bytes: &[u8], charset: Charset, capacity: u32) -> Result<String, DecodingError> {
        let mut cursor = UnitReader::new(Representation::Bytes, bytes);
        read_text(&mut cursor, charset, capacity, &FieldPath::root("memo"))
    }

    #[test]
    fn ascii_layout() {
        let bytes = encode("ab", Charset::Ascii, 4).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 2, 97, 98, 0, 0]);
        assert_eq!(decode(&bytes, Charset::Ascii, 4).unwrap(), "ab");
    }

    #[test]
    fn ascii_refuses_to_substitute() {
        let err = encode("é", Charset::Ascii, 4).expect_err("non-ascii");
        assert!(matches!(err, EncodingError::UnencodableChar { ch: 'é', .. }));
        let err = encode("€", Charset::Latin1, 4).expect_err("non-latin1");
        assert!(matches!(err, EncodingError::UnencodableChar { ch: '€', .. }));
        assert_eq!(encode("é", Charset::Latin1, 1).unwrap(), vec![0, 0, 0, 1, 0xe9]);
    }

    #[test]
    fn utf8_capacity_is_counted_in_bytes() {
        // "éé" is two characters but four bytes.
        let err = encode("éé", Charset::Utf8, 3).expect_err("four bytes");
        assert_eq!(
            err,
            EncodingError::TextTooLong {
                path: "memo".into(),
                charset: Charset::Utf8,
                unit: "bytes",
                actual: 4,
                allowed: 3,
            }
        );
        let bytes = encode("é", Charset::Utf8, 3).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 2, 0xc3, 0xa9, 0xff]);
        assert_eq!(decode(&bytes, Charset::Utf8, 3).unwrap(), "é");
    }

    #[test]
    fn utf16_uses_low_surrogate_filler() {
        let bytes = encode("a", Charset::Utf16, 6).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 2, 0x00, 0x61, 0xdc, 0x00, 0xdc, 0x00]);
        assert_eq!(decode(&bytes, Charset::Utf16, 6).unwrap(), "a");

        let pair = encode("😀", Charset::Utf16, 4).unwrap();
        assert_eq!(decode(&pair, Charset::Utf16, 4).unwrap(), "😀");
    }

    #[test]
    fn utf32_counts_characters() {
        let bytes = encode("😀x", Charset::Utf32, 2).unwrap();
        assert_eq!(bytes.len(), 4 + 8);
        assert_eq!(decode(&bytes, Charset::Utf32, 2).unwrap(), "😀x");
        assert!(encode("abc", Charset::Utf32, 2).is_err());
    }

    #[test]
    fn rejects_foreign_filler_and_invalid_content() {
        let err = decode(&[0, 0, 0, 1, 97, 0xff], Charset::Ascii, 2).expect_err("filler");
        assert!(matches!(err, DecodingError::CorruptPadding { .. }));

        let err = decode(&[0, 0, 0, 1, 0xc3, 0xff], Charset::Utf8, 2).expect_err("utf8");
        assert!(matches!(err, DecodingError::InvalidText { .. }));

        let err = decode(&[0, 0, 0, 1, 0x80], Charset::Ascii, 1).expect_err("ascii");
        assert!(matches!(err, DecodingError::InvalidText { .. }));
    }
}
