//! Names embedded in the header of an Access OLE object field.
//!
//! Access prefixes every OLE object with a small header. Four little-endian
//! u16 fields at offsets 8, 10, 12 and 14 give the length and position of
//! two NUL-terminated names: the object name ("Paintbrush Picture") and
//! the class name ("PBrush").
//!
//! Parsing never fails. Malformed input yields placeholder names, so a
//! damaged object still renders as a readable cell.

use crate::common::binary::{read_u16_le, BinaryError};
use crate::common::Error;

const OBJECT_SIZE_OFFSET: usize = 8;
const CLASS_SIZE_OFFSET: usize = 10;
const OBJECT_POS_OFFSET: usize = 12;
const CLASS_POS_OFFSET: usize = 14;
const MIN_HEADER_LEN: usize = 16;

pub const INVALID_HEADER: &str = "Invalid OLE Header";
pub const INVALID_DATA: &str = "Invalid OLE Data";
pub const PARSE_ERROR: &str = "OLE Parse Error";

/// Object and class names of an embedded OLE object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OleObjectHeader {
    pub object_name: String,
    pub class_name: String,
}

/// Why a header could not be turned into names
enum HeaderFault {
    /// A (position, size) pair points outside the buffer
    OutOfBounds,
    /// A field could not be read
    Read(BinaryError),
    /// A name is not valid UTF-8
    Decode(Error),
}

impl From<BinaryError> for HeaderFault {
    fn from(err: BinaryError) -> Self {
        HeaderFault::Read(err)
    }
}

impl OleObjectHeader {
    /// Extract the names from raw OLE field bytes.
    ///
    /// ```
    /// use access2excel::ole::object_header::OleObjectHeader;
    ///
    /// let header = OleObjectHeader::parse(None);
    /// assert_eq!(header.object_name, "Invalid OLE Header");
    /// ```
    pub fn parse(bytes: Option<&[u8]>) -> Self {
        let bytes = match bytes {
            Some(b) if b.len() >= MIN_HEADER_LEN => b,
            _ => return Self::placeholder(INVALID_HEADER),
        };

        match read_names(bytes) {
            Ok((object_name, class_name)) => Self {
                object_name,
                class_name,
            },
            Err(HeaderFault::OutOfBounds) => Self::placeholder(INVALID_DATA),
            Err(HeaderFault::Read(e)) => {
                tracing::debug!("OLE header field unreadable: {}", e);
                Self::placeholder(PARSE_ERROR)
            },
            Err(HeaderFault::Decode(e)) => {
                tracing::debug!("{}", e);
                Self::placeholder(PARSE_ERROR)
            },
        }
    }

    fn placeholder(text: &str) -> Self {
        Self {
            object_name: text.to_string(),
            class_name: text.to_string(),
        }
    }
}

fn read_names(bytes: &[u8]) -> Result<(String, String), HeaderFault> {
    let object_size = read_u16_le(bytes, OBJECT_SIZE_OFFSET)? as usize;
    let class_size = read_u16_le(bytes, CLASS_SIZE_OFFSET)? as usize;
    let object_pos = read_u16_le(bytes, OBJECT_POS_OFFSET)? as usize;
    let class_pos = read_u16_le(bytes, CLASS_POS_OFFSET)? as usize;

    let object = name_bytes(bytes, object_pos, object_size).ok_or(HeaderFault::OutOfBounds)?;
    let class = name_bytes(bytes, class_pos, class_size).ok_or(HeaderFault::OutOfBounds)?;

    Ok((decode(object)?, decode(class)?))
}

/// The name without its trailing terminator, if it lies inside `bytes`.
fn name_bytes(bytes: &[u8], pos: usize, size: usize) -> Option<&[u8]> {
    if size == 0 || pos + size > bytes.len() {
        return None;
    }
    Some(&bytes[pos..pos + size - 1])
}

fn decode(raw: &[u8]) -> Result<String, HeaderFault> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| HeaderFault::Decode(Error::OleDecode(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Header with the given fields followed by `tail`.
    fn header(object_size: u16, class_size: u16, object_pos: u16, class_pos: u16, tail: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; 8];
        for field in [object_size, class_size, object_pos, class_pos] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.extend_from_slice(tail);
        data
    }

    #[test]
    fn test_extracts_names() {
        let data = header(6, 5, 16, 22, b"Paint\0Test\0");
        let parsed = OleObjectHeader::parse(Some(&data));
        assert_eq!(parsed.object_name, "Paint");
        assert_eq!(parsed.class_name, "Test");
    }

    #[test]
    fn test_short_or_absent_input() {
        assert_eq!(OleObjectHeader::parse(None).object_name, INVALID_HEADER);
        let parsed = OleObjectHeader::parse(Some(&[0u8; 15]));
        assert_eq!(parsed.object_name, INVALID_HEADER);
        assert_eq!(parsed.class_name, INVALID_HEADER);
    }

    #[test]
    fn test_zero_size_is_invalid_data() {
        let data = header(0, 5, 16, 16, b"Test\0");
        assert_eq!(OleObjectHeader::parse(Some(&data)).object_name, INVALID_DATA);
    }

    #[test]
    fn test_out_of_range_is_invalid_data() {
        let data = header(0xFFFF, 1, 16, 16, b"x");
        let parsed = OleObjectHeader::parse(Some(&data));
        assert_eq!(parsed.object_name, INVALID_DATA);
        assert_eq!(parsed.class_name, INVALID_DATA);
    }

    #[test]
    fn test_name_may_end_exactly_at_buffer_end() {
        let data = header(3, 3, 16, 16, b"ab\0");
        assert_eq!(OleObjectHeader::parse(Some(&data)).object_name, "ab");
    }

    #[test]
    fn test_size_one_gives_empty_name() {
        let data = header(1, 1, 16, 16, b"\0");
        let parsed = OleObjectHeader::parse(Some(&data));
        assert_eq!(parsed.object_name, "");
        assert_eq!(parsed.class_name, "");
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let data = header(3, 3, 16, 16, &[0xFF, 0xFE, 0]);
        let parsed = OleObjectHeader::parse(Some(&data));
        assert_eq!(parsed.object_name, PARSE_ERROR);
        assert_eq!(parsed.class_name, PARSE_ERROR);
    }

    proptest! {
        #[test]
        fn parse_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let parsed = OleObjectHeader::parse(Some(&data));
            if data.len() < MIN_HEADER_LEN {
                prop_assert_eq!(parsed.object_name, INVALID_HEADER);
            }
        }

        #[test]
        fn valid_layout_round_trips(name in "[A-Za-z ]{0,40}", class in "[A-Za-z]{0,20}") {
            let mut tail = name.clone().into_bytes();
            tail.push(0);
            tail.extend_from_slice(class.as_bytes());
            tail.push(0);
            let data = header(
                name.len() as u16 + 1,
                class.len() as u16 + 1,
                16,
                16 + name.len() as u16 + 1,
                &tail,
            );
            let parsed = OleObjectHeader::parse(Some(&data));
            prop_assert_eq!(parsed.object_name, name);
            prop_assert_eq!(parsed.class_name, class);
        }
    }
}
