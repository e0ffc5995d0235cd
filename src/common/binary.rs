//! Binary data helpers shared by the OLE object parser and database readers.

use zerocopy::{FromBytes, LE, U16};

/// Binary parsing error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData { expected: usize, available: usize },
    /// Failed to parse the data
    ParseError(String),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: expected {}, got {}",
                    expected, available
                )
            },
            BinaryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

/// Read a little-endian u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use access2excel::common::binary::read_u16_le;
/// let data = [0x34, 0x12, 0x78, 0x56];
/// assert_eq!(read_u16_le(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_le(&data, 2).unwrap(), 0x5678);
/// assert!(read_u16_le(&data, 3).is_err());
/// ```
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> BinaryResult<u16> {
    let end = offset.checked_add(2).ok_or_else(|| {
        BinaryError::ParseError(format!("Offset {} overflows", offset))
    })?;
    if end > data.len() {
        return Err(BinaryError::InsufficientData {
            expected: end,
            available: data.len(),
        });
    }
    U16::<LE>::read_from_bytes(&data[offset..end])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u16".to_string()))
}

/// Decode a hexadecimal string (case-insensitive, optional `0x` prefix) into bytes.
///
/// ```
/// use access2excel::common::binary::decode_hex;
/// assert_eq!(decode_hex("0x0aFF").unwrap(), vec![0x0A, 0xFF]);
/// assert!(decode_hex("abc").is_err());
/// ```
pub fn decode_hex(text: &str) -> BinaryResult<Vec<u8>> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
        .as_bytes();

    if digits.len() % 2 != 0 {
        return Err(BinaryError::ParseError(format!(
            "Hex string has odd length {}",
            digits.len()
        )));
    }

    digits
        .chunks_exact(2)
        .map(|pair| Ok((hex_nibble(pair[0])? << 4) | hex_nibble(pair[1])?))
        .collect()
}

#[inline]
fn hex_nibble(byte: u8) -> BinaryResult<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(BinaryError::ParseError(format!(
            "Invalid hex digit '{}'",
            byte as char
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16_le_bounds() {
        let data = [0x01, 0x02];
        assert_eq!(read_u16_le(&data, 0).unwrap(), 0x0201);
        assert_eq!(
            read_u16_le(&data, 1),
            Err(BinaryError::InsufficientData {
                expected: 3,
                available: 2
            })
        );
        assert!(read_u16_le(&data, usize::MAX).is_err());
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex("DEADbeef").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(decode_hex("zz").is_err());
    }
}
