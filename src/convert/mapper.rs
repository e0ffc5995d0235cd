//! Mapping of database values to spreadsheet cells.

use crate::database::{ColumnType, Value};
use crate::ole::OleObjectHeader;
use crate::sheet::CellValue;
use thiserror::Error;

/// Style a mapped cell needs on top of the default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleHint {
    None,
    Date,
}

/// A cell ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct MappedCell {
    pub value: CellValue,
    pub style: StyleHint,
}

impl MappedCell {
    fn plain(value: CellValue) -> Self {
        Self {
            value,
            style: StyleHint::None,
        }
    }
}

/// Type mapping error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("{expected} column holds a {found} value")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },
}

/// Map one database value to a cell.
///
/// `Ok(None)` means nothing is written: the value is null.
///
/// ```
/// use access2excel::convert::mapper::{map_value, StyleHint};
/// use access2excel::database::{ColumnType, Value};
/// use access2excel::sheet::CellValue;
///
/// let cell = map_value(&ColumnType::Int16, Some(&Value::Int16(-3))).unwrap().unwrap();
/// assert_eq!(cell.value, CellValue::Number(-3.0));
/// assert_eq!(cell.style, StyleHint::None);
/// assert_eq!(map_value(&ColumnType::Text, None).unwrap(), None);
/// ```
pub fn map_value(column_type: &ColumnType, value: Option<&Value>) -> Result<Option<MappedCell>, MapError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let mismatch = || MapError::TypeMismatch {
        expected: column_type.type_name().to_string(),
        found: value.kind(),
    };

    let cell = match column_type {
        ColumnType::Boolean => match value {
            Value::Bool(b) => MappedCell::plain(CellValue::Bool(*b)),
            _ => return Err(mismatch()),
        },
        ColumnType::Byte | ColumnType::Int16 | ColumnType::Int32 => {
            let n = match value {
                Value::Byte(n) => f64::from(*n),
                Value::Int16(n) => f64::from(*n),
                Value::Int32(n) => f64::from(*n),
                _ => return Err(mismatch()),
            };
            MappedCell::plain(CellValue::Number(n))
        },
        ColumnType::Float | ColumnType::Double | ColumnType::Numeric => {
            let n = match value {
                Value::Float(n) => f64::from(*n),
                Value::Double(n) | Value::Numeric(n) => *n,
                _ => return Err(mismatch()),
            };
            MappedCell::plain(CellValue::Number(n))
        },
        ColumnType::Money => match value {
            Value::Money(money) => MappedCell::plain(CellValue::Number(money.to_f64())),
            _ => return Err(mismatch()),
        },
        ColumnType::Guid => match value {
            Value::Guid(text) | Value::Text(text) => MappedCell::plain(CellValue::Text(text.clone())),
            _ => return Err(mismatch()),
        },
        ColumnType::Text | ColumnType::Memo => match value {
            Value::Text(text) => MappedCell::plain(CellValue::Text(text.clone())),
            _ => return Err(mismatch()),
        },
        ColumnType::DateTime => match value {
            Value::DateTime(dt) => MappedCell {
                value: CellValue::Date(*dt),
                style: StyleHint::Date,
            },
            _ => return Err(mismatch()),
        },
        ColumnType::Ole => match value {
            Value::Binary(bytes) => {
                let header = OleObjectHeader::parse(Some(bytes));
                MappedCell::plain(CellValue::Text(format!("<{}>", header.object_name)))
            },
            _ => return Err(mismatch()),
        },
        ColumnType::Other(name) => MappedCell::plain(CellValue::Text(format!("<{}>", name))),
    };

    Ok(Some(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Money;
    use chrono::NaiveDate;

    fn mapped(column_type: ColumnType, value: Value) -> MappedCell {
        map_value(&column_type, Some(&value)).unwrap().unwrap()
    }

    #[test]
    fn test_numbers_are_widened() {
        assert_eq!(mapped(ColumnType::Byte, Value::Byte(255)).value, CellValue::Number(255.0));
        assert_eq!(
            mapped(ColumnType::Int32, Value::Int16(7)).value,
            CellValue::Number(7.0)
        );
        assert_eq!(
            mapped(ColumnType::Float, Value::Float(0.5)).value,
            CellValue::Number(0.5)
        );
        assert_eq!(
            mapped(ColumnType::Numeric, Value::Double(1.25)).value,
            CellValue::Number(1.25)
        );
        assert_eq!(
            mapped(ColumnType::Money, Value::Money(Money::from_ten_thousandths(12_345))).value,
            CellValue::Number(1.2345)
        );
    }

    #[test]
    fn test_text_and_guid() {
        assert_eq!(
            mapped(ColumnType::Memo, Value::Text(String::new())).value,
            CellValue::Text(String::new())
        );
        let guid = "{6B29FC40-CA47-1067-B31D-00DD010662DA}";
        assert_eq!(
            mapped(ColumnType::Guid, Value::Guid(guid.into())).value,
            CellValue::Text(guid.into())
        );
    }

    #[test]
    fn test_dates_get_date_style() {
        let dt = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        let cell = mapped(ColumnType::DateTime, Value::DateTime(dt));
        assert_eq!(cell.value, CellValue::Date(dt));
        assert_eq!(cell.style, StyleHint::Date);
    }

    #[test]
    fn test_ole_and_other_become_placeholders() {
        let mut bytes = vec![0u8; 16];
        bytes[8] = 4; // object size
        bytes[12] = 16; // object position
        bytes[10] = 2; // class size
        bytes[14] = 20; // class position
        bytes.extend_from_slice(b"Pic\0P\0");
        assert_eq!(
            mapped(ColumnType::Ole, Value::Binary(bytes)).value,
            CellValue::Text("<Pic>".into())
        );
        assert_eq!(
            mapped(ColumnType::Ole, Value::Binary(vec![1, 2])).value,
            CellValue::Text("<Invalid OLE Header>".into())
        );
        assert_eq!(
            mapped(ColumnType::Other("BINARY".into()), Value::Binary(vec![1])).value,
            CellValue::Text("<BINARY>".into())
        );
    }

    #[test]
    fn test_nulls_write_nothing() {
        for column_type in [
            ColumnType::Boolean,
            ColumnType::Byte,
            ColumnType::Int16,
            ColumnType::Int32,
            ColumnType::Float,
            ColumnType::Double,
            ColumnType::Money,
            ColumnType::Numeric,
            ColumnType::Guid,
            ColumnType::Text,
            ColumnType::Memo,
            ColumnType::DateTime,
            ColumnType::Ole,
            ColumnType::Other("COMPLEX_TYPE".into()),
        ] {
            assert_eq!(map_value(&column_type, None), Ok(None));
        }
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            map_value(&ColumnType::Int32, Some(&Value::Text("1".into()))),
            Err(MapError::TypeMismatch {
                expected: "LONG".into(),
                found: "Text"
            })
        );
        assert!(map_value(&ColumnType::Boolean, Some(&Value::Byte(1))).is_err());
    }
}
