//! Coercion of `mdb-json` output into typed values.
//!
//! `mdb-json` prints one JSON object per row, omitting null columns. Its
//! typing is loose (booleans may come as numbers, currency as text), so
//! every column type accepts the spellings it is known to produce.

use super::super::error::{DatabaseError, Result};
use super::super::types::{Column, ColumnLookup, ColumnType, Money, Row, Value};
use crate::common::binary::decode_hex;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value as Json};

/// Date-time layouts accepted for date columns, most specific first
const DATE_TIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

/// Decode one line of `mdb-json` output into a row.
pub fn parse_row(line: &str, columns: &[Column], lookup: &ColumnLookup) -> Result<Row> {
    let object: Map<String, Json> = serde_json::from_str(line).map_err(|e| DatabaseError::Parse {
        what: "mdb-json row".to_string(),
        reason: e.to_string(),
    })?;

    let values = columns
        .iter()
        .map(|column| match object.get(&column.name) {
            Some(json) => coerce(&column.column_type, json).map_err(|reason| DatabaseError::Parse {
                what: format!("value of column '{}'", column.name),
                reason,
            }),
            None => Ok(None),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Row::new(lookup.clone(), values))
}

/// Coerce a JSON value to the column's value type; `Ok(None)` for null.
pub fn coerce(column_type: &ColumnType, json: &Json) -> std::result::Result<Option<Value>, String> {
    if json.is_null() {
        return Ok(None);
    }
    let value = match column_type {
        ColumnType::Boolean => Value::Bool(to_bool(json)?),
        ColumnType::Byte => Value::Byte(to_integer(json)?),
        ColumnType::Int16 => Value::Int16(to_integer(json)?),
        ColumnType::Int32 => Value::Int32(to_integer(json)?),
        ColumnType::Float => Value::Float(to_float(json)? as f32),
        ColumnType::Double => Value::Double(to_float(json)?),
        ColumnType::Numeric => Value::Numeric(to_float(json)?),
        ColumnType::Money => {
            let text = match json {
                Json::String(s) => s.clone(),
                Json::Number(n) => n.to_string(),
                other => return Err(format!("expected a currency amount, got {}", other)),
            };
            Value::Money(text.parse::<Money>().map_err(|e| e.to_string())?)
        },
        ColumnType::Guid => Value::Guid(to_text(json)),
        ColumnType::Text | ColumnType::Memo => Value::Text(to_text(json)),
        ColumnType::DateTime => Value::DateTime(to_date_time(json)?),
        ColumnType::Ole => Value::Binary(to_binary(json)?),
        ColumnType::Other(_) => match json {
            Json::String(s) => decode_hex(s)
                .map(Value::Binary)
                .unwrap_or_else(|_| Value::Text(s.clone())),
            other => Value::Text(other.to_string()),
        },
    };
    Ok(Some(value))
}

fn to_bool(json: &Json) -> std::result::Result<bool, String> {
    match json {
        Json::Bool(b) => Ok(*b),
        Json::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Json::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "-1" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(format!("expected a boolean, got '{}'", s)),
        },
        other => Err(format!("expected a boolean, got {}", other)),
    }
}

fn to_integer<T: TryFrom<i64>>(json: &Json) -> std::result::Result<T, String> {
    let wide = match json {
        Json::Number(n) => n.as_i64(),
        Json::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("expected an integer, got {}", json))?;
    T::try_from(wide).map_err(|_| format!("integer {} is out of range", wide))
}

fn to_float(json: &Json) -> std::result::Result<f64, String> {
    let number = match json {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.ok_or_else(|| format!("expected a number, got {}", json))
}

fn to_text(json: &Json) -> String {
    match json {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_date_time(json: &Json) -> std::result::Result<NaiveDateTime, String> {
    let Json::String(text) = json else {
        return Err(format!("expected a date, got {}", json));
    };
    let text = text.trim();
    DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("unrecognized date '{}'", text))
}

fn to_binary(json: &Json) -> std::result::Result<Vec<u8>, String> {
    match json {
        Json::String(s) => decode_hex(s).map_err(|e| e.to_string()),
        other => Err(format!("expected hex data, got {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::types::column_lookup;
    use serde_json::json;

    #[test]
    fn test_parse_row_missing_keys_are_null() {
        let columns = vec![
            Column::new("Id", 0, ColumnType::Int32),
            Column::new("Name", 1, ColumnType::Text),
            Column::new("Price", 2, ColumnType::Money),
        ];
        let lookup = column_lookup(&columns);
        let row = parse_row(r#"{"Id":4,"Price":"12.50"}"#, &columns, &lookup).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("Id"), Some(&Value::Int32(4)));
        assert_eq!(row.get("Name"), None);
        assert_eq!(
            row.get("Price"),
            Some(&Value::Money(Money::from_ten_thousandths(125_000)))
        );
    }

    #[test]
    fn test_bad_row() {
        let columns = vec![Column::new("Id", 0, ColumnType::Byte)];
        let lookup = column_lookup(&columns);
        assert!(parse_row("not json", &columns, &lookup).is_err());
        assert!(parse_row(r#"{"Id":300}"#, &columns, &lookup).is_err());
    }

    #[test]
    fn test_booleans() {
        assert_eq!(coerce(&ColumnType::Boolean, &json!(1)), Ok(Some(Value::Bool(true))));
        assert_eq!(coerce(&ColumnType::Boolean, &json!("false")), Ok(Some(Value::Bool(false))));
        assert_eq!(coerce(&ColumnType::Boolean, &json!(true)), Ok(Some(Value::Bool(true))));
        assert!(coerce(&ColumnType::Boolean, &json!("maybe")).is_err());
    }

    #[test]
    fn test_dates() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 4)
            .unwrap()
            .and_hms_opt(5, 6, 7)
            .unwrap();
        assert_eq!(
            coerce(&ColumnType::DateTime, &json!("2021-03-04 05:06:07")),
            Ok(Some(Value::DateTime(expected)))
        );
        assert_eq!(
            coerce(&ColumnType::DateTime, &json!("03/04/21 05:06:07")),
            Ok(Some(Value::DateTime(expected)))
        );
        let midnight = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(
            coerce(&ColumnType::DateTime, &json!("2021-03-04")),
            Ok(Some(Value::DateTime(midnight)))
        );
        assert!(coerce(&ColumnType::DateTime, &json!("yesterday")).is_err());
    }

    #[test]
    fn test_binary_and_other() {
        assert_eq!(
            coerce(&ColumnType::Ole, &json!("0A0b")),
            Ok(Some(Value::Binary(vec![0x0A, 0x0B])))
        );
        assert_eq!(
            coerce(&ColumnType::Other("COMPLEX_TYPE".into()), &json!("x")),
            Ok(Some(Value::Text("x".into())))
        );
        assert_eq!(coerce(&ColumnType::Text, &json!(null)), Ok(None));
        assert_eq!(coerce(&ColumnType::Memo, &json!("")), Ok(Some(Value::Text(String::new()))));
    }

    #[test]
    fn test_money_from_number_keeps_digits() {
        assert_eq!(
            coerce(&ColumnType::Money, &json!(19.99)),
            Ok(Some(Value::Money(Money::from_ten_thousandths(199_900))))
        );
    }
}
