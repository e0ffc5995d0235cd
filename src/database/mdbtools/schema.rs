//! Column definitions from `mdb-schema` DDL output.

use super::super::error::{DatabaseError, Result};
use super::super::types::{Column, ColumnType, upper_snake};

/// Map an Access type name as printed by `mdb-schema ... access`.
///
/// ```
/// use access2excel::database::ColumnType;
/// use access2excel::database::mdbtools::schema::access_column_type;
///
/// assert_eq!(access_column_type("Long Integer"), ColumnType::Int32);
/// assert_eq!(access_column_type("Text (50)"), ColumnType::Text);
/// assert_eq!(access_column_type("Binary"), ColumnType::Other("BINARY".into()));
/// ```
pub fn access_column_type(name: &str) -> ColumnType {
    // Drop a size suffix such as "(255)"
    let base = name.split('(').next().unwrap_or(name).trim();
    match base.to_ascii_lowercase().as_str() {
        "boolean" | "yes/no" => ColumnType::Boolean,
        "byte" => ColumnType::Byte,
        "integer" => ColumnType::Int16,
        "long integer" | "autonumber" => ColumnType::Int32,
        "single" => ColumnType::Float,
        "double" => ColumnType::Double,
        "currency" => ColumnType::Money,
        "numeric" | "decimal" => ColumnType::Numeric,
        "replication id" | "guid" => ColumnType::Guid,
        "text" => ColumnType::Text,
        "memo" | "memo/hyperlink" => ColumnType::Memo,
        "datetime" | "date/time" => ColumnType::DateTime,
        "ole" | "ole object" => ColumnType::Ole,
        _ => ColumnType::Other(upper_snake(base)),
    }
}

/// Parse the columns of the single `CREATE TABLE` in `ddl`.
pub fn parse_columns(ddl: &str, table: &str) -> Result<Vec<Column>> {
    let parse_error = |reason: &str| DatabaseError::Parse {
        what: format!("schema of table '{}'", table),
        reason: reason.to_string(),
    };

    let start = ddl
        .find("CREATE TABLE")
        .ok_or_else(|| parse_error("no CREATE TABLE statement"))?;
    let body = &ddl[start..];
    let open = body
        .find('(')
        .ok_or_else(|| parse_error("missing column list"))?;

    let mut columns = Vec::new();
    for line in body[open + 1..].lines() {
        let line = line.trim();
        if line.starts_with(')') {
            return Ok(columns);
        }
        let Some(rest) = line.strip_prefix('[') else {
            continue;
        };
        let close = rest
            .find(']')
            .ok_or_else(|| parse_error("unterminated column name"))?;
        let name = &rest[..close];
        let type_text = rest[close + 1..].trim().trim_end_matches(',').trim();
        let type_text = type_text.strip_suffix("NOT NULL").unwrap_or(type_text).trim();

        columns.push(Column::new(name, columns.len(), access_column_type(type_text)));
    }

    Err(parse_error("column list is not closed"))
}
