//! Column types, values and rows yielded by database readers.

use super::error::DatabaseError;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Access column data type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    Byte,
    Int16,
    Int32,
    Float,
    Double,
    /// Currency: fixed point with four decimal places
    Money,
    Numeric,
    Guid,
    Text,
    Memo,
    DateTime,
    /// Embedded OLE object
    Ole,
    /// Any type without a dedicated mapping, by upper-snake name
    Other(String),
}

impl ColumnType {
    /// Canonical upper-snake name of the type.
    ///
    /// ```
    /// use access2excel::database::ColumnType;
    ///
    /// assert_eq!(ColumnType::DateTime.type_name(), "SHORT_DATE_TIME");
    /// assert_eq!(ColumnType::Other("COMPLEX_TYPE".into()).type_name(), "COMPLEX_TYPE");
    /// ```
    pub fn type_name(&self) -> &str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Byte => "BYTE",
            ColumnType::Int16 => "INT",
            ColumnType::Int32 => "LONG",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Money => "MONEY",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Guid => "GUID",
            ColumnType::Text => "TEXT",
            ColumnType::Memo => "MEMO",
            ColumnType::DateTime => "SHORT_DATE_TIME",
            ColumnType::Ole => "OLE",
            ColumnType::Other(name) => name,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Turn a free-form type name into `UPPER_SNAKE` form.
///
/// ```
/// use access2excel::database::types::upper_snake;
///
/// assert_eq!(upper_snake("Complex Type"), "COMPLEX_TYPE");
/// assert_eq!(upper_snake("Unknown 0x0d"), "UNKNOWN_0X0D");
/// ```
pub fn upper_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push('_');
        }
        out.extend(word.chars().flat_map(char::to_uppercase));
    }
    out
}

/// Currency amount in ten-thousandths
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const SCALE: i64 = 10_000;

    pub fn from_ten_thousandths(units: i64) -> Self {
        Self(units)
    }

    pub fn ten_thousandths(self) -> i64 {
        self.0
    }

    /// Amount as a float; amounts beyond 2^53 ten-thousandths lose precision.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

impl FromStr for Money {
    type Err = DatabaseError;

    /// Parse decimal text such as `-12.5` or `1234.0001`.
    ///
    /// Digits past the fourth decimal place are rounded half away from zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DatabaseError::Parse {
            what: format!("money value '{}'", s),
            reason: reason.to_string(),
        };

        let text = s.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }

        let overflow = || invalid("out of range");
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut units = whole.checked_mul(Self::SCALE).ok_or_else(overflow)?;

        let mut scale = Self::SCALE / 10;
        let mut rest = fraction.bytes();
        for b in rest.by_ref().take(4) {
            units = units
                .checked_add(i64::from(b - b'0') * scale)
                .ok_or_else(overflow)?;
            scale /= 10;
        }
        if rest.next().is_some_and(|b| b >= b'5') {
            units = units.checked_add(1).ok_or_else(overflow)?;
        }

        Ok(Self(if negative { -units } else { units }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        write!(f, "{}{}.{:04}", sign, abs / scale, abs % scale)
    }
}

/// A value read from a database cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Float(f32),
    Double(f64),
    Money(Money),
    Numeric(f64),
    Guid(String),
    Text(String),
    DateTime(NaiveDateTime),
    Binary(Vec<u8>),
}

impl Value {
    /// Name of the variant, used in type mismatch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Byte(_) => "Byte",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Money(_) => "Money",
            Value::Numeric(_) => "Numeric",
            Value::Guid(_) => "Guid",
            Value::Text(_) => "Text",
            Value::DateTime(_) => "DateTime",
            Value::Binary(_) => "Binary",
        }
    }
}

/// A table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Position within the table, from 0
    pub index: usize,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            index,
            column_type,
        }
    }
}

/// Column name to value position, shared by every row of a table
pub type ColumnLookup = Arc<HashMap<String, usize>>;

/// Build the name lookup for `columns`.
///
/// When two columns share a name the first one wins.
pub fn column_lookup(columns: &[Column]) -> ColumnLookup {
    let mut map = HashMap::with_capacity(columns.len());
    for (position, column) in columns.iter().enumerate() {
        map.entry(column.name.clone()).or_insert(position);
    }
    Arc::new(map)
}

/// One table row; `None` entries are nulls
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    lookup: ColumnLookup,
    values: Vec<Option<Value>>,
}

impl Row {
    pub fn new(lookup: ColumnLookup, values: Vec<Option<Value>>) -> Self {
        Self { lookup, values }
    }

    /// Value of the column called `name`, if it exists and is not null.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let &position = self.lookup.get(name)?;
        self.get_index(position)
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)?.as_ref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_parsing() {
        assert_eq!("12.5".parse::<Money>().unwrap().ten_thousandths(), 125_000);
        assert_eq!("-0.0001".parse::<Money>().unwrap().ten_thousandths(), -1);
        assert_eq!("3".parse::<Money>().unwrap().ten_thousandths(), 30_000);
        assert_eq!(".25".parse::<Money>().unwrap().ten_thousandths(), 2_500);
        assert_eq!("1.00005".parse::<Money>().unwrap().ten_thousandths(), 10_001);
        assert!("".parse::<Money>().is_err());
        assert!("1e5".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_display_and_float() {
        let money = Money::from_ten_thousandths(-123_456);
        assert_eq!(money.to_string(), "-12.3456");
        assert_eq!(money.to_f64(), -12.3456);
    }

    #[test]
    fn test_row_lookup() {
        let columns = vec![
            Column::new("Id", 0, ColumnType::Int32),
            Column::new("Name", 1, ColumnType::Text),
        ];
        let row = Row::new(
            column_lookup(&columns),
            vec![Some(Value::Int32(7)), None],
        );
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("Id"), Some(&Value::Int32(7)));
        assert_eq!(row.get("Name"), None);
        assert_eq!(row.get("Missing"), None);
        assert_eq!(row.get_index(0), Some(&Value::Int32(7)));
        assert_eq!(row.get_index(5), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ColumnType::Money.type_name(), "MONEY");
        assert_eq!(ColumnType::Other(upper_snake("Replication ID")).to_string(), "REPLICATION_ID");
    }
}
