//! In-memory database, built in code.

use super::error::{DatabaseError, Result};
use super::traits::{Database, Table};
use super::types::{Column, ColumnLookup, ColumnType, Row, Value, column_lookup};

#[derive(Debug, Clone)]
struct StoredTable {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<Option<Value>>>,
    /// Reported row count; defaults to `rows.len()`
    row_count: Option<usize>,
}

/// Builder for [`MemoryDatabase`]
#[derive(Debug, Default)]
pub struct MemoryDatabaseBuilder {
    tables: Vec<StoredTable>,
}

impl MemoryDatabaseBuilder {
    /// Add a table; columns are indexed in the order given.
    pub fn table<N, S, C>(mut self, name: N, columns: C, rows: Vec<Vec<Option<Value>>>) -> Self
    where
        N: Into<String>,
        S: Into<String>,
        C: IntoIterator<Item = (S, ColumnType)>,
    {
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(index, (name, column_type))| Column::new(name, index, column_type))
            .collect();
        self.tables.push(StoredTable {
            name: name.into(),
            columns,
            rows,
            row_count: None,
        });
        self
    }

    /// Override the row count reported by the last added table.
    pub fn reported_row_count(mut self, count: usize) -> Self {
        if let Some(table) = self.tables.last_mut() {
            table.row_count = Some(count);
        }
        self
    }

    /// Check every row against its table's columns and build the database.
    pub fn build(self) -> Result<MemoryDatabase> {
        for table in &self.tables {
            for (row, values) in table.rows.iter().enumerate() {
                if values.len() != table.columns.len() {
                    return Err(DatabaseError::RowWidth {
                        table: table.name.clone(),
                        row,
                        expected: table.columns.len(),
                        found: values.len(),
                    });
                }
            }
        }
        Ok(MemoryDatabase {
            tables: self.tables,
            closed: false,
        })
    }
}

/// Database whose tables live in memory
#[derive(Debug, Clone)]
pub struct MemoryDatabase {
    tables: Vec<StoredTable>,
    closed: bool,
}

impl MemoryDatabase {
    pub fn builder() -> MemoryDatabaseBuilder {
        MemoryDatabaseBuilder::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Database for MemoryDatabase {
    fn table_names(&self) -> Result<Vec<String>> {
        if self.closed {
            return Err(DatabaseError::Closed);
        }
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn table(&mut self, name: &str) -> Result<Box<dyn Table + '_>> {
        if self.closed {
            return Err(DatabaseError::Closed);
        }
        let table = self
            .tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DatabaseError::TableNotFound(name.to_string()))?;
        Ok(Box::new(MemoryCursor {
            lookup: column_lookup(&table.columns),
            table,
            position: 0,
        }))
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

struct MemoryCursor<'a> {
    table: &'a StoredTable,
    lookup: ColumnLookup,
    position: usize,
}

impl Table for MemoryCursor<'_> {
    fn name(&self) -> &str {
        &self.table.name
    }

    fn columns(&self) -> &[Column] {
        &self.table.columns
    }

    fn row_count(&self) -> usize {
        self.table.row_count.unwrap_or(self.table.rows.len())
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        let Some(values) = self.table.rows.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(Row::new(self.lookup.clone(), values.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryDatabase {
        MemoryDatabase::builder()
            .table(
                "B",
                [("Id", ColumnType::Int32), ("Label", ColumnType::Text)],
                vec![
                    vec![Some(Value::Int32(1)), Some(Value::Text("one".into()))],
                    vec![Some(Value::Int32(2)), None],
                ],
            )
            .table("A", [("X", ColumnType::Double)], vec![])
            .build()
            .unwrap()
    }

    #[test]
    fn test_tables_in_insertion_order() {
        let db = sample();
        assert_eq!(db.table_names().unwrap(), vec!["B", "A"]);
    }

    #[test]
    fn test_cursor_reads_once() {
        let mut db = sample();
        let mut table = db.table("B").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns()[1].index, 1);
        let first = table.next_row().unwrap().unwrap();
        assert_eq!(first.get("Label"), Some(&Value::Text("one".into())));
        let second = table.next_row().unwrap().unwrap();
        assert_eq!(second.get("Label"), None);
        assert!(table.next_row().unwrap().is_none());
    }

    #[test]
    fn test_row_width_is_checked() {
        let result = MemoryDatabase::builder()
            .table("T", [("A", ColumnType::Text)], vec![vec![None, None]])
            .build();
        assert!(matches!(
            result,
            Err(DatabaseError::RowWidth { row: 0, expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut db = sample();
        db.close().unwrap();
        db.close().unwrap();
        assert!(db.is_closed());
        assert!(matches!(db.table_names(), Err(DatabaseError::Closed)));
        assert!(matches!(db.table("B"), Err(DatabaseError::Closed)));
    }

    #[test]
    fn test_unknown_table() {
        let mut db = sample();
        assert!(matches!(db.table("Z"), Err(DatabaseError::TableNotFound(_))));
    }
}
