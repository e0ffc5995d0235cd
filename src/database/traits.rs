//! Reader traits shared by every database backend.

use super::error::Result;
use super::types::{Column, Row};

/// An open, read-only database.
pub trait Database {
    /// Names of the user tables, in reader order.
    fn table_names(&self) -> Result<Vec<String>>;

    /// Open a cursor over `name`.
    fn table(&mut self, name: &str) -> Result<Box<dyn Table + '_>>;

    /// Release the database. Calling it again is a no-op.
    fn close(&mut self) -> Result<()>;
}

/// A forward-only cursor over one table's rows.
///
/// Each table is read once; there is no rewinding.
pub trait Table {
    fn name(&self) -> &str;

    /// Columns in index order.
    fn columns(&self) -> &[Column];

    /// Number of rows the table reports.
    fn row_count(&self) -> usize;

    /// Next row, or `None` once the cursor is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>>;
}
