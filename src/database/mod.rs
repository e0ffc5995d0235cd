//! Read-only access to Access databases.
//!
//! Readers implement [`Database`] and hand out forward-only [`Table`]
//! cursors. Two readers ship with the crate:
//!
//! - [`MemoryDatabase`] holds tables built in code
//! - [`MdbToolsDatabase`] drives the `mdbtools` command line programs
//!
//! # Example
//!
//! ```
//! use access2excel::database::{ColumnType, Database, MemoryDatabase, Table, Value};
//!
//! let mut db = MemoryDatabase::builder()
//!     .table("People", [("Name", ColumnType::Text)], vec![vec![Some(Value::Text("Ada".into()))]])
//!     .build()?;
//!
//! let mut table = db.table("People")?;
//! let row = table.next_row()?.expect("one row");
//! assert_eq!(row.get("Name"), Some(&Value::Text("Ada".into())));
//! # Ok::<(), access2excel::database::DatabaseError>(())
//! ```

mod error;
pub mod mdbtools;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{DatabaseError, Result};
pub use mdbtools::MdbToolsDatabase;
pub use memory::{MemoryDatabase, MemoryDatabaseBuilder};
pub use traits::{Database, Table};
pub use types::{Column, ColumnType, Money, Row, Value};
