//! Database reader backed by the `mdbtools` command line programs.
//!
//! Table names come from `mdb-tables`, column definitions from `mdb-schema`,
//! row counts from `mdb-count`, and rows are streamed from `mdb-json`. The
//! `mdb-json` child is only spawned when the first row is requested.

mod command;
pub mod json;
pub mod schema;

pub use command::MdbTools;

use super::error::{DatabaseError, Result};
use super::traits::{Database, Table};
use super::types::{Column, ColumnLookup, Row, column_lookup};
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout};
use tracing::{debug, warn};

/// Date layout handed to `mdb-json -D`
const JSON_DATE_LAYOUT: &str = "%Y-%m-%d";
/// Date-time layout handed to `mdb-json -T`
const JSON_DATE_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// An Access database read through `mdbtools`
#[derive(Debug)]
pub struct MdbToolsDatabase {
    path: PathBuf,
    tools: MdbTools,
    closed: bool,
}

impl MdbToolsDatabase {
    /// Open `path` for reading.
    ///
    /// The file must exist and `mdb-ver` must recognise it. `tools_dir`
    /// overrides the `PATH` lookup of the executables.
    pub fn open_read_only(path: &Path, tools_dir: Option<&Path>) -> Result<Self> {
        let open_error = |reason: String| DatabaseError::Open {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = std::fs::metadata(path).map_err(|e| open_error(e.to_string()))?;
        if !metadata.is_file() {
            return Err(open_error("not a regular file".to_string()));
        }

        let tools = MdbTools::new(tools_dir);
        let version = tools
            .run("mdb-ver", [path])
            .map_err(|e| open_error(e.to_string()))?;
        debug!(path = %path.display(), version = version.trim(), "opened database");

        Ok(Self {
            path: path.to_path_buf(),
            tools,
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(DatabaseError::Closed);
        }
        Ok(())
    }
}

impl Database for MdbToolsDatabase {
    fn table_names(&self) -> Result<Vec<String>> {
        self.ensure_open()?;
        let output = self.tools.run("mdb-tables", [OsStr::new("-1"), self.path.as_os_str()])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn table(&mut self, name: &str) -> Result<Box<dyn Table + '_>> {
        self.ensure_open()?;

        let ddl = self.tools.run(
            "mdb-schema",
            [
                OsStr::new("-T"),
                OsStr::new(name),
                OsStr::new("--no-indexes"),
                OsStr::new("--no-relations"),
                self.path.as_os_str(),
                OsStr::new("access"),
            ],
        )?;
        if !ddl.contains("CREATE TABLE") {
            return Err(DatabaseError::TableNotFound(name.to_string()));
        }
        let columns = schema::parse_columns(&ddl, name)?;

        let count = self
            .tools
            .run("mdb-count", [self.path.as_os_str(), OsStr::new(name)])?;
        let row_count = count.trim().parse::<usize>().map_err(|e| DatabaseError::Parse {
            what: format!("row count of table '{}'", name),
            reason: e.to_string(),
        })?;

        Ok(Box::new(MdbToolsTable {
            name: name.to_string(),
            lookup: column_lookup(&columns),
            columns,
            row_count,
            database: self,
            child: None,
            lines: None,
            finished: false,
        }))
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

struct MdbToolsTable<'a> {
    name: String,
    columns: Vec<Column>,
    lookup: ColumnLookup,
    row_count: usize,
    database: &'a MdbToolsDatabase,
    child: Option<Child>,
    lines: Option<Lines<BufReader<ChildStdout>>>,
    finished: bool,
}

impl MdbToolsTable<'_> {
    fn start(&mut self) -> Result<()> {
        let db = self.database;
        let mut child = db.tools.spawn(
            "mdb-json",
            [
                OsStr::new("-D"),
                OsStr::new(JSON_DATE_LAYOUT),
                OsStr::new("-T"),
                OsStr::new(JSON_DATE_TIME_LAYOUT),
                OsStr::new("-b"),
                OsStr::new("hex"),
                db.path.as_os_str(),
                OsStr::new(&self.name),
            ],
        )?;
        let stdout = child.stdout.take().ok_or_else(|| DatabaseError::Command {
            program: "mdb-json".to_string(),
            reason: "standard output was not captured".to_string(),
        })?;
        self.lines = Some(BufReader::new(stdout).lines());
        self.child = Some(child);
        Ok(())
    }

    /// Reap the child once its output is drained.
    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        self.lines = None;
        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            if !status.success() {
                return Err(DatabaseError::Command {
                    program: "mdb-json".to_string(),
                    reason: format!("{} while reading table '{}'", status, self.name),
                });
            }
        }
        Ok(())
    }
}

impl Table for MdbToolsTable<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.row_count
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        if self.finished {
            return Ok(None);
        }
        if self.lines.is_none() {
            self.start()?;
        }

        loop {
            let next = self.lines.as_mut().and_then(Iterator::next);
            match next {
                Some(line) => {
                    let line = line?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    return json::parse_row(&line, &self.columns, &self.lookup).map(Some);
                },
                None => {
                    self.finish()?;
                    return Ok(None);
                },
            }
        }
    }
}

impl Drop for MdbToolsTable<'_> {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                warn!(table = %self.name, error = %e, "failed to stop mdb-json");
            }
            let _ = child.wait();
        }
    }
}
