//! Table-by-table conversion of a database into a workbook.

use super::guard::PathGuard;
use super::mapper::{StyleHint, map_value};
use super::options::{ConvertOptions, PartialOutput};
use super::progress::ProgressSink;
use crate::common::{Error, Result};
use crate::database::{Database, DatabaseError, MdbToolsDatabase};
use crate::sheet::{CellStyle, CellValue, SheetNamer, Workbook, WorkbookSink};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Line emitted once the workbook has been written
pub const DONE: &str = "Done.";

/// Rows between progress log events
const ROW_LOG_INTERVAL: usize = 10_000;

/// Copy every table of `database` into its own sheet of `workbook`.
///
/// Sheet row 0 holds the column names in bold; table row `i` lands on sheet
/// row `i + 1`. Nulls leave their cell empty.
pub fn convert_tables<W: WorkbookSink>(
    database: &mut dyn Database,
    workbook: &mut W,
    options: &ConvertOptions,
    progress: &mut dyn ProgressSink,
) -> Result<()> {
    let header_style = workbook.create_cell_style(&CellStyle::bold())?;
    let date_style = workbook.create_cell_style(&CellStyle::with_number_format(options.date_format.as_str()))?;
    let mut namer = if options.sheet_name_sanitizing {
        SheetNamer::new()
    } else {
        SheetNamer::verbatim()
    };

    for table_name in database.table_names()? {
        progress.write(&format!("Table {}...", table_name));
        let mut table = database.table(&table_name)?;
        let columns = table.columns().to_vec();
        let row_count = table.row_count();
        debug!(table = %table_name, columns = columns.len(), rows = row_count, "converting table");

        workbook.create_sheet(&namer.assign(&table_name))?;

        workbook.create_row(0)?;
        for column in &columns {
            workbook.write_cell(column.index, CellValue::Text(column.name.clone()), Some(header_style))?;
        }

        for i in 0..row_count {
            let row = table.next_row()?.ok_or_else(|| DatabaseError::CursorExhausted {
                table: table_name.clone(),
                expected: row_count,
                read: i,
            })?;
            workbook.create_row(i + 1)?;

            for j in 0..row.len() {
                let column = columns.get(j).ok_or_else(|| {
                    Error::Conversion(format!(
                        "Row {} of table '{}' has more values than columns",
                        i, table_name
                    ))
                })?;
                let Some(cell) = map_value(&column.column_type, row.get(&column.name))? else {
                    continue;
                };
                let style = match cell.style {
                    StyleHint::Date => Some(date_style),
                    StyleHint::None => None,
                };
                workbook.write_cell(j, cell.value, style)?;
            }

            if (i + 1) % ROW_LOG_INTERVAL == 0 {
                debug!(table = %table_name, rows = i + 1, of = row_count, "rows written");
            }
        }

        if workbook.format().is_streaming() {
            workbook.track_all_columns_for_auto_sizing()?;
        }
        for column in &columns {
            workbook.auto_size_column(column.index)?;
        }
    }

    Ok(())
}

/// Runs conversions with fixed options
///
/// # Example
///
/// ```
/// use access2excel::convert::{ConvertOptions, Converter, MemoryProgress};
/// use access2excel::database::{ColumnType, MemoryDatabase, Value};
/// use access2excel::sheet::Workbook;
/// use std::io::Cursor;
///
/// let mut db = MemoryDatabase::builder()
///     .table("Items", [("Qty", ColumnType::Int32)], vec![vec![Some(Value::Int32(3))]])
///     .build()?;
/// let options = ConvertOptions::default();
/// let mut workbook = Workbook::create(options.format, options.date_system);
/// let mut progress = MemoryProgress::new();
/// let mut out = Cursor::new(Vec::new());
///
/// Converter::new(options).convert(&mut db, &mut workbook, &mut out, &mut progress)?;
/// assert_eq!(progress.lines, vec!["Table Items...", "Done."]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
    guard: Option<PathGuard>,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            guard: None,
        }
    }

    /// Confine [`Converter::run`] to `guard` instead of the current directory.
    pub fn with_guard(mut self, guard: PathGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert `database` into `workbook` and write it to `output`.
    ///
    /// A failure is reported on `progress` as `Error: <kind>[ - <message>]`
    /// and returned. The database is closed either way.
    pub fn convert<W, O>(
        &self,
        database: &mut dyn Database,
        workbook: &mut W,
        output: &mut O,
        progress: &mut dyn ProgressSink,
    ) -> Result<()>
    where
        W: WorkbookSink,
        O: Write + Seek,
    {
        let result = self
            .write_workbook(database, workbook, output, progress)
            .map(|()| progress.write(DONE));

        if let Err(e) = database.close() {
            warn!(error = %e, "failed to close database");
        }

        match result {
            Ok(()) => {
                info!(format = %workbook.format(), "conversion finished");
                Ok(())
            },
            Err(e) => Err(report(e, progress)),
        }
    }

    fn write_workbook<W, O>(
        &self,
        database: &mut dyn Database,
        workbook: &mut W,
        output: &mut O,
        progress: &mut dyn ProgressSink,
    ) -> Result<()>
    where
        W: WorkbookSink,
        O: Write + Seek,
    {
        convert_tables(database, workbook, &self.options, progress)?;
        workbook.write_to(output)?;
        output.flush()?;
        Ok(())
    }

    /// Convert the database file at `input` into a new file at `output`.
    ///
    /// Both paths must lie inside the guard's root. No file is created when
    /// a path is rejected or the database cannot be opened.
    pub fn run(&self, input: &Path, output: &Path, progress: &mut dyn ProgressSink) -> Result<()> {
        let guard = match &self.guard {
            Some(guard) => guard.clone(),
            None => PathGuard::current_dir().map_err(|e| report(e, progress))?,
        };
        guard.check(input).map_err(|e| report(e, progress))?;
        guard.check(output).map_err(|e| report(e, progress))?;

        let mut database =
            MdbToolsDatabase::open_read_only(input, self.options.mdbtools_dir.as_deref())
                .map_err(|e| report(Error::Open(e.to_string()), progress))?;

        self.write_file(&mut database, output, progress)
    }

    /// Convert an already open `database` into a new file at `output`.
    ///
    /// On failure the partially written file is kept or deleted according
    /// to [`ConvertOptions::on_error`].
    pub fn write_file(
        &self,
        database: &mut dyn Database,
        output: &Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        let file = match File::create(output) {
            Ok(file) => file,
            Err(e) => {
                if let Err(close) = database.close() {
                    warn!(error = %close, "failed to close database");
                }
                return Err(report(Error::Conversion(e.to_string()), progress));
            },
        };

        let mut out = BufWriter::new(file);
        let mut workbook = Workbook::create(self.options.format, self.options.date_system);
        let result = self.convert(database, &mut workbook, &mut out, progress);
        drop(out);

        if result.is_err() && self.options.on_error == PartialOutput::Delete {
            match std::fs::remove_file(output) {
                Ok(()) => warn!(path = %output.display(), "deleted partial output"),
                Err(e) => warn!(path = %output.display(), error = %e, "could not delete partial output"),
            }
        }
        result
    }
}

/// Send `err` to the error channel and the log, and hand it back.
fn report(err: Error, progress: &mut dyn ProgressSink) -> Error {
    let line = err.report_line();
    error!("{}", line);
    progress.error(&line);
    err
}
