//! Conversion of Access databases into Excel workbooks.
//!
//! [`Converter`] ties the pieces together: the [`PathGuard`] confines file
//! paths, [`mapper`] turns database values into cells, and a
//! [`ProgressSink`] receives one line per table.

pub mod converter;
pub mod guard;
pub mod mapper;
pub mod options;
pub mod progress;

pub use converter::{Converter, DONE, convert_tables};
pub use guard::{PathGuard, assert_within_root};
pub use mapper::{MapError, MappedCell, StyleHint, map_value};
pub use options::{ConvertOptions, PartialOutput};
pub use progress::{ConsoleProgress, MemoryProgress, ProgressSink, SilentProgress, StatusProgress};
