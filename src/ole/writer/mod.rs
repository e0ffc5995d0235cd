//! OLE2 compound file writing.
//!
//! Only what an `.xls` container needs is supported: version 3 files with
//! 512-byte sectors and streams directly under the root storage.

mod core;
mod difat;
mod directory;
mod fat;
mod header;
mod minifat;


pub use core::OleWriter;
