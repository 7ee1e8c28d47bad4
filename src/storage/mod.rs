//! Storage layer for fintrack
//!
//! A single JSON snapshot file with atomic writes and a lenient,
//! record-by-record loader.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json_value, write_json_atomic};
pub use snapshot::{LoadReport, SkippedRecord, Snapshot, Unparsed};
