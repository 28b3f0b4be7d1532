//! # File I/O Module
//!
//! Reads and writes the reference thread table.
//!
//! - **Load**: every call re-reads the file; nothing is cached between calls
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//!
//! ## Example
//!
//! ```rust,no_run
//! use bolt_core::file_io::{load_table, save_table};
//! use std::path::Path;
//!
//! let table = load_table(Path::new("data/threads.csv"))?;
//! save_table(&table, Path::new("data/threads-copy.csv"))?;
//! # Ok::<(), bolt_core::errors::BoltError>(())
//! ```

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::errors::{BoltError, BoltResult};
use crate::materials::ThreadTable;

/// Load a reference table from a CSV file.
///
/// # Returns
///
/// * `Ok(ThreadTable)` - Parsed table
/// * `Err(BoltError::FileError)` - File could not be opened
/// * `Err(BoltError::TableParse)` - Malformed row
pub fn load_table(path: &Path) -> BoltResult<ThreadTable> {
    debug!(path = %path.display(), "Loading thread table");

    let file = File::open(path).map_err(|e| {
        BoltError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    ThreadTable::from_csv_reader(BufReader::new(file), &path.display().to_string())
}

/// Save a reference table with atomic write semantics.
///
/// The save process:
/// 1. Serialize the table to CSV in memory
/// 2. Write to a temporary file (`<path>.tmp`)
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_table(table: &ThreadTable, path: &Path) -> BoltResult<()> {
    let mut buf = Vec::new();
    table.write_csv(&mut buf).map_err(|e| {
        BoltError::file_error("serialize", path.display().to_string(), e.to_string())
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        BoltError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(&buf).map_err(|e| {
        BoltError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        BoltError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        BoltError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), rows = table.len(), "Thread table saved");
    Ok(())
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    name.into()
}
