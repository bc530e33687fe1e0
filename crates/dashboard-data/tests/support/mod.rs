//! Shared capability-based filesystem helpers for dashboard-data tests.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Create a unique, empty directory under `target/dashboard-data-tests`.
///
/// # Errors
///
/// Returns any filesystem errors encountered while creating the directory.
pub fn unique_output_dir(prefix: &str) -> io::Result<Utf8PathBuf> {
    static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir_name = format!("{prefix}-{}-{counter}", std::process::id());
    let dir = Utf8PathBuf::from("target")
        .join("dashboard-data-tests")
        .join(dir_name);
    let root = Dir::open_ambient_dir(".", ambient_authority())?;
    root.create_dir_all(&dir)?;
    Ok(dir)
}

/// Read a file from `dir` through a capability handle.
///
/// # Errors
///
/// Returns any filesystem errors encountered while reading.
pub fn read_export(dir: &Utf8Path, file_name: &str) -> io::Result<String> {
    Dir::open_ambient_dir(dir, ambient_authority())?.read_to_string(file_name)
}
