//! Atomic CSV export.
//!
//! Exports are written to a hidden sibling file and renamed over the target
//! once flushed, so readers never observe a half-written CSV. All paths are
//! resolved inside a capability [`Dir`].

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::fs::{Dir, OpenOptions};

use crate::csv_io::{product_summary_to_csv, time_series_to_csv};
use crate::error::ExportError;
use crate::rows::{ProductSummaryRow, TimeSeriesRow};

static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes the time series as CSV to `path` inside `dir`, atomically.
///
/// # Errors
///
/// Returns [`ExportError::WriteError`] for I/O failures or a path that is
/// not a plain file name, and [`ExportError::Csv`] if serialisation fails.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use cap_std::{ambient_authority, fs::Dir};
/// use dashboard_data::{SeedPolicy, generate_dataset, write_time_series_csv};
///
/// let root = std::env::temp_dir().join(format!("dashboard-data-doc-{}", std::process::id()));
/// std::fs::create_dir_all(&root).expect("create temp dir");
/// let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("open dir");
/// let dataset = generate_dataset(SeedPolicy::Fixed(42)).expect("dataset");
///
/// write_time_series_csv(&dir, Utf8Path::new("series.csv"), &dataset.time_series)
///     .expect("export");
///
/// let text = dir.read_to_string("series.csv").expect("read back");
/// assert_eq!(text.lines().count(), 91);
/// std::fs::remove_dir_all(&root).expect("clean up");
/// ```
pub fn write_time_series_csv(
    dir: &Dir,
    path: &Utf8Path,
    rows: &[TimeSeriesRow],
) -> Result<(), ExportError> {
    let text = time_series_to_csv(rows)?;
    write_atomic(dir, path, &text)
}

/// Writes the product summary as CSV to `path` inside `dir`, atomically.
///
/// # Errors
///
/// See [`write_time_series_csv`].
pub fn write_product_summary_csv(
    dir: &Dir,
    path: &Utf8Path,
    rows: &[ProductSummaryRow],
) -> Result<(), ExportError> {
    let text = product_summary_to_csv(rows)?;
    write_atomic(dir, path, &text)
}

fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), ExportError> {
    let file_name = plain_file_name(path)?;
    let staged = StagedFile::create(dir, file_name).map_err(|err| write_error(path, &err))?;
    staged
        .fill(contents)
        .and_then(|()| staged.publish(file_name))
        .map_err(|err| write_error(path, &err))?;

    // Directory sync is best-effort; some filesystems refuse it.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Nothing to recover.
    }
    Ok(())
}

fn plain_file_name(path: &Utf8Path) -> Result<&str, ExportError> {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) => Ok(name),
        _ => Err(ExportError::WriteError {
            path: path.to_path_buf(),
            message: "export path must be a plain file name".to_owned(),
        }),
    }
}

fn write_error(path: &Utf8Path, err: &io::Error) -> ExportError {
    ExportError::WriteError {
        path: Utf8PathBuf::from(path),
        message: err.to_string(),
    }
}

/// Hidden temporary file removed on drop unless published.
struct StagedFile<'dir> {
    dir: &'dir Dir,
    name: String,
    published: std::cell::Cell<bool>,
}

impl<'dir> StagedFile<'dir> {
    fn create(dir: &'dir Dir, target: &str) -> io::Result<Self> {
        let counter = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = format!(".{target}.{}.{counter}.partial", std::process::id());
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        drop(dir.open_with(&name, &options)?);
        Ok(Self {
            dir,
            name,
            published: std::cell::Cell::new(false),
        })
    }

    fn fill(&self, contents: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).truncate(true);
        let mut file = self.dir.open_with(&self.name, &options)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }

    fn publish(&self, target: &str) -> io::Result<()> {
        // Windows refuses to rename over an existing file.
        if cfg!(windows) {
            match self.dir.remove_file(target) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err),
                _ => {}
            }
        }
        self.dir.rename(&self.name, self.dir, target)?;
        self.published.set(true);
        Ok(())
    }
}

impl Drop for StagedFile<'_> {
    fn drop(&mut self) {
        if !self.published.get() && self.dir.remove_file(&self.name).is_err() {
            // Leftover staging files are hidden and harmless.
        }
    }
}

#[cfg(test)]
mod tests {
    use cap_std::ambient_authority;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;
    use crate::csv_io::time_series_from_csv;
    use crate::generator::{SeedPolicy, generate_dataset, product_summary};

    struct Workspace {
        _root: TempDir,
        dir: Dir,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let root = TempDir::new().expect("temp dir");
        let dir = Dir::open_ambient_dir(root.path(), ambient_authority()).expect("open dir");
        Workspace { _root: root, dir }
    }

    #[rstest]
    fn export_round_trips_through_disk(workspace: Workspace) {
        let dataset = generate_dataset(SeedPolicy::Fixed(42)).expect("dataset");
        write_time_series_csv(
            &workspace.dir,
            Utf8Path::new("dashboard_data.csv"),
            &dataset.time_series,
        )
        .expect("export");

        let text = workspace
            .dir
            .read_to_string("dashboard_data.csv")
            .expect("read back");
        assert_eq!(time_series_from_csv(&text).expect("parse"), dataset.time_series);
    }

    #[rstest]
    fn export_replaces_existing_file_and_leaves_no_staging(workspace: Workspace) {
        workspace
            .dir
            .write("products.csv", "stale")
            .expect("seed stale file");
        write_product_summary_csv(
            &workspace.dir,
            Utf8Path::new("products.csv"),
            &product_summary(),
        )
        .expect("export");

        let text = workspace.dir.read_to_string("products.csv").expect("read");
        assert!(text.starts_with("product_name,"));
        let names: Vec<_> = workspace
            .dir
            .entries()
            .expect("list")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["products.csv".to_owned()]);
    }

    #[rstest]
    #[case("nested/out.csv")]
    #[case("../escape.csv")]
    #[case("")]
    fn non_plain_paths_are_rejected(workspace: Workspace, #[case] path: &str) {
        let err = write_time_series_csv(&workspace.dir, Utf8Path::new(path), &[])
            .expect_err("path must be rejected");
        assert!(matches!(err, ExportError::WriteError { .. }));
    }
}
