// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::csv::write_rows;
use crate::error::StoreError;

/// Replace `path` with a table in one step.
///
/// Rows go to a sibling temp file which is flushed, synced, then renamed over
/// the target. On any failure the temp file is removed and the previous
/// contents of `path` are left untouched.
pub fn write_table_atomic(
    path: &Path,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    sep: char,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let tmp = temp_sibling(path);
    let written = write_and_sync(&tmp, headers, rows, sep).and_then(|()| fs::rename(&tmp, path));

    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Write { path: path.to_path_buf(), source });
    }
    debug!(path = %path.display(), rows = rows.len(), "replaced file");
    Ok(())
}

fn write_and_sync(
    tmp: &Path,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    sep: char,
) -> io::Result<()> {
    let file = File::create(tmp)?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out, headers, rows, sep)?;
    out.flush()?;
    out.get_ref().sync_all()
}

/// `dir/name.csv` → `dir/.name.csv.tmp`
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!("dataset"));
    path.with_file_name(join!(".", &name, ".tmp"))
}

pub fn ensure_directory(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() && !dir.is_dir() {
        return Err(StoreError::NotADirectory { path: dir.to_path_buf() });
    }
    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|source| StoreError::Write { path: dir.to_path_buf(), source })?;
    }
    Ok(())
}
