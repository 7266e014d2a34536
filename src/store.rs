// src/store.rs
use std::{fs, io, path::{Path, PathBuf}};

use tracing::{debug, info};

use crate::config::{DatasetKind, consts::STORE_SEP};
use crate::csv::parse_rows;
use crate::error::StoreError;
use crate::file::write_table_atomic;
use crate::schema::{Record, Schema, looks_like_header};

/// A table: optional header plus data rows. Used for the canonical file and
/// for freshly scraped batches alike.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Record>,
    pub rows: Vec<Record>,
}

impl DataSet {
    pub fn new(headers: Option<Record>, rows: Vec<Record>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_none() && self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Split a raw row list whose first line may be a header.
    pub fn from_rows(kind: DatasetKind, mut rows: Vec<Record>) -> Self {
        let has_header = rows.first().is_some_and(|r| looks_like_header(kind, r));
        let headers = if has_header { Some(rows.remove(0)) } else { None };
        Self { headers, rows }
    }
}

/// A loaded canonical dataset together with its resolved schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loaded {
    pub data: DataSet,
    pub schema: Schema,
}

/// The on-disk canonical table for one dataset.
///
/// Single writer, whole-file replace. Holds its path so a lock can be added
/// around `load`/`save` without touching callers.
#[derive(Clone, Debug)]
pub struct Store {
    kind: DatasetKind,
    path: PathBuf,
}

impl Store {
    pub fn new(kind: DatasetKind, path: impl Into<PathBuf>) -> Self {
        Self { kind, path: path.into() }
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the canonical file. `Ok(None)` if it does not exist yet.
    ///
    /// An existing file that cannot be read or parsed is an error; it is
    /// never treated as empty, since the next save would overwrite it.
    pub fn load(&self) -> Result<Option<Loaded>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(dataset = %self.kind, path = %self.path.display(), "no canonical file yet");
                return Ok(None);
            }
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };

        let rows = parse_rows(&text, STORE_SEP)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })?;
        let data = DataSet::from_rows(self.kind, rows);
        let schema = Schema::resolve(self.kind, data.headers());

        debug!(
            dataset = %self.kind,
            rows = data.len(),
            header = data.headers.is_some(),
            "loaded canonical file"
        );
        Ok(Some(Loaded { data, schema }))
    }

    pub fn save(&self, data: &DataSet) -> Result<(), StoreError> {
        write_table_atomic(&self.path, data.headers(), &data.rows, STORE_SEP)?;
        info!(dataset = %self.kind, rows = data.len(), path = %self.path.display(), "saved canonical file");
        Ok(())
    }
}
