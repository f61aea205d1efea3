//! A named collection of rows backed by one delimited file.
//!
//! Tables load their backing file at open time, enforce the derived-key
//! uniqueness invariant on every insert, and persist the full row set back
//! to the file after each successful mutation. There is no delete
//! operation.
//!
//! Concurrent writers are unsupported: every insert rewrites the whole
//! file, so interleaved writers would lose rows. A concurrent
//! reimplementation would need the insert-then-save sequence inside a
//! per-table exclusive lock.

use crate::error::{Error, Result};
use crate::record::{self, Row};
use crate::schema::{RecordKey, TableSchema};
use hashbrown::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Table {
    schema: TableSchema,
    path: PathBuf,
    rows: Vec<Row>,
    seen_keys: HashSet<RecordKey>,
}

impl Table {
    /// Opens a table over `path`, loading any rows the backing file already
    /// holds. A missing file leaves the table empty; it is created by the
    /// first insert.
    pub fn open(schema: TableSchema, path: impl Into<PathBuf>) -> Result<Self> {
        schema.validate()?;
        let mut table = Self {
            schema,
            path: path.into(),
            rows: Vec::new(),
            seen_keys: HashSet::new(),
        };
        table.load()?;
        Ok(table)
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Populates in-memory state from the backing file. Rows whose key was
    /// already seen are skipped with a warning, first occurrence wins. Load
    /// never rewrites the file.
    fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let contents = fs::read_to_string(&self.path)?;
        for row in record::decode_file(self.schema.fields(), &contents)? {
            let key = self.schema.derive_key(&row)?;
            if self.seen_keys.contains(&key) {
                eprintln!(
                    "Warning: skipping duplicate entry {} in {}",
                    key,
                    self.path.display()
                );
                continue;
            }
            self.seen_keys.insert(key);
            self.rows.push(row);
        }
        Ok(())
    }

    /// Decodes a whitespace-delimited record, rejects it when its derived
    /// key is already present, then appends it and persists the whole
    /// table. Every successful insert is immediately durable.
    pub fn insert(&mut self, record_text: &str) -> Result<()> {
        let row = record::decode_record(self.schema.fields(), record_text)?;
        let key = self.schema.derive_key(&row)?;
        if self.seen_keys.contains(&key) {
            return Err(Error::DuplicateKey(key));
        }
        self.rows.push(row);
        self.seen_keys.insert(key);
        self.save()
    }

    /// Rewrites the backing file from the in-memory row sequence, header
    /// included.
    pub fn save(&self) -> Result<()> {
        fs::write(
            &self.path,
            record::encode_all(self.schema.fields(), &self.rows),
        )?;
        Ok(())
    }
}
