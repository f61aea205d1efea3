//! The registry: the single point of access for table operations.
//!
//! One registry is constructed at process start and passed by reference to
//! everything that needs the store; there is no hidden global instance. The
//! registry owns every table, resolves names, and routes insert, query,
//! join, and aggregate calls.
//!
//! Query and join accept either a table name or an already-materialized row
//! sequence, so results can feed back into further operations:
//!
//! the rows returned by a join can be filtered with `query`, and the rows
//! returned by `query` can be aggregated.

use crate::aggregate;
use crate::config::TABLE_FILE_EXT;
use crate::error::{Error, Result};
use crate::join;
use crate::query::{self, Filter};
use crate::record::Row;
use crate::schema::TableSchema;
use crate::table::Table;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A row source for query and join operations: a registered table resolved
/// by name, or a materialized row sequence.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Table(&'a str),
    Rows(&'a [Row]),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(name: &'a str) -> Self {
        Source::Table(name)
    }
}

impl<'a> From<&'a [Row]> for Source<'a> {
    fn from(rows: &'a [Row]) -> Self {
        Source::Rows(rows)
    }
}

impl<'a> From<&'a Vec<Row>> for Source<'a> {
    fn from(rows: &'a Vec<Row>) -> Self {
        Source::Rows(rows)
    }
}

#[derive(Debug)]
pub struct Registry {
    root: PathBuf,
    tables: HashMap<String, Table>,
}

impl Registry {
    /// Opens a registry rooted at `root`, creating the directory when
    /// needed. Backing files for tables created through
    /// [`create_table`](Self::create_table) live directly under it.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            tables: HashMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registers `table` under `name`. Registering a name twice fails
    /// without touching the existing entry.
    pub fn add_table(&mut self, name: impl Into<String>, table: Table) -> Result<()> {
        let name = name.into();
        if self.tables.contains_key(&name) {
            return Err(Error::AlreadyRegistered(name));
        }
        self.tables.insert(name, table);
        Ok(())
    }

    /// Opens a table over `<root>/<name>.csv` and registers it in one step.
    pub fn create_table(&mut self, name: impl Into<String>, schema: TableSchema) -> Result<()> {
        let name = name.into();
        if self.tables.contains_key(&name) {
            return Err(Error::AlreadyRegistered(name));
        }
        let path = self.root.join(format!("{name}.{TABLE_FILE_EXT}"));
        let table = Table::open(schema, path)?;
        self.tables.insert(name, table);
        Ok(())
    }

    pub fn fetch_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    fn fetch_table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Inserts a whitespace-delimited record into the named table,
    /// propagating Duplicate-Key and Not-Found conditions.
    pub fn insert_into(&mut self, name: &str, record_text: &str) -> Result<()> {
        self.fetch_table_mut(name)?.insert(record_text)
    }

    fn resolve<'a>(&'a self, source: Source<'a>) -> Result<&'a [Row]> {
        match source {
            Source::Table(name) => Ok(self.fetch_table(name)?.rows()),
            Source::Rows(rows) => Ok(rows),
        }
    }

    /// Filters a source's rows, preserving their relative order; see
    /// [`Filter`] for the range and equality semantics.
    pub fn query<'a>(
        &'a self,
        source: impl Into<Source<'a>>,
        filter: &Filter,
    ) -> Result<Vec<Row>> {
        Ok(query::filter_rows(self.resolve(source.into())?, filter))
    }

    /// Inner-joins `left` against `right` on `key`: right rows are indexed
    /// by their `id` field, matched right fields are merged into a copy of
    /// the left row (right wins on collision), and the merged `id` is moved
    /// under the key field name. Unmatched left rows are dropped; output
    /// order follows the left side.
    pub fn join_tables<'a>(
        &'a self,
        left: impl Into<Source<'a>>,
        right: impl Into<Source<'a>>,
        key: &str,
    ) -> Result<Vec<Row>> {
        let left = self.resolve(left.into())?;
        let right = self.resolve(right.into())?;
        Ok(join::join_rows(left, right, key))
    }

    /// Aggregates `field` across `rows` with `operation` (one of `avg`,
    /// `min`, `max`, `count`), returning a formatted description such as
    /// `"Average salary: 46000.0"`.
    pub fn aggregate(&self, operation: &str, field: &str, rows: &[Row]) -> Result<String> {
        aggregate::aggregate(operation, field, rows)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn registering_the_same_name_twice_fails_without_mutating() {
        let dir = tempdir().unwrap();
        let mut registry = Registry::open(dir.path()).unwrap();

        registry
            .create_table("departments", TableSchema::departments())
            .unwrap();
        registry.insert_into("departments", "21 Engineering").unwrap();

        let err = registry
            .create_table("departments", TableSchema::departments())
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyRegistered(name) if name == "departments"));

        // the original table is untouched
        assert_eq!(registry.fetch_table("departments").unwrap().len(), 1);
    }

    #[test]
    fn add_table_accepts_tables_with_custom_paths() {
        let dir = tempdir().unwrap();
        let mut registry = Registry::open(dir.path()).unwrap();
        let table = Table::open(
            TableSchema::orders(),
            dir.path().join("archive-orders.csv"),
        )
        .unwrap();

        registry.add_table("orders", table).unwrap();
        assert!(registry.fetch_table("orders").is_ok());
    }

    #[test]
    fn unknown_table_names_are_reported_on_every_operation() {
        let dir = tempdir().unwrap();
        let mut registry = Registry::open(dir.path()).unwrap();

        assert!(matches!(
            registry.fetch_table("ghost").unwrap_err(),
            Error::TableNotFound(name) if name == "ghost"
        ));
        assert!(matches!(
            registry.insert_into("ghost", "1 x").unwrap_err(),
            Error::TableNotFound(_)
        ));
        assert!(matches!(
            registry.query("ghost", &Filter::new()).unwrap_err(),
            Error::TableNotFound(_)
        ));
        assert!(matches!(
            registry.join_tables("ghost", "ghost", "id").unwrap_err(),
            Error::TableNotFound(_)
        ));
    }

    #[test]
    fn query_accepts_materialized_rows() {
        let dir = tempdir().unwrap();
        let registry = Registry::open(dir.path()).unwrap();
        let rows: Vec<Row> = vec![
            [("id", "1"), ("name", "John")].into_iter().collect(),
            [("id", "5"), ("name", "Susan")].into_iter().collect(),
        ];

        let result = registry.query(&rows, &Filter::new().min_id(2)).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].get("name"), Some("Susan"));
    }

    #[test]
    fn create_table_places_backing_files_under_the_root() {
        let dir = tempdir().unwrap();
        let mut registry = Registry::open(dir.path()).unwrap();

        registry
            .create_table("orders", TableSchema::orders())
            .unwrap();
        registry.insert_into("orders", "1 300 1").unwrap();

        assert!(dir.path().join("orders.csv").exists());
    }
}
