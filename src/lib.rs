//! # FlatDB - Flat-File Table Store
//!
//! FlatDB is a minimal in-process data store: a registry of named tables,
//! each backed by one delimited text file, with duplicate-key rejection,
//! filtered queries, a two-table equality join, and field aggregation.
//!
//! ## Quick Start
//!
//! ```rust
//! use flatdb::{Filter, Registry, TableSchema};
//! # use tempfile::tempdir;
//! # let dir = tempdir().unwrap();
//! let mut registry = Registry::open(dir.path())?;
//! registry.create_table("employees", TableSchema::employees())?;
//! registry.create_table("departments", TableSchema::departments())?;
//!
//! registry.insert_into("employees", "1 John 30 50000 21")?;
//! registry.insert_into("departments", "21 Engineering")?;
//!
//! let seniors = registry.query("employees", &Filter::new().min_id(1))?;
//! let joined = registry.join_tables("employees", "departments", "department_id")?;
//! assert_eq!(joined[0].get("department_name"), Some("Engineering"));
//!
//! let avg = registry.aggregate("avg", "salary", &seniors)?;
//! assert_eq!(avg, "Average salary: 50000.0");
//! # Ok::<(), flatdb::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller
//!   │
//!   ▼
//! Registry ── resolve name ──► Table ── codec ──► backing file
//!   │                            │
//!   ▼                            ▼
//! query / join / aggregate ◄── in-memory rows
//! ```
//!
//! The registry maps table names to [`Table`] instances and is the single
//! point of access for operations. Each table owns an ordered row sequence,
//! a derived-key set enforcing its uniqueness invariant, and one backing
//! file that is fully rewritten on every successful insert (write-through).
//! Query and join operate on in-memory rows and also accept materialized
//! row sequences, so their results compose.
//!
//! ## File Layout
//!
//! One delimited text file per table, header line first:
//!
//! ```text
//! root/
//! ├── employees.csv    # id,name,age,salary,department_id
//! ├── departments.csv  # id,department_name
//! └── orders.csv       # id,total_amount,customer_id
//! ```
//!
//! ## Design Constraints
//!
//! - Single-threaded and synchronous: one registry per process, passed by
//!   reference; no locks, no transactions.
//! - Concurrent writers on the same backing file are unsupported; every
//!   insert rewrites the whole file.
//! - Insert-time records are whitespace-delimited and zipped positionally
//!   against the schema, unlike the quoted delimited backing-file format.
//!
//! ## Module Overview
//!
//! - [`registry`]: name → table map, operation routing
//! - [`table`]: load / insert / save with the uniqueness invariant
//! - [`record`]: `Row` and the delimited-file codec
//! - [`schema`]: field lists, key fields, derived keys
//! - [`query`]: id-range and field-equality filtering
//! - [`error`]: typed failure conditions

pub mod config;
pub mod error;
pub mod query;
pub mod record;
pub mod registry;
pub mod schema;
pub mod table;

mod aggregate;
mod join;

pub use aggregate::AggregateOp;
pub use error::{Error, Result};
pub use query::Filter;
pub use record::Row;
pub use registry::{Registry, Source};
pub use schema::{RecordKey, TableSchema};
pub use table::Table;
