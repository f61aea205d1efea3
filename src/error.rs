//! Typed error conditions for store operations.
//!
//! Every failure is signaled synchronously to the caller; nothing is retried
//! internally. The one non-fatal condition in the crate is a duplicate row
//! encountered while loading a backing file, which is skipped with a stderr
//! warning instead of surfacing here.

use crate::schema::RecordKey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("table '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("table '{0}' does not exist")]
    TableNotFound(String),

    /// The inserted row derived a key that is already present in the table.
    #[error("duplicate entry found: {0}")]
    DuplicateKey(RecordKey),

    /// Aggregation over an empty row set.
    #[error("table is empty")]
    EmptyTable,

    /// Aggregation referenced a field at least one row does not carry.
    #[error("field '{0}' not found")]
    FieldNotFound(String),

    /// Average aggregation hit a value that does not parse as a number.
    #[error("cannot calculate average for non-numeric value '{0}'")]
    NonNumeric(String),

    #[error("unknown aggregation method '{0}'")]
    UnknownOperation(String),

    /// A record or backing file does not match the table schema.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A schema was declared inconsistently, e.g. a key field that is not
    /// part of the field list.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
