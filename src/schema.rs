//! Table schemas: the declared field list and the key fields that define
//! row uniqueness.
//!
//! Key derivation is configuration rather than specialization. A table
//! declares which of its fields compose the uniqueness key, and one shared
//! implementation derives the key tuple from any row. Key fields must hold
//! integer values.

use crate::config::ID_FIELD;
use crate::error::{Error, Result};
use crate::record::Row;
use smallvec::SmallVec;
use std::fmt;

/// The derived uniqueness key of a row: the integer values of the table's
/// key fields in declaration order.
///
/// Tables key on one or two fields in practice, so the tuple is stored
/// inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey(SmallVec<[i64; 2]>);

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            return write!(f, "{}", self.0[0]);
        }
        write!(f, "(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{part}")?;
        }
        write!(f, ")")
    }
}

/// A table's declared shape: its ordered field list and its key fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    fields: Vec<String>,
    key_fields: Vec<String>,
}

impl TableSchema {
    /// Declares a schema with the given ordered field list. The uniqueness
    /// key defaults to the `id` field alone; override it with
    /// [`with_key`](Self::with_key).
    pub fn new(fields: Vec<impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            key_fields: vec![ID_FIELD.to_string()],
        }
    }

    pub fn with_key(mut self, key_fields: Vec<impl Into<String>>) -> Self {
        self.key_fields = key_fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn key_fields(&self) -> &[String] {
        &self.key_fields
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field == name)
    }

    /// Checks that the field list is non-empty and free of duplicates, and
    /// that every key field is part of it.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::InvalidSchema("field list is empty".to_string()));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].contains(field) {
                return Err(Error::InvalidSchema(format!("duplicate field '{field}'")));
            }
        }
        if self.key_fields.is_empty() {
            return Err(Error::InvalidSchema("key field list is empty".to_string()));
        }
        for key_field in &self.key_fields {
            if !self.has_field(key_field) {
                return Err(Error::InvalidSchema(format!(
                    "key field '{key_field}' is not part of the field list"
                )));
            }
        }
        Ok(())
    }

    /// Derives the uniqueness key for `row` from the declared key fields.
    pub(crate) fn derive_key(&self, row: &Row) -> Result<RecordKey> {
        let mut parts = SmallVec::new();
        for field in &self.key_fields {
            let value = row
                .get(field)
                .ok_or_else(|| Error::MalformedRecord(format!("missing key field '{field}'")))?;
            let part = value.parse::<i64>().map_err(|_| {
                Error::MalformedRecord(format!(
                    "key field '{field}' is not an integer: '{value}'"
                ))
            })?;
            parts.push(part);
        }
        Ok(RecordKey(parts))
    }

    /// Employee table: `(id, name, age, salary, department_id)`, keyed on
    /// `(id, department_id)`.
    pub fn employees() -> Self {
        Self::new(vec!["id", "name", "age", "salary", "department_id"])
            .with_key(vec!["id", "department_id"])
    }

    /// Department table: `(id, department_name)`, keyed on `id`.
    pub fn departments() -> Self {
        Self::new(vec!["id", "department_name"])
    }

    /// Orders table: `(id, total_amount, customer_id)`, keyed on `id`.
    pub fn orders() -> Self {
        Self::new(vec!["id", "total_amount", "customer_id"])
    }
}
