//! Row filtering: numeric id ranges and field equality.

use crate::config::ID_FIELD;
use crate::record::Row;

/// Filter parameters for [`Registry::query`](crate::Registry::query).
///
/// The id range applies first: a row's `id` field is parsed as an integer
/// and must fall within `[min_id, max_id]`, default `[0, +∞)`. A row whose
/// `id` is missing or not an integer counts as `id = +∞` and survives only
/// while the range stays unbounded above. The optional field check then
/// compares raw string values. Both checks are stable, so surviving rows
/// keep their original relative order.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    field: Option<(String, String)>,
    min_id: i64,
    max_id: Option<i64>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only rows whose `field` equals `value` (string equality).
    pub fn field_equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field = Some((field.into(), value.into()));
        self
    }

    pub fn min_id(mut self, min_id: i64) -> Self {
        self.min_id = min_id;
        self
    }

    pub fn max_id(mut self, max_id: i64) -> Self {
        self.max_id = Some(max_id);
        self
    }

    fn in_range(&self, row: &Row) -> bool {
        match row.get(ID_FIELD).and_then(|value| value.parse::<i64>().ok()) {
            Some(id) => self.min_id <= id && self.max_id.map_or(true, |max| id <= max),
            // no usable id: sits past every bounded range
            None => self.max_id.is_none(),
        }
    }

    fn matches_field(&self, row: &Row) -> bool {
        match &self.field {
            Some((field, value)) => row.get(field) == Some(value.as_str()),
            None => true,
        }
    }
}

/// Applies `filter` to `rows`, preserving relative order.
pub(crate) fn filter_rows(rows: &[Row], filter: &Filter) -> Vec<Row> {
    rows.iter()
        .filter(|row| filter.in_range(row) && filter.matches_field(row))
        .cloned()
        .collect()
}
