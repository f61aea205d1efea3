//! Equality join between two row sets.

use crate::config::ID_FIELD;
use crate::record::Row;
use hashbrown::HashMap;

/// Inner-joins `left` against `right` on `key`.
///
/// The right side is indexed by its `id` field, later rows winning on
/// duplicate ids. For every left row whose `key` value matches a right-side
/// id, the right row's fields are merged into a copy of the left row, right
/// values winning on name collision; the merged `id` field is then moved
/// under the key field name, so the join key keeps its name and the
/// redundant `id` disappears. Left rows with no match (or no `key` field)
/// are dropped. Output order follows the left side.
pub(crate) fn join_rows(left: &[Row], right: &[Row], key: &str) -> Vec<Row> {
    let mut right_by_id: HashMap<&str, &Row> = HashMap::with_capacity(right.len());
    for row in right {
        if let Some(id) = row.get(ID_FIELD) {
            right_by_id.insert(id, row);
        }
    }

    let mut joined = Vec::new();
    for row in left {
        let Some(matched) = row.get(key).and_then(|value| right_by_id.get(value)) else {
            continue;
        };
        let mut merged = row.clone();
        for (field, value) in matched.iter() {
            merged.set(field, value);
        }
        if let Some(id) = merged.remove(ID_FIELD) {
            merged.set(key, id);
        }
        joined.push(merged);
    }
    joined
}
