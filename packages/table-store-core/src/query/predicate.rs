//! Equality predicates over rows.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::dataset::Row;

/// Matches rows whose `field` equals `value`. Rows without the field never match.
pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> impl Fn(&Row) -> bool {
    let field = field.into();
    let value = value.into();
    move |row| row.get(&field) == Some(&value)
}

/// Matches rows satisfying every field equality filter. An empty filter
/// set matches every row.
pub fn matches_all(filters: BTreeMap<String, Value>) -> impl Fn(&Row) -> bool {
    move |row| {
        filters
            .iter()
            .all(|(field, expected)| row.get(field) == Some(expected))
    }
}
