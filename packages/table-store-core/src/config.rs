//! Store construction options.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Options supplied alongside the dataset at construction.
///
/// `tables` and `columns` are the fallback metadata used when the dataset
/// does not embed its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Known table names
    pub tables: Option<Vec<String>>,
    /// Known column names per table
    pub columns: Option<BTreeMap<String, Vec<String>>>,
    /// Reject queries and joins on tables missing from the resolved table list
    pub strict_tables: bool,
}

impl StoreOptions {
    /// Creates options carrying table and column metadata.
    pub fn with_metadata(tables: Vec<String>, columns: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            tables: Some(tables),
            columns: Some(columns),
            ..Default::default()
        }
    }
}
