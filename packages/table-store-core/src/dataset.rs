//! Dataset value, row representation, and metadata resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::StoreOptions;
use crate::error::StoreError;

/// One record: field name to JSON value.
pub type Row = serde_json::Map<String, Value>;

/// Key under which a dataset value may embed its own metadata.
pub const METADATA_KEY: &str = "metadata";

/// Descriptive table and column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Known table names
    pub tables: Option<Vec<String>>,
    /// Known column names per table
    pub columns: Option<BTreeMap<String, Vec<String>>>,
}

impl Metadata {
    /// Resolves metadata field by field, preferring the dataset's embedded
    /// values over the options, and checks that the result is usable.
    pub(crate) fn resolve(
        embedded: Option<&Metadata>,
        options: &StoreOptions,
    ) -> Result<Metadata, StoreError> {
        let tables = embedded
            .and_then(|m| m.tables.clone())
            .or_else(|| options.tables.clone());
        let columns = embedded
            .and_then(|m| m.columns.clone())
            .or_else(|| options.columns.clone());

        let metadata = Metadata { tables, columns };
        metadata.validate()?;
        Ok(metadata)
    }

    /// Presence and shape check only. Declared tables are not matched
    /// against column entries or against the dataset itself.
    fn validate(&self) -> Result<(), StoreError> {
        match (&self.tables, &self.columns) {
            (None, _) => Err(StoreError::Configuration {
                reason: "no table list in dataset metadata or options".to_string(),
            }),
            (_, None) => Err(StoreError::Configuration {
                reason: "no column map in dataset metadata or options".to_string(),
            }),
            (Some(tables), Some(columns)) if !tables.is_empty() && columns.is_empty() => {
                Err(StoreError::Configuration {
                    reason: format!(
                        "{} tables declared but the column map is empty",
                        tables.len()
                    ),
                })
            }
            _ => Ok(()),
        }
    }

    /// Returns true if `table` appears in the declared table list.
    pub fn declares_table(&self, table: &str) -> bool {
        self.tables
            .as_ref()
            .is_some_and(|tables| tables.iter().any(|t| t == table))
    }

    /// Returns the declared columns of `table`, if any.
    pub fn columns_of(&self, table: &str) -> Option<&[String]> {
        self.columns
            .as_ref()
            .and_then(|columns| columns.get(table))
            .map(Vec::as_slice)
    }
}

/// Named tables of rows, optionally carrying embedded metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Table name to ordered rows
    pub tables: BTreeMap<String, Vec<Row>>,
    /// Metadata embedded in the dataset value
    pub metadata: Option<Metadata>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a table.
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.tables.insert(name.into(), rows);
        self
    }

    /// Sets the embedded metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl TryFrom<Value> for Dataset {
    type Error = StoreError;

    /// Reads `{ "<table>": [ {..}, .. ], "metadata": {..} }`.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(entries) = value else {
            return Err(StoreError::Deserialization(
                "dataset must be a JSON object".to_string(),
            ));
        };

        let mut dataset = Dataset::new();
        for (key, entry) in entries {
            if key == METADATA_KEY {
                if !entry.is_null() {
                    dataset.metadata = Some(serde_json::from_value(entry)?);
                }
                continue;
            }

            let Value::Array(items) = entry else {
                return Err(StoreError::Deserialization(format!(
                    "table '{}' must be an array of rows",
                    key
                )));
            };

            let mut rows = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(row) => rows.push(row),
                    other => {
                        return Err(StoreError::Deserialization(format!(
                            "row {} of table '{}' must be an object, got {}",
                            index, key, other
                        )))
                    }
                }
            }
            dataset.tables.insert(key, rows);
        }

        Ok(dataset)
    }
}
