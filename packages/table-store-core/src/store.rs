//! Table store: construction, find-one / find-all, and join expansion.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::StoreOptions;
use crate::dataset::{Dataset, Metadata, Row};
use crate::error::StoreError;
use crate::query::{JoinKind, JoinSpec, PlannedJoin};

/// In-memory store of named row tables.
///
/// Rows are owned by the store. Join expansion attaches fields to the
/// stored rows in place, so a joined field stays on the row for later
/// queries. Not thread-safe; callers sharing a store serialize access.
#[derive(Debug)]
pub struct TableStore {
    /// Map of table name to ordered rows
    tables: BTreeMap<String, Vec<Row>>,
    /// Metadata resolved at construction
    metadata: Metadata,
    /// Restrict lookups to declared tables
    strict_tables: bool,
}

impl TableStore {
    /// Creates a store from a dataset and optional options.
    ///
    /// # Arguments
    /// * `dataset` - Tables and optional embedded metadata
    /// * `options` - Fallback metadata and query settings
    ///
    /// # Returns
    /// `Result<TableStore, StoreError>`; `Configuration` when neither source
    /// yields a table list and a column map.
    pub fn new(dataset: Dataset, options: Option<StoreOptions>) -> Result<Self, StoreError> {
        let options = options.unwrap_or_default();
        let metadata = Metadata::resolve(dataset.metadata.as_ref(), &options)?;

        tracing::debug!(
            tables = ?metadata.tables,
            columns = ?metadata.columns,
            "Resolved table store metadata"
        );

        Ok(Self {
            tables: dataset.tables,
            metadata,
            strict_tables: options.strict_tables,
        })
    }

    /// Creates a store from a JSON dataset value.
    pub fn from_value(value: Value, options: Option<StoreOptions>) -> Result<Self, StoreError> {
        Self::new(Dataset::try_from(value)?, options)
    }

    /// Returns the metadata resolved at construction.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns all table names in sorted order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    /// Returns the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Returns the rows of a table in stored order.
    pub fn rows(&self, table: &str) -> Result<&[Row], StoreError> {
        self.check_table(table)?;
        Ok(self.tables.get(table).map(Vec::as_slice).unwrap_or_default())
    }

    /// Finds the first row of `table` matching `predicate`.
    ///
    /// # Arguments
    /// * `table` - Table to scan
    /// * `predicate` - Row filter
    /// * `joins` - Joins applied to the match, in order (may be empty)
    ///
    /// # Returns
    /// `Result<Option<&Row>, StoreError>` with the expanded match, or `None`.
    /// Join specs are only validated when a row matched.
    pub fn find_one<P>(
        &mut self,
        table: &str,
        predicate: P,
        joins: &[JoinSpec],
    ) -> Result<Option<&Row>, StoreError>
    where
        P: Fn(&Row) -> bool,
    {
        let Some(index) = self.rows(table)?.iter().position(|row| predicate(row)) else {
            tracing::debug!(table, "find_one matched no row");
            return Ok(None);
        };

        if !joins.is_empty() {
            let plan = self.plan_joins(joins)?;
            self.expand_stored(table, index, &plan);
        }

        Ok(self.tables.get(table).and_then(|rows| rows.get(index)))
    }

    /// Finds every row of `table` matching `predicate`, in stored order.
    ///
    /// # Arguments
    /// * `table` - Table to scan
    /// * `predicate` - Row filter
    /// * `joins` - Joins applied to each match, in order (may be empty)
    ///
    /// # Returns
    /// `Result<Vec<&Row>, StoreError>` with the expanded matches.
    pub fn find_all<P>(
        &mut self,
        table: &str,
        predicate: P,
        joins: &[JoinSpec],
    ) -> Result<Vec<&Row>, StoreError>
    where
        P: Fn(&Row) -> bool,
    {
        let indices: Vec<usize> = self
            .rows(table)?
            .iter()
            .enumerate()
            .filter_map(|(index, row)| predicate(row).then_some(index))
            .collect();

        tracing::debug!(
            table,
            matched = indices.len(),
            joins = joins.len(),
            "find_all"
        );

        if !indices.is_empty() && !joins.is_empty() {
            let plan = self.plan_joins(joins)?;
            for &index in &indices {
                self.expand_stored(table, index, &plan);
            }
        }

        let rows = self.tables.get(table).map(Vec::as_slice).unwrap_or_default();
        Ok(indices.iter().filter_map(|&index| rows.get(index)).collect())
    }

    /// Applies `joins` to a caller-owned row, reading targets from the store.
    ///
    /// Each join sets `row[target table]`, overwriting any existing field.
    /// Later joins see fields attached by earlier ones.
    pub fn expand(&self, row: &mut Row, joins: &[JoinSpec]) -> Result<(), StoreError> {
        let plan = self.plan_joins(joins)?;
        for join in &plan {
            let value = self.join_value(row, join);
            row.insert(join.table.to_string(), value);
        }
        Ok(())
    }

    fn check_table(&self, table: &str) -> Result<(), StoreError> {
        if !self.tables.contains_key(table) {
            return Err(StoreError::TableNotFound {
                table: table.to_string(),
            });
        }
        if self.strict_tables && !self.metadata.declares_table(table) {
            return Err(StoreError::UndeclaredTable {
                table: table.to_string(),
            });
        }
        Ok(())
    }

    /// Validates join specs before any row is touched. Malformed specs are
    /// dropped with a warning; bad types and unknown targets fail the query.
    fn plan_joins<'j>(&self, joins: &'j [JoinSpec]) -> Result<Vec<PlannedJoin<'j>>, StoreError> {
        let mut plan = Vec::with_capacity(joins.len());
        for spec in joins {
            match spec.plan()? {
                Some(join) => {
                    self.check_table(join.table)?;
                    plan.push(join);
                }
                None => tracing::warn!(join = ?spec, "Invalid join specification, skipping"),
            }
        }
        Ok(plan)
    }

    fn expand_stored(&mut self, table: &str, index: usize, plan: &[PlannedJoin<'_>]) {
        for join in plan {
            let Some(parent) = self.tables.get(table).and_then(|rows| rows.get(index)) else {
                return;
            };
            let value = self.join_value(parent, join);
            if let Some(parent) = self
                .tables
                .get_mut(table)
                .and_then(|rows| rows.get_mut(index))
            {
                parent.insert(join.table.to_string(), value);
            }
        }
    }

    /// Child rows are copied into the attached value.
    fn join_value(&self, parent: &Row, join: &PlannedJoin<'_>) -> Value {
        let children = self
            .tables
            .get(join.table)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let matches = |child: &&Row| (join.condition)(parent, *child);

        match join.kind {
            JoinKind::Single => children
                .iter()
                .find(matches)
                .map(|child| Value::Object(child.clone()))
                .unwrap_or(Value::Null),
            JoinKind::All => Value::Array(
                children
                    .iter()
                    .filter(matches)
                    .map(|child| Value::Object(child.clone()))
                    .collect(),
            ),
        }
    }
}
