//! Relation between tables for foreign key style joins.

use super::{JoinKind, JoinSpec};

/// Relation between tables for foreign key references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Name of the target table
    pub to_table: String,
    /// Field name in source (parent) table
    pub from_field: String,
    /// Field name in target (child) table
    pub to_field: String,
}

impl Relation {
    pub fn new(
        to_table: impl Into<String>,
        from_field: impl Into<String>,
        to_field: impl Into<String>,
    ) -> Self {
        Self {
            to_table: to_table.into(),
            from_field: from_field.into(),
            to_field: to_field.into(),
        }
    }

    /// Builds a join whose condition is `parent[from_field] == child[to_field]`.
    /// A row lacking its side of the relation never matches.
    pub fn join(&self, kind: JoinKind) -> JoinSpec {
        let from_field = self.from_field.clone();
        let to_field = self.to_field.clone();
        JoinSpec::of_kind(self.to_table.clone(), kind, move |parent, child| {
            match (parent.get(&from_field), child.get(&to_field)) {
                (Some(left), Some(right)) => left == right,
                _ => false,
            }
        })
    }
}
