//! Join specifications and their validation.

use std::fmt;

use crate::dataset::Row;
use crate::error::StoreError;

/// Condition relating a parent row to a candidate child row.
pub type JoinCondition = Box<dyn Fn(&Row, &Row) -> bool>;

/// How many child rows a join attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// First matching child row, or null
    Single,
    /// Every matching child row, in table order
    All,
}

impl JoinKind {
    /// Parses the wire name of a join type.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "single" => Some(JoinKind::Single),
            "all" => Some(JoinKind::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Single => "single",
            JoinKind::All => "all",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes how rows from `table` are attached onto a matched parent row.
///
/// Every part is optional so that partially built specs can be passed
/// through; a spec missing any part is skipped with a warning at query
/// time. The attached value is stored on the parent under the target
/// table's name.
#[derive(Default)]
pub struct JoinSpec {
    /// Target table name
    pub table: Option<String>,
    /// Join type name ("single" or "all")
    pub join_type: Option<String>,
    /// Parent/child match condition
    pub condition: Option<JoinCondition>,
}

impl JoinSpec {
    /// Creates an empty spec to be filled in with the builder methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete spec of the given kind.
    pub fn of_kind<F>(table: impl Into<String>, kind: JoinKind, condition: F) -> Self
    where
        F: Fn(&Row, &Row) -> bool + 'static,
    {
        Self {
            table: Some(table.into()),
            join_type: Some(kind.as_str().to_string()),
            condition: Some(Box::new(condition)),
        }
    }

    /// Attaches the first row of `table` satisfying `condition`, or null.
    pub fn single<F>(table: impl Into<String>, condition: F) -> Self
    where
        F: Fn(&Row, &Row) -> bool + 'static,
    {
        Self::of_kind(table, JoinKind::Single, condition)
    }

    /// Attaches every row of `table` satisfying `condition`.
    pub fn all<F>(table: impl Into<String>, condition: F) -> Self
    where
        F: Fn(&Row, &Row) -> bool + 'static,
    {
        Self::of_kind(table, JoinKind::All, condition)
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn join_type(mut self, join_type: impl Into<String>) -> Self {
        self.join_type = Some(join_type.into());
        self
    }

    pub fn condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Row, &Row) -> bool + 'static,
    {
        self.condition = Some(Box::new(condition));
        self
    }

    /// Checks the spec's parts.
    ///
    /// # Returns
    /// `Ok(None)` when a part is missing or empty, `Ok(Some(..))` for a
    /// usable spec, or `UnsupportedJoinType` for an unknown type name.
    /// Target table existence is checked by the store.
    pub(crate) fn plan(&self) -> Result<Option<PlannedJoin<'_>>, StoreError> {
        let (Some(table), Some(join_type), Some(condition)) =
            (self.table.as_deref(), self.join_type.as_deref(), self.condition.as_deref())
        else {
            return Ok(None);
        };
        if table.is_empty() || join_type.is_empty() {
            return Ok(None);
        }

        let kind = JoinKind::parse(join_type).ok_or_else(|| StoreError::UnsupportedJoinType {
            table: table.to_string(),
            join_type: join_type.to_string(),
        })?;

        Ok(Some(PlannedJoin {
            table,
            kind,
            condition,
        }))
    }
}

impl fmt::Debug for JoinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinSpec")
            .field("table", &self.table)
            .field("join_type", &self.join_type)
            .field("condition", &self.condition.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Validated join, borrowed from its spec.
pub(crate) struct PlannedJoin<'a> {
    pub table: &'a str,
    pub kind: JoinKind,
    pub condition: &'a dyn Fn(&Row, &Row) -> bool,
}
