//! Join specifications, table relations, and row predicates.

mod join;
mod predicate;
mod relation;

pub use join::{JoinCondition, JoinKind, JoinSpec};
pub(crate) use join::PlannedJoin;
pub use predicate::{field_equals, matches_all};
pub use relation::Relation;
