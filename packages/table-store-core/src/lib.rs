//! In-memory table store with predicate queries and join expansion.
//!
//! Holds a set of named tables of JSON rows, answers find-one / find-all
//! queries driven by arbitrary predicates, and attaches related rows from
//! other tables onto each match.

pub mod config;
pub mod dataset;
pub mod error;
pub mod query;
pub mod store;

pub use config::StoreOptions;
pub use dataset::{Dataset, Metadata, Row};
pub use error::StoreError;
pub use query::{JoinKind, JoinSpec, Relation};
pub use store::TableStore;
