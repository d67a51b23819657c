//! Ordinal navigation (first, last, next, previous, position, total)
//! over rows of an entity type with a configured sort order, optionally
//! partitioned into independent scoped groups.
//!
//! Behavior is attached per entity type: compile an [`OrderOptions`]
//! into an immutable [`OrderSpec`] at registration time, then borrow a
//! [`Navigator`] over any instance and the host's [`EntitySource`].
//! Order is always derived live from the entity's sortable fields;
//! no rank column is stored and nothing is cached across calls.

pub mod adjacency;
pub mod error;
pub mod nav;
pub mod predicate;
pub mod reader;
pub mod scope;
pub mod source;
pub mod spec;
pub mod traits;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;
pub use nav::{NavError, Navigator};
pub use source::{AccessError, EntitySource};
pub use spec::{ConfigError, OrderDirection, OrderKey, OrderOptions, OrderSpec};
pub use traits::{Entity, FieldValues, Ordered};

///
/// Prelude
///
/// Domain vocabulary only; errors and strategy internals stay one
/// module level down.
///

pub mod prelude {
    pub use crate::{
        nav::Navigator,
        predicate::Predicate,
        source::EntitySource,
        spec::{OrderDirection, OrderKey, OrderOptions, OrderSpec},
        traits::{Entity, FieldValues, Ordered},
        value::Value,
    };
}
