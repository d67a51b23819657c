use crate::{predicate::Predicate, spec::OrderKey, traits::Entity};
use std::fmt::Debug;
use thiserror::Error as ThisError;

///
/// EntitySource
///
/// Read-only data-access boundary the host environment provides. The
/// core issues blocking queries through it and never retries: any
/// failure propagates unchanged as `AccessError`.
///
/// Implementations translate the predicate AST and order keys into
/// their backend's native query form. `crate::predicate::eval` defines
/// the reference semantics an implementation must match.
///

pub trait EntitySource<E: Entity> {
    /// Select the identifiers of every row matching `condition`,
    /// ordered by `order`.
    fn select_keys(&self, condition: &Predicate, order: &[OrderKey])
    -> Result<Vec<E::Key>, AccessError>;

    /// Select the first row matching `condition` under `order`.
    fn select_first(
        &self,
        condition: &Predicate,
        order: &[OrderKey],
    ) -> Result<Option<E>, AccessError>;

    /// Count the rows matching `condition`.
    fn count(&self, condition: &Predicate) -> Result<u64, AccessError>;

    /// Fetch one row by primary key.
    fn find_by_key(&self, key: &E::Key) -> Result<Option<E>, AccessError>;
}

///
/// AccessError
///
/// Storage-layer failure surfaced to the caller unchanged.
///

#[derive(Debug, ThisError)]
pub enum AccessError {
    #[error("storage backend failure: {message}")]
    Backend { message: String },

    #[error("row listed by the sequence snapshot could not be re-fetched: {key}")]
    KeyNotFound { key: String },
}

impl AccessError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub(crate) fn key_not_found(key: &impl Debug) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }
}
