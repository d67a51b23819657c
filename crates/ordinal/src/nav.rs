use crate::{
    adjacency::AdjacencyResolver,
    reader::SequenceReader,
    scope::scope_condition,
    source::{AccessError, EntitySource},
    spec::OrderSpec,
    traits::Entity,
};
use thiserror::Error as ThisError;

///
/// NavError
///
/// Call-time navigation failures. Adjacency-search exhaustion is not
/// among them: "no neighbor satisfies the filters" is a designed
/// fallback to the original entity, not a failure.
///

#[derive(Debug, ThisError)]
pub enum NavError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("invalid direction '{0}' (expected 'next' or 'previous')")]
    InvalidDirection(String),

    #[error("entity is no longer part of its ordered sequence")]
    NotInSequence,
}

///
/// Navigator
///
/// Navigation capability for one entity instance: a borrowed view over
/// the instance, its type's compiled spec, and the host's source. All
/// state is either immutable configuration or per-call computation.
///

pub struct Navigator<'a, E: Entity, S: EntitySource<E>> {
    entity: &'a E,
    spec: &'a OrderSpec<E>,
    source: &'a S,
}

impl<'a, E: Entity, S: EntitySource<E>> Navigator<'a, E, S> {
    #[must_use]
    pub const fn new(entity: &'a E, spec: &'a OrderSpec<E>, source: &'a S) -> Self {
        Self {
            entity,
            spec,
            source,
        }
    }

    /// The entity one position forward; the entity itself when no
    /// qualifying neighbor exists.
    pub fn next(&self) -> Result<E, NavError> {
        self.next_by(1)
    }

    /// The entity `steps` positions forward.
    pub fn next_by(&self, steps: u32) -> Result<E, NavError> {
        let resolver = AdjacencyResolver::new(self.source);

        Ok(resolver.adjacent_record(self.entity, i64::from(steps), self.spec)?)
    }

    /// The entity one position backward; the entity itself when no
    /// qualifying neighbor exists.
    pub fn previous(&self) -> Result<E, NavError> {
        self.previous_by(1)
    }

    /// The entity `steps` positions backward.
    pub fn previous_by(&self, steps: u32) -> Result<E, NavError> {
        let resolver = AdjacencyResolver::new(self.source);

        Ok(resolver.adjacent_record(self.entity, -i64::from(steps), self.spec)?)
    }

    /// Dispatch to `next` or `previous` by name.
    pub fn find_by_direction(&self, direction: &str, steps: u32) -> Result<E, NavError> {
        match direction {
            "next" => self.next_by(steps),
            "previous" => self.previous_by(steps),
            other => Err(NavError::InvalidDirection(other.to_string())),
        }
    }

    /// First entity of the sequence; `None` when the sequence is empty.
    pub fn first(&self) -> Result<Option<E>, NavError> {
        match self.first_key()? {
            Some(key) => Ok(self.source.find_by_key(&key)?),
            None => Ok(None),
        }
    }

    /// Last entity of the sequence; `None` when the sequence is empty.
    pub fn last(&self) -> Result<Option<E>, NavError> {
        match self.last_key()? {
            Some(key) => Ok(self.source.find_by_key(&key)?),
            None => Ok(None),
        }
    }

    /// Identifier at position 0 of the sequence.
    pub fn first_key(&self) -> Result<Option<E::Key>, NavError> {
        let keys = self.reader().ordered_keys(self.entity, self.spec)?;

        Ok(keys.first_key().cloned())
    }

    /// Identifier at the final position of the sequence.
    pub fn last_key(&self) -> Result<Option<E::Key>, NavError> {
        let keys = self.reader().ordered_keys(self.entity, self.spec)?;

        Ok(keys.last_key().cloned())
    }

    pub fn is_first(&self) -> Result<bool, NavError> {
        Ok(self.first_key()? == Some(self.entity.key()))
    }

    pub fn is_last(&self) -> Result<bool, NavError> {
        Ok(self.last_key()? == Some(self.entity.key()))
    }

    /// Zero-based offset of this entity within its sequence; `None`
    /// when the entity is no longer part of it.
    pub fn current_index(&self) -> Result<Option<usize>, NavError> {
        let keys = self.reader().ordered_keys(self.entity, self.spec)?;

        Ok(keys.position_of(&self.entity.key()))
    }

    /// One-based position of this entity within its sequence.
    ///
    /// A fabricated position would mislead callers about the entity's
    /// real standing, so an absent entity is an error here.
    pub fn current_position(&self) -> Result<usize, NavError> {
        match self.current_index()? {
            Some(index) => Ok(index + 1),
            None => Err(NavError::NotInSequence),
        }
    }

    /// Count of rows in this entity's scope.
    pub fn current_total(&self) -> Result<u64, NavError> {
        let condition = scope_condition(self.entity, self.spec);

        Ok(self.source.count(&condition)?)
    }

    const fn reader(&self) -> SequenceReader<'a, E, S> {
        SequenceReader::new(self.source)
    }
}
