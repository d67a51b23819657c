use crate::{
    reader::{SequenceReader, StepDirection},
    source::{AccessError, EntitySource},
    spec::OrderSpec,
    traits::Entity,
};
use std::marker::PhantomData;

///
/// AdjacencyResolver
///
/// Positional stepping plus the bounded filter-retry loop. Filters are
/// arbitrary host predicates, so they run after positional stepping
/// rather than inside the storage query; the loop walks one step at a
/// time until a candidate passes or a termination guard fires.
///
/// Logically total: always yields some entity, worst case the original.
/// Only storage failures surface as errors.
///

pub struct AdjacencyResolver<'a, E: Entity, S: EntitySource<E>> {
    source: &'a S,
    _marker: PhantomData<E>,
}

impl<'a, E: Entity, S: EntitySource<E>> AdjacencyResolver<'a, E, S> {
    #[must_use]
    pub const fn new(source: &'a S) -> Self {
        Self {
            source,
            _marker: PhantomData,
        }
    }

    /// Resolve the entity `steps` positions away (sign is direction).
    ///
    /// Termination guards bound the loop to at most one pass over the
    /// sequence: a candidate matching the original means the cycle was
    /// exhausted without a filter match; a candidate matching the
    /// previous one means clamping hit the sequence boundary. Both
    /// compare identifier values, never object identity.
    pub fn adjacent_record(
        &self,
        entity: &E,
        steps: i64,
        spec: &OrderSpec<E>,
    ) -> Result<E, AccessError> {
        if steps == 0 {
            return Ok(entity.clone());
        }

        let direction = if steps < 0 {
            StepDirection::Backward
        } else {
            StepDirection::Forward
        };
        let magnitude = usize::try_from(steps.unsigned_abs()).unwrap_or(usize::MAX);

        let Some(key) = self.adjacent_key(entity, magnitude, direction, spec)? else {
            // The instance is no longer part of its own sequence.
            return Ok(entity.clone());
        };
        let mut candidate = self.fetch(&key)?;

        if spec.filters().is_empty() {
            return Ok(candidate);
        }

        let original_key = entity.key();
        let mut previous_key = original_key.clone();

        loop {
            if spec.filters().iter().all(|filter| filter(&candidate)) {
                return Ok(candidate);
            }

            let candidate_key = candidate.key();
            if candidate_key == original_key || candidate_key == previous_key {
                return Ok(entity.clone());
            }

            previous_key = candidate_key;

            let Some(next_key) = self.adjacent_key(&candidate, 1, direction, spec)? else {
                return Ok(entity.clone());
            };
            candidate = self.fetch(&next_key)?;
        }
    }

    /// Identifier at `magnitude` positions from `from` under the offset
    /// policy. `None` when `from` is absent from its sequence.
    ///
    /// The sequence is re-derived from storage on every step, matching
    /// the snapshot-free contract of the key list.
    fn adjacent_key(
        &self,
        from: &E,
        magnitude: usize,
        direction: StepDirection,
        spec: &OrderSpec<E>,
    ) -> Result<Option<E::Key>, AccessError> {
        let reader = SequenceReader::new(self.source);
        let mut keys = reader.ordered_keys(from, spec)?;

        if direction == StepDirection::Backward {
            keys.reverse();
        }

        let Some(index) = keys.position_of(&from.key()) else {
            return Ok(None);
        };
        let target = keys.step(index, magnitude, spec.wrap());

        Ok(keys.get(target).cloned())
    }

    fn fetch(&self, key: &E::Key) -> Result<E, AccessError> {
        self.source
            .find_by_key(key)?
            .ok_or_else(|| AccessError::key_not_found(key))
    }
}
