use crate::{
    predicate::Predicate,
    scope::scope_condition,
    source::{AccessError, EntitySource},
    spec::{OrderDirection, OrderKey, OrderSpec},
    traits::Entity,
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use std::marker::PhantomData;

///
/// StepDirection
///
/// Traversal direction through an ordered sequence, shared by the
/// comparison strategy and the adjacency loop.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepDirection {
    Forward,
    Backward,
}

///
/// KeySequence
///
/// Ordered snapshot of the identifiers of one scope at one point in
/// time. Re-derived on every navigation call; never kept consistent
/// with concurrent writes.
///

#[derive(Clone, Debug, Deref, IntoIterator)]
pub struct KeySequence<K>(Vec<K>);

impl<K: Clone + Eq> KeySequence<K> {
    /// Zero-based offset of `key` within the snapshot.
    #[must_use]
    pub fn position_of(&self, key: &K) -> Option<usize> {
        self.0.iter().position(|candidate| candidate == key)
    }

    /// Apply the offset policy: wrap cycles modulo the length, clamp
    /// holds at the final index when stepping past the end.
    ///
    /// `index` must come from `position_of`, so the snapshot is
    /// non-empty whenever this is reached.
    #[must_use]
    pub fn step(&self, index: usize, magnitude: usize, wrap: bool) -> usize {
        let len = self.0.len();
        let target = index + magnitude;

        if wrap {
            target % len
        } else {
            target.min(len - 1)
        }
    }

    #[must_use]
    pub fn first_key(&self) -> Option<&K> {
        self.0.first()
    }

    #[must_use]
    pub fn last_key(&self) -> Option<&K> {
        self.0.last()
    }

    /// Reverse the snapshot in place (backward traversal).
    pub fn reverse(&mut self) {
        self.0.reverse();
    }
}

impl<K> From<Vec<K>> for KeySequence<K> {
    fn from(keys: Vec<K>) -> Self {
        Self(keys)
    }
}

///
/// SequenceReader
///
/// Read-only queries against one scope's live sequence. Two
/// strategies: the full-list strategy materializes every identifier in
/// order; the comparison strategy synthesizes a lexicographic tuple
/// predicate and fetches only the adjacent row.
///

pub struct SequenceReader<'a, E: Entity, S: EntitySource<E>> {
    source: &'a S,
    _marker: PhantomData<E>,
}

impl<'a, E: Entity, S: EntitySource<E>> SequenceReader<'a, E, S> {
    #[must_use]
    pub const fn new(source: &'a S) -> Self {
        Self {
            source,
            _marker: PhantomData,
        }
    }

    /// Full-list strategy: every identifier of the instance's scope, in
    /// compiled order.
    pub fn ordered_keys(
        &self,
        entity: &E,
        spec: &OrderSpec<E>,
    ) -> Result<KeySequence<E::Key>, AccessError> {
        let condition = scope_condition(entity, spec);
        let keys = self.source.select_keys(&condition, spec.keys())?;

        Ok(KeySequence::from(keys))
    }

    /// Comparison strategy: fetch the row adjacent to `entity` without
    /// materializing the sequence.
    ///
    /// Synthesizes the lexicographic tuple comparison matching the
    /// compiled multi-key order as chained OR-of-AND legs
    /// (`k1 > v1 OR (k1 = v1 AND k2 > v2) OR ...`), then orders by the
    /// same keys — each direction reversed for backward traversal — and
    /// takes the first match.
    pub fn adjacent_by_comparison(
        &self,
        entity: &E,
        direction: StepDirection,
        spec: &OrderSpec<E>,
    ) -> Result<Option<E>, AccessError> {
        let comparison = tuple_comparison(entity, direction, spec.keys());
        let condition = scope_condition(entity, spec) & comparison;

        let order: Vec<OrderKey> = match direction {
            StepDirection::Forward => spec.keys().to_vec(),
            StepDirection::Backward => spec.keys().iter().map(OrderKey::reversed).collect(),
        };

        self.source.select_first(&condition, &order)
    }
}

/// Build the strict lexicographic comparison against the instance's
/// current order-key values.
///
/// Ordering comparisons follow the canonical total value order, so a
/// null current value needs no special legs: every non-null value of
/// the same field ranks above it.
fn tuple_comparison<E: Entity>(
    entity: &E,
    direction: StepDirection,
    keys: &[OrderKey],
) -> Predicate {
    let values: Vec<Value> = keys
        .iter()
        .map(|key| entity.get_value(&key.field).unwrap_or(Value::Null))
        .collect();

    let mut legs = Vec::with_capacity(keys.len());

    for (pivot, key) in keys.iter().enumerate() {
        let mut conjuncts: Vec<Predicate> = keys[..pivot]
            .iter()
            .zip(&values)
            .map(|(equal_key, value)| Predicate::eq(equal_key.field.clone(), value.clone()))
            .collect();

        conjuncts.push(strict_comparison(key, values[pivot].clone(), direction));

        legs.push(if conjuncts.len() == 1 {
            conjuncts.remove(0)
        } else {
            Predicate::And(conjuncts)
        });
    }

    Predicate::Or(legs)
}

fn strict_comparison(key: &OrderKey, value: Value, direction: StepDirection) -> Predicate {
    let forward = matches!(direction, StepDirection::Forward);
    let ascending = matches!(key.direction, OrderDirection::Asc);

    // "Later in sequence" is greater for ascending keys, smaller for
    // descending ones; backward traversal flips both.
    if forward == ascending {
        Predicate::gt(key.field.clone(), value)
    } else {
        Predicate::lt(key.field.clone(), value)
    }
}
