use crate::{
    predicate::{Predicate, eval},
    source::{AccessError, EntitySource},
    spec::{OrderDirection, OrderKey},
    traits::{Entity, FieldValues},
    value::Value,
};
use std::{cell::Cell, cmp::Ordering};

///
/// MemorySource
///
/// Reference `EntitySource` over a plain row vector: predicate
/// evaluation via `predicate::eval`, ordering via the canonical value
/// order. `poison` makes every subsequent call fail, for error
/// propagation tests.
///

pub(crate) struct MemorySource<E> {
    rows: Vec<E>,
    poisoned: Cell<bool>,
}

impl<E: Entity> MemorySource<E> {
    pub fn new(rows: Vec<E>) -> Self {
        Self {
            rows,
            poisoned: Cell::new(false),
        }
    }

    pub fn poison(&self) {
        self.poisoned.set(true);
    }

    fn guard(&self) -> Result<(), AccessError> {
        if self.poisoned.get() {
            return Err(AccessError::backend("memory source poisoned"));
        }

        Ok(())
    }

    fn sorted(&self, condition: &Predicate, order: &[OrderKey]) -> Vec<&E> {
        let mut rows: Vec<&E> = self.rows.iter().filter(|row| eval(*row, condition)).collect();
        rows.sort_by(|a, b| compare_rows(*a, *b, order));

        rows
    }
}

impl<E: Entity> EntitySource<E> for MemorySource<E> {
    fn select_keys(
        &self,
        condition: &Predicate,
        order: &[OrderKey],
    ) -> Result<Vec<E::Key>, AccessError> {
        self.guard()?;

        Ok(self
            .sorted(condition, order)
            .into_iter()
            .map(Entity::key)
            .collect())
    }

    fn select_first(
        &self,
        condition: &Predicate,
        order: &[OrderKey],
    ) -> Result<Option<E>, AccessError> {
        self.guard()?;

        Ok(self.sorted(condition, order).first().copied().cloned())
    }

    fn count(&self, condition: &Predicate) -> Result<u64, AccessError> {
        self.guard()?;

        let matching = self.rows.iter().filter(|row| eval(*row, condition)).count();

        Ok(u64::try_from(matching).unwrap_or(u64::MAX))
    }

    fn find_by_key(&self, key: &E::Key) -> Result<Option<E>, AccessError> {
        self.guard()?;

        Ok(self.rows.iter().find(|row| row.key() == *key).cloned())
    }
}

/// Compare two rows under a multi-key order using the canonical total
/// value order; absent fields compare as null.
fn compare_rows<E: FieldValues>(a: &E, b: &E, order: &[OrderKey]) -> Ordering {
    for key in order {
        let left = a.get_value(&key.field).unwrap_or(Value::Null);
        let right = b.get_value(&key.field).unwrap_or(Value::Null);

        let ordering = match key.direction {
            OrderDirection::Asc => left.cmp(&right),
            OrderDirection::Desc => right.cmp(&left),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
