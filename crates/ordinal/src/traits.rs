use crate::{nav::Navigator, predicate::Predicate, source::EntitySource, spec::OrderSpec, value::Value};
use std::fmt::Debug;

///
/// FieldValues
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples predicate evaluation and scope resolution from
/// concrete entity types.
///

pub trait FieldValues {
    /// Return the named field as a `Value`, or `None` when the type
    /// does not declare such a field.
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// Entity
///
/// Declared identity facts for a navigable entity type.
///
/// ## Semantics
/// - `Key` is the storage representation of the primary key
/// - `FIELDS` lists every field `get_value` can expose; order-spec
///   compilation validates configuration against it at registration time
/// - `subtype_condition` is the inheritance-hierarchy discriminator:
///   base types return `None`, subtypes return the predicate that
///   selects their own rows out of the shared table
///

pub trait Entity: FieldValues + Clone + Debug {
    type Key: Clone + Debug + Eq + Ord;

    const ENTITY_NAME: &'static str;
    const PRIMARY_KEY: &'static str;
    const FIELDS: &'static [&'static str];

    /// Current primary-key value of this instance.
    fn key(&self) -> Self::Key;

    /// Discriminator condition for subtypes sharing a base table.
    fn subtype_condition() -> Option<Predicate> {
        None
    }
}

///
/// Ordered
///
/// Per-type registration of navigation behavior. Implementors return
/// the process-lifetime compiled `OrderSpec` (typically from a
/// `LazyLock` built at startup) and gain the `navigate` capability
/// constructor.
///

pub trait Ordered: Entity + Sized + 'static {
    /// Compiled ordering configuration for this entity type.
    fn ordering() -> &'static OrderSpec<Self>;

    /// Borrow a navigator over this instance's ordered sequence.
    fn navigate<'a, S: EntitySource<Self>>(&'a self, source: &'a S) -> Navigator<'a, Self, S> {
        Navigator::new(self, Self::ordering(), source)
    }
}
