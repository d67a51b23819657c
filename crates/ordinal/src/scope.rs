use crate::{
    predicate::Predicate,
    spec::{OrderSpec, ScopeRule},
    traits::Entity,
    value::Value,
};

///
/// Scope resolution
///
/// Derives the concrete condition identifying "the sequence this
/// instance belongs to". Derived freshly from spec + instance on every
/// call: scope-determining field values may have changed since the
/// last one.
///

/// Resolve the scope condition for an instance.
///
/// A null (or undeclared) scope-field value becomes an explicit
/// `IsNull` condition so a sibling group keyed by a nullable reference
/// still forms a valid sequence. The subtype discriminator is conjoined
/// unless the spec ignores it.
#[must_use]
pub fn scope_condition<E: Entity>(entity: &E, spec: &OrderSpec<E>) -> Predicate {
    let mut parts = Vec::new();

    if !spec.ignore_discriminator()
        && let Some(condition) = E::subtype_condition()
    {
        parts.push(condition);
    }

    match spec.scope() {
        None => {}
        Some(ScopeRule::Field(field)) => {
            let condition = match entity.get_value(field) {
                None | Some(Value::Null) => Predicate::is_null(field.clone()),
                Some(value) => Predicate::eq(field.clone(), value),
            };
            parts.push(condition);
        }
        Some(ScopeRule::Computed(rule)) => parts.push(rule(entity)),
    }

    match parts.len() {
        0 => Predicate::True,
        1 => parts.remove(0),
        _ => Predicate::And(parts),
    }
}
