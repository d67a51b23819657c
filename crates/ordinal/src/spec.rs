use crate::{predicate::Predicate, traits::Entity};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use thiserror::Error as ThisError;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

///
/// OrderKey
///
/// One (field, direction) pair of a compiled sort order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderKey {
    pub field: String,
    pub direction: OrderDirection,
}

impl OrderKey {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Desc,
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction.reversed(),
        }
    }
}

///
/// ScopeRule
///
/// How sequence membership is derived from an instance: equality on a
/// field's current value, or an arbitrary computed predicate.
///

#[derive(Clone)]
pub enum ScopeRule<E> {
    Field(String),
    Computed(Arc<dyn Fn(&E) -> Predicate + Send + Sync>),
}

impl<E> fmt::Debug for ScopeRule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Self::Computed(_) => f.debug_tuple("Computed").finish(),
        }
    }
}

/// Candidate-acceptance filter applied after positional stepping.
pub type FilterFn<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

///
/// ConfigError
///
/// Registration-time configuration failures. Always surfaced at
/// compile time of the spec, never deferred to a navigation call.
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("entity '{entity}' declares no field '{field}'")]
    UnknownField {
        entity: &'static str,
        field: String,
    },

    #[error("order key '{field}' appears more than once")]
    DuplicateOrderKey { field: String },

    #[error("order and scope fields must be non-empty names")]
    EmptyFieldName,
}

///
/// OrderOptions
///
/// Raw, fluent configuration for one entity type. `compile` turns it
/// into the immutable `OrderSpec` used by every navigation call.
///

pub struct OrderOptions<E: Entity> {
    keys: Vec<OrderKey>,
    scope: Option<ScopeRule<E>>,
    filters: Vec<FilterFn<E>>,
    wrap: bool,
    ignore_discriminator: bool,
}

impl<E: Entity> Default for OrderOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> OrderOptions<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            scope: None,
            filters: Vec::new(),
            wrap: false,
            ignore_discriminator: false,
        }
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.keys.push(OrderKey::asc(field));
        self
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.keys.push(OrderKey::desc(field));
        self
    }

    /// Replace the sort keys with an explicit list.
    #[must_use]
    pub fn order_keys(mut self, keys: Vec<OrderKey>) -> Self {
        self.keys = keys;
        self
    }

    /// Scope the sequence by equality on a field's current value.
    ///
    /// A bare relation name is normalized to its foreign-key field at
    /// compile time (`band` becomes `band_id` unless `band` itself is a
    /// declared field).
    #[must_use]
    pub fn scope(mut self, field: impl Into<String>) -> Self {
        self.scope = Some(ScopeRule::Field(field.into()));
        self
    }

    /// Scope the sequence by a computed predicate over the instance.
    #[must_use]
    pub fn scope_with(mut self, rule: impl Fn(&E) -> Predicate + Send + Sync + 'static) -> Self {
        self.scope = Some(ScopeRule::Computed(Arc::new(rule)));
        self
    }

    /// Append a candidate filter; all filters must accept a candidate.
    #[must_use]
    pub fn filter(mut self, filter: impl Fn(&E) -> bool + Send + Sync + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Cycle past the sequence ends instead of clamping.
    #[must_use]
    pub const fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Skip the inheritance-hierarchy discriminator condition.
    #[must_use]
    pub const fn ignore_discriminator(mut self, ignore: bool) -> Self {
        self.ignore_discriminator = ignore;
        self
    }

    /// Compile the options into an immutable spec.
    ///
    /// Validates every referenced field against `E::FIELDS`, normalizes
    /// the scope shorthand, and appends the primary key as the final
    /// tiebreaker so the resulting order is total.
    pub fn compile(self) -> Result<OrderSpec<E>, ConfigError> {
        let mut keys = self.keys;

        if keys.is_empty() {
            keys.push(OrderKey::asc(E::PRIMARY_KEY));
        }

        for (index, key) in keys.iter().enumerate() {
            validate_field::<E>(&key.field)?;

            if keys[..index].iter().any(|prior| prior.field == key.field) {
                return Err(ConfigError::DuplicateOrderKey {
                    field: key.field.clone(),
                });
            }
        }

        // Identifier tiebreaker: ties on non-unique sort keys would make
        // "next" ill-defined.
        if keys.iter().all(|key| key.field != E::PRIMARY_KEY) {
            keys.push(OrderKey::asc(E::PRIMARY_KEY));
        }

        let scope = match self.scope {
            Some(ScopeRule::Field(field)) => {
                Some(ScopeRule::Field(normalize_scope_field::<E>(field)?))
            }
            other => other,
        };

        Ok(OrderSpec {
            keys,
            scope,
            filters: self.filters,
            wrap: self.wrap,
            ignore_discriminator: self.ignore_discriminator,
        })
    }
}

///
/// OrderSpec
///
/// Immutable, per-entity-type ordering descriptor. Constructed once at
/// registration time; holds no runtime state.
///

pub struct OrderSpec<E: Entity> {
    keys: Vec<OrderKey>,
    scope: Option<ScopeRule<E>>,
    filters: Vec<FilterFn<E>>,
    wrap: bool,
    ignore_discriminator: bool,
}

impl<E: Entity> OrderSpec<E> {
    /// Compiled sort keys; never empty, always ending in a unique key.
    #[must_use]
    pub fn keys(&self) -> &[OrderKey] {
        &self.keys
    }

    #[must_use]
    pub const fn scope(&self) -> Option<&ScopeRule<E>> {
        self.scope.as_ref()
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterFn<E>] {
        &self.filters
    }

    #[must_use]
    pub const fn wrap(&self) -> bool {
        self.wrap
    }

    #[must_use]
    pub const fn ignore_discriminator(&self) -> bool {
        self.ignore_discriminator
    }
}

impl<E: Entity> fmt::Debug for OrderSpec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderSpec")
            .field("keys", &self.keys)
            .field("scope", &self.scope)
            .field("filters", &self.filters.len())
            .field("wrap", &self.wrap)
            .field("ignore_discriminator", &self.ignore_discriminator)
            .finish()
    }
}

fn validate_field<E: Entity>(field: &str) -> Result<(), ConfigError> {
    if field.is_empty() {
        return Err(ConfigError::EmptyFieldName);
    }

    if E::FIELDS.contains(&field) {
        return Ok(());
    }

    Err(ConfigError::UnknownField {
        entity: E::ENTITY_NAME,
        field: field.to_string(),
    })
}

/// Rewrite a bare relation name to its foreign-key field unless the
/// name already carries the suffix or is itself a declared field.
fn normalize_scope_field<E: Entity>(field: String) -> Result<String, ConfigError> {
    if field.is_empty() {
        return Err(ConfigError::EmptyFieldName);
    }

    if E::FIELDS.contains(&field.as_str()) {
        return Ok(field);
    }

    if !field.ends_with("_id") {
        let fk = format!("{field}_id");
        if E::FIELDS.contains(&fk.as_str()) {
            return Ok(fk);
        }
    }

    Err(ConfigError::UnknownField {
        entity: E::ENTITY_NAME,
        field,
    })
}
