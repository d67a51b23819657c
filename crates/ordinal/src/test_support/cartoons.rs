use crate::{
    predicate::Predicate,
    spec::{OrderOptions, OrderSpec},
    traits::{Entity, FieldValues, Ordered},
    value::Value,
};
use std::sync::LazyLock;

///
/// Cartoon
///
/// Fixture entity: one row of the `cartoons` table. `family_id` keys
/// the scoped-group scenarios, `kind` is the inheritance-hierarchy
/// discriminator column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Cartoon {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub family_id: Option<u64>,
    pub kind: String,
}

impl Cartoon {
    pub fn new(id: u64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            family_id: None,
            kind: "Cartoon".to_string(),
        }
    }

    pub fn with_family(mut self, family_id: u64) -> Self {
        self.family_id = Some(family_id);
        self
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }
}

impl FieldValues for Cartoon {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Nat(self.id)),
            "first_name" => Some(Value::Text(self.first_name.clone())),
            "last_name" => Some(Value::Text(self.last_name.clone())),
            "family_id" => Some(Value::from(self.family_id)),
            "kind" => Some(Value::Text(self.kind.clone())),
            _ => None,
        }
    }
}

impl Entity for Cartoon {
    type Key = u64;

    const ENTITY_NAME: &'static str = "Cartoon";
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] =
        &["id", "first_name", "last_name", "family_id", "kind"];

    fn key(&self) -> Self::Key {
        self.id
    }
}

static CARTOON_ORDERING: LazyLock<OrderSpec<Cartoon>> = LazyLock::new(|| {
    OrderOptions::new()
        .order_by("first_name")
        .compile()
        .expect("cartoon ordering compiles")
});

impl Ordered for Cartoon {
    fn ordering() -> &'static OrderSpec<Self> {
        &CARTOON_ORDERING
    }
}

///
/// FunnyCartoon
///
/// Subtype lens over the same table: only rows whose `kind` column is
/// `Funny` belong to its sequences unless the spec ignores the
/// discriminator.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FunnyCartoon(pub Cartoon);

impl FieldValues for FunnyCartoon {
    fn get_value(&self, field: &str) -> Option<Value> {
        self.0.get_value(field)
    }
}

impl Entity for FunnyCartoon {
    type Key = u64;

    const ENTITY_NAME: &'static str = "FunnyCartoon";
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] = Cartoon::FIELDS;

    fn key(&self) -> Self::Key {
        self.0.id
    }

    fn subtype_condition() -> Option<Predicate> {
        Some(Predicate::eq("kind", "Funny"))
    }
}

/// The canonical four-row fixture, in insertion order. Sorted by
/// `first_name` this reads Barney, Betty, Fred, Wilma.
pub(crate) fn bedrock() -> Vec<Cartoon> {
    vec![
        Cartoon::new(1, "Fred", "Flintstone").with_family(1),
        Cartoon::new(2, "Wilma", "Flintstone").with_family(1),
        Cartoon::new(3, "Barney", "Rubble").with_family(2),
        Cartoon::new(4, "Betty", "Rubble").with_family(2),
    ]
}
