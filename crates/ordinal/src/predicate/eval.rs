use crate::{
    predicate::{CompareOp, ComparePredicate, Predicate},
    traits::FieldValues,
    value::Value,
};
use std::cmp::Ordering;

///
/// Evaluate a predicate against a single row.
///
/// This is pure runtime evaluation: no schema access, no planning, no
/// validation. A field the row does not expose evaluates as `Null`,
/// which keeps null-keyed scope groups and null order values on the
/// same total order the sort uses.
///
#[must_use]
pub fn eval<R: FieldValues + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,

        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Not(inner) => !eval(row, inner),

        Predicate::Compare(cmp) => eval_compare(row, cmp),

        Predicate::IsNull { field } => field_value(row, field).is_null(),
    }
}

/// Evaluate a single comparison predicate against a row.
///
/// Ordering comparisons use the canonical total value order, so they
/// are always defined and always agree with sequence sorting.
fn eval_compare<R: FieldValues + ?Sized>(row: &R, cmp: &ComparePredicate) -> bool {
    let actual = field_value(row, &cmp.field);
    let ordering = actual.cmp(&cmp.value);

    match cmp.op {
        CompareOp::Eq => actual == cmp.value,
        CompareOp::Ne => actual != cmp.value,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Gte => ordering != Ordering::Less,
    }
}

fn field_value<R: FieldValues + ?Sized>(row: &R, field: &str) -> Value {
    row.get_value(field).unwrap_or(Value::Null)
}
