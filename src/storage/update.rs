//! SQL builder for partial updates.
//!
//! Only the columns present in a change set appear in the `SET` clause. Column
//! names come from a fixed list in this module; every value is a bound
//! parameter.

use rusqlite::types::ToSql;

use crate::model::{CardChanges, EmployeeChanges};

/// One `column = ?` assignment with its bound value.
pub(crate) type Assignment = (&'static str, Box<dyn ToSql>);

fn assign<T: ToSql + 'static>(column: &'static str, value: T) -> Assignment {
    let value: Box<dyn ToSql> = Box::new(value);
    (column, value)
}

pub(crate) fn card_assignments(changes: &CardChanges) -> Vec<Assignment> {
    let mut out: Vec<Assignment> = Vec::new();
    if let Some(ref name) = changes.name {
        out.push(assign("name", name.clone()));
    }
    if let Some(ref set_name) = changes.set_name {
        out.push(assign("set_name", set_name.clone()));
    }
    if let Some(ref rarity) = changes.rarity {
        out.push(assign("rarity", rarity.clone()));
    }
    if let Some(price_cents) = changes.price_cents {
        out.push(assign("price_cents", price_cents));
    }
    if let Some(stock) = changes.stock {
        out.push(assign("stock", stock));
    }
    out
}

pub(crate) fn employee_assignments(changes: &EmployeeChanges) -> Vec<Assignment> {
    let mut out: Vec<Assignment> = Vec::new();
    if let Some(ref first_name) = changes.first_name {
        out.push(assign("first_name", first_name.clone()));
    }
    if let Some(ref last_name) = changes.last_name {
        out.push(assign("last_name", last_name.clone()));
    }
    if let Some(ref city) = changes.city {
        out.push(assign("city", city.clone()));
    }
    out
}

/// Builds `UPDATE <table> SET a = ?1, b = ?2 WHERE <key> = ?3`.
///
/// Returns `None` when there is nothing to assign. The key value is appended
/// as the last parameter.
pub(crate) fn build_update(
    table: &str,
    assignments: Vec<Assignment>,
    key_column: &str,
    key: Box<dyn ToSql>,
) -> Option<(String, Vec<Box<dyn ToSql>>)> {
    if assignments.is_empty() {
        return None;
    }

    let mut params: Vec<Box<dyn ToSql>> = Vec::with_capacity(assignments.len() + 1);
    let mut set_clause = Vec::with_capacity(assignments.len());
    for (i, (column, value)) in assignments.into_iter().enumerate() {
        set_clause.push(format!("{} = ?{}", column, i + 1));
        params.push(value);
    }
    params.push(key);

    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        table,
        set_clause.join(", "),
        key_column,
        params.len()
    );
    Some((sql, params))
}
