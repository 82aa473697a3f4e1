//! Table rows and cell readers
//!
//! A row maps column headers to cell values. Spreadsheet cells are loosely
//! typed: a month may arrive as `1`, `1.0` or `"1"`, an amount as `-25.5` or
//! `"-25.50"`. The readers here accept all of those and report anything else
//! as an invalid row of the named table.

use serde_json::Value;

use crate::error::{RolloverError, RolloverResult};
use crate::models::{Money, MAX_YEAR, MIN_YEAR};

/// One table row: column header to cell value, in column order
pub type Row = serde_json::Map<String, Value>;

/// Check whether a cell is blank
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Render a cell as text, the way a spreadsheet shows it
///
/// Integral numbers lose their trailing ".0" so that account numbers and ids
/// stored as numbers compare equal to their text form.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Look up the first present, non-blank column among `fields`
fn lookup<'a>(row: &'a Row, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| row.get(*field))
        .find(|value| !is_blank(value))
}

/// Read a text cell; missing or blank cells read as an empty string
pub fn read_text(row: &Row, fields: &[&str]) -> String {
    lookup(row, fields).map(cell_to_string).unwrap_or_default()
}

/// Read a text cell, or `None` when it is missing or blank
pub fn read_optional_text(row: &Row, fields: &[&str]) -> Option<String> {
    lookup(row, fields).map(cell_to_string)
}

/// Read a required whole-number cell
pub fn read_int(table: &str, row: &Row, fields: &[&str]) -> RolloverResult<i64> {
    let value = required(table, row, fields)?;
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        RolloverError::invalid_row(
            table,
            format!("column '{}' is not a whole number: {}", fields[0], value),
        )
    })
}

/// Read a required money cell
pub fn read_money(table: &str, row: &Row, fields: &[&str]) -> RolloverResult<Money> {
    let value = required(table, row, fields)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64().and_then(Money::from_f64),
        Value::String(s) => Money::parse(s).ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        RolloverError::invalid_row(
            table,
            format!("column '{}' is not an amount: {}", fields[0], value),
        )
    })
}

/// Read a required month cell (1-12)
pub fn read_month(table: &str, row: &Row, fields: &[&str]) -> RolloverResult<u32> {
    let month = read_int(table, row, fields)?;
    if (1..=12).contains(&month) {
        Ok(month as u32)
    } else {
        Err(RolloverError::invalid_row(
            table,
            format!("column '{}' is not a month: {}", fields[0], month),
        ))
    }
}

/// Read a required year cell (`MIN_YEAR..=MAX_YEAR`)
pub fn read_year(table: &str, row: &Row, fields: &[&str]) -> RolloverResult<i32> {
    let year = read_int(table, row, fields)?;
    i32::try_from(year)
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .ok_or_else(|| {
            RolloverError::invalid_row(
                table,
                format!("column '{}' is not a year: {}", fields[0], year),
            )
        })
}

fn required<'a>(table: &str, row: &'a Row, fields: &[&str]) -> RolloverResult<&'a Value> {
    lookup(row, fields).ok_or_else(|| {
        RolloverError::invalid_row(table, format!("missing value for column '{}'", fields[0]))
    })
}

/// Encode money as a decimal number cell
pub fn money_cell(amount: Money) -> Value {
    Value::from(amount.to_f64())
}
