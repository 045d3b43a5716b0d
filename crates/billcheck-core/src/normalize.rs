//! Coerces loosely shaped persisted data into well-formed bills.

use billcheck_domain::{Bill, Ledger};
use serde_json::{Map, Value};

use crate::input::parse_amount;

/// Outcome of normalizing a persisted ledger value.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub ledger: Ledger,
    /// Human-readable notes for every field that had to be defaulted.
    pub warnings: Vec<String>,
}

/// Normalizes a parsed slot value.
///
/// A non-array value yields an empty ledger. Array elements are never dropped:
/// anything that is not an object becomes an empty bill.
pub fn normalize_value(value: Value) -> Normalized {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Normalized {
                ledger: Ledger::new(),
                warnings: vec![format!(
                    "persisted value is {} rather than a list of bills",
                    kind_of(&other)
                )],
            }
        }
    };

    let mut warnings = Vec::new();
    let bills = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => normalize_record(index, &fields, &mut warnings),
            other => {
                warnings.push(format!(
                    "record {index} is {}; replaced with an empty bill",
                    kind_of(&other)
                ));
                Bill::empty()
            }
        })
        .collect::<Vec<_>>();

    Normalized {
        ledger: Ledger::from(bills),
        warnings,
    }
}

fn normalize_record(index: usize, fields: &Map<String, Value>, warnings: &mut Vec<String>) -> Bill {
    let mut bill = Bill::empty();

    bill.name = match fields.get("name") {
        Some(Value::String(name)) => name.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            warnings.push(format!("record {index}: name is {}", kind_of(other)));
            String::new()
        }
    };

    bill.due = match fields.get("due") {
        Some(Value::String(due)) => due.trim().to_string(),
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            warnings.push(format!("record {index}: due is {}", kind_of(other)));
            String::new()
        }
    };

    bill.amount = match fields.get("amount") {
        Some(Value::Number(number)) => match number.as_f64() {
            Some(amount) if amount.is_finite() => amount,
            _ => {
                warnings.push(format!("record {index}: amount {number} is out of range"));
                0.0
            }
        },
        Some(Value::String(text)) => {
            let parsed = parse_amount(text);
            if parsed.coerced {
                warnings.push(format!("record {index}: amount {text:?} is not a number"));
            }
            parsed.value
        }
        None | Some(Value::Null) => 0.0,
        Some(other) => {
            warnings.push(format!("record {index}: amount is {}", kind_of(other)));
            0.0
        }
    };

    bill.paid = match fields.get("paid") {
        Some(Value::Bool(paid)) => *paid,
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        None | Some(Value::Null) => false,
        Some(other) => {
            warnings.push(format!("record {index}: paid is {}", kind_of(other)));
            false
        }
    };

    bill
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
