use super::model::{Table, Value};

/// Parse trimmed text as an integer, then as a float. `NaN` and empty text
/// are not numbers.
pub fn parse_number(s: &str) -> Option<Value> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(i) = t.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    match t.parse::<f64>() {
        Ok(f) if !f.is_nan() => Some(Value::Float(f)),
        _ => None,
    }
}

fn to_number(value: &Value) -> Option<Value> {
    match value {
        Value::Integer(_) | Value::Float(_) => Some(value.clone()),
        Value::Text(s) => parse_number(s),
        Value::Null => None,
    }
}

/// A numeric column stays integer only when every cell is an integer.
fn unify(parsed: Vec<Option<Value>>) -> Vec<Value> {
    let all_integer = parsed.iter().all(|v| matches!(v, Some(Value::Integer(_))));
    parsed
        .into_iter()
        .map(|v| match v {
            Some(Value::Integer(i)) if !all_integer => Value::Float(i as f64),
            Some(v) => v,
            None => Value::Null,
        })
        .collect()
}

/// Tolerant coercion: anything that does not parse becomes `Null`.
pub fn coerce_values(values: Vec<Value>) -> Vec<Value> {
    unify(values.iter().map(to_number).collect())
}

/// Strict coercion: `None` when any present cell fails to parse. Empty
/// text counts as missing rather than as a failure.
pub fn try_coerce_values(values: &[Value]) -> Option<Vec<Value>> {
    let mut parsed = Vec::with_capacity(values.len());
    for v in values {
        match v {
            Value::Null => parsed.push(None),
            Value::Text(s) if s.trim().is_empty() => parsed.push(None),
            other => parsed.push(Some(to_number(other)?)),
        }
    }
    Some(unify(parsed))
}

/// Tolerantly coerce one column in place. Returns how many cells that were
/// present before ended up missing.
pub fn coerce_column(table: &mut Table, idx: usize) -> usize {
    let before = table.column_values(idx).filter(|v| !v.is_null()).count();
    let values = coerce_values(table.take_column(idx));
    let after = values.iter().filter(|v| !v.is_null()).count();
    let name = table.columns[idx].clone();
    table.set_column(&name, values);
    before - after
}

/// Strictly coerce one column in place; leaves it untouched on failure.
pub fn try_coerce_column(table: &mut Table, idx: usize) -> bool {
    let values: Vec<Value> = table.column_values(idx).cloned().collect();
    match try_coerce_values(&values) {
        Some(coerced) => {
            let name = table.columns[idx].clone();
            table.set_column(&name, coerced);
            true
        }
        None => false,
    }
}
