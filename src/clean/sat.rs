use log::debug;

use crate::data::filter::drop_incomplete_rows;
use crate::data::model::{Table, Value};
use crate::data::numeric::coerce_column;
use crate::error::CleanError;

pub const SUBJECT_COLUMNS: [&str; 3] = [
    "SAT Math Avg. Score",
    "SAT Critical Reading Avg. Score",
    "SAT Writing Avg. Score",
];

pub const TOTAL_COLUMN: &str = "SAT_score";

/// Coerce the subject scores, add their total and drop every row that
/// still has a gap anywhere.
pub fn clean(mut table: Table) -> Result<Table, CleanError> {
    let mut subjects = [0usize; 3];
    for (slot, name) in subjects.iter_mut().zip(SUBJECT_COLUMNS) {
        *slot = table.require_column(name)?;
        let lost = coerce_column(&mut table, *slot);
        debug!("{}: {lost} unparseable '{name}' values", table.name);
    }

    let totals = table
        .rows
        .iter()
        .map(|row| total(subjects.iter().map(|&i| &row[i])))
        .collect();
    table.set_column(TOTAL_COLUMN, totals);

    let dropped = drop_incomplete_rows(&mut table);
    debug!("{}: dropped {dropped} incomplete rows", table.name);
    Ok(table)
}

/// Sum of the scores; any missing score makes the total missing.
fn total<'a>(scores: impl Iterator<Item = &'a Value>) -> Value {
    let mut int_sum: Option<i64> = Some(0);
    let mut sum = 0.0;
    for score in scores {
        match score {
            Value::Integer(i) => {
                int_sum = int_sum.and_then(|s| s.checked_add(*i));
                sum += *i as f64;
            }
            Value::Float(f) => {
                int_sum = None;
                sum += f;
            }
            _ => return Value::Null,
        }
    }
    match int_sum {
        Some(s) => Value::Integer(s),
        None => Value::Float(sum),
    }
}
