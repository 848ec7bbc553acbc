use log::debug;

use crate::data::filter::retain_equal;
use crate::data::model::{Table, Value};
use crate::data::numeric::try_coerce_column;
use crate::error::CleanError;

pub const COHORT_COLUMN: &str = "Cohort";
pub const DEMOGRAPHIC_COLUMN: &str = "Demographic";
/// Students entering in 2006, the class of 2010.
pub const COHORT: &str = "2006";
pub const TOTAL_COHORT: &str = "Total Cohort";

/// Keep the 2006 total-cohort rows, strip `%` and the `s` suppression marker
/// from every cell and turn each column numeric where all of it parses.
pub fn clean(mut table: Table) -> Result<Table, CleanError> {
    retain_equal(&mut table, COHORT_COLUMN, &Value::from(COHORT))?;
    retain_equal(&mut table, DEMOGRAPHIC_COLUMN, &Value::from(TOTAL_COHORT))?;

    for cell in table.rows.iter_mut().flatten() {
        if !cell.is_null() {
            *cell = Value::Text(strip_markers(&cell.to_string()));
        }
    }

    for idx in 0..table.columns.len() {
        if !try_coerce_column(&mut table, idx) {
            debug!("{}: '{}' stays text", table.name, table.columns[idx]);
        }
    }
    Ok(table)
}

fn strip_markers(text: &str) -> String {
    text.chars().filter(|&c| c != '%' && c != 's').collect()
}
