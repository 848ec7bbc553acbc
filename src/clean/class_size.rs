use std::collections::BTreeMap;

use log::debug;

use crate::config::KEY;
use crate::data::filter::retain_equal;
use crate::data::model::{Table, Value};
use crate::error::CleanError;

pub const DISTRICT_COLUMN: &str = "CSD";
pub const SCHOOL_CODE_COLUMN: &str = "SCHOOL CODE";
pub const GRADE_COLUMN: &str = "GRADE ";
pub const PROGRAM_COLUMN: &str = "PROGRAM TYPE";
pub const HIGH_SCHOOL_GRADES: &str = "09-12";
pub const GENERAL_EDUCATION: &str = "GEN ED";

/// Derive `DBN`, keep general-education high school rows and collapse them
/// to one row per school holding the mean of every numeric column.
pub fn clean(mut table: Table) -> Result<Table, CleanError> {
    let district = table.require_column(DISTRICT_COLUMN)?;
    let code = table.require_column(SCHOOL_CODE_COLUMN)?;
    let dbns = table
        .rows
        .iter()
        .map(|row| dbn(&row[district], &row[code]))
        .collect();
    table.set_column(KEY, dbns);

    let grade = retain_equal(&mut table, GRADE_COLUMN, &Value::from(HIGH_SCHOOL_GRADES))?;
    let program = retain_equal(&mut table, PROGRAM_COLUMN, &Value::from(GENERAL_EDUCATION))?;
    debug!(
        "{}: removed {grade} non high school and {program} non GEN ED rows",
        table.name
    );

    Ok(mean_by_key(&table))
}

/// Zero-pad the district to two digits and append the school code.
pub fn dbn(district: &Value, school_code: &Value) -> Value {
    if district.is_null() || school_code.is_null() {
        return Value::Null;
    }
    Value::Text(format!("{:0>2}{}", district.to_string(), school_code))
}

/// One row per `DBN` in key order: the key, then the mean of each numeric
/// column over that key's rows. Text columns are dropped, and so are rows
/// without a key.
fn mean_by_key(table: &Table) -> Table {
    let key = table.column_index(KEY).unwrap_or_default();
    let numeric: Vec<usize> = (0..table.columns.len())
        .filter(|&i| i != key && table.is_numeric_column(i))
        .collect();

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, row) in table.rows.iter().enumerate() {
        if let Value::Text(k) = &row[key] {
            groups.entry(k.clone()).or_default().push(i);
        }
    }

    let mut columns = vec![KEY.to_string()];
    columns.extend(numeric.iter().map(|&i| table.columns[i].clone()));
    let mut out = Table::new(table.name.clone(), columns);

    for (k, members) in groups {
        let mut row = Vec::with_capacity(numeric.len() + 1);
        row.push(Value::Text(k));
        for &col in &numeric {
            let present: Vec<f64> = members
                .iter()
                .filter_map(|&r| table.rows[r][col].as_f64())
                .collect();
            row.push(if present.is_empty() {
                Value::Null
            } else {
                Value::Float(present.iter().sum::<f64>() / present.len() as f64)
            });
        }
        out.rows.push(row);
    }
    out
}
