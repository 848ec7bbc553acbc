use log::debug;

use crate::data::filter::retain_equal;
use crate::data::model::{Table, Value};
use crate::error::CleanError;

pub const YEAR_COLUMN: &str = "schoolyear";
/// The 2011-2012 school year, the one the SAT results cover.
pub const SCHOOL_YEAR: i64 = 20112012;

pub fn clean(mut table: Table) -> Result<Table, CleanError> {
    let removed = retain_equal(&mut table, YEAR_COLUMN, &Value::Integer(SCHOOL_YEAR))?;
    debug!("{}: removed {removed} rows from other years", table.name);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_one_school_year() {
        let mut t = Table::new("demographics", vec!["DBN".into(), YEAR_COLUMN.into()]);
        t.rows = vec![
            vec!["01M015".into(), Value::Integer(20052006)],
            vec!["01M015".into(), Value::Integer(20112012)],
            vec!["01M019".into(), Value::Integer(20102011)],
        ];
        let t = clean(t).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(0, YEAR_COLUMN), Some(&Value::Integer(SCHOOL_YEAR)));
    }
}
