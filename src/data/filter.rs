use std::collections::HashSet;

use super::model::{Table, Value};
use crate::error::CleanError;

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Return indices of rows that pass `keep`.
pub fn filtered_indices<F>(table: &Table, keep: F) -> Vec<usize>
where
    F: Fn(&[Value]) -> bool,
{
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| keep(row))
        .map(|(i, _)| i)
        .collect()
}

/// Keep only rows whose `column` cell matches `wanted` (see
/// [`Value::matches`]). Returns the number of rows removed.
pub fn retain_equal(table: &mut Table, column: &str, wanted: &Value) -> Result<usize, CleanError> {
    let idx = table.require_column(column)?;
    let before = table.len();
    table.rows.retain(|row| row[idx].matches(wanted));
    Ok(before - table.len())
}

/// Drop every row that has a missing cell in any column.
pub fn drop_incomplete_rows(table: &mut Table) -> usize {
    let keep = filtered_indices(table, |row| row.iter().all(|v| !v.is_null()));
    let removed = table.len() - keep.len();
    let rows = std::mem::take(&mut table.rows);
    table.rows = rows
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.binary_search(i).is_ok())
        .map(|(_, row)| row)
        .collect();
    removed
}

/// Keep the first row for each distinct `column` value. Missing values are
/// treated as one shared key.
pub fn dedup_by(table: &mut Table, column: &str) -> Result<usize, CleanError> {
    let idx = table.require_column(column)?;
    let before = table.len();
    let mut seen: HashSet<Option<String>> = HashSet::new();
    table.rows.retain(|row| {
        let key = (!row[idx].is_null()).then(|| row[idx].to_string());
        seen.insert(key)
    });
    Ok(before - table.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut t = Table::new("t", vec!["DBN".into(), "v".into()]);
        t.rows = vec![
            vec!["01M015".into(), Value::Integer(1)],
            vec!["01M015".into(), Value::Null],
            vec!["02M047".into(), Value::Integer(3)],
        ];
        t
    }

    #[test]
    fn retain_equal_is_exact() {
        let mut t = table();
        let removed = retain_equal(&mut t, "DBN", &Value::from("01M015")).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(t.len(), 2);

        let mut t = table();
        retain_equal(&mut t, "DBN", &Value::from("01M015 ")).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn drop_incomplete_rows_checks_every_column() {
        let mut t = table();
        assert_eq!(drop_incomplete_rows(&mut t), 1);
        assert_eq!(t.get(1, "DBN"), Some(&Value::from("02M047")));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut t = table();
        assert_eq!(dedup_by(&mut t, "DBN").unwrap(), 1);
        assert_eq!(t.get(0, "v"), Some(&Value::Integer(1)));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn filter_on_unknown_column_fails() {
        let mut t = table();
        assert!(retain_equal(&mut t, "Cohort", &Value::from("2006")).is_err());
    }
}
