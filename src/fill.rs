use log::debug;

use crate::data::model::{Table, Value};

/// Counts of cells filled per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    pub with_mean: usize,
    pub with_zero: usize,
}

/// Mean of a column's present numeric cells, `None` if it has none.
pub fn column_mean(table: &Table, idx: usize) -> Option<f64> {
    let (sum, n) = table
        .column_values(idx)
        .filter_map(Value::as_f64)
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Fill every missing cell. Numeric columns use their own mean; whatever is
/// left (text columns, columns with nothing to average) becomes `0`.
pub fn fill_gaps(table: &mut Table) -> FillReport {
    let mut report = FillReport::default();

    for idx in 0..table.columns.len() {
        let mean = if table.is_numeric_column(idx) {
            column_mean(table, idx)
        } else {
            None
        };
        let fill = match mean {
            Some(m) => Value::Float(m),
            None => Value::Integer(0),
        };

        let mut filled = 0;
        for row in table.rows.iter_mut() {
            if row[idx].is_null() {
                row[idx] = fill.clone();
                filled += 1;
            }
        }
        if filled > 0 {
            debug!("{}: filled {filled} cells with {fill}", table.columns[idx]);
        }
        if mean.is_some() {
            report.with_mean += filled;
        } else {
            report.with_zero += filled;
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined() -> Table {
        let mut t = Table::new(
            "combined",
            vec!["DBN".into(), "takers".into(), "name".into(), "empty".into()],
        );
        t.rows = vec![
            vec!["01M292".into(), Value::Float(10.0), "A".into(), Value::Null],
            vec!["01M448".into(), Value::Null, Value::Null, Value::Null],
            vec!["01M450".into(), Value::Integer(20), "C".into(), Value::Null],
        ];
        t
    }

    #[test]
    fn numeric_gaps_take_the_column_mean() {
        let mut t = combined();
        let report = fill_gaps(&mut t);
        assert_eq!(t.get(1, "takers"), Some(&Value::Float(15.0)));
        assert_eq!(report.with_mean, 1);
    }

    #[test]
    fn text_and_all_missing_columns_take_zero() {
        let mut t = combined();
        let report = fill_gaps(&mut t);
        assert_eq!(t.get(1, "name"), Some(&Value::Integer(0)));
        assert!(t.column_values(3).all(|v| *v == Value::Integer(0)));
        assert_eq!(report.with_zero, 4);
    }

    #[test]
    fn nothing_missing_after_fill() {
        let mut t = combined();
        fill_gaps(&mut t);
        assert!(t.rows.iter().flatten().all(|v| !v.is_null()));
    }

    #[test]
    fn mean_ignores_missing_cells() {
        assert_eq!(column_mean(&combined(), 1), Some(15.0));
        assert_eq!(column_mean(&combined(), 3), None);
    }
}
