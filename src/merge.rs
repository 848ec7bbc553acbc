use std::collections::{HashMap, HashSet};

use crate::data::model::{Table, Value};
use crate::error::CleanError;

/// How rows without a partner on the right are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Keep every left row; unmatched ones get missing right-hand cells.
    Left,
    /// Keep only left rows whose key exists on the right.
    Inner,
}

/// Join `right` onto `left` by equal `key` values.
///
/// Output rows follow left order, each expanded by its matching right rows
/// in right order. The key column appears once, where `left` had it.
/// Other column names present on both sides get `_x` / `_y` suffixes.
/// Missing keys never match.
pub fn merge(left: Table, right: Table, key: &str, how: JoinKind) -> Result<Table, CleanError> {
    let lk = left.require_column(key)?;
    let rk = right.require_column(key)?;

    let columns = merged_columns(&left, &right, rk)?;
    let mut out = Table::new(left.name.clone(), columns);

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows.iter().enumerate() {
        if let Some(k) = key_text(&row[rk]) {
            index.entry(k).or_default().push(i);
        }
    }

    let right_width = right.columns.len() - 1;
    for row in left.rows {
        let matches = key_text(&row[lk]).and_then(|k| index.get(&k));
        match (matches, how) {
            (Some(partners), _) => {
                for &r in partners {
                    let mut joined = row.clone();
                    joined.extend(
                        right.rows[r]
                            .iter()
                            .enumerate()
                            .filter(|(i, _)| *i != rk)
                            .map(|(_, v)| v.clone()),
                    );
                    out.rows.push(joined);
                }
            }
            (None, JoinKind::Left) => {
                let mut joined = row;
                joined.resize(joined.len() + right_width, Value::Null);
                out.rows.push(joined);
            }
            (None, JoinKind::Inner) => {}
        }
    }
    Ok(out)
}

fn key_text(value: &Value) -> Option<String> {
    (!value.is_null()).then(|| value.to_string())
}

fn merged_columns(left: &Table, right: &Table, rk: usize) -> Result<Vec<String>, CleanError> {
    let key = &right.columns[rk];
    let right_names: Vec<&String> = right
        .columns
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != rk)
        .map(|(_, c)| c)
        .collect();
    let overlap: HashSet<&String> = left
        .columns
        .iter()
        .filter(|c| *c != key && right_names.contains(c))
        .collect();

    let suffixed = |name: &String, suffix: &str| {
        if overlap.contains(name) {
            format!("{name}{suffix}")
        } else {
            name.clone()
        }
    };

    let mut columns: Vec<String> = left.columns.iter().map(|c| suffixed(c, "_x")).collect();
    columns.extend(right_names.into_iter().map(|c| suffixed(c, "_y")));

    let mut seen = HashSet::new();
    if let Some(dup) = columns.iter().find(|c| !seen.insert(*c)) {
        return Err(CleanError::DuplicateColumn {
            left: left.name.clone(),
            right: right.name.clone(),
            column: dup.clone(),
        });
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
        let mut t = Table::new(name, columns.iter().map(|c| c.to_string()).collect());
        t.rows = rows;
        t
    }

    fn sat() -> Table {
        table(
            "sat_results",
            &["DBN", "score"],
            vec![
                vec!["01M292".into(), Value::Integer(1122)],
                vec!["01M448".into(), Value::Integer(1172)],
                vec!["01M450".into(), Value::Integer(1149)],
            ],
        )
    }

    #[test]
    fn left_join_keeps_unmatched_rows() {
        let ap = table("ap_2010", &["DBN", "takers"], vec![vec!["01M448".into(), Value::Integer(39)]]);
        let out = merge(sat(), ap, "DBN", JoinKind::Left).unwrap();
        assert_eq!(out.columns, ["DBN", "score", "takers"]);
        assert_eq!(out.len(), 3);
        assert_eq!(out.get(0, "takers"), Some(&Value::Null));
        assert_eq!(out.get(1, "takers"), Some(&Value::Integer(39)));
    }

    #[test]
    fn inner_join_drops_unmatched_rows_and_keeps_left_order() {
        let other = table(
            "demographics",
            &["year", "DBN"],
            vec![
                vec![Value::Integer(2012), "01M450".into()],
                vec![Value::Integer(2012), "01M292".into()],
            ],
        );
        let out = merge(sat(), other, "DBN", JoinKind::Inner).unwrap();
        assert_eq!(out.columns, ["DBN", "score", "year"]);
        let dbns: Vec<_> = out.column_values(0).map(|v| v.to_string()).collect();
        assert_eq!(dbns, ["01M292", "01M450"]);
    }

    #[test]
    fn duplicate_right_keys_multiply_rows() {
        let other = table(
            "x",
            &["DBN", "v"],
            vec![
                vec!["01M292".into(), Value::Integer(1)],
                vec!["01M292".into(), Value::Integer(2)],
            ],
        );
        let out = merge(sat(), other, "DBN", JoinKind::Inner).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.get(1, "v"), Some(&Value::Integer(2)));
    }

    #[test]
    fn overlapping_names_are_suffixed() {
        let other = table("x", &["DBN", "score"], vec![vec!["01M292".into(), Value::Integer(7)]]);
        let out = merge(sat(), other, "DBN", JoinKind::Left).unwrap();
        assert_eq!(out.columns, ["DBN", "score_x", "score_y"]);
    }

    #[test]
    fn suffix_collision_is_an_error() {
        let left = table("l", &["DBN", "a", "a_x"], vec![]);
        let right = table("r", &["DBN", "a"], vec![]);
        assert!(matches!(
            merge(left, right, "DBN", JoinKind::Left),
            Err(CleanError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn missing_keys_never_match() {
        let left = table("l", &["DBN"], vec![vec![Value::Null]]);
        let right = table("r", &["DBN", "v"], vec![vec![Value::Null, Value::Integer(1)]]);
        assert!(merge(left, right, "DBN", JoinKind::Inner).unwrap().is_empty());
    }
}
