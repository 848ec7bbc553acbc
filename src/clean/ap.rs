use log::debug;

use crate::config::KEY;
use crate::data::filter::dedup_by;
use crate::data::model::Table;
use crate::data::numeric::coerce_column;
use crate::error::CleanError;

pub const COUNT_COLUMNS: [&str; 3] = [
    "AP Test Takers ",
    "Total Exams Taken",
    "Number of Exams with scores 3 4 or 5",
];

/// Keep one row per school and make the exam counts numeric. Unparseable
/// counts become missing; no row is dropped for them.
pub fn clean(mut table: Table) -> Result<Table, CleanError> {
    let dupes = dedup_by(&mut table, KEY)?;
    debug!("{}: removed {dupes} duplicate schools", table.name);

    for name in COUNT_COLUMNS {
        let idx = table.require_column(name)?;
        let lost = coerce_column(&mut table, idx);
        debug!("{}: {lost} unparseable '{name}' values", table.name);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    #[test]
    fn first_duplicate_wins_and_counts_coerce() {
        let mut t = Table::new(
            "ap_2010",
            vec![
                "DBN".into(),
                COUNT_COLUMNS[0].into(),
                COUNT_COLUMNS[1].into(),
                COUNT_COLUMNS[2].into(),
            ],
        );
        t.rows = vec![
            vec!["01M448".into(), "39".into(), "49".into(), "10".into()],
            vec!["01M448".into(), "1".into(), "1".into(), "1".into()],
            vec!["01M450".into(), "19".into(), "21".into(), "s".into()],
        ];
        let t = clean(t).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(0, COUNT_COLUMNS[0]), Some(&Value::Integer(39)));
        assert_eq!(t.get(1, COUNT_COLUMNS[2]), Some(&Value::Null));
        assert_eq!(t.get(0, COUNT_COLUMNS[2]), Some(&Value::Float(10.0)));
    }
}
