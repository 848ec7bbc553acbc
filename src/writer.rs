use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::{Table, Value, format_float};

/// Write `table` as comma-delimited text with a header row and no index.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_table(table, file).with_context(|| format!("writing {}", path.display()))
}

pub fn write_table<W: Write>(table: &Table, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&table.columns)?;

    // A column holding any float renders all of its numbers as floats.
    let float_columns: Vec<bool> = (0..table.columns.len())
        .map(|i| table.column_values(i).any(|v| matches!(v, Value::Float(_))))
        .collect();

    for row in &table.rows {
        writer.write_record(
            row.iter()
                .zip(&float_columns)
                .map(|(v, &float)| format_cell(v, float)),
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn format_cell(value: &Value, float_column: bool) -> String {
    match value {
        Value::Integer(i) if float_column => format_float(*i as f64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_rows_and_float_columns() {
        let mut t = Table::new("t", vec!["DBN".into(), "n".into(), "avg".into(), "note".into()]);
        t.rows = vec![
            vec!["01M292".into(), Value::Integer(3), Value::Integer(2), "a, b".into()],
            vec!["01M448".into(), Value::Integer(4), Value::Float(2.5), Value::Null],
        ];
        let mut buf = Vec::new();
        write_table(&t, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "DBN,n,avg,note\n01M292,3,2.0,\"a, b\"\n01M448,4,2.5,\n"
        );
    }
}
