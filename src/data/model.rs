use std::fmt;

use crate::error::CleanError;

// ---------------------------------------------------------------------------
// Value – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV column can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl Value {
    /// Interpret the value as an `f64`; text is never parsed here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Equality used by row filters: text compares exactly, numbers compare
    /// by value regardless of integer/float storage, missing never matches.
    pub fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (a, b) if a.is_numeric() && b.is_numeric() => a.as_f64() == b.as_f64(),
            _ => false,
        }
    }
}

/// Render a float the way the source tooling does: whole numbers keep a
/// trailing `.0`, everything else uses the shortest round-trip form.
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// Table – one named dataset held row-major in memory
// ---------------------------------------------------------------------------

/// An ordered collection of rows sharing one header.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Dataset name, used in log lines and error messages.
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Table {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like [`Table::column_index`] but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize, CleanError> {
        self.column_index(name)
            .ok_or_else(|| CleanError::MissingColumn {
                dataset: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), CleanError> {
        let idx = self.require_column(from)?;
        self.columns[idx] = to.to_string();
        Ok(())
    }

    /// Cell lookup by row number and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Replace the column if it exists, otherwise append it.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Move a column's cells out, leaving `Null` behind.
    pub fn take_column(&mut self, idx: usize) -> Vec<Value> {
        self.rows
            .iter_mut()
            .map(|row| std::mem::replace(&mut row[idx], Value::Null))
            .collect()
    }

    /// A column is numeric when none of its present cells is text.
    /// An all-missing column counts as numeric.
    pub fn is_numeric_column(&self, idx: usize) -> bool {
        self.column_values(idx).all(|v| v.is_null() || v.is_numeric())
    }

    /// Append `other`'s rows below this table's, aligning cells by column
    /// name. Both tables must carry the same set of columns.
    pub fn concat(mut self, other: Table) -> Result<Table, CleanError> {
        let mapping: Vec<usize> = self
            .columns
            .iter()
            .map(|c| other.require_column(c))
            .collect::<Result<_, _>>()?;
        if other.columns.len() != self.columns.len() {
            let extra = other
                .columns
                .iter()
                .find(|c| !self.columns.contains(c))
                .cloned()
                .unwrap_or_default();
            return Err(CleanError::MissingColumn {
                dataset: self.name,
                column: extra,
            });
        }

        self.rows.reserve(other.rows.len());
        for mut row in other.rows {
            let aligned = mapping
                .iter()
                .map(|&i| std::mem::replace(&mut row[i], Value::Null))
                .collect();
            self.rows.push(aligned);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new("t", vec!["DBN".into(), "n".into()]);
        t.rows.push(vec!["01M015".into(), Value::Integer(3)]);
        t.rows.push(vec!["02M047".into(), Value::Null]);
        t
    }

    #[test]
    fn float_formatting_keeps_trailing_zero() {
        assert_eq!(format_float(72.0), "72.0");
        assert_eq!(format_float(72.5), "72.5");
        assert_eq!(format_float(-74.006), "-74.006");
    }

    #[test]
    fn matches_compares_numbers_by_value() {
        assert!(Value::Integer(20112012).matches(&Value::Float(20112012.0)));
        assert!(!Value::from("2006").matches(&Value::Integer(2006)));
        assert!(!Value::Null.matches(&Value::Null));
    }

    #[test]
    fn set_column_appends_then_replaces() {
        let mut t = sample();
        t.set_column("x", vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(t.columns, ["DBN", "n", "x"]);
        t.set_column("x", vec![Value::Null, Value::Null]);
        assert_eq!(t.columns.len(), 3);
        assert_eq!(t.get(1, "x"), Some(&Value::Null));
    }

    #[test]
    fn missing_column_names_the_dataset() {
        let err = sample().require_column("nope").unwrap_err();
        assert_eq!(err.to_string(), "t: missing column 'nope'");
    }

    #[test]
    fn concat_aligns_by_name() {
        let mut other = Table::new("u", vec!["n".into(), "DBN".into()]);
        other.rows.push(vec![Value::Integer(9), "03M001".into()]);
        let joined = sample().concat(other).unwrap();
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.get(2, "DBN"), Some(&Value::from("03M001")));
        assert_eq!(joined.get(2, "n"), Some(&Value::Integer(9)));
    }

    #[test]
    fn numeric_column_detection() {
        let t = sample();
        assert!(!t.is_numeric_column(0));
        assert!(t.is_numeric_column(1));
    }
}
