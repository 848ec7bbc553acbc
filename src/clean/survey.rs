use crate::config::KEY;
use crate::data::model::Table;
use crate::error::CleanError;

/// Identifier column as spelled in the survey files.
pub const SOURCE_KEY: &str = "dbn";

/// Stack the citywide and District 75 surveys into one table.
pub fn combine(all: Table, d75: Table) -> Result<Table, CleanError> {
    let mut survey = all.concat(d75)?;
    survey.name = "survey".to_string();
    Ok(survey)
}

pub fn clean(mut table: Table) -> Result<Table, CleanError> {
    table.rename_column(SOURCE_KEY, KEY)?;
    Ok(table)
}
