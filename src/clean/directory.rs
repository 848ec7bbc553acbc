use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::config::KEY;
use crate::data::model::{Table, Value};
use crate::data::numeric::coerce_values;
use crate::error::CleanError;

pub const SOURCE_KEY: &str = "dbn";
pub const LOCATION_COLUMN: &str = "Location 1";
pub const LAT_COLUMN: &str = "lat";
pub const LON_COLUMN: &str = "lon";

fn coordinate_group() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^()]*)\)").expect("valid coordinate regex"))
}

/// Rename the key and split the location's `(lat, lon)` pair into numeric
/// `lat` / `lon` columns. A location that cannot be split aborts cleaning.
pub fn clean(mut table: Table) -> Result<Table, CleanError> {
    table.rename_column(SOURCE_KEY, KEY)?;
    let loc = table.require_column(LOCATION_COLUMN)?;

    let mut lats = Vec::with_capacity(table.len());
    let mut lons = Vec::with_capacity(table.len());
    for (row_no, row) in table.rows.iter().enumerate() {
        let text = row[loc].as_text().unwrap_or_default();
        let (lat, lon) = split_coordinates(text).map_err(|reason| CleanError::BadLocation {
            dataset: table.name.clone(),
            row: row_no,
            value: row[loc].to_string(),
            reason,
        })?;
        lats.push(Value::from(lat));
        lons.push(Value::from(lon));
    }

    let lats = coerce_values(lats);
    let lons = coerce_values(lons);
    let unparsed = lats.iter().chain(&lons).filter(|v| v.is_null()).count();
    debug!("{}: {unparsed} coordinates did not parse", table.name);

    table.set_column(LAT_COLUMN, lats);
    table.set_column(LON_COLUMN, lons);
    Ok(table)
}

/// Find the single parenthesized group and split it on its first comma.
pub fn split_coordinates(location: &str) -> Result<(&str, &str), &'static str> {
    let mut groups = coordinate_group().captures_iter(location);
    let inner = match (groups.next(), groups.next()) {
        (Some(caps), None) => caps.get(1).map_or("", |m| m.as_str()),
        (None, _) => return Err("no parenthesized coordinates"),
        (Some(_), Some(_)) => return Err("more than one parenthesized group"),
    };
    let (lat, lon) = inner.split_once(',').ok_or("no comma between coordinates")?;
    Ok((lat.trim(), lon.trim()))
}
