use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::clean;
use crate::config::{self, Config, KEY};
use crate::data::loader::{load_csv, load_tsv_1252};
use crate::data::model::{Table, Value};
use crate::fill::fill_gaps;
use crate::merge::{JoinKind, merge};
use crate::writer::write_csv;

pub const SCHOOL_DISTRICT_COLUMN: &str = "school_dist";

/// Every source table, each owned by its own field.
#[derive(Debug, Clone)]
pub struct Sources {
    pub ap_2010: Table,
    pub class_size: Table,
    pub demographics: Table,
    pub graduation: Table,
    pub hs_directory: Table,
    pub sat_results: Table,
    pub survey: Table,
}

impl Sources {
    /// Read all raw files below `dir`. Any missing or malformed file aborts.
    pub fn load(dir: &Path) -> Result<Self> {
        let csv = |file: &str| load_csv(&dir.join(file), file.trim_end_matches(".csv"));
        let survey_all = load_tsv_1252(
            &dir.join(config::SURVEY_ALL_FILE),
            "survey_all",
            &config::SURVEY_FIELDS,
        )?;
        let survey_d75 = load_tsv_1252(
            &dir.join(config::SURVEY_D75_FILE),
            "survey_d75",
            &config::SURVEY_FIELDS,
        )?;

        let sources = Sources {
            ap_2010: csv(config::AP_FILE)?,
            class_size: csv(config::CLASS_SIZE_FILE)?,
            demographics: csv(config::DEMOGRAPHICS_FILE)?,
            graduation: csv(config::GRADUATION_FILE)?,
            hs_directory: csv(config::DIRECTORY_FILE)?,
            sat_results: csv(config::SAT_FILE)?,
            survey: clean::survey::combine(survey_all, survey_d75)?,
        };
        sources.log("loaded");
        Ok(sources)
    }

    /// Run each source through its own cleaning rules.
    pub fn normalize(self) -> Result<Self> {
        let sources = Sources {
            ap_2010: clean::ap::clean(self.ap_2010)?,
            class_size: clean::class_size::clean(self.class_size)?,
            demographics: clean::demographics::clean(self.demographics)?,
            graduation: clean::graduation::clean(self.graduation)?,
            hs_directory: clean::directory::clean(self.hs_directory)?,
            sat_results: clean::sat::clean(self.sat_results)?,
            survey: clean::survey::clean(self.survey)?,
        };
        sources.log("cleaned");
        Ok(sources)
    }

    /// Join everything onto the SAT results. AP and graduation data are
    /// optional; a school missing from any other source is dropped.
    pub fn combine(self) -> Result<Table> {
        let mut combined = self.sat_results;
        combined.name = "combined".to_string();

        let steps = [
            (self.ap_2010, JoinKind::Left),
            (self.graduation, JoinKind::Left),
            (self.class_size, JoinKind::Inner),
            (self.demographics, JoinKind::Inner),
            (self.survey, JoinKind::Inner),
            (self.hs_directory, JoinKind::Inner),
        ];
        for (table, how) in steps {
            let source = table.name.clone();
            combined = merge(combined, table, KEY, how)
                .with_context(|| format!("joining {source}"))?;
            info!("after {how:?} join with {source}: {} rows", combined.len());
        }
        Ok(combined)
    }

    fn log(&self, stage: &str) {
        for t in [
            &self.ap_2010,
            &self.class_size,
            &self.demographics,
            &self.graduation,
            &self.hs_directory,
            &self.sat_results,
            &self.survey,
        ] {
            info!("{stage} {}: {} rows, {} columns", t.name, t.len(), t.columns.len());
        }
    }
}

/// First two characters of a `DBN`; shorter keys give a shorter result.
pub fn school_district(dbn: &str) -> String {
    dbn.chars().take(2).collect()
}

/// Fill the gaps and add the district column.
pub fn finish(mut combined: Table) -> Result<Table> {
    let report = fill_gaps(&mut combined);
    info!(
        "filled {} cells with column means, {} with zero",
        report.with_mean, report.with_zero
    );

    let key = combined.require_column(KEY)?;
    let districts = combined
        .column_values(key)
        .map(|dbn| Value::Text(school_district(&dbn.to_string())))
        .collect();
    combined.set_column(SCHOOL_DISTRICT_COLUMN, districts);
    Ok(combined)
}

/// Load, clean, join, fill and write. Returns the final table.
pub fn run(config: &Config) -> Result<Table> {
    let sources = Sources::load(&config.raw_dir)
        .with_context(|| format!("loading from {}", config.raw_dir.display()))?;
    let combined = finish(sources.normalize()?.combine()?)?;
    write_csv(&combined, &config.output)?;
    info!(
        "wrote {} schools x {} columns to {}",
        combined.len(),
        combined.columns.len(),
        config.output.display()
    );
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_is_a_plain_prefix() {
        assert_eq!(school_district("01M292"), "01");
        assert_eq!(school_district("7"), "7");
        assert_eq!(school_district(""), "");
    }

    #[test]
    fn finish_fills_then_adds_district() {
        let mut t = Table::new("combined", vec![KEY.into(), "n".into()]);
        t.rows = vec![
            vec!["31R064".into(), Value::Null],
            vec!["02M047".into(), Value::Integer(4)],
        ];
        let t = finish(t).unwrap();
        assert_eq!(t.columns, [KEY, "n", SCHOOL_DISTRICT_COLUMN]);
        assert_eq!(t.get(0, "n"), Some(&Value::Float(4.0)));
        assert_eq!(t.get(0, SCHOOL_DISTRICT_COLUMN), Some(&Value::from("31")));
    }
}
