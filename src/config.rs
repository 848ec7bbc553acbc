use std::path::PathBuf;

use anyhow::{Result, bail};

// Locations
pub const DEFAULT_RAW_DIR: &str = "Raw Data";
pub const DEFAULT_OUTPUT: &str = "Cleaned data.csv";

// Inputs
pub const AP_FILE: &str = "ap_2010.csv";
pub const CLASS_SIZE_FILE: &str = "class_size.csv";
pub const DEMOGRAPHICS_FILE: &str = "demographics.csv";
pub const GRADUATION_FILE: &str = "graduation.csv";
pub const DIRECTORY_FILE: &str = "hs_directory.csv";
pub const SAT_FILE: &str = "sat_results.csv";
pub const SURVEY_ALL_FILE: &str = "survey_all.txt";
pub const SURVEY_D75_FILE: &str = "survey_d75.txt";

/// The only survey fields read from either survey file.
pub const SURVEY_FIELDS: [&str; 23] = [
    "dbn", "rr_s", "rr_t", "rr_p", "N_s", "N_t", "N_p",
    "saf_p_11", "com_p_11", "eng_p_11", "aca_p_11",
    "saf_t_11", "com_t_11", "eng_t_11", "aca_t_11",
    "saf_s_11", "com_s_11", "eng_s_11", "aca_s_11",
    "saf_tot_11", "com_tot_11", "eng_tot_11", "aca_tot_11",
];

// Join key
pub const KEY: &str = "DBN";

/// Where to read the raw files from and where to write the merged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub raw_dir: PathBuf,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Build from positional arguments: `[RAW_DIR] [OUTPUT]`.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();
        if let Some(dir) = args.next() {
            config.raw_dir = PathBuf::from(dir);
        }
        if let Some(out) = args.next() {
            config.output = PathBuf::from(out);
        }
        if let Some(extra) = args.next() {
            bail!("Unexpected argument: {extra} (usage: nyc-schools-clean [RAW_DIR] [OUTPUT])");
        }
        Ok(config)
    }
}
