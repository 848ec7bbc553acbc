use std::path::PathBuf;

/// Failures that abort a cleaning run.
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{dataset}: missing column '{column}'")]
    MissingColumn { dataset: String, column: String },

    #[error("{dataset} row {row}: bad location {value:?}: {reason}")]
    BadLocation {
        dataset: String,
        row: usize,
        value: String,
        reason: &'static str,
    },

    #[error("merging {right} into {left} produces duplicate column '{column}'")]
    DuplicateColumn {
        left: String,
        right: String,
        column: String,
    },
}
