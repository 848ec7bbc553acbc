//! Merge the NYC public high school datasets into one table keyed by `DBN`.
//!
//! ```text
//!  loader ─▶ clean::* ─▶ merge ─▶ fill ─▶ writer
//! ```

pub mod clean;
pub mod config;
pub mod data;
pub mod error;
pub mod fill;
pub mod merge;
pub mod pipeline;
pub mod writer;
