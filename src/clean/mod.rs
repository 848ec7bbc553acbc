//! One cleaning rule set per source dataset.
//!
//! Each `clean` takes ownership of the freshly loaded [`Table`] and returns
//! the normalized one; rules inside a module run in a fixed order. After
//! cleaning, every table carries a `DBN` column.
//!
//! [`Table`]: crate::data::model::Table

pub mod ap;
pub mod class_size;
pub mod demographics;
pub mod directory;
pub mod graduation;
pub mod sat;
pub mod survey;
