//! Core domain: parsing, date lookup, series arithmetic and report assembly.
//!
//! Nothing in here performs I/O.

pub mod config_validation;
pub mod dataset;
pub mod date_index;
pub mod date_label;
pub mod error;
pub mod report;
pub mod series_math;
