//! Library side of the `ecmo` command-line calculator.

pub mod case_file;
pub mod config;
pub mod logging;
pub mod report;
