//! CLI layer: terminal presentation

pub mod output;
pub mod report;

pub use report::{print_report, result_line, sections};
