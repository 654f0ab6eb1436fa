//! Restprobe CLI library - built-in suite and console reporting.

pub mod report;
pub mod scenarios;
