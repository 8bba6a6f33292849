//! Reporting utilities: plain-text summaries of fits and time series.

pub mod format;

pub use format::*;
