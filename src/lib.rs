//! `housing-stats` library crate.
//!
//! The binary (`hs`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the load -> derive -> fit pipeline is reusable by other frontends (charts, notebooks)
//!
//! Pipeline:
//!
//! - `io::ingest` loads and cleans the fixed-layout export into a `domain::Table`
//! - `metrics` appends year-over-year change columns
//! - `dataset` pairs the table with a column `Selection`
//! - `fit` runs OLS on the selected feature/target columns

pub mod app;
pub mod cli;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod metrics;
pub mod report;
