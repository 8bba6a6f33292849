//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - spreadsheet cells, columns and tables (`Cell`, `Column`, `Table`)
//! - the closed set of semantic columns the loader knows (`KnownColumn`)

pub mod types;

pub use types::*;
