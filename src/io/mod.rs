//! Input/output helpers.
//!
//! - spreadsheet ingest + cleaning (`ingest`)
//! - fit summary / time series exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
