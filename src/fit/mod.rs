//! Linear regression fitting.
//!
//! Responsibilities:
//!
//! - fit OLS with intercept on a feature matrix / target vector
//! - score the fit (training R²) and produce predictions

pub mod regression;

pub use regression::*;
