//! Shared pipeline steps used by every subcommand.
//!
//! resolve input path -> load + clean -> year-over-year columns -> selections
//!
//! The command handlers in `app` then focus on presentation and exports.

use std::path::PathBuf;

use nalgebra::{DMatrix, DVector};
use tracing::info;

use crate::cli::{DataArgs, FitArgs, SeriesArgs};
use crate::dataset::StatisticalDataset;
use crate::error::AppError;
use crate::metrics::Targets;

/// Environment variable naming the default input file.
pub const DATA_ENV: &str = "HOUSING_DATA";

/// Input used when neither `--data` nor `$HOUSING_DATA` is given.
pub const DEFAULT_DATA_PATH: &str = "data/stadat-lak0001.xlsx";

/// Inputs of a single regression run, ready for `fit::fit`.
#[derive(Debug, Clone)]
pub struct FitInputs {
    pub features: Vec<String>,
    pub target: String,
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

/// `--data`, else `$HOUSING_DATA` (after loading `.env`), else the default path.
pub fn resolve_data_path(args: &DataArgs) -> PathBuf {
    if let Some(path) = &args.data {
        return path.clone();
    }
    dotenvy::dotenv().ok();
    std::env::var_os(DATA_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

pub fn load_dataset(args: &DataArgs) -> Result<StatisticalDataset, AppError> {
    let path = resolve_data_path(args);
    info!(path = %path.display(), "loading dataset");
    Ok(StatisticalDataset::from_path(&path)?)
}

/// Load, derive, select, and extract the regression inputs.
pub fn prepare_fit(args: &FitArgs) -> Result<FitInputs, AppError> {
    let mut dataset = load_dataset(&args.data)?;
    if !args.yoy.is_empty() {
        dataset.apply_year_on_year(&Targets::Many(args.yoy.clone()), None)?;
    }
    if !args.features.is_empty() {
        let features: Vec<&str> = args.features.iter().map(String::as_str).collect();
        dataset.select_features(&features)?;
    }
    if let Some(target) = &args.target {
        dataset.select_target(target)?;
    }

    let selection = dataset.selection().clone();
    Ok(FitInputs {
        x: dataset.feature_matrix()?,
        y: dataset.target_vector()?,
        features: selection.features,
        target: selection.target,
    })
}

/// Load, derive, and select the time series axes.
pub fn prepare_series(args: &SeriesArgs) -> Result<StatisticalDataset, AppError> {
    let mut dataset = load_dataset(&args.data)?;
    if !args.yoy.is_empty() {
        let results = (!args.yoy_names.is_empty()).then(|| Targets::Many(args.yoy_names.clone()));
        dataset.apply_year_on_year(&Targets::Many(args.yoy.clone()), results.as_ref())?;
    }
    if let Some(x) = &args.x_axis {
        dataset.select_x_axis(x)?;
    }
    if let Some(y) = &args.y_axis {
        dataset.select_y_axis(y)?;
    }
    Ok(dataset)
}
