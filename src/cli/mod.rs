//! Command-line parsing for the housing statistics tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hs", version, about = "Housing market statistics: cleaning, year-over-year change, OLS")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a linear regression between the selected columns and print the result.
    Fit(FitArgs),
    /// Print the selected time series, optionally with year-over-year change columns.
    Series(SeriesArgs),
    /// List the columns of the cleaned dataset.
    Columns(DataArgs),
}

/// Input location shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Path to the statistics export (.xlsx/.xls/.ods or .csv).
    ///
    /// Defaults to `$HOUSING_DATA` (also read from `.env`), then
    /// `data/stadat-lak0001.xlsx`.
    #[arg(short = 'd', long)]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Feature column (repeat for several features).
    #[arg(short = 'f', long = "feature")]
    pub features: Vec<String>,

    /// Target column.
    #[arg(short = 't', long)]
    pub target: Option<String>,

    /// Year-over-year change columns to add before fitting (usable as feature/target).
    #[arg(long = "yoy")]
    pub yoy: Vec<String>,

    /// Write the fit summary as JSON.
    #[arg(long)]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Column for the x axis.
    #[arg(short = 'x', long = "x")]
    pub x_axis: Option<String>,

    /// Column for the y axis.
    #[arg(short = 'y', long = "y")]
    pub y_axis: Option<String>,

    /// Add a year-over-year change column for this source (repeatable).
    #[arg(long = "yoy")]
    pub yoy: Vec<String>,

    /// Explicit names for the `--yoy` columns, matched by position.
    #[arg(long = "yoy-name")]
    pub yoy_names: Vec<String>,

    /// Write the selected series as CSV.
    #[arg(long)]
    pub export_csv: Option<PathBuf>,
}
