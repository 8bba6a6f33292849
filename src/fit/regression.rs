//! Ordinary least squares regression with intercept.
//!
//! Given a feature matrix `x` (rows = observations) and a target `y`, we:
//! - centre every feature column and the target
//! - solve the centred least squares problem for the coefficients
//! - recover the intercept as `ȳ - x̄ᵀβ`
//! - score the fit on the same data (`R² = 1 - SS_res / SS_tot`)
//!
//! Centring removes the intercept column from the SVD, which keeps the design
//! well conditioned when the features sit far from zero (housing counts are in
//! the millions).

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::math::solve_least_squares;

/// A fitted linear model. Borrows the data it was fitted on.
#[derive(Debug, Clone)]
pub struct RegressionModel<'a> {
    x: &'a DMatrix<f64>,
    y: &'a DVector<f64>,
    coefficients: DVector<f64>,
    intercept: f64,
    prediction: DVector<f64>,
    r_squared: f64,
}

/// Owned, serializable view of a fit for reports and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub features: Vec<String>,
    pub target: String,
    pub n_observations: usize,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Fit `y ≈ x·β + intercept` by ordinary least squares.
pub fn fit<'a>(x: &'a DMatrix<f64>, y: &'a DVector<f64>) -> Result<RegressionModel<'a>> {
    RegressionModel::fit(x, y)
}

impl<'a> RegressionModel<'a> {
    pub fn fit(x: &'a DMatrix<f64>, y: &'a DVector<f64>) -> Result<Self> {
        let (n, p) = x.shape();
        if n != y.len() {
            return Err(StatsError::Dimension(format!(
                "feature matrix has {n} rows but target has {} values",
                y.len()
            )));
        }
        if n == 0 || p == 0 {
            return Err(StatsError::Dimension(format!(
                "cannot fit on a {n}x{p} feature matrix"
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(StatsError::DegenerateInput(
                "inputs contain NaN or infinite values".to_string(),
            ));
        }

        // Checked on the raw values: the centred sums can miss exact zero by an ulp.
        if is_constant(y.iter()) {
            return Err(StatsError::DegenerateInput(
                "target has zero variance; R² is undefined".to_string(),
            ));
        }
        if let Some(j) = (0..p).find(|&j| is_constant(x.column(j).iter())) {
            return Err(StatsError::DegenerateInput(format!(
                "feature column {j} is constant"
            )));
        }

        let y_mean = y.mean();
        let y_centred = y.add_scalar(-y_mean);
        let ss_tot = y_centred.norm_squared();
        if ss_tot <= 0.0 {
            return Err(StatsError::DegenerateInput(
                "target variance underflows; R² is undefined".to_string(),
            ));
        }

        let x_means = x.row_mean();
        let mut x_centred = x.clone();
        for (mut column, mean) in x_centred.column_iter_mut().zip(x_means.iter()) {
            column.add_scalar_mut(-mean);
        }

        let coefficients = solve_least_squares(&x_centred, &y_centred).ok_or_else(|| {
            StatsError::DegenerateInput(
                "feature matrix is rank deficient (constant or collinear feature columns)".to_string(),
            )
        })?;
        let intercept = y_mean - x_means.transpose().dot(&coefficients);
        let prediction = apply(x, &coefficients, intercept);

        let ss_res = (y - &prediction).norm_squared();
        let r_squared = (1.0 - ss_res / ss_tot).max(0.0);

        debug!(
            n_observations = n,
            n_features = p,
            intercept,
            r_squared,
            "fitted OLS model"
        );

        Ok(Self {
            x,
            y,
            coefficients,
            intercept,
            prediction,
            r_squared,
        })
    }

    /// Apply the fitted coefficients to new rows.
    pub fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(StatsError::Dimension(format!(
                "model has {} features but input has {} columns",
                self.coefficients.len(),
                x.ncols()
            )));
        }
        Ok(apply(x, &self.coefficients, self.intercept))
    }

    pub fn x(&self) -> &'a DMatrix<f64> {
        self.x
    }

    pub fn y(&self) -> &'a DVector<f64> {
        self.y
    }

    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Fitted values on the training rows.
    pub fn prediction(&self) -> &DVector<f64> {
        &self.prediction
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub fn residuals(&self) -> DVector<f64> {
        self.y - &self.prediction
    }

    pub fn summary(&self, features: &[String], target: &str) -> FitSummary {
        FitSummary {
            features: features.to_vec(),
            target: target.to_string(),
            n_observations: self.y.len(),
            coefficients: self.coefficients.iter().copied().collect(),
            intercept: self.intercept,
            r_squared: self.r_squared,
        }
    }
}

/// Free-function form of [`RegressionModel::predict`].
pub fn predict(model: &RegressionModel<'_>, x: &DMatrix<f64>) -> Result<DVector<f64>> {
    model.predict(x)
}

fn is_constant<'v>(mut values: impl Iterator<Item = &'v f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

fn apply(x: &DMatrix<f64>, coefficients: &DVector<f64>, intercept: f64) -> DVector<f64> {
    (x * coefficients).add_scalar(intercept)
}
