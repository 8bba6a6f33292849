//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the loading/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{Column, Table};
use crate::fit::{FitSummary, RegressionModel};

/// Dataset overview: row count plus each column with its numeric coverage.
pub fn format_columns(table: &Table) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Rows: {} | Columns: {}\n\n",
        table.row_count(),
        table.columns().len()
    ));
    out.push_str(&format!("{:<40} {:>8}\n", "column", "numeric"));
    out.push_str(&format!("{:-<40} {:-<8}\n", "", ""));
    for column in table.columns() {
        let numeric = column.numeric().iter().filter(|v| v.is_some()).count();
        out.push_str(&format!(
            "{:<40} {:>8}\n",
            truncate(&column.name, 40),
            format!("{numeric}/{}", column.len())
        ));
    }
    out
}

/// Fit summary: parameters, goodness of fit, and per-row fitted values.
pub fn format_fit(summary: &FitSummary, model: &RegressionModel<'_>) -> String {
    let mut out = String::new();

    out.push_str("=== hs - Linear regression ===\n");
    out.push_str(&format!("Target: {}\n", summary.target));
    out.push_str(&format!("Observations: {}\n\n", summary.n_observations));

    out.push_str("Coefficients:\n");
    for (name, coef) in summary.features.iter().zip(&summary.coefficients) {
        out.push_str(&format!("- {:<36} {}\n", truncate(name, 36), fmt_num(*coef)));
    }
    out.push_str(&format!("Intercept: {}\n", fmt_num(summary.intercept)));
    out.push_str(&format!("R-squared: {:.2}\n\n", summary.r_squared));

    out.push_str(&format!("{:>6} {:>14} {:>14} {:>14}\n", "row", "y_obs", "y_fit", "residual"));
    out.push_str(&format!("{:->6} {:->14} {:->14} {:->14}\n", "", "", "", ""));
    let residuals = model.residuals();
    for (i, (y_obs, y_fit)) in model.y().iter().zip(model.prediction().iter()).enumerate() {
        out.push_str(&format!(
            "{:>6} {:>14} {:>14} {:>14}\n",
            i,
            fmt_num(*y_obs),
            fmt_num(*y_fit),
            fmt_num(residuals[i])
        ));
    }
    out
}

/// Time series table for the selected x/y axes.
pub fn format_series(x: &Column, y: &Column) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:>16}\n", truncate(&x.name, 12), truncate(&y.name, 16)));
    out.push_str(&format!("{:-<12} {:->16}\n", "", ""));
    for (label, value) in x.values.iter().zip(&y.values) {
        let value = value.as_f64().map(fmt_num).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{:<12} {:>16}\n", truncate(&label.to_string(), 12), value));
    }
    out
}

/// Thousands-grouped number, two decimals unless the value is integral.
fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let rounded = (v * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();
    let int = abs.trunc() as u64;
    let frac = ((abs - abs.trunc()) * 100.0).round() as u64;

    let digits = int.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac:02}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use nalgebra::{DMatrix, DVector};

    use super::*;
    use crate::domain::Cell;
    use crate::fit::fit;

    #[test]
    fn fmt_num_groups_thousands() {
        assert_eq!(fmt_num(4_439_000.0), "4,439,000");
        assert_eq!(fmt_num(-2_000.5), "-2,000.50");
        assert_eq!(fmt_num(0.123), "0.12");
        assert_eq!(fmt_num(999.0), "999");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Lakásállomány", 5), "Laká.");
        assert_eq!(truncate("Év", 5), "Év");
    }

    #[test]
    fn fit_report_lists_parameters() {
        let x = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        let y = DVector::from_row_slice(&[2.0, 4.0, 6.0]);
        let model = fit(&x, &y).unwrap();
        let summary = model.summary(&["Lakáspiaci tranzakció".to_string()], "Folyósított lakáshitel, db");

        let text = format_fit(&summary, &model);
        assert!(text.contains("Target: Folyósított lakáshitel, db"));
        assert!(text.contains("R-squared: 1.00"));
        assert!(text.contains("Lakáspiaci tranzakció"));
    }

    #[test]
    fn series_shows_missing_as_dash() {
        let x = Column::new("Év", vec![Cell::Number(2020.0), Cell::Number(2021.0)]);
        let y = Column::new("Épített lakás változása", vec![Cell::Empty, Cell::Number(1500.0)]);
        let text = format_series(&x, &y);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].starts_with("2020") && lines[2].ends_with('-'));
        assert!(lines[3].ends_with("1,500"));
    }
}
