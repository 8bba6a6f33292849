//! Year-over-year change columns.
//!
//! One table row is one year, so the year-over-year change of a column is the
//! first difference of that column:
//!
//! ```text
//! change[0] = Empty
//! change[i] = value[i] - value[i-1]
//! ```

use tracing::{debug, warn};

use crate::domain::{Cell, Column, Table};
use crate::error::Result;

/// Marker appended to a source column name to form the default derived name.
pub const YOY_SUFFIX: &str = "változása";

/// One column name or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    One(String),
    Many(Vec<String>),
}

impl Targets {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Targets::One(name) => vec![name.as_str()],
            Targets::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for Targets {
    fn from(value: &str) -> Self {
        Targets::One(value.to_string())
    }
}

impl From<String> for Targets {
    fn from(value: String) -> Self {
        Targets::One(value)
    }
}

impl From<Vec<String>> for Targets {
    fn from(value: Vec<String>) -> Self {
        Targets::Many(value)
    }
}

impl From<&[&str]> for Targets {
    fn from(value: &[&str]) -> Self {
        Targets::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Targets {
    fn from(value: [&str; N]) -> Self {
        Targets::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Default name of the change column for `source`.
pub fn default_yoy_name(source: &str) -> String {
    format!("{source} {YOY_SUFFIX}")
}

/// Append one year-over-year change column per target.
///
/// Explicit names are used when `targets` and `results` have the same shape: both
/// single names, or two lists of equal length. Any other combination falls back
/// to [`default_yoy_name`] for every derived column.
///
/// Columns are derived one after another, so a target may name a column written
/// earlier in the same call (including one just overwritten). The work happens
/// on a copy that replaces `table` only when every target succeeds. A derived
/// name that already exists replaces that column in place.
///
/// Returns the derived column names in target order.
pub fn add_year_on_year(table: &mut Table, targets: &Targets, results: Option<&Targets>) -> Result<Vec<String>> {
    let names = resolve_names(targets, results);
    let mut work = table.clone();

    for (source, name) in targets.names().into_iter().zip(&names) {
        let mut column = first_difference(work.column(source)?);
        column.name = name.clone();
        debug!(source, column = %column.name, "adding year-over-year column");
        work.upsert_column(column)?;
    }

    *table = work;
    Ok(names)
}

fn resolve_names(targets: &Targets, results: Option<&Targets>) -> Vec<String> {
    match (targets, results) {
        (Targets::One(_), Some(Targets::One(name))) => vec![name.clone()],
        (Targets::Many(sources), Some(Targets::Many(names))) if sources.len() == names.len() => names.clone(),
        (_, results) => {
            if results.is_some() {
                warn!(
                    targets = ?targets.names(),
                    results = ?results.map(Targets::names),
                    "result names do not match targets; using default names"
                );
            }
            targets.names().into_iter().map(default_yoy_name).collect()
        }
    }
}

/// First difference of a column; non-numeric operands give `Empty`.
fn first_difference(source: &Column) -> Column {
    let values = source.numeric();
    let mut out = Vec::with_capacity(values.len());
    for (i, current) in values.iter().enumerate() {
        let cell = match (i.checked_sub(1).and_then(|p| values[p]), current) {
            (Some(prev), Some(cur)) => Cell::Number(cur - prev),
            _ => Cell::Empty,
        };
        out.push(cell);
    }
    Column::new(default_yoy_name(&source.name), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;

    fn table() -> Table {
        let num = |vals: &[f64]| vals.iter().map(|v| Cell::Number(*v)).collect::<Vec<_>>();
        Table::from_columns(vec![
            Column::new("A", num(&[10.0, 13.0, 11.0, 20.0])),
            Column::new("B", num(&[1.0, 1.0, 2.0, 4.0])),
            Column::new(
                "C",
                vec![
                    Cell::Number(5.0),
                    Cell::Empty,
                    Cell::Number(7.0),
                    Cell::Number(8.0),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn derived_values_are_first_differences() {
        let mut t = table();
        let names = add_year_on_year(&mut t, &Targets::from("A"), None).unwrap();
        assert_eq!(names, vec!["A változása"]);

        let source = t.column("A").unwrap().numeric();
        let derived = t.column("A változása").unwrap();
        assert_eq!(derived.values[0], Cell::Empty);
        for i in 1..t.row_count() {
            let expected = source[i].unwrap() - source[i - 1].unwrap();
            assert_eq!(derived.values[i], Cell::Number(expected));
        }
    }

    #[test]
    fn derived_columns_are_appended_in_order() {
        let mut t = table();
        add_year_on_year(&mut t, &Targets::from(["B", "A"]), None).unwrap();
        let names: Vec<&str> = t.column_names().collect();
        assert_eq!(names, vec!["A", "B", "C", "B változása", "A változása"]);
    }

    #[test]
    fn explicit_names_when_lists_match() {
        let mut t = table();
        let names = add_year_on_year(
            &mut t,
            &Targets::from(["A", "B"]),
            Some(&Targets::from(["dA", "dB"])),
        )
        .unwrap();
        assert_eq!(names, vec!["dA", "dB"]);
        assert!(t.has_column("dA") && t.has_column("dB"));

        let single = add_year_on_year(&mut t, &Targets::from("C"), Some(&Targets::from("dC"))).unwrap();
        assert_eq!(single, vec!["dC"]);
    }

    #[test]
    fn mismatched_names_fall_back_to_defaults() {
        let mut t = table();
        let names = add_year_on_year(&mut t, &Targets::from(["A", "B"]), Some(&Targets::from(["X"]))).unwrap();
        assert_eq!(names, vec!["A változása", "B változása"]);
        assert!(!t.has_column("X"));

        let mut t = table();
        let names = add_year_on_year(&mut t, &Targets::from(["A"]), Some(&Targets::from("X"))).unwrap();
        assert_eq!(names, vec!["A változása"]);
    }

    #[test]
    fn gaps_propagate_as_empty() {
        let mut t = table();
        add_year_on_year(&mut t, &Targets::from("C"), None).unwrap();
        let derived = &t.column("C változása").unwrap().values;
        assert_eq!(
            derived,
            &vec![Cell::Empty, Cell::Empty, Cell::Empty, Cell::Number(1.0)]
        );
    }

    #[test]
    fn missing_target_leaves_table_untouched() {
        let mut t = table();
        let before = t.clone();
        let err = add_year_on_year(&mut t, &Targets::from(["A", "Nope"]), None).unwrap_err();
        assert_eq!(err, StatsError::ColumnNotFound("Nope".to_string()));
        assert_eq!(t, before);
    }

    #[test]
    fn later_targets_see_earlier_results() {
        let mut t = table();
        add_year_on_year(&mut t, &Targets::from(["A", "B"]), Some(&Targets::from(["B", "X"]))).unwrap();

        // B now holds the change of A; X is the change of that new B.
        let b = t.column("B").unwrap().values.clone();
        assert_eq!(b, vec![Cell::Empty, Cell::Number(3.0), Cell::Number(-2.0), Cell::Number(9.0)]);
        let x = &t.column("X").unwrap().values;
        assert_eq!(x, &vec![Cell::Empty, Cell::Empty, Cell::Number(-5.0), Cell::Number(11.0)]);
    }

    #[test]
    fn rerun_replaces_existing_column() {
        let mut t = table();
        add_year_on_year(&mut t, &Targets::from("A"), None).unwrap();
        add_year_on_year(&mut t, &Targets::from("A"), None).unwrap();
        assert_eq!(t.columns().len(), 4);
    }

    #[test]
    fn empty_table_gets_empty_column() {
        let mut t = Table::from_rows(vec!["A".to_string()], Vec::new());
        add_year_on_year(&mut t, &Targets::from("A"), None).unwrap();
        assert!(t.column("A változása").unwrap().is_empty());
    }
}
