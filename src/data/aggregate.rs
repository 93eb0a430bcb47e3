use std::collections::HashMap;

use super::filter::FilteredDataset;
use super::model::CellValue;
use crate::config::ChartSpec;

/// How often a value occurs in one column of a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCount {
    pub value: CellValue,
    pub count: usize,
}

/// Frequency counts of the non-null values of `column`, ascending by count.
///
/// Equal counts keep the order in which the values first appear in the view.
/// A column the dataset lacks yields an empty sequence.
pub fn counts_for(filtered: &FilteredDataset, column: &str) -> Vec<ValueCount> {
    let Some(col) = filtered.dataset().column_index(column) else {
        return Vec::new();
    };

    let mut slots: HashMap<&CellValue, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for row in filtered.rows() {
        let value = &row[col];
        if value.is_null() {
            continue;
        }
        let slot = *slots.entry(value).or_insert_with(|| {
            counts.push(ValueCount {
                value: value.clone(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[slot].count += 1;
    }

    // Stable: ties stay in first-appearance order.
    counts.sort_by_key(|vc| vc.count);
    counts
}

/// One chart worth of data.
#[derive(Debug, Clone)]
pub struct Distribution {
    pub spec: ChartSpec,
    pub counts: Vec<ValueCount>,
}

/// What the statistics section of the dashboard should show.
#[derive(Debug, Clone)]
pub enum Distributions {
    /// The filtered view has no rows.
    NoResults,
    /// One entry per chart whose column exists, in chart order.
    Charts(Vec<Distribution>),
}

/// Aggregate every chart column present in the view.
pub fn distributions(filtered: &FilteredDataset, charts: &[ChartSpec]) -> Distributions {
    if filtered.is_empty() {
        return Distributions::NoResults;
    }
    Distributions::Charts(
        charts
            .iter()
            .filter(|spec| filtered.dataset().has_column(spec.column))
            .map(|spec| Distribution {
                spec: spec.clone(),
                counts: counts_for(filtered, spec.column),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::CHART_SECTIONS;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::Dataset;

    fn s(v: &str) -> CellValue {
        CellValue::from(v)
    }

    fn vc(v: &str, count: usize) -> ValueCount {
        ValueCount {
            value: s(v),
            count,
        }
    }

    fn three_characters() -> Arc<Dataset> {
        Arc::new(Dataset::from_rows(
            vec!["race".into(), "gender".into()],
            vec![
                vec![s("Hobbit"), s("M")],
                vec![s("Hobbit"), s("F")],
                vec![s("Elf"), s("F")],
            ],
        ))
    }

    #[test]
    fn hobbit_filter_gender_counts() {
        let ds = three_characters();
        let mut sel = FilterSelection::default();
        sel.restrict("race", [s("Hobbit")]);
        let filtered = apply(&ds, &sel);
        assert_eq!(filtered.len(), 2);
        assert_eq!(counts_for(&filtered, "gender"), vec![vc("M", 1), vc("F", 1)]);
    }

    #[test]
    fn sorted_ascending_and_sum_matches_non_null_rows() {
        let ds = Arc::new(Dataset::from_rows(
            vec!["hair".into()],
            vec![
                vec![s("Dark")],
                vec![s("Blond")],
                vec![s("Dark")],
                vec![CellValue::Null],
                vec![s("Grey")],
                vec![s("Dark")],
                vec![s("Grey")],
            ],
        ));
        let filtered = apply(&ds, &FilterSelection::default());
        let counts = counts_for(&filtered, "hair");

        assert_eq!(counts, vec![vc("Blond", 1), vc("Grey", 2), vc("Dark", 3)]);
        assert!(counts.windows(2).all(|w| w[0].count <= w[1].count));
        let non_null = filtered.rows().filter(|r| !r[0].is_null()).count();
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), non_null);
    }

    #[test]
    fn nan_spellings_are_not_counted() {
        let csv = "hair\n-nan\nDark\nNAN\n#NA\n";
        let ds = Arc::new(crate::data::loader::load_delimited(csv.as_bytes(), b',').unwrap());
        let filtered = apply(&ds, &FilterSelection::default());
        assert_eq!(counts_for(&filtered, "hair"), vec![vc("Dark", 1)]);
    }

    #[test]
    fn identical_float_cells_share_a_slot() {
        let ds = Arc::new(Dataset::from_rows(
            vec!["height".into()],
            vec![
                vec![CellValue::Float(1.06)],
                vec![CellValue::Float(1.98)],
                vec![CellValue::Float(1.06)],
            ],
        ));
        let filtered = apply(&ds, &FilterSelection::default());
        let counts = counts_for(&filtered, "height");
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[1].value, CellValue::Float(1.06));
        assert_eq!(counts[1].count, 2);
    }

    #[test]
    fn absent_column_has_no_counts() {
        let ds = three_characters();
        let filtered = apply(&ds, &FilterSelection::default());
        assert!(counts_for(&filtered, "realm").is_empty());
    }

    #[test]
    fn distributions_follow_chart_order_and_skip_missing_columns() {
        let ds = three_characters();
        let filtered = apply(&ds, &FilterSelection::default());
        let Distributions::Charts(charts) = distributions(&filtered, CHART_SECTIONS) else {
            panic!("expected charts");
        };
        let columns: Vec<&str> = charts.iter().map(|d| d.spec.column).collect();
        assert_eq!(columns, ["gender", "race"]);
        assert_eq!(charts[1].counts, vec![vc("Elf", 1), vc("Hobbit", 2)]);
    }

    #[test]
    fn empty_view_reports_no_results() {
        let ds = three_characters();
        let mut sel = FilterSelection::default();
        sel.restrict("race", [s("Orc")]);
        let filtered = apply(&ds, &sel);
        assert!(matches!(
            distributions(&filtered, CHART_SECTIONS),
            Distributions::NoResults
        ));
    }
}
