use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Filter predicate: which values are allowed per column
// ---------------------------------------------------------------------------

/// Constraint on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnFilter {
    /// No values picked: every row passes.
    #[default]
    Unconstrained,
    /// Only rows whose value is one of these pass. Never empty when built
    /// through [`ColumnFilter::restricted_to`].
    RestrictedTo(BTreeSet<CellValue>),
}

impl ColumnFilter {
    /// Restrict to `values`; an empty set yields [`ColumnFilter::Unconstrained`].
    pub fn restricted_to(values: impl IntoIterator<Item = CellValue>) -> Self {
        let set: BTreeSet<CellValue> = values.into_iter().collect();
        if set.is_empty() {
            ColumnFilter::Unconstrained
        } else {
            ColumnFilter::RestrictedTo(set)
        }
    }

    /// Whether a cell passes this constraint. Nulls never match a restriction.
    pub fn allows(&self, value: &CellValue) -> bool {
        match self {
            ColumnFilter::Unconstrained => true,
            ColumnFilter::RestrictedTo(set) => set.is_empty() || set.contains(value),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        match self {
            ColumnFilter::Unconstrained => true,
            ColumnFilter::RestrictedTo(set) => set.is_empty(),
        }
    }

    /// Selected values, empty when unconstrained.
    pub fn selected(&self) -> impl Iterator<Item = &CellValue> {
        match self {
            ColumnFilter::Unconstrained => None,
            ColumnFilter::RestrictedTo(set) => Some(set.iter()),
        }
        .into_iter()
        .flatten()
    }
}

/// Per-column selection state: maps column_name → [`ColumnFilter`].
/// A column that is absent from the map is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    filters: BTreeMap<String, ColumnFilter>,
}

impl FilterSelection {
    /// Replace the constraint on `column` with the given allowed values.
    pub fn restrict(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = CellValue>,
    ) -> &mut Self {
        match ColumnFilter::restricted_to(values) {
            ColumnFilter::Unconstrained => {
                self.filters.remove(column);
            }
            filter => {
                self.filters.insert(column.to_string(), filter);
            }
        }
        self
    }

    /// Add `value` to the column's allowed set, or remove it if present.
    pub fn toggle(&mut self, column: &str, value: &CellValue) {
        let mut selected: BTreeSet<CellValue> = self.get(column).selected().cloned().collect();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.restrict(column, selected);
    }

    /// Drop the constraint on one column.
    pub fn clear(&mut self, column: &str) {
        self.filters.remove(column);
    }

    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    /// Constraint on `column`; unconstrained if none was set.
    pub fn get(&self, column: &str) -> &ColumnFilter {
        const UNCONSTRAINED: &ColumnFilter = &ColumnFilter::Unconstrained;
        self.filters.get(column).unwrap_or(UNCONSTRAINED)
    }

    pub fn is_selected(&self, column: &str, value: &CellValue) -> bool {
        matches!(self.get(column), ColumnFilter::RestrictedTo(set) if set.contains(value))
    }

    /// Whether no column carries a constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.filters.values().all(ColumnFilter::is_unconstrained)
    }

    /// Columns carrying an actual constraint, with their filter.
    pub fn active_columns(&self) -> impl Iterator<Item = (&str, &ColumnFilter)> {
        self.filters
            .iter()
            .filter(|(_, f)| !f.is_unconstrained())
            .map(|(c, f)| (c.as_str(), f))
    }
}

// ---------------------------------------------------------------------------
// FilteredDataset – rows surviving a selection
// ---------------------------------------------------------------------------

/// A view over a shared [`Dataset`]: the indices of the rows that passed.
#[derive(Debug, Clone)]
pub struct FilteredDataset {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
}

impl FilteredDataset {
    /// A view containing every row.
    pub fn all(dataset: Arc<Dataset>) -> Self {
        let indices = (0..dataset.len()).collect();
        Self { dataset, indices }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Indices into [`FilteredDataset::dataset`] of the retained rows, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.indices.iter().filter_map(|&i| self.dataset.row(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Apply `selection` on top of this view.
    pub fn refine(&self, selection: &FilterSelection) -> Self {
        // Constraints on columns the dataset lacks are ignored.
        let constraints: Vec<(usize, &ColumnFilter)> = selection
            .active_columns()
            .filter_map(|(col, filter)| Some((self.dataset.column_index(col)?, filter)))
            .collect();

        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| {
                let Some(row) = self.dataset.row(i) else {
                    return false;
                };
                constraints
                    .iter()
                    .all(|(col, filter)| filter.allows(&row[*col]))
            })
            .collect();

        Self {
            dataset: Arc::clone(&self.dataset),
            indices,
        }
    }
}

/// Return the rows of `dataset` that pass every active filter.
///
/// A row passes a column filter when:
/// * The column is unconstrained (absent from `selection` or nothing picked) → passes
/// * The dataset has no such column → passes
/// * The row's value for that column is one of the picked values → passes
pub fn apply(dataset: &Arc<Dataset>, selection: &FilterSelection) -> FilteredDataset {
    FilteredDataset::all(Arc::clone(dataset)).refine(selection)
}
