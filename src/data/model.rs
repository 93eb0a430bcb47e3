use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the roster table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the common dataframe dtypes.
/// Used as a `BTreeSet` key by the filter layer and a `HashMap` key by the
/// aggregator; equality, ordering and hashing all follow [`Ord`].
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table. Column order follows the source file; every row holds
/// exactly one cell per column.
///
/// Columns whose cells are all [`CellValue::Null`] are removed by
/// [`Dataset::from_rows`], so every column that survives has at least one
/// real value.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    dropped_columns: Vec<String>,
}

impl Dataset {
    /// Build a dataset, padding short rows with nulls and dropping all-null columns.
    pub fn from_rows(columns: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        for row in &mut rows {
            row.resize(columns.len(), CellValue::Null);
        }

        let keep: Vec<bool> = (0..columns.len())
            .map(|c| rows.iter().any(|row| !row[c].is_null()))
            .collect();

        if keep.iter().all(|k| *k) {
            return Dataset {
                columns,
                rows,
                dropped_columns: Vec::new(),
            };
        }

        let mut kept_columns = Vec::with_capacity(columns.len());
        let mut dropped_columns = Vec::new();
        for (name, &k) in columns.into_iter().zip(&keep) {
            if k {
                kept_columns.push(name);
            } else {
                dropped_columns.push(name);
            }
        }

        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&keep)
                    .filter_map(|(cell, &k)| k.then_some(cell))
                    .collect()
            })
            .collect();

        Dataset {
            columns: kept_columns,
            rows,
            dropped_columns,
        }
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Columns removed at construction because they held no values.
    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped_columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Distinct non-null values of `column`, in order of first appearance.
    pub fn unique_values(&self, column: &str) -> Vec<CellValue> {
        let Some(col) = self.column_index(column) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| &row[col])
            .filter(|v| !v.is_null() && seen.insert(*v))
            .cloned()
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
impl Dataset {
    /// Cell at `(row, column)`; `None` if either is out of range.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::from(v)
    }

    #[test]
    fn all_null_column_is_dropped() {
        let ds = Dataset::from_rows(
            vec!["name".into(), "spouse".into(), "race".into()],
            vec![
                vec![s("Frodo"), CellValue::Null, s("Hobbit")],
                vec![s("Legolas"), CellValue::Null, s("Elf")],
            ],
        );
        assert_eq!(ds.columns(), ["name", "race"]);
        assert_eq!(ds.dropped_columns(), ["spouse"]);
        assert!(!ds.has_column("spouse"));
        assert_eq!(ds.value(1, "race"), Some(&s("Elf")));
        assert_eq!(ds.row(0).map(<[CellValue]>::len), Some(2));
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = Dataset::from_rows(
            vec!["name".into(), "race".into()],
            vec![vec![s("Frodo")], vec![s("Gimli"), s("Dwarf")]],
        );
        assert_eq!(ds.value(0, "race"), Some(&CellValue::Null));
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn zero_rows_drop_every_column() {
        let ds = Dataset::from_rows(vec!["name".into(), "race".into()], Vec::new());
        assert!(ds.columns().is_empty());
        assert!(ds.is_empty());
    }

    #[test]
    fn unique_values_keep_first_appearance_and_skip_nulls() {
        let ds = Dataset::from_rows(
            vec!["race".into()],
            vec![
                vec![s("Hobbit")],
                vec![CellValue::Null],
                vec![s("Elf")],
                vec![s("Hobbit")],
            ],
        );
        assert_eq!(ds.unique_values("race"), vec![s("Hobbit"), s("Elf")]);
        assert!(ds.unique_values("realm").is_empty());
    }

    #[test]
    fn float_equality_agrees_with_ordering_and_hashing() {
        use std::collections::HashSet;

        let nan = CellValue::Float(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_ne!(CellValue::Float(0.0), CellValue::Float(-0.0));

        let set: HashSet<CellValue> = [nan.clone(), nan, CellValue::Float(1.0)].into();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn mixed_variants_have_a_total_order() {
        let mut values = vec![s("a"), CellValue::Float(1.5), CellValue::Null, CellValue::Integer(3)];
        values.sort();
        assert_eq!(
            values,
            vec![CellValue::Null, CellValue::Integer(3), CellValue::Float(1.5), s("a")]
        );
    }
}
