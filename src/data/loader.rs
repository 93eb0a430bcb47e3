use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::error::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};

/// Tokens read as missing values in delimited files, besides the empty string.
/// Any text that parses to a NaN float is missing too.
pub const NULL_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "#NA", "#N/A", "#N/A N/A", "<NA>", "NaN", "nan", "-NaN", "-nan",
    "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN", "null", "NULL", "None",
];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed parquet: {0}")]
    Parquet(#[from] ParquetError),
    #[error("unreadable column data: {0}")]
    Arrow(#[from] ArrowError),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("{0}")]
    Malformed(String),
    #[error("no columns to parse from file")]
    NoColumns,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a roster from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`            – comma separated, header row
/// * `.tsv` / `.tab`   – tab separated, header row
/// * `.json`           – `[{ "name": ..., "race": ... }, ...]`
/// * `.parquet` / `.pq`
///
/// Columns that hold no values at all are removed before returning.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match ext.as_str() {
        "csv" => load_delimited(open()?, b','),
        "tsv" | "tab" => load_delimited(open()?, b'\t'),
        "json" => {
            let mut text = String::new();
            open()?
                .read_to_string(&mut text)
                .map_err(|source| LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            load_json_str(&text)
        }
        "parquet" | "pq" => load_parquet(open()?),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row from any reader.
///
/// Rows shorter than the header are padded with nulls; longer rows are an error.
pub fn load_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(LoadError::NoColumns);
    }
    let headers = dedupe_headers(headers);

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(LoadError::Malformed(format!(
                "row {}: expected {} fields, saw {}",
                row_no + 1,
                headers.len(),
                record.len()
            )));
        }
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Dataset::from_rows(headers, rows))
}

/// Rename repeated header names to `name.1`, `name.2`, … keeping the first as-is
/// and skipping suffixes that are already taken.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|h| {
            let name = if used.contains(&h) {
                let n = next_suffix.entry(h.clone()).or_insert(1);
                loop {
                    let candidate = format!("{h}.{n}");
                    *n += 1;
                    if !used.contains(&candidate) {
                        break candidate;
                    }
                }
            } else {
                h
            };
            used.insert(name.clone());
            name
        })
        .collect()
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() || NULL_TOKENS.contains(&s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return if f.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(f)
        };
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "name": "Frodo Baggins", "race": "Hobbit", "gender": "Male" },
///   ...
/// ]
/// ```
///
/// Column order is the order in which keys are first seen; a key missing
/// from a record reads as null.
pub fn load_json_str(text: &str) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<CellValue>> = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;

        let mut row = vec![CellValue::Null; columns.len()];
        for (key, val) in obj {
            let col = *index.entry(key.clone()).or_insert_with(|| {
                columns.push(key.clone());
                columns.len() - 1
            });
            if col >= row.len() {
                row.resize(col + 1, CellValue::Null);
            }
            row[col] = json_to_cell(val);
        }
        rows.push(row);
    }

    if columns.is_empty() && !rows.is_empty() {
        return Err(LoadError::NoColumns);
    }

    Ok(Dataset::from_rows(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if s.is_empty() => CellValue::Null,
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet roster. Integer, float and boolean columns keep their
/// type; everything else is rendered to text through Arrow's cast kernel.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(file: File) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let first_row = rows.len();
        rows.extend((0..batch.num_rows()).map(|_| Vec::with_capacity(columns.len())));

        for col in batch.columns() {
            for (offset, cell) in arrow_column_cells(col)?.into_iter().enumerate() {
                rows[first_row + offset].push(cell);
            }
        }
    }

    Ok(Dataset::from_rows(columns, rows))
}

// -- Arrow helpers --

/// Convert one Arrow column into cells.
fn arrow_column_cells(col: &ArrayRef) -> Result<Vec<CellValue>, ArrowError> {
    let cells = match col.data_type() {
        DataType::Boolean => col
            .as_boolean()
            .iter()
            .map(|v| v.map_or(CellValue::Null, CellValue::Bool))
            .collect(),
        dt if dt.is_integer() => {
            let ints = cast(col, &DataType::Int64)?;
            ints.as_primitive::<Int64Type>()
                .iter()
                .map(|v| v.map_or(CellValue::Null, CellValue::Integer))
                .collect()
        }
        dt if dt.is_floating() => {
            let floats = cast(col, &DataType::Float64)?;
            floats
                .as_primitive::<Float64Type>()
                .iter()
                .map(|v| match v {
                    Some(f) if !f.is_nan() => CellValue::Float(f),
                    _ => CellValue::Null,
                })
                .collect()
        }
        _ => {
            let text = cast(col, &DataType::Utf8)?;
            text.as_string::<i32>()
                .iter()
                .map(|v| match v {
                    Some(s) if !s.is_empty() => CellValue::String(s.to_string()),
                    _ => CellValue::Null,
                })
                .collect()
        }
    };
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::from(v)
    }

    #[test]
    fn csv_with_empty_column_drops_it() {
        let text = "name,race,spouse,height\n\
                    Frodo Baggins,Hobbit,,1.06\n\
                    Arwen,Elf,NaN,\n";
        let ds = load_delimited(text.as_bytes(), b',').unwrap();
        assert_eq!(ds.columns(), ["name", "race", "height"]);
        assert_eq!(ds.dropped_columns(), ["spouse"]);
        assert_eq!(ds.value(0, "height"), Some(&CellValue::Float(1.06)));
        assert_eq!(ds.value(1, "height"), Some(&CellValue::Null));
        assert_eq!(ds.value(1, "race"), Some(&s("Elf")));
    }

    #[test]
    fn null_tokens_read_as_missing() {
        let text = "race\nNA\nN/A\nnull\nNone\n<NA>\nHobbit\n";
        let ds = load_delimited(text.as_bytes(), b',').unwrap();
        assert_eq!(ds.unique_values("race"), vec![s("Hobbit")]);
        assert_eq!(ds.len(), 6);
    }

    #[test]
    fn nan_spellings_read_as_missing() {
        let text = "hair\n-nan\nNAN\n+nan\n#NA\n1.#QNAN\n#N/A N/A\nDark\n";
        let ds = load_delimited(text.as_bytes(), b',').unwrap();
        assert_eq!(ds.unique_values("hair"), vec![s("Dark")]);
        for row in 0..6 {
            assert_eq!(ds.value(row, "hair"), Some(&CellValue::Null));
        }
    }

    #[test]
    fn tab_delimited() {
        let text = "name\trace\nGimli\tDwarf\n";
        let ds = load_delimited(text.as_bytes(), b'\t').unwrap();
        assert_eq!(ds.value(0, "race"), Some(&s("Dwarf")));
    }

    #[test]
    fn duplicate_headers_are_renamed() {
        let text = "name,race,race\nGimli,Dwarf,Dwarves\n";
        let ds = load_delimited(text.as_bytes(), b',').unwrap();
        assert_eq!(ds.columns(), ["name", "race", "race.1"]);

        let text = "race,race,race.1\nDwarf,Dwarves,Khazad\n";
        let ds = load_delimited(text.as_bytes(), b',').unwrap();
        assert_eq!(ds.columns(), ["race", "race.1", "race.1.1"]);
        assert_eq!(ds.value(0, "race.1"), Some(&s("Dwarves")));
        assert_eq!(ds.value(0, "race.1.1"), Some(&s("Khazad")));
    }

    #[test]
    fn short_row_padded_long_row_rejected() {
        let ok = "name,race\nGimli\n";
        let ds = load_delimited(ok.as_bytes(), b',').unwrap();
        assert_eq!(ds.columns(), ["name"]);

        let bad = "name,race\nGimli,Dwarf,Erebor\n";
        let err = load_delimited(bad.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn empty_input_has_no_columns() {
        let err = load_delimited("".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, LoadError::NoColumns));
    }

    #[test]
    fn json_records() {
        let text = r#"[
            {"name": "Frodo", "race": "Hobbit", "height": 1.06, "hair": null},
            {"name": "Legolas", "race": "Elf", "realm": "Mirkwood", "hair": ""}
        ]"#;
        let ds = load_json_str(text).unwrap();
        assert_eq!(ds.columns(), ["name", "race", "height", "realm"]);
        assert!(!ds.has_column("hair"));
        assert_eq!(ds.value(0, "realm"), Some(&CellValue::Null));
        assert_eq!(ds.value(1, "realm"), Some(&s("Mirkwood")));
        assert_eq!(ds.value(0, "height"), Some(&CellValue::Float(1.06)));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(matches!(
            load_json_str(r#"{"name": "Frodo"}"#),
            Err(LoadError::Malformed(_))
        ));
        assert!(matches!(load_json_str("[1, 2]"), Err(LoadError::Malformed(_))));
        assert!(matches!(load_json_str("[{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn missing_file_and_unknown_extension() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));

        let err = load_file(Path::new("roster.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn arrow_columns_convert_to_cells() {
        use arrow::array::{Int32Array, StringArray};
        use std::sync::Arc;

        let ints: ArrayRef = Arc::new(Int32Array::from(vec![Some(7), None]));
        assert_eq!(
            arrow_column_cells(&ints).unwrap(),
            vec![CellValue::Integer(7), CellValue::Null]
        );

        let text: ArrayRef = Arc::new(StringArray::from(vec![Some("Elf"), Some(""), None]));
        assert_eq!(
            arrow_column_cells(&text).unwrap(),
            vec![s("Elf"), CellValue::Null, CellValue::Null]
        );
    }
}
