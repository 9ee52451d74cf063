use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Column, Dataset};
use crate::error::DatasetLoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one record per line (the bundled dataset)
/// * `.json`    – `[{ "col": value, ... }, ...]`, i.e. `orient='records'`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_file(path: &Path) -> Result<Dataset, DatasetLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetLoadError::UnsupportedFormat(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, DatasetLoadError> {
    File::open(path).map_err(|source| DatasetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn malformed(path: &Path, reason: impl Into<String>) -> DatasetLoadError {
    DatasetLoadError::Malformed {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Pair names with their cell vectors and validate the table shape.
fn assemble(
    path: &Path,
    names: Vec<String>,
    cells: Vec<Vec<CellValue>>,
) -> Result<Dataset, DatasetLoadError> {
    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    Dataset::from_columns(columns)
        .ok_or_else(|| malformed(path, "columns differ in length or repeat a name"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one row per record.
/// Each cell is typed on its own; the column kind is derived afterwards.
fn load_csv(path: &Path) -> Result<Dataset, DatasetLoadError> {
    let csv_err = |source: csv::Error| match source.kind() {
        csv::ErrorKind::UnequalLengths { pos, expected_len, len } => malformed(
            path,
            format!(
                "row {} has {len} fields, expected {expected_len}",
                pos.as_ref().map_or(0, |p| p.record())
            ),
        ),
        _ => DatasetLoadError::Csv {
            path: path.to_path_buf(),
            source,
        },
    };

    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().any(String::is_empty) {
        return Err(malformed(path, "missing or blank column header"));
    }

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        for (col, value) in cells.iter_mut().zip(record.iter()) {
            col.push(guess_cell_type(value));
        }
    }

    assemble(path, headers, cells)
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Beverage_category": "Coffee", "Calories": 3 },
///   ...
/// ]
/// ```
///
/// Column order follows first appearance; absent keys read as null.
fn load_json(path: &Path) -> Result<Dataset, DatasetLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|source| DatasetLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let records = root
        .as_array()
        .ok_or_else(|| malformed(path, "expected top-level JSON array"))?;

    let mut names: Vec<String> = Vec::new();
    let mut cells: Vec<Vec<CellValue>> = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| malformed(path, format!("record {i} is not a JSON object")))?;

        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
                cells.push(vec![CellValue::Null; i]);
            }
        }
        for (name, col) in names.iter().zip(cells.iter_mut()) {
            col.push(obj.get(name).map_or(CellValue::Null, json_to_cell));
        }
    }

    assemble(path, names, cells)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, DatasetLoadError> {
    let parquet_err = |source| DatasetLoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?).map_err(parquet_err)?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().map_err(parquet_err)?;

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    for batch_result in reader {
        let batch = batch_result.map_err(|source| DatasetLoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;
        for (col_idx, col) in cells.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            col.extend((0..batch.num_rows()).map(|row| extract_cell(array, row)));
        }
    }

    assemble(path, names, cells)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(i64::from(a.value(row)))),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(f64::from(a.value(row)))),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    cell.unwrap_or_else(|| CellValue::Text(format!("{:?}", col.data_type())))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;
    use crate::data::model::ColumnKind;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_columns_are_typed_and_ordered() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "drinks.csv",
            "Beverage_category,Beverage,Calories,Sugars_g\n\
             Coffee,Brewed Coffee,3,0\n\
             Classic Espresso Drinks,Caffe Latte,100,9.5\n\
             Smoothies,Banana Chocolate,280,\n",
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.shape(), (3, 4));
        let names: Vec<&str> = ds.column_names().collect();
        assert_eq!(names, ["Beverage_category", "Beverage", "Calories", "Sugars_g"]);
        assert_eq!(ds.column("Beverage").unwrap().kind, ColumnKind::Categorical);
        assert_eq!(ds.column("Calories").unwrap().kind, ColumnKind::Numerical);
        let sugars = ds.column("Sugars_g").unwrap();
        assert_eq!(sugars.kind, ColumnKind::Numerical);
        assert_eq!(sugars.values[2], CellValue::Null);
    }

    #[test]
    fn bundled_dataset_has_three_text_columns() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/cleaned_starbucks.csv");
        let ds = load_file(&path).unwrap();
        let c = crate::data::classify::classify(&ds);
        assert_eq!(c.categorical, ["Beverage_category", "Beverage", "Beverage_prep"]);
        assert_eq!(c.numerical.len(), ds.columns().len() - 3);
        assert_eq!(ds.shape(), (34, 18));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DatasetLoadError::Io { .. }));
    }

    #[test]
    fn ragged_csv_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "a,b\n1,2\n3\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DatasetLoadError::Malformed { .. }), "{err}");
    }

    #[test]
    fn duplicate_headers_are_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "dup.csv", "a,a\n1,2\n");
        assert!(matches!(
            load_file(&path),
            Err(DatasetLoadError::Malformed { .. })
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("drinks.xlsx")).unwrap_err();
        assert!(matches!(err, DatasetLoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_records_fill_missing_keys_with_null() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "drinks.json",
            r#"[{"Beverage": "Caffe Mocha", "Calories": 260},
                {"Beverage": "Iced Tea", "Caffeine_mg": 25.5}]"#,
        );

        let ds = load_file(&path).unwrap();
        let names: Vec<&str> = ds.column_names().collect();
        assert_eq!(names, ["Beverage", "Calories", "Caffeine_mg"]);
        assert_eq!(ds.column("Calories").unwrap().values[1], CellValue::Null);
        assert_eq!(ds.column("Caffeine_mg").unwrap().values[0], CellValue::Null);
        assert_eq!(ds.column("Caffeine_mg").unwrap().kind, ColumnKind::Numerical);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "obj.json", r#"{"Beverage": "Latte"}"#);
        assert!(matches!(
            load_file(&path),
            Err(DatasetLoadError::Malformed { .. })
        ));
        let path = write(&dir, "broken.json", "[{");
        assert!(matches!(load_file(&path), Err(DatasetLoadError::Json { .. })));
    }

    #[test]
    fn parquet_flat_columns_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drinks.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("Beverage", DataType::Utf8, false),
            Field::new("Calories", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Latte", "Mocha"])),
                Arc::new(Float64Array::from(vec![Some(190.0), None])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.shape(), (2, 2));
        assert_eq!(ds.column("Beverage").unwrap().kind, ColumnKind::Categorical);
        let calories = ds.column("Calories").unwrap();
        assert_eq!(calories.values, [CellValue::Float(190.0), CellValue::Null]);
    }
}
