//! Loading table records from JSON and CSV files
//!
//! Two shapes are understood:
//! - JSON keyed objects, `{ "<key>": { "<field>": value, ... }, ... }`, where
//!   the key itself can be pulled into a column via [`KEY_SOURCE`]
//! - CSV with a header row (via the csv crate), cells typed by inference
//!
//! A list of [`ColumnSpec`]s selects, renames, orders and casts columns.
//! With no specs every field is kept in file order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::record::{Record, Value};

/// Column source that refers to the entry's key rather than a field
pub const KEY_SOURCE: &str = "$key";

fn default_key_field() -> String {
    "Name".to_string()
}

/// Conversion applied to a column's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cast {
    Integer,
    Float,
    Text,
}

impl Cast {
    pub fn name(self) -> &'static str {
        match self {
            Cast::Integer => "integer",
            Cast::Float => "float",
            Cast::Text => "text",
        }
    }

    /// Convert `value`, or `None` if it has no sensible reading.
    /// Floats become integers by truncating toward zero.
    pub fn apply(self, value: Value) -> Option<Value> {
        match (self, value) {
            (Cast::Integer, v @ Value::Integer(_)) => Some(v),
            (Cast::Integer, Value::Float(f)) => float_to_int(f),
            (Cast::Integer, Value::Text(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .map(Value::Integer)
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
            }
            (Cast::Float, Value::Integer(i)) => Some(Value::Float(i as f64)),
            (Cast::Float, v @ Value::Float(_)) => Some(v),
            (Cast::Float, Value::Text(s)) => s.trim().parse::<f64>().ok().map(Value::Float),
            (Cast::Text, v @ Value::Text(_)) => Some(v),
            (Cast::Text, v) => Some(Value::Text(v.to_string())),
        }
    }
}

fn float_to_int(f: f64) -> Option<Value> {
    f.is_finite().then(|| Value::Integer(f.trunc() as i64))
}

/// One output column: its field name, where the value comes from and how
/// it's converted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub field: String,
    /// Source field; defaults to `field`. [`KEY_SOURCE`] takes the entry key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Column width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Cast>,
}

impl ColumnSpec {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            source: None,
            width: None,
            cast: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_cast(mut self, cast: Cast) -> Self {
        self.cast = Some(cast);
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.field)
    }

    fn convert(&self, key: &str, value: Value) -> Result<Value, DatasetError> {
        match self.cast {
            None => Ok(value),
            Some(cast) => cast.apply(value).ok_or_else(|| DatasetError::BadCast {
                key: key.to_string(),
                field: self.field.clone(),
                cast: cast.name(),
            }),
        }
    }
}

/// Where a table's records come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum DataSource {
    Json {
        path: PathBuf,
        /// Field name the entry key gets when no columns are given
        #[serde(default = "default_key_field")]
        key_field: String,
    },
    Csv {
        path: PathBuf,
    },
}

impl DataSource {
    /// Pick the format from the file extension
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let path = path.into();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(DataSource::Json {
                path,
                key_field: default_key_field(),
            }),
            Some("csv") | Some("tsv") => Ok(DataSource::Csv { path }),
            _ => Err(DatasetError::UnknownFormat(path)),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DataSource::Json { path, .. } | DataSource::Csv { path } => path,
        }
    }

    /// Load records, resolving a relative path against `base_dir`
    pub fn load(&self, base_dir: &Path, columns: &[ColumnSpec]) -> Result<Vec<Record>, DatasetError> {
        let path = base_dir.join(self.path());
        tracing::info!("Loading dataset from {}", path.display());
        let records = match self {
            DataSource::Json { key_field, .. } => load_json(&path, key_field, columns)?,
            DataSource::Csv { .. } => load_csv(&path, columns)?,
        };
        tracing::debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }
}

fn read(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_json(
    path: &Path,
    key_field: &str,
    columns: &[ColumnSpec],
) -> Result<Vec<Record>, DatasetError> {
    parse_json(&read(path)?, key_field, columns)
}

pub fn load_csv(path: &Path, columns: &[ColumnSpec]) -> Result<Vec<Record>, DatasetError> {
    parse_csv(&read(path)?, columns)
}

fn json_value(key: &str, field: &str, value: &serde_json::Value) -> Result<Value, DatasetError> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Value::Integer)
            .or_else(|| n.as_f64().map(Value::Float))
            .ok_or_else(|| DatasetError::UnsupportedValue {
                key: key.to_string(),
                field: field.to_string(),
            }),
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        serde_json::Value::Bool(b) => Ok(Value::Text(b.to_string())),
        _ => Err(DatasetError::UnsupportedValue {
            key: key.to_string(),
            field: field.to_string(),
        }),
    }
}

/// Parse a JSON keyed object. Entries keep file order.
pub fn parse_json(
    content: &str,
    key_field: &str,
    columns: &[ColumnSpec],
) -> Result<Vec<Record>, DatasetError> {
    let root: serde_json::Value = serde_json::from_str(content)?;
    let entries = root.as_object().ok_or(DatasetError::UnexpectedShape)?;

    let mut records = Vec::with_capacity(entries.len());
    for (key, entry) in entries {
        let fields = entry.as_object().ok_or(DatasetError::UnexpectedShape)?;
        let mut record = Record::new();

        if columns.is_empty() {
            record.insert(key_field.to_string(), Value::Text(key.clone()));
            for (name, value) in fields {
                record.insert(name.clone(), json_value(key, name, value)?);
            }
        } else {
            for column in columns {
                let source = column.source_name();
                let value = if source == KEY_SOURCE {
                    Value::Text(key.clone())
                } else {
                    let raw = fields.get(source).ok_or_else(|| DatasetError::MissingField {
                        key: key.clone(),
                        field: source.to_string(),
                    })?;
                    json_value(key, source, raw)?
                };
                record.insert(column.field.clone(), column.convert(key, value)?);
            }
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}

/// Parse CSV with a header row. The delimiter is detected from the first
/// few lines.
pub fn parse_csv(content: &str, columns: &[ColumnSpec]) -> Result<Vec<Record>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let row = result?;
        // Line numbers count the header row
        let key = format!("line {}", line + 2);
        let mut record = Record::new();

        if columns.is_empty() {
            for (name, cell) in headers.iter().zip(row.iter()) {
                record.insert(name.clone(), Value::infer(cell));
            }
        } else {
            for column in columns {
                let source = column.source_name();
                let cell = headers
                    .iter()
                    .position(|h| h == source)
                    .and_then(|i| row.get(i))
                    .ok_or_else(|| DatasetError::MissingField {
                        key: key.clone(),
                        field: source.to_string(),
                    })?;
                let value = match column.cast {
                    Some(Cast::Text) => Value::Text(cell.to_string()),
                    _ => Value::infer(cell),
                };
                record.insert(column.field.clone(), column.convert(&key, value)?);
            }
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}

/// Detect delimiter by counting candidates in the first few lines
pub fn detect_delimiter(content: &str) -> u8 {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(semi_count);
    if max == 0 || comma_count == max {
        b','
    } else if tab_count == max {
        b'\t'
    } else {
        b';'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATIONS: &str = r#"{
        "Zamunda": {"population": 5000000, "gdp": 1234.9, "debt": 88.2},
        "Genovia": {"population": 30000, "gdp": 567.1, "debt": 12.7}
    }"#;

    #[test]
    fn test_json_without_columns_keeps_file_order() {
        let records = parse_json(NATIONS, "Name", &[]).unwrap();
        assert_eq!(records.len(), 2);
        let fields: Vec<&str> = records[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(fields, vec!["Name", "population", "gdp", "debt"]);
        assert_eq!(records[0]["Name"], Value::from("Zamunda"));
        assert_eq!(records[1]["Name"], Value::from("Genovia"));
        assert_eq!(records[0]["gdp"], Value::Float(1234.9));
    }

    #[test]
    fn test_json_columns_rename_and_cast() {
        let columns = vec![
            ColumnSpec::new("Name").with_source(KEY_SOURCE),
            ColumnSpec::new("GDP").with_source("gdp").with_cast(Cast::Integer),
            ColumnSpec::new("Population").with_source("population"),
        ];
        let records = parse_json(NATIONS, "Name", &columns).unwrap();
        let fields: Vec<&str> = records[1].keys().map(|k| k.as_str()).collect();
        assert_eq!(fields, vec!["Name", "GDP", "Population"]);
        assert_eq!(records[0]["GDP"], Value::Integer(1234));
        assert_eq!(records[1]["Population"], Value::Integer(30000));
    }

    #[test]
    fn test_json_missing_field() {
        let columns = vec![ColumnSpec::new("Area")];
        let err = parse_json(NATIONS, "Name", &columns).unwrap_err();
        assert!(matches!(err, DatasetError::MissingField { ref field, .. } if field == "Area"));
    }

    #[test]
    fn test_json_wrong_shape() {
        assert!(matches!(
            parse_json("[1, 2]", "Name", &[]),
            Err(DatasetError::UnexpectedShape)
        ));
        assert!(matches!(
            parse_json(r#"{"a": 1}"#, "Name", &[]),
            Err(DatasetError::UnexpectedShape)
        ));
        assert!(matches!(parse_json("{}", "Name", &[]), Err(DatasetError::Empty)));
        assert!(matches!(
            parse_json("{not json", "Name", &[]),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn test_json_null_is_unsupported() {
        let err = parse_json(r#"{"a": {"x": null}}"#, "Name", &[]).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedValue { .. }));
    }

    #[test]
    fn test_csv_infers_types() {
        let records = parse_csv("Team,W,AVG\nCubs,92,.261\nSox, 78 ,.250\n", &[]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Team"], Value::from("Cubs"));
        assert_eq!(records[1]["W"], Value::Integer(78));
        assert_eq!(records[0]["AVG"], Value::Float(0.261));
    }

    #[test]
    fn test_csv_columns_select_and_cast() {
        let columns = vec![
            ColumnSpec::new("Wins").with_source("W"),
            ColumnSpec::new("Code").with_source("Id").with_cast(Cast::Text),
        ];
        let records = parse_csv("Id,W\n007,3\n", &columns).unwrap();
        assert_eq!(records[0]["Wins"], Value::Integer(3));
        assert_eq!(records[0]["Code"], Value::from("007"));
    }

    #[test]
    fn test_csv_bad_cast_names_line() {
        let columns = vec![ColumnSpec::new("W").with_cast(Cast::Integer)];
        let err = parse_csv("W\n1\nlots\n", &columns).unwrap_err();
        match err {
            DatasetError::BadCast { key, field, cast } => {
                assert_eq!(key, "line 3");
                assert_eq!(field, "W");
                assert_eq!(cast, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_ragged_rows_fail() {
        assert!(matches!(
            parse_csv("a,b\n1,2,3\n", &[]),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), b'\t');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(detect_delimiter("single"), b',');
    }

    #[test]
    fn test_cast_rules() {
        assert_eq!(Cast::Integer.apply(Value::Float(-2.9)), Some(Value::Integer(-2)));
        assert_eq!(Cast::Integer.apply(Value::from("12.7")), Some(Value::Integer(12)));
        assert_eq!(Cast::Integer.apply(Value::from("n/a")), None);
        assert_eq!(Cast::Float.apply(Value::Integer(3)), Some(Value::Float(3.0)));
        assert_eq!(Cast::Text.apply(Value::Integer(3)), Some(Value::from("3")));
    }

    #[test]
    fn test_source_from_extension() {
        assert!(matches!(
            DataSource::from_path("a/nations.JSON"),
            Ok(DataSource::Json { ref key_field, .. }) if key_field == "Name"
        ));
        assert!(matches!(DataSource::from_path("b.csv"), Ok(DataSource::Csv { .. })));
        assert!(matches!(
            DataSource::from_path("c.txt"),
            Err(DatasetError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_load_resolves_against_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.csv"), "a,b\n1,x\n").unwrap();
        let source = DataSource::Csv {
            path: PathBuf::from("t.csv"),
        };
        let records = source.load(dir.path(), &[]).unwrap();
        assert_eq!(records[0]["b"], Value::from("x"));

        let missing = DataSource::Csv {
            path: PathBuf::from("nope.csv"),
        };
        assert!(matches!(
            missing.load(dir.path(), &[]),
            Err(DatasetError::Io { .. })
        ));
    }
}
