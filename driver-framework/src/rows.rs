//! Registry configuration rows.
//!
//! A registry configuration is a table with one row per point. Column names
//! are driver specific; the framework only turns the table into rows of
//! field name to cell text. Tables come either as CSV with a header line or
//! as a JSON array of flat objects.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{DriverError, Result};

/// One row of a registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryRow {
    fields: HashMap<String, String>,
}

impl RegistryRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of a field that must be present.
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field)
            .ok_or_else(|| DriverError::MissingField(field.to_string()))
    }

    /// Value of an optional field, or `default` when absent.
    pub fn get_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.get(field).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RegistryRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse a CSV registry table.
///
/// The first line holds the column names. Cells and headers are kept
/// verbatim, surrounding spaces included. Rows shorter than the header
/// simply lack the trailing fields. Blank lines are skipped.
pub fn parse_csv_rows(content: &str) -> Result<Vec<RegistryRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows: Vec<RegistryRow> = Vec::new();

    for record in reader.records() {
        let record = record?;
        rows.push(headers.iter().zip(record.iter()).collect());
    }

    Ok(rows)
}

/// Parse a JSON registry table (an array of flat objects).
///
/// `null` cells count as absent. Numbers and booleans are kept in their
/// JSON text form.
pub fn parse_json_rows(content: &str) -> Result<Vec<RegistryRow>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| DriverError::RegistryParse(e.to_string()))?;

    let Value::Array(entries) = value else {
        return Err(DriverError::RegistryParse(
            "expected an array of point definitions".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let Value::Object(object) = entry else {
                return Err(DriverError::RegistryParse(format!(
                    "entry {} is not an object",
                    index
                )));
            };

            let mut row = RegistryRow::new();
            for (field, cell) in object {
                let text = match cell {
                    Value::Null => continue,
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(DriverError::RegistryParse(format!(
                            "entry {}: field '{}' must be a scalar",
                            index, field
                        )));
                    }
                };
                row = row.with_field(field, text);
            }
            Ok(row)
        })
        .collect()
}

/// Load a registry table from a `.csv` or `.json` file.
pub fn load_registry_file(path: impl AsRef<Path>) -> Result<Vec<RegistryRow>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => parse_csv_rows(&content),
        Some("json") => parse_json_rows(&content),
        _ => Err(DriverError::RegistryParse(format!(
            "unsupported registry file type: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_accessors() {
        let row = RegistryRow::new()
            .with_field("Point Name", "temp1")
            .with_field("Units", "F");

        assert_eq!(row.get("Point Name"), Some("temp1"));
        assert_eq!(row.get("Notes"), None);
        assert_eq!(row.get_or("Notes", ""), "");
        assert_eq!(row.require("Units").unwrap(), "F");
        assert!(matches!(
            row.require("Writable"),
            Err(DriverError::MissingField(f)) if f == "Writable"
        ));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_parse_csv_rows() {
        let csv = "Point Name,Volttron Point Name,Units,Writable,Notes,Default\n\
                   temp1,Temperature,F,FALSE,Zone temp,\n\
                   sp1, Setpoint ,F,true,,72\n";

        let rows = parse_csv_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Point Name"), Some("temp1"));
        assert_eq!(rows[0].get("Notes"), Some("Zone temp"));
        assert_eq!(rows[0].get("Default"), Some(""));
        assert_eq!(rows[1].get("Volttron Point Name"), Some(" Setpoint "));
        assert_eq!(rows[1].get("Default"), Some("72"));
    }

    #[test]
    fn test_parse_csv_header_spaces_kept() {
        let csv = "Point Name, Units
temp1, F
";

        let rows = parse_csv_rows(csv).unwrap();
        assert_eq!(rows[0].get("Units"), None);
        assert_eq!(rows[0].get(" Units"), Some(" F"));
    }

    #[test]
    fn test_parse_csv_short_row() {
        let csv = "Point Name,Volttron Point Name,Units,Writable,Notes\n\
                   temp1,Temperature,F\n";

        let rows = parse_csv_rows(csv).unwrap();
        assert_eq!(rows[0].get("Units"), Some("F"));
        assert_eq!(rows[0].get("Writable"), None);
    }

    #[test]
    fn test_parse_json_rows() {
        let json = r#"[
            {"Point Name": "temp1", "Volttron Point Name": "Temperature",
             "Units": "F", "Writable": "TRUE", "Default": 72, "Notes": null}
        ]"#;

        let rows = parse_json_rows(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Default"), Some("72"));
        assert_eq!(rows[0].get("Notes"), None);
        assert_eq!(rows[0].get("Writable"), Some("TRUE"));
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        assert!(matches!(
            parse_json_rows(r#"{"Point Name": "x"}"#),
            Err(DriverError::RegistryParse(_))
        ));
        assert!(matches!(
            parse_json_rows(r#"[{"Point Name": ["x"]}]"#),
            Err(DriverError::RegistryParse(_))
        ));
        assert!(matches!(
            parse_json_rows(r#"["temp1"]"#),
            Err(DriverError::RegistryParse(_))
        ));
    }

    #[test]
    fn test_load_registry_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.txt");
        std::fs::write(&path, "Point Name\ntemp1\n").unwrap();

        assert!(matches!(
            load_registry_file(&path),
            Err(DriverError::RegistryParse(_))
        ));
    }

    #[test]
    fn test_load_registry_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.CSV");
        std::fs::write(&path, "Point Name,Units\ntemp1,F\n").unwrap();

        let rows = load_registry_file(&path).unwrap();
        assert_eq!(rows[0].get("Point Name"), Some("temp1"));
    }
}
