//! Shared serialization helpers.

use crate::{Error, Result};

/// Generic JSON serialization with consistent error handling
/// Works with any type that implements Serialize (including slices)
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::other(format!("Failed to serialize {} as JSON: {}", context, e)))
}

/// CSV builder with RFC 4180 quoting
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvBuilder {
    /// Create a new CSV with headers
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row of owned values
    pub fn add_row(mut self, values: Vec<String>) -> Self {
        self.rows.push(values);
        self
    }

    /// Build the CSV string
    pub fn build(self) -> String {
        let mut csv = join_row(&self.headers);
        csv.push('\n');
        for row in &self.rows {
            csv.push_str(&join_row(row));
            csv.push('\n');
        }
        csv
    }
}

fn join_row(values: &[String]) -> String {
    values
        .iter()
        .map(|v| quote_field(v))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_quotes_special_fields() {
        let csv = CsvBuilder::new(&["title", "score"])
            .add_row(vec!["plain".to_string(), "0.5".to_string()])
            .add_row(vec!["a, \"b\"".to_string(), "0.25".to_string()])
            .build();

        assert_eq!(csv, "title,score\nplain,0.5\n\"a, \"\"b\"\"\",0.25\n");
    }

    #[test]
    fn test_to_json_string() {
        let json = to_json_string(&vec![1, 2], "numbers").unwrap();
        assert!(json.contains('1'));
    }
}
