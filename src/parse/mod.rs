use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Matches one CSV field together with its trailing delimiter: optional
/// whitespace, then either a double-quoted run (commas allowed inside,
/// quotes stripped via the capture group) or an unquoted run of non-comma,
/// non-quote characters, then optional whitespace and a comma or
/// end-of-line.
static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s*(?:"([^"]*)"|([^",]*?))\s*(?:,|$)"#)
        .expect("CSV field pattern should be valid")
});

/// One parsed CSV record, keyed by header column name.
///
/// A header position with no corresponding field on the line is absent from
/// the row (not mapped to an empty string). Duplicate header names resolve
/// last-write-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Cell value, or `""` when the column is absent from this row.
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The full ordered sequence of rows parsed from one CSV source.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Parse header-plus-data CSV text into a dataset.
    ///
    /// The first line is the header, split on commas and trimmed per column.
    /// Data lines honor double-quoted fields so embedded commas survive;
    /// blank lines are skipped. Malformed quoting degrades to best-effort
    /// field capture rather than an error, so this never fails.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.trim().lines();

        let columns: Vec<String> = match lines.next() {
            Some(header) => header.split(',').map(|h| h.trim().to_string()).collect(),
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }

            // One field and its delimiter per iteration. Stop at end-of-line
            // so a trailing comma does not emit a phantom final field.
            let mut fields: Vec<&str> = Vec::new();
            let mut pos = 0;
            while pos < line.len() {
                let Some(caps) = FIELD_RE.captures(&line[pos..]) else {
                    break;
                };
                let field = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                fields.push(field);
                pos += caps.get(0).expect("capture 0 is the whole match").end();
            }

            let mut values = HashMap::new();
            for (column, field) in columns.iter().zip(fields.iter()) {
                if column.is_empty() {
                    continue;
                }
                values.insert(column.clone(), field.trim().to_string());
            }
            rows.push(Row { values });
        }

        Dataset { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
