//! Output model: header paths, records and the table model
//!
//! The `TableModel` is the final artifact of reconstruction. It is created
//! once per source table and never mutated afterwards; warnings accumulated
//! by the pipeline stages travel inside it as data.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use super::value::ParsedValue;
use crate::utils::error::{TableError, TableResult, Warning};
use crate::utils::text::slugify;

/// The outer-to-inner label sequence identifying one column's grouping
///
/// e.g. `["ANE", "Column %"]` for a "Column %" column nested under an "ANE"
/// group header. Built once per table by the header resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPath {
    labels: Vec<String>,
}

impl HeaderPath {
    /// Create a path from outer-to-inner labels
    pub fn new(labels: Vec<String>) -> Self {
        HeaderPath { labels }
    }

    /// The labels, outermost first
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Innermost label, if any
    pub fn leaf(&self) -> Option<&str> {
        self.labels.last().map(|s| s.as_str())
    }

    /// Append a positional disambiguation suffix ("#2") to the innermost
    /// label. Used when two columns resolve to identical paths.
    pub fn disambiguate(&mut self, position: usize) {
        if let Some(last) = self.labels.last_mut() {
            last.push_str(&format!("#{}", position));
        } else {
            self.labels.push(format!("#{}", position));
        }
    }

    /// Synthesize the field key for this path: labels joined and slugified
    /// to a compact identifier form.
    pub fn field_key(&self) -> String {
        slugify(&self.labels.join("_"))
    }
}

impl Serialize for HeaderPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.labels.serialize(serializer)
    }
}

/// One data row: field key -> parsed value, in column order
///
/// The first column's text is additionally exposed as `row_label`, since
/// nearly every observed table uses column 1 as a category label.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    /// Normalized text of the first column
    pub row_label: String,
    /// Field values keyed by synthesized field key, insertion order
    /// following column order
    pub fields: IndexMap<String, ParsedValue>,
}

impl TableRecord {
    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&ParsedValue> {
        self.fields.get(key)
    }
}

// Record objects carry every field in column order plus the distinguished
// "rowLabel" entry (output contract).
impl Serialize for TableRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("rowLabel", &self.row_label)?;
        map.end()
    }
}

/// The normalized table: caption, header paths, records and diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub caption: Option<String>,
    /// One header path per grid column
    pub headers: Vec<HeaderPath>,
    /// One record per data row
    pub records: Vec<TableRecord>,
    /// Recoverable anomalies encountered during reconstruction
    pub warnings: Vec<Warning>,
}

impl TableModel {
    /// Serialize to the JSON output contract:
    /// `{ "caption", "headers", "data", "warnings" }`
    pub fn to_json(&self) -> TableResult<String> {
        serde_json::to_string(self).map_err(|e| TableError::internal(e.to_string()))
    }

    /// Human-readable digest of the table, used downstream when a prose
    /// rendering of the table is needed. `None` for a table with neither
    /// caption nor data.
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();

        if let Some(caption) = &self.caption {
            parts.push(format!("Table: {}", caption));
        }

        if !self.records.is_empty() {
            parts.push(format!("Contains {} rows of data.", self.records.len()));

            let first = &self.records[0];
            let key_values: Vec<String> = first
                .fields
                .iter()
                .take(3)
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            if !key_values.is_empty() {
                parts.push(format!("Key data: {}", key_values.join(", ")));
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl Serialize for TableModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let warnings: Vec<String> = self.warnings.iter().map(|w| w.to_string()).collect();

        let mut s = serializer.serialize_struct("TableModel", 4)?;
        s.serialize_field("caption", &self.caption)?;
        s.serialize_field("headers", &self.headers)?;
        s.serialize_field("data", &self.records)?;
        s.serialize_field("warnings", &warnings)?;
        s.end()
    }
}
