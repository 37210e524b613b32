//! # tablegrid
//!
//! Normalizes semi-structured HTML tables into typed, machine-usable table
//! models.
//!
//! Decade-spanning document corpora author the "same" table a dozen
//! different ways: multi-level headers merged with rowspan/colspan, short
//! rows, duplicated column labels, and cell values mixing counts,
//! percentages, fractions and interquartile ranges. This crate reconstructs
//! all of that into one normalized shape: resolved header paths, one keyed
//! record per data row, and typed cell values.
//!
//! ## Features
//!
//! - **Grid Expansion**: rowspan/colspan markup becomes a dense grid where
//!   every position knows its owning cell
//! - **Header Resolution**: multi-level header rows become per-column
//!   outer-to-inner label paths
//! - **Typed Values**: integers, percentages, fractions, ranges, missing
//!   markers and verbatim text, classified totally (never fails)
//! - **Diagnostics As Data**: structural anomalies are repaired with
//!   documented fallbacks and reported in the model's warning list
//! - **Stateless**: no globals, no caches; tables parse independently and
//!   concurrently
//!
//! ## Usage
//!
//! ```rust
//! use tablegrid::{parse_table, ParsedValue, SourceCell, SourceTable};
//!
//! let mut table = SourceTable::new().with_caption("TABLE 1. Characteristics");
//! table.push_row(vec![
//!     SourceCell::header(""),
//!     SourceCell::header("All cases").with_colspan(2),
//! ]);
//! table.push_row(vec![
//!     SourceCell::header("Characteristic"),
//!     SourceCell::header("n/N"),
//!     SourceCell::header("%"),
//! ]);
//! table.push_row(vec![
//!     SourceCell::data("Fever"),
//!     SourceCell::data("44/109"),
//!     SourceCell::data("40.4%"),
//! ]);
//!
//! let model = parse_table(&table).unwrap();
//! assert_eq!(model.records.len(), 1);
//! assert_eq!(model.records[0].row_label, "Fever");
//! assert_eq!(
//!     model.records[0].get("all_cases_n_n"),
//!     Some(&ParsedValue::Fraction { numerator: 44, denominator: 109 })
//! );
//!
//! let json = model.to_json().unwrap();
//! assert!(json.contains("\"rowLabel\":\"Fever\""));
//! ```
//!
//! The engine is a pure in-memory transformation: it performs no I/O and any
//! HTML-tree library can feed it, as long as it yields the ordered
//! row/cell/span/text shape of [`SourceTable`].

/// Core reconstruction pipeline
pub mod core;

/// Data layer - input contract and output model
pub mod model;

/// Utility modules
pub mod utils;

// Re-export the pipeline entry points
pub use self::core::{parse_table, parse_table_with_options, ParseOptions};
pub use self::core::{default_parser, Grid, GridBuilder, ValueFormat, ValueParser};

// Re-export the model types
pub use model::{HeaderPath, ParsedValue, SourceCell, SourceTable, TableModel, TableRecord};

// Re-export error and diagnostic types
pub use utils::{TableError, TableResult, Warning};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SourceTable {
        let mut table = SourceTable::new().with_caption("TABLE 1");
        table.push_row(vec![
            SourceCell::header("Characteristic"),
            SourceCell::header("Cases"),
        ]);
        table.push_row(vec![SourceCell::data("Total"), SourceCell::data("109")]);
        table
    }

    #[test]
    fn test_parse_table_basic() {
        let model = parse_table(&sample_table()).unwrap();
        assert_eq!(model.caption.as_deref(), Some("TABLE 1"));
        assert_eq!(model.headers.len(), 2);
        assert_eq!(model.records.len(), 1);
    }

    #[test]
    fn test_reexports_compose() {
        let model = parse_table_with_options(&sample_table(), &ParseOptions::default()).unwrap();
        assert_eq!(
            model.records[0].get("cases"),
            Some(&ParsedValue::Integer(109))
        );
    }
}
