//! Record assembly
//!
//! Joins resolved header paths with the data rows of a grid into one flat
//! keyed record per row. Each grid column maps to exactly one field key;
//! fraction/percentage columns that belong together semantically stay
//! separate fields, keyed so a consumer can pair them.

use fxhash::FxHashMap;
use indexmap::IndexMap;

use super::grid::Grid;
use super::value::ValueParser;
use crate::model::table::{HeaderPath, TableRecord};
use crate::utils::text::normalize_whitespace;

/// Produce one record per data row
///
/// Never fails: unparseable cells land as `Text`, padded cells as `Missing`.
pub fn assemble_records(
    grid: &Grid,
    headers: &[HeaderPath],
    parser: &ValueParser,
) -> Vec<TableRecord> {
    let keys = synthesize_keys(headers);
    let mut records = Vec::new();

    for row in grid.header_rows()..grid.rows() {
        let row_label = if grid.cols() > 0 {
            normalize_whitespace(grid.text(row, 0))
        } else {
            String::new()
        };

        let mut fields = IndexMap::with_capacity(grid.cols());
        for col in 0..grid.cols() {
            fields.insert(keys[col].clone(), parser.parse(grid.text(row, col)));
        }

        records.push(TableRecord { row_label, fields });
    }

    records
}

/// Field keys for each column, unique within the table
///
/// Normalization can collide paths that were distinct as labels (e.g. a
/// symbol-only label slugifies to nothing); collisions get a numeric suffix
/// and empty keys fall back to the column position.
fn synthesize_keys(headers: &[HeaderPath]) -> Vec<String> {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut keys = Vec::with_capacity(headers.len());

    for (col, path) in headers.iter().enumerate() {
        let mut key = path.field_key();
        if key.is_empty() {
            key = format!("col_{}", col);
        }

        let count = seen.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            key = format!("{}_{}", key, *count);
        }

        keys.push(key);
    }

    keys
}
