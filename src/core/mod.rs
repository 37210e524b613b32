//! Core reconstruction pipeline
//!
//! This module contains the four pipeline stages, leaves first:
//! - `grid`: rowspan/colspan expansion into a dense grid
//! - `headers`: header hierarchy resolution into per-column paths
//! - `value`: typed classification of individual cell text
//! - `assemble`: joining header paths and data rows into records
//!
//! Data flows strictly forward; each table is parsed independently with no
//! state shared across invocations, so callers may process tables
//! concurrently without any locking.

pub mod assemble;
pub mod grid;
pub mod headers;
pub mod value;

pub use grid::{Grid, GridBuilder};
pub use headers::resolve_header_paths;
pub use value::{default_parser, ValueFormat, ValueParser};

use crate::model::source::SourceTable;
use crate::model::table::TableModel;
use crate::utils::error::{TableError, TableResult};

/// Reconstruction options
///
/// Currently the locale/marker configuration of the value parser; defaults
/// cover the English/US convention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOptions {
    pub value_format: ValueFormat,
}

/// Reconstruct a table with default options
pub fn parse_table(table: &SourceTable) -> TableResult<TableModel> {
    run_pipeline(table, default_parser())
}

/// Reconstruct a table with custom options
pub fn parse_table_with_options(
    table: &SourceTable,
    options: &ParseOptions,
) -> TableResult<TableModel> {
    let parser = ValueParser::new(options.value_format.clone())?;
    run_pipeline(table, &parser)
}

fn run_pipeline(table: &SourceTable, parser: &ValueParser) -> TableResult<TableModel> {
    // Fatal conditions are limited to contract violations; everything else
    // is a recoverable warning.
    if table.rows.is_empty() {
        return Err(TableError::invalid("table has no rows"));
    }
    if table.cell_count() == 0 {
        return Err(TableError::invalid_at_row("table rows contain no cells", 0));
    }

    let mut grid = Grid::build(table);
    let mut warnings = std::mem::take(&mut grid.warnings);

    let headers = resolve_header_paths(&grid, &mut warnings);
    let records = assemble::assemble_records(&grid, &headers, parser);

    Ok(TableModel {
        caption: table.caption.clone(),
        headers,
        records,
        warnings,
    })
}
