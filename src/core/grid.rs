//! State-aware cell grid expansion
//!
//! Expands rowspan/colspan markup into a dense rectangular grid where every
//! position references its owning source cell. The builder maintains a
//! virtual grid state so that cells spanning down from earlier rows reserve
//! their columns before later rows are placed.

use crate::model::source::{SourceCell, SourceTable};
use crate::utils::error::Warning;

/// One occupied position in the dense grid
///
/// Holds the arena index of the owning source cell plus an anchor flag for
/// the cell's top-left position, so spanned cells are processed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridSlot {
    cell: usize,
    anchor: bool,
}

/// A dense rectangular grid of source cells
///
/// Every position in `[0, rows) x [0, cols)` is covered by exactly one cell.
/// Positions a short row failed to cover are filled with synthetic empty
/// placeholder cells during `finish`.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Arena of source cells; synthetic placeholders start at `synthetic_from`
    cells: Vec<SourceCell>,
    /// Row-major slot matrix, `rows * cols` entries
    slots: Vec<GridSlot>,
    rows: usize,
    cols: usize,
    /// Number of leading rows treated as headers
    header_rows: usize,
    synthetic_from: usize,
    /// Structural anomalies detected during expansion
    pub warnings: Vec<Warning>,
}

impl Grid {
    /// Expand a source table into a dense grid
    pub fn build(table: &SourceTable) -> Grid {
        let mut builder = GridBuilder::new();
        for row in &table.rows {
            builder.push_row(row);
        }
        builder.finish()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of leading rows resolved as header rows
    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    /// The cell owning position (row, col)
    pub fn cell(&self, row: usize, col: usize) -> &SourceCell {
        &self.cells[self.slots[row * self.cols + col].cell]
    }

    /// Raw text of the cell owning position (row, col)
    pub fn text(&self, row: usize, col: usize) -> &str {
        &self.cell(row, col).text
    }

    /// Whether (row, col) is the top-left position of its owning cell
    pub fn is_anchor(&self, row: usize, col: usize) -> bool {
        self.slots[row * self.cols + col].anchor
    }

    /// Whether the owner of (row, col) is a synthetic short-row placeholder
    pub fn is_synthetic(&self, row: usize, col: usize) -> bool {
        self.slots[row * self.cols + col].cell >= self.synthetic_from
    }

    /// Arena index of the cell owning (row, col); stable within one grid
    pub fn owner_id(&self, row: usize, col: usize) -> usize {
        self.slots[row * self.cols + col].cell
    }
}

/// Incremental grid builder
///
/// Rows are pushed top to bottom; each row's cells are placed left to right,
/// skipping columns still reserved by an active rowspan from a previous row.
pub struct GridBuilder {
    cells: Vec<SourceCell>,
    /// Sparse slot matrix during construction; rows grow as spans reach down
    slots: Vec<Vec<Option<GridSlot>>>,
    /// Header flag per authored row (true when every authored cell is a header cell)
    row_is_header: Vec<bool>,
    warnings: Vec<Warning>,
}

impl GridBuilder {
    pub fn new() -> Self {
        GridBuilder {
            cells: Vec::new(),
            slots: Vec::new(),
            row_is_header: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Place one authored row into the grid
    pub fn push_row(&mut self, row: &[SourceCell]) {
        let r = self.row_is_header.len();
        self.ensure_row(r);

        let mut col = 0usize;
        for cell in row {
            // Advance past columns reserved by still-active rowspans
            while col < self.slots[r].len() && self.slots[r][col].is_some() {
                col += 1;
            }

            // Defensive floor: a span of 0 behaves as 1
            let rowspan = cell.rowspan.max(1) as usize;
            let colspan = cell.colspan.max(1) as usize;

            let idx = self.cells.len();
            self.cells.push(cell.clone());

            let mut overlap = false;
            for dr in 0..rowspan {
                self.ensure_row(r + dr);
                let row_slots = &mut self.slots[r + dr];
                if row_slots.len() < col + colspan {
                    row_slots.resize(col + colspan, None);
                }
                for dc in 0..colspan {
                    match row_slots[col + dc] {
                        // First writer wins; the later claim is dropped
                        Some(_) => overlap = true,
                        None => {
                            row_slots[col + dc] = Some(GridSlot {
                                cell: idx,
                                anchor: dr == 0 && dc == 0,
                            })
                        }
                    }
                }
            }

            if overlap {
                self.warnings.push(
                    Warning::new("overlapping spans; earlier cell kept")
                        .at_row(r)
                        .at_column(col),
                );
            }

            col += colspan;
        }

        self.row_is_header
            .push(!row.is_empty() && row.iter().all(|c| c.header));
    }

    /// Finalize the grid: clamp rowspan overhang, pad short rows, and
    /// resolve the header-row prefix.
    pub fn finish(mut self) -> Grid {
        let rows = self.row_is_header.len();

        // Rowspans reaching past the last authored row are clamped, matching
        // how browsers bound rowspan to the row group.
        if self.slots.len() > rows && self.slots[rows..].iter().any(|r| !r.is_empty()) {
            self.warnings.push(Warning::new(
                "rowspan extends past the last row; clamped to table height",
            ));
        }
        self.slots.truncate(rows);

        let cols = self.slots.iter().map(|r| r.len()).max().unwrap_or(0);
        let synthetic_from = self.cells.len();

        // Pad uncovered positions with synthetic empty cells
        let mut slots = Vec::with_capacity(rows * cols);
        for (r, row_slots) in self.slots.iter().enumerate() {
            let mut padded = 0usize;
            for c in 0..cols {
                match row_slots.get(c).copied().flatten() {
                    Some(slot) => slots.push(slot),
                    None => {
                        let idx = self.cells.len();
                        self.cells.push(SourceCell::data(""));
                        slots.push(GridSlot {
                            cell: idx,
                            anchor: true,
                        });
                        padded += 1;
                    }
                }
            }
            if padded > 0 {
                self.warnings.push(
                    Warning::new(format!(
                        "short row: {} of {} columns uncovered, padded with missing values",
                        padded, cols
                    ))
                    .at_row(r),
                );
            }
        }

        let header_rows = self.resolve_header_prefix(rows);

        Grid {
            cells: self.cells,
            slots,
            rows,
            cols,
            header_rows,
            synthetic_from,
            warnings: self.warnings,
        }
    }

    /// Header rows must form a contiguous leading prefix. A header row after
    /// the first data row is downgraded to data with a warning; a table with
    /// no header-flagged rows at all promotes its first row (the legacy
    /// markup fallback), decided purely from the input shape.
    fn resolve_header_prefix(&mut self, rows: usize) -> usize {
        let prefix = self
            .row_is_header
            .iter()
            .take_while(|&&h| h)
            .count();

        if let Some(stray) = self.row_is_header[prefix..].iter().position(|&h| h) {
            self.warnings.push(
                Warning::new("non-contiguous header rows; only the leading run treated as headers")
                    .at_row(prefix + stray),
            );
        }

        if prefix == 0 && rows > 1 {
            self.warnings.push(Warning::new(
                "no header-flagged rows; treating first row as header",
            ));
            return 1;
        }

        prefix
    }

    fn ensure_row(&mut self, row: usize) {
        while self.slots.len() <= row {
            self.slots.push(Vec::new());
        }
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}
