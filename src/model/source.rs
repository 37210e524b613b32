//! Input contract types
//!
//! A table is presented to the engine as an ordered list of rows, each an
//! ordered list of cells. Any HTML-tree library can feed the engine as long
//! as it yields this shape; the engine itself never touches markup.

/// One markup cell as authored
///
/// Text content is raw (entity-decoded, not yet whitespace-normalized).
/// Spans default to 1; a span of 0 is floored to 1 during grid expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCell {
    /// Raw text content of the cell
    pub text: String,
    /// Number of grid rows this cell occupies
    pub rowspan: u32,
    /// Number of grid columns this cell occupies
    pub colspan: u32,
    /// Whether this cell came from header markup (`<th>` / `<thead>`)
    pub header: bool,
}

impl SourceCell {
    /// Create a 1x1 data cell
    pub fn data(text: impl Into<String>) -> Self {
        SourceCell {
            text: text.into(),
            rowspan: 1,
            colspan: 1,
            header: false,
        }
    }

    /// Create a 1x1 header cell
    pub fn header(text: impl Into<String>) -> Self {
        SourceCell {
            text: text.into(),
            rowspan: 1,
            colspan: 1,
            header: true,
        }
    }

    /// Set the rowspan
    pub fn with_rowspan(mut self, rowspan: u32) -> Self {
        self.rowspan = rowspan;
        self
    }

    /// Set the colspan
    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = colspan;
        self
    }
}

/// One source table: an optional caption plus ordered rows of cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub caption: Option<String>,
    pub rows: Vec<Vec<SourceCell>>,
}

impl SourceTable {
    /// Create an empty table with no caption
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Append a row of cells
    pub fn push_row(&mut self, cells: Vec<SourceCell>) {
        self.rows.push(cells);
    }

    /// Total number of authored cells across all rows
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }
}
