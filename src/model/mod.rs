//! Data layer - input contract and output model types
//!
//! - `source`: the shape any markup-tree frontend must produce
//! - `value`: typed cell values
//! - `table`: header paths, records and the final table model

pub mod source;
pub mod table;
pub mod value;

// Re-export the model types
pub use source::{SourceCell, SourceTable};
pub use table::{HeaderPath, TableModel, TableRecord};
pub use value::ParsedValue;
