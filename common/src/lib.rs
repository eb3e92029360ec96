//! RO Harvest Common Library
//!
//! Pure building blocks shared by the harvester: cell address resolution,
//! the per-stage layout registry and the extracted row types.

pub mod cell_ref;
pub mod error;
pub mod layout;
pub mod types;

pub use cell_ref::{cell_to_index, column_letters, CellRef};
pub use error::{Error, Result};
pub use layout::{column_order, Extraction, FieldGroup, FieldMapping, LayoutMapping, Stage};
pub use types::{ExtractedRow, FieldValue, MissReason};
