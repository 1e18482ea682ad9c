//! # Annotated Table Model
//!
//! The in-memory object model the codec operates on: typed column headers,
//! tagged cell values, and a sparse `(column, row)` cell map.
//!
//! ## Design
//!
//! - Headers carry their column type, including the distinguished IO-type
//!   flag ([`CompositeHeader::is_io_type`]) that exempts identifier columns
//!   from run-length compression.
//! - Cells are owned values with structural equality — the property the
//!   interning tables in [`crate::codec`] deduplicate on.
//! - Row and column counts are derived, never stored, so they cannot drift
//!   out of sync with the cell map.

mod cell;
mod error;
mod header;
#[allow(clippy::module_inception)]
mod table;


pub use cell::{Cell, DataFile};
pub use error::TableError;
pub use header::{CompositeHeader, IoType};
pub use table::Table;
