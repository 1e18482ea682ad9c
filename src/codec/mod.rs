//! # Compact Table Codec
//!
//! Dictionary compression and run-length encoding for annotated tables.
//!
//! ## Pipeline
//!
//! Encoding interns repeated values into three layered dedup tables —
//! strings, ontology annotations (whose text fields are string references),
//! and whole cells (which reference both) — then writes each column either
//! as a flat array of cell-table indices or as a run-length list of
//! `{"f", "t", "v"}` records. The result is a self-contained JSON envelope:
//!
//! ```text
//! {
//!   "stringTable": ["...", ...],
//!   "oaTable":     [{"n": 0, "ts": 1, "a": 2}, ...],
//!   "cellTable":   [{"term": 0}, ...],
//!   "table":       { "n": 0, "h": [...], "c": [...] }
//! }
//! ```
//!
//! Decoding reverses the pipeline in dependency order and rebuilds an
//! exact copy of the table. There is no tag on the two column forms; the
//! decoder discriminates structurally (bare integers vs run objects).
//!
//! ## Sharing dedup tables
//!
//! The dedup tables are plain owned values. Encoding many sibling tables
//! against one shared set ([`encode_table`]) deduplicates document-wide;
//! the single-pass encode owns the tables mutably, so cross-table sharing
//! is sequential by construction. Index assignment order equals traversal
//! order (columns ascending, rows ascending within a column), which makes
//! output for a given table byte-reproducible.

mod annotation_table;
mod cell_table;
mod column;
mod error;
mod intern;
mod string_table;
mod table;
mod wire;


pub use annotation_table::OntologyAnnotationTable;
pub use cell_table::CellTable;
pub use column::{decode_column, encode_column, RUN_LENGTH_THRESHOLD};
pub use error::CodecError;
pub use intern::Interner;
pub use string_table::StringTable;
pub use table::{
    decode_document, decode_table, encode_document, encode_table, FIELD_CELL_TABLE,
    FIELD_OA_TABLE, FIELD_STRING_TABLE, FIELD_TABLE,
};
