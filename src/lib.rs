//! # arctable - A Compact Codec for Annotated Scientific-Metadata Tables
//!
//! `arctable` turns a two-dimensional annotated table (rows × typed columns
//! of heterogeneous cell values) into a compact, self-contained JSON
//! interchange representation, and reconstructs an exact copy from it.
//!
//! ## Key Features
//!
//! - **Dictionary Compression**: Repeated strings, ontology-annotation
//!   records, and whole cell values are interned into three layered
//!   deduplication tables with stable first-seen indices.
//!
//! - **Run-Length Columns**: Long columns are stored as contiguous-run
//!   records `{"f", "t", "v"}`; short columns and identifier (IO-type)
//!   columns stay as flat index arrays. The two forms need no wire tag —
//!   the decoder discriminates them structurally.
//!
//! - **Document-Wide Sharing**: The dedup tables can be shared across the
//!   encoding of many sibling tables, so values common to a whole document
//!   are stored once.
//!
//! - **Exact Reconstruction**: Decoding yields an independent deep copy of
//!   the original table; decoded cells never alias a dedup-table slot.
//!
//! ## Quick Start
//!
//! ```rust
//! use arctable::prelude::*;
//!
//! // Build a table
//! let mut table = Table::new("growth study");
//! table.add_column(CompositeHeader::Input(IoType::Source));
//! table.add_column(CompositeHeader::Characteristic(
//!     OntologyAnnotation::new("organism").with_term_source("OBI"),
//! ));
//! table.set_cell(0, 0, Cell::text("sample1"))?;
//! table.set_cell(
//!     1,
//!     0,
//!     Cell::term(OntologyAnnotation::new("Homo sapiens").with_accession("NCBITaxon:9606")),
//! )?;
//!
//! // Encode to the compact envelope and back
//! let envelope = encode_document(&table);
//! let decoded = decode_document(&envelope)?;
//! assert_eq!(decoded, table);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Envelope Format
//!
//! ```text
//! {
//!   "stringTable": [ <string>, ... ],
//!   "oaTable":     [ {"n": <idx>, "ts"?: <idx>, "a"?: <idx>}, ... ],
//!   "cellTable":   [ <cell referencing the tables above>, ... ],
//!   "table": {
//!     "n": <stringTable index of the table name>,
//!     "h": [ <header, verbatim>, ... ],
//!     "c": [ <column>, ... ]        // omitted if the table has no cells
//!   }
//! }
//! ```
//!
//! Each `<column>` is either a flat array of integers (cell-table indices)
//! or an array of run records `{"f": <int>, "t": <int>, "v": <int>}`.
//!
//! ## Architecture
//!
//! - [`table`]: the annotated-table object model (headers, cells, tables)
//! - [`ontology`]: structured ontology term references
//! - [`codec`]: the interning tables, column codec, and envelope assembly
//!
//! Encoding one table is a single synchronous pass; index assignment order
//! equals traversal order (columns ascending, rows ascending), so output is
//! deterministic and reproducible.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod ontology;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::codec::{
        decode_document, decode_table, encode_document, encode_table, CellTable, CodecError,
        OntologyAnnotationTable, StringTable, RUN_LENGTH_THRESHOLD,
    };
    pub use crate::ontology::OntologyAnnotation;
    pub use crate::table::{Cell, CompositeHeader, DataFile, IoType, Table, TableError};
}
