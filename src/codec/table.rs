//! Whole-table orchestration and the document envelope.
//!
//! The fragment-level functions work against caller-owned dedup tables so
//! that strings, annotations, and cells common across sibling tables in one
//! document are deduplicated globally. The document-level functions wrap a
//! single table in the full envelope.

use serde_json::{Map, Value};

use crate::table::{CompositeHeader, Table};

use super::column::{decode_column, encode_column};
use super::wire;
use super::{CellTable, CodecError, OntologyAnnotationTable, StringTable};

/// Envelope field: the string dedup table
pub const FIELD_STRING_TABLE: &str = "stringTable";
/// Envelope field: the ontology-annotation dedup table
pub const FIELD_OA_TABLE: &str = "oaTable";
/// Envelope field: the cell dedup table
pub const FIELD_CELL_TABLE: &str = "cellTable";
/// Envelope field: the encoded table body
pub const FIELD_TABLE: &str = "table";

/// Encode `table` into a `{n, h, c}` fragment, interning into the shared
/// dedup tables.
///
/// Columns are visited in ascending order and rows in ascending order
/// within each column; this traversal is what fixes first-seen index
/// assignment in all three tables, so encoding is deterministic. The `c`
/// field is omitted entirely when the table holds no cells.
pub fn encode_table(
    table: &Table,
    strings: &mut StringTable,
    annotations: &mut OntologyAnnotationTable,
    cells: &mut CellTable,
) -> Value {
    let mut fragment = Map::new();
    fragment.insert("n".to_string(), Value::from(strings.intern(&table.name)));

    // Headers go on the wire verbatim; they are never interned.
    // CompositeHeader serialization cannot fail.
    let headers: Vec<Value> = table
        .headers()
        .iter()
        .map(|h| serde_json::to_value(h).unwrap_or(Value::Null))
        .collect();
    fragment.insert("h".to_string(), Value::Array(headers));

    if !table.is_empty() {
        let rows = table.row_count();
        let columns: Vec<Value> = (0..table.column_count())
            .map(|col| encode_column(table, col, rows, strings, annotations, cells))
            .collect();
        fragment.insert("c".to_string(), Value::Array(columns));
    }

    log::debug!(
        "encoded table '{}': {} columns, {} rows",
        table.name,
        table.column_count(),
        table.row_count()
    );
    Value::Object(fragment)
}

/// Decode a `{n, h, c}` fragment against already-decoded dedup tables.
///
/// Allocates a fresh [`Table`]; nothing is shared with the dedup tables or
/// with other decode calls.
pub fn decode_table(
    strings: &StringTable,
    annotations: &OntologyAnnotationTable,
    cells: &CellTable,
    fragment: &Value,
) -> Result<Table, CodecError> {
    let obj = wire::as_object(fragment, FIELD_TABLE)?;

    let name_index = wire::as_index(
        wire::field(obj, FIELD_TABLE, "n")?,
        &wire::join(FIELD_TABLE, "n"),
    )?;
    let name = strings.resolve(name_index)?.to_string();

    let headers_path = wire::join(FIELD_TABLE, "h");
    let mut table = Table::new(&name);
    for (i, raw) in wire::as_array(wire::field(obj, FIELD_TABLE, "h")?, &headers_path)?
        .iter()
        .enumerate()
    {
        let header: CompositeHeader =
            serde_json::from_value(raw.clone()).map_err(|_| CodecError::UnexpectedKind {
                path: format!("{headers_path}[{i}]"),
                expected: "header object",
            })?;
        table.add_column(header);
    }

    if let Some(columns) = obj.get("c") {
        let columns_path = wire::join(FIELD_TABLE, "c");
        let columns = wire::as_array(columns, &columns_path)?;
        if columns.len() > table.column_count() {
            return Err(CodecError::UnexpectedKind {
                path: columns_path,
                expected: "at most one column per header",
            });
        }
        for (col, encoded) in columns.iter().enumerate() {
            decode_column(encoded, col, strings, annotations, cells, &mut table)?;
        }
    }

    log::debug!(
        "decoded table '{}': {} columns, {} rows",
        table.name,
        table.column_count(),
        table.row_count()
    );
    Ok(table)
}

/// Encode a single table as a complete, self-contained envelope.
///
/// Builds fresh dedup tables; callers packing several sibling tables into
/// one document should use [`encode_table`] with shared tables instead.
pub fn encode_document(table: &Table) -> Value {
    let mut strings = StringTable::new();
    let mut annotations = OntologyAnnotationTable::new();
    let mut cells = CellTable::new();

    let fragment = encode_table(table, &mut strings, &mut annotations, &mut cells);

    let mut envelope = Map::new();
    envelope.insert(FIELD_STRING_TABLE.to_string(), strings.to_wire());
    envelope.insert(FIELD_OA_TABLE.to_string(), annotations.to_wire());
    envelope.insert(FIELD_CELL_TABLE.to_string(), cells.to_wire());
    envelope.insert(FIELD_TABLE.to_string(), fragment);
    Value::Object(envelope)
}

/// Decode a complete envelope back into a table.
///
/// The dedup tables decode in dependency order: strings first, then
/// annotations (which reference strings), then cells (which reference
/// both), then the table body.
pub fn decode_document(envelope: &Value) -> Result<Table, CodecError> {
    let obj = wire::as_object(envelope, "envelope")?;

    let strings = StringTable::from_wire(
        wire::field(obj, "", FIELD_STRING_TABLE)?,
        FIELD_STRING_TABLE,
    )?;
    let annotations = OntologyAnnotationTable::from_wire(
        wire::field(obj, "", FIELD_OA_TABLE)?,
        FIELD_OA_TABLE,
    )?;
    let cells = CellTable::from_wire(wire::field(obj, "", FIELD_CELL_TABLE)?, FIELD_CELL_TABLE)?;

    decode_table(
        &strings,
        &annotations,
        &cells,
        wire::field(obj, "", FIELD_TABLE)?,
    )
}
