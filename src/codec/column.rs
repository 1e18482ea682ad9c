//! Per-column encoding strategy.
//!
//! A column is written either as a flat literal array of cell-table indices
//! or as a run-length list of `{"f", "t", "v"}` records. The wire carries no
//! tag: the decoder probes the integer shape first and falls back to the run
//! shape. The two forms are mutually exclusive at the JSON-value-kind level
//! (bare integer vs object) — any future encoding variant must keep them so.

use serde_json::{json, Value};

use crate::table::{Cell, Table};

use super::wire;
use super::{CellTable, CodecError, OntologyAnnotationTable, StringTable};

/// Columns shorter than this are always stored literally.
///
/// Below the threshold the run-record overhead outweighs any win; above it
/// the run-length form is used unconditionally, even when every row differs
/// (n singleton runs). The decision is by threshold and column type only,
/// never by measuring actual repetition — wire compatibility depends on
/// reproducing that choice exactly.
pub const RUN_LENGTH_THRESHOLD: usize = 100;

/// A contiguous block of identical cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    /// First row index (inclusive)
    from: usize,
    /// Last row index (inclusive)
    to: usize,
    /// Cell-table index shared by every row in the block
    value: usize,
}

/// Encode one column, interning its cells into the shared tables.
///
/// Cells are visited in ascending row order; a hole in the sparse map is
/// treated as an empty free-text cell. IO-type columns and columns below
/// [`RUN_LENGTH_THRESHOLD`] rows take the literal path.
pub fn encode_column(
    table: &Table,
    column: usize,
    rows: usize,
    strings: &mut StringTable,
    annotations: &mut OntologyAnnotationTable,
    cells: &mut CellTable,
) -> Value {
    let cell_at = |row: usize| -> Cell { table.cell(column, row).cloned().unwrap_or_default() };

    let io_type = table
        .headers()
        .get(column)
        .map(|h| h.is_io_type())
        .unwrap_or(false);

    if io_type || rows < RUN_LENGTH_THRESHOLD {
        let literal: Vec<Value> = (0..rows)
            .map(|row| json!(cells.intern(&cell_at(row), strings, annotations)))
            .collect();
        log::debug!("column {column}: literal, {rows} rows");
        return Value::Array(literal);
    }

    let mut runs: Vec<Value> = Vec::new();
    let mut current = cell_at(0);
    let mut from = 0usize;
    for row in 1..rows {
        let next = cell_at(row);
        if next != current {
            let value = cells.intern(&current, strings, annotations);
            runs.push(json!({ "f": from, "t": row - 1, "v": value }));
            current = next;
            from = row;
        }
    }
    // The last run is always still open here
    let value = cells.intern(&current, strings, annotations);
    runs.push(json!({ "f": from, "t": rows - 1, "v": value }));
    log::debug!("column {column}: run-length, {rows} rows in {} runs", runs.len());
    Value::Array(runs)
}

/// Decode one column into `table`, writing resolved cells row by row.
///
/// Probes the literal shape first; if any element is not a bare integer,
/// falls back to the run-length shape. If neither shape matches, the
/// failure surfaces as a single [`CodecError::Column`] naming the column.
/// Dangling cell-table indices are shape-valid and surface as
/// [`CodecError::IndexOutOfRange`] instead.
pub fn decode_column(
    value: &Value,
    column: usize,
    strings: &StringTable,
    annotations: &OntologyAnnotationTable,
    cells: &CellTable,
    table: &mut Table,
) -> Result<(), CodecError> {
    let path = format!("table.c[{column}]");
    let elements = wire::as_array(value, &path)?;

    if let Some(indices) = parse_literal(elements) {
        for (row, &index) in indices.iter().enumerate() {
            let cell = cells.resolve(index, strings, annotations)?;
            set_decoded(table, column, row, cell);
        }
        return Ok(());
    }

    let runs = parse_runs(elements).ok_or(CodecError::Column { index: column })?;
    for (i, run) in runs.iter().enumerate() {
        if run.from > run.to {
            return Err(CodecError::InvalidRun {
                path: format!("{path}[{i}]"),
            });
        }
        // Resolve once per run; every row still gets its own copy
        let cell = cells.resolve(run.value, strings, annotations)?;
        for row in run.from..=run.to {
            set_decoded(table, column, row, cell.clone());
        }
    }
    Ok(())
}

/// Probe the literal shape: every element a bare non-negative integer
fn parse_literal(elements: &[Value]) -> Option<Vec<usize>> {
    elements
        .iter()
        .map(|v| v.as_u64().map(|n| n as usize))
        .collect()
}

/// Probe the run-length shape: every element an object with f/t/v integers
fn parse_runs(elements: &[Value]) -> Option<Vec<Run>> {
    elements
        .iter()
        .map(|v| {
            let obj = v.as_object()?;
            Some(Run {
                from: obj.get("f")?.as_u64()? as usize,
                to: obj.get("t")?.as_u64()? as usize,
                value: obj.get("v")?.as_u64()? as usize,
            })
        })
        .collect()
}

/// Write into a freshly allocated decode target.
///
/// The decoder populates columns strictly within the header list it decoded
/// first, so the bounds check cannot fire; it is kept as a debug assertion.
fn set_decoded(table: &mut Table, column: usize, row: usize, cell: Cell) {
    let result = table.set_cell(column, row, cell);
    debug_assert!(result.is_ok(), "decode wrote outside the header list");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::OntologyAnnotation;
    use crate::table::{CompositeHeader, IoType};

    fn tables() -> (StringTable, OntologyAnnotationTable, CellTable) {
        (
            StringTable::new(),
            OntologyAnnotationTable::new(),
            CellTable::new(),
        )
    }

    fn single_column_table(header: CompositeHeader, cells: &[Cell]) -> Table {
        let mut t = Table::new("t");
        t.add_column(header);
        for (row, cell) in cells.iter().enumerate() {
            t.set_cell(0, row, cell.clone()).unwrap();
        }
        t
    }

    fn characteristic() -> CompositeHeader {
        CompositeHeader::Characteristic(OntologyAnnotation::new("organism"))
    }

    #[test]
    fn test_short_column_is_literal() {
        let (mut strings, mut oas, mut cells) = tables();
        let t = single_column_table(
            characteristic(),
            &[Cell::text("A"), Cell::text("A"), Cell::text("B")],
        );
        let encoded = encode_column(&t, 0, 3, &mut strings, &mut oas, &mut cells);
        assert_eq!(encoded, json!([0, 0, 1]));
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn test_run_length_splits_on_value_change() {
        let (mut strings, mut oas, mut cells) = tables();
        let mut values = vec![Cell::text("A"); 100];
        values.extend(vec![Cell::text("B"); 50]);
        let t = single_column_table(characteristic(), &values);

        let encoded = encode_column(&t, 0, 150, &mut strings, &mut oas, &mut cells);
        assert_eq!(
            encoded,
            json!([{"f": 0, "t": 99, "v": 0}, {"f": 100, "t": 149, "v": 1}])
        );
    }

    #[test]
    fn test_threshold_boundary() {
        // 99 distinct rows: literal
        let (mut strings, mut oas, mut cells) = tables();
        let values: Vec<Cell> = (0..99).map(|i| Cell::text(&format!("v{i}"))).collect();
        let t = single_column_table(characteristic(), &values);
        let encoded = encode_column(&t, 0, 99, &mut strings, &mut oas, &mut cells);
        assert_eq!(encoded, json!((0..99).collect::<Vec<usize>>()));

        // 100 distinct rows: run-length, degenerating to 100 singleton runs
        let (mut strings, mut oas, mut cells) = tables();
        let values: Vec<Cell> = (0..100).map(|i| Cell::text(&format!("v{i}"))).collect();
        let t = single_column_table(characteristic(), &values);
        let encoded = encode_column(&t, 0, 100, &mut strings, &mut oas, &mut cells);
        let runs = encoded.as_array().unwrap();
        assert_eq!(runs.len(), 100);
        assert_eq!(runs[7], json!({"f": 7, "t": 7, "v": 7}));
    }

    #[test]
    fn test_io_type_override() {
        let (mut strings, mut oas, mut cells) = tables();
        let values: Vec<Cell> = (0..1000).map(|i| Cell::text(&format!("sample{i}"))).collect();
        let t = single_column_table(CompositeHeader::Input(IoType::Sample), &values);
        let encoded = encode_column(&t, 0, 1000, &mut strings, &mut oas, &mut cells);
        let elements = encoded.as_array().unwrap();
        assert_eq!(elements.len(), 1000);
        assert!(elements.iter().all(Value::is_u64));
    }

    #[test]
    fn test_constant_io_column_stays_literal() {
        let (mut strings, mut oas, mut cells) = tables();
        let values = vec![Cell::text("same"); 200];
        let t = single_column_table(CompositeHeader::Output(IoType::Data), &values);
        let encoded = encode_column(&t, 0, 200, &mut strings, &mut oas, &mut cells);
        assert_eq!(encoded, json!(vec![0usize; 200]));
    }

    fn decode_target(columns: usize) -> Table {
        let mut t = Table::new("decoded");
        for _ in 0..columns {
            t.add_column(characteristic());
        }
        t
    }

    #[test]
    fn test_decode_literal() {
        let (mut strings, mut oas, mut cells) = tables();
        cells.intern(&Cell::text("A"), &mut strings, &mut oas);
        cells.intern(&Cell::text("B"), &mut strings, &mut oas);

        let mut t = decode_target(1);
        decode_column(&json!([0, 0, 1]), 0, &strings, &oas, &cells, &mut t).unwrap();
        assert_eq!(t.cell(0, 0), Some(&Cell::text("A")));
        assert_eq!(t.cell(0, 1), Some(&Cell::text("A")));
        assert_eq!(t.cell(0, 2), Some(&Cell::text("B")));
    }

    #[test]
    fn test_decode_runs_fill_every_row() {
        let (mut strings, mut oas, mut cells) = tables();
        cells.intern(&Cell::text("A"), &mut strings, &mut oas);

        let mut t = decode_target(1);
        decode_column(
            &json!([{"f": 0, "t": 4, "v": 0}]),
            0,
            &strings,
            &oas,
            &cells,
            &mut t,
        )
        .unwrap();
        assert_eq!(t.row_count(), 5);
        for row in 0..5 {
            assert_eq!(t.cell(0, row), Some(&Cell::text("A")));
        }
    }

    #[test]
    fn test_decode_empty_column() {
        let (strings, oas, cells) = tables();
        let mut t = decode_target(1);
        decode_column(&json!([]), 0, &strings, &oas, &cells, &mut t).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn test_discriminator_rejects_mixed_shapes() {
        let (mut strings, mut oas, mut cells) = tables();
        cells.intern(&Cell::text("A"), &mut strings, &mut oas);

        let mut t = decode_target(1);
        // A string is neither a bare integer nor a run object
        let err = decode_column(&json!(["oops"]), 0, &strings, &oas, &cells, &mut t).unwrap_err();
        assert!(matches!(err, CodecError::Column { index: 0 }));

        // An object missing "v" fails the run shape too
        let err = decode_column(
            &json!([{"f": 0, "t": 1}]),
            0,
            &strings,
            &oas,
            &cells,
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Column { index: 0 }));
    }

    #[test]
    fn test_dangling_index_is_not_a_shape_error() {
        let (strings, oas, cells) = tables();
        let mut t = decode_target(1);
        let err = decode_column(&json!([3]), 0, &strings, &oas, &cells, &mut t).unwrap_err();
        assert!(matches!(
            err,
            CodecError::IndexOutOfRange { table: "cellTable", index: 3 }
        ));
    }

    #[test]
    fn test_decode_rejects_inverted_run() {
        let (mut strings, mut oas, mut cells) = tables();
        cells.intern(&Cell::text("A"), &mut strings, &mut oas);
        let mut t = decode_target(1);
        let err = decode_column(
            &json!([{"f": 5, "t": 2, "v": 0}]),
            0,
            &strings,
            &oas,
            &cells,
            &mut t,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::InvalidRun { .. }));
    }
}
