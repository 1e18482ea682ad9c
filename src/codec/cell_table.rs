use serde_json::{json, Value};

use crate::table::{Cell, DataFile};

use super::wire;
use super::{CodecError, Interner, OntologyAnnotationTable, StringTable};

/// An interned cell: text payloads held by reference into the string table,
/// annotation payloads by reference into the annotation table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellEntry {
    Term(usize),
    Text(usize),
    Unitized { value: usize, unit: usize },
    Data {
        name: usize,
        format: Option<usize>,
        selector: Option<usize>,
    },
}

/// Interning table for whole cell values.
///
/// Interning routes a cell's payloads through the string and annotation
/// tables, then deduplicates the composite structurally: two cells anywhere
/// in a document with equal tag and payloads share one slot.
///
/// Wire form: an array of objects tagged by key —
/// `{"term": <oa idx>}`, `{"text": <str idx>}`,
/// `{"value": <str idx>, "unit": <oa idx>}`, or
/// `{"data": {"name": <str idx>, "format"?: <str idx>, "selector"?: <str idx>}}`.
/// Columns reference entries by bare integer index, which is what keeps the
/// literal/run-length column discriminator unambiguous.
#[derive(Debug, Clone, Default)]
pub struct CellTable {
    inner: Interner<CellEntry>,
}

impl CellTable {
    /// Create an empty cell table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `cell`, routing payloads through the sub-tables first
    pub fn intern(
        &mut self,
        cell: &Cell,
        strings: &mut StringTable,
        annotations: &mut OntologyAnnotationTable,
    ) -> usize {
        let entry = match cell {
            Cell::Term(oa) => CellEntry::Term(annotations.intern(oa, strings)),
            Cell::FreeText(s) => CellEntry::Text(strings.intern(s)),
            Cell::Unitized { value, unit } => CellEntry::Unitized {
                value: strings.intern(value),
                unit: annotations.intern(unit, strings),
            },
            Cell::Data(d) => CellEntry::Data {
                name: strings.intern(&d.name),
                format: d.format.as_deref().map(|s| strings.intern(s)),
                selector: d.selector_format.as_deref().map(|s| strings.intern(s)),
            },
        };
        self.inner.intern(entry)
    }

    /// Resolve an index to an owned cell.
    ///
    /// Always returns a deep copy, never a view of the stored entry:
    /// decoded rows that happened to share a slot must not alias each
    /// other. Dangling sub-indices surface as
    /// [`CodecError::IndexOutOfRange`].
    pub fn resolve(
        &self,
        index: usize,
        strings: &StringTable,
        annotations: &OntologyAnnotationTable,
    ) -> Result<Cell, CodecError> {
        let entry = self.inner.get(index).ok_or(CodecError::IndexOutOfRange {
            table: "cellTable",
            index,
        })?;
        Ok(match entry {
            CellEntry::Term(oa) => Cell::Term(annotations.resolve(*oa, strings)?),
            CellEntry::Text(s) => Cell::FreeText(strings.resolve(*s)?.to_string()),
            CellEntry::Unitized { value, unit } => Cell::Unitized {
                value: strings.resolve(*value)?.to_string(),
                unit: annotations.resolve(*unit, strings)?,
            },
            CellEntry::Data { name, format, selector } => Cell::Data(DataFile {
                name: strings.resolve(*name)?.to_string(),
                format: format
                    .map(|i| strings.resolve(i).map(str::to_string))
                    .transpose()?,
                selector_format: selector
                    .map(|i| strings.resolve(i).map(str::to_string))
                    .transpose()?,
            }),
        })
    }

    /// Number of interned cells
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Serialize to the wire array
    pub fn to_wire(&self) -> Value {
        Value::Array(
            self.inner
                .iter()
                .map(|entry| match entry {
                    CellEntry::Term(oa) => json!({ "term": oa }),
                    CellEntry::Text(s) => json!({ "text": s }),
                    CellEntry::Unitized { value, unit } => {
                        json!({ "value": value, "unit": unit })
                    }
                    CellEntry::Data { name, format, selector } => {
                        let mut data = json!({ "name": name });
                        if let Some(f) = format {
                            data["format"] = json!(f);
                        }
                        if let Some(s) = selector {
                            data["selector"] = json!(s);
                        }
                        json!({ "data": data })
                    }
                })
                .collect(),
        )
    }

    /// Deserialize from the wire array at `path`.
    ///
    /// Shape only; sub-indices stay unresolved until [`Self::resolve`].
    pub fn from_wire(value: &Value, path: &str) -> Result<Self, CodecError> {
        let mut table = Self::new();
        for (i, raw) in wire::as_array(value, path)?.iter().enumerate() {
            let entry_path = format!("{path}[{i}]");
            let obj = wire::as_object(raw, &entry_path)?;
            let entry = if let Some(term) = obj.get("term") {
                CellEntry::Term(wire::as_index(term, &wire::join(&entry_path, "term"))?)
            } else if let Some(text) = obj.get("text") {
                CellEntry::Text(wire::as_index(text, &wire::join(&entry_path, "text"))?)
            } else if let Some(val) = obj.get("value") {
                CellEntry::Unitized {
                    value: wire::as_index(val, &wire::join(&entry_path, "value"))?,
                    unit: wire::as_index(
                        wire::field(obj, &entry_path, "unit")?,
                        &wire::join(&entry_path, "unit"),
                    )?,
                }
            } else if let Some(data) = obj.get("data") {
                let data_path = wire::join(&entry_path, "data");
                let data = wire::as_object(data, &data_path)?;
                CellEntry::Data {
                    name: wire::as_index(
                        wire::field(data, &data_path, "name")?,
                        &wire::join(&data_path, "name"),
                    )?,
                    format: data
                        .get("format")
                        .map(|v| wire::as_index(v, &wire::join(&data_path, "format")))
                        .transpose()?,
                    selector: data
                        .get("selector")
                        .map(|v| wire::as_index(v, &wire::join(&data_path, "selector")))
                        .transpose()?,
                }
            } else {
                return Err(CodecError::UnexpectedKind {
                    path: entry_path,
                    expected: "cell object tagged term/text/value/data",
                });
            };
            table.inner.push_decoded(entry);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::OntologyAnnotation;

    fn tables() -> (StringTable, OntologyAnnotationTable, CellTable) {
        (
            StringTable::new(),
            OntologyAnnotationTable::new(),
            CellTable::new(),
        )
    }

    #[test]
    fn test_structurally_equal_cells_share_a_slot() {
        let (mut strings, mut oas, mut cells) = tables();
        let a = Cell::term(OntologyAnnotation::new("Homo sapiens").with_accession("NCBITaxon:9606"));
        let b = Cell::term(OntologyAnnotation::new("Homo sapiens").with_accession("NCBITaxon:9606"));

        let ia = cells.intern(&a, &mut strings, &mut oas);
        let ib = cells.intern(&b, &mut strings, &mut oas);
        assert_eq!(ia, ib);
        assert_eq!(cells.len(), 1);
        assert_eq!(oas.len(), 1);
    }

    #[test]
    fn test_resolve_returns_independent_copies() {
        let (mut strings, mut oas, mut cells) = tables();
        let idx = cells.intern(&Cell::text("liver"), &mut strings, &mut oas);

        let a = cells.resolve(idx, &strings, &oas).unwrap();
        let mut b = cells.resolve(idx, &strings, &oas).unwrap();
        if let Cell::FreeText(s) = &mut b {
            s.push_str(" tissue");
        }
        assert_eq!(a, Cell::text("liver"));
        assert_ne!(a, b);
        // The stored entry is untouched
        assert_eq!(cells.resolve(idx, &strings, &oas).unwrap(), Cell::text("liver"));
    }

    #[test]
    fn test_all_variants_roundtrip_through_wire() {
        let (mut strings, mut oas, mut cells) = tables();
        let samples = vec![
            Cell::term(OntologyAnnotation::new("liver").with_term_source("UBERON")),
            Cell::text("free text"),
            Cell::unitized("37", OntologyAnnotation::new("degree Celsius")),
            Cell::data(DataFile::new("run1.raw").with_format("application/octet-stream")),
        ];
        let indices: Vec<_> = samples
            .iter()
            .map(|c| cells.intern(c, &mut strings, &mut oas))
            .collect();

        let back = CellTable::from_wire(&cells.to_wire(), "cellTable").unwrap();
        for (cell, idx) in samples.iter().zip(indices) {
            assert_eq!(&back.resolve(idx, &strings, &oas).unwrap(), cell);
        }
    }

    #[test]
    fn test_from_wire_rejects_untagged_entry() {
        let err = CellTable::from_wire(&json!([{"bogus": 1}]), "cellTable").unwrap_err();
        assert!(err.to_string().contains("cellTable[0]"));
    }

    #[test]
    fn test_resolve_out_of_range() {
        let (strings, oas, cells) = tables();
        let err = cells.resolve(0, &strings, &oas).unwrap_err();
        assert!(matches!(
            err,
            CodecError::IndexOutOfRange { table: "cellTable", index: 0 }
        ));
    }
}
