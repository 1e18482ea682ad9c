use serde_json::{json, Value};

use crate::ontology::OntologyAnnotation;

use super::wire;
use super::{CodecError, Interner, StringTable};

/// An interned annotation record: the three text fields held by reference
/// into the string table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AnnotationEntry {
    name: usize,
    term_source: Option<usize>,
    accession: Option<usize>,
}

/// Interning table for ontology-annotation records.
///
/// Interning an annotation routes its text fields through the string table
/// first, then deduplicates the composite record structurally. Because
/// string interning is injective, comparing the index records is the same
/// as comparing the annotations themselves.
///
/// Wire form: an array of objects `{"n": <idx>, "ts"?: <idx>, "a"?: <idx>}`
/// whose values are string-table indices.
#[derive(Debug, Clone, Default)]
pub struct OntologyAnnotationTable {
    inner: Interner<AnnotationEntry>,
}

impl OntologyAnnotationTable {
    /// Create an empty annotation table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `oa`, routing its text fields through `strings` first
    pub fn intern(&mut self, oa: &OntologyAnnotation, strings: &mut StringTable) -> usize {
        let entry = AnnotationEntry {
            name: strings.intern(&oa.name),
            term_source: oa.term_source.as_deref().map(|s| strings.intern(s)),
            accession: oa.accession.as_deref().map(|s| strings.intern(s)),
        };
        self.inner.intern(entry)
    }

    /// Resolve an index back to an owned annotation.
    ///
    /// Requires the string table to be fully decoded; dangling string
    /// indices surface as [`CodecError::IndexOutOfRange`].
    pub fn resolve(
        &self,
        index: usize,
        strings: &StringTable,
    ) -> Result<OntologyAnnotation, CodecError> {
        let entry = self.inner.get(index).ok_or(CodecError::IndexOutOfRange {
            table: "oaTable",
            index,
        })?;
        Ok(OntologyAnnotation {
            name: strings.resolve(entry.name)?.to_string(),
            term_source: entry
                .term_source
                .map(|i| strings.resolve(i).map(str::to_string))
                .transpose()?,
            accession: entry
                .accession
                .map(|i| strings.resolve(i).map(str::to_string))
                .transpose()?,
        })
    }

    /// Number of interned annotations
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
                .map(|entry| {
                    let mut obj = json!({ "n": entry.name });
                    if let Some(ts) = entry.term_source {
                        obj["ts"] = json!(ts);
                    }
                    if let Some(a) = entry.accession {
                        obj["a"] = json!(a);
                    }
                    obj
                })
                .collect(),
        )
    }

    /// Deserialize from the wire array at `path`.
    ///
    /// Only the shape is checked here; string indices stay unresolved
    /// until [`Self::resolve`].
    pub fn from_wire(value: &Value, path: &str) -> Result<Self, CodecError> {
        let mut table = Self::new();
        for (i, raw) in wire::as_array(value, path)?.iter().enumerate() {
            let entry_path = format!("{path}[{i}]");
            let obj = wire::as_object(raw, &entry_path)?;
            let entry = AnnotationEntry {
                name: wire::as_index(wire::field(obj, &entry_path, "n")?, &wire::join(&entry_path, "n"))?,
                term_source: obj
                    .get("ts")
                    .map(|v| wire::as_index(v, &wire::join(&entry_path, "ts")))
                    .transpose()?,
                accession: obj
                    .get("a")
                    .map(|v| wire::as_index(v, &wire::join(&entry_path, "a")))
                    .transpose()?,
            };
            table.inner.push_decoded(entry);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_shares_strings() {
        let mut strings = StringTable::new();
        let mut oas = OntologyAnnotationTable::new();

        let organism = OntologyAnnotation::new("organism").with_term_source("OBI");
        let part = OntologyAnnotation::new("organism part").with_term_source("OBI");

        assert_eq!(oas.intern(&organism, &mut strings), 0);
        assert_eq!(oas.intern(&part, &mut strings), 1);
        assert_eq!(oas.intern(&organism, &mut strings), 0);

        // "OBI" interned once across both records
        assert_eq!(strings.len(), 3);
        assert_eq!(oas.len(), 2);
    }

    #[test]
    fn test_resolve_is_owned_copy() {
        let mut strings = StringTable::new();
        let mut oas = OntologyAnnotationTable::new();
        let oa = OntologyAnnotation::new("liver").with_accession("UBERON:0002107");
        let idx = oas.intern(&oa, &mut strings);

        let a = oas.resolve(idx, &strings).unwrap();
        let mut b = oas.resolve(idx, &strings).unwrap();
        b.name.push_str(" (edited)");
        assert_eq!(a, oa);
        assert_ne!(a, b);
    }

    #[test]
    fn test_wire_roundtrip() {
        let mut strings = StringTable::new();
        let mut oas = OntologyAnnotationTable::new();
        oas.intern(
            &OntologyAnnotation::new("organism").with_term_source("OBI"),
            &mut strings,
        );
        oas.intern(&OntologyAnnotation::new("plain"), &mut strings);

        let wire = oas.to_wire();
        let back = OntologyAnnotationTable::from_wire(&wire, "oaTable").unwrap();
        assert_eq!(
            back.resolve(0, &strings).unwrap(),
            OntologyAnnotation::new("organism").with_term_source("OBI")
        );
        assert_eq!(back.resolve(1, &strings).unwrap(), OntologyAnnotation::new("plain"));
    }

    #[test]
    fn test_from_wire_missing_name() {
        let err =
            OntologyAnnotationTable::from_wire(&serde_json::json!([{"ts": 0}]), "oaTable")
                .unwrap_err();
        assert_eq!(err.to_string(), "missing required field at oaTable[0].n");
    }

    #[test]
    fn test_resolve_dangling_string_index() {
        let oas =
            OntologyAnnotationTable::from_wire(&serde_json::json!([{"n": 9}]), "oaTable").unwrap();
        let err = oas.resolve(0, &StringTable::new()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::IndexOutOfRange { table: "stringTable", index: 9 }
        ));
    }
}
