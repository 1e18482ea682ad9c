use serde_json::Value;

use super::wire;
use super::{CodecError, Interner};

/// Interning table for text values — the unit every other table builds on.
///
/// Wire form: a flat JSON array of strings, in index order.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    inner: Interner<String>,
}

impl StringTable {
    /// Create an empty string table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning its stable index
    pub fn intern(&mut self, s: &str) -> usize {
        self.inner.intern(s.to_string())
    }

    /// Resolve an index back to its string
    pub fn resolve(&self, index: usize) -> Result<&str, CodecError> {
        self.inner
            .get(index)
            .map(String::as_str)
            .ok_or(CodecError::IndexOutOfRange {
                table: "stringTable",
                index,
            })
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Serialize to the wire array
    pub fn to_wire(&self) -> Value {
        Value::Array(self.inner.iter().map(|s| Value::String(s.clone())).collect())
    }

    /// Deserialize from the wire array at `path`
    pub fn from_wire(value: &Value, path: &str) -> Result<Self, CodecError> {
        let mut table = Self::new();
        for (i, entry) in wire::as_array(value, path)?.iter().enumerate() {
            let s = wire::as_str(entry, &format!("{path}[{i}]"))?;
            table.inner.push_decoded(s.to_string());
        }
        Ok(table)
    }
}
