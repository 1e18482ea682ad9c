use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ontology::OntologyAnnotation;

/// A reference to a data file, as held by a data cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataFile {
    /// File name or path
    pub name: String,
    /// MIME type or format descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Selector format for addressing into the file
    #[serde(rename = "selectorFormat", skip_serializing_if = "Option::is_none")]
    pub selector_format: Option<String>,
}

impl DataFile {
    /// Create a data-file reference with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            format: None,
            selector_format: None,
        }
    }

    /// Add a format descriptor
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Add a selector format
    pub fn with_selector_format(mut self, selector: &str) -> Self {
        self.selector_format = Some(selector.to_string());
        self
    }
}

/// One tagged value occupying a table's (column, row) slot.
///
/// Cells compare structurally: two cells are equal iff their tags and all
/// payload fields are equal. The cell interning table depends on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// An ontology term reference
    Term(OntologyAnnotation),
    /// Free text
    FreeText(String),
    /// A value paired with an ontology-annotation unit
    Unitized {
        /// The textual value (numeric values are carried as text)
        value: String,
        /// The unit annotation
        unit: OntologyAnnotation,
    },
    /// A data-file reference
    Data(DataFile),
}

impl Cell {
    /// Convenience constructor for a term cell
    pub fn term(oa: OntologyAnnotation) -> Self {
        Cell::Term(oa)
    }

    /// Convenience constructor for a free-text cell
    pub fn text(s: &str) -> Self {
        Cell::FreeText(s.to_string())
    }

    /// Convenience constructor for a unitized cell
    pub fn unitized(value: &str, unit: OntologyAnnotation) -> Self {
        Cell::Unitized {
            value: value.to_string(),
            unit,
        }
    }

    /// Convenience constructor for a data cell
    pub fn data(file: DataFile) -> Self {
        Cell::Data(file)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::FreeText(String::new())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Term(oa) => write!(f, "{}", oa.name),
            Cell::FreeText(s) => write!(f, "{s}"),
            Cell::Unitized { value, unit } => write!(f, "{value} {}", unit.name),
            Cell::Data(d) => write!(f, "{}", d.name),
        }
    }
}
