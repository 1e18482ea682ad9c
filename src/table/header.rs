use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ontology::OntologyAnnotation;

/// The kind of identifier an input/output column carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IoType {
    /// A source material identifier
    Source,
    /// A sample identifier
    Sample,
    /// A data-file identifier
    Data,
    /// A generic material identifier
    Material,
    /// A non-standard identifier kind
    FreeText(String),
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoType::Source => write!(f, "Source"),
            IoType::Sample => write!(f, "Sample"),
            IoType::Data => write!(f, "Data"),
            IoType::Material => write!(f, "Material"),
            IoType::FreeText(s) => write!(f, "{s}"),
        }
    }
}

/// A typed column header.
///
/// Headers are serialized verbatim on the wire (they are never interned),
/// using an adjacently tagged JSON form:
/// `{"headertype": "Characteristic", "values": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "headertype", content = "values")]
pub enum CompositeHeader {
    /// Input identifier column (IO-type)
    Input(IoType),
    /// Output identifier column (IO-type)
    Output(IoType),
    /// A characteristic annotated with an ontology term
    Characteristic(OntologyAnnotation),
    /// A protocol parameter annotated with an ontology term
    Parameter(OntologyAnnotation),
    /// An experimental factor annotated with an ontology term
    Factor(OntologyAnnotation),
    /// A protocol component annotated with an ontology term
    Component(OntologyAnnotation),
    /// Reference to a named protocol
    ProtocolRef,
    /// An untyped free-text column
    FreeText(String),
}

impl CompositeHeader {
    /// Whether this column holds input/output/data identifiers.
    ///
    /// IO-type columns are exempt from run-length compression: identifier
    /// columns rarely repeat, so the codec always stores them literally.
    pub fn is_io_type(&self) -> bool {
        matches!(self, CompositeHeader::Input(_) | CompositeHeader::Output(_))
    }
}

impl fmt::Display for CompositeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeHeader::Input(io) => write!(f, "Input [{io}]"),
            CompositeHeader::Output(io) => write!(f, "Output [{io}]"),
            CompositeHeader::Characteristic(oa) => write!(f, "Characteristic [{}]", oa.name),
            CompositeHeader::Parameter(oa) => write!(f, "Parameter [{}]", oa.name),
            CompositeHeader::Factor(oa) => write!(f, "Factor [{}]", oa.name),
            CompositeHeader::Component(oa) => write!(f, "Component [{}]", oa.name),
            CompositeHeader::ProtocolRef => write!(f, "Protocol REF"),
            CompositeHeader::FreeText(s) => write!(f, "{s}"),
        }
    }
}
