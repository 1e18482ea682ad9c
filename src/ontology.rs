//! # Ontology Annotations
//!
//! This module provides the structured term-reference type used throughout
//! the annotated-table model. An ontology annotation names a concept in a
//! controlled vocabulary (e.g., an OBO ontology) by display name, source
//! ontology, and accession.
//!
//! Annotations compare structurally: two annotations are equal iff all
//! three fields are equal. This is the equality the interning tables in
//! [`crate::codec`] rely on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured ontology term reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OntologyAnnotation {
    /// Human-readable term name (e.g., "organism")
    pub name: String,
    /// Source ontology reference (e.g., "OBI")
    #[serde(rename = "termSource", skip_serializing_if = "Option::is_none")]
    pub term_source: Option<String>,
    /// Term accession (e.g., "OBI:0100026")
    #[serde(rename = "termAccession", skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
}

impl OntologyAnnotation {
    /// Create a new annotation with just a display name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            term_source: None,
            accession: None,
        }
    }

    /// Add a term-source reference
    pub fn with_term_source(mut self, source: &str) -> Self {
        self.term_source = Some(source.to_string());
        self
    }

    /// Add an accession string
    pub fn with_accession(mut self, accession: &str) -> Self {
        self.accession = Some(accession.to_string());
        self
    }
}

impl fmt::Display for OntologyAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.accession {
            Some(acc) => write!(f, "[{}: {}]", acc, self.name),
            None => write!(f, "[{}]", self.name),
        }
    }
}
