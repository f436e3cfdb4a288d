//! Annotations attached to entities, axioms and ontologies.

use crate::entity::AnnotationProperty;
use oxrdf::{BlankNode, Literal, NamedNode};
use std::fmt;

/// The value of an annotation: an IRI, an anonymous individual or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    Iri(NamedNode),
    Anonymous(BlankNode),
    Literal(Literal),
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(n) => n.fmt(f),
            Self::Anonymous(b) => b.fmt(f),
            Self::Literal(l) => l.fmt(f),
        }
    }
}

impl From<NamedNode> for AnnotationValue {
    fn from(node: NamedNode) -> Self {
        Self::Iri(node)
    }
}

impl From<Literal> for AnnotationValue {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// The subject of an annotation assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationSubject {
    Iri(NamedNode),
    Anonymous(BlankNode),
}

impl fmt::Display for AnnotationSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(n) => n.fmt(f),
            Self::Anonymous(b) => b.fmt(f),
        }
    }
}

impl From<NamedNode> for AnnotationSubject {
    fn from(node: NamedNode) -> Self {
        Self::Iri(node)
    }
}

/// An annotation `property value`, possibly annotated itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub property: AnnotationProperty,
    pub value: AnnotationValue,
    pub annotations: Vec<Annotation>,
}

impl Annotation {
    pub fn new(property: AnnotationProperty, value: impl Into<AnnotationValue>) -> Self {
        Self {
            property,
            value: value.into(),
            annotations: Vec::new(),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property, self.value)
    }
}
