//! OWL 2 entities (classes, properties, individuals, datatypes).

use oxrdf::{BlankNode, NamedNode, NamedNodeRef, Term};
use std::fmt;

macro_rules! named_entity {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NamedNode);

        impl $name {
            #[inline]
            pub fn new(iri: NamedNode) -> Self {
                Self(iri)
            }

            /// Builds the entity from an IRI string, validating it.
            #[inline]
            pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, oxiri::IriParseError> {
                Ok(Self(NamedNode::new(iri)?))
            }

            #[inline]
            pub fn iri(&self) -> &NamedNode {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> NamedNode {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<NamedNode> for $name {
            #[inline]
            fn from(node: NamedNode) -> Self {
                Self(node)
            }
        }

        impl From<NamedNodeRef<'_>> for $name {
            #[inline]
            fn from(node: NamedNodeRef<'_>) -> Self {
                Self(node.into_owned())
            }
        }

        impl From<$name> for NamedNode {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0
            }
        }

        impl From<$name> for Term {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0.into()
            }
        }

        impl AsRef<NamedNode> for $name {
            #[inline]
            fn as_ref(&self) -> &NamedNode {
                &self.0
            }
        }
    };
}

named_entity!(
    /// An OWL class (owl:Class).
    ///
    /// Classes are sets of individuals. Every class is a subclass of owl:Thing
    /// and a superclass of owl:Nothing.
    OwlClass
);

named_entity!(
    /// An OWL object property (owl:ObjectProperty).
    ///
    /// Object properties relate individuals to individuals.
    ObjectProperty
);

named_entity!(
    /// An OWL data property (owl:DatatypeProperty).
    ///
    /// Data properties relate individuals to literals.
    DataProperty
);

named_entity!(
    /// An OWL annotation property (owl:AnnotationProperty).
    ///
    /// Annotation properties carry metadata and have no logical meaning.
    AnnotationProperty
);

named_entity!(
    /// A datatype (rdfs:Datatype) such as `xsd:integer`.
    Datatype
);

/// An OWL individual (named or anonymous).
///
/// Named individuals are identified by IRIs, anonymous individuals by blank nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    /// A named individual (identified by an IRI).
    Named(NamedNode),
    /// An anonymous individual (blank node).
    Anonymous(BlankNode),
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => n.fmt(f),
            Self::Anonymous(b) => b.fmt(f),
        }
    }
}

impl From<NamedNode> for Individual {
    fn from(node: NamedNode) -> Self {
        Self::Named(node)
    }
}

impl From<BlankNode> for Individual {
    fn from(node: BlankNode) -> Self {
        Self::Anonymous(node)
    }
}

impl From<Individual> for Term {
    fn from(individual: Individual) -> Self {
        match individual {
            Individual::Named(n) => n.into(),
            Individual::Anonymous(b) => b.into(),
        }
    }
}

/// The six kinds of named OWL entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Class,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
    Datatype,
}

impl EntityKind {
    /// All kinds, in the order used when a name has to be disambiguated.
    pub const ALL: [Self; 6] = [
        Self::Class,
        Self::ObjectProperty,
        Self::DataProperty,
        Self::AnnotationProperty,
        Self::NamedIndividual,
        Self::Datatype,
    ];

    /// The Manchester Syntax frame keyword declaring an entity of this kind.
    pub fn frame_keyword(self) -> &'static str {
        match self {
            Self::Class => "Class:",
            Self::ObjectProperty => "ObjectProperty:",
            Self::DataProperty => "DataProperty:",
            Self::AnnotationProperty => "AnnotationProperty:",
            Self::NamedIndividual => "Individual:",
            Self::Datatype => "Datatype:",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Class => "class",
            Self::ObjectProperty => "object property",
            Self::DataProperty => "data property",
            Self::AnnotationProperty => "annotation property",
            Self::NamedIndividual => "individual",
            Self::Datatype => "datatype",
        })
    }
}

/// A named entity together with its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Class(OwlClass),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
    NamedIndividual(NamedNode),
    Datatype(Datatype),
}

impl Entity {
    /// Builds the entity of the given kind for an IRI.
    pub fn new(kind: EntityKind, iri: NamedNode) -> Self {
        match kind {
            EntityKind::Class => Self::Class(OwlClass::new(iri)),
            EntityKind::ObjectProperty => Self::ObjectProperty(ObjectProperty::new(iri)),
            EntityKind::DataProperty => Self::DataProperty(DataProperty::new(iri)),
            EntityKind::AnnotationProperty => {
                Self::AnnotationProperty(AnnotationProperty::new(iri))
            }
            EntityKind::NamedIndividual => Self::NamedIndividual(iri),
            EntityKind::Datatype => Self::Datatype(Datatype::new(iri)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Class(_) => EntityKind::Class,
            Self::ObjectProperty(_) => EntityKind::ObjectProperty,
            Self::DataProperty(_) => EntityKind::DataProperty,
            Self::AnnotationProperty(_) => EntityKind::AnnotationProperty,
            Self::NamedIndividual(_) => EntityKind::NamedIndividual,
            Self::Datatype(_) => EntityKind::Datatype,
        }
    }

    pub fn iri(&self) -> &NamedNode {
        match self {
            Self::Class(e) => e.iri(),
            Self::ObjectProperty(e) => e.iri(),
            Self::DataProperty(e) => e.iri(),
            Self::AnnotationProperty(e) => e.iri(),
            Self::NamedIndividual(e) => e,
            Self::Datatype(e) => e.iri(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.iri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owl_class() {
        let iri = NamedNode::new_unchecked("http://example.org/Person");
        let class = OwlClass::new(iri.clone());
        assert_eq!(class.iri(), &iri);
        assert_eq!(class.to_string(), iri.to_string());
        assert_eq!(class.into_inner(), iri);
    }

    #[test]
    fn test_new_from_invalid_iri() {
        assert!(ObjectProperty::new_from_iri("not an iri").is_err());
        assert!(Datatype::new_from_iri("http://www.w3.org/2001/XMLSchema#integer").is_ok());
    }

    #[test]
    fn test_individual_to_term() {
        let iri = NamedNode::new_unchecked("http://example.org/Alice");
        assert_eq!(Term::from(Individual::Named(iri.clone())), Term::NamedNode(iri));
        let blank = BlankNode::new_unchecked("b1");
        let individual = Individual::Anonymous(blank.clone());
        assert_eq!(individual.to_string(), "_:b1");
        assert_eq!(Term::from(individual), Term::BlankNode(blank));
    }

    #[test]
    fn test_entity_kind_round_trip() {
        let iri = NamedNode::new_unchecked("http://example.org/x");
        for kind in EntityKind::ALL {
            let entity = Entity::new(kind, iri.clone());
            assert_eq!(entity.kind(), kind);
            assert_eq!(entity.iri(), &iri);
        }
    }

    #[test]
    fn test_entity_display() {
        let entity = Entity::new(
            EntityKind::DataProperty,
            NamedNode::new_unchecked("http://example.org/age"),
        );
        assert_eq!(entity.to_string(), "data property <http://example.org/age>");
        assert_eq!(EntityKind::NamedIndividual.frame_keyword(), "Individual:");
    }
}
