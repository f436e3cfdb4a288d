//! Creation of the model values the parser produces.

use oxowl::{
    AnnotationProperty, DataProperty, Datatype, Entity, EntityKind, Individual, ObjectProperty,
    OwlClass, OwlError,
};
use oxrdf::{BlankNode, Literal, NamedNode};

/// Instantiates entities, individuals and literals on behalf of the parser.
///
/// Every method has a default implementation building the plain [`oxowl`] values,
/// so an embedding system only overrides what it needs to intercept.
pub trait EntityFactory {
    fn class(&self, iri: NamedNode) -> OwlClass {
        OwlClass::new(iri)
    }

    fn object_property(&self, iri: NamedNode) -> ObjectProperty {
        ObjectProperty::new(iri)
    }

    fn data_property(&self, iri: NamedNode) -> DataProperty {
        DataProperty::new(iri)
    }

    fn annotation_property(&self, iri: NamedNode) -> AnnotationProperty {
        AnnotationProperty::new(iri)
    }

    fn named_individual(&self, iri: NamedNode) -> NamedNode {
        iri
    }

    fn datatype(&self, iri: NamedNode) -> Datatype {
        Datatype::new(iri)
    }

    /// An anonymous individual written `_:label`.
    ///
    /// The same label always gives the same individual.
    fn anonymous_individual(&self, label: &str) -> Result<Individual, OwlError> {
        BlankNode::new(label)
            .map(Individual::Anonymous)
            .map_err(|e| OwlError::Other(format!("Invalid anonymous individual _:{label}: {e}")))
    }

    fn typed_literal(&self, value: String, datatype: &Datatype) -> Literal {
        Literal::new_typed_literal(value, datatype.iri().clone())
    }

    fn language_tagged_literal(&self, value: String, language: String) -> Literal {
        Literal::new_language_tagged_literal_unchecked(value, language)
    }

    fn simple_literal(&self, value: String) -> Literal {
        Literal::new_simple_literal(value)
    }

    /// Builds the entity of the given kind.
    fn entity(&self, kind: EntityKind, iri: NamedNode) -> Entity {
        match kind {
            EntityKind::Class => Entity::Class(self.class(iri)),
            EntityKind::ObjectProperty => Entity::ObjectProperty(self.object_property(iri)),
            EntityKind::DataProperty => Entity::DataProperty(self.data_property(iri)),
            EntityKind::AnnotationProperty => {
                Entity::AnnotationProperty(self.annotation_property(iri))
            }
            EntityKind::NamedIndividual => Entity::NamedIndividual(self.named_individual(iri)),
            EntityKind::Datatype => Entity::Datatype(self.datatype(iri)),
        }
    }
}

/// The factory used when none is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultEntityFactory;

impl EntityFactory for DefaultEntityFactory {}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::xsd;

    #[test]
    fn test_default_factory() {
        let factory = DefaultEntityFactory;
        let iri = NamedNode::new_unchecked("http://ex.org/A");
        assert_eq!(
            factory.entity(EntityKind::Class, iri.clone()),
            Entity::Class(OwlClass::new(iri.clone()))
        );
        assert_eq!(
            factory.entity(EntityKind::NamedIndividual, iri.clone()),
            Entity::NamedIndividual(iri)
        );
        assert_eq!(
            factory.typed_literal("1".into(), &Datatype::from(xsd::INTEGER)),
            Literal::new_typed_literal("1", xsd::INTEGER)
        );
    }

    #[test]
    fn test_anonymous_individuals_are_stable() {
        let factory = DefaultEntityFactory;
        assert_eq!(
            factory.anonymous_individual("b1").unwrap(),
            factory.anonymous_individual("b1").unwrap()
        );
        assert!(factory.anonymous_individual("").is_err());
    }
}
