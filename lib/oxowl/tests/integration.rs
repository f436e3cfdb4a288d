//! Building ontologies through the public API.

use oxowl::{
    Annotation, AnnotationProperty, AnnotationSubject, Axiom, ClassExpression, DataRange,
    Datatype, Entity, EntityKind, Individual, ObjectProperty, ObjectPropertyExpression, Ontology,
    OwlClass, OwlError,
};
use oxrdf::vocab::{rdfs, xsd};
use oxrdf::{BlankNode, Literal, NamedNode};

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.org/{local}"))
}

fn animals() -> Ontology {
    let mut ontology = Ontology::with_iri("http://example.org/animals").unwrap();
    for class in ["Animal", "Dog", "Cat"] {
        ontology.add_axiom(Axiom::declaration(Entity::new(EntityKind::Class, ex(class))));
    }
    ontology.add_axiom(Axiom::subclass_of(
        OwlClass::new(ex("Dog")),
        OwlClass::new(ex("Animal")),
    ));
    ontology.add_axiom(Axiom::subclass_of(
        OwlClass::new(ex("Cat")),
        OwlClass::new(ex("Animal")),
    ));
    ontology.add_axiom(Axiom::DisjointClasses(vec![
        OwlClass::new(ex("Dog")).into(),
        OwlClass::new(ex("Cat")).into(),
    ]));
    ontology
}

#[test]
fn test_class_hierarchy() {
    let ontology = animals();
    assert_eq!(ontology.classes().count(), 3);
    assert!(ontology.contains_class(&OwlClass::new(ex("Dog"))));
    assert!(!ontology.contains_class(&OwlClass::new(ex("Bird"))));
    assert_eq!(
        ontology.axioms()[3],
        Axiom::SubClassOf {
            sub_class: ClassExpression::Class(OwlClass::new(ex("Dog"))),
            super_class: ClassExpression::Class(OwlClass::new(ex("Animal"))),
        }
    );
    assert_eq!(ontology.to_string(), "Ontology(<http://example.org/animals>) [6 axioms]");
}

#[test]
fn test_individuals_and_types() {
    let mut ontology = animals();
    let rex = Individual::Named(ex("rex"));
    let stray = Individual::Anonymous(BlankNode::new_unchecked("stray"));
    ontology.add_axiom(Axiom::declaration(Entity::new(
        EntityKind::NamedIndividual,
        ex("rex"),
    )));
    ontology.add_axiom(Axiom::class_assertion(OwlClass::new(ex("Dog")), rex.clone()));
    ontology.add_axiom(Axiom::class_assertion(
        ClassExpression::some_values_from(
            ObjectProperty::new(ex("chases")),
            ClassExpression::complement(OwlClass::new(ex("Dog")).into()),
        ),
        rex,
    ));
    ontology.add_axiom(Axiom::class_assertion(OwlClass::new(ex("Cat")), stray));

    assert_eq!(ontology.individuals().collect::<Vec<_>>(), [&ex("rex")]);
    assert!(ontology.is_declared(&ex("rex"), EntityKind::NamedIndividual));
    assert!(!ontology.is_declared(&ex("stray"), EntityKind::NamedIndividual));
    assert_eq!(ontology.axiom_count(), 10);
}

#[test]
fn test_properties_and_data_ranges() {
    let mut ontology = Ontology::new(None);
    let owns = ObjectProperty::new(ex("owns"));
    ontology.add_axiom(Axiom::InverseObjectProperties(
        owns.clone().into(),
        ObjectPropertyExpression::inverse(owns),
    ));

    let adult_age = Datatype::new(ex("AdultAge"));
    ontology.add_axiom(Axiom::DatatypeDefinition {
        datatype: adult_age,
        range: DataRange::DatatypeRestriction {
            datatype: Datatype::new(xsd::INTEGER.into_owned()),
            facets: vec![(
                NamedNode::new_unchecked("http://www.w3.org/2001/XMLSchema#minInclusive"),
                Literal::new_typed_literal("18", xsd::INTEGER),
            )],
        },
    });
    assert_eq!(ontology.axiom_count(), 2);
    assert_eq!(ontology.datatypes().count(), 0);

    ontology.add_axiom(Axiom::declaration(Entity::new(
        EntityKind::Datatype,
        ex("AdultAge"),
    )));
    assert_eq!(
        ontology.datatypes().collect::<Vec<_>>(),
        [&Datatype::new(ex("AdultAge"))]
    );
    assert_eq!(ontology.declared_kinds(&ex("AdultAge")), [EntityKind::Datatype]);
}

#[test]
fn test_annotations() {
    let mut ontology = animals();
    let label = AnnotationProperty::new(rdfs::LABEL.into_owned());
    let mut annotation = Annotation::new(
        label.clone(),
        Literal::new_language_tagged_literal_unchecked("chien", "fr"),
    );
    annotation
        .annotations
        .push(Annotation::new(label.clone(), ex("source")));
    ontology.add_annotated_axiom(
        Axiom::AnnotationAssertion {
            property: label.clone(),
            subject: AnnotationSubject::Iri(ex("Dog")),
            value: Literal::new_simple_literal("dog").into(),
        },
        vec![annotation.clone()],
    );
    ontology.add_annotation(Annotation::new(label, Literal::new_simple_literal("Animals")));

    let (_, annotations) = ontology.annotated_axioms().last().unwrap();
    assert_eq!(annotations, [annotation]);
    assert_eq!(ontology.annotations().len(), 1);
    assert_eq!(ontology.annotated_axioms().count(), ontology.axiom_count());
}

#[test]
fn test_header() {
    let mut ontology = animals();
    ontology.set_version_iri(Some(ex("animals/1.0")));
    ontology.add_import(ex("base"));
    ontology.add_import(ex("base"));
    assert_eq!(ontology.iri(), Some(&ex("animals")));
    assert_eq!(ontology.version_iri(), Some(&ex("animals/1.0")));
    assert_eq!(ontology.imports(), [ex("base")]);

    ontology.set_iri(None);
    assert_eq!(ontology.to_string(), "Ontology(anonymous) [6 axioms]");
}

#[test]
fn test_entities() {
    let dog = OwlClass::new_from_iri("http://example.org/Dog").unwrap();
    assert_eq!(dog.clone().into_inner(), ex("Dog"));
    assert!(OwlClass::new_from_iri("not an iri").is_err());
    assert!(matches!(
        Ontology::with_iri("not an iri"),
        Err(OwlError::InvalidIri(_))
    ));

    let entity = Entity::new(EntityKind::Class, ex("Dog"));
    assert_eq!(entity.kind(), EntityKind::Class);
    assert_eq!(entity.iri(), &ex("Dog"));
    let declaration = Axiom::declaration(entity.clone());
    assert_eq!(declaration.declared_entity(), Some(entity));
    assert_eq!(Axiom::subclass_of(dog.clone(), dog).declared_entity(), None);
}
