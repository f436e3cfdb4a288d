#![allow(clippy::panic_in_result_fn)]

use oxmanchester::{
    BidirectionalShortFormProvider, ManchesterErrorKind, ManchesterParser, ParserConfig,
};
use oxowl::{
    Annotation, AnnotationProperty, AnnotationSubject, Axiom, ClassExpression, Entity, EntityKind,
    Individual, ObjectProperty, ObjectPropertyExpression, Ontology, OwlClass,
};
use oxrdf::vocab::rdfs;
use oxrdf::{Literal, NamedNode};
use std::error::Error;
use std::io::{self, Read};

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://ex.org/{local}"))
}

fn class(local: &str) -> OwlClass {
    OwlClass::new(ex(local))
}

const PIZZA: &str = r#"# A small pizza ontology
Prefix: : <http://ex.org/>
Ontology: <http://ex.org/pizza>
    Annotations: rdfs:label "Pizza"@en

ObjectProperty: :hasTopping
    Domain: :Pizza
    Characteristics: Functional, Transitive

DataProperty: :price
    Range: xsd:decimal

Class: :Pizza
    Annotations: rdfs:comment "A pizza"
    SubClassOf: :hasTopping some :Topping, :price exactly 1

Class: :Topping

Class: :Margherita
    EquivalentTo: :Pizza and (:hasTopping only (:Mozzarella or :Tomato))

Class: :Mozzarella
    SubClassOf: :Topping

Class: :Tomato
    SubClassOf: :Topping
    DisjointWith: :Mozzarella

Individual: :m1
    Types: :Margherita
    Facts: :price 7.5, :hasTopping :t1

Individual: :t1
    Types: :Tomato

DisjointClasses: :Pizza, :Topping
"#;

#[test]
fn test_scenario_single_class() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    ManchesterParser::new().parse_str(
        "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :A\n",
        &mut ontology,
    )?;
    assert_eq!(ontology.iri(), Some(&ex("onto")));
    assert_eq!(ontology.classes().collect::<Vec<_>>(), [&class("A")]);
    assert_eq!(
        ontology.axioms(),
        [Axiom::declaration(Entity::new(EntityKind::Class, ex("A")))]
    );
    Ok(())
}

#[test]
fn test_scenario_missing_header() {
    let mut ontology = Ontology::new(None);
    let error = ManchesterParser::new()
        .parse_str("Class: :A\n", &mut ontology)
        .unwrap_err();
    assert_eq!(error.kind(), ManchesterErrorKind::PreflightFormat);
    assert_eq!((error.line(), error.column()), (1, 1));
    assert_eq!(ontology.axiom_count(), 0);
}

#[test]
fn test_scenario_unknown_entity() {
    let mut ontology = Ontology::new(None);
    let error = ManchesterParser::new()
        .parse_str(
            "# comment\n\nOntology: <http://ex.org/onto>\nClass: :A\nSubClassOf: :B\n",
            &mut ontology,
        )
        .unwrap_err();
    assert_eq!(error.kind(), ManchesterErrorKind::UnknownEntity);
    assert_eq!((error.line(), error.column()), (5, 13));
    assert_eq!(
        error.to_string(),
        "Parser error at line 5 column 13: :B is not a known class"
    );
}

/// Returns its data in small chunks then fails
struct InterruptedRead {
    data: &'static [u8],
}

impl Read for InterruptedRead {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream closed"));
        }
        let len = buf.len().min(self.data.len()).min(8);
        buf[..len].copy_from_slice(&self.data[..len]);
        self.data = &self.data[len..];
        Ok(len)
    }
}

#[test]
fn test_scenario_source_failure() {
    let mut ontology = Ontology::new(None);
    let error = ManchesterParser::new()
        .parse_read(
            InterruptedRead {
                data: b"Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :A\n",
            },
            &mut ontology,
        )
        .unwrap_err();
    assert_eq!(error.kind(), ManchesterErrorKind::SourceAccess);
    assert_eq!((error.line(), error.column()), (1, 1));
    assert!(error.to_string().contains("stream closed"));
    // Nothing read before the failure reaches the ontology
    assert_eq!(ontology, Ontology::new(None));
}

#[test]
fn test_parse_read_matches_parse_str() -> Result<(), Box<dyn Error>> {
    let mut from_str = Ontology::new(None);
    let format = ManchesterParser::new().parse_str(PIZZA, &mut from_str)?;
    let mut from_read = Ontology::new(None);
    let read_format = ManchesterParser::new().parse_read(PIZZA.as_bytes(), &mut from_read)?;
    assert_eq!(from_str, from_read);
    assert_eq!(format, read_format);
    Ok(())
}

#[test]
fn test_full_document() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    let format = ManchesterParser::new().parse_str(PIZZA, &mut ontology)?;
    assert_eq!(format.prefixes().namespace(""), Some("http://ex.org/"));

    assert_eq!(ontology.annotations().len(), 1);
    assert_eq!(ontology.classes().count(), 5);
    assert_eq!(ontology.object_properties().count(), 1);
    assert_eq!(ontology.data_properties().count(), 1);
    assert_eq!(ontology.individuals().count(), 2);

    let has_topping = ObjectPropertyExpression::ObjectProperty(ObjectProperty::new(ex("hasTopping")));
    assert!(ontology.axioms().contains(&Axiom::subclass_of(
        class("Pizza"),
        ClassExpression::ObjectSomeValuesFrom {
            property: has_topping.clone(),
            filler: Box::new(class("Topping").into()),
        }
    )));
    assert!(ontology.axioms().contains(&Axiom::EquivalentClasses(vec![
        class("Margherita").into(),
        ClassExpression::ObjectIntersectionOf(vec![
            class("Pizza").into(),
            ClassExpression::ObjectAllValuesFrom {
                property: has_topping.clone(),
                filler: Box::new(ClassExpression::ObjectUnionOf(vec![
                    class("Mozzarella").into(),
                    class("Tomato").into(),
                ])),
            },
        ]),
    ])));
    assert!(ontology.axioms().contains(&Axiom::FunctionalObjectProperty(has_topping.clone())));
    assert!(ontology.axioms().contains(&Axiom::TransitiveObjectProperty(has_topping.clone())));
    assert!(ontology.axioms().contains(&Axiom::ObjectPropertyAssertion {
        property: has_topping,
        source: Individual::Named(ex("m1")),
        target: Individual::Named(ex("t1")),
    }));
    assert!(ontology.axioms().contains(&Axiom::DisjointClasses(vec![
        class("Pizza").into(),
        class("Topping").into(),
    ])));
    assert!(ontology.axioms().contains(&Axiom::AnnotationAssertion {
        property: AnnotationProperty::new(rdfs::COMMENT.into_owned()),
        subject: AnnotationSubject::Iri(ex("Pizza")),
        value: Literal::new_simple_literal("A pizza").into(),
    }));
    Ok(())
}

#[test]
fn test_parsing_twice_gives_the_same_ontology() -> Result<(), Box<dyn Error>> {
    let mut first = Ontology::new(None);
    let first_format = ManchesterParser::new().parse_str(PIZZA, &mut first)?;
    let mut second = Ontology::new(None);
    let second_format = ManchesterParser::new().parse_str(PIZZA, &mut second)?;
    assert_eq!(first, second);
    assert_eq!(first_format, second_format);
    Ok(())
}

#[test]
fn test_completed_frames_are_kept_after_a_failure() {
    let mut ontology = Ontology::new(None);
    let error = ManchesterParser::new()
        .parse_str(
            "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :A\nClass: :B\n    SubClassOf: :A and )\n",
            &mut ontology,
        )
        .unwrap_err();
    assert_eq!(error.kind(), ManchesterErrorKind::Syntax);
    assert_eq!((error.line(), error.column()), (5, 24));
    // The header and the first frame are committed, the failing frame is not
    assert_eq!(ontology.iri(), Some(&ex("onto")));
    assert_eq!(
        ontology.axioms(),
        [Axiom::declaration(Entity::new(EntityKind::Class, ex("A")))]
    );
}

#[test]
fn test_default_ontology_is_only_used_for_resolution() -> Result<(), Box<dyn Error>> {
    let mut default_ontology = Ontology::new(Some(ex("animals")));
    default_ontology.add_axiom(Axiom::declaration(Entity::new(
        EntityKind::Class,
        ex("Animal"),
    )));
    let before = default_ontology.clone();

    let mut ontology = Ontology::new(None);
    ManchesterParser::new()
        .with_default_ontology(&default_ontology)
        .parse_str(
            "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/pets>\nClass: :Cat\n    SubClassOf: :Animal\n",
            &mut ontology,
        )?;
    assert_eq!(default_ontology, before);
    assert_eq!(ontology.iri(), Some(&ex("pets")));
    assert_eq!(
        ontology.axioms(),
        [
            Axiom::declaration(Entity::new(EntityKind::Class, ex("Cat"))),
            Axiom::subclass_of(class("Cat"), class("Animal")),
        ]
    );
    assert!(!ontology.is_declared(&ex("Animal"), EntityKind::Class));
    Ok(())
}

#[test]
fn test_names_declared_in_the_target_ontology_resolve() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    ManchesterParser::new().parse_str(
        "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :A\n",
        &mut ontology,
    )?;
    ManchesterParser::new().parse_str(
        "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :B\n    SubClassOf: :A\n",
        &mut ontology,
    )?;
    assert!(ontology
        .axioms()
        .contains(&Axiom::subclass_of(class("B"), class("A"))));
    Ok(())
}

#[test]
fn test_short_form_provider() -> Result<(), Box<dyn Error>> {
    let person = NamedNode::new("http://other.org/Person")?;
    let mut provider = BidirectionalShortFormProvider::new();
    provider.add("Person", Entity::new(EntityKind::Class, person.clone()));

    let mut ontology = Ontology::new(None);
    ManchesterParser::new()
        .with_short_form_provider(&provider)
        .parse_str(
            "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nIndividual: :bob\n    Types: Person\n",
            &mut ontology,
        )?;
    assert!(ontology.axioms().contains(&Axiom::class_assertion(
        OwlClass::new(person),
        Individual::Named(ex("bob"))
    )));

    let error = ManchesterParser::new()
        .parse_str(
            "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nIndividual: :bob\n    Types: Person\n",
            &mut Ontology::new(None),
        )
        .unwrap_err();
    assert_eq!(error.kind(), ManchesterErrorKind::UnknownEntity);
    Ok(())
}

#[test]
fn test_lenient_mode_creates_missing_entities() -> Result<(), Box<dyn Error>> {
    let document = "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nIndividual: :bob\n    Types: :Person\n    Facts: :age 42, :knows :alice\n";

    let error = ManchesterParser::new()
        .parse_str(document, &mut Ontology::new(None))
        .unwrap_err();
    assert_eq!(error.kind(), ManchesterErrorKind::UnknownEntity);
    assert_eq!((error.line(), error.column()), (4, 12));

    let mut ontology = Ontology::new(None);
    ManchesterParser::new()
        .with_config(ParserConfig::new().lenient())
        .parse_str(document, &mut ontology)?;
    assert!(ontology.is_declared(&ex("Person"), EntityKind::Class));
    assert!(ontology.is_declared(&ex("age"), EntityKind::DataProperty));
    assert!(ontology.is_declared(&ex("knows"), EntityKind::ObjectProperty));
    assert!(ontology.is_declared(&ex("alice"), EntityKind::NamedIndividual));
    Ok(())
}

#[test]
fn test_forward_references() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    ManchesterParser::new().parse_str(
        "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :A\n    SubClassOf: :p some :B\nObjectProperty: :p\nClass: :B\n",
        &mut ontology,
    )?;
    assert_eq!(ontology.axiom_count(), 4);
    Ok(())
}

#[test]
fn test_preset_prefix() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    let format = ManchesterParser::new()
        .with_prefix("ex", "http://ex.org/")?
        .parse_str("Ontology:\nClass: ex:A\n", &mut ontology)?;
    assert_eq!(ontology.iri(), None);
    assert!(ontology.contains_class(&class("A")));
    assert_eq!(format.prefixes().namespace("ex"), Some("http://ex.org/"));
    Ok(())
}

#[test]
fn test_annotated_axioms() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    ManchesterParser::new().parse_str(
        "Prefix: : <http://ex.org/>\nOntology: <http://ex.org/onto>\nClass: :B\nClass: :A\n    SubClassOf: Annotations: rdfs:comment \"checked\" :B\n",
        &mut ontology,
    )?;
    let (axiom, annotations) = ontology
        .annotated_axioms()
        .find(|(axiom, _)| matches!(axiom, Axiom::SubClassOf { .. }))
        .ok_or("no SubClassOf axiom")?;
    assert_eq!(axiom, &Axiom::subclass_of(class("A"), class("B")));
    assert_eq!(
        annotations,
        [Annotation::new(
            AnnotationProperty::new(rdfs::COMMENT.into_owned()),
            Literal::new_simple_literal("checked"),
        )]
    );
    Ok(())
}

#[test]
fn test_lexical_error_position() {
    let error = ManchesterParser::new()
        .parse_str(
            "Ontology: <http://ex.org/onto>\nClass: <http://ex.org/A>\n    Annotations: rdfs:label \"unterminated\n",
            &mut Ontology::new(None),
        )
        .unwrap_err();
    assert_eq!(error.kind(), ManchesterErrorKind::Lexical);
    assert_eq!(error.line(), 3);
}
