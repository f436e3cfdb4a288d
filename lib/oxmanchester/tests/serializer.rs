#![allow(clippy::panic_in_result_fn)]

use oxmanchester::{ManchesterParser, ManchesterSerializer};
use oxowl::{Annotation, Axiom, Ontology};
use std::collections::HashSet;
use std::error::Error;

const DOCUMENT: &str = r#"Prefix: : <http://ex.org/>
Prefix: foaf: <http://xmlns.com/foaf/0.1/>
Ontology: <http://ex.org/people> <http://ex.org/people/1.0>
    Import: <http://ex.org/base>
    Annotations: rdfs:label "People"@en, rdfs:comment "Who knows whom"

AnnotationProperty: :source
    Domain: foaf:Person

ObjectProperty: foaf:knows
    Domain: foaf:Person
    Range: foaf:Person
    Characteristics: Symmetric, Irreflexive
    SubPropertyChain: foaf:knows o foaf:knows

ObjectProperty: :friendOf
    SubPropertyOf: foaf:knows
    InverseOf: :friendOf

DataProperty: foaf:age
    Domain: foaf:Person
    Range: xsd:integer[>= 0, < 150]
    Characteristics: Functional

Datatype: :Adult
    EquivalentTo: xsd:integer[>= 18]

Class: foaf:Person
    Annotations: rdfs:label "Person", :source <http://xmlns.com/foaf/0.1/>
    SubClassOf: Annotations: rdfs:comment "everyone knows someone" foaf:knows some foaf:Person
    SubClassOf: foaf:age exactly 1
    HasKey: foaf:age

Class: :Parent
    EquivalentTo: foaf:Person and (:friendOf min 1 foaf:Person)
    DisjointUnionOf: :Mother, :Father

Class: :Mother

Class: :Father
    SubClassOf: not :Mother, {:bob, :carl} or (foaf:age value 42)

Individual: :alice
    Types: foaf:Person
    Facts: foaf:knows :bob, foaf:age 30, not foaf:knows :carl
    DifferentFrom: :bob

Individual: :bob
    Annotations: rdfs:label "Bob" , rdfs:comment "Bob\nsays \"hi\""
    SameAs: :robert

Individual: :carl

Individual: :robert

DisjointClasses: :Mother, :Father, :Parent
DifferentIndividuals: :alice, :bob, :carl
"#;

type AxiomSet = HashSet<(Axiom, Vec<Annotation>)>;

fn axiom_set(ontology: &Ontology) -> AxiomSet {
    ontology
        .annotated_axioms()
        .map(|(axiom, annotations)| (axiom.clone(), annotations.to_vec()))
        .collect()
}

#[test]
fn test_round_trip() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    let format = ManchesterParser::new().parse_str(DOCUMENT, &mut ontology)?;
    let rendered = ManchesterSerializer::new()
        .with_prefixes(format.prefixes())
        .serialize_to_string(&ontology);

    let mut reparsed = Ontology::new(None);
    ManchesterParser::new().parse_str(&rendered, &mut reparsed)?;
    assert_eq!(reparsed.iri(), ontology.iri());
    assert_eq!(reparsed.version_iri(), ontology.version_iri());
    assert_eq!(reparsed.imports(), ontology.imports());
    assert_eq!(reparsed.annotations(), ontology.annotations());
    assert_eq!(axiom_set(&reparsed), axiom_set(&ontology));
    Ok(())
}

#[test]
fn test_round_trip_without_prefixes() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    ManchesterParser::new().parse_str(DOCUMENT, &mut ontology)?;
    let rendered = ManchesterSerializer::new().serialize_to_string(&ontology);
    assert!(rendered.contains("<http://xmlns.com/foaf/0.1/Person>"));

    let mut reparsed = Ontology::new(None);
    ManchesterParser::new().parse_str(&rendered, &mut reparsed)?;
    assert_eq!(axiom_set(&reparsed), axiom_set(&ontology));
    Ok(())
}

#[test]
fn test_rendering_is_stable() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    let format = ManchesterParser::new().parse_str(DOCUMENT, &mut ontology)?;
    let serializer = ManchesterSerializer::new().with_prefixes(format.prefixes());
    let rendered = serializer.serialize_to_string(&ontology);

    let mut reparsed = Ontology::new(None);
    ManchesterParser::new().parse_str(&rendered, &mut reparsed)?;
    assert_eq!(serializer.serialize_to_string(&reparsed), rendered);
    Ok(())
}

#[test]
fn test_serialize_to_write() -> Result<(), Box<dyn Error>> {
    let mut ontology = Ontology::new(None);
    let format = ManchesterParser::new().parse_str(DOCUMENT, &mut ontology)?;
    let serializer = ManchesterSerializer::new().with_prefixes(format.prefixes());
    let written = serializer.serialize_to_write(&ontology, Vec::new())?;
    assert_eq!(
        String::from_utf8(written)?,
        serializer.serialize_to_string(&ontology)
    );
    Ok(())
}
