//! OWL 2 Ontology - container for axioms and declarations.

use crate::annotation::Annotation;
use crate::axiom::Axiom;
use crate::entity::{
    AnnotationProperty, DataProperty, Datatype, Entity, EntityKind, ObjectProperty, OwlClass,
};
use crate::error::OwlResult;
use oxrdf::NamedNode;
use rustc_hash::FxHashSet;

/// An OWL 2 ontology.
///
/// An ontology is a collection of axioms describing classes, properties,
/// and individuals in a domain. Axioms keep their insertion order and may carry annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ontology {
    iri: Option<NamedNode>,
    version_iri: Option<NamedNode>,
    imports: Vec<NamedNode>,
    annotations: Vec<Annotation>,
    axioms: Vec<Axiom>,
    /// Annotations of `axioms[i]`, kept in lockstep with `axioms`
    axiom_annotations: Vec<Vec<Annotation>>,
    /// Entities introduced by declaration axioms
    declarations: FxHashSet<Entity>,
}

impl Ontology {
    /// Creates a new empty ontology.
    pub fn new(iri: Option<NamedNode>) -> Self {
        Self {
            iri,
            ..Self::default()
        }
    }

    /// Creates a new ontology with the given IRI string.
    pub fn with_iri(iri: impl AsRef<str>) -> OwlResult<Self> {
        Ok(Self::new(Some(NamedNode::new(iri.as_ref())?)))
    }

    pub fn iri(&self) -> Option<&NamedNode> {
        self.iri.as_ref()
    }

    pub fn set_iri(&mut self, iri: Option<NamedNode>) {
        self.iri = iri;
    }

    pub fn version_iri(&self) -> Option<&NamedNode> {
        self.version_iri.as_ref()
    }

    pub fn set_version_iri(&mut self, iri: Option<NamedNode>) {
        self.version_iri = iri;
    }

    /// Returns the imported ontology IRIs.
    pub fn imports(&self) -> &[NamedNode] {
        &self.imports
    }

    /// Adds an import declaration. Duplicates are ignored.
    pub fn add_import(&mut self, iri: NamedNode) {
        if !self.imports.contains(&iri) {
            self.imports.push(iri);
        }
    }

    /// Returns the annotations of the ontology itself.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Adds an axiom to the ontology.
    pub fn add_axiom(&mut self, axiom: Axiom) {
        self.add_annotated_axiom(axiom, Vec::new());
    }

    /// Adds an axiom together with its annotations.
    pub fn add_annotated_axiom(&mut self, axiom: Axiom, annotations: Vec<Annotation>) {
        if let Some(entity) = axiom.declared_entity() {
            self.declarations.insert(entity);
        }
        self.axioms.push(axiom);
        self.axiom_annotations.push(annotations);
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    /// Returns every axiom with its annotations.
    pub fn annotated_axioms(&self) -> impl Iterator<Item = (&Axiom, &[Annotation])> {
        self.axioms
            .iter()
            .zip(self.axiom_annotations.iter().map(Vec::as_slice))
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// Returns all declared entities.
    pub fn declarations(&self) -> impl Iterator<Item = &Entity> {
        self.declarations.iter()
    }

    /// Checks if an entity of the given kind is declared with this IRI.
    pub fn is_declared(&self, iri: &NamedNode, kind: EntityKind) -> bool {
        self.declarations.contains(&Entity::new(kind, iri.clone()))
    }

    /// Returns the kinds under which this IRI is declared.
    pub fn declared_kinds(&self, iri: &NamedNode) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|kind| self.is_declared(iri, *kind))
            .collect()
    }

    pub fn classes(&self) -> impl Iterator<Item = &OwlClass> {
        self.declarations.iter().filter_map(|e| match e {
            Entity::Class(c) => Some(c),
            _ => None,
        })
    }

    pub fn object_properties(&self) -> impl Iterator<Item = &ObjectProperty> {
        self.declarations.iter().filter_map(|e| match e {
            Entity::ObjectProperty(p) => Some(p),
            _ => None,
        })
    }

    pub fn data_properties(&self) -> impl Iterator<Item = &DataProperty> {
        self.declarations.iter().filter_map(|e| match e {
            Entity::DataProperty(p) => Some(p),
            _ => None,
        })
    }

    pub fn annotation_properties(&self) -> impl Iterator<Item = &AnnotationProperty> {
        self.declarations.iter().filter_map(|e| match e {
            Entity::AnnotationProperty(p) => Some(p),
            _ => None,
        })
    }

    /// Returns all declared named individuals.
    pub fn individuals(&self) -> impl Iterator<Item = &NamedNode> {
        self.declarations.iter().filter_map(|e| match e {
            Entity::NamedIndividual(i) => Some(i),
            _ => None,
        })
    }

    pub fn datatypes(&self) -> impl Iterator<Item = &Datatype> {
        self.declarations.iter().filter_map(|e| match e {
            Entity::Datatype(d) => Some(d),
            _ => None,
        })
    }

    pub fn contains_class(&self, class: &OwlClass) -> bool {
        self.is_declared(class.iri(), EntityKind::Class)
    }
}

impl std::fmt::Display for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(iri) = &self.iri {
            write!(f, "Ontology({iri})")?;
        } else {
            write!(f, "Ontology(anonymous)")?;
        }
        write!(f, " [{} axioms]", self.axioms.len())
    }
}
