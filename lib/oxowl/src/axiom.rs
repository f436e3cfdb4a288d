//! OWL 2 axiom types.
//!
//! Axioms are the basic statements in an OWL 2 ontology.

use crate::annotation::{AnnotationSubject, AnnotationValue};
use crate::entity::{
    AnnotationProperty, DataProperty, Datatype, Entity, Individual, ObjectProperty, OwlClass,
};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use oxrdf::{Literal, NamedNode};

/// An OWL 2 axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    // === Class Axioms ===
    /// SubClassOf(sub, super)
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },

    /// EquivalentClasses(C1, C2, ...)
    EquivalentClasses(Vec<ClassExpression>),

    /// DisjointClasses(C1, C2, ...)
    DisjointClasses(Vec<ClassExpression>),

    /// DisjointUnion(C, C1, ..., Cn)
    DisjointUnion {
        class: OwlClass,
        disjoint_classes: Vec<ClassExpression>,
    },

    // === Object Property Axioms ===
    /// SubObjectPropertyOf(sub, super)
    SubObjectPropertyOf {
        sub_property: ObjectPropertyExpression,
        super_property: ObjectPropertyExpression,
    },

    /// SubObjectPropertyOf(ObjectPropertyChain(P1...Pn), P)
    SubPropertyChainOf {
        property_chain: Vec<ObjectPropertyExpression>,
        super_property: ObjectPropertyExpression,
    },

    EquivalentObjectProperties(Vec<ObjectPropertyExpression>),

    DisjointObjectProperties(Vec<ObjectPropertyExpression>),

    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },

    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },

    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),

    FunctionalObjectProperty(ObjectPropertyExpression),

    InverseFunctionalObjectProperty(ObjectPropertyExpression),

    ReflexiveObjectProperty(ObjectPropertyExpression),

    IrreflexiveObjectProperty(ObjectPropertyExpression),

    SymmetricObjectProperty(ObjectPropertyExpression),

    AsymmetricObjectProperty(ObjectPropertyExpression),

    TransitiveObjectProperty(ObjectPropertyExpression),

    // === Data Property Axioms ===
    SubDataPropertyOf {
        sub_property: DataProperty,
        super_property: DataProperty,
    },

    EquivalentDataProperties(Vec<DataProperty>),

    DisjointDataProperties(Vec<DataProperty>),

    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },

    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },

    FunctionalDataProperty(DataProperty),

    // === Datatype definitions ===
    /// DatatypeDefinition(DT, D)
    DatatypeDefinition {
        datatype: Datatype,
        range: DataRange,
    },

    // === Individual Axioms (Assertions) ===
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },

    ObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },

    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },

    DataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },

    NegativeDataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },

    SameIndividual(Vec<Individual>),

    DifferentIndividuals(Vec<Individual>),

    // === Keys ===
    /// HasKey(C, (P1...Pm), (D1...Dn))
    HasKey {
        class: ClassExpression,
        object_properties: Vec<ObjectPropertyExpression>,
        data_properties: Vec<DataProperty>,
    },

    // === Annotation Axioms ===
    AnnotationAssertion {
        property: AnnotationProperty,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },

    SubAnnotationPropertyOf {
        sub_property: AnnotationProperty,
        super_property: AnnotationProperty,
    },

    AnnotationPropertyDomain {
        property: AnnotationProperty,
        domain: NamedNode,
    },

    AnnotationPropertyRange {
        property: AnnotationProperty,
        range: NamedNode,
    },

    // === Declaration Axioms ===
    DeclareClass(OwlClass),

    DeclareObjectProperty(ObjectProperty),

    DeclareDataProperty(DataProperty),

    DeclareAnnotationProperty(AnnotationProperty),

    DeclareNamedIndividual(NamedNode),

    DeclareDatatype(Datatype),
}

impl Axiom {
    pub fn subclass_of(sub: impl Into<ClassExpression>, sup: impl Into<ClassExpression>) -> Self {
        Self::SubClassOf {
            sub_class: sub.into(),
            super_class: sup.into(),
        }
    }

    pub fn class_assertion(
        class: impl Into<ClassExpression>,
        individual: impl Into<Individual>,
    ) -> Self {
        Self::ClassAssertion {
            class: class.into(),
            individual: individual.into(),
        }
    }

    /// The declaration axiom for an entity.
    pub fn declaration(entity: Entity) -> Self {
        match entity {
            Entity::Class(c) => Self::DeclareClass(c),
            Entity::ObjectProperty(p) => Self::DeclareObjectProperty(p),
            Entity::DataProperty(p) => Self::DeclareDataProperty(p),
            Entity::AnnotationProperty(p) => Self::DeclareAnnotationProperty(p),
            Entity::NamedIndividual(i) => Self::DeclareNamedIndividual(i),
            Entity::Datatype(d) => Self::DeclareDatatype(d),
        }
    }

    /// The declared entity if this is a declaration axiom.
    pub fn declared_entity(&self) -> Option<Entity> {
        Some(match self {
            Self::DeclareClass(c) => Entity::Class(c.clone()),
            Self::DeclareObjectProperty(p) => Entity::ObjectProperty(p.clone()),
            Self::DeclareDataProperty(p) => Entity::DataProperty(p.clone()),
            Self::DeclareAnnotationProperty(p) => Entity::AnnotationProperty(p.clone()),
            Self::DeclareNamedIndividual(i) => Entity::NamedIndividual(i.clone()),
            Self::DeclareDatatype(d) => Entity::Datatype(d.clone()),
            _ => return None,
        })
    }
}
