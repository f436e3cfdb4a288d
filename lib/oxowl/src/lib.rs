//! OWL 2 structural model used by the Manchester Syntax parser.
//!
//! This crate provides the OWL 2 Web Ontology Language data model:
//! - Entities (classes, properties, individuals, datatypes)
//! - Class expressions, object property expressions and data ranges
//! - Axioms and annotations
//! - The [`Ontology`] container with its declaration indexes
//!
//! # Example
//! ```
//! use oxowl::{Axiom, Entity, EntityKind, Ontology, OwlClass};
//! use oxrdf::NamedNode;
//!
//! let mut ontology = Ontology::new(Some(
//!     NamedNode::new("http://example.org/animals").unwrap()
//! ));
//! let dog = NamedNode::new("http://example.org/Dog").unwrap();
//! ontology.add_axiom(Axiom::declaration(Entity::new(EntityKind::Class, dog.clone())));
//! assert!(ontology.contains_class(&OwlClass::new(dog)));
//! ```

mod annotation;
mod axiom;
mod entity;
mod error;
mod expression;
mod ontology;

pub use annotation::{Annotation, AnnotationSubject, AnnotationValue};
pub use axiom::Axiom;
pub use entity::{
    AnnotationProperty, DataProperty, Datatype, Entity, EntityKind, Individual, ObjectProperty,
    OwlClass,
};
pub use error::{OwlError, OwlResult};
pub use expression::{ClassExpression, DataRange, ObjectPropertyExpression};
pub use ontology::Ontology;
