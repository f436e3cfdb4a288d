//! OWL 2 class expressions, object property expressions, and data ranges.

use crate::entity::{DataProperty, Datatype, Individual, ObjectProperty, OwlClass};
use oxrdf::{Literal, NamedNode};

/// An OWL 2 class expression.
///
/// Class expressions describe sets of individuals through various constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// A named class (atomic class)
    Class(OwlClass),

    /// ObjectIntersectionOf(C1, ..., Cn)
    ObjectIntersectionOf(Vec<ClassExpression>),

    /// ObjectUnionOf(C1, ..., Cn)
    ObjectUnionOf(Vec<ClassExpression>),

    /// ObjectComplementOf(C)
    ObjectComplementOf(Box<ClassExpression>),

    /// ObjectOneOf(a1, ..., an) - enumeration of individuals
    ObjectOneOf(Vec<Individual>),

    /// ObjectSomeValuesFrom(P, C) - existential restriction
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectAllValuesFrom(P, C) - universal restriction
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectHasValue(P, a)
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },

    /// ObjectHasSelf(P)
    ObjectHasSelf(ObjectPropertyExpression),

    /// ObjectMinCardinality(n, P [, C])
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },

    /// ObjectMaxCardinality(n, P [, C])
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },

    /// ObjectExactCardinality(n, P [, C])
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },

    /// DataSomeValuesFrom(P, D)
    DataSomeValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },

    /// DataAllValuesFrom(P, D)
    DataAllValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },

    /// DataHasValue(P, v)
    DataHasValue {
        property: DataProperty,
        value: Literal,
    },

    /// DataMinCardinality(n, P [, D])
    DataMinCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },

    /// DataMaxCardinality(n, P [, D])
    DataMaxCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },

    /// DataExactCardinality(n, P [, D])
    DataExactCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
}

impl ClassExpression {
    pub fn complement(c: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(c))
    }

    pub fn some_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn all_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectAllValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }
}

impl From<OwlClass> for ClassExpression {
    fn from(c: OwlClass) -> Self {
        Self::Class(c)
    }
}

/// An OWL 2 object property expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    ObjectProperty(ObjectProperty),

    /// ObjectInverseOf(P)
    ObjectInverseOf(ObjectProperty),
}

impl ObjectPropertyExpression {
    pub fn inverse(property: ObjectProperty) -> Self {
        Self::ObjectInverseOf(property)
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    fn from(p: ObjectProperty) -> Self {
        Self::ObjectProperty(p)
    }
}

/// An OWL 2 data range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRange {
    /// A named datatype (e.g., xsd:string)
    Datatype(Datatype),

    DataIntersectionOf(Vec<DataRange>),

    DataUnionOf(Vec<DataRange>),

    DataComplementOf(Box<DataRange>),

    /// DataOneOf(v1, ..., vn) - enumeration of literals
    DataOneOf(Vec<Literal>),

    /// DatatypeRestriction(D, facet1 value1, ...)
    DatatypeRestriction {
        datatype: Datatype,
        facets: Vec<(NamedNode, Literal)>,
    },
}

impl From<Datatype> for DataRange {
    fn from(dt: Datatype) -> Self {
        Self::Datatype(dt)
    }
}
