//! OWL vocabulary used by the Manchester Syntax.

use oxowl::EntityKind;
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::NamedNodeRef;

pub mod owl {
    use oxrdf::NamedNodeRef;

    pub const THING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
    pub const NOTHING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Nothing");
    pub const TOP_OBJECT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#topObjectProperty");
    pub const BOTTOM_OBJECT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#bottomObjectProperty");
    pub const TOP_DATA_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#topDataProperty");
    pub const BOTTOM_DATA_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#bottomDataProperty");
    pub const VERSION_INFO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionInfo");
    pub const DEPRECATED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#deprecated");
    pub const PRIOR_VERSION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#priorVersion");
    pub const BACKWARD_COMPATIBLE_WITH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#backwardCompatibleWith");
    pub const INCOMPATIBLE_WITH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#incompatibleWith");
    pub const REAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#real");
    pub const RATIONAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#rational");
}

/// Facets usable in datatype restrictions, by their Manchester Syntax name.
pub const FACETS: [(&str, NamedNodeRef<'_>); 9] = [
    (
        "length",
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#length"),
    ),
    (
        "minLength",
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#minLength"),
    ),
    (
        "maxLength",
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#maxLength"),
    ),
    (
        "pattern",
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#pattern"),
    ),
    (
        "langRange",
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#langRange"),
    ),
    (
        "<=",
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#maxInclusive"),
    ),
    (
        "<",
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#maxExclusive"),
    ),
    (
        ">=",
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#minInclusive"),
    ),
    (
        ">",
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#minExclusive"),
    ),
];

/// Datatypes that can be written as a bare keyword.
pub const DATATYPE_KEYWORDS: [(&str, NamedNodeRef<'_>); 4] = [
    ("integer", xsd::INTEGER),
    ("decimal", xsd::DECIMAL),
    ("float", xsd::FLOAT),
    ("string", xsd::STRING),
];

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Returns true if the IRI is an entity of this kind that exists without declaration.
pub fn is_built_in(iri: NamedNodeRef<'_>, kind: EntityKind) -> bool {
    match kind {
        EntityKind::Class => iri == owl::THING || iri == owl::NOTHING,
        EntityKind::ObjectProperty => {
            iri == owl::TOP_OBJECT_PROPERTY || iri == owl::BOTTOM_OBJECT_PROPERTY
        }
        EntityKind::DataProperty => iri == owl::TOP_DATA_PROPERTY || iri == owl::BOTTOM_DATA_PROPERTY,
        EntityKind::AnnotationProperty => [
            rdfs::LABEL,
            rdfs::COMMENT,
            rdfs::SEE_ALSO,
            rdfs::IS_DEFINED_BY,
            owl::VERSION_INFO,
            owl::DEPRECATED,
            owl::PRIOR_VERSION,
            owl::BACKWARD_COMPATIBLE_WITH,
            owl::INCOMPATIBLE_WITH,
        ]
        .contains(&iri),
        EntityKind::Datatype => {
            iri.as_str().starts_with(XSD_NAMESPACE)
                || [
                    rdfs::LITERAL,
                    rdf::LANG_STRING,
                    rdf::XML_LITERAL,
                    owl::REAL,
                    owl::RATIONAL,
                ]
                .contains(&iri)
        }
        EntityKind::NamedIndividual => false,
    }
}
