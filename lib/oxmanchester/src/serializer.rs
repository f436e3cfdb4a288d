use crate::prefix::PrefixTable;
use crate::vocab::FACETS;
use oxiri::IriParseError;
use oxowl::{
    Annotation, AnnotationSubject, AnnotationValue, Axiom, ClassExpression, DataRange, EntityKind,
    Individual, ObjectPropertyExpression, Ontology,
};
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, warn};

/// A [Manchester OWL Syntax](https://www.w3.org/TR/owl2-manchester-syntax/) serializer.
///
/// Axioms are grouped into one frame per entity, sorted by kind and name.
/// Axioms without a natural frame are written as `EquivalentClasses:`, `DisjointProperties:`... frames.
/// General class inclusions and axioms about inverse properties have no Manchester Syntax form and are skipped.
///
/// ```
/// use oxmanchester::ManchesterSerializer;
/// use oxowl::{Axiom, Ontology, OwlClass};
/// use oxrdf::NamedNode;
///
/// let mut ontology = Ontology::new(Some(NamedNode::new("http://ex.org/onto")?));
/// ontology.add_axiom(Axiom::DeclareClass(OwlClass::new(NamedNode::new("http://ex.org/A")?)));
/// let text = ManchesterSerializer::new()
///     .with_prefix("", "http://ex.org/")?
///     .serialize_to_string(&ontology);
/// assert!(text.contains("Ontology: <http://ex.org/onto>\n"));
/// assert!(text.contains("Class: :A\n"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct ManchesterSerializer {
    prefixes: PrefixTable,
}

impl ManchesterSerializer {
    /// Builds a new [`ManchesterSerializer`] knowing the `owl`, `rdf`, `rdfs`, `xsd` and `xml` prefixes.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_prefix(
        mut self,
        prefix_name: impl Into<String>,
        prefix_iri: impl Into<String>,
    ) -> Result<Self, IriParseError> {
        self.prefixes.declare_prefix(prefix_name, prefix_iri)?;
        Ok(self)
    }

    /// Uses all the prefixes of the table, for example the ones returned by the parser.
    #[inline]
    pub fn with_prefixes(mut self, prefixes: &PrefixTable) -> Self {
        for (name, iri) in prefixes.iter() {
            self.prefixes.declare_prefix_unchecked(name, iri);
        }
        self
    }

    /// Writes the ontology to a [`Write`] implementation.
    pub fn serialize_to_write<W: Write>(&self, ontology: &Ontology, mut write: W) -> io::Result<W> {
        write!(write, "{}", self.document(ontology))?;
        write.flush()?;
        Ok(write)
    }

    pub fn serialize_to_string(&self, ontology: &Ontology) -> String {
        self.document(ontology).to_string()
    }

    fn document<'a>(&'a self, ontology: &'a Ontology) -> Document<'a> {
        Document {
            renderer: Renderer {
                prefixes: &self.prefixes,
            },
            ontology,
        }
    }
}

struct Document<'a> {
    renderer: Renderer<'a>,
    ontology: &'a Ontology,
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.renderer;
        for (name, iri) in r.prefixes.iter() {
            writeln!(f, "Prefix: {name}: <{iri}>")?;
        }
        f.write_str("\nOntology:")?;
        if let Some(iri) = self.ontology.iri() {
            write!(f, " <{}>", iri.as_str())?;
            if let Some(version_iri) = self.ontology.version_iri() {
                write!(f, " <{}>", version_iri.as_str())?;
            }
        }
        writeln!(f)?;
        for import in self.ontology.imports() {
            writeln!(f, "Import: <{}>", import.as_str())?;
        }
        if !self.ontology.annotations().is_empty() {
            writeln!(
                f,
                "Annotations:\n    {}",
                r.annotation_list(self.ontology.annotations(), ",\n    ")
            )?;
        }

        let mut frames = Frames::default();
        for (axiom, annotations) in self.ontology.annotated_axioms() {
            if !frames.add(r, self.ontology, axiom, annotations) {
                warn!("Skipped {axiom:?}: it cannot be written in Manchester Syntax");
            }
        }
        for (subject, lines) in &frames.frames {
            match subject {
                FrameSubject::Entity(kind, name) => {
                    writeln!(f, "\n{} {name}", kind.frame_keyword())?;
                }
                FrameSubject::Anonymous(id) => writeln!(f, "\nIndividual: _:{id}")?,
            }
            for line in lines {
                writeln!(f, "    {line}")?;
            }
        }
        for line in &frames.misc {
            writeln!(f, "\n{line}")?;
        }
        debug!(
            "Rendered {} frames and {} miscellaneous axioms",
            frames.frames.len(),
            frames.misc.len()
        );
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum FrameSubject {
    Entity(EntityKind, String),
    Anonymous(String),
}

#[derive(Default)]
struct Frames {
    frames: BTreeMap<FrameSubject, Vec<String>>,
    misc: Vec<String>,
}

impl Frames {
    fn entity(&mut self, renderer: &Renderer<'_>, kind: EntityKind, iri: &NamedNode) -> &mut Vec<String> {
        self.frames
            .entry(FrameSubject::Entity(kind, renderer.iri(iri)))
            .or_default()
    }

    fn individual(&mut self, renderer: &Renderer<'_>, individual: &Individual) -> &mut Vec<String> {
        let subject = match individual {
            Individual::Named(iri) => FrameSubject::Entity(EntityKind::NamedIndividual, renderer.iri(iri)),
            Individual::Anonymous(b) => FrameSubject::Anonymous(b.as_str().into()),
        };
        self.frames.entry(subject).or_default()
    }

    /// Adds the axiom to its frame, returns false if it has no Manchester Syntax form.
    fn add(
        &mut self,
        r: &Renderer<'_>,
        ontology: &Ontology,
        axiom: &Axiom,
        annotations: &[Annotation],
    ) -> bool {
        let a = r.axiom_annotations(annotations);
        match axiom {
            Axiom::DeclareClass(c) => {
                self.entity(r, EntityKind::Class, c.iri());
            }
            Axiom::DeclareObjectProperty(p) => {
                self.entity(r, EntityKind::ObjectProperty, p.iri());
            }
            Axiom::DeclareDataProperty(p) => {
                self.entity(r, EntityKind::DataProperty, p.iri());
            }
            Axiom::DeclareAnnotationProperty(p) => {
                self.entity(r, EntityKind::AnnotationProperty, p.iri());
            }
            Axiom::DeclareNamedIndividual(i) => {
                self.entity(r, EntityKind::NamedIndividual, i);
            }
            Axiom::DeclareDatatype(d) => {
                self.entity(r, EntityKind::Datatype, d.iri());
            }
            Axiom::SubClassOf {
                sub_class: ClassExpression::Class(c),
                super_class,
            } => self
                .entity(r, EntityKind::Class, c.iri())
                .push(format!("SubClassOf: {a}{}", r.class_expression(super_class))),
            Axiom::EquivalentClasses(classes) | Axiom::DisjointClasses(classes) => {
                let is_equivalent = matches!(axiom, Axiom::EquivalentClasses(_));
                if let [ClassExpression::Class(c), other] = classes.as_slice() {
                    let section = if is_equivalent { "EquivalentTo" } else { "DisjointWith" };
                    self.entity(r, EntityKind::Class, c.iri())
                        .push(format!("{section}: {a}{}", r.class_expression(other)));
                } else {
                    let keyword = if is_equivalent { "EquivalentClasses" } else { "DisjointClasses" };
                    self.misc.push(format!(
                        "{keyword}: {a}{}",
                        r.list(classes, |c| r.class_expression(c))
                    ));
                }
            }
            Axiom::DisjointUnion {
                class,
                disjoint_classes,
            } => self.entity(r, EntityKind::Class, class.iri()).push(format!(
                "DisjointUnionOf: {a}{}",
                r.list(disjoint_classes, |c| r.class_expression(c))
            )),
            Axiom::HasKey {
                class: ClassExpression::Class(c),
                object_properties,
                data_properties,
            } => {
                let keys = object_properties
                    .iter()
                    .map(|p| r.object_property_expression(p))
                    .chain(data_properties.iter().map(|p| r.iri(p.iri())))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.entity(r, EntityKind::Class, c.iri())
                    .push(format!("HasKey: {a}{keys}"));
            }
            Axiom::SubObjectPropertyOf {
                sub_property: ObjectPropertyExpression::ObjectProperty(p),
                super_property,
            } => self.entity(r, EntityKind::ObjectProperty, p.iri()).push(format!(
                "SubPropertyOf: {a}{}",
                r.object_property_expression(super_property)
            )),
            Axiom::SubPropertyChainOf {
                property_chain,
                super_property: ObjectPropertyExpression::ObjectProperty(p),
            } => {
                let chain = property_chain
                    .iter()
                    .map(|p| r.object_property_expression(p))
                    .collect::<Vec<_>>()
                    .join(" o ");
                self.entity(r, EntityKind::ObjectProperty, p.iri())
                    .push(format!("SubPropertyChain: {a}{chain}"));
            }
            Axiom::EquivalentObjectProperties(properties)
            | Axiom::DisjointObjectProperties(properties) => {
                let is_equivalent = matches!(axiom, Axiom::EquivalentObjectProperties(_));
                if let [ObjectPropertyExpression::ObjectProperty(p), other] = properties.as_slice() {
                    let section = if is_equivalent { "EquivalentTo" } else { "DisjointWith" };
                    self.entity(r, EntityKind::ObjectProperty, p.iri()).push(format!(
                        "{section}: {a}{}",
                        r.object_property_expression(other)
                    ));
                } else {
                    let keyword = if is_equivalent {
                        "EquivalentProperties"
                    } else {
                        "DisjointProperties"
                    };
                    self.misc.push(format!(
                        "{keyword}: {a}{}",
                        r.list(properties, |p| r.object_property_expression(p))
                    ));
                }
            }
            Axiom::ObjectPropertyDomain {
                property: ObjectPropertyExpression::ObjectProperty(p),
                domain,
            } => self
                .entity(r, EntityKind::ObjectProperty, p.iri())
                .push(format!("Domain: {a}{}", r.class_expression(domain))),
            Axiom::ObjectPropertyRange {
                property: ObjectPropertyExpression::ObjectProperty(p),
                range,
            } => self
                .entity(r, EntityKind::ObjectProperty, p.iri())
                .push(format!("Range: {a}{}", r.class_expression(range))),
            Axiom::InverseObjectProperties(ObjectPropertyExpression::ObjectProperty(p), other) => {
                self.entity(r, EntityKind::ObjectProperty, p.iri())
                    .push(format!("InverseOf: {a}{}", r.object_property_expression(other)));
            }
            Axiom::FunctionalObjectProperty(ObjectPropertyExpression::ObjectProperty(p))
            | Axiom::InverseFunctionalObjectProperty(ObjectPropertyExpression::ObjectProperty(p))
            | Axiom::ReflexiveObjectProperty(ObjectPropertyExpression::ObjectProperty(p))
            | Axiom::IrreflexiveObjectProperty(ObjectPropertyExpression::ObjectProperty(p))
            | Axiom::SymmetricObjectProperty(ObjectPropertyExpression::ObjectProperty(p))
            | Axiom::AsymmetricObjectProperty(ObjectPropertyExpression::ObjectProperty(p))
            | Axiom::TransitiveObjectProperty(ObjectPropertyExpression::ObjectProperty(p)) => {
                let characteristic = match axiom {
                    Axiom::FunctionalObjectProperty(_) => "Functional",
                    Axiom::InverseFunctionalObjectProperty(_) => "InverseFunctional",
                    Axiom::ReflexiveObjectProperty(_) => "Reflexive",
                    Axiom::IrreflexiveObjectProperty(_) => "Irreflexive",
                    Axiom::SymmetricObjectProperty(_) => "Symmetric",
                    Axiom::AsymmetricObjectProperty(_) => "Asymmetric",
                    _ => "Transitive",
                };
                self.entity(r, EntityKind::ObjectProperty, p.iri())
                    .push(format!("Characteristics: {a}{characteristic}"));
            }
            Axiom::SubDataPropertyOf {
                sub_property,
                super_property,
            } => self
                .entity(r, EntityKind::DataProperty, sub_property.iri())
                .push(format!("SubPropertyOf: {a}{}", r.iri(super_property.iri()))),
            Axiom::EquivalentDataProperties(properties)
            | Axiom::DisjointDataProperties(properties) => {
                let is_equivalent = matches!(axiom, Axiom::EquivalentDataProperties(_));
                if let [p, other] = properties.as_slice() {
                    let section = if is_equivalent { "EquivalentTo" } else { "DisjointWith" };
                    self.entity(r, EntityKind::DataProperty, p.iri())
                        .push(format!("{section}: {a}{}", r.iri(other.iri())));
                } else {
                    let keyword = if is_equivalent {
                        "EquivalentProperties"
                    } else {
                        "DisjointProperties"
                    };
                    self.misc.push(format!(
                        "{keyword}: {a}{}",
                        r.list(properties, |p| r.iri(p.iri()))
                    ));
                }
            }
            Axiom::DataPropertyDomain { property, domain } => self
                .entity(r, EntityKind::DataProperty, property.iri())
                .push(format!("Domain: {a}{}", r.class_expression(domain))),
            Axiom::DataPropertyRange { property, range } => self
                .entity(r, EntityKind::DataProperty, property.iri())
                .push(format!("Range: {a}{}", r.data_range(range))),
            Axiom::FunctionalDataProperty(property) => self
                .entity(r, EntityKind::DataProperty, property.iri())
                .push(format!("Characteristics: {a}Functional")),
            Axiom::DatatypeDefinition { datatype, range } => self
                .entity(r, EntityKind::Datatype, datatype.iri())
                .push(format!("EquivalentTo: {a}{}", r.data_range(range))),
            Axiom::ClassAssertion { class, individual } => self
                .individual(r, individual)
                .push(format!("Types: {a}{}", r.class_expression(class))),
            Axiom::ObjectPropertyAssertion {
                property: ObjectPropertyExpression::ObjectProperty(p),
                source,
                target,
            } => self.individual(r, source).push(format!(
                "Facts: {a}{} {}",
                r.iri(p.iri()),
                r.individual(target)
            )),
            Axiom::NegativeObjectPropertyAssertion {
                property: ObjectPropertyExpression::ObjectProperty(p),
                source,
                target,
            } => self.individual(r, source).push(format!(
                "Facts: {a}not {} {}",
                r.iri(p.iri()),
                r.individual(target)
            )),
            Axiom::DataPropertyAssertion {
                property,
                source,
                target,
            } => self.individual(r, source).push(format!(
                "Facts: {a}{} {}",
                r.iri(property.iri()),
                r.literal(target)
            )),
            Axiom::NegativeDataPropertyAssertion {
                property,
                source,
                target,
            } => self.individual(r, source).push(format!(
                "Facts: {a}not {} {}",
                r.iri(property.iri()),
                r.literal(target)
            )),
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                let is_same = matches!(axiom, Axiom::SameIndividual(_));
                if let [first, other] = individuals.as_slice() {
                    let section = if is_same { "SameAs" } else { "DifferentFrom" };
                    self.individual(r, first)
                        .push(format!("{section}: {a}{}", r.individual(other)));
                } else {
                    let keyword = if is_same {
                        "SameIndividual"
                    } else {
                        "DifferentIndividuals"
                    };
                    self.misc.push(format!(
                        "{keyword}: {a}{}",
                        r.list(individuals, |i| r.individual(i))
                    ));
                }
            }
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                let line = format!(
                    "Annotations: {a}{} {}",
                    r.iri(property.iri()),
                    r.annotation_value(value)
                );
                match subject {
                    AnnotationSubject::Iri(iri) => {
                        // Undeclared subjects are written as individuals
                        let kind = ontology
                            .declared_kinds(iri)
                            .into_iter()
                            .next()
                            .unwrap_or(EntityKind::NamedIndividual);
                        self.entity(r, kind, iri).push(line);
                    }
                    AnnotationSubject::Anonymous(b) => {
                        self.individual(r, &Individual::Anonymous(b.clone()))
                            .push(line);
                    }
                }
            }
            Axiom::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => self
                .entity(r, EntityKind::AnnotationProperty, sub_property.iri())
                .push(format!("SubPropertyOf: {a}{}", r.iri(super_property.iri()))),
            Axiom::AnnotationPropertyDomain { property, domain } => self
                .entity(r, EntityKind::AnnotationProperty, property.iri())
                .push(format!("Domain: {a}{}", r.iri(domain))),
            Axiom::AnnotationPropertyRange { property, range } => self
                .entity(r, EntityKind::AnnotationProperty, property.iri())
                .push(format!("Range: {a}{}", r.iri(range))),
            _ => return false,
        }
        true
    }
}

struct Renderer<'a> {
    prefixes: &'a PrefixTable,
}

impl Renderer<'_> {
    fn iri(&self, iri: &NamedNode) -> String {
        self.prefixes
            .abbreviate(iri.as_str())
            .unwrap_or_else(|| format!("<{}>", iri.as_str()))
    }

    fn list<T>(&self, values: &[T], render: impl Fn(&T) -> String) -> String {
        values.iter().map(render).collect::<Vec<_>>().join(", ")
    }

    fn individual(&self, individual: &Individual) -> String {
        match individual {
            Individual::Named(iri) => self.iri(iri),
            Individual::Anonymous(b) => format!("_:{}", b.as_str()),
        }
    }

    fn literal(&self, literal: &Literal) -> String {
        let mut value = String::with_capacity(literal.value().len() + 2);
        value.push('"');
        for c in literal.value().chars() {
            match c {
                '"' => value.push_str("\\\""),
                '\\' => value.push_str("\\\\"),
                '\n' => value.push_str("\\n"),
                '\r' => value.push_str("\\r"),
                '\t' => value.push_str("\\t"),
                c => value.push(c),
            }
        }
        value.push('"');
        if let Some(language) = literal.language() {
            format!("{value}@{language}")
        } else if literal.datatype() == xsd::STRING {
            value
        } else {
            format!("{value}^^{}", self.iri(&literal.datatype().into_owned()))
        }
    }

    fn annotation_value(&self, value: &AnnotationValue) -> String {
        match value {
            AnnotationValue::Iri(iri) => self.iri(iri),
            AnnotationValue::Anonymous(b) => format!("_:{}", b.as_str()),
            AnnotationValue::Literal(literal) => self.literal(literal),
        }
    }

    fn annotation_list(&self, annotations: &[Annotation], separator: &str) -> String {
        annotations
            .iter()
            .map(|annotation| {
                format!(
                    "{}{} {}",
                    self.axiom_annotations(&annotation.annotations),
                    self.iri(annotation.property.iri()),
                    self.annotation_value(&annotation.value)
                )
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// The `Annotations: ...` prefix of an annotated list element.
    fn axiom_annotations(&self, annotations: &[Annotation]) -> String {
        if annotations.is_empty() {
            String::new()
        } else {
            format!("Annotations: {} ", self.annotation_list(annotations, ", "))
        }
    }

    fn object_property_expression(&self, property: &ObjectPropertyExpression) -> String {
        match property {
            ObjectPropertyExpression::ObjectProperty(p) => self.iri(p.iri()),
            ObjectPropertyExpression::ObjectInverseOf(p) => format!("inverse {}", self.iri(p.iri())),
        }
    }

    fn class_expression(&self, expression: &ClassExpression) -> String {
        match expression {
            ClassExpression::Class(c) => self.iri(c.iri()),
            ClassExpression::ObjectIntersectionOf(operands) => operands
                .iter()
                .map(|c| self.class_primary(c))
                .collect::<Vec<_>>()
                .join(" and "),
            ClassExpression::ObjectUnionOf(operands) => operands
                .iter()
                .map(|c| self.class_primary(c))
                .collect::<Vec<_>>()
                .join(" or "),
            ClassExpression::ObjectComplementOf(operand) => {
                format!("not {}", self.class_primary(operand))
            }
            ClassExpression::ObjectOneOf(individuals) => {
                format!("{{{}}}", self.list(individuals, |i| self.individual(i)))
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => format!(
                "{} some {}",
                self.object_property_expression(property),
                self.class_primary(filler)
            ),
            ClassExpression::ObjectAllValuesFrom { property, filler } => format!(
                "{} only {}",
                self.object_property_expression(property),
                self.class_primary(filler)
            ),
            ClassExpression::ObjectHasValue {
                property,
                individual,
            } => format!(
                "{} value {}",
                self.object_property_expression(property),
                self.individual(individual)
            ),
            ClassExpression::ObjectHasSelf(property) => {
                format!("{} Self", self.object_property_expression(property))
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality("min", *cardinality, property, filler.as_deref()),
            ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality("max", *cardinality, property, filler.as_deref()),
            ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality("exactly", *cardinality, property, filler.as_deref()),
            ClassExpression::DataSomeValuesFrom { property, filler } => format!(
                "{} some {}",
                self.iri(property.iri()),
                self.data_primary(filler)
            ),
            ClassExpression::DataAllValuesFrom { property, filler } => format!(
                "{} only {}",
                self.iri(property.iri()),
                self.data_primary(filler)
            ),
            ClassExpression::DataHasValue { property, value } => {
                format!("{} value {}", self.iri(property.iri()), self.literal(value))
            }
            ClassExpression::DataMinCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::DataMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => {
                let keyword = match expression {
                    ClassExpression::DataMinCardinality { .. } => "min",
                    ClassExpression::DataMaxCardinality { .. } => "max",
                    _ => "exactly",
                };
                let mut output = format!("{} {keyword} {cardinality}", self.iri(property.iri()));
                if let Some(filler) = filler {
                    output.push(' ');
                    output.push_str(&self.data_primary(filler));
                }
                output
            }
        }
    }

    fn object_cardinality(
        &self,
        keyword: &str,
        cardinality: u32,
        property: &ObjectPropertyExpression,
        filler: Option<&ClassExpression>,
    ) -> String {
        let mut output = format!(
            "{} {keyword} {cardinality}",
            self.object_property_expression(property)
        );
        if let Some(filler) = filler {
            output.push(' ');
            output.push_str(&self.class_primary(filler));
        }
        output
    }

    /// Wraps n-ary expressions in parentheses.
    fn class_primary(&self, expression: &ClassExpression) -> String {
        match expression {
            ClassExpression::ObjectIntersectionOf(_) | ClassExpression::ObjectUnionOf(_) => {
                format!("({})", self.class_expression(expression))
            }
            _ => self.class_expression(expression),
        }
    }

    fn data_range(&self, range: &DataRange) -> String {
        match range {
            DataRange::Datatype(datatype) => self.iri(datatype.iri()),
            DataRange::DataIntersectionOf(operands) => operands
                .iter()
                .map(|r| self.data_primary(r))
                .collect::<Vec<_>>()
                .join(" and "),
            DataRange::DataUnionOf(operands) => operands
                .iter()
                .map(|r| self.data_primary(r))
                .collect::<Vec<_>>()
                .join(" or "),
            DataRange::DataComplementOf(operand) => format!("not {}", self.data_primary(operand)),
            DataRange::DataOneOf(literals) => {
                format!("{{{}}}", self.list(literals, |l| self.literal(l)))
            }
            DataRange::DatatypeRestriction { datatype, facets } => {
                let facets = facets
                    .iter()
                    .map(|(facet, value)| {
                        let name = FACETS
                            .iter()
                            .find(|(_, iri)| *iri == facet.as_ref())
                            .map_or_else(|| self.iri(facet), |(name, _)| (*name).into());
                        format!("{name} {}", self.literal(value))
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}[{facets}]", self.iri(datatype.iri()))
            }
        }
    }

    fn data_primary(&self, range: &DataRange) -> String {
        match range {
            DataRange::DataIntersectionOf(_) | DataRange::DataUnionOf(_) => {
                format!("({})", self.data_range(range))
            }
            _ => self.data_range(range),
        }
    }
}
