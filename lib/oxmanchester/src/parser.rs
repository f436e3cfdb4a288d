//! Manchester OWL Syntax parser.

use crate::checker::{
    CompositeEntityChecker, EntityChecker, ShortFormEntityChecker, ShortFormProvider,
    TableEntityChecker,
};
use crate::factory::{DefaultEntityFactory, EntityFactory};
use crate::lexer::{ManchesterLexer, ManchesterToken, TokenKind};
use crate::prefix::{PrefixTable, ResolveError};
use crate::preflight;
use crate::toolkit::{
    Lexer, ManchesterErrorKind, ManchesterParseError, ManchesterSyntaxError, TextPosition,
    TokenWithPosition,
};
use crate::vocab::{DATATYPE_KEYWORDS, FACETS};
use oxiri::{Iri, IriParseError};
use oxowl::{
    Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, Axiom, ClassExpression,
    DataProperty, DataRange, Datatype, Entity, EntityKind, Individual, ObjectProperty,
    ObjectPropertyExpression, Ontology,
};
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::fmt;
use std::io::{BufReader, Read};
use tracing::{debug, trace, warn};

/// Keywords starting a frame.
const FRAME_KEYWORDS: [&str; 12] = [
    "Class:",
    "ObjectProperty:",
    "DataProperty:",
    "AnnotationProperty:",
    "Individual:",
    "Datatype:",
    "EquivalentClasses:",
    "DisjointClasses:",
    "EquivalentProperties:",
    "DisjointProperties:",
    "SameIndividual:",
    "DifferentIndividuals:",
];

const RESTRICTION_KEYWORDS: [&str; 7] = ["some", "only", "value", "min", "max", "exactly", "Self"];

type ParseResult<T> = Result<T, ManchesterSyntaxError>;

/// Loader options of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth of class expressions, data ranges and annotations.
    pub max_depth: usize,
    /// Whether undeclared names are accepted, creating the entity the context requires.
    pub lenient: bool,
}

impl ParserConfig {
    /// Creates a new parser configuration with default values.
    pub fn new() -> Self {
        Self {
            max_depth: 100,
            lenient: false,
        }
    }

    /// Sets lenient mode.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Describes a successfully parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManchesterFormat {
    prefixes: PrefixTable,
}

impl ManchesterFormat {
    pub const NAME: &'static str = "Manchester OWL Syntax";

    #[inline]
    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// The prefixes in effect at the end of the document.
    #[inline]
    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }
}

impl fmt::Display for ManchesterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAME)
    }
}

/// A [Manchester OWL Syntax](https://www.w3.org/TR/owl2-manchester-syntax/) parser.
///
/// The parsed axioms are added to an [`Ontology`] owned by the caller.
/// Each frame is added as soon as it is parsed: if parsing fails, the frames before the failure stay in the ontology.
///
/// ```
/// use oxmanchester::ManchesterParser;
/// use oxowl::{Ontology, OwlClass};
/// use oxrdf::NamedNode;
///
/// let file = "Prefix: : <http://ex.org/>
/// Ontology: <http://ex.org/onto>
/// Class: :Dog
///     SubClassOf: :Animal
/// Class: :Animal";
///
/// let mut ontology = Ontology::new(None);
/// let format = ManchesterParser::new().parse_str(file, &mut ontology)?;
/// assert_eq!(format.name(), "Manchester OWL Syntax");
/// assert!(ontology.contains_class(&OwlClass::new(NamedNode::new("http://ex.org/Dog")?)));
/// assert_eq!(ontology.axiom_count(), 3);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct ManchesterParser<'a> {
    prefixes: Vec<(String, String)>,
    config: ParserConfig,
    default_ontology: Option<&'a Ontology>,
    short_form_provider: Option<&'a dyn ShortFormProvider>,
    entity_factory: Option<&'a dyn EntityFactory>,
}

impl<'a> ManchesterParser<'a> {
    /// Builds a new [`ManchesterParser`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a prefix before parsing, the document may still redeclare it.
    ///
    /// The prefix name is given without its trailing `:`.
    #[inline]
    pub fn with_prefix(
        mut self,
        prefix_name: impl Into<String>,
        prefix_iri: impl Into<String>,
    ) -> Result<Self, IriParseError> {
        self.prefixes.push((
            prefix_name.into(),
            Iri::parse(prefix_iri.into())?.into_inner(),
        ));
        Ok(self)
    }

    #[inline]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Accepts undeclared names, creating the entity the context requires.
    #[inline]
    pub fn lenient(mut self) -> Self {
        self.config.lenient = true;
        self
    }

    /// Uses the entities declared in this ontology to resolve names.
    ///
    /// The default ontology is never modified:
    /// the parsed axioms always go to the ontology given to the parse method.
    #[inline]
    pub fn with_default_ontology(mut self, ontology: &'a Ontology) -> Self {
        self.default_ontology = Some(ontology);
        self
    }

    /// Resolves names through this provider before using the prefixes and the declarations.
    #[inline]
    pub fn with_short_form_provider(mut self, provider: &'a dyn ShortFormProvider) -> Self {
        self.short_form_provider = Some(provider);
        self
    }

    #[inline]
    pub fn with_entity_factory(mut self, factory: &'a dyn EntityFactory) -> Self {
        self.entity_factory = Some(factory);
        self
    }

    /// Parses a document from a [`Read`] implementation into `ontology`.
    ///
    /// The whole source is read and released before the grammar is parsed.
    pub fn parse_read(
        self,
        read: impl Read,
        ontology: &mut Ontology,
    ) -> Result<ManchesterFormat, ManchesterParseError> {
        let text = preflight::scan(BufReader::new(read))?;
        Ok(self.parse_document(&text, ontology)?)
    }

    /// Parses a document from a string into `ontology`.
    pub fn parse_str(
        self,
        text: &str,
        ontology: &mut Ontology,
    ) -> Result<ManchesterFormat, ManchesterParseError> {
        let text = preflight::scan(text.as_bytes())?;
        Ok(self.parse_document(&text, ontology)?)
    }

    fn parse_document(
        self,
        text: &str,
        ontology: &mut Ontology,
    ) -> Result<ManchesterFormat, ManchesterSyntaxError> {
        let mut prefixes = PrefixTable::new();
        for (name, iri) in self.prefixes {
            prefixes.declare_prefix_unchecked(name, iri);
        }
        let mut parser = DocumentParser {
            tokens: TokenStream::new(text, self.config.lenient),
            prescanned: prescan_declarations(text, self.config.lenient),
            prefixes,
            config: self.config,
            factory: self.entity_factory.unwrap_or(&DefaultEntityFactory),
            default_ontology: self.default_ontology,
            short_form_provider: self.short_form_provider,
            checker: CompositeEntityChecker::new(),
            fabricated: FxHashSet::default(),
            frame: Vec::new(),
            depth: 0,
        };
        parser.parse_header(ontology)?;
        parser.parse_frames(ontology)?;
        debug!(
            "Parsed a Manchester Syntax document, the ontology now has {} axioms",
            ontology.axiom_count()
        );
        Ok(ManchesterFormat {
            prefixes: parser.prefixes,
        })
    }
}

/// Lists the `(kind, name)` of every entity frame so that forward references resolve.
fn prescan_declarations(text: &str, lenient: bool) -> Vec<(EntityKind, String)> {
    let mut lexer = Lexer::new(ManchesterLexer::new(lenient), text.as_bytes(), Some(b"#"));
    let mut declarations = Vec::new();
    let mut frame_kind = None;
    // Stops at the first lexical error, the grammar parser will report it
    while let Some(Ok(token)) = lexer.read_next(&()) {
        if let Some(kind) = frame_kind.take() {
            if let Some(name) = entity_name(&token.token) {
                declarations.push((kind, name));
            }
        }
        if let ManchesterToken::Keyword(keyword) = token.token {
            frame_kind = EntityKind::ALL
                .into_iter()
                .find(|kind| kind.frame_keyword() == keyword);
        }
    }
    declarations
}

/// The name of an entity as written: a prefixed or bare name or `<iri>`.
fn entity_name(token: &ManchesterToken) -> Option<String> {
    match token {
        ManchesterToken::Identifier(name) if !name.starts_with("_:") => Some(name.clone()),
        ManchesterToken::Iri(iri) => Some(format!("<{iri}>")),
        _ => None,
    }
}

fn unexpected(token: &ManchesterToken, location: TextPosition, expected: &str) -> ManchesterSyntaxError {
    let found = if *token == ManchesterToken::Eof {
        token.to_string()
    } else {
        format!("'{token}'")
    };
    ManchesterSyntaxError::new(
        ManchesterErrorKind::Syntax,
        location,
        format!("Expected {expected} but found {found}"),
    )
}

struct TokenStream<'a> {
    lexer: Lexer<'a, ManchesterLexer>,
    lookahead: VecDeque<TokenWithPosition<ManchesterToken>>,
}

impl<'a> TokenStream<'a> {
    fn new(text: &'a str, lenient: bool) -> Self {
        Self {
            lexer: Lexer::new(ManchesterLexer::new(lenient), text.as_bytes(), Some(b"#")),
            lookahead: VecDeque::new(),
        }
    }

    fn read_token(&mut self) -> ParseResult<TokenWithPosition<ManchesterToken>> {
        Ok(if let Some(token) = self.lexer.read_next(&()) {
            token?
        } else {
            let end = self.lexer.position();
            TokenWithPosition {
                token: ManchesterToken::Eof,
                location: end..end,
            }
        })
    }

    fn peek_nth(&mut self, n: usize) -> ParseResult<&TokenWithPosition<ManchesterToken>> {
        while self.lookahead.len() <= n {
            let token = self.read_token()?;
            self.lookahead.push_back(token);
        }
        Ok(&self.lookahead[n])
    }

    fn peek(&mut self) -> ParseResult<&TokenWithPosition<ManchesterToken>> {
        self.peek_nth(0)
    }

    fn next(&mut self) -> ParseResult<TokenWithPosition<ManchesterToken>> {
        if let Some(token) = self.lookahead.pop_front() {
            return Ok(token);
        }
        self.read_token()
    }
}

enum Property {
    Object(ObjectProperty),
    Data(DataProperty),
}

struct DocumentParser<'a> {
    tokens: TokenStream<'a>,
    prescanned: Vec<(EntityKind, String)>,
    prefixes: PrefixTable,
    config: ParserConfig,
    factory: &'a dyn EntityFactory,
    default_ontology: Option<&'a Ontology>,
    short_form_provider: Option<&'a dyn ShortFormProvider>,
    checker: CompositeEntityChecker<'a>,
    /// Entities created for undeclared names in lenient mode
    fabricated: FxHashSet<Entity>,
    /// Axioms of the frame being parsed
    frame: Vec<(Axiom, Vec<Annotation>)>,
    depth: usize,
}

impl<'a> DocumentParser<'a> {
    // Document structure

    fn parse_header(&mut self, ontology: &mut Ontology) -> ParseResult<()> {
        while self.eat_keyword("Prefix:")? {
            let token = self.tokens.next()?;
            let name = match &token.token {
                ManchesterToken::Identifier(name) if name.ends_with(':') => {
                    name[..name.len() - 1].to_owned()
                }
                other => {
                    return Err(unexpected(
                        other,
                        token.location.start,
                        "a prefix name like 'ex:'",
                    ));
                }
            };
            let token = self.tokens.next()?;
            let iri = match token.token {
                ManchesterToken::Iri(iri) => iri,
                other => return Err(unexpected(&other, token.location.start, "a full IRI")),
            };
            debug!("Declared prefix {name}: <{iri}>");
            self.prefixes.declare_prefix_unchecked(name, iri);
        }

        let token = self.tokens.next()?;
        if !token.token.is_keyword("Ontology:") {
            return Err(unexpected(&token.token, token.location.start, "'Ontology:'"));
        }
        if self.peek_is_iri()? {
            let iri = self.parse_iri()?;
            ontology.set_iri(Some(iri));
            if self.peek_is_iri()? {
                let version_iri = self.parse_iri()?;
                ontology.set_version_iri(Some(version_iri));
            }
        }
        if let Some(iri) = ontology.iri() {
            self.prefixes.set_default_namespace_from_ontology(iri.as_str());
        }
        self.build_checker(ontology);

        loop {
            if self.eat_keyword("Import:")? {
                let iri = self.parse_iri()?;
                debug!("Imported {iri}");
                ontology.add_import(iri);
            } else if self.eat_keyword("Annotations:")? {
                for annotation in self.parse_annotation_list()? {
                    ontology.add_annotation(annotation);
                }
            } else {
                return Ok(());
            }
        }
    }

    /// Builds the entity checker once the prefixes are known.
    fn build_checker(&mut self, ontology: &Ontology) {
        let mut table = TableEntityChecker::new(self.prefixes.clone())
            .with_declarations(ontology.declarations().cloned());
        if let Some(default_ontology) = self.default_ontology {
            table = table.with_default_ontology(default_ontology);
        }
        for (kind, name) in &self.prescanned {
            if let Ok(iri) = self.prefixes.resolve_name(name) {
                table.declare(self.factory.entity(*kind, iri));
            } else {
                trace!("Skipped the declaration of {kind} {name} during the pre-scan");
            }
        }
        let mut checker = CompositeEntityChecker::new();
        if let Some(provider) = self.short_form_provider {
            checker = checker.with(ShortFormEntityChecker::new(provider));
        }
        self.checker = checker.with(table);
    }

    fn parse_frames(&mut self, ontology: &mut Ontology) -> ParseResult<()> {
        loop {
            let token = self.tokens.next()?;
            let keyword = match token.token {
                ManchesterToken::Keyword(keyword) if FRAME_KEYWORDS.contains(&keyword) => keyword,
                ManchesterToken::Eof => return Ok(()),
                other => {
                    return Err(unexpected(&other, token.location.start, "a frame keyword"));
                }
            };
            let subject = self.tokens.peek()?.token.to_string();
            match keyword {
                "Class:" => self.parse_class_frame()?,
                "ObjectProperty:" => self.parse_object_property_frame()?,
                "DataProperty:" => self.parse_data_property_frame()?,
                "AnnotationProperty:" => self.parse_annotation_property_frame()?,
                "Individual:" => self.parse_individual_frame()?,
                "Datatype:" => self.parse_datatype_frame()?,
                "EquivalentClasses:" | "DisjointClasses:" => self.parse_class_list_frame(keyword)?,
                "EquivalentProperties:" | "DisjointProperties:" => {
                    self.parse_property_list_frame(keyword)?;
                }
                "SameIndividual:" | "DifferentIndividuals:" => {
                    self.parse_individual_list_frame(keyword)?;
                }
                _ => unreachable!(),
            }
            debug!(
                "Parsed {keyword} {subject} at line {} with {} axioms",
                token.location.start.line,
                self.frame.len()
            );
            for (axiom, annotations) in self.frame.drain(..) {
                ontology.add_annotated_axiom(axiom, annotations);
            }
        }
    }

    /// Consumes the next section keyword of the current frame.
    ///
    /// Returns `None` at the end of the frame i.e. on a frame keyword or at the end of the file.
    fn next_section(&mut self, allowed: &[&str]) -> ParseResult<Option<&'static str>> {
        let token = self.tokens.peek()?;
        let keyword = match &token.token {
            ManchesterToken::Keyword(keyword) if allowed.contains(keyword) => *keyword,
            ManchesterToken::Keyword(keyword) if FRAME_KEYWORDS.contains(keyword) => {
                return Ok(None);
            }
            ManchesterToken::Eof => return Ok(None),
            other => {
                return Err(unexpected(
                    other,
                    token.location.start,
                    &format!("one of {}, a frame keyword or end of file", allowed.join(" ")),
                ));
            }
        };
        self.tokens.next()?;
        Ok(Some(keyword))
    }

    fn add(&mut self, axiom: Axiom, annotations: Vec<Annotation>) {
        self.frame.push((axiom, annotations));
    }

    /// Parses the name of the entity described by a frame and declares it.
    fn parse_frame_subject(&mut self, kind: EntityKind) -> ParseResult<NamedNode> {
        let token = self.tokens.next()?;
        let iri = self.resolve(&token, kind)?;
        self.add(
            Axiom::declaration(self.factory.entity(kind, iri.clone())),
            Vec::new(),
        );
        Ok(iri)
    }

    fn parse_annotation_section(&mut self, subject: &AnnotationSubject) -> ParseResult<()> {
        for annotation in self.parse_annotation_list()? {
            self.add(
                Axiom::AnnotationAssertion {
                    property: annotation.property,
                    subject: subject.clone(),
                    value: annotation.value,
                },
                annotation.annotations,
            );
        }
        Ok(())
    }

    fn parse_class_frame(&mut self) -> ParseResult<()> {
        let iri = self.parse_frame_subject(EntityKind::Class)?;
        let class = self.factory.class(iri.clone());
        let subject = AnnotationSubject::Iri(iri);
        while let Some(section) = self.next_section(&[
            "Annotations:",
            "SubClassOf:",
            "EquivalentTo:",
            "DisjointWith:",
            "DisjointUnionOf:",
            "HasKey:",
        ])? {
            match section {
                "Annotations:" => self.parse_annotation_section(&subject)?,
                "SubClassOf:" => {
                    for (annotations, super_class) in
                        self.parse_annotated_list(Self::parse_description)?
                    {
                        self.add(Axiom::subclass_of(class.clone(), super_class), annotations);
                    }
                }
                "EquivalentTo:" => {
                    for (annotations, other) in self.parse_annotated_list(Self::parse_description)? {
                        self.add(
                            Axiom::EquivalentClasses(vec![class.clone().into(), other]),
                            annotations,
                        );
                    }
                }
                "DisjointWith:" => {
                    for (annotations, other) in self.parse_annotated_list(Self::parse_description)? {
                        self.add(
                            Axiom::DisjointClasses(vec![class.clone().into(), other]),
                            annotations,
                        );
                    }
                }
                "DisjointUnionOf:" => {
                    let annotations = self.parse_optional_annotations()?;
                    let disjoint_classes = self.parse_list_of_at_least_two(Self::parse_description)?;
                    self.add(
                        Axiom::DisjointUnion {
                            class: class.clone(),
                            disjoint_classes,
                        },
                        annotations,
                    );
                }
                "HasKey:" => {
                    let annotations = self.parse_optional_annotations()?;
                    let mut object_properties = Vec::new();
                    let mut data_properties = Vec::new();
                    loop {
                        if self.peek_is_keyword("inverse")? {
                            object_properties.push(self.parse_object_property_expression()?);
                        } else {
                            let token = self.tokens.next()?;
                            match self.resolve_property(&token, false)? {
                                Property::Object(p) => object_properties.push(p.into()),
                                Property::Data(p) => data_properties.push(p),
                            }
                        }
                        if !self.eat_punctuation(",")? {
                            break;
                        }
                    }
                    self.add(
                        Axiom::HasKey {
                            class: class.clone().into(),
                            object_properties,
                            data_properties,
                        },
                        annotations,
                    );
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn parse_object_property_frame(&mut self) -> ParseResult<()> {
        let iri = self.parse_frame_subject(EntityKind::ObjectProperty)?;
        let property =
            ObjectPropertyExpression::ObjectProperty(self.factory.object_property(iri.clone()));
        let subject = AnnotationSubject::Iri(iri);
        while let Some(section) = self.next_section(&[
            "Annotations:",
            "Domain:",
            "Range:",
            "Characteristics:",
            "SubPropertyOf:",
            "EquivalentTo:",
            "DisjointWith:",
            "InverseOf:",
            "SubPropertyChain:",
        ])? {
            match section {
                "Annotations:" => self.parse_annotation_section(&subject)?,
                "Domain:" => {
                    for (annotations, domain) in self.parse_annotated_list(Self::parse_description)? {
                        self.add(
                            Axiom::ObjectPropertyDomain {
                                property: property.clone(),
                                domain,
                            },
                            annotations,
                        );
                    }
                }
                "Range:" => {
                    for (annotations, range) in self.parse_annotated_list(Self::parse_description)? {
                        self.add(
                            Axiom::ObjectPropertyRange {
                                property: property.clone(),
                                range,
                            },
                            annotations,
                        );
                    }
                }
                "Characteristics:" => {
                    for (annotations, characteristic) in
                        self.parse_annotated_list(Self::parse_characteristic)?
                    {
                        let p = property.clone();
                        let axiom = match characteristic {
                            "Functional" => Axiom::FunctionalObjectProperty(p),
                            "InverseFunctional" => Axiom::InverseFunctionalObjectProperty(p),
                            "Reflexive" => Axiom::ReflexiveObjectProperty(p),
                            "Irreflexive" => Axiom::IrreflexiveObjectProperty(p),
                            "Symmetric" => Axiom::SymmetricObjectProperty(p),
                            "Asymmetric" => Axiom::AsymmetricObjectProperty(p),
                            "Transitive" => Axiom::TransitiveObjectProperty(p),
                            _ => unreachable!(),
                        };
                        self.add(axiom, annotations);
                    }
                }
                "SubPropertyOf:" => {
                    for (annotations, super_property) in
                        self.parse_annotated_list(Self::parse_object_property_expression)?
                    {
                        self.add(
                            Axiom::SubObjectPropertyOf {
                                sub_property: property.clone(),
                                super_property,
                            },
                            annotations,
                        );
                    }
                }
                "EquivalentTo:" => {
                    for (annotations, other) in
                        self.parse_annotated_list(Self::parse_object_property_expression)?
                    {
                        self.add(
                            Axiom::EquivalentObjectProperties(vec![property.clone(), other]),
                            annotations,
                        );
                    }
                }
                "DisjointWith:" => {
                    for (annotations, other) in
                        self.parse_annotated_list(Self::parse_object_property_expression)?
                    {
                        self.add(
                            Axiom::DisjointObjectProperties(vec![property.clone(), other]),
                            annotations,
                        );
                    }
                }
                "InverseOf:" => {
                    for (annotations, other) in
                        self.parse_annotated_list(Self::parse_object_property_expression)?
                    {
                        self.add(
                            Axiom::InverseObjectProperties(property.clone(), other),
                            annotations,
                        );
                    }
                }
                "SubPropertyChain:" => {
                    for (annotations, property_chain) in
                        self.parse_annotated_list(Self::parse_property_chain)?
                    {
                        self.add(
                            Axiom::SubPropertyChainOf {
                                property_chain,
                                super_property: property.clone(),
                            },
                            annotations,
                        );
                    }
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn parse_data_property_frame(&mut self) -> ParseResult<()> {
        let iri = self.parse_frame_subject(EntityKind::DataProperty)?;
        let property = self.factory.data_property(iri.clone());
        let subject = AnnotationSubject::Iri(iri);
        while let Some(section) = self.next_section(&[
            "Annotations:",
            "Domain:",
            "Range:",
            "Characteristics:",
            "SubPropertyOf:",
            "EquivalentTo:",
            "DisjointWith:",
        ])? {
            match section {
                "Annotations:" => self.parse_annotation_section(&subject)?,
                "Domain:" => {
                    for (annotations, domain) in self.parse_annotated_list(Self::parse_description)? {
                        self.add(
                            Axiom::DataPropertyDomain {
                                property: property.clone(),
                                domain,
                            },
                            annotations,
                        );
                    }
                }
                "Range:" => {
                    for (annotations, range) in self.parse_annotated_list(Self::parse_data_range)? {
                        self.add(
                            Axiom::DataPropertyRange {
                                property: property.clone(),
                                range,
                            },
                            annotations,
                        );
                    }
                }
                "Characteristics:" => {
                    let items = self.parse_annotated_list(|p| {
                        let token = p.tokens.next()?;
                        if token.token.is_keyword("Functional") {
                            Ok(())
                        } else {
                            Err(unexpected(
                                &token.token,
                                token.location.start,
                                "'Functional', the only characteristic of data properties",
                            ))
                        }
                    })?;
                    for (annotations, ()) in items {
                        self.add(Axiom::FunctionalDataProperty(property.clone()), annotations);
                    }
                }
                "SubPropertyOf:" => {
                    for (annotations, super_property) in
                        self.parse_annotated_list(Self::parse_data_property)?
                    {
                        self.add(
                            Axiom::SubDataPropertyOf {
                                sub_property: property.clone(),
                                super_property,
                            },
                            annotations,
                        );
                    }
                }
                "EquivalentTo:" => {
                    for (annotations, other) in self.parse_annotated_list(Self::parse_data_property)? {
                        self.add(
                            Axiom::EquivalentDataProperties(vec![property.clone(), other]),
                            annotations,
                        );
                    }
                }
                "DisjointWith:" => {
                    for (annotations, other) in self.parse_annotated_list(Self::parse_data_property)? {
                        self.add(
                            Axiom::DisjointDataProperties(vec![property.clone(), other]),
                            annotations,
                        );
                    }
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn parse_annotation_property_frame(&mut self) -> ParseResult<()> {
        let iri = self.parse_frame_subject(EntityKind::AnnotationProperty)?;
        let property = self.factory.annotation_property(iri.clone());
        let subject = AnnotationSubject::Iri(iri);
        while let Some(section) =
            self.next_section(&["Annotations:", "Domain:", "Range:", "SubPropertyOf:"])?
        {
            match section {
                "Annotations:" => self.parse_annotation_section(&subject)?,
                "Domain:" => {
                    for (annotations, domain) in self.parse_annotated_list(Self::parse_iri)? {
                        self.add(
                            Axiom::AnnotationPropertyDomain {
                                property: property.clone(),
                                domain,
                            },
                            annotations,
                        );
                    }
                }
                "Range:" => {
                    for (annotations, range) in self.parse_annotated_list(Self::parse_iri)? {
                        self.add(
                            Axiom::AnnotationPropertyRange {
                                property: property.clone(),
                                range,
                            },
                            annotations,
                        );
                    }
                }
                "SubPropertyOf:" => {
                    for (annotations, super_property) in
                        self.parse_annotated_list(Self::parse_annotation_property)?
                    {
                        self.add(
                            Axiom::SubAnnotationPropertyOf {
                                sub_property: property.clone(),
                                super_property,
                            },
                            annotations,
                        );
                    }
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn parse_individual_frame(&mut self) -> ParseResult<()> {
        let individual = if self.peek_is_anonymous()? {
            self.parse_individual()?
        } else {
            Individual::Named(self.parse_frame_subject(EntityKind::NamedIndividual)?)
        };
        let subject = match &individual {
            Individual::Named(iri) => AnnotationSubject::Iri(iri.clone()),
            Individual::Anonymous(b) => AnnotationSubject::Anonymous(b.clone()),
        };
        while let Some(section) = self.next_section(&[
            "Annotations:",
            "Types:",
            "Facts:",
            "SameAs:",
            "DifferentFrom:",
        ])? {
            match section {
                "Annotations:" => self.parse_annotation_section(&subject)?,
                "Types:" => {
                    for (annotations, class) in self.parse_annotated_list(Self::parse_description)? {
                        self.add(
                            Axiom::class_assertion(class, individual.clone()),
                            annotations,
                        );
                    }
                }
                "Facts:" => {
                    for (annotations, fact) in
                        self.parse_annotated_list(|p| p.parse_fact(&individual))?
                    {
                        self.add(fact, annotations);
                    }
                }
                "SameAs:" => {
                    for (annotations, other) in self.parse_annotated_list(Self::parse_individual)? {
                        self.add(
                            Axiom::SameIndividual(vec![individual.clone(), other]),
                            annotations,
                        );
                    }
                }
                "DifferentFrom:" => {
                    for (annotations, other) in self.parse_annotated_list(Self::parse_individual)? {
                        self.add(
                            Axiom::DifferentIndividuals(vec![individual.clone(), other]),
                            annotations,
                        );
                    }
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn parse_fact(&mut self, source: &Individual) -> ParseResult<Axiom> {
        let negative = self.eat_keyword("not")?;
        let token = self.tokens.next()?;
        let is_literal_next = self.tokens.peek()?.token.kind() == TokenKind::Literal;
        Ok(match self.resolve_property(&token, is_literal_next)? {
            Property::Object(p) => {
                let property = ObjectPropertyExpression::ObjectProperty(p);
                let source = source.clone();
                let target = self.parse_individual()?;
                if negative {
                    Axiom::NegativeObjectPropertyAssertion {
                        property,
                        source,
                        target,
                    }
                } else {
                    Axiom::ObjectPropertyAssertion {
                        property,
                        source,
                        target,
                    }
                }
            }
            Property::Data(property) => {
                let source = source.clone();
                let target = self.parse_literal()?;
                if negative {
                    Axiom::NegativeDataPropertyAssertion {
                        property,
                        source,
                        target,
                    }
                } else {
                    Axiom::DataPropertyAssertion {
                        property,
                        source,
                        target,
                    }
                }
            }
        })
    }

    fn parse_datatype_frame(&mut self) -> ParseResult<()> {
        let iri = self.parse_frame_subject(EntityKind::Datatype)?;
        let datatype = self.factory.datatype(iri.clone());
        let subject = AnnotationSubject::Iri(iri);
        while let Some(section) = self.next_section(&["Annotations:", "EquivalentTo:"])? {
            match section {
                "Annotations:" => self.parse_annotation_section(&subject)?,
                "EquivalentTo:" => {
                    for (annotations, range) in self.parse_annotated_list(Self::parse_data_range)? {
                        self.add(
                            Axiom::DatatypeDefinition {
                                datatype: datatype.clone(),
                                range,
                            },
                            annotations,
                        );
                    }
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn parse_class_list_frame(&mut self, keyword: &str) -> ParseResult<()> {
        let annotations = self.parse_optional_annotations()?;
        let classes = self.parse_list_of_at_least_two(Self::parse_description)?;
        let axiom = if keyword == "EquivalentClasses:" {
            Axiom::EquivalentClasses(classes)
        } else {
            Axiom::DisjointClasses(classes)
        };
        self.add(axiom, annotations);
        Ok(())
    }

    fn parse_property_list_frame(&mut self, keyword: &str) -> ParseResult<()> {
        let annotations = self.parse_optional_annotations()?;
        let is_equivalent = keyword == "EquivalentProperties:";
        let is_object = if self.peek_is_keyword("inverse")? {
            true
        } else {
            let token = self.tokens.peek()?.clone();
            matches!(self.resolve_property(&token, false)?, Property::Object(_))
        };
        let axiom = if is_object {
            let properties =
                self.parse_list_of_at_least_two(Self::parse_object_property_expression)?;
            if is_equivalent {
                Axiom::EquivalentObjectProperties(properties)
            } else {
                Axiom::DisjointObjectProperties(properties)
            }
        } else {
            let properties = self.parse_list_of_at_least_two(Self::parse_data_property)?;
            if is_equivalent {
                Axiom::EquivalentDataProperties(properties)
            } else {
                Axiom::DisjointDataProperties(properties)
            }
        };
        self.add(axiom, annotations);
        Ok(())
    }

    fn parse_individual_list_frame(&mut self, keyword: &str) -> ParseResult<()> {
        let annotations = self.parse_optional_annotations()?;
        let individuals = self.parse_list_of_at_least_two(Self::parse_individual)?;
        let axiom = if keyword == "SameIndividual:" {
            Axiom::SameIndividual(individuals)
        } else {
            Axiom::DifferentIndividuals(individuals)
        };
        self.add(axiom, annotations);
        Ok(())
    }

    // Lists and annotations

    /// Parses `[Annotations: ...] item {, [Annotations: ...] item}`.
    fn parse_annotated_list<T>(
        &mut self,
        mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<(Vec<Annotation>, T)>> {
        let mut items = Vec::new();
        loop {
            let annotations = self.parse_optional_annotations()?;
            items.push((annotations, parse_item(self)?));
            if !self.eat_punctuation(",")? {
                return Ok(items);
            }
        }
    }

    fn parse_list_of_at_least_two<T>(
        &mut self,
        mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let start = self.tokens.peek()?.location.start;
        let mut items = vec![parse_item(self)?];
        while self.eat_punctuation(",")? {
            items.push(parse_item(self)?);
        }
        if items.len() < 2 {
            return Err(ManchesterSyntaxError::new(
                ManchesterErrorKind::Syntax,
                start,
                "At least two elements are expected in this list",
            ));
        }
        Ok(items)
    }

    fn parse_optional_annotations(&mut self) -> ParseResult<Vec<Annotation>> {
        if self.eat_keyword("Annotations:")? {
            self.parse_annotation_list()
        } else {
            Ok(Vec::new())
        }
    }

    /// Parses the content of an `Annotations:` section, annotations may be annotated themselves.
    fn parse_annotation_list(&mut self) -> ParseResult<Vec<Annotation>> {
        self.enter()?;
        let items = self.parse_annotated_list(Self::parse_annotation);
        self.depth -= 1;
        Ok(items?
            .into_iter()
            .map(|(annotations, (property, value))| Annotation {
                property,
                value,
                annotations,
            })
            .collect())
    }

    fn parse_annotation(&mut self) -> ParseResult<(AnnotationProperty, AnnotationValue)> {
        let property = self.parse_annotation_property()?;
        let value = match self.tokens.peek()?.token.kind() {
            TokenKind::Literal => AnnotationValue::Literal(self.parse_literal()?),
            TokenKind::Identifier if self.peek_is_anonymous()? => {
                match self.parse_individual()? {
                    Individual::Anonymous(b) => AnnotationValue::Anonymous(b),
                    Individual::Named(n) => AnnotationValue::Iri(n),
                }
            }
            TokenKind::Identifier | TokenKind::Iri => AnnotationValue::Iri(self.parse_iri()?),
            _ => {
                let token = self.tokens.next()?;
                return Err(unexpected(
                    &token.token,
                    token.location.start,
                    "an annotation value",
                ));
            }
        };
        Ok((property, value))
    }

    // Class expressions

    /// description ::= conjunction { 'or' conjunction }
    fn parse_description(&mut self) -> ParseResult<ClassExpression> {
        self.enter()?;
        let result = self.parse_union();
        self.depth -= 1;
        result
    }

    fn parse_union(&mut self) -> ParseResult<ClassExpression> {
        let first = self.parse_conjunction()?;
        if !self.peek_is_keyword("or")? {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.eat_keyword("or")? {
            operands.push(self.parse_conjunction()?);
        }
        Ok(ClassExpression::ObjectUnionOf(operands))
    }

    /// conjunction ::= primary { ('and' | 'that') primary }
    fn parse_conjunction(&mut self) -> ParseResult<ClassExpression> {
        let first = self.parse_primary()?;
        if !self.peek_is_keyword("and")? && !self.peek_is_keyword("that")? {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.eat_keyword("and")? || self.eat_keyword("that")? {
            operands.push(self.parse_primary()?);
        }
        Ok(ClassExpression::ObjectIntersectionOf(operands))
    }

    /// primary ::= ['not'] (restriction | atomic)
    fn parse_primary(&mut self) -> ParseResult<ClassExpression> {
        self.enter()?;
        let result = self.parse_unbounded_primary();
        self.depth -= 1;
        result
    }

    fn parse_unbounded_primary(&mut self) -> ParseResult<ClassExpression> {
        if self.eat_keyword("not")? {
            return Ok(ClassExpression::ObjectComplementOf(Box::new(
                self.parse_primary()?,
            )));
        }
        if self.peek_is_keyword("inverse")? {
            let property = self.parse_object_property_expression()?;
            return self.parse_object_restriction(property);
        }
        let is_restriction = entity_name(&self.tokens.peek()?.token).is_some()
            && matches!(
                self.tokens.peek_nth(1)?.token,
                ManchesterToken::Keyword(k) if RESTRICTION_KEYWORDS.contains(&k)
            );
        if is_restriction {
            let token = self.tokens.next()?;
            let keyword_is_value = self.peek_is_keyword("value")?;
            let is_literal_next = keyword_is_value
                && self.tokens.peek_nth(1)?.token.kind() == TokenKind::Literal;
            return match self.resolve_property(&token, is_literal_next)? {
                Property::Object(p) => self.parse_object_restriction(p.into()),
                Property::Data(p) => self.parse_data_restriction(p),
            };
        }
        self.parse_atomic()
    }

    /// atomic ::= classIRI | '{' individualList '}' | '(' description ')'
    fn parse_atomic(&mut self) -> ParseResult<ClassExpression> {
        let token = self.tokens.next()?;
        match &token.token {
            ManchesterToken::Punctuation("(") => {
                let description = self.parse_description()?;
                self.expect_punctuation(")")?;
                Ok(description)
            }
            ManchesterToken::Punctuation("{") => {
                let mut individuals = vec![self.parse_individual()?];
                while self.eat_punctuation(",")? {
                    individuals.push(self.parse_individual()?);
                }
                self.expect_punctuation("}")?;
                Ok(ClassExpression::ObjectOneOf(individuals))
            }
            ManchesterToken::Identifier(_) | ManchesterToken::Iri(_) => {
                let iri = self.resolve(&token, EntityKind::Class)?;
                Ok(ClassExpression::Class(self.factory.class(iri)))
            }
            other => Err(unexpected(other, token.location.start, "a class expression")),
        }
    }

    fn starts_primary(&mut self) -> ParseResult<bool> {
        let token = &self.tokens.peek()?.token;
        Ok(entity_name(token).is_some()
            || token.is_keyword("not")
            || token.is_keyword("inverse")
            || token.is_punctuation("(")
            || token.is_punctuation("{"))
    }

    fn parse_object_restriction(
        &mut self,
        property: ObjectPropertyExpression,
    ) -> ParseResult<ClassExpression> {
        let token = self.tokens.next()?;
        Ok(match token.token {
            ManchesterToken::Keyword("some") => ClassExpression::ObjectSomeValuesFrom {
                property,
                filler: Box::new(self.parse_primary()?),
            },
            ManchesterToken::Keyword("only") => ClassExpression::ObjectAllValuesFrom {
                property,
                filler: Box::new(self.parse_primary()?),
            },
            ManchesterToken::Keyword("value") => ClassExpression::ObjectHasValue {
                property,
                individual: self.parse_individual()?,
            },
            ManchesterToken::Keyword("Self") => ClassExpression::ObjectHasSelf(property),
            ManchesterToken::Keyword(keyword @ ("min" | "max" | "exactly")) => {
                let cardinality = self.parse_cardinality()?;
                let filler = if self.starts_primary()? {
                    Some(Box::new(self.parse_primary()?))
                } else {
                    None
                };
                match keyword {
                    "min" => ClassExpression::ObjectMinCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    "max" => ClassExpression::ObjectMaxCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    _ => ClassExpression::ObjectExactCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                }
            }
            other => {
                return Err(unexpected(
                    &other,
                    token.location.start,
                    "'some', 'only', 'value', 'Self', 'min', 'max' or 'exactly'",
                ));
            }
        })
    }

    fn parse_data_restriction(&mut self, property: DataProperty) -> ParseResult<ClassExpression> {
        let token = self.tokens.next()?;
        Ok(match token.token {
            ManchesterToken::Keyword("some") => ClassExpression::DataSomeValuesFrom {
                property,
                filler: self.parse_data_primary()?,
            },
            ManchesterToken::Keyword("only") => ClassExpression::DataAllValuesFrom {
                property,
                filler: self.parse_data_primary()?,
            },
            ManchesterToken::Keyword("value") => ClassExpression::DataHasValue {
                property,
                value: self.parse_literal()?,
            },
            ManchesterToken::Keyword(keyword @ ("min" | "max" | "exactly")) => {
                let cardinality = self.parse_cardinality()?;
                let token = &self.tokens.peek()?.token;
                let filler = if entity_name(token).is_some()
                    || token.is_keyword("not")
                    || token.is_punctuation("(")
                    || token.is_punctuation("{")
                {
                    Some(self.parse_data_primary()?)
                } else {
                    None
                };
                match keyword {
                    "min" => ClassExpression::DataMinCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    "max" => ClassExpression::DataMaxCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    _ => ClassExpression::DataExactCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                }
            }
            other => {
                return Err(unexpected(
                    &other,
                    token.location.start,
                    "'some', 'only', 'value', 'min', 'max' or 'exactly' after a data property",
                ));
            }
        })
    }

    fn parse_cardinality(&mut self) -> ParseResult<u32> {
        let token = self.tokens.next()?;
        if let ManchesterToken::Integer(value) = &token.token {
            if let Ok(cardinality) = value.parse() {
                return Ok(cardinality);
            }
            return Err(ManchesterSyntaxError::new(
                ManchesterErrorKind::Syntax,
                token.location.start,
                format!("Invalid cardinality {value}, a non negative integer is expected"),
            ));
        }
        Err(unexpected(&token.token, token.location.start, "a cardinality"))
    }

    // Properties

    /// objectPropertyExpression ::= objectPropertyIRI | 'inverse' objectPropertyIRI
    fn parse_object_property_expression(&mut self) -> ParseResult<ObjectPropertyExpression> {
        if self.eat_keyword("inverse")? {
            let has_parenthesis = self.eat_punctuation("(")?;
            let property = self.parse_object_property()?;
            if has_parenthesis {
                self.expect_punctuation(")")?;
            }
            return Ok(ObjectPropertyExpression::ObjectInverseOf(property));
        }
        Ok(ObjectPropertyExpression::ObjectProperty(
            self.parse_object_property()?,
        ))
    }

    fn parse_property_chain(&mut self) -> ParseResult<Vec<ObjectPropertyExpression>> {
        let mut chain = vec![self.parse_object_property_expression()?];
        while self.eat_keyword("o")? {
            chain.push(self.parse_object_property_expression()?);
        }
        if chain.len() < 2 {
            let token = self.tokens.peek()?;
            return Err(unexpected(&token.token, token.location.start, "'o'"));
        }
        Ok(chain)
    }

    fn parse_characteristic(&mut self) -> ParseResult<&'static str> {
        let token = self.tokens.next()?;
        match token.token {
            ManchesterToken::Keyword(
                keyword @ ("Functional" | "InverseFunctional" | "Reflexive" | "Irreflexive"
                | "Symmetric" | "Asymmetric" | "Transitive"),
            ) => Ok(keyword),
            other => Err(unexpected(
                &other,
                token.location.start,
                "a property characteristic",
            )),
        }
    }

    fn parse_object_property(&mut self) -> ParseResult<ObjectProperty> {
        let token = self.tokens.next()?;
        let iri = self.resolve(&token, EntityKind::ObjectProperty)?;
        Ok(self.factory.object_property(iri))
    }

    fn parse_data_property(&mut self) -> ParseResult<DataProperty> {
        let token = self.tokens.next()?;
        let iri = self.resolve(&token, EntityKind::DataProperty)?;
        Ok(self.factory.data_property(iri))
    }

    fn parse_annotation_property(&mut self) -> ParseResult<AnnotationProperty> {
        let token = self.tokens.next()?;
        let iri = self.resolve(&token, EntityKind::AnnotationProperty)?;
        Ok(self.factory.annotation_property(iri))
    }

    /// Finds if a property name is an object or a data property.
    ///
    /// In lenient mode an unknown name becomes a data property if `is_literal_next` and an object property otherwise.
    fn resolve_property(
        &mut self,
        token: &TokenWithPosition<ManchesterToken>,
        is_literal_next: bool,
    ) -> ParseResult<Property> {
        let Some(name) = entity_name(&token.token) else {
            return Err(unexpected(&token.token, token.location.start, "a property name"));
        };
        let location = token.location.start;
        if let Some(iri) = self
            .lookup(&name, EntityKind::ObjectProperty)
            .map_err(|e| resolve_error(location, e))?
        {
            return Ok(Property::Object(self.factory.object_property(iri)));
        }
        if let Some(iri) = self
            .lookup(&name, EntityKind::DataProperty)
            .map_err(|e| resolve_error(location, e))?
        {
            return Ok(Property::Data(self.factory.data_property(iri)));
        }
        if !self.config.lenient {
            return Err(ManchesterSyntaxError::new(
                ManchesterErrorKind::UnknownEntity,
                location,
                format!("{name} is not a known object property or data property"),
            ));
        }
        Ok(if is_literal_next {
            Property::Data(
                self.factory
                    .data_property(self.resolve(token, EntityKind::DataProperty)?),
            )
        } else {
            Property::Object(
                self.factory
                    .object_property(self.resolve(token, EntityKind::ObjectProperty)?),
            )
        })
    }

    // Individuals, data ranges and literals

    fn parse_individual(&mut self) -> ParseResult<Individual> {
        let token = self.tokens.next()?;
        if let ManchesterToken::Identifier(name) = &token.token {
            if let Some(label) = name.strip_prefix("_:") {
                return self.factory.anonymous_individual(label).map_err(|e| {
                    ManchesterSyntaxError::new(
                        ManchesterErrorKind::Syntax,
                        token.location.start,
                        e.to_string(),
                    )
                });
            }
        }
        let iri = self.resolve(&token, EntityKind::NamedIndividual)?;
        Ok(Individual::Named(self.factory.named_individual(iri)))
    }

    /// dataRange ::= dataConjunction { 'or' dataConjunction }
    fn parse_data_range(&mut self) -> ParseResult<DataRange> {
        self.enter()?;
        let result = self.parse_data_union();
        self.depth -= 1;
        result
    }

    fn parse_data_union(&mut self) -> ParseResult<DataRange> {
        let first = self.parse_data_conjunction()?;
        if !self.peek_is_keyword("or")? {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.eat_keyword("or")? {
            operands.push(self.parse_data_conjunction()?);
        }
        Ok(DataRange::DataUnionOf(operands))
    }

    fn parse_data_conjunction(&mut self) -> ParseResult<DataRange> {
        let first = self.parse_data_primary()?;
        if !self.peek_is_keyword("and")? {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.eat_keyword("and")? {
            operands.push(self.parse_data_primary()?);
        }
        Ok(DataRange::DataIntersectionOf(operands))
    }

    /// dataPrimary ::= ['not'] (datatype | datatypeRestriction | '{' literalList '}' | '(' dataRange ')')
    fn parse_data_primary(&mut self) -> ParseResult<DataRange> {
        self.enter()?;
        let result = self.parse_unbounded_data_primary();
        self.depth -= 1;
        result
    }

    fn parse_unbounded_data_primary(&mut self) -> ParseResult<DataRange> {
        if self.eat_keyword("not")? {
            return Ok(DataRange::DataComplementOf(Box::new(
                self.parse_data_primary()?,
            )));
        }
        if self.eat_punctuation("(")? {
            let range = self.parse_data_range()?;
            self.expect_punctuation(")")?;
            return Ok(range);
        }
        if self.eat_punctuation("{")? {
            let mut literals = vec![self.parse_literal()?];
            while self.eat_punctuation(",")? {
                literals.push(self.parse_literal()?);
            }
            self.expect_punctuation("}")?;
            return Ok(DataRange::DataOneOf(literals));
        }
        let datatype = self.parse_datatype()?;
        if !self.eat_punctuation("[")? {
            return Ok(DataRange::Datatype(datatype));
        }
        let mut facets = Vec::new();
        loop {
            let token = self.tokens.next()?;
            let facet_name = match &token.token {
                ManchesterToken::Identifier(name) => name.as_str(),
                ManchesterToken::Punctuation(p) => *p,
                _ => "",
            };
            let Some((_, facet)) = FACETS.iter().find(|(name, _)| *name == facet_name) else {
                return Err(unexpected(&token.token, token.location.start, "a facet"));
            };
            facets.push((facet.into_owned(), self.parse_literal()?));
            if !self.eat_punctuation(",")? {
                break;
            }
        }
        self.expect_punctuation("]")?;
        Ok(DataRange::DatatypeRestriction { datatype, facets })
    }

    fn parse_datatype(&mut self) -> ParseResult<Datatype> {
        let token = self.tokens.next()?;
        if let ManchesterToken::Identifier(name) = &token.token {
            if let Some((_, iri)) = DATATYPE_KEYWORDS.iter().find(|(k, _)| *k == name.as_str()) {
                return Ok(self.factory.datatype(iri.into_owned()));
            }
        }
        let iri = self.resolve(&token, EntityKind::Datatype)?;
        Ok(self.factory.datatype(iri))
    }

    /// literal ::= typedLiteral | stringLiteralNoLanguage | stringLiteralWithLanguage | integerLiteral | decimalLiteral | floatingPointLiteral
    fn parse_literal(&mut self) -> ParseResult<Literal> {
        let token = self.tokens.next()?;
        Ok(match token.token {
            ManchesterToken::String {
                value,
                language: Some(language),
            } => self.factory.language_tagged_literal(value, language),
            ManchesterToken::String {
                value,
                language: None,
            } => {
                if self.eat_punctuation("^^")? {
                    let datatype = self.parse_datatype()?;
                    self.factory.typed_literal(value, &datatype)
                } else {
                    self.factory.simple_literal(value)
                }
            }
            ManchesterToken::Integer(value) => self
                .factory
                .typed_literal(value, &Datatype::from(xsd::INTEGER)),
            ManchesterToken::Decimal(value) => self
                .factory
                .typed_literal(value, &Datatype::from(xsd::DECIMAL)),
            ManchesterToken::Float(value) => {
                self.factory.typed_literal(value, &Datatype::from(xsd::FLOAT))
            }
            other => return Err(unexpected(&other, token.location.start, "a literal")),
        })
    }

    /// A full IRI or a prefixed name that is not checked against the declarations.
    fn parse_iri(&mut self) -> ParseResult<NamedNode> {
        let token = self.tokens.next()?;
        match &token.token {
            // Already validated by the lexer unless in lenient mode
            ManchesterToken::Iri(iri) => Ok(NamedNode::new_unchecked(iri.as_str())),
            ManchesterToken::Identifier(name) if !name.starts_with("_:") => self
                .prefixes
                .resolve(name)
                .map_err(|e| resolve_error(token.location.start, e)),
            other => Err(unexpected(other, token.location.start, "an IRI")),
        }
    }

    // Name resolution

    fn lookup(&self, name: &str, kind: EntityKind) -> Result<Option<NamedNode>, ResolveError> {
        if let Some(entity) = self.checker.check_entity(name, kind)? {
            return Ok(Some(entity.iri().clone()));
        }
        if !self.fabricated.is_empty() {
            let iri = self.prefixes.resolve_name(name)?;
            if self.fabricated.contains(&Entity::new(kind, iri.clone())) {
                return Ok(Some(iri));
            }
        }
        Ok(None)
    }

    /// Resolves the name in `token` to an entity of the given kind.
    ///
    /// Unknown names are an error unless in lenient mode where the entity is created and declared.
    fn resolve(
        &mut self,
        token: &TokenWithPosition<ManchesterToken>,
        kind: EntityKind,
    ) -> ParseResult<NamedNode> {
        let location = token.location.start;
        let Some(name) = entity_name(&token.token) else {
            return Err(unexpected(&token.token, location, &format!("{kind} name")));
        };
        if let Some(iri) = self
            .lookup(&name, kind)
            .map_err(|e| resolve_error(location, e))?
        {
            return Ok(iri);
        }
        if !self.config.lenient {
            return Err(ManchesterSyntaxError::new(
                ManchesterErrorKind::UnknownEntity,
                location,
                format!("{name} is not a known {kind}"),
            ));
        }
        let iri = self
            .prefixes
            .resolve_name(&name)
            .map_err(|e| resolve_error(location, e))?;
        warn!(
            "{name} at line {} column {} is not declared, using it as {kind}",
            location.line, location.column
        );
        let entity = self.factory.entity(kind, iri.clone());
        self.fabricated.insert(entity.clone());
        self.add(Axiom::declaration(entity), Vec::new());
        Ok(iri)
    }

    // Token helpers

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.config.max_depth {
            let location = self.tokens.peek()?.location.start;
            return Err(ManchesterSyntaxError::new(
                ManchesterErrorKind::Syntax,
                location,
                format!(
                    "Maximum nesting depth of {} exceeded",
                    self.config.max_depth
                ),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek_is_keyword(&mut self, keyword: &str) -> ParseResult<bool> {
        Ok(self.tokens.peek()?.token.is_keyword(keyword))
    }

    fn peek_is_iri(&mut self) -> ParseResult<bool> {
        Ok(entity_name(&self.tokens.peek()?.token).is_some())
    }

    fn peek_is_anonymous(&mut self) -> ParseResult<bool> {
        Ok(matches!(&self.tokens.peek()?.token, ManchesterToken::Identifier(name) if name.starts_with("_:")))
    }

    fn eat_keyword(&mut self, keyword: &str) -> ParseResult<bool> {
        if self.peek_is_keyword(keyword)? {
            self.tokens.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn eat_punctuation(&mut self, punctuation: &str) -> ParseResult<bool> {
        if self.tokens.peek()?.token.is_punctuation(punctuation) {
            self.tokens.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect_punctuation(&mut self, punctuation: &str) -> ParseResult<()> {
        let token = self.tokens.next()?;
        if token.token.is_punctuation(punctuation) {
            Ok(())
        } else {
            Err(unexpected(
                &token.token,
                token.location.start,
                &format!("'{punctuation}'"),
            ))
        }
    }
}

fn resolve_error(location: TextPosition, error: ResolveError) -> ManchesterSyntaxError {
    let kind = match error {
        ResolveError::UnresolvedPrefix { .. } => ManchesterErrorKind::UnresolvedPrefix,
        ResolveError::InvalidIri { .. } => ManchesterErrorKind::Syntax,
    };
    ManchesterSyntaxError::new(kind, location, error.to_string())
}
