//! Resolution of the names written in a document to typed entities.

use crate::prefix::{PrefixTable, ResolveError};
use crate::vocab::is_built_in;
use oxowl::{Entity, EntityKind, Ontology};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

/// Resolves a name to an entity of the expected kind.
///
/// Names are given as written: `<http://ex.org/A>`, `ex:A`, `:A` or `A`.
pub trait EntityChecker {
    /// Returns `Ok(None)` if the name is well formed but no entity of this kind is known under it.
    fn check_entity(&self, name: &str, kind: EntityKind) -> Result<Option<Entity>, ResolveError>;
}

/// Resolves names with a prefix table and accepts the entities that are declared.
///
/// Declarations come from the document itself, from the ontology being filled,
/// from an optional default ontology and from the OWL built-in vocabulary.
pub struct TableEntityChecker<'a> {
    prefixes: PrefixTable,
    declarations: FxHashSet<Entity>,
    default_ontology: Option<&'a Ontology>,
}

impl<'a> TableEntityChecker<'a> {
    pub fn new(prefixes: PrefixTable) -> Self {
        Self {
            prefixes,
            declarations: FxHashSet::default(),
            default_ontology: None,
        }
    }

    #[must_use]
    pub fn with_declarations(mut self, declarations: impl IntoIterator<Item = Entity>) -> Self {
        self.declarations.extend(declarations);
        self
    }

    /// Also accepts the entities declared in this ontology.
    #[must_use]
    pub fn with_default_ontology(mut self, ontology: &'a Ontology) -> Self {
        self.default_ontology = Some(ontology);
        self
    }

    pub fn declare(&mut self, entity: Entity) {
        trace!("Pre-declared {entity}");
        self.declarations.insert(entity);
    }

    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }
}

impl EntityChecker for TableEntityChecker<'_> {
    fn check_entity(&self, name: &str, kind: EntityKind) -> Result<Option<Entity>, ResolveError> {
        let entity = Entity::new(kind, self.prefixes.resolve_name(name)?);
        let is_known = self.declarations.contains(&entity)
            || is_built_in(entity.iri().as_ref(), kind)
            || self
                .default_ontology
                .is_some_and(|o| o.is_declared(entity.iri(), kind));
        Ok(is_known.then_some(entity))
    }
}

/// A bidirectional mapping between short forms and entities supplied by the embedding system.
pub trait ShortFormProvider {
    /// The entities known under this short form.
    fn entities(&self, short_form: &str) -> Vec<Entity>;

    /// The short form of an entity.
    fn short_form(&self, entity: &Entity) -> Option<String>;
}

/// An in-memory [`ShortFormProvider`].
///
/// ```
/// use oxmanchester::{BidirectionalShortFormProvider, ShortFormProvider};
/// use oxowl::{Entity, EntityKind};
/// use oxrdf::NamedNode;
///
/// let person = Entity::new(EntityKind::Class, NamedNode::new("http://ex.org/Person")?);
/// let mut provider = BidirectionalShortFormProvider::new();
/// provider.add("Person", person.clone());
/// assert_eq!(provider.entities("Person"), [person.clone()]);
/// assert_eq!(provider.short_form(&person).as_deref(), Some("Person"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct BidirectionalShortFormProvider {
    entities: FxHashMap<String, Vec<Entity>>,
    short_forms: FxHashMap<Entity, String>,
}

impl BidirectionalShortFormProvider {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an entity to a short form, replacing its previous short form.
    pub fn add(&mut self, short_form: impl Into<String>, entity: Entity) {
        let short_form = short_form.into();
        self.remove(&entity);
        self.entities
            .entry(short_form.clone())
            .or_default()
            .push(entity.clone());
        self.short_forms.insert(entity, short_form);
    }

    pub fn remove(&mut self, entity: &Entity) {
        let Some(short_form) = self.short_forms.remove(entity) else {
            return;
        };
        if let Some(entities) = self.entities.get_mut(&short_form) {
            entities.retain(|e| e != entity);
            if entities.is_empty() {
                self.entities.remove(&short_form);
            }
        }
    }

    /// Adds every entity declared in the ontology under its local name,
    /// i.e. the part of the IRI after the last `#` or `/`.
    pub fn add_ontology(&mut self, ontology: &Ontology) {
        for entity in ontology.declarations() {
            let iri = entity.iri().as_str();
            let local_name = iri.rsplit(['#', '/']).next().unwrap_or(iri);
            if !local_name.is_empty() {
                self.add(local_name, entity.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.short_forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short_forms.is_empty()
    }
}

impl ShortFormProvider for BidirectionalShortFormProvider {
    fn entities(&self, short_form: &str) -> Vec<Entity> {
        self.entities.get(short_form).cloned().unwrap_or_default()
    }

    fn short_form(&self, entity: &Entity) -> Option<String> {
        self.short_forms.get(entity).cloned()
    }
}

/// Resolves names through a [`ShortFormProvider`].
pub struct ShortFormEntityChecker<'a> {
    provider: &'a dyn ShortFormProvider,
}

impl<'a> ShortFormEntityChecker<'a> {
    pub fn new(provider: &'a dyn ShortFormProvider) -> Self {
        Self { provider }
    }
}

impl EntityChecker for ShortFormEntityChecker<'_> {
    fn check_entity(&self, name: &str, kind: EntityKind) -> Result<Option<Entity>, ResolveError> {
        Ok(self
            .provider
            .entities(name)
            .into_iter()
            .find(|e| e.kind() == kind))
    }
}

/// Tries several checkers in order and returns the first entity found.
///
/// A resolution error of one checker is only reported if no other checker knows the name.
#[derive(Default)]
pub struct CompositeEntityChecker<'a> {
    checkers: Vec<Box<dyn EntityChecker + 'a>>,
}

impl<'a> CompositeEntityChecker<'a> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, checker: impl EntityChecker + 'a) -> Self {
        self.checkers.push(Box::new(checker));
        self
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl EntityChecker for CompositeEntityChecker<'_> {
    fn check_entity(&self, name: &str, kind: EntityKind) -> Result<Option<Entity>, ResolveError> {
        let mut error = None;
        for checker in &self.checkers {
            match checker.check_entity(name, kind) {
                Ok(Some(entity)) => return Ok(Some(entity)),
                Ok(None) => (),
                Err(e) => {
                    error.get_or_insert(e);
                }
            }
        }
        error.map_or(Ok(None), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxowl::{Axiom, OwlClass};
    use oxrdf::NamedNode;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://ex.org/{local}"))
    }

    fn table() -> PrefixTable {
        let mut prefixes = PrefixTable::new();
        prefixes.declare_prefix("ex", "http://ex.org/").unwrap();
        prefixes
    }

    #[test]
    fn test_table_checker() {
        let checker = TableEntityChecker::new(table())
            .with_declarations([Entity::new(EntityKind::Class, ex("A"))]);
        assert_eq!(
            checker.check_entity("ex:A", EntityKind::Class),
            Ok(Some(Entity::new(EntityKind::Class, ex("A"))))
        );
        assert_eq!(
            checker.check_entity("<http://ex.org/A>", EntityKind::Class),
            Ok(Some(Entity::new(EntityKind::Class, ex("A"))))
        );
        assert_eq!(checker.check_entity("ex:A", EntityKind::ObjectProperty), Ok(None));
        assert_eq!(checker.check_entity("ex:B", EntityKind::Class), Ok(None));
        assert!(matches!(
            checker.check_entity("foo:A", EntityKind::Class),
            Err(ResolveError::UnresolvedPrefix { .. })
        ));
    }

    #[test]
    fn test_table_checker_built_ins() {
        let checker = TableEntityChecker::new(table());
        assert!(
            checker
                .check_entity("owl:Thing", EntityKind::Class)
                .unwrap()
                .is_some()
        );
        assert!(
            checker
                .check_entity("rdfs:label", EntityKind::AnnotationProperty)
                .unwrap()
                .is_some()
        );
        assert!(
            checker
                .check_entity("xsd:dateTime", EntityKind::Datatype)
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_table_checker_default_ontology() {
        let mut default = Ontology::new(None);
        default.add_axiom(Axiom::DeclareClass(OwlClass::new(ex("Imported"))));
        let checker = TableEntityChecker::new(table()).with_default_ontology(&default);
        assert!(
            checker
                .check_entity("ex:Imported", EntityKind::Class)
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_short_form_provider() {
        let mut ontology = Ontology::new(None);
        ontology.add_axiom(Axiom::DeclareClass(OwlClass::new(ex("Person"))));
        ontology.add_axiom(Axiom::DeclareNamedIndividual(ex("Person")));
        let mut provider = BidirectionalShortFormProvider::new();
        provider.add_ontology(&ontology);
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.entities("Person").len(), 2);

        let checker = ShortFormEntityChecker::new(&provider);
        assert_eq!(
            checker.check_entity("Person", EntityKind::NamedIndividual),
            Ok(Some(Entity::NamedIndividual(ex("Person"))))
        );
        assert_eq!(checker.check_entity("Person", EntityKind::DataProperty), Ok(None));

        provider.add("Human", Entity::new(EntityKind::Class, ex("Person")));
        assert_eq!(provider.entities("Person").len(), 1);
        assert_eq!(
            provider
                .short_form(&Entity::new(EntityKind::Class, ex("Person")))
                .as_deref(),
            Some("Human")
        );
    }

    #[test]
    fn test_composite_checker_order() {
        let mut provider = BidirectionalShortFormProvider::new();
        provider.add("other:A", Entity::new(EntityKind::Class, ex("FromProvider")));
        let checker = CompositeEntityChecker::new()
            .with(ShortFormEntityChecker::new(&provider))
            .with(
                TableEntityChecker::new(table())
                    .with_declarations([Entity::new(EntityKind::Class, ex("A"))]),
            );
        assert_eq!(checker.len(), 2);
        // The provider resolves names with undeclared prefixes
        assert_eq!(
            checker.check_entity("other:A", EntityKind::Class),
            Ok(Some(Entity::new(EntityKind::Class, ex("FromProvider"))))
        );
        assert_eq!(
            checker.check_entity("ex:A", EntityKind::Class),
            Ok(Some(Entity::new(EntityKind::Class, ex("A"))))
        );
        assert!(checker.check_entity("other:B", EntityKind::Class).is_err());
    }
}
