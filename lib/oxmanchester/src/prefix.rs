//! Prefix (namespace) declarations of a document.

use oxiri::{Iri, IriParseError};
use oxrdf::NamedNode;
use std::collections::BTreeMap;

/// Prefixes every Manchester Syntax document knows without declaring them.
pub const DEFAULT_PREFIXES: [(&str, &str); 5] = [
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
];

/// A name resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("The prefix {prefix}: has not been declared")]
    UnresolvedPrefix { prefix: String },
    #[error("{name} does not resolve to a valid IRI: {error}")]
    InvalidIri { name: String, error: String },
}

/// Mapping from prefix names (without the trailing `:`, empty for the default prefix) to namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    prefixes: BTreeMap<String, String>,
    /// Namespace of the empty prefix when it is not declared
    default_namespace: Option<String>,
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES
                .iter()
                .map(|(name, iri)| ((*name).into(), (*iri).into()))
                .collect(),
            default_namespace: None,
        }
    }
}

impl PrefixTable {
    /// A table with the `owl`, `rdf`, `rdfs`, `xsd` and `xml` prefixes.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table without any prefix.
    pub fn empty() -> Self {
        Self {
            prefixes: BTreeMap::new(),
            default_namespace: None,
        }
    }

    /// Declares a prefix, overwriting any previous declaration with the same name.
    ///
    /// Returns the namespace previously bound to this name.
    pub fn declare_prefix(
        &mut self,
        name: impl Into<String>,
        iri: impl Into<String>,
    ) -> Result<Option<String>, IriParseError> {
        let iri = Iri::parse(iri.into())?;
        Ok(self.prefixes.insert(name.into(), iri.into_inner()))
    }

    pub(crate) fn declare_prefix_unchecked(&mut self, name: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(name.into(), iri.into());
    }

    pub fn namespace(&self, name: &str) -> Option<&str> {
        self.prefixes
            .get(name)
            .map(String::as_str)
            .or_else(|| {
                if name.is_empty() {
                    self.default_namespace.as_deref()
                } else {
                    None
                }
            })
    }

    /// Uses `<ontology-iri>#` for the empty prefix when it is not declared.
    pub fn set_default_namespace_from_ontology(&mut self, ontology_iri: &str) {
        self.default_namespace = Some(if ontology_iri.ends_with(['#', '/']) {
            ontology_iri.into()
        } else {
            format!("{ontology_iri}#")
        });
    }

    /// Resolves a prefixed name like `owl:Thing`, `:A` or a bare name like `A` to an IRI.
    ///
    /// The name is split at its first `:`, names without `:` use the empty prefix.
    pub fn resolve(&self, short_name: &str) -> Result<NamedNode, ResolveError> {
        let (prefix, local) = short_name.split_once(':').unwrap_or(("", short_name));
        let Some(namespace) = self.namespace(prefix) else {
            return Err(ResolveError::UnresolvedPrefix {
                prefix: prefix.into(),
            });
        };
        NamedNode::new(format!("{namespace}{local}")).map_err(|e| ResolveError::InvalidIri {
            name: short_name.into(),
            error: e.to_string(),
        })
    }

    /// Resolves a name as written in a document: a full IRI `<...>` or a prefixed or bare name.
    pub fn resolve_name(&self, name: &str) -> Result<NamedNode, ResolveError> {
        if let Some(iri) = name.strip_prefix('<').and_then(|n| n.strip_suffix('>')) {
            NamedNode::new(iri).map_err(|e| ResolveError::InvalidIri {
                name: name.into(),
                error: e.to_string(),
            })
        } else {
            self.resolve(name)
        }
    }

    /// Abbreviates an IRI using the longest matching namespace.
    ///
    /// Returns `None` if no namespace matches or if the local part would not be a valid name.
    pub fn abbreviate(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace)| iri.starts_with(namespace.as_str()))
            .max_by_key(|(_, namespace)| namespace.len())
            .and_then(|(name, namespace)| {
                let local = &iri[namespace.len()..];
                is_valid_local_name(local).then(|| format!("{name}:{local}"))
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

fn is_valid_local_name(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '.' | '+'))
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
