//! Parser for the [OWL 2 Manchester Syntax](https://www.w3.org/TR/owl2-manchester-syntax/).
//!
//! The parser fills an [`oxowl::Ontology`] owned by the caller:
//! - [`preflight::scan`] rejects documents whose first significant line is not a `Prefix:` or `Ontology:` declaration
//! - [`ManchesterParser`] tokenizes the document and parses its frames
//! - names are resolved by [`EntityChecker`]s using the declared prefixes, the declarations and an optional [`ShortFormProvider`]
//! - [`ManchesterSerializer`] writes an ontology back to Manchester Syntax
//!
//! Every failure is a [`ManchesterParseError`] with a 1-based line and column.
//!
//! ```
//! use oxmanchester::{ManchesterErrorKind, ManchesterParser};
//! use oxowl::Ontology;
//!
//! let mut ontology = Ontology::new(None);
//! let error = ManchesterParser::new()
//!     .parse_str("Ontology: <http://ex.org/onto>\nClass: :A\n    SubClassOf: :B\n", &mut ontology)
//!     .unwrap_err();
//! assert_eq!(error.kind(), ManchesterErrorKind::UnknownEntity);
//! assert_eq!((error.line(), error.column()), (3, 17));
//! // The frame of :A has not been completed
//! assert_eq!(ontology.axiom_count(), 0);
//! ```

mod checker;
mod factory;
mod lexer;
mod parser;
mod prefix;
pub mod preflight;
mod serializer;
mod toolkit;
pub mod vocab;

pub use crate::checker::{
    BidirectionalShortFormProvider, CompositeEntityChecker, EntityChecker,
    ShortFormEntityChecker, ShortFormProvider, TableEntityChecker,
};
pub use crate::factory::{DefaultEntityFactory, EntityFactory};
pub use crate::lexer::{ManchesterToken, TokenKind};
pub use crate::parser::{ManchesterFormat, ManchesterParser, ParserConfig};
pub use crate::prefix::{DEFAULT_PREFIXES, PrefixTable, ResolveError};
pub use crate::serializer::ManchesterSerializer;
pub use crate::toolkit::{
    ManchesterErrorKind, ManchesterParseError, ManchesterSyntaxError, TextPosition,
};
