//! oxmanchester parsing toolkit.
//!
//! Provides the positioned error model and a plain Rust lexer working on an in-memory document.

mod error;
mod lexer;

pub use self::error::{ManchesterErrorKind, ManchesterParseError, ManchesterSyntaxError, TextPosition};
pub use self::lexer::{Lexer, TokenRecognizer, TokenRecognizerError, TokenWithPosition};
