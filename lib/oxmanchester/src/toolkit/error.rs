use std::{fmt, io};

/// A position in a text i.e. a `line` number starting from 1, a `column` number starting from 1 (in number of code points) and a global file `offset` starting from 0 (in number of bytes).
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub struct TextPosition {
    pub line: u64,
    pub column: u64,
    pub offset: u64,
}

impl TextPosition {
    /// The beginning of a document, also used when the real position is unknown.
    pub const START: Self = Self {
        line: 1,
        column: 1,
        offset: 0,
    };

    /// Moves the position after the given bytes.
    pub(crate) fn advance(&mut self, bytes: &[u8]) {
        for b in bytes {
            if *b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if *b & 0xC0 != 0x80 {
                // Not a UTF-8 continuation byte
                self.column += 1;
            }
        }
        self.offset += bytes.len() as u64;
    }
}

impl Default for TextPosition {
    #[inline]
    fn default() -> Self {
        Self::START
    }
}

/// The kind of failure reported by the Manchester Syntax parser.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum ManchesterErrorKind {
    /// The first significant line contains neither `Prefix:` nor `Ontology:`.
    PreflightFormat,
    /// A malformed token, like an unterminated string literal.
    Lexical,
    /// The token sequence does not follow the grammar.
    Syntax,
    /// A prefixed name uses a prefix that has not been declared.
    UnresolvedPrefix,
    /// A name does not resolve to an entity of the expected kind.
    UnknownEntity,
    /// The source could not be read.
    SourceAccess,
}

impl fmt::Display for ManchesterErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreflightFormat => "preflight format error",
            Self::Lexical => "lexical error",
            Self::Syntax => "syntax error",
            Self::UnresolvedPrefix => "unresolved prefix",
            Self::UnknownEntity => "unknown entity",
            Self::SourceAccess => "source access error",
        })
    }
}

/// An error in the syntax of the parsed file.
///
/// It is composed of a kind, a message and the position in the input where the problem starts.
#[derive(Debug, thiserror::Error)]
pub struct ManchesterSyntaxError {
    kind: ManchesterErrorKind,
    location: TextPosition,
    message: String,
}

impl ManchesterSyntaxError {
    pub(crate) fn new(
        kind: ManchesterErrorKind,
        location: TextPosition,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ManchesterErrorKind {
        self.kind
    }

    /// The location of the error inside of the file.
    #[inline]
    pub fn location(&self) -> TextPosition {
        self.location
    }

    /// The 1-based line of the error.
    #[inline]
    pub fn line(&self) -> u64 {
        self.location.line
    }

    /// The 1-based column of the error.
    #[inline]
    pub fn column(&self) -> u64 {
        self.location.column
    }

    /// The error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ManchesterSyntaxError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parser error at line {} column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl From<ManchesterSyntaxError> for io::Error {
    #[inline]
    fn from(error: ManchesterSyntaxError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}

/// A parsing error.
///
/// It is the union of [`ManchesterSyntaxError`] and [`io::Error`].
#[derive(Debug, thiserror::Error)]
pub enum ManchesterParseError {
    /// I/O error during parsing (file not found, invalid UTF-8...).
    #[error("Parser error at line 1 column 1: {0}")]
    Io(#[from] io::Error),
    /// An error in the file syntax.
    #[error(transparent)]
    Syntax(#[from] ManchesterSyntaxError),
}

impl ManchesterParseError {
    #[inline]
    pub fn kind(&self) -> ManchesterErrorKind {
        match self {
            Self::Io(_) => ManchesterErrorKind::SourceAccess,
            Self::Syntax(e) => e.kind(),
        }
    }

    /// The location of the error, [`TextPosition::START`] for I/O errors.
    #[inline]
    pub fn location(&self) -> TextPosition {
        match self {
            Self::Io(_) => TextPosition::START,
            Self::Syntax(e) => e.location(),
        }
    }

    #[inline]
    pub fn line(&self) -> u64 {
        self.location().line
    }

    #[inline]
    pub fn column(&self) -> u64 {
        self.location().column
    }
}

impl From<ManchesterParseError> for io::Error {
    #[inline]
    fn from(error: ManchesterParseError) -> Self {
        match error {
            ManchesterParseError::Syntax(e) => e.into(),
            ManchesterParseError::Io(e) => e,
        }
    }
}
