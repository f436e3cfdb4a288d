use crate::toolkit::{TokenRecognizer, TokenRecognizerError};
use memchr::{memchr, memchr2};
use oxilangtag::LanguageTag;
use oxiri::Iri;
use std::fmt;
use std::str;

/// Keywords ending with `:` that open a frame or one of its sections.
pub const SECTION_KEYWORDS: &[&str] = &[
    "Prefix:",
    "Ontology:",
    "Import:",
    "Annotations:",
    "Class:",
    "ObjectProperty:",
    "DataProperty:",
    "AnnotationProperty:",
    "Individual:",
    "Datatype:",
    "SubClassOf:",
    "EquivalentTo:",
    "DisjointWith:",
    "DisjointUnionOf:",
    "HasKey:",
    "Domain:",
    "Range:",
    "Characteristics:",
    "SubPropertyOf:",
    "InverseOf:",
    "SubPropertyChain:",
    "Types:",
    "Facts:",
    "SameAs:",
    "DifferentFrom:",
    "EquivalentClasses:",
    "DisjointClasses:",
    "EquivalentProperties:",
    "DisjointProperties:",
    "SameIndividual:",
    "DifferentIndividuals:",
];

/// Reserved words of class expressions and property characteristics.
pub const RESERVED_WORDS: &[&str] = &[
    "and",
    "or",
    "not",
    "some",
    "only",
    "value",
    "min",
    "max",
    "exactly",
    "Self",
    "that",
    "inverse",
    "o",
    "Functional",
    "InverseFunctional",
    "Reflexive",
    "Irreflexive",
    "Symmetric",
    "Asymmetric",
    "Transitive",
];

/// The coarse kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Iri,
    Literal,
    Punctuation,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManchesterToken {
    Keyword(&'static str),
    /// A prefixed name, a bare name or an anonymous individual label like `_:b`
    Identifier(String),
    Iri(String),
    String {
        value: String,
        language: Option<String>,
    },
    Integer(String),
    Decimal(String),
    /// A floating point literal without its `f` suffix
    Float(String),
    Punctuation(&'static str),
    Eof,
}

impl ManchesterToken {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Keyword(_) => TokenKind::Keyword,
            Self::Identifier(_) => TokenKind::Identifier,
            Self::Iri(_) => TokenKind::Iri,
            Self::String { .. } | Self::Integer(_) | Self::Decimal(_) | Self::Float(_) => {
                TokenKind::Literal
            }
            Self::Punctuation(_) => TokenKind::Punctuation,
            Self::Eof => TokenKind::Eof,
        }
    }

    #[inline]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }

    #[inline]
    pub fn is_punctuation(&self, punctuation: &str) -> bool {
        matches!(self, Self::Punctuation(p) if *p == punctuation)
    }
}

impl fmt::Display for ManchesterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) | Self::Punctuation(k) => f.write_str(k),
            Self::Identifier(v) | Self::Integer(v) | Self::Decimal(v) => f.write_str(v),
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::String { value, language } => {
                write!(f, "\"{value}\"")?;
                if let Some(language) = language {
                    write!(f, "@{language}")?;
                }
                Ok(())
            }
            Self::Float(v) => write!(f, "{v}f"),
            Self::Eof => f.write_str("end of file"),
        }
    }
}

/// Recognizes Manchester Syntax tokens.
pub struct ManchesterLexer {
    lenient: bool,
}

impl TokenRecognizer for ManchesterLexer {
    type Token = ManchesterToken;
    type Options = ();

    fn recognize_next_token(
        &mut self,
        data: &[u8],
        is_ending: bool,
        _: &(),
    ) -> Option<(usize, Result<ManchesterToken, TokenRecognizerError>)> {
        match *data.first()? {
            b'<' => match data.get(1) {
                Some(b'=') => Some((2, Ok(ManchesterToken::Punctuation("<=")))),
                _ => self
                    .recognize_iri(data)
                    .or(Some((1, Ok(ManchesterToken::Punctuation("<"))))),
            },
            b'>' => {
                if data.get(1) == Some(&b'=') {
                    Some((2, Ok(ManchesterToken::Punctuation(">="))))
                } else {
                    Some((1, Ok(ManchesterToken::Punctuation(">"))))
                }
            }
            b'^' => {
                if data.get(1) == Some(&b'^') {
                    Some((2, Ok(ManchesterToken::Punctuation("^^"))))
                } else {
                    Some((1, Err((0, "A single '^' is not allowed, did you mean '^^'?").into())))
                }
            }
            b',' => Some((1, Ok(ManchesterToken::Punctuation(",")))),
            b'(' => Some((1, Ok(ManchesterToken::Punctuation("(")))),
            b')' => Some((1, Ok(ManchesterToken::Punctuation(")")))),
            b'{' => Some((1, Ok(ManchesterToken::Punctuation("{")))),
            b'}' => Some((1, Ok(ManchesterToken::Punctuation("}")))),
            b'[' => Some((1, Ok(ManchesterToken::Punctuation("[")))),
            b']' => Some((1, Ok(ManchesterToken::Punctuation("]")))),
            b'"' => Some(self.recognize_string(data)),
            b'0'..=b'9' => Self::recognize_number(data, is_ending),
            b'+' | b'-' if data.get(1).is_some_and(u8::is_ascii_digit) => {
                Self::recognize_number(data, is_ending)
            }
            _ => Some(Self::recognize_word(data)),
        }
    }
}

impl ManchesterLexer {
    pub fn new(lenient: bool) -> Self {
        Self { lenient }
    }

    /// Full IRIs are written `<...>` without whitespace inside.
    ///
    /// Returns `None` if the `<` is not followed by a `>` on the same word, it is then a facet comparator.
    /// Facet lists written without spaces like `[<10,>5]` are comparators too: a candidate without
    /// a scheme that runs over a `,`, `[` or `]` is not an IRI.
    fn recognize_iri(
        &self,
        data: &[u8],
    ) -> Option<(usize, Result<ManchesterToken, TokenRecognizerError>)> {
        let end = 1 + memchr(b'>', &data[1..])?;
        let candidate = &data[1..end];
        if candidate
            .iter()
            .any(|c| matches!(c, b' ' | b'\t' | b'\r' | b'\n' | b'<' | b'"'))
        {
            return None;
        }
        if !starts_with_scheme(candidate)
            && candidate.iter().any(|c| matches!(c, b',' | b'[' | b']'))
        {
            return None;
        }
        let iri = match str_from_utf8(&data[1..end], 1..end) {
            Ok(iri) => iri,
            Err(e) => return Some((end + 1, Err(e))),
        };
        Some((
            end + 1,
            if self.lenient {
                Ok(ManchesterToken::Iri(iri.into()))
            } else {
                Iri::parse(iri)
                    .map(|iri| ManchesterToken::Iri(iri.into_inner().into()))
                    .map_err(|e| (0..=end, format!("Invalid IRI <{iri}>: {e}")).into())
            },
        ))
    }

    fn recognize_string(
        &self,
        data: &[u8],
    ) -> (usize, Result<ManchesterToken, TokenRecognizerError>) {
        let mut value = String::new();
        let mut i = 1;
        loop {
            let Some(end) = memchr2(b'"', b'\\', &data[i..]) else {
                return (data.len(), Err((0, "Unterminated string literal").into()));
            };
            match str_from_utf8(&data[i..i + end], i..i + end) {
                Ok(s) => value.push_str(s),
                Err(e) => return (i + end, Err(e)),
            }
            i += end;
            if data[i] == b'"' {
                i += 1;
                break;
            }
            // Escape sequence
            let Some(c) = data.get(i + 1) else {
                return (data.len(), Err((0, "Unterminated string literal").into()));
            };
            match c {
                b'"' => value.push('"'),
                b'\\' => value.push('\\'),
                b'n' => value.push('\n'),
                b'r' => value.push('\r'),
                b't' => value.push('\t'),
                _ => {
                    // We read until the end of string char
                    let end = memchr(b'"', &data[i + 2..]).map_or(data.len(), |e| i + 2 + e + 1);
                    return (
                        end,
                        Err((
                            i..i + 2,
                            format!("Unexpected escape character '\\{}'", char::from(*c)),
                        )
                            .into()),
                    );
                }
            }
            i += 2;
        }

        if data.get(i) != Some(&b'@') {
            return (
                i,
                Ok(ManchesterToken::String {
                    value,
                    language: None,
                }),
            );
        }
        let lang_start = i + 1;
        let lang_end = lang_start
            + data[lang_start..]
                .iter()
                .take_while(|c| c.is_ascii_alphanumeric() || **c == b'-')
                .count();
        if lang_end == lang_start {
            return (
                lang_end,
                Err((i, "A language tag should follow '@'").into()),
            );
        }
        let language = String::from_utf8_lossy(&data[lang_start..lang_end]).into_owned();
        let language = if self.lenient {
            language
        } else {
            match LanguageTag::parse(language) {
                Ok(tag) => tag.into_inner(),
                Err(e) => return (lang_end, Err((lang_start..lang_end, e.to_string()).into())),
            }
        };
        (
            lang_end,
            Ok(ManchesterToken::String {
                value,
                language: Some(language.to_ascii_lowercase()),
            }),
        )
    }

    fn recognize_number(
        data: &[u8],
        is_ending: bool,
    ) -> Option<(usize, Result<ManchesterToken, TokenRecognizerError>)> {
        // integerLiteral        ::= [+-] digits
        // decimalLiteral        ::= [+-] digits '.' digits
        // floatingPointLiteral  ::= [+-] ( digits ['.' digits] [exponent] | '.' digits [exponent] ) ( 'f' | 'F' )
        let mut i = 0;
        if matches!(data.first(), Some(b'+' | b'-')) {
            i += 1;
        }
        i += Self::recognize_digits(&data[i..], is_ending)?;

        let mut is_decimal = false;
        if data.get(i) == Some(&b'.') && data.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 1;
            i += Self::recognize_digits(&data[i..], is_ending)?;
            is_decimal = true;
        }

        let mut has_exponent = false;
        if matches!(data.get(i), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(data.get(j), Some(b'+' | b'-')) {
                j += 1;
            }
            let count = Self::recognize_digits(&data[j..], is_ending)?;
            if count == 0 {
                return Some((j, Err((0..j, "A floating point exponent cannot be empty").into())));
            }
            i = j + count;
            has_exponent = true;
        }

        let text = String::from_utf8_lossy(&data[..i]).into_owned();
        if matches!(data.get(i), Some(b'f' | b'F')) {
            return Some((i + 1, Ok(ManchesterToken::Float(text))));
        }
        if has_exponent {
            return Some((
                i,
                Err((0..i, "A floating point literal must end with 'f' or 'F'").into()),
            ));
        }
        Some((
            i,
            Ok(if is_decimal {
                ManchesterToken::Decimal(text)
            } else {
                ManchesterToken::Integer(text)
            }),
        ))
    }

    fn recognize_digits(data: &[u8], is_ending: bool) -> Option<usize> {
        for (i, c) in data.iter().enumerate() {
            if !c.is_ascii_digit() {
                return Some(i);
            }
        }
        is_ending.then_some(data.len())
    }

    /// Words are keywords, prefixed names, bare names or anonymous individual labels.
    fn recognize_word(data: &[u8]) -> (usize, Result<ManchesterToken, TokenRecognizerError>) {
        let len = data
            .iter()
            .position(|c| {
                matches!(
                    c,
                    b' ' | b'\t'
                        | b'\r'
                        | b'\n'
                        | b','
                        | b'('
                        | b')'
                        | b'{'
                        | b'}'
                        | b'['
                        | b']'
                        | b'<'
                        | b'>'
                        | b'"'
                        | b'^'
                )
            })
            .unwrap_or(data.len());
        if len == 0 {
            return (
                1,
                Err((0, format!("Unexpected character '{}'", char::from(data[0]))).into()),
            );
        }
        let word = match str_from_utf8(&data[..len], 0..len) {
            Ok(word) => word,
            Err(e) => return (len, Err(e)),
        };
        if word.starts_with('#') {
            return (
                len,
                Err((0, "Comments must start at the beginning of a line").into()),
            );
        }
        let token = if let Some(keyword) = SECTION_KEYWORDS
            .iter()
            .chain(RESERVED_WORDS)
            .find(|k| **k == word)
        {
            ManchesterToken::Keyword(keyword)
        } else {
            ManchesterToken::Identifier(word.into())
        };
        (len, Ok(token))
    }
}

fn str_from_utf8(
    data: &[u8],
    range: std::ops::Range<usize>,
) -> Result<&str, TokenRecognizerError> {
    str::from_utf8(data).map_err(|e| {
        (
            range.start + e.valid_up_to()..range.end.min(range.start + e.valid_up_to() + 4),
            format!("Invalid UTF-8: {e}"),
        )
            .into()
    })
}

/// scheme ::= ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
fn starts_with_scheme(data: &[u8]) -> bool {
    let Some(colon) = memchr(b':', data) else {
        return false;
    };
    data.first().is_some_and(u8::is_ascii_alphabetic)
        && data[..colon]
            .iter()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.'))
}
