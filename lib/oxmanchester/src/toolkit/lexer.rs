use crate::toolkit::error::{ManchesterErrorKind, ManchesterSyntaxError, TextPosition};
use memchr::memchr;
use std::ops::{Range, RangeInclusive};

pub trait TokenRecognizer {
    type Token;
    type Options: Default;

    fn recognize_next_token(
        &mut self,
        data: &[u8],
        is_ending: bool,
        config: &Self::Options,
    ) -> Option<(usize, Result<Self::Token, TokenRecognizerError>)>;
}

pub struct TokenRecognizerError {
    pub position: Range<usize>,
    pub message: String,
}

impl<S: Into<String>> From<(Range<usize>, S)> for TokenRecognizerError {
    fn from((position, message): (Range<usize>, S)) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

#[expect(clippy::range_plus_one)]
impl<S: Into<String>> From<(RangeInclusive<usize>, S)> for TokenRecognizerError {
    fn from((position, message): (RangeInclusive<usize>, S)) -> Self {
        (*position.start()..*position.end() + 1, message).into()
    }
}

impl<S: Into<String>> From<(usize, S)> for TokenRecognizerError {
    fn from((position, message): (usize, S)) -> Self {
        (position..=position, message).into()
    }
}

#[derive(Clone)]
pub struct TokenWithPosition<T> {
    pub token: T,
    pub location: Range<TextPosition>,
}

/// Splits an in-memory document into positioned tokens.
///
/// Whitespaces are skipped. Comments are only recognized when they start a line.
pub struct Lexer<'a, R: TokenRecognizer> {
    parser: R,
    data: &'a [u8],
    start: usize,
    position: TextPosition,
    is_line_start: bool,
    line_comment_start: Option<&'static [u8]>,
}

impl<'a, R: TokenRecognizer> Lexer<'a, R> {
    pub fn new(parser: R, data: &'a [u8], line_comment_start: Option<&'static [u8]>) -> Self {
        Self {
            parser,
            data,
            start: 0,
            position: TextPosition::START,
            is_line_start: true,
            line_comment_start,
        }
    }

    /// The position just after the last consumed byte.
    #[inline]
    pub fn position(&self) -> TextPosition {
        self.position
    }

    pub fn read_next(
        &mut self,
        options: &R::Options,
    ) -> Option<Result<TokenWithPosition<R::Token>, ManchesterSyntaxError>> {
        self.skip_whitespaces_and_comments();
        if self.start == self.data.len() {
            return None; // We have finished
        }
        let (consumed, result) = if let Some(r) =
            self.parser
                .recognize_next_token(&self.data[self.start..], true, options)
        {
            r
        } else {
            let error = ManchesterSyntaxError::new(
                ManchesterErrorKind::Lexical,
                self.position,
                "Unexpected end of file",
            );
            self.consume(self.data.len() - self.start); // We consume everything
            return Some(Err(error));
        };
        debug_assert!(
            consumed > 0,
            "The lexer must consume at least one byte each time"
        );
        debug_assert!(
            self.start + consumed <= self.data.len(),
            "The lexer tried to consumed {consumed} bytes but only {} bytes are readable",
            self.data.len() - self.start
        );
        let old_position = self.position;
        let old_start = self.start;
        self.consume(consumed);
        self.is_line_start = false;
        Some(match result {
            Ok(token) => Ok(TokenWithPosition {
                token,
                location: old_position..self.position,
            }),
            Err(e) => {
                let mut location = old_position;
                location.advance(&self.data[old_start..old_start + e.position.start]);
                Err(ManchesterSyntaxError::new(
                    ManchesterErrorKind::Lexical,
                    location,
                    e.message,
                ))
            }
        })
    }

    fn consume(&mut self, len: usize) {
        self.position.advance(&self.data[self.start..self.start + len]);
        self.start += len;
    }

    fn skip_whitespaces_and_comments(&mut self) {
        loop {
            self.skip_whitespaces();

            let buf = &self.data[self.start..];
            if let Some(line_comment_start) = self.line_comment_start {
                if self.is_line_start && buf.starts_with(line_comment_start) {
                    // Comment
                    let end = memchr(b'\n', buf).unwrap_or(buf.len());
                    self.consume(end);
                    continue;
                }
            }
            return;
        }
    }

    fn skip_whitespaces(&mut self) {
        let buf = &self.data[self.start..];
        let len = buf
            .iter()
            .position(|c| !matches!(c, b' ' | b'\t' | b'\r' | b'\n'))
            .unwrap_or(buf.len());
        if buf[..len].contains(&b'\n') {
            self.is_line_start = true;
        }
        self.consume(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recognizes words made of ASCII letters
    struct WordRecognizer;

    impl TokenRecognizer for WordRecognizer {
        type Token = String;
        type Options = ();

        fn recognize_next_token(
            &mut self,
            data: &[u8],
            _: bool,
            _: &(),
        ) -> Option<(usize, Result<String, TokenRecognizerError>)> {
            let len = data
                .iter()
                .position(|c| !c.is_ascii_alphabetic())
                .unwrap_or(data.len());
            if len == 0 {
                return Some((1, Err((0, "Unexpected character").into())));
            }
            Some((
                len,
                Ok(String::from_utf8_lossy(&data[..len]).into_owned()),
            ))
        }
    }

    fn tokens(data: &str) -> Vec<Result<(String, u64, u64), (u64, u64)>> {
        let mut lexer = Lexer::new(WordRecognizer, data.as_bytes(), Some(b"#"));
        let mut result = Vec::new();
        while let Some(token) = lexer.read_next(&()) {
            result.push(
                token
                    .map(|t| (t.token, t.location.start.line, t.location.start.column))
                    .map_err(|e| (e.line(), e.column())),
            );
        }
        result
    }

    #[test]
    fn test_positions() {
        assert_eq!(
            tokens("foo bar\n  baz"),
            vec![
                Ok(("foo".into(), 1, 1)),
                Ok(("bar".into(), 1, 5)),
                Ok(("baz".into(), 2, 3)),
            ]
        );
    }

    #[test]
    fn test_comments_only_at_line_start() {
        assert_eq!(
            tokens("# comment\n  # other\nfoo # bar"),
            vec![Ok(("foo".into(), 3, 1)), Err((3, 5)), Ok(("bar".into(), 3, 7))]
        );
    }
}
