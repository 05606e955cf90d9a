// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MSH tokenizer
//!
//! Turns the raw file content into a lazy stream of [`Token`]s with one
//! token of lookahead. Binary payloads are not tokenized: the section
//! grammar switches to [`Tokenizer::read_raw_bytes`] when it knows a blob
//! follows.

use gmsh_lite_model::{ParseError, Result};
use memchr::{memchr, memchr_iter, memrchr};
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{opt, recognize},
    sequence::pair,
    IResult, Parser,
};

/// Kind of a lexed token
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenKind {
    /// Terminal token, returned once the input is exhausted
    EndOfStream,
    /// Integer or floating point literal, kept as text
    Number,
    /// Double-quoted text with the quotes stripped
    QuotedString,
    /// `$Name` at the start of a line
    SectionMarker,
}

impl TokenKind {
    fn describe(self) -> &'static str {
        match self {
            TokenKind::EndOfStream => "end of file",
            TokenKind::Number => "number",
            TokenKind::QuotedString => "string",
            TokenKind::SectionMarker => "section marker",
        }
    }
}

/// Lexed token borrowing its text from the input
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// 1-based source line
    pub line: usize,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, text: &'a str, line: usize) -> Self {
        Self { kind, text, line }
    }

    /// Coerce a number token to an integer
    pub fn as_int(&self) -> Result<i64> {
        self.expect(TokenKind::Number, "integer")?;
        lexical_core::parse::<i64>(self.digits()).map_err(|_| self.mismatch("integer"))
    }

    /// Coerce a number token to a float
    pub fn as_float(&self) -> Result<f64> {
        self.expect(TokenKind::Number, "float")?;
        lexical_core::parse::<f64>(self.digits()).map_err(|_| self.mismatch("float"))
    }

    /// Text of a quoted string token
    pub fn as_string(&self) -> Result<&'a str> {
        self.expect(TokenKind::QuotedString, "string")?;
        Ok(self.text)
    }

    /// Check whether this is the section marker `$<name>`
    pub fn is_marker(&self, name: &str) -> bool {
        self.kind == TokenKind::SectionMarker && self.text.strip_prefix('$') == Some(name)
    }

    fn digits(&self) -> &'a [u8] {
        self.text.strip_prefix('+').unwrap_or(self.text).as_bytes()
    }

    fn expect(&self, kind: TokenKind, expected: &'static str) -> Result<()> {
        if self.kind == kind {
            Ok(())
        } else if self.kind == TokenKind::EndOfStream {
            Err(ParseError::eof(expected))
        } else {
            Err(self.mismatch(expected))
        }
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> ParseError {
        ParseError::TypeMismatch {
            line: self.line,
            expected,
            found: self.kind.describe(),
            text: self.text.to_string(),
        }
    }
}

// ============================================================================
// Lexing Primitives
// ============================================================================

/// Recognize a signed integer or floating point literal
///
/// The integer part may be omitted when a fraction follows (`.5`, `-.25`).
fn number(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize((
        opt(alt((char('+'), char('-')))),
        alt((
            recognize(pair(
                take_while1(|c: u8| c.is_ascii_digit()),
                opt(pair(char('.'), take_while(|c: u8| c.is_ascii_digit()))),
            )),
            recognize(pair(char('.'), take_while1(|c: u8| c.is_ascii_digit()))),
        )),
        opt((
            alt((char('e'), char('E'))),
            opt(alt((char('+'), char('-')))),
            take_while1(|c: u8| c.is_ascii_digit()),
        )),
    ))
    .parse(input)
}

fn starts_number(bytes: &[u8]) -> bool {
    match bytes {
        [b'0'..=b'9', ..] | [b'.', b'0'..=b'9', ..] => true,
        [b'+' | b'-', b'0'..=b'9', ..] | [b'+' | b'-', b'.', b'0'..=b'9', ..] => true,
        _ => false,
    }
}

fn is_marker_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn as_text(bytes: &[u8], line: usize) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| ParseError::TypeMismatch {
        line,
        expected: "UTF-8 text",
        found: "invalid byte sequence",
        text: String::from_utf8_lossy(bytes).into_owned(),
    })
}

/// Token together with the stream state right after it
#[derive(Clone, Copy, Debug)]
struct Lexed<'a> {
    token: Token<'a>,
    end: usize,
    line: usize,
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Peekable token stream over MSH content
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    peeked: Option<Lexed<'a>>,
    exhausted: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            peeked: None,
            exhausted: false,
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&mut self) -> Result<Token<'a>> {
        if let Some(lexed) = self.peeked {
            return Ok(lexed.token);
        }
        let lexed = self.lex()?;
        self.peeked = Some(lexed);
        Ok(lexed.token)
    }

    /// Consume and return the next token
    ///
    /// The first read at the end of input yields `EndOfStream`; any read
    /// after that fails.
    pub fn read(&mut self) -> Result<Token<'a>> {
        if self.exhausted {
            return Err(ParseError::eof("token"));
        }
        let lexed = match self.peeked.take() {
            Some(lexed) => lexed,
            None => self.lex()?,
        };
        self.pos = lexed.end;
        self.line = lexed.line;
        if lexed.token.kind == TokenKind::EndOfStream {
            self.exhausted = true;
        }
        Ok(lexed.token)
    }

    /// Consume exactly `count` raw bytes, ignoring token boundaries
    ///
    /// A pending peeked token is discarded; the blob starts at the current
    /// stream position.
    pub fn read_raw_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.peeked = None;
        if count > self.remaining() {
            return Err(ParseError::eof("binary payload"));
        }
        let blob = &self.input[self.pos..self.pos + count];
        self.pos += count;
        Ok(blob)
    }

    /// Consume trailing blanks and a single line break
    ///
    /// Binary payloads start right after the line break that ends the
    /// preceding text.
    pub fn skip_line_break(&mut self) {
        self.peeked = None;
        let rest = &self.input[self.pos..];
        let blanks = rest
            .iter()
            .take_while(|&&c| c == b' ' || c == b'\t')
            .count();
        let rest = &rest[blanks..];
        let newline = if rest.starts_with(b"\r\n") {
            2
        } else if rest.starts_with(b"\n") {
            1
        } else {
            0
        };
        self.pos += blanks + newline;
        if newline > 0 {
            self.line += 1;
        }
    }

    /// Move to the next line that starts with a section marker
    ///
    /// The content in between is not tokenized, so binary data and
    /// unbalanced quotes are passed over.
    pub fn skip_to_section_marker(&mut self) {
        self.peeked = None;
        let mut from = self.pos;
        while let Some(offset) = memchr(b'$', &self.input[from..]) {
            let at = from + offset;
            if self.starts_line(at) {
                self.advance_to(at);
                return;
            }
            from = at + 1;
        }
        self.advance_to(self.input.len());
    }

    /// Current 1-based line
    pub fn line(&self) -> usize {
        self.line
    }

    /// Bytes left after the current position
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    fn advance_to(&mut self, target: usize) {
        self.line += memchr_iter(b'\n', &self.input[self.pos..target]).count();
        self.pos = target;
    }

    /// Only blanks between the previous line break and `at`
    fn starts_line(&self, at: usize) -> bool {
        let line_start = memrchr(b'\n', &self.input[..at]).map_or(0, |p| p + 1);
        self.input[line_start..at]
            .iter()
            .all(|&c| c == b' ' || c == b'\t' || c == b'\r')
    }

    fn lex(&self) -> Result<Lexed<'a>> {
        let bytes = self.input;
        let mut pos = self.pos;
        let mut line = self.line;

        while pos < bytes.len() {
            match bytes[pos] {
                b'\n' => {
                    line += 1;
                    pos += 1;
                }
                b'$' if self.starts_line(pos) => {
                    let name_len = bytes[pos + 1..]
                        .iter()
                        .take_while(|&&c| is_marker_char(c))
                        .count();
                    let end = pos + 1 + name_len;
                    let text = as_text(&bytes[pos..end], line)?;
                    return Ok(Lexed {
                        token: Token::new(TokenKind::SectionMarker, text, line),
                        end,
                        line,
                    });
                }
                b'"' => {
                    let start = pos + 1;
                    let close = memchr(b'"', &bytes[start..])
                        .ok_or(ParseError::UnterminatedString { line })?;
                    let body = &bytes[start..start + close];
                    let text = as_text(body, line)?;
                    return Ok(Lexed {
                        token: Token::new(TokenKind::QuotedString, text, line),
                        end: start + close + 1,
                        line: line + memchr_iter(b'\n', body).count(),
                    });
                }
                _ if starts_number(&bytes[pos..]) => {
                    let (_, literal) = number(&bytes[pos..]).map_err(|_| {
                        ParseError::TypeMismatch {
                            line,
                            expected: "number",
                            found: "malformed literal",
                            text: String::from_utf8_lossy(&bytes[pos..pos + 1]).into_owned(),
                        }
                    })?;
                    let text = as_text(literal, line)?;
                    return Ok(Lexed {
                        token: Token::new(TokenKind::Number, text, line),
                        end: pos + literal.len(),
                        line,
                    });
                }
                _ => pos += 1,
            }
        }

        Ok(Lexed {
            token: Token::new(TokenKind::EndOfStream, "", line),
            end: pos,
            line,
        })
    }
}
