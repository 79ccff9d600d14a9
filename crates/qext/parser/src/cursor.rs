//! Scannerless token combinators over the clause text.
//!
//! Every token reader goes through [`Cursor::lexeme`], which skips leading
//! whitespace first, so positions reported in errors always point at the first
//! byte of the offending token.

use qext_types::{is_ident_char, is_ident_start};

use crate::error::{ParseError, ParseErrorKind};

const END_OF_INPUT: &str = "end of input";

#[derive(Clone)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump(ch);
        }
    }

    /// Skip whitespace, then run `token`.
    pub(crate) fn lexeme<T>(
        &mut self,
        token: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.skip_whitespace();
        token(self)
    }

    pub(crate) fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.input.len()
    }

    /// Short description of the next token, for error messages.
    pub(crate) fn found(&self) -> String {
        let rest = self.rest();
        let Some(first) = rest.chars().next() else {
            return END_OF_INPUT.to_string();
        };
        let word: String = if is_ident_char(first) {
            rest.chars().take_while(|c| is_ident_char(*c)).take(24).collect()
        } else {
            first.to_string()
        };
        format!("`{}`", word)
    }

    fn starts_with_keyword(&self, keyword: &str) -> bool {
        let rest = self.rest().as_bytes();
        rest.len() >= keyword.len() && rest[..keyword.len()].eq_ignore_ascii_case(keyword.as_bytes())
    }

    /// Does the next token spell `keyword` (case-insensitive)? Consumes nothing
    /// but leading whitespace.
    pub(crate) fn peek_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        self.starts_with_keyword(keyword)
    }

    /// Consume `keyword` if it is next.
    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    /// True unless an identifier character follows immediately.
    pub(crate) fn at_word_boundary(&self) -> bool {
        !matches!(self.peek_char(), Some(ch) if is_ident_char(ch))
    }

    pub(crate) fn keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        self.lexeme(|c| {
            if c.eat_keyword(keyword) {
                Ok(())
            } else {
                Err(c.expected(format!("keyword {}", keyword)))
            }
        })
    }

    pub(crate) fn peek_symbol(&mut self, symbol: char) -> bool {
        self.skip_whitespace();
        self.peek_char() == Some(symbol)
    }

    pub(crate) fn symbol(&mut self, symbol: char) -> Result<(), ParseError> {
        self.lexeme(|c| {
            if c.peek_char() == Some(symbol) {
                c.bump(symbol);
                Ok(())
            } else {
                Err(c.expected(format!("'{}'", symbol)))
            }
        })
    }

    /// Unsigned digit sequence that fits in a `u64`.
    pub(crate) fn integer(&mut self) -> Result<u64, ParseError> {
        self.lexeme(|c| {
            let start = c.pos;
            let digits: &str = {
                let rest = c.rest();
                let len = rest.bytes().take_while(u8::is_ascii_digit).count();
                &rest[..len]
            };
            if digits.is_empty() {
                return Err(c.expected("integer literal"));
            }
            c.pos += digits.len();
            digits.parse::<u64>().map_err(|_| {
                ParseError::new(ParseErrorKind::IntegerOutOfRange(digits.to_string()), start)
            })
        })
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`, case preserved.
    pub(crate) fn identifier(&mut self, what: &str) -> Result<String, ParseError> {
        self.lexeme(|c| {
            match c.peek_char() {
                Some(first) if is_ident_start(first) => {}
                _ => return Err(c.expected(what)),
            }
            let rest = c.rest();
            let len = rest
                .char_indices()
                .find(|(_, ch)| !is_ident_char(*ch))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            c.pos += len;
            Ok(rest[..len].to_string())
        })
    }

    /// Double-quoted string; a backslash takes the next character literally.
    pub(crate) fn string_literal(&mut self) -> Result<String, ParseError> {
        self.lexeme(|c| {
            let start = c.pos;
            if c.peek_char() != Some('"') {
                return Err(c.expected("string literal"));
            }
            c.bump('"');
            let mut value = String::new();
            while let Some(ch) = c.peek_char() {
                c.bump(ch);
                match ch {
                    '"' => return Ok(value),
                    '\\' => match c.peek_char() {
                        Some(escaped) => {
                            c.bump(escaped);
                            value.push(escaped);
                        }
                        None => break,
                    },
                    other => value.push(other),
                }
            }
            Err(ParseError::new(ParseErrorKind::UnterminatedString, start))
        })
    }

    pub(crate) fn expected(&self, what: impl Into<String>) -> ParseError {
        ParseError::expected(what, self.found(), self.pos)
    }
}
