//! Tokenizer for the JavaScript subset understood by the parser.
//!
//! The scanner produces the whole token stream up front. Comments and
//! whitespace are skipped; each token records whether a line break preceded
//! it so the parser can apply automatic semicolon insertion.

use crate::parser::ParseError;

/// Punctuators, longest first so that greedy matching picks `===` over `==`.
const PUNCTUATORS: &[&str] = &[
    "===", "!==", "...", "=>", "==", "!=", "<=", ">=", "&&", "||", "??", "+=", "-=", "*=", "/=",
    "{", "}", "(", ")", "[", "]", ";", ",", ".", ":", "?", "=", "!", "+", "-", "*", "/", "%", "<",
    ">", "&", "|",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    StringLiteral,
    NumericLiteral,
    Punctuation,
    EndOfFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Identifier name, punctuator, raw numeric text, or cooked string value.
    pub text: String,
    pub pos: u32,
    pub preceded_by_line_break: bool,
}

impl Token {
    #[inline]
    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == punct
    }

    /// True for an identifier token spelled exactly `word` (keywords are
    /// scanned as identifiers and told apart by the parser).
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == word
    }
}

pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    saw_line_break: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            pos: 0,
            saw_line_break: false,
        }
    }

    pub fn source_text(&self) -> &'a str {
        self.source
    }

    /// Scan the entire source, ending with an `EndOfFile` token.
    pub fn scan_all(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan()?;
            let done = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if done {
                break;
            }
        }
        tracing::trace!(count = tokens.len(), "scanned tokens");
        Ok(tokens)
    }

    fn scan(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia()?;
        let start = self.pos;
        let preceded_by_line_break = std::mem::take(&mut self.saw_line_break);
        let bytes = self.source.as_bytes();

        let Some(&first) = bytes.get(start) else {
            return Ok(self.token(TokenKind::EndOfFile, String::new(), start, preceded_by_line_break));
        };

        if first == b'"' || first == b'\'' {
            let value = self.scan_string(first)?;
            return Ok(self.token(TokenKind::StringLiteral, value, start, preceded_by_line_break));
        }

        if first.is_ascii_digit()
            || (first == b'.' && bytes.get(start + 1).is_some_and(u8::is_ascii_digit))
        {
            let raw = self.scan_number();
            return Ok(self.token(TokenKind::NumericLiteral, raw, start, preceded_by_line_break));
        }

        let rest = &self.source[start..];
        if let Some(ch) = rest.chars().next() {
            if is_identifier_start(ch) {
                let len = rest
                    .char_indices()
                    .find(|&(_, c)| !is_identifier_part(c))
                    .map_or(rest.len(), |(i, _)| i);
                self.pos += len;
                let name = rest[..len].to_string();
                return Ok(self.token(TokenKind::Identifier, name, start, preceded_by_line_break));
            }
        }

        for punct in PUNCTUATORS {
            if rest.starts_with(punct) {
                self.pos += punct.len();
                return Ok(self.token(
                    TokenKind::Punctuation,
                    (*punct).to_string(),
                    start,
                    preceded_by_line_break,
                ));
            }
        }

        let ch = rest.chars().next().unwrap_or('\0');
        Err(ParseError::new(format!("Invalid character '{ch}'."), start as u32))
    }

    fn token(&self, kind: TokenKind, text: String, start: usize, line_break: bool) -> Token {
        Token {
            kind,
            text,
            pos: start as u32,
            preceded_by_line_break: line_break,
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        let bytes = self.source.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            match b {
                b'\n' => {
                    self.saw_line_break = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'/' if bytes.get(self.pos + 1) == Some(&b'/') => {
                    match memchr::memchr(b'\n', &bytes[self.pos..]) {
                        Some(offset) => self.pos += offset,
                        None => self.pos = bytes.len(),
                    }
                }
                b'/' if bytes.get(self.pos + 1) == Some(&b'*') => {
                    let body = &bytes[self.pos + 2..];
                    let Some(end) = memchr::memmem::find(body, b"*/") else {
                        return Err(ParseError::new("'*/' expected.", self.pos as u32));
                    };
                    if memchr::memchr(b'\n', &body[..end]).is_some() {
                        self.saw_line_break = true;
                    }
                    self.pos += 2 + end + 2;
                }
                _ => {
                    // Non-ASCII whitespace (NBSP, BOM, line separators).
                    let Some(ch) = self.source[self.pos..].chars().next() else {
                        break;
                    };
                    if ch.is_whitespace() || ch == '\u{feff}' {
                        if ch == '\u{2028}' || ch == '\u{2029}' {
                            self.saw_line_break = true;
                        }
                        self.pos += ch.len_utf8();
                    } else {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn scan_string(&mut self, quote: u8) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.source[self.pos..].chars().next() else {
                return Err(ParseError::new("Unterminated string literal.", start as u32));
            };
            self.pos += ch.len_utf8();
            match ch {
                '\n' => {
                    return Err(ParseError::new("Unterminated string literal.", start as u32));
                }
                c if c as u32 == u32::from(quote) => break,
                '\\' => self.scan_escape(&mut value, start)?,
                c => value.push(c),
            }
        }
        Ok(value)
    }

    fn scan_escape(&mut self, value: &mut String, start: usize) -> Result<(), ParseError> {
        let Some(ch) = self.source[self.pos..].chars().next() else {
            return Err(ParseError::new("Unterminated string literal.", start as u32));
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'v' => value.push('\u{b}'),
            '0' => value.push('\0'),
            // Line continuation.
            '\n' => {}
            'x' => {
                let code = self.scan_hex_digits(2, start)?;
                value.push(code_point(code, start)?);
            }
            'u' => {
                let mut code = self.scan_unicode_escape(start)?;
                if (0xD800..0xDC00).contains(&code) {
                    // A high surrogate must be followed by an escaped low one.
                    let resume = self.pos;
                    if self.source[self.pos..].starts_with("\\u") {
                        self.pos += 2;
                        let low = self.scan_unicode_escape(start)?;
                        if (0xDC00..0xE000).contains(&low) {
                            code = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        } else {
                            self.pos = resume;
                        }
                    }
                }
                value.push(code_point(code, start)?);
            }
            other => value.push(other),
        }
        Ok(())
    }

    /// Digits of `\uXXXX` or `\u{X...}`, after the `u`.
    fn scan_unicode_escape(&mut self, start: usize) -> Result<u32, ParseError> {
        if !self.source[self.pos..].starts_with('{') {
            return self.scan_hex_digits(4, start);
        }
        self.pos += 1;
        let close = self.source[self.pos..]
            .find('}')
            .ok_or_else(|| ParseError::new("Unterminated Unicode escape sequence.", start as u32))?;
        let digits = &self.source[self.pos..self.pos + close];
        self.pos += close + 1;
        let code = u32::from_str_radix(digits, 16)
            .map_err(|_| ParseError::new("Hexadecimal digit expected.", start as u32))?;
        if code > 0x10FFFF {
            return Err(ParseError::new(
                "An extended Unicode escape value must be between 0x0 and 0x10FFFF inclusive.",
                start as u32,
            ));
        }
        Ok(code)
    }

    fn scan_hex_digits(&mut self, count: usize, start: usize) -> Result<u32, ParseError> {
        let digits = self
            .source
            .get(self.pos..self.pos + count)
            .ok_or_else(|| ParseError::new("Hexadecimal digit expected.", start as u32))?;
        let code = u32::from_str_radix(digits, 16)
            .map_err(|_| ParseError::new("Hexadecimal digit expected.", start as u32))?;
        self.pos += count;
        Ok(code)
    }

    fn scan_number(&mut self) -> String {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        if bytes[start] == b'0' && matches!(bytes.get(start + 1), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')) {
            self.pos += 2;
            while bytes.get(self.pos).is_some_and(|b| b.is_ascii_hexdigit() || *b == b'_') {
                self.pos += 1;
            }
            return self.source[start..self.pos].to_string();
        }
        while bytes.get(self.pos).is_some_and(|b| b.is_ascii_digit() || *b == b'_') {
            self.pos += 1;
        }
        if bytes.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            while bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
                self.pos += 1;
            }
        }
        if matches!(bytes.get(self.pos), Some(b'e' | b'E')) {
            let mut lookahead = self.pos + 1;
            if matches!(bytes.get(lookahead), Some(b'+' | b'-')) {
                lookahead += 1;
            }
            if bytes.get(lookahead).is_some_and(u8::is_ascii_digit) {
                self.pos = lookahead;
                while bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
                    self.pos += 1;
                }
            }
        }
        self.source[start..self.pos].to_string()
    }
}

/// Decoded escape value. Surrogates left unpaired have no `char` form.
fn code_point(code: u32, start: usize) -> Result<char, ParseError> {
    char::from_u32(code).ok_or_else(|| {
        ParseError::new("Unpaired surrogate escapes are not supported.", start as u32)
    })
}

#[inline]
fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

#[inline]
fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric()
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
