//! Parser state: token cursor, arena ownership and shared helpers.

use super::base::NodeIndex;
use super::node::{NodeArena, NodeData};
use crate::scanner::{Scanner, Token, TokenKind};

/// A syntax error with the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at offset {pos})")]
pub struct ParseError {
    pub message: String,
    pub pos: u32,
}

impl ParseError {
    pub fn new(message: impl Into<String>, pos: u32) -> Self {
        ParseError {
            message: message.into(),
            pos,
        }
    }
}

/// Words that can never be used as binding names.
pub(super) const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "finally", "for", "function", "if", "import", "in", "instanceof",
    "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var", "void", "while",
    "with", "null", "true", "false",
];

pub struct ParserState {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) arena: NodeArena,
}

impl ParserState {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let tokens = Scanner::new(source).scan_all()?;
        let arena = NodeArena::with_capacity(tokens.len());
        Ok(ParserState {
            tokens,
            current: 0,
            arena,
        })
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// Parse a whole module.
    pub fn parse_program(&mut self) -> Result<NodeIndex, ParseError> {
        let mut body = Vec::new();
        while !self.is_at_end() {
            body.push(self.parse_statement()?);
        }
        tracing::debug!(statements = body.len(), nodes = self.arena.len(), "parsed program");
        Ok(self.arena.add(NodeData::Program { body }, 0))
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(super) fn token(&self) -> &Token {
        self.peek(0)
    }

    /// Look `offset` tokens ahead; saturates at the end-of-file token.
    pub(super) fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.current + offset).min(last)]
    }

    #[inline]
    pub(super) fn pos(&self) -> u32 {
        self.token().pos
    }

    #[inline]
    pub(super) fn is_at_end(&self) -> bool {
        self.token().kind == TokenKind::EndOfFile
    }

    pub(super) fn advance(&mut self) -> Token {
        let token = self.token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    #[inline]
    pub(super) fn at_punct(&self, punct: &str) -> bool {
        self.token().is_punct(punct)
    }

    #[inline]
    pub(super) fn at_word(&self, word: &str) -> bool {
        self.token().is_word(word)
    }

    pub(super) fn eat_punct(&mut self, punct: &str) -> bool {
        if self.at_punct(punct) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub(super) fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub(super) fn expect_punct(&mut self, punct: &str) -> Result<(), ParseError> {
        if self.eat_punct(punct) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{punct}' expected")))
        }
    }

    pub(super) fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{word}' expected")))
        }
    }

    /// Consume a binding identifier (not a reserved word).
    pub(super) fn parse_binding_name(&mut self) -> Result<String, ParseError> {
        let token = self.token();
        if token.kind == TokenKind::Identifier && !RESERVED_WORDS.contains(&token.text.as_str()) {
            Ok(self.advance().text)
        } else {
            Err(self.unexpected("Identifier expected"))
        }
    }

    /// Consume any identifier-like token, keywords included (property names,
    /// import/export names).
    pub(super) fn parse_identifier_name(&mut self) -> Result<String, ParseError> {
        if self.token().kind == TokenKind::Identifier {
            Ok(self.advance().text)
        } else {
            Err(self.unexpected("Identifier expected"))
        }
    }

    pub(super) fn parse_string_literal_text(&mut self) -> Result<String, ParseError> {
        if self.token().kind == TokenKind::StringLiteral {
            Ok(self.advance().text)
        } else {
            Err(self.unexpected("String literal expected"))
        }
    }

    /// Automatic semicolon insertion: accept `;`, a following `}`, end of
    /// file, or a preceding line break.
    pub(super) fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat_punct(";") {
            return Ok(());
        }
        let token = self.token();
        if token.is_punct("}") || token.kind == TokenKind::EndOfFile || token.preceded_by_line_break
        {
            Ok(())
        } else {
            Err(self.unexpected("';' expected"))
        }
    }

    pub(super) fn unexpected(&self, message: &str) -> ParseError {
        let token = self.token();
        let found = match token.kind {
            TokenKind::EndOfFile => "end of file".to_string(),
            TokenKind::StringLiteral => format!("\"{}\"", token.text),
            _ => format!("'{}'", token.text),
        };
        ParseError::new(format!("{message}, found {found}."), token.pos)
    }
}
