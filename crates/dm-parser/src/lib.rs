//! Scanner, syntax tree and parser for the ES-module subset touched by the
//! debug-macros expander.
//!
//! This crate provides:
//! - `Scanner` / `Token` - Tokenizer over JavaScript source text
//! - `NodeArena` / `NodeIndex` - Arena-backed syntax tree with parent links
//! - `ParserState` - Recursive-descent parser producing a `Program` node
//! - Tree mutation primitives used by transforms (replace, remove, insert)

pub mod parser;
pub mod scanner;

pub use parser::{
    LiteralValue, Node, NodeArena, NodeData, NodeIndex, ParseError, ParserState, TreeError,
    VarKind, binary_precedence, parse_program,
};
pub use scanner::{Scanner, Token, TokenKind};
