//! JavaScript printer.
//!
//! Walks a `NodeArena` from a root node and emits source text. Output uses
//! two-space indentation, one statement per line, and double-quoted strings.
//! Parentheses come from explicit `Parenthesized` nodes, plus wherever
//! operator precedence requires them for synthesized trees.

mod expressions;
mod literals;
mod printer;

pub use literals::quote_string;
pub use printer::Printer;
