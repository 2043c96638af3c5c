//! Arena-backed syntax tree and recursive-descent parser.

mod base;
mod node;
mod node_access;
mod node_arena;
mod node_mutation;
mod state;
mod state_expressions;
mod state_statements;

pub use base::NodeIndex;
pub use node::{LiteralValue, Node, NodeArena, NodeData, VarKind};
pub use node_mutation::TreeError;
pub use state::{ParseError, ParserState};
pub use state_expressions::binary_precedence;

/// Parse `source` into a fresh arena, returning the arena and its `Program` node.
pub fn parse_program(source: &str) -> Result<(NodeArena, NodeIndex), ParseError> {
    let mut parser = ParserState::new(source)?;
    let program = parser.parse_program()?;
    Ok((parser.into_arena(), program))
}
