//! In-place tree mutation: statement replacement, removal and insertion.
//!
//! Only statements that sit directly in a `Program` or `Block` statement list
//! can be spliced. Replaced and removed nodes stay in the arena but become
//! detached (parent `NONE`), so walks from the root no longer reach them.

use super::base::NodeIndex;
use super::node::{NodeArena, NodeData};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("{kind} node {index:?} is not in a statement list")]
    NotInStatementList { kind: &'static str, index: NodeIndex },
    #[error("node {0:?} is not a program or block")]
    NotAStatementContainer(NodeIndex),
    #[error("node {0:?} is not an expression statement")]
    NotAnExpressionStatement(NodeIndex),
}

impl NodeArena {
    /// Locate `target` in its parent's statement list.
    fn statement_slot(&self, target: NodeIndex) -> Result<(NodeIndex, usize), TreeError> {
        let not_found = || TreeError::NotInStatementList {
            kind: self.data(target).map_or("missing", NodeData::kind_name),
            index: target,
        };
        let parent = self.parent(target);
        let list = self.statements(parent).ok_or_else(not_found)?;
        let slot = list.iter().position(|&idx| idx == target).ok_or_else(not_found)?;
        Ok((parent, slot))
    }

    /// Replace one statement with zero or more statements, in order.
    pub fn replace_with_multiple(
        &mut self,
        target: NodeIndex,
        replacements: Vec<NodeIndex>,
    ) -> Result<(), TreeError> {
        let (parent, slot) = self.statement_slot(target)?;
        for &replacement in &replacements {
            self.set_parent(replacement, parent);
        }
        if let Some(list) = self.get_mut(parent).and_then(|node| node.data.statements_mut()) {
            list.splice(slot..=slot, replacements);
        }
        self.set_parent(target, NodeIndex::NONE);
        Ok(())
    }

    /// Remove a statement from its parent's statement list.
    pub fn remove_statement(&mut self, target: NodeIndex) -> Result<(), TreeError> {
        self.replace_with_multiple(target, Vec::new())
    }

    /// Insert `statement` as the first statement of a `Program` or `Block`.
    pub fn unshift_statement(
        &mut self,
        container: NodeIndex,
        statement: NodeIndex,
    ) -> Result<(), TreeError> {
        let list = self
            .get_mut(container)
            .and_then(|node| node.data.statements_mut())
            .ok_or(TreeError::NotAStatementContainer(container))?;
        list.insert(0, statement);
        self.set_parent(statement, container);
        Ok(())
    }

    /// Swap the expression of an `ExpressionStatement`.
    pub fn replace_statement_expression(
        &mut self,
        statement: NodeIndex,
        expression: NodeIndex,
    ) -> Result<(), TreeError> {
        let previous = match self.get_mut(statement).map(|node| &mut node.data) {
            Some(NodeData::ExpressionStatement { expression: slot }) => {
                std::mem::replace(slot, expression)
            }
            _ => return Err(TreeError::NotAnExpressionStatement(statement)),
        };
        // The old expression's subtree may have been reused by the new one.
        if self.parent(previous) == statement {
            self.set_parent(previous, NodeIndex::NONE);
        }
        self.set_parent(expression, statement);
        Ok(())
    }
}
