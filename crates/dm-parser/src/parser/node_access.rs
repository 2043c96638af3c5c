//! NodeArena access methods and node-kind predicates.

use super::base::NodeIndex;
use super::node::{LiteralValue, Node, NodeArena, NodeData};

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.data(index).map(NodeData::children).unwrap_or_default()
    }

    /// Iterate `index` and then each ancestor up to the root.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(index).filter(|idx| idx.is_some()), move |&idx| {
            Some(self.parent(idx)).filter(|parent| parent.is_some())
        })
    }

    /// Statement list of a `Program` or `Block` node.
    pub fn statements(&self, index: NodeIndex) -> Option<&[NodeIndex]> {
        self.data(index).and_then(NodeData::statements)
    }

    // =========================================================================
    // Kind predicates
    // =========================================================================

    pub fn is_call_expression(&self, index: NodeIndex) -> bool {
        matches!(self.data(index), Some(NodeData::CallExpression { .. }))
    }

    pub fn is_import_declaration(&self, index: NodeIndex) -> bool {
        matches!(self.data(index), Some(NodeData::ImportDeclaration { .. }))
    }

    pub fn is_expression_statement(&self, index: NodeIndex) -> bool {
        matches!(self.data(index), Some(NodeData::ExpressionStatement { .. }))
    }

    pub fn is_function_like(&self, index: NodeIndex) -> bool {
        matches!(
            self.data(index),
            Some(
                NodeData::FunctionDeclaration { .. }
                    | NodeData::FunctionExpression { .. }
                    | NodeData::ArrowFunction { .. }
            )
        )
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn identifier_name(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index) {
            Some(NodeData::Identifier { name }) => Some(name),
            _ => None,
        }
    }

    pub fn string_literal_value(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index) {
            Some(NodeData::Literal(LiteralValue::String(value))) => Some(value),
            _ => None,
        }
    }

    /// Source path string of an `ImportDeclaration`.
    pub fn import_source(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index) {
            Some(NodeData::ImportDeclaration { source, .. }) => Some(source),
            _ => None,
        }
    }

    pub fn import_specifiers(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.data(index) {
            Some(NodeData::ImportDeclaration { specifiers, .. }) => specifiers,
            _ => &[],
        }
    }

    /// Local (possibly renamed) name bound by an import specifier.
    pub fn specifier_local_name(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index) {
            Some(
                NodeData::ImportSpecifier { local, .. }
                | NodeData::ImportDefaultSpecifier { local }
                | NodeData::ImportNamespaceSpecifier { local },
            ) => Some(local),
            _ => None,
        }
    }

    /// Name a specifier imports from its module. A default specifier is
    /// keyed by its local name; a namespace specifier has no imported name.
    pub fn specifier_imported_name(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index) {
            Some(NodeData::ImportSpecifier { imported, .. }) => Some(imported),
            Some(NodeData::ImportDefaultSpecifier { local }) => Some(local),
            _ => None,
        }
    }

    /// Expression wrapped by an `ExpressionStatement`.
    pub fn statement_expression(&self, index: NodeIndex) -> Option<NodeIndex> {
        match self.data(index) {
            Some(NodeData::ExpressionStatement { expression }) => Some(*expression),
            _ => None,
        }
    }

    /// Callee and argument list of a `CallExpression`.
    pub fn call_parts(&self, index: NodeIndex) -> Option<(NodeIndex, &[NodeIndex])> {
        match self.data(index) {
            Some(NodeData::CallExpression { callee, arguments }) => Some((*callee, arguments)),
            _ => None,
        }
    }
}
