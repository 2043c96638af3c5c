//! NodeArena creation methods (add_* methods).
//!
//! Nodes built here start detached; the parent link of each child is pointed
//! at the new node. Attaching the result to a statement list is the job of the
//! mutation primitives in `node_mutation`.

use super::base::NodeIndex;
use super::node::{LiteralValue, Node, NodeArena, NodeData, VarKind};

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 1_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(Self::MAX_NODE_PREALLOC)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Push a node and adopt its children.
    pub fn add(&mut self, data: NodeData, pos: u32) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        let children = data.children();
        self.nodes.push(Node {
            data,
            parent: NodeIndex::NONE,
            pos,
        });
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub(crate) fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
    }

    // =========================================================================
    // Factories used by transforms
    // =========================================================================

    pub fn add_identifier(&mut self, name: impl Into<String>) -> NodeIndex {
        self.add(NodeData::Identifier { name: name.into() }, 0)
    }

    pub fn add_literal(&mut self, value: LiteralValue) -> NodeIndex {
        self.add(NodeData::Literal(value), 0)
    }

    pub fn add_string_literal(&mut self, value: impl Into<String>) -> NodeIndex {
        self.add_literal(LiteralValue::String(value.into()))
    }

    pub fn add_boolean_literal(&mut self, value: bool) -> NodeIndex {
        self.add_literal(LiteralValue::Boolean(value))
    }

    pub fn add_member(&mut self, object: NodeIndex, property: impl Into<String>) -> NodeIndex {
        self.add(
            NodeData::MemberExpression {
                object,
                property: property.into(),
            },
            0,
        )
    }

    pub fn add_call(&mut self, callee: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::CallExpression { callee, arguments }, 0)
    }

    pub fn add_unary(&mut self, operator: &str, operand: NodeIndex) -> NodeIndex {
        self.add(
            NodeData::UnaryExpression {
                operator: operator.to_string(),
                operand,
            },
            0,
        )
    }

    pub fn add_binary(&mut self, left: NodeIndex, operator: &str, right: NodeIndex) -> NodeIndex {
        self.add(
            NodeData::BinaryExpression {
                left,
                operator: operator.to_string(),
                right,
            },
            0,
        )
    }

    pub fn add_parenthesized(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::Parenthesized { expression }, 0)
    }

    pub fn add_expression_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::ExpressionStatement { expression }, 0)
    }

    /// `<kind> name = init;` with a single declarator.
    pub fn add_variable_declaration(
        &mut self,
        kind: VarKind,
        name: impl Into<String>,
        init: NodeIndex,
    ) -> NodeIndex {
        let declarator = self.add(
            NodeData::VariableDeclarator {
                name: name.into(),
                init,
            },
            0,
        );
        self.add(
            NodeData::VariableDeclaration {
                kind,
                declarations: vec![declarator],
            },
            0,
        )
    }

    /// `const name = init;`
    pub fn add_const_declaration(&mut self, name: impl Into<String>, init: NodeIndex) -> NodeIndex {
        self.add_variable_declaration(VarKind::Const, name, init)
    }
}
