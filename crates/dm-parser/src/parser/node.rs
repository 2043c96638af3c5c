//! Node definitions for the syntax tree.
//!
//! Every node lives in a `NodeArena` and refers to its children by
//! `NodeIndex`. Parent links are maintained by the arena so transforms can
//! walk upward (scope resolution) and splice statement lists in place.

use super::base::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// Value of a literal node. Numbers keep their source spelling.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(String),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone)]
pub enum NodeData {
    // =========================================================================
    // Module structure
    // =========================================================================
    Program {
        body: Vec<NodeIndex>,
    },
    /// `import a, { b as c } from "source";`
    ImportDeclaration {
        specifiers: Vec<NodeIndex>,
        source: String,
    },
    /// `{ imported as local }`
    ImportSpecifier {
        imported: String,
        local: String,
    },
    /// `import local from "..."`
    ImportDefaultSpecifier {
        local: String,
    },
    /// `import * as local from "..."`
    ImportNamespaceSpecifier {
        local: String,
    },
    /// `export <declaration>`
    ExportNamedDeclaration {
        declaration: NodeIndex,
    },
    /// `export default <expression>;`
    ExportDefaultDeclaration {
        expression: NodeIndex,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    VariableDeclaration {
        kind: VarKind,
        declarations: Vec<NodeIndex>,
    },
    VariableDeclarator {
        name: String,
        init: NodeIndex,
    },
    FunctionDeclaration {
        name: String,
        params: Vec<String>,
        body: NodeIndex,
    },
    Block {
        statements: Vec<NodeIndex>,
    },
    ExpressionStatement {
        expression: NodeIndex,
    },
    IfStatement {
        condition: NodeIndex,
        then_branch: NodeIndex,
        else_branch: NodeIndex,
    },
    ReturnStatement {
        expression: NodeIndex,
    },
    ThrowStatement {
        expression: NodeIndex,
    },
    EmptyStatement,

    // =========================================================================
    // Expressions
    // =========================================================================
    Identifier {
        name: String,
    },
    Literal(LiteralValue),
    CallExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    NewExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    /// `object.property`
    MemberExpression {
        object: NodeIndex,
        property: String,
    },
    /// `object[index]`
    ElementAccess {
        object: NodeIndex,
        index: NodeIndex,
    },
    UnaryExpression {
        operator: String,
        operand: NodeIndex,
    },
    /// Binary and logical operators (`+`, `===`, `&&`, `??`, ...).
    BinaryExpression {
        left: NodeIndex,
        operator: String,
        right: NodeIndex,
    },
    AssignmentExpression {
        target: NodeIndex,
        operator: String,
        value: NodeIndex,
    },
    ConditionalExpression {
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    },
    ObjectLiteral {
        properties: Vec<NodeIndex>,
    },
    /// `key: value`, or shorthand `key` when `shorthand` is set.
    Property {
        key: String,
        quoted: bool,
        value: NodeIndex,
        shorthand: bool,
    },
    ArrayLiteral {
        elements: Vec<NodeIndex>,
    },
    FunctionExpression {
        name: Option<String>,
        params: Vec<String>,
        body: NodeIndex,
    },
    /// Arrow function; `body` is a `Block` or an expression.
    ArrowFunction {
        params: Vec<String>,
        body: NodeIndex,
    },
    Parenthesized {
        expression: NodeIndex,
    },
}

impl NodeData {
    /// Direct children in source order. `NONE` slots are skipped.
    pub fn children(&self) -> Vec<NodeIndex> {
        let mut out = match self {
            Self::Program { body } => body.clone(),
            Self::ImportDeclaration { specifiers, .. } => specifiers.clone(),
            Self::ExportNamedDeclaration { declaration } => vec![*declaration],
            Self::ExportDefaultDeclaration { expression } => vec![*expression],
            Self::VariableDeclaration { declarations, .. } => declarations.clone(),
            Self::VariableDeclarator { init, .. } => vec![*init],
            Self::FunctionDeclaration { body, .. } => vec![*body],
            Self::Block { statements } => statements.clone(),
            Self::ExpressionStatement { expression }
            | Self::ReturnStatement { expression }
            | Self::ThrowStatement { expression }
            | Self::Parenthesized { expression } => vec![*expression],
            Self::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => vec![*condition, *then_branch, *else_branch],
            Self::CallExpression { callee, arguments } | Self::NewExpression { callee, arguments } => {
                let mut out = Vec::with_capacity(arguments.len() + 1);
                out.push(*callee);
                out.extend_from_slice(arguments);
                out
            }
            Self::MemberExpression { object, .. } => vec![*object],
            Self::ElementAccess { object, index } => vec![*object, *index],
            Self::UnaryExpression { operand, .. } => vec![*operand],
            Self::BinaryExpression { left, right, .. } => vec![*left, *right],
            Self::AssignmentExpression { target, value, .. } => vec![*target, *value],
            Self::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => vec![*condition, *when_true, *when_false],
            Self::ObjectLiteral { properties } => properties.clone(),
            Self::Property { value, .. } => vec![*value],
            Self::ArrayLiteral { elements } => elements.clone(),
            Self::FunctionExpression { body, .. } | Self::ArrowFunction { body, .. } => vec![*body],
            Self::ImportSpecifier { .. }
            | Self::ImportDefaultSpecifier { .. }
            | Self::ImportNamespaceSpecifier { .. }
            | Self::EmptyStatement
            | Self::Identifier { .. }
            | Self::Literal(_) => Vec::new(),
        };
        out.retain(|idx| idx.is_some());
        out
    }

    /// Statement list of a `Program` or `Block`.
    pub fn statements(&self) -> Option<&[NodeIndex]> {
        match self {
            Self::Program { body } => Some(body),
            Self::Block { statements } => Some(statements),
            _ => None,
        }
    }

    pub(crate) fn statements_mut(&mut self) -> Option<&mut Vec<NodeIndex>> {
        match self {
            Self::Program { body } => Some(body),
            Self::Block { statements } => Some(statements),
            _ => None,
        }
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Program { .. } => "Program",
            Self::ImportDeclaration { .. } => "ImportDeclaration",
            Self::ImportSpecifier { .. } => "ImportSpecifier",
            Self::ImportDefaultSpecifier { .. } => "ImportDefaultSpecifier",
            Self::ImportNamespaceSpecifier { .. } => "ImportNamespaceSpecifier",
            Self::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            Self::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            Self::VariableDeclaration { .. } => "VariableDeclaration",
            Self::VariableDeclarator { .. } => "VariableDeclarator",
            Self::FunctionDeclaration { .. } => "FunctionDeclaration",
            Self::Block { .. } => "Block",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::IfStatement { .. } => "IfStatement",
            Self::ReturnStatement { .. } => "ReturnStatement",
            Self::ThrowStatement { .. } => "ThrowStatement",
            Self::EmptyStatement => "EmptyStatement",
            Self::Identifier { .. } => "Identifier",
            Self::Literal(_) => "Literal",
            Self::CallExpression { .. } => "CallExpression",
            Self::NewExpression { .. } => "NewExpression",
            Self::MemberExpression { .. } => "MemberExpression",
            Self::ElementAccess { .. } => "ElementAccess",
            Self::UnaryExpression { .. } => "UnaryExpression",
            Self::BinaryExpression { .. } => "BinaryExpression",
            Self::AssignmentExpression { .. } => "AssignmentExpression",
            Self::ConditionalExpression { .. } => "ConditionalExpression",
            Self::ObjectLiteral { .. } => "ObjectLiteral",
            Self::Property { .. } => "Property",
            Self::ArrayLiteral { .. } => "ArrayLiteral",
            Self::FunctionExpression { .. } => "FunctionExpression",
            Self::ArrowFunction { .. } => "ArrowFunction",
            Self::Parenthesized { .. } => "Parenthesized",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    /// `NONE` for the program root and for detached nodes.
    pub parent: NodeIndex,
    /// Source offset; synthesized nodes use 0.
    pub pos: u32,
}

/// Owner of every node in one compilation unit.
#[derive(Debug, Default)]
pub struct NodeArena {
    pub(super) nodes: Vec<Node>,
}
