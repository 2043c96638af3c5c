//! Expression printing with precedence-driven parenthesization.

use crate::literals::{literal_text, quote_string};
use crate::printer::Printer;
use dm_parser::{NodeData, NodeIndex, binary_precedence};

const PREC_ASSIGNMENT: u8 = 2;
const PREC_CONDITIONAL: u8 = 3;
const PREC_BINARY_BASE: u8 = 4;
const PREC_UNARY: u8 = 15;
const PREC_CALL: u8 = 17;
const PREC_PRIMARY: u8 = 20;

impl Printer<'_> {
    fn precedence(&self, node: NodeIndex) -> u8 {
        match self.arena.data(node) {
            Some(NodeData::AssignmentExpression { .. } | NodeData::ArrowFunction { .. }) => {
                PREC_ASSIGNMENT
            }
            Some(NodeData::ConditionalExpression { .. }) => PREC_CONDITIONAL,
            Some(NodeData::BinaryExpression { operator, .. }) => {
                PREC_BINARY_BASE + binary_precedence(operator).unwrap_or(0)
            }
            Some(NodeData::UnaryExpression { .. }) => PREC_UNARY,
            Some(
                NodeData::CallExpression { .. }
                | NodeData::NewExpression { .. }
                | NodeData::MemberExpression { .. }
                | NodeData::ElementAccess { .. },
            ) => PREC_CALL,
            _ => PREC_PRIMARY,
        }
    }

    /// Emit `node`, wrapping it in parentheses when it binds looser than
    /// `min_precedence`.
    pub(crate) fn emit_expression(&mut self, node: NodeIndex, min_precedence: u8) {
        if self.precedence(node) < min_precedence {
            self.write("(");
            self.emit_expression_inner(node);
            self.write(")");
        } else {
            self.emit_expression_inner(node);
        }
    }

    fn emit_expression_inner(&mut self, node: NodeIndex) {
        let arena = self.arena;
        let Some(data) = arena.data(node) else {
            return;
        };
        match data {
            NodeData::Identifier { name } => self.write(name),
            NodeData::Literal(value) => self.write(&literal_text(value)),
            NodeData::Parenthesized { expression } => {
                self.write("(");
                self.emit_expression(*expression, 0);
                self.write(")");
            }
            NodeData::CallExpression { callee, arguments } => {
                self.emit_expression(*callee, PREC_CALL);
                self.emit_arguments(arguments);
            }
            NodeData::NewExpression { callee, arguments } => {
                self.write("new ");
                self.emit_expression(*callee, PREC_CALL);
                self.emit_arguments(arguments);
            }
            NodeData::MemberExpression { object, property } => {
                self.emit_expression(*object, PREC_CALL);
                self.write(".");
                self.write(property);
            }
            NodeData::ElementAccess { object, index } => {
                self.emit_expression(*object, PREC_CALL);
                self.write("[");
                self.emit_expression(*index, 0);
                self.write("]");
            }
            NodeData::UnaryExpression { operator, operand } => {
                self.write(operator);
                let is_word = operator.chars().all(|c| c.is_ascii_alphabetic());
                let operand_is_signed = matches!(
                    arena.data(*operand),
                    Some(NodeData::UnaryExpression { operator: inner, .. })
                        if (operator == "-" || operator == "+") && inner.starts_with(operator.as_str())
                );
                if is_word || operand_is_signed {
                    self.write(" ");
                }
                self.emit_expression(*operand, PREC_UNARY);
            }
            NodeData::BinaryExpression {
                left,
                operator,
                right,
            } => {
                let precedence = self.precedence(node);
                self.emit_expression(*left, precedence);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_expression(*right, precedence + 1);
            }
            NodeData::AssignmentExpression {
                target,
                operator,
                value,
            } => {
                self.emit_expression(*target, PREC_CALL);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_expression(*value, PREC_ASSIGNMENT);
            }
            NodeData::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                self.emit_expression(*condition, PREC_CONDITIONAL + 1);
                self.write(" ? ");
                self.emit_expression(*when_true, PREC_ASSIGNMENT);
                self.write(" : ");
                self.emit_expression(*when_false, PREC_ASSIGNMENT);
            }
            NodeData::ObjectLiteral { properties } => {
                if properties.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, &prop) in properties.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_property(prop);
                }
                self.write(" }");
            }
            NodeData::ArrayLiteral { elements } => {
                self.write("[");
                for (i, &element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(element, PREC_ASSIGNMENT);
                }
                self.write("]");
            }
            NodeData::FunctionExpression { name, params, body } => {
                self.write("function ");
                if let Some(name) = name {
                    self.write(name);
                }
                self.emit_params(params);
                self.write(" ");
                self.emit_block(*body);
            }
            NodeData::ArrowFunction { params, body } => {
                if let [single] = params.as_slice() {
                    self.write(single);
                } else {
                    self.emit_params(params);
                }
                self.write(" => ");
                match arena.data(*body) {
                    Some(NodeData::Block { .. }) => self.emit_block(*body),
                    Some(NodeData::ObjectLiteral { .. }) => {
                        self.write("(");
                        self.emit_expression(*body, 0);
                        self.write(")");
                    }
                    _ => self.emit_expression(*body, PREC_ASSIGNMENT),
                }
            }
            NodeData::Property { .. } => self.emit_property(node),
            other => tracing::trace!(kind = other.kind_name(), "skipping non-expression node"),
        }
    }

    fn emit_arguments(&mut self, arguments: &[NodeIndex]) {
        self.write("(");
        for (i, &arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(arg, PREC_ASSIGNMENT);
        }
        self.write(")");
    }

    fn emit_property(&mut self, prop: NodeIndex) {
        let arena = self.arena;
        let Some(NodeData::Property {
            key,
            quoted,
            value,
            shorthand,
        }) = arena.data(prop)
        else {
            return;
        };
        if *shorthand {
            self.write(key);
            return;
        }
        if *quoted {
            self.write(&quote_string(key));
        } else {
            self.write(key);
        }
        self.write(": ");
        self.emit_expression(*value, PREC_ASSIGNMENT);
    }
}
