//! Parser state - expression parsing methods

use super::base::NodeIndex;
use super::node::{LiteralValue, NodeData};
use super::state::{ParseError, ParserState, RESERVED_WORDS};
use crate::scanner::TokenKind;

/// Binding power of a binary operator; higher binds tighter.
pub fn binary_precedence(operator: &str) -> Option<u8> {
    Some(match operator {
        "??" => 1,
        "||" => 2,
        "&&" => 3,
        "|" => 4,
        "&" => 5,
        "==" | "!=" | "===" | "!==" => 6,
        "<" | ">" | "<=" | ">=" | "instanceof" | "in" => 7,
        "+" | "-" => 8,
        "*" | "/" | "%" => 9,
        _ => return None,
    })
}

const ASSIGNMENT_OPERATORS: &[&str] = &["=", "+=", "-=", "*=", "/="];
const PREFIX_OPERATORS: &[&str] = &["!", "-", "+"];
const PREFIX_KEYWORDS: &[&str] = &["typeof", "void", "delete"];

impl ParserState {
    // =========================================================================
    // Parse Methods - Core Expressions
    // =========================================================================

    /// Full expression (comma sequences are not supported).
    pub fn parse_expression(&mut self) -> Result<NodeIndex, ParseError> {
        self.parse_assignment_expression()
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> Result<NodeIndex, ParseError> {
        if self.look_ahead_is_arrow_function() {
            return self.parse_arrow_function();
        }

        let pos = self.pos();
        let target = self.parse_conditional_expression()?;
        let token = self.token();
        if token.kind == TokenKind::Punctuation && ASSIGNMENT_OPERATORS.contains(&token.text.as_str())
        {
            if !matches!(
                self.arena.data(target),
                Some(
                    NodeData::Identifier { .. }
                        | NodeData::MemberExpression { .. }
                        | NodeData::ElementAccess { .. }
                )
            ) {
                return Err(self.unexpected("Invalid left-hand side in assignment"));
            }
            let operator = self.advance().text;
            let value = self.parse_assignment_expression()?;
            return Ok(self.arena.add(
                NodeData::AssignmentExpression {
                    target,
                    operator,
                    value,
                },
                pos,
            ));
        }
        Ok(target)
    }

    fn parse_conditional_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        let condition = self.parse_binary_expression(0)?;
        if !self.eat_punct("?") {
            return Ok(condition);
        }
        let when_true = self.parse_assignment_expression()?;
        self.expect_punct(":")?;
        let when_false = self.parse_assignment_expression()?;
        Ok(self.arena.add(
            NodeData::ConditionalExpression {
                condition,
                when_true,
                when_false,
            },
            pos,
        ))
    }

    /// Precedence climbing over left-associative binary operators.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        let mut left = self.parse_unary_expression()?;
        loop {
            let token = self.token();
            let is_operator_token = token.kind == TokenKind::Punctuation
                || token.is_word("instanceof")
                || token.is_word("in");
            let Some(precedence) = binary_precedence(&token.text).filter(|_| is_operator_token)
            else {
                break;
            };
            if precedence <= min_precedence {
                break;
            }
            let operator = self.advance().text;
            let right = self.parse_binary_expression(precedence)?;
            left = self.arena.add(
                NodeData::BinaryExpression {
                    left,
                    operator,
                    right,
                },
                pos,
            );
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        let token = self.token();
        let is_prefix = (token.kind == TokenKind::Punctuation
            && PREFIX_OPERATORS.contains(&token.text.as_str()))
            || (token.kind == TokenKind::Identifier
                && PREFIX_KEYWORDS.contains(&token.text.as_str()));
        if !is_prefix {
            return self.parse_call_expression();
        }
        let operator = self.advance().text;
        let operand = self.parse_unary_expression()?;
        Ok(self
            .arena
            .add(NodeData::UnaryExpression { operator, operand }, pos))
    }

    /// Member accesses and calls chained onto a primary expression.
    fn parse_call_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        let mut expression = if self.at_word("new") {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        loop {
            if self.at_punct("(") {
                let arguments = self.parse_arguments()?;
                expression = self.arena.add(
                    NodeData::CallExpression {
                        callee: expression,
                        arguments,
                    },
                    pos,
                );
            } else if let Some(next) = self.parse_member_suffix(expression, pos)? {
                expression = next;
            } else {
                break;
            }
        }
        Ok(expression)
    }

    /// `.name` or `[index]` following `object`, if present.
    fn parse_member_suffix(
        &mut self,
        object: NodeIndex,
        pos: u32,
    ) -> Result<Option<NodeIndex>, ParseError> {
        if self.eat_punct(".") {
            let property = self.parse_identifier_name()?;
            return Ok(Some(
                self.arena
                    .add(NodeData::MemberExpression { object, property }, pos),
            ));
        }
        if self.eat_punct("[") {
            let index = self.parse_expression()?;
            self.expect_punct("]")?;
            return Ok(Some(
                self.arena.add(NodeData::ElementAccess { object, index }, pos),
            ));
        }
        Ok(None)
    }

    fn parse_new_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_word("new")?;
        let mut callee = self.parse_primary_expression()?;
        while let Some(next) = self.parse_member_suffix(callee, pos)? {
            callee = next;
        }
        let arguments = if self.at_punct("(") {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self
            .arena
            .add(NodeData::NewExpression { callee, arguments }, pos))
    }

    fn parse_arguments(&mut self) -> Result<Vec<NodeIndex>, ParseError> {
        self.expect_punct("(")?;
        let mut arguments = Vec::new();
        while !self.at_punct(")") {
            arguments.push(self.parse_assignment_expression()?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(arguments)
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        let token = self.token().clone();
        match token.kind {
            TokenKind::StringLiteral => {
                self.advance();
                Ok(self
                    .arena
                    .add(NodeData::Literal(LiteralValue::String(token.text)), pos))
            }
            TokenKind::NumericLiteral => {
                self.advance();
                Ok(self
                    .arena
                    .add(NodeData::Literal(LiteralValue::Number(token.text)), pos))
            }
            TokenKind::Identifier => match token.text.as_str() {
                "true" | "false" => {
                    self.advance();
                    let value = LiteralValue::Boolean(token.text == "true");
                    Ok(self.arena.add(NodeData::Literal(value), pos))
                }
                "null" => {
                    self.advance();
                    Ok(self.arena.add(NodeData::Literal(LiteralValue::Null), pos))
                }
                "function" => self.parse_function_expression(),
                // `this` is kept as a plain identifier reference.
                "this" => {
                    self.advance();
                    Ok(self.arena.add(NodeData::Identifier { name: token.text }, pos))
                }
                name if RESERVED_WORDS.contains(&name) => {
                    Err(self.unexpected("Expression expected"))
                }
                _ => {
                    self.advance();
                    Ok(self.arena.add(NodeData::Identifier { name: token.text }, pos))
                }
            },
            TokenKind::Punctuation => match token.text.as_str() {
                "(" => {
                    self.advance();
                    let expression = self.parse_expression()?;
                    self.expect_punct(")")?;
                    Ok(self.arena.add(NodeData::Parenthesized { expression }, pos))
                }
                "{" => self.parse_object_literal(),
                "[" => self.parse_array_literal(),
                _ => Err(self.unexpected("Expression expected")),
            },
            TokenKind::EndOfFile => Err(self.unexpected("Expression expected")),
        }
    }

    fn parse_object_literal(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_punct("{")?;
        let mut properties = Vec::new();
        while !self.at_punct("}") {
            let prop_pos = self.pos();
            let (key, quoted) = match self.token().kind {
                TokenKind::StringLiteral => (self.advance().text, true),
                TokenKind::NumericLiteral => (self.advance().text, false),
                _ => (self.parse_identifier_name()?, false),
            };
            let (value, shorthand) = if self.eat_punct(":") {
                (self.parse_assignment_expression()?, false)
            } else if !quoted {
                let value = self.arena.add(NodeData::Identifier { name: key.clone() }, prop_pos);
                (value, true)
            } else {
                return Err(self.unexpected("':' expected"));
            };
            properties.push(self.arena.add(
                NodeData::Property {
                    key,
                    quoted,
                    value,
                    shorthand,
                },
                prop_pos,
            ));
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("}")?;
        Ok(self.arena.add(NodeData::ObjectLiteral { properties }, pos))
    }

    fn parse_array_literal(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_punct("[")?;
        let mut elements = Vec::new();
        while !self.at_punct("]") {
            elements.push(self.parse_assignment_expression()?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("]")?;
        Ok(self.arena.add(NodeData::ArrayLiteral { elements }, pos))
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub(crate) fn parse_function_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_word("function")?;
        let name = if self.token().kind == TokenKind::Identifier {
            Some(self.parse_binding_name()?)
        } else {
            None
        };
        let params = self.parse_parameter_list()?;
        let body = self.parse_block()?;
        Ok(self
            .arena
            .add(NodeData::FunctionExpression { name, params, body }, pos))
    }

    /// `x => ...` or `( a, b ) => ...` at the cursor.
    fn look_ahead_is_arrow_function(&self) -> bool {
        let token = self.token();
        if token.kind == TokenKind::Identifier && !RESERVED_WORDS.contains(&token.text.as_str()) {
            return self.peek(1).is_punct("=>");
        }
        if !token.is_punct("(") {
            return false;
        }
        let mut offset = 1;
        loop {
            let next = self.peek(offset);
            if next.is_punct(")") {
                return self.peek(offset + 1).is_punct("=>");
            }
            if next.kind != TokenKind::Identifier {
                return false;
            }
            offset += 1;
            let separator = self.peek(offset);
            if separator.is_punct(",") {
                offset += 1;
            } else if !separator.is_punct(")") {
                return false;
            }
        }
    }

    fn parse_arrow_function(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        let params = if self.at_punct("(") {
            self.parse_parameter_list()?
        } else {
            vec![self.parse_binding_name()?]
        };
        self.expect_punct("=>")?;
        let body = if self.at_punct("{") {
            self.parse_block()?
        } else {
            self.parse_assignment_expression()?
        };
        Ok(self.arena.add(NodeData::ArrowFunction { params, body }, pos))
    }
}
