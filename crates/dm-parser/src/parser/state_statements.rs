//! Parser state - statement and declaration parsing methods

use super::base::NodeIndex;
use super::node::{NodeData, VarKind};
use super::state::{ParseError, ParserState};
use crate::scanner::TokenKind;

impl ParserState {
    pub fn parse_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let token = self.token();
        if token.kind == TokenKind::Punctuation {
            return match token.text.as_str() {
                "{" => self.parse_block(),
                ";" => {
                    let pos = self.pos();
                    self.advance();
                    Ok(self.arena.add(NodeData::EmptyStatement, pos))
                }
                _ => self.parse_expression_statement(),
            };
        }
        if token.kind != TokenKind::Identifier {
            return self.parse_expression_statement();
        }

        match token.text.as_str() {
            "import" if !self.peek(1).is_punct("(") && !self.peek(1).is_punct(".") => {
                self.parse_import_declaration()
            }
            "export" => self.parse_export_declaration(),
            "const" | "var" => self.parse_variable_statement(),
            // `let` is only a declaration keyword when a binding follows.
            "let" if self.peek(1).kind == TokenKind::Identifier => self.parse_variable_statement(),
            "function" => self.parse_function_declaration(),
            "if" => self.parse_if_statement(),
            "return" => self.parse_return_statement(),
            "throw" => self.parse_throw_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    pub(crate) fn parse_block(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_punct("{")?;
        let mut statements = Vec::new();
        while !self.at_punct("}") {
            if self.is_at_end() {
                return Err(self.unexpected("'}' expected"));
            }
            statements.push(self.parse_statement()?);
        }
        self.advance();
        Ok(self.arena.add(NodeData::Block { statements }, pos))
    }

    fn parse_expression_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(self.arena.add(NodeData::ExpressionStatement { expression }, pos))
    }

    // =========================================================================
    // Modules
    // =========================================================================

    /// `import "m";`, `import d from "m";`, `import * as ns from "m";`,
    /// `import d, { a, b as c } from "m";`
    pub(crate) fn parse_import_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_word("import")?;

        if self.token().kind == TokenKind::StringLiteral {
            let source = self.parse_string_literal_text()?;
            self.consume_semicolon()?;
            return Ok(self.arena.add(
                NodeData::ImportDeclaration {
                    specifiers: Vec::new(),
                    source,
                },
                pos,
            ));
        }

        let mut specifiers = Vec::new();
        if self.token().kind == TokenKind::Identifier {
            let spec_pos = self.pos();
            let local = self.parse_binding_name()?;
            specifiers.push(
                self.arena
                    .add(NodeData::ImportDefaultSpecifier { local }, spec_pos),
            );
            if !self.eat_punct(",") {
                return self.finish_import(pos, specifiers);
            }
        }

        if self.at_punct("*") {
            let spec_pos = self.pos();
            self.advance();
            self.expect_word("as")?;
            let local = self.parse_binding_name()?;
            specifiers.push(
                self.arena
                    .add(NodeData::ImportNamespaceSpecifier { local }, spec_pos),
            );
        } else {
            self.expect_punct("{")?;
            while !self.at_punct("}") {
                let spec_pos = self.pos();
                let imported = self.parse_identifier_name()?;
                let local = if self.eat_word("as") {
                    self.parse_binding_name()?
                } else {
                    imported.clone()
                };
                specifiers.push(
                    self.arena
                        .add(NodeData::ImportSpecifier { imported, local }, spec_pos),
                );
                if !self.eat_punct(",") {
                    break;
                }
            }
            self.expect_punct("}")?;
        }

        self.finish_import(pos, specifiers)
    }

    fn finish_import(
        &mut self,
        pos: u32,
        specifiers: Vec<NodeIndex>,
    ) -> Result<NodeIndex, ParseError> {
        self.expect_word("from")?;
        let source = self.parse_string_literal_text()?;
        self.consume_semicolon()?;
        Ok(self
            .arena
            .add(NodeData::ImportDeclaration { specifiers, source }, pos))
    }

    /// `export <declaration>` or `export default <expression>;`
    fn parse_export_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_word("export")?;

        if self.eat_word("default") {
            let expression = if self.at_word("function") {
                self.parse_function_expression()?
            } else {
                self.parse_assignment_expression()?
            };
            self.consume_semicolon()?;
            return Ok(self
                .arena
                .add(NodeData::ExportDefaultDeclaration { expression }, pos));
        }

        let declaration = match self.token().text.as_str() {
            "const" | "let" | "var" => self.parse_variable_statement()?,
            "function" => self.parse_function_declaration()?,
            _ => return Err(self.unexpected("Declaration expected after 'export'")),
        };
        Ok(self
            .arena
            .add(NodeData::ExportNamedDeclaration { declaration }, pos))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub(crate) fn parse_variable_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        let kind = match self.advance().text.as_str() {
            "const" => VarKind::Const,
            "let" => VarKind::Let,
            _ => VarKind::Var,
        };

        let mut declarations = Vec::new();
        loop {
            let decl_pos = self.pos();
            let name = self.parse_binding_name()?;
            let init = if self.eat_punct("=") {
                self.parse_assignment_expression()?
            } else if kind == VarKind::Const {
                return Err(self.unexpected("'const' declarations must be initialized"));
            } else {
                NodeIndex::NONE
            };
            declarations.push(
                self.arena
                    .add(NodeData::VariableDeclarator { name, init }, decl_pos),
            );
            if !self.eat_punct(",") {
                break;
            }
        }
        self.consume_semicolon()?;
        Ok(self
            .arena
            .add(NodeData::VariableDeclaration { kind, declarations }, pos))
    }

    pub(crate) fn parse_function_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_word("function")?;
        let name = self.parse_binding_name()?;
        let params = self.parse_parameter_list()?;
        let body = self.parse_block()?;
        Ok(self
            .arena
            .add(NodeData::FunctionDeclaration { name, params, body }, pos))
    }

    /// `( a, b, c )`
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect_punct("(")?;
        let mut params = Vec::new();
        while !self.at_punct(")") {
            params.push(self.parse_binding_name()?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(params)
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_word("if")?;
        self.expect_punct("(")?;
        let condition = self.parse_expression()?;
        self.expect_punct(")")?;
        let then_branch = self.parse_statement()?;
        let else_branch = if self.eat_word("else") {
            self.parse_statement()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.arena.add(
            NodeData::IfStatement {
                condition,
                then_branch,
                else_branch,
            },
            pos,
        ))
    }

    fn parse_return_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_word("return")?;
        let token = self.token();
        let expression = if token.is_punct(";")
            || token.is_punct("}")
            || token.kind == TokenKind::EndOfFile
            || token.preceded_by_line_break
        {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.consume_semicolon()?;
        Ok(self.arena.add(NodeData::ReturnStatement { expression }, pos))
    }

    fn parse_throw_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.pos();
        self.expect_word("throw")?;
        if self.token().preceded_by_line_break {
            return Err(self.unexpected("Line break not permitted here"));
        }
        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(self.arena.add(NodeData::ThrowStatement { expression }, pos))
    }
}
