//! Statement-level printing.

use dm_parser::{NodeArena, NodeData, NodeIndex};

pub struct Printer<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) output: String,
    indent: usize,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Printer {
            arena,
            output: String::new(),
            indent: 0,
        }
    }

    /// Print a whole program, one top-level statement per line.
    pub fn print_program(arena: &NodeArena, program: NodeIndex) -> String {
        let mut printer = Printer::new(arena);
        printer.emit_statement_list(program);
        tracing::trace!(bytes = printer.output.len(), "printed program");
        printer.output
    }

    /// Print a single statement or expression node.
    pub fn emit_to_string(arena: &NodeArena, node: NodeIndex) -> String {
        let mut printer = Printer::new(arena);
        if printer.is_statement(node) {
            printer.emit_statement(node);
        } else {
            printer.emit_expression(node, 0);
        }
        printer.output
    }

    pub fn finish(self) -> String {
        self.output
    }

    #[inline]
    pub(crate) fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    fn is_statement(&self, node: NodeIndex) -> bool {
        matches!(
            self.arena.data(node),
            Some(
                NodeData::Program { .. }
                    | NodeData::ImportDeclaration { .. }
                    | NodeData::ExportNamedDeclaration { .. }
                    | NodeData::ExportDefaultDeclaration { .. }
                    | NodeData::VariableDeclaration { .. }
                    | NodeData::FunctionDeclaration { .. }
                    | NodeData::Block { .. }
                    | NodeData::ExpressionStatement { .. }
                    | NodeData::IfStatement { .. }
                    | NodeData::ReturnStatement { .. }
                    | NodeData::ThrowStatement { .. }
                    | NodeData::EmptyStatement
            )
        )
    }

    /// Each statement of a program or block on its own indented line.
    fn emit_statement_list(&mut self, container: NodeIndex) {
        let Some(statements) = self.arena.statements(container) else {
            return;
        };
        for &stmt in statements {
            self.write_indent();
            self.emit_statement(stmt);
            self.write("\n");
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn emit_statement(&mut self, node: NodeIndex) {
        let arena = self.arena;
        let Some(data) = arena.data(node) else {
            return;
        };
        match data {
            NodeData::Program { .. } => self.emit_statement_list(node),
            NodeData::ImportDeclaration { specifiers, source } => {
                self.emit_import(specifiers, source);
            }
            NodeData::ExportNamedDeclaration { declaration } => {
                self.write("export ");
                self.emit_statement(*declaration);
            }
            NodeData::ExportDefaultDeclaration { expression } => {
                self.write("export default ");
                self.emit_expression(*expression, 2);
                self.write(";");
            }
            NodeData::VariableDeclaration { kind, declarations } => {
                self.write(kind.keyword());
                self.write(" ");
                for (i, &decl) in declarations.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(NodeData::VariableDeclarator { name, init }) = arena.data(decl) {
                        self.write(name);
                        if init.is_some() {
                            self.write(" = ");
                            self.emit_expression(*init, 2);
                        }
                    }
                }
                self.write(";");
            }
            NodeData::FunctionDeclaration { name, params, body } => {
                self.write("function ");
                self.write(name);
                self.emit_params(params);
                self.write(" ");
                self.emit_block(*body);
            }
            NodeData::Block { .. } => self.emit_block(node),
            NodeData::ExpressionStatement { expression } => {
                if self.needs_statement_parens(*expression) {
                    self.write("(");
                    self.emit_expression(*expression, 0);
                    self.write(")");
                } else {
                    self.emit_expression(*expression, 0);
                }
                self.write(";");
            }
            NodeData::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write("if (");
                self.emit_expression(*condition, 0);
                self.write(") ");
                self.emit_statement(*then_branch);
                if else_branch.is_some() {
                    if matches!(arena.data(*then_branch), Some(NodeData::Block { .. })) {
                        self.write(" else ");
                    } else {
                        self.write("\n");
                        self.write_indent();
                        self.write("else ");
                    }
                    self.emit_statement(*else_branch);
                }
            }
            NodeData::ReturnStatement { expression } => {
                self.write("return");
                if expression.is_some() {
                    self.write(" ");
                    self.emit_expression(*expression, 0);
                }
                self.write(";");
            }
            NodeData::ThrowStatement { expression } => {
                self.write("throw ");
                self.emit_expression(*expression, 0);
                self.write(";");
            }
            NodeData::EmptyStatement => self.write(";"),
            _ => self.emit_expression(node, 0),
        }
    }

    fn emit_import(&mut self, specifiers: &[NodeIndex], source: &str) {
        let arena = self.arena;
        self.write("import ");
        if specifiers.is_empty() {
            self.write(&crate::quote_string(source));
            self.write(";");
            return;
        }

        let mut clauses = Vec::new();
        let mut named = Vec::new();
        for &spec in specifiers {
            match arena.data(spec) {
                Some(NodeData::ImportDefaultSpecifier { local }) => clauses.push(local.clone()),
                Some(NodeData::ImportNamespaceSpecifier { local }) => {
                    clauses.push(format!("* as {local}"));
                }
                Some(NodeData::ImportSpecifier { imported, local }) => {
                    if imported == local {
                        named.push(local.clone());
                    } else {
                        named.push(format!("{imported} as {local}"));
                    }
                }
                _ => {}
            }
        }
        if !named.is_empty() {
            clauses.push(format!("{{ {} }}", named.join(", ")));
        }
        self.write(&clauses.join(", "));
        self.write(" from ");
        self.write(&crate::quote_string(source));
        self.write(";");
    }

    pub(crate) fn emit_block(&mut self, block: NodeIndex) {
        let empty = self.arena.statements(block).is_none_or(<[NodeIndex]>::is_empty);
        if empty {
            self.write("{}");
            return;
        }
        self.write("{\n");
        self.indent += 1;
        self.emit_statement_list(block);
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    pub(crate) fn emit_params(&mut self, params: &[String]) {
        self.write("(");
        self.write(&params.join(", "));
        self.write(")");
    }

    /// An expression statement cannot start with `{` or `function`.
    fn needs_statement_parens(&self, expression: NodeIndex) -> bool {
        let mut current = expression;
        loop {
            match self.arena.data(current) {
                Some(NodeData::ObjectLiteral { .. } | NodeData::FunctionExpression { .. }) => {
                    return true;
                }
                Some(
                    NodeData::CallExpression { callee: next, .. }
                    | NodeData::MemberExpression { object: next, .. }
                    | NodeData::ElementAccess { object: next, .. }
                    | NodeData::BinaryExpression { left: next, .. }
                    | NodeData::AssignmentExpression { target: next, .. }
                    | NodeData::ConditionalExpression {
                        condition: next, ..
                    },
                ) => current = *next,
                _ => return false,
            }
        }
    }
}
