//! Binding records produced by scope analysis.

use dm_parser::{NodeArena, NodeData, NodeIndex, VarKind};

/// Which construct introduced a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// Import specifier of an `import` declaration.
    Module,
    Const,
    Let,
    Var,
    Function,
    Param,
}

impl From<VarKind> for BindingKind {
    fn from(kind: VarKind) -> Self {
        match kind {
            VarKind::Const => Self::Const,
            VarKind::Let => Self::Let,
            VarKind::Var => Self::Var,
        }
    }
}

/// A name and the syntax that introduced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub kind: BindingKind,
    /// Import specifier, variable declarator, or function node.
    pub declaration: NodeIndex,
    /// Statement that owns the declaration: the `ImportDeclaration` for
    /// module bindings, the `VariableDeclaration` for variables, the function
    /// itself for functions and parameters.
    pub owner: NodeIndex,
}

impl Binding {
    /// Source path of the owning import, for module bindings.
    pub fn import_source<'a>(&self, arena: &'a NodeArena) -> Option<&'a str> {
        if self.kind == BindingKind::Module {
            arena.import_source(self.owner)
        } else {
            None
        }
    }

    /// Name the binding's specifier imports (the pre-rename name).
    pub fn imported_name<'a>(&self, arena: &'a NodeArena) -> Option<&'a str> {
        if self.kind == BindingKind::Module {
            arena.specifier_imported_name(self.declaration)
        } else {
            None
        }
    }
}

/// Declarations a single statement contributes to its enclosing block.
pub(crate) fn statement_bindings(arena: &NodeArena, stmt: NodeIndex, out: &mut Vec<Binding>) {
    match arena.data(stmt) {
        Some(NodeData::ImportDeclaration { specifiers, .. }) => {
            for &spec in specifiers {
                if let Some(local) = arena.specifier_local_name(spec) {
                    out.push(Binding {
                        name: local.to_string(),
                        kind: BindingKind::Module,
                        declaration: spec,
                        owner: stmt,
                    });
                }
            }
        }
        Some(NodeData::VariableDeclaration { kind, declarations }) => {
            for &decl in declarations {
                if let Some(NodeData::VariableDeclarator { name, .. }) = arena.data(decl) {
                    out.push(Binding {
                        name: name.clone(),
                        kind: (*kind).into(),
                        declaration: decl,
                        owner: stmt,
                    });
                }
            }
        }
        Some(NodeData::FunctionDeclaration { name, .. }) => out.push(Binding {
            name: name.clone(),
            kind: BindingKind::Function,
            declaration: stmt,
            owner: stmt,
        }),
        Some(NodeData::ExportNamedDeclaration { declaration }) => {
            statement_bindings(arena, *declaration, out);
        }
        _ => {}
    }
}

/// Parameters (and the self-name of a named function expression).
pub(crate) fn function_bindings(arena: &NodeArena, func: NodeIndex, out: &mut Vec<Binding>) {
    let (name, params) = match arena.data(func) {
        Some(NodeData::FunctionDeclaration { params, .. }) => (None, params),
        Some(NodeData::FunctionExpression { name, params, .. }) => (name.as_ref(), params),
        Some(NodeData::ArrowFunction { params, .. }) => (None, params),
        _ => return,
    };
    for param in params {
        out.push(Binding {
            name: param.clone(),
            kind: BindingKind::Param,
            declaration: func,
            owner: func,
        });
    }
    if let Some(name) = name {
        out.push(Binding {
            name: name.clone(),
            kind: BindingKind::Function,
            declaration: func,
            owner: func,
        });
    }
}
