//! Lexical binding lookup.

use crate::binding::{Binding, function_bindings, statement_bindings};
use dm_parser::{NodeArena, NodeData, NodeIndex, VarKind};

/// Bindings declared directly by `scope` (a program, block, or function).
pub fn scope_bindings(arena: &NodeArena, scope: NodeIndex) -> Vec<Binding> {
    let mut out = Vec::new();
    if let Some(statements) = arena.statements(scope) {
        for &stmt in statements {
            statement_bindings(arena, stmt, &mut out);
        }
        if is_var_scope(arena, scope) {
            // Exported declarations were already collected above.
            for &stmt in statements {
                let nested = !arena.is_function_like(stmt)
                    && !matches!(arena.data(stmt), Some(NodeData::ExportNamedDeclaration { .. }));
                if nested {
                    nested_var_bindings(arena, stmt, &mut out);
                }
            }
        }
    } else if arena.is_function_like(scope) {
        function_bindings(arena, scope, &mut out);
    }
    out
}

/// Resolve `name` as seen from `at`, innermost scope first.
pub fn get_binding(arena: &NodeArena, at: NodeIndex, name: &str) -> Option<Binding> {
    let binding = arena.ancestors(at).find_map(|scope| {
        scope_bindings(arena, scope)
            .into_iter()
            .find(|binding| binding.name == name)
    });
    tracing::trace!(name, at = at.0, found = binding.is_some(), "get_binding");
    binding
}

pub fn has_binding(arena: &NodeArena, at: NodeIndex, name: &str) -> bool {
    get_binding(arena, at, name).is_some()
}

/// The program or a function body: where `var` declarations land.
fn is_var_scope(arena: &NodeArena, scope: NodeIndex) -> bool {
    matches!(arena.data(scope), Some(NodeData::Program { .. }))
        || arena.is_function_like(arena.parent(scope))
}

/// `var` declarations nested below `node`, stopping at function boundaries.
fn nested_var_bindings(arena: &NodeArena, node: NodeIndex, out: &mut Vec<Binding>) {
    for child in arena.children(node) {
        if arena.is_function_like(child) {
            continue;
        }
        if let Some(NodeData::VariableDeclaration {
            kind: VarKind::Var, ..
        }) = arena.data(child)
        {
            statement_bindings(arena, child, out);
        }
        nested_var_bindings(arena, child, out);
    }
}
