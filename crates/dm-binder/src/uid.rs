//! Scope-unique identifier generation.

use dm_parser::{NodeArena, NodeData, NodeIndex};
use rustc_hash::FxHashSet;

/// Hands out identifiers that collide with nothing in the program: not a
/// declaration, not a reference, and not an earlier generated name.
///
/// Names follow the `_name`, `_name2`, `_name3`, ... sequence.
#[derive(Debug, Default)]
pub struct UidGenerator {
    generated: FxHashSet<String>,
}

impl UidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self, arena: &NodeArena, root: NodeIndex, name: &str) -> String {
        let taken = collect_names(arena, root);
        let base = name
            .trim_start_matches('_')
            .trim_end_matches(|c: char| c.is_ascii_digit());
        let base = if base.is_empty() { "temp" } else { base };

        let mut counter = 1u32;
        loop {
            let candidate = if counter > 1 {
                format!("_{base}{counter}")
            } else {
                format!("_{base}")
            };
            if !taken.contains(&candidate) && !self.generated.contains(&candidate) {
                tracing::debug!(uid = %candidate, "generated uid");
                self.generated.insert(candidate.clone());
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Every declared or referenced name reachable from `root`.
fn collect_names(arena: &NodeArena, root: NodeIndex) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let Some(data) = arena.data(idx) else {
            continue;
        };
        match data {
            NodeData::Identifier { name } | NodeData::VariableDeclarator { name, .. } => {
                names.insert(name.clone());
            }
            NodeData::ImportSpecifier { local, .. }
            | NodeData::ImportDefaultSpecifier { local }
            | NodeData::ImportNamespaceSpecifier { local } => {
                names.insert(local.clone());
            }
            NodeData::FunctionDeclaration { name, params, .. } => {
                names.insert(name.clone());
                names.extend(params.iter().cloned());
            }
            NodeData::FunctionExpression { name, params, .. } => {
                names.extend(name.iter().cloned());
                names.extend(params.iter().cloned());
            }
            NodeData::ArrowFunction { params, .. } => {
                names.extend(params.iter().cloned());
            }
            _ => {}
        }
        stack.extend(data.children());
    }
    names
}
