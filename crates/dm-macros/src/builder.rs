//! Construction of replacement nodes for flags and debug helpers.
//!
//! The builder never splices anything into the tree. Flag constants are
//! returned to the caller for placement, and helper calls produce a
//! `PendingExpansion` that `expand_macros` later turns into a guarded
//! `(DEBUG && ...)` expression once the debug identifier is known.

use crate::error::MacroError;
use crate::options::{ExternalizeHelpers, FlagMap, FlagValue};
use dm_parser::{NodeArena, NodeData, NodeIndex};

/// A helper call waiting for the debug identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExpansion {
    /// Expression statement that holds the helper call.
    pub statement: NodeIndex,
    /// Extra conditions joined with `&&` between the flag and the call.
    pub predicates: Vec<NodeIndex>,
    /// Rendered call expression.
    pub call: NodeIndex,
}

/// New expression for an expression statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroReplacement {
    pub statement: NodeIndex,
    pub expression: NodeIndex,
}

/// Signature shared by every debug-tools helper builder.
pub type HelperBuilder =
    fn(&Builder, &mut NodeArena, NodeIndex) -> Result<PendingExpansion, MacroError>;

/// Debug-tools exports and the builder method that expands each one.
pub const DEBUG_TOOLS_HELPERS: &[(&str, HelperBuilder)] = &[
    ("assert", Builder::assert as HelperBuilder),
    ("warn", Builder::warn as HelperBuilder),
    ("log", Builder::log as HelperBuilder),
    ("deprecate", Builder::deprecate as HelperBuilder),
    ("runInDebug", Builder::run_in_debug as HelperBuilder),
];

/// Look up the builder for an imported debug-tools name.
pub fn helper_builder(name: &str) -> Option<HelperBuilder> {
    DEBUG_TOOLS_HELPERS
        .iter()
        .find(|(export, _)| *export == name)
        .map(|&(_, builder)| builder)
}

/// Callee and arguments of a helper call statement.
struct HelperCall {
    call: NodeIndex,
    arguments: Vec<NodeIndex>,
}

#[derive(Debug, Clone, Default)]
pub struct Builder {
    helpers: ExternalizeHelpers,
}

impl Builder {
    pub fn new(helpers: ExternalizeHelpers) -> Self {
        Builder { helpers }
    }

    // =========================================================================
    // Flags
    // =========================================================================

    /// One `const <local> = <value>;` per specifier, in specifier order.
    ///
    /// Every specifier must name a flag present in `flags`.
    pub fn flag_constants(
        &self,
        arena: &mut NodeArena,
        specifiers: &[NodeIndex],
        flags: &FlagMap,
        module: &str,
    ) -> Result<Vec<NodeIndex>, MacroError> {
        let mut declarations = Vec::with_capacity(specifiers.len());
        for &specifier in specifiers {
            let local = arena.specifier_local_name(specifier).unwrap_or_default().to_string();
            let Some(imported) = arena.specifier_imported_name(specifier) else {
                return Err(MacroError::UnsupportedSpecifier {
                    local,
                    module: module.to_string(),
                });
            };
            let Some(value) = flags.get(imported) else {
                return Err(MacroError::UnsupportedFlag {
                    flag: imported.to_string(),
                    module: module.to_string(),
                });
            };
            let literal = arena.add_literal(value.to_literal());
            declarations.push(arena.add_const_declaration(local, literal));
        }
        tracing::debug!(module, count = declarations.len(), "built flag constants");
        Ok(declarations)
    }

    /// `const <identifier> = <value>;`
    pub fn debug_flag(&self, arena: &mut NodeArena, identifier: &str, value: &FlagValue) -> NodeIndex {
        let literal = arena.add_literal(value.to_literal());
        arena.add_const_declaration(identifier, literal)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub fn assert(
        &self,
        arena: &mut NodeArena,
        statement: NodeIndex,
    ) -> Result<PendingExpansion, MacroError> {
        self.console_helper(arena, statement, "assert")
    }

    pub fn warn(
        &self,
        arena: &mut NodeArena,
        statement: NodeIndex,
    ) -> Result<PendingExpansion, MacroError> {
        self.console_helper(arena, statement, "warn")
    }

    pub fn log(
        &self,
        arena: &mut NodeArena,
        statement: NodeIndex,
    ) -> Result<PendingExpansion, MacroError> {
        self.console_helper(arena, statement, "log")
    }

    /// `deprecate(message, test, { id, until, url })`
    ///
    /// Guarded by `!(test)`; the console form folds the meta object into a
    /// single warning string.
    pub fn deprecate(
        &self,
        arena: &mut NodeArena,
        statement: NodeIndex,
    ) -> Result<PendingExpansion, MacroError> {
        let helper = helper_call(arena, statement, "deprecate")?;
        let test = match helper.arguments.get(1) {
            Some(&test) => test,
            None => arena.add_boolean_literal(false),
        };
        let grouped = arena.add_parenthesized(test);
        let predicate = arena.add_unary("!", grouped);

        let meta = helper.arguments.get(2).copied();
        let call = if self.is_externalized() {
            if let Some(meta) = meta.filter(|&meta| is_object_literal(arena, meta)) {
                deprecation_meta(arena, meta)?;
            }
            self.external_call(arena, &helper, "deprecate")
        } else {
            let meta = meta.ok_or_else(|| {
                MacroError::InvalidDeprecation(
                    "deprecate requires a meta information object.".to_string(),
                )
            })?;
            let info = deprecation_meta(arena, meta)?;
            let message = helper
                .arguments
                .first()
                .and_then(|&message| arena.string_literal_value(message))
                .ok_or_else(|| {
                    MacroError::InvalidDeprecation(
                        "deprecate's message must be a string literal.".to_string(),
                    )
                })?;
            let mut text = format!(
                "DEPRECATED [{}]: {message}. Will be removed in {}.",
                info.id, info.until
            );
            if let Some(url) = info.url {
                text.push_str(&format!(" See {url} for more information."));
            }
            let warning = arena.add_string_literal(text);
            console_call(arena, "warn", vec![warning])
        };

        Ok(PendingExpansion {
            statement,
            predicates: vec![predicate],
            call,
        })
    }

    /// `runInDebug(fn)` invokes `fn` in debug builds.
    pub fn run_in_debug(
        &self,
        arena: &mut NodeArena,
        statement: NodeIndex,
    ) -> Result<PendingExpansion, MacroError> {
        let helper = helper_call(arena, statement, "runInDebug")?;
        let call = if self.is_externalized() {
            self.external_call(arena, &helper, "runInDebug")
        } else {
            let Some(&callback) = helper.arguments.first() else {
                return Err(MacroError::MalformedHelperCall {
                    name: "runInDebug".to_string(),
                });
            };
            let grouped = arena.add_parenthesized(callback);
            arena.add_call(grouped, Vec::new())
        };
        Ok(PendingExpansion {
            statement,
            predicates: Vec::new(),
            call,
        })
    }

    fn console_helper(
        &self,
        arena: &mut NodeArena,
        statement: NodeIndex,
        name: &str,
    ) -> Result<PendingExpansion, MacroError> {
        let helper = helper_call(arena, statement, name)?;
        let call = if self.is_externalized() {
            self.external_call(arena, &helper, name)
        } else {
            console_call(arena, name, helper.arguments)
        };
        Ok(PendingExpansion {
            statement,
            predicates: Vec::new(),
            call,
        })
    }

    fn is_externalized(&self) -> bool {
        self.helpers.global.is_some() || self.helpers.module
    }

    /// `<Global>.<export>(args)`, or the call as written for module helpers.
    fn external_call(&self, arena: &mut NodeArena, helper: &HelperCall, export: &str) -> NodeIndex {
        match &self.helpers.global {
            Some(global) => {
                let object = arena.add_identifier(global.as_str());
                let callee = arena.add_member(object, export);
                arena.add_call(callee, helper.arguments.clone())
            }
            None => helper.call,
        }
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Guard every pending call with `identifier`, consuming the queue.
    pub fn expand_macros(
        &self,
        arena: &mut NodeArena,
        identifier: &str,
        pending: Vec<PendingExpansion>,
    ) -> Vec<MacroReplacement> {
        tracing::debug!(identifier, count = pending.len(), "expanding debug macros");
        pending
            .into_iter()
            .map(|expansion| {
                let mut guard = arena.add_identifier(identifier);
                for predicate in expansion.predicates {
                    guard = arena.add_binary(guard, "&&", predicate);
                }
                let guarded = arena.add_binary(guard, "&&", expansion.call);
                MacroReplacement {
                    statement: expansion.statement,
                    expression: arena.add_parenthesized(guarded),
                }
            })
            .collect()
    }
}

fn helper_call(
    arena: &NodeArena,
    statement: NodeIndex,
    name: &str,
) -> Result<HelperCall, MacroError> {
    let malformed = || MacroError::MalformedHelperCall {
        name: name.to_string(),
    };
    let call = arena.statement_expression(statement).ok_or_else(malformed)?;
    let (_, arguments) = arena.call_parts(call).ok_or_else(malformed)?;
    Ok(HelperCall {
        call,
        arguments: arguments.to_vec(),
    })
}

fn console_call(arena: &mut NodeArena, api: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
    let console = arena.add_identifier("console");
    let callee = arena.add_member(console, api);
    arena.add_call(callee, arguments)
}

fn is_object_literal(arena: &NodeArena, node: NodeIndex) -> bool {
    matches!(arena.data(node), Some(NodeData::ObjectLiteral { .. }))
}

struct DeprecationMeta {
    id: String,
    until: String,
    url: Option<String>,
}

fn deprecation_meta(arena: &NodeArena, meta: NodeIndex) -> Result<DeprecationMeta, MacroError> {
    let Some(NodeData::ObjectLiteral { properties }) = arena.data(meta) else {
        return Err(MacroError::InvalidDeprecation(
            "deprecate's meta information must be an object literal.".to_string(),
        ));
    };
    let field = |name: &str| {
        properties.iter().find_map(|&prop| match arena.data(prop) {
            Some(NodeData::Property { key, value, .. }) if key == name => {
                arena.string_literal_value(*value).map(str::to_string)
            }
            _ => None,
        })
    };
    let required = |name: &str| {
        field(name).ok_or_else(|| {
            MacroError::InvalidDeprecation(format!(
                "deprecate's meta information requires an \"{name}\" field."
            ))
        })
    };
    Ok(DeprecationMeta {
        id: required("id")?,
        until: required("until")?,
        url: field("url"),
    })
}

#[cfg(test)]
#[path = "tests/builder.rs"]
mod tests;
