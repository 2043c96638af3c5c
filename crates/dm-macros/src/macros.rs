//! Per-module expander: decides which rewrite applies at each site.

use crate::builder::{Builder, MacroReplacement, PendingExpansion, helper_builder};
use crate::error::MacroError;
use crate::options::{ENV_FLAGS_MODULE, NormalizedOptions};
use dm_binder::{Binding, BindingKind, UidGenerator, get_binding};
use dm_parser::{NodeArena, NodeIndex};

/// Name of the debug flag binding.
pub const DEBUG: &str = "DEBUG";

/// Expander state for one compilation unit.
///
/// Helper calls are queued by `build` during traversal and drained by a
/// single `expand` at the end of the module.
pub struct Macros<'o> {
    options: &'o NormalizedOptions,
    builder: Builder,
    expansions: Vec<PendingExpansion>,
    /// Local names bound by debug-tools imports, in import order.
    local_debug_bindings: Vec<String>,
    imported_debug_tools: bool,
    is_globals: bool,
    uids: UidGenerator,
}

impl<'o> Macros<'o> {
    pub fn new(options: &'o NormalizedOptions) -> Self {
        Macros {
            options,
            builder: Builder::new(options.externalize_helpers.clone()),
            expansions: Vec::new(),
            local_debug_bindings: Vec::new(),
            imported_debug_tools: false,
            is_globals: true,
            uids: UidGenerator::new(),
        }
    }

    /// Resolve `DEBUG` in `block`, expand queued helper calls against it and
    /// drop the debug-tools import when helpers are globals.
    #[tracing::instrument(level = "debug", skip_all, fields(block = block.0))]
    pub fn expand(&mut self, arena: &mut NodeArena, block: NodeIndex) -> Result<(), MacroError> {
        let pending = std::mem::take(&mut self.expansions);
        let env_binding =
            get_binding(arena, block, DEBUG).filter(|binding| has_debug_module(arena, binding));

        if let Some(binding) = env_binding {
            tracing::debug!(local = %binding.name, "inlining {ENV_FLAGS_MODULE} import");
            let replacements = self.builder.expand_macros(arena, &binding.name, pending);
            apply_replacements(arena, replacements)?;
            self.inline_env_flags(arena, binding.owner)?;
        } else {
            let root = arena.ancestors(block).last().unwrap_or(block);
            let identifier = self.uids.generate(arena, root, DEBUG);
            if !pending.is_empty() {
                self.inject_debug(arena, block, &identifier)?;
            }
            let replacements = self.builder.expand_macros(arena, &identifier, pending);
            apply_replacements(arena, replacements)?;
        }

        self.clean_imports(arena, block)
    }

    /// Replace an import of a configured feature module with flag constants.
    ///
    /// Returns whether a feature spec matched.
    pub fn inline_feature_flags(
        &mut self,
        arena: &mut NodeArena,
        import: NodeIndex,
    ) -> Result<bool, MacroError> {
        let Some(source) = arena.import_source(import) else {
            return Ok(false);
        };
        let Some(spec) = self.options.feature_spec(source) else {
            return Ok(false);
        };
        let source = source.to_string();
        let specifiers = arena.import_specifiers(import).to_vec();
        let declarations = self
            .builder
            .flag_constants(arena, &specifiers, &spec.flags, &source)?;
        tracing::debug!(source = %source, feature = ?spec.name, "inlining feature flags");
        arena.replace_with_multiple(import, declarations)?;
        Ok(true)
    }

    pub fn collect_debug_tools_specifiers(&mut self, arena: &NodeArena, specifiers: &[NodeIndex]) {
        self.imported_debug_tools = true;
        self.local_debug_bindings.extend(
            specifiers
                .iter()
                .filter_map(|&spec| arena.specifier_local_name(spec))
                .map(str::to_string),
        );
    }

    /// Queue the helper call in `statement` if its callee is a debug-tools
    /// import. Returns whether anything was queued.
    pub fn build(&mut self, arena: &mut NodeArena, statement: NodeIndex) -> Result<bool, MacroError> {
        let Some(expression) = arena.statement_expression(statement) else {
            return Ok(false);
        };
        let Some((callee, _)) = arena.call_parts(expression) else {
            return Ok(false);
        };
        let Some(name) = arena.identifier_name(callee) else {
            return Ok(false);
        };
        if !self.local_debug_bindings.iter().any(|local| local == name) {
            return Ok(false);
        }

        let name = name.to_string();
        let Some(binding) = get_binding(arena, statement, &name)
            .filter(|binding| binding.kind == BindingKind::Module)
        else {
            tracing::trace!(name = %name, "helper name is shadowed; leaving call alone");
            return Ok(false);
        };
        let imported = binding
            .imported_name(arena)
            .ok_or_else(|| MacroError::UnknownHelper { name: name.clone() })?
            .to_string();
        let helper = helper_builder(&imported).ok_or(MacroError::UnknownHelper { name: imported })?;

        let expansion = helper(&self.builder, arena, statement)?;
        tracing::trace!(name = %name, statement = statement.0, "queued helper expansion");
        self.expansions.push(expansion);
        Ok(true)
    }

    pub fn local_debug_bindings(&self) -> &[String] {
        &self.local_debug_bindings
    }

    pub fn imported_debug_tools(&self) -> bool {
        self.imported_debug_tools
    }

    pub fn pending_expansions(&self) -> usize {
        self.expansions.len()
    }

    pub fn is_globals(&self) -> bool {
        self.is_globals
    }

    fn inject_debug(
        &self,
        arena: &mut NodeArena,
        block: NodeIndex,
        identifier: &str,
    ) -> Result<(), MacroError> {
        let declaration = self
            .builder
            .debug_flag(arena, identifier, self.options.debug_flag());
        tracing::debug!(identifier, "injecting debug flag");
        arena.unshift_statement(block, declaration)?;
        Ok(())
    }

    fn inline_env_flags(&self, arena: &mut NodeArena, import: NodeIndex) -> Result<(), MacroError> {
        let source = arena.import_source(import).unwrap_or(ENV_FLAGS_MODULE).to_string();
        let specifiers = arena.import_specifiers(import).to_vec();
        let declarations = self.builder.flag_constants(
            arena,
            &specifiers,
            &self.options.env_flags.flags,
            &source,
        )?;
        arena.replace_with_multiple(import, declarations)?;
        Ok(())
    }

    fn clean_imports(&mut self, arena: &mut NodeArena, block: NodeIndex) -> Result<(), MacroError> {
        let helpers = &self.options.externalize_helpers;
        // Module helpers are real imports unless configured otherwise.
        self.is_globals = match helpers.debug {
            Some(debug) => debug.global,
            None => !helpers.module,
        };
        let Some(first) = self.local_debug_bindings.first() else {
            return Ok(());
        };
        if !self.is_globals {
            return Ok(());
        }

        // Removing the declaration drops every specifier along with it.
        let import = get_binding(arena, block, first)
            .filter(|binding| binding.kind == BindingKind::Module)
            .map(|binding| binding.owner)
            .ok_or_else(|| MacroError::MissingImport {
                name: first.clone(),
            })?;
        tracing::debug!(name = %first, "removing debug-tools import");
        arena.remove_statement(import)?;
        Ok(())
    }
}

/// A module binding whose import comes from the env-flags module.
fn has_debug_module(arena: &NodeArena, binding: &Binding) -> bool {
    binding.kind == BindingKind::Module && binding.import_source(arena) == Some(ENV_FLAGS_MODULE)
}

fn apply_replacements(
    arena: &mut NodeArena,
    replacements: Vec<MacroReplacement>,
) -> Result<(), MacroError> {
    for replacement in replacements {
        arena.replace_statement_expression(replacement.statement, replacement.expression)?;
    }
    Ok(())
}
