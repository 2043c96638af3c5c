//! Whole-module traversal driving the expander.

use crate::error::{MacroError, TransformError};
use crate::macros::Macros;
use crate::options::NormalizedOptions;
use dm_emitter::Printer;
use dm_parser::{NodeArena, NodeData, NodeIndex, parse_program};

/// One run of the debug-macros rewrite over a single module.
pub struct DebugMacrosPass<'o> {
    options: &'o NormalizedOptions,
    macros: Macros<'o>,
}

impl<'o> DebugMacrosPass<'o> {
    pub fn new(options: &'o NormalizedOptions) -> Self {
        DebugMacrosPass {
            options,
            macros: Macros::new(options),
        }
    }

    /// Visit every statement, inner before outer, then expand at program exit.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(mut self, arena: &mut NodeArena, program: NodeIndex) -> Result<(), MacroError> {
        self.visit(arena, program)?;
        tracing::debug!(
            pending = self.macros.pending_expansions(),
            debug_tools = self.macros.imported_debug_tools(),
            "program exit"
        );
        self.macros.expand(arena, program)
    }

    fn visit(&mut self, arena: &mut NodeArena, node: NodeIndex) -> Result<(), MacroError> {
        match arena.data(node) {
            Some(NodeData::ImportDeclaration { source, specifiers }) => {
                if self.options.is_feature_source(source) {
                    self.macros.inline_feature_flags(arena, node)?;
                } else if *source == self.options.debug_tools_source {
                    let specifiers = specifiers.clone();
                    self.macros.collect_debug_tools_specifiers(arena, &specifiers);
                }
                return Ok(());
            }
            Some(_) => {}
            None => return Ok(()),
        }
        // Post-order: building a helper re-parents its arguments under a new
        // call, so nested statements must be queued while they still resolve
        // up to the program.
        for child in arena.children(node) {
            self.visit(arena, child)?;
        }
        if matches!(arena.data(node), Some(NodeData::ExpressionStatement { .. })) {
            self.macros.build(arena, node)?;
        }
        Ok(())
    }
}

/// Parse `source`, run the pass, and print the rewritten module.
pub fn transform_source(source: &str, options: &NormalizedOptions) -> Result<String, TransformError> {
    let (mut arena, program) = parse_program(source)?;
    DebugMacrosPass::new(options).run(&mut arena, program)?;
    Ok(Printer::print_program(&arena, program))
}
