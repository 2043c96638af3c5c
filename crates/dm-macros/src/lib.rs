//! Build-time expansion of debug-tools macros and feature-flag imports.
//!
//! Given a parsed module, the pass:
//! - replaces imports of configured feature-flag modules with one `const`
//!   per imported flag,
//! - rewrites calls to debug-tools helpers (`assert`, `warn`, ...) into
//!   `(DEBUG && ...)` guarded expressions,
//! - inlines the `@ember/env-flags` import, or injects a fresh `DEBUG`
//!   constant when the module does not import one,
//! - removes the debug-tools import when helpers are treated as globals.
//!
//! `Macros` decides which rewrite applies at each site; `Builder` constructs
//! the replacement nodes. `DebugMacrosPass` drives both over a whole module.

pub mod builder;
pub mod error;
pub mod macros;
pub mod options;
pub mod pass;

pub use builder::{
    Builder, DEBUG_TOOLS_HELPERS, HelperBuilder, MacroReplacement, PendingExpansion, helper_builder,
};
pub use error::{ConfigError, MacroError, TransformError};
pub use macros::{DEBUG, Macros};
pub use options::{
    DebugHelpers, DebugToolsOptions, ENV_FLAGS_MODULE, EnvFlags, EnvFlagsOptions,
    ExternalizeHelpers, FeatureFlagSpec, FlagMap, FlagValue, NormalizedOptions, Options,
};
pub use pass::{DebugMacrosPass, transform_source};
