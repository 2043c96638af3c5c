//! Error types for configuration loading and macro expansion.

use dm_parser::{ParseError, TreeError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid debug-macros options: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("You must specify `debugTools.source`")]
    MissingDebugToolsSource,
    #[error("You must specify `envFlags.flags.DEBUG` at minimum")]
    MissingDebugFlag,
}

/// Failures raised while rewriting a module. All of them abort the file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacroError {
    #[error("Imported {flag} from {module} which is not a supported flag.")]
    UnsupportedFlag { flag: String, module: String },
    #[error("Cannot inline `* as {local}` from {module}; import flags by name.")]
    UnsupportedSpecifier { local: String, module: String },
    #[error("No debug-tools builder for `{name}`.")]
    UnknownHelper { name: String },
    #[error("`{name}` must be called as a statement.")]
    MalformedHelperCall { name: String },
    #[error("{0}")]
    InvalidDeprecation(String),
    #[error("Could not locate the import declaration for `{name}`.")]
    MissingImport { name: String },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Anything that can go wrong turning source text into expanded output.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Macro(#[from] MacroError),
}
