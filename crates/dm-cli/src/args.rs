use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the debug-macros binary.
#[derive(Parser, Debug)]
#[command(
    name = "debug-macros",
    version,
    about = "Expand debug-tools macros and inline feature flags in JavaScript modules"
)]
pub struct CliArgs {
    /// JSON options file (envFlags, debugTools, features, externalizeHelpers).
    #[arg(short = 'c', long)]
    pub config: PathBuf,

    /// Write each transformed module into this directory instead of stdout.
    #[arg(short = 'o', long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Print the normalized options and exit.
    #[arg(long = "show-config", alias = "showConfig")]
    pub show_config: bool,

    /// Disable colored error output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Modules to transform.
    #[arg(required_unless_present = "show_config")]
    pub files: Vec<PathBuf>,
}
