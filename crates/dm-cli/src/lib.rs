//! `debug-macros` command-line driver.
//!
//! Loads a JSON options file, runs the expander over each input module and
//! writes the rewritten JavaScript to stdout or an output directory.

pub mod args;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
