//! File-level driver: load options, transform modules, write results.

use anyhow::{Context, Result, anyhow};
use dm_macros::{NormalizedOptions, transform_source};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

/// A module that could not be transformed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    /// Source text, when it could be read.
    pub source: Option<String>,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct RunResult {
    /// Files written to the output directory.
    pub written: Vec<PathBuf>,
    /// Count of modules transformed successfully.
    pub transformed: usize,
    pub failures: Vec<FileFailure>,
}

pub fn load_options(path: &Path) -> Result<NormalizedOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    NormalizedOptions::from_json(&text)
        .with_context(|| format!("invalid options file {}", path.display()))
}

/// Normalized options as pretty-printed JSON.
pub fn show_config(options: &NormalizedOptions) -> Result<String> {
    serde_json::to_string_pretty(options).context("failed to serialize options")
}

/// Transform every input file. Per-file failures are collected, not
/// returned as errors, so one bad module does not stop the rest.
pub fn run(args: &CliArgs, options: &NormalizedOptions, stdout: &mut dyn Write) -> Result<RunResult> {
    if let Some(out_dir) = &args.out_dir {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    }

    let mut result = RunResult::default();
    for path in &args.files {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                result.failures.push(FileFailure {
                    path: path.clone(),
                    source: None,
                    error: anyhow::Error::new(err).context("failed to read source file"),
                });
                continue;
            }
        };

        let output = match transform_source(&source, options) {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "transform failed");
                result.failures.push(FileFailure {
                    path: path.clone(),
                    source: Some(source),
                    error: err.into(),
                });
                continue;
            }
        };

        match &args.out_dir {
            Some(out_dir) => match write_output(out_dir, path, &output) {
                Ok(written) => result.written.push(written),
                Err(error) => {
                    result.failures.push(FileFailure {
                        path: path.clone(),
                        source: Some(source),
                        error,
                    });
                    continue;
                }
            },
            None => stdout
                .write_all(output.as_bytes())
                .context("failed to write to stdout")?,
        }
        result.transformed += 1;
    }

    tracing::debug!(
        transformed = result.transformed,
        failed = result.failures.len(),
        "run finished"
    );
    Ok(result)
}

fn write_output(out_dir: &Path, input: &Path, output: &str) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| anyhow!("{} has no file name", input.display()))?;
    let target = out_dir.join(file_name);
    std::fs::write(&target, output)
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
