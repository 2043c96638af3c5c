#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::{IsTerminal, Write};

use dm_cli::args::CliArgs;
use dm_cli::driver;
use dm_cli::reporter::Reporter;

const EXIT_FAILURES: i32 = 1;

fn main() -> Result<()> {
    // Only installed when DM_LOG or RUST_LOG is set.
    dm_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let options = driver::load_options(&args.config)?;

    if args.show_config {
        println!("{}", driver::show_config(&options)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    let result = driver::run(&args, &options, &mut stdout)?;
    stdout.flush()?;

    let reporter = Reporter::new(!args.no_color && std::io::stderr().is_terminal());
    for failure in &result.failures {
        eprintln!(
            "{}",
            reporter.format_failure(&failure.path, failure.source.as_deref(), &failure.error)
        );
    }
    if !result.failures.is_empty() {
        std::process::exit(EXIT_FAILURES);
    }
    Ok(())
}
