//! Process-level entry helpers: argument parsing and fatal error reporting.

use crate::core::cli::CliArgs;
use crate::report::console;

/// Parse the command line. Exits with usage information on bad arguments.
pub fn get_cli_args() -> CliArgs {
    use clap::Parser;
    CliArgs::parse()
}

/// Print a fatal error in red, with its causes, and exit with status 1.
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!();
    console::error(format!("Error: {error}"));
    for cause in error.chain().skip(1) {
        console::error(format!("  caused by: {cause}"));
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}
