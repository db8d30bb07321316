//! Pixmon - Command-line tool for generating pixel monsters

use std::process::ExitCode;

use pixmon::cli;

fn main() -> ExitCode {
    cli::run()
}
