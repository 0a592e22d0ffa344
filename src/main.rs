//! Spritecut - command-line tool for slicing character sheets into sprite sheets

use std::process::ExitCode;

use spritecut::cli;

fn main() -> ExitCode {
    env_logger::init();
    cli::run()
}
