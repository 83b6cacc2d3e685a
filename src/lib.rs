//! # doit
//!
//! A build-script runner. Targets are read from a `do.it` script and each
//! command line is expanded with the CLI arguments and script variables
//! before it is handed to the shell.

pub mod ast;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod eval;
pub mod help;
pub mod inject;
pub mod inspect;
pub mod parser;
pub mod registry;
pub mod shell;
pub mod value;

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
