//! # doit
//!
//! Run build targets defined in a `do.it` script.
//!
//! ## Usage
//!
//! - List targets: `doit --help`
//! - Run a target: `doit build`
//! - Pass arguments: `doit deploy staging --dry-run` (seen as `$0`, `$1`, ...)
//!
//! See README.md for the script syntax.

/// Entry point for the CLI tool.
fn main() {
    doit::cli::run_cli();
}
