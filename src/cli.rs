//! CLI module containing the main entry point logic.

use crate::error::DispatchError;
use crate::registry::Registry;
use crate::shell::ShellRunner;
use crate::{config, fatal_error, help, inspect, parser};
use clap::{ArgAction, CommandFactory, Parser as ClapParser};
use std::io::IsTerminal;
use std::path::PathBuf;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments for doit.
#[derive(ClapParser)]
#[command(name = "doit")]
#[command(version = PKG_VERSION)]
#[command(about = "Run build targets defined in a do.it script", long_about = None)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Target to run
    #[arg(value_name = "TARGET")]
    target: Option<String>,

    /// Arguments passed to the target as $0, $1, ...
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Script file, or a directory containing do.it
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print the parsed script tree and exit
    #[arg(long)]
    nodes: bool,

    /// Print targets and their variables as JSON and exit
    #[arg(long)]
    inspect: bool,

    /// Print usage and the targets defined in the script
    #[arg(short, long, action = ArgAction::SetTrue)]
    help: bool,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Main CLI logic.
pub fn run_cli() {
    init_logging();
    let cli = Cli::parse();

    if let Some(ref path) = cli.file {
        config::set_custom_script_path(Some(path.clone()));
    }

    let Some((path, source)) = config::load_script() else {
        if cli.help {
            // no script to describe, so describe the tool itself
            let _ = Cli::command().print_help();
            return;
        }
        fatal_error(config::NO_SCRIPT_ERROR);
    };
    log::debug!("using script {}", path.display());

    let filename = path.display().to_string();
    let program = parser::parse_script(&source, Some(&filename))
        .unwrap_or_else(|e| fatal_error(&e.to_string()));

    if cli.nodes {
        print!("{program}");
        return;
    }

    let registry = Registry::load(&program)
        .unwrap_or_else(|e| fatal_error(&format!("Error in {filename}: {e}")));

    if cli.inspect {
        match inspect::to_json(&registry) {
            Ok(json) => println!("{json}"),
            Err(e) => fatal_error(&format!("Error: failed to serialize targets: {e}")),
        }
        return;
    }

    let color = std::io::stdout().is_terminal();

    if cli.help {
        print!("{}", help::render_usage(&registry, color));
        return;
    }

    let Some(target) = cli.target else {
        print!("{}", help::render_usage(&registry, color));
        std::process::exit(1);
    };

    let mut runner = ShellRunner::from_env();
    log::debug!("running {target} with {}", runner.program());

    match registry.dispatch(&target, &cli.args, &mut runner) {
        Ok(code) => std::process::exit(code),
        Err(DispatchError::UnknownTarget(name)) => {
            let color = std::io::stderr().is_terminal();
            eprint!("{}", help::render_invalid_target(&name, color));
            std::process::exit(1);
        }
        Err(e) => fatal_error(&e.to_string()),
    }
}
