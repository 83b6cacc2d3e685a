//! Target execution
//!
//! Steps run in order. Each command line is rendered against a fresh
//! [`Context`] built from the CLI arguments and the variables in scope at
//! that point, then handed to a [`CommandRunner`].

use crate::error::DispatchError;
use crate::inject::{render, Context};
use crate::registry::{Registry, Step, Target};

/// Program that executes a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    /// `$ command` lines and one-line targets.
    Shell,
    /// `>>> code` lines.
    Python,
}

/// Runs one rendered command line and reports its exit status.
pub trait CommandRunner {
    /// # Errors
    ///
    /// Returns `Err` if the command could not be started at all.
    fn run(&mut self, interpreter: Interpreter, command: &str) -> Result<i32, DispatchError>;
}

impl Registry {
    /// Run the target called `name` with the arguments that followed it.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownTarget`] without running anything if
    /// no target has that name.
    pub fn dispatch<R: CommandRunner>(
        &self,
        name: &str,
        args: &[String],
        runner: &mut R,
    ) -> Result<i32, DispatchError> {
        let target = self
            .get(name)
            .ok_or_else(|| DispatchError::UnknownTarget(name.to_string()))?;
        run_target(target, args, runner)
    }
}

/// Run every step of `target` and return its exit status.
///
/// The status is that of the last command run, or `0` if none ran, unless an
/// `exit` step sets it.
///
/// # Errors
///
/// Returns `Err` on a malformed command template or a command that could not
/// be started. Commands before it have already run.
pub fn run_target<R: CommandRunner>(
    target: &Target,
    args: &[String],
    runner: &mut R,
) -> Result<i32, DispatchError> {
    let mut scope = target.globals.clone();
    let mut status = 0;

    for step in &target.steps {
        match step {
            Step::Set { name, value } => {
                scope.insert(name.clone(), value.clone());
            }
            Step::Run { template } | Step::Python { template } => {
                let interpreter = if matches!(step, Step::Python { .. }) {
                    Interpreter::Python
                } else {
                    Interpreter::Shell
                };
                let mut context = Context::new(args.to_vec());
                for (name, value) in &scope {
                    context.set_value(name.as_str(), value);
                }
                let command = render(template, &context)?;
                log::debug!("{}: running `{command}` ({interpreter:?})", target.name);
                status = runner.run(interpreter, &command)?;
                log::debug!("{}: exit status {status}", target.name);
            }
            Step::Yield => {
                if status > 0 {
                    log::info!("{}: yielding with status {status}", target.name);
                    return Ok(status);
                }
            }
            Step::Exit(code) => {
                let code = code.filter(|c| *c >= 0).unwrap_or(status);
                log::info!("{}: exit {code}", target.name);
                return Ok(code);
            }
        }
    }

    Ok(status)
}
