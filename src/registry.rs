//! Target registry
//!
//! Targets are registered in definition order. Each one captures the
//! top-level variables assigned before it, and its own assignments become
//! [`Step::Set`] entries that take effect for the commands after them.

use crate::ast::{ArgDef, BodyStatement, Item, Program, TargetDef};
use crate::error::LoadError;
use crate::eval::evaluate;
use crate::value::Value;
use std::collections::BTreeMap;

/// Named values visible to a command line.
pub type Scope = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Assign a value for the remaining steps of the target.
    Set { name: String, value: Value },
    /// Render a command template and hand it to the shell.
    Run { template: String },
    /// Render a code line and hand it to Python.
    Python { template: String },
    /// Stop with this code, or with the last command's status when `None`
    /// or negative.
    Exit(Option<i32>),
    /// Stop if the last command failed.
    Yield,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub help: Option<String>,
    /// Declared arguments. They document the target; values still arrive
    /// positionally.
    pub args: Vec<ArgDef>,
    pub globals: Scope,
    pub steps: Vec<Step>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
            args: Vec::new(),
            globals: Scope::new(),
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, required: bool, help: Option<&str>) -> Self {
        self.args.push(ArgDef {
            name: name.into(),
            required,
            help: help.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Shorthand for a [`Step::Run`] step.
    #[must_use]
    pub fn run(self, template: impl Into<String>) -> Self {
        self.with_step(Step::Run {
            template: template.into(),
        })
    }

    /// Shorthand for a [`Step::Python`] step.
    #[must_use]
    pub fn python(self, template: impl Into<String>) -> Self {
        self.with_step(Step::Python {
            template: template.into(),
        })
    }

    /// The shell command templates, in order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|step| match step {
            Step::Run { template } => Some(template.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    help: Option<String>,
    targets: Vec<Target>,
}

impl Registry {
    pub fn new(help: Option<String>) -> Self {
        Self {
            help,
            targets: Vec::new(),
        }
    }

    /// Build a registry from a parsed script, evaluating every assignment.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an assignment or exit code fails to evaluate, or a
    /// target name repeats.
    pub fn load(program: &Program) -> Result<Self, LoadError> {
        let mut registry = Registry::new(program.help.clone());
        let mut globals = Scope::new();

        for item in &program.items {
            match item {
                Item::Comment(_) => {}
                Item::Assignment(assignment) => {
                    let value = evaluate(&assignment.value, &globals, assignment.line)?;
                    globals.insert(assignment.name.clone(), value);
                }
                Item::Target(def) => registry.register(compile_target(def, &globals)?)?,
            }
        }

        Ok(registry)
    }

    /// Add a target after the ones already registered.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateTarget`] if the name is taken.
    pub fn register(&mut self, target: Target) -> Result<(), LoadError> {
        if self.get(&target.name).is_some() {
            return Err(LoadError::DuplicateTarget(target.name));
        }
        self.targets.push(target);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Targets in definition order.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Targets sorted by name, as listed in help.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Target> {
        let mut sorted: Vec<&Target> = self.targets.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

fn compile_target(def: &TargetDef, globals: &Scope) -> Result<Target, LoadError> {
    let mut target = Target {
        name: def.name.clone(),
        help: def.help.clone(),
        args: def.args().cloned().collect(),
        globals: globals.clone(),
        steps: Vec::new(),
    };
    // Values assigned so far inside the target, for evaluating later ones.
    let mut scope = globals.clone();

    for statement in &def.body {
        let step = match statement {
            BodyStatement::Comment(_) | BodyStatement::Arg(_) => continue,
            BodyStatement::Assignment(assignment) => {
                let value = evaluate(&assignment.value, &scope, assignment.line)?;
                scope.insert(assignment.name.clone(), value.clone());
                Step::Set {
                    name: assignment.name.clone(),
                    value,
                }
            }
            BodyStatement::Command { template, .. } => Step::Run {
                template: template.clone(),
            },
            BodyStatement::Python { template, .. } => Step::Python {
                template: template.clone(),
            },
            BodyStatement::Exit { code: None, .. } => Step::Exit(None),
            BodyStatement::Exit {
                code: Some(expr),
                line,
            } => match evaluate(expr, &scope, *line)? {
                #[allow(clippy::cast_possible_truncation)]
                Value::Number(n) => Step::Exit(Some(n as i32)),
                Value::Text(value) => return Err(LoadError::ExitCode { value, line: *line }),
            },
            BodyStatement::Yield => Step::Yield,
        };
        target.steps.push(step);
    }

    Ok(target)
}
