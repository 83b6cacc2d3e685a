//! Target inspection as JSON

use crate::ast::ArgDef;
use crate::registry::{Registry, Scope, Step, Target};
use serde::Serialize;

/// One target as printed by `--inspect`
#[derive(Debug, Serialize)]
pub struct TargetInfo {
    pub name: String,
    pub help: Option<String>,
    pub args: Vec<ArgInfo>,
    pub commands: Vec<String>,
    /// `>>>` lines, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub python: Vec<String>,
    /// Top-level variables assigned before the target was defined.
    pub variables: Scope,
}

#[derive(Debug, Serialize)]
pub struct ArgInfo {
    pub name: String,
    pub required: bool,
    pub help: Option<String>,
}

impl From<&ArgDef> for ArgInfo {
    fn from(arg: &ArgDef) -> Self {
        Self {
            name: arg.name.clone(),
            required: arg.required,
            help: arg.help.as_deref().map(|h| h.trim().to_string()),
        }
    }
}

/// Root structure for inspect output
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub help: Option<String>,
    pub targets: Vec<TargetInfo>,
}

impl From<&Target> for TargetInfo {
    fn from(target: &Target) -> Self {
        Self {
            name: target.name.clone(),
            help: target.help.as_deref().map(|h| h.trim().to_string()),
            args: target.args.iter().map(ArgInfo::from).collect(),
            commands: target.commands().map(str::to_string).collect(),
            python: target
                .steps
                .iter()
                .filter_map(|step| match step {
                    Step::Python { template } => Some(template.clone()),
                    _ => None,
                })
                .collect(),
            variables: target.globals.clone(),
        }
    }
}

/// Describe every target, in definition order.
#[must_use]
pub fn inspect(registry: &Registry) -> InspectOutput {
    InspectOutput {
        help: registry.help().map(|h| h.trim().to_string()),
        targets: registry.targets().iter().map(TargetInfo::from).collect(),
    }
}

/// Pretty JSON for `--inspect`.
///
/// # Errors
///
/// Returns `Err` if serialization fails.
pub fn to_json(registry: &Registry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&inspect(registry))
}
