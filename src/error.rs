//! Error types for loading scripts and running targets.

use crate::inject::InjectError;
use thiserror::Error;

/// A script parsed but could not be turned into runnable targets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}: unknown variable '{name}'")]
    UnknownVariable { name: String, line: usize },

    #[error("line {line}: operator '{op}' cannot be applied to text")]
    TextOperand { op: char, line: usize },

    #[error("line {line}: exit code must be a number, got \"{value}\"")]
    ExitCode { value: String, line: usize },

    #[error("target '{0}' is already registered")]
    DuplicateTarget(String),
}

/// Running a target failed before it could report an exit status.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid target name: {0}")]
    UnknownTarget(String),

    #[error("{0}")]
    Inject(#[from] InjectError),

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_error_message_is_preserved() {
        let err = DispatchError::from(InjectError::UnterminatedMarker);
        assert_eq!(err.to_string(), "Unexpected '$' at end of line");
    }

    #[test]
    fn test_load_error_mentions_line() {
        let err = LoadError::UnknownVariable {
            name: "missing".to_string(),
            line: 7,
        };
        assert_eq!(err.to_string(), "line 7: unknown variable 'missing'");
    }
}
