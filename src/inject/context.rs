//! Per-invocation resolution context

use crate::value::Value;
use std::collections::HashMap;

/// Positional CLI arguments plus the named values visible to one command line.
///
/// Index 0 of the arguments is the first argument after the target name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    args: Vec<String>,
    vars: HashMap<String, String>,
}

impl Context {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            vars: HashMap::new(),
        }
    }

    /// Build a context from anything yielding string-like arguments.
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(args.into_iter().map(Into::into).collect())
    }

    /// Insert an already rendered value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Insert a typed value, formatting numbers canonically.
    pub fn set_value(&mut self, name: impl Into<String>, value: &Value) {
        self.set(name, value.render());
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_insert_overwrites() {
        let mut context = Context::default();
        context.set("name", "first");
        context.set("name", "second");
        assert_eq!(context.var("name"), Some("second"));
    }

    #[test]
    fn test_numbers_are_formatted_on_insert() {
        let mut context = Context::with_args(["a"]);
        context.set_value("my_value", &Value::Number(42.0));
        assert_eq!(context.var("my_value"), Some("42"));
        assert_eq!(context.args(), ["a".to_string()]);
    }
}
