//! Placeholder injection for command templates
//!
//! A template is copied through verbatim except for `$` markers:
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `$$` | literal `$` |
//! | `$N`, `$(N)` | positional argument `N` (zero based) |
//! | `$@`, `$(@)` | all arguments, space separated |
//! | `$(i:j)`, `$(i:)` | arguments `i` to `j` (or the last) inclusive |
//! | `$(#)` | argument count |
//! | `$name`, `$(name)` | named variable |
//!
//! A bare placeholder ends at the first character that is not alphanumeric,
//! `_` or `@`; that character is emitted as-is. An empty placeholder, `$()`
//! or a `$` followed by such a character, is argument `0`.

mod context;
mod resolve;

pub use context::Context;
pub use resolve::resolve;

use thiserror::Error;

/// Malformed template errors. Everything else resolves to an empty string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InjectError {
    /// A `$` with nothing after it.
    #[error("Unexpected '$' at end of line")]
    UnterminatedMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Literal,
    Bare,
    Bracketed,
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '@'
}

/// Render `format` against `context`.
///
/// # Errors
///
/// Returns [`InjectError::UnterminatedMarker`] if the template ends with a
/// lone `$`. Callers running build targets treat this as fatal.
pub fn render(format: &str, context: &Context) -> Result<String, InjectError> {
    let mut output = String::with_capacity(format.len());
    let mut token = String::new();
    let mut state = State::Literal;
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Literal => {
                if c != '$' {
                    output.push(c);
                    continue;
                }
                match chars.peek() {
                    None => return Err(InjectError::UnterminatedMarker),
                    Some('$') => {
                        chars.next();
                        output.push('$');
                    }
                    Some('(') => {
                        chars.next();
                        state = State::Bracketed;
                    }
                    // the next char is the first token char, handled under Bare
                    Some(_) => state = State::Bare,
                }
            }
            State::Bracketed => {
                if c == ')' {
                    output.push_str(&resolve(&token, context));
                    token.clear();
                    state = State::Literal;
                } else {
                    token.push(c);
                }
            }
            State::Bare => {
                if is_bare_char(c) {
                    token.push(c);
                } else {
                    output.push_str(&resolve(&token, context));
                    output.push(c);
                    token.clear();
                    state = State::Literal;
                }
            }
        }
    }

    // Pending token at end of input, bare or unclosed bracket alike.
    if !token.is_empty() {
        output.push_str(&resolve(&token, context));
    }

    Ok(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn xyz() -> Context {
        Context::with_args(["x", "y", "z"])
    }

    fn with_my_value() -> Context {
        let mut context = xyz();
        context.set_value("my_value", &Value::Number(42.0));
        context
    }

    #[test]
    fn test_text_without_markers_is_unchanged() {
        for text in ["", "echo hello world", "a (b) c", "100% done)"] {
            assert_eq!(render(text, &xyz()).unwrap(), text);
        }
    }

    #[test]
    fn test_double_dollar_is_literal() {
        assert_eq!(render("$$", &xyz()).unwrap(), "$");
        assert_eq!(render("a$$b", &xyz()).unwrap(), "a$b");
        assert_eq!(render("$$1", &xyz()).unwrap(), "$1");
    }

    #[test]
    fn test_positional_placeholders() {
        assert_eq!(render("$0", &xyz()).unwrap(), "x");
        assert_eq!(render("$5", &xyz()).unwrap(), "");
        assert_eq!(render("$(1)", &xyz()).unwrap(), "y");
        assert_eq!(render("[$0 $1 $2]", &xyz()).unwrap(), "[x y z]");
    }

    #[test]
    fn test_all_and_range_placeholders() {
        assert_eq!(render("$@", &xyz()).unwrap(), "x y z");
        assert_eq!(render("$(@)", &xyz()).unwrap(), "x y z");
        assert_eq!(render("$(1:2)", &xyz()).unwrap(), "y z");
        assert_eq!(render("$(1:)", &xyz()).unwrap(), "y z");
        assert_eq!(render("$(0:0)", &xyz()).unwrap(), "");
        assert_eq!(render("count=$(#)", &xyz()).unwrap(), "count=3");
    }

    #[test]
    fn test_bare_terminator_is_emitted() {
        let context = with_my_value();
        assert_eq!(render("v=$my_value!", &context).unwrap(), "v=42!");
        assert_eq!(render("$0,$1", &context).unwrap(), "x,y");
    }

    #[test]
    fn test_bracketed_variable() {
        let context = with_my_value();
        assert_eq!(render("v=$(my_value)!", &context).unwrap(), "v=42!");
        assert_eq!(render("$(my_value)px", &context).unwrap(), "42px");
    }

    #[test]
    fn test_bare_token_runs_to_end_of_input() {
        let context = with_my_value();
        assert_eq!(render("echo $my_value", &context).unwrap(), "echo 42");
    }

    #[test]
    fn test_bare_token_swallows_alphanumerics() {
        // `$my_valuepx` names a different, absent variable
        assert_eq!(render("$my_valuepx", &with_my_value()).unwrap(), "");
    }

    #[test]
    fn test_dollar_after_bare_token_is_copied_verbatim() {
        assert_eq!(render("$0$1", &xyz()).unwrap(), "x$1");
    }

    #[test]
    fn test_trailing_dollar_is_an_error() {
        assert_eq!(render("abc$", &xyz()), Err(InjectError::UnterminatedMarker));
        assert_eq!(render("$", &xyz()), Err(InjectError::UnterminatedMarker));
    }

    #[test]
    fn test_unclosed_bracket_resolves_pending_token() {
        assert_eq!(render("echo $(1", &xyz()).unwrap(), "echo y");
        assert_eq!(render("echo $(", &xyz()).unwrap(), "echo ");
    }

    #[test]
    fn test_empty_placeholder_is_first_argument() {
        assert_eq!(render("$()", &xyz()).unwrap(), "x");
        assert_eq!(render("a$ b", &xyz()).unwrap(), "ax b");
        assert_eq!(render("$#", &xyz()).unwrap(), "x#");
    }

    #[test]
    fn test_range_bounds_are_ascii_digits() {
        assert_eq!(render("$(\u{0661}:2 0:2)", &xyz()).unwrap(), "x y z");
    }

    #[test]
    fn test_bracketed_token_may_contain_spaces() {
        let mut context = xyz();
        context.set("a b", "spaced");
        assert_eq!(render("$(a b)", &context).unwrap(), "spaced");
    }
}
