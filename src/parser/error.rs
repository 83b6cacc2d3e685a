//! User-friendly parse error types and formatting.
//!
//! Converts raw pest parser errors, and the placement errors the parser
//! detects itself, into structured diagnostics with source context, a caret
//! underline and an optional hint.

use std::fmt;

use super::Rule;

/// A structured, user-friendly parser error.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message (no raw rule names).
    pub message: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed) where the error begins.
    pub col: usize,
    /// End column for span errors (used to size the underline caret).
    pub col_end: Option<usize>,
    /// The full text of the offending source line.
    pub source_line: Option<String>,
    /// Optional source file name shown in the error header.
    pub filename: Option<String>,
    /// Optional suggestion to help the user fix the error.
    pub hint: Option<String>,
}

impl ParseError {
    /// Build a `ParseError` from a pest error, enriching it with source context.
    pub fn from_pest(
        error: &pest::error::Error<Rule>,
        source: &str,
        filename: Option<&str>,
    ) -> Self {
        let (line, col, col_end) = match error.line_col {
            pest::error::LineColLocation::Pos((l, c)) => (l, c, None),
            pest::error::LineColLocation::Span((sl, sc), (el, ec)) => {
                let end = if sl == el { Some(ec) } else { None };
                (sl, sc, end)
            }
        };

        let source_line = source_line(source, line);

        let (message, hint) = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => (
                friendly_message(positives),
                friendly_hint(positives, source_line.as_deref()),
            ),
            pest::error::ErrorVariant::CustomError { message } => (message.clone(), None),
        };

        ParseError {
            message,
            line,
            col,
            col_end,
            source_line,
            filename: filename.map(str::to_string),
            hint,
        }
    }

    /// An error the parser raised itself for a well-formed but misplaced
    /// statement. Points at the first non-blank column of `line`.
    pub fn at_line(message: impl Into<String>, line: usize, source: &str) -> Self {
        let source_line = source_line(source, line);
        let col = source_line
            .as_deref()
            .map_or(1, |l| l.len() - l.trim_start().len() + 1);
        let col_end = source_line
            .as_deref()
            .map(|l| l.trim_end().len() + 1)
            .filter(|end| *end > col);

        ParseError {
            message: message.into(),
            line,
            col,
            col_end,
            source_line,
            filename: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_filename(mut self, filename: Option<&str>) -> Self {
        self.filename = filename.map(str::to_string);
        self
    }
}

fn source_line(source: &str, line: usize) -> Option<String> {
    source
        .lines()
        .nth(line.saturating_sub(1))
        .map(str::to_string)
}

/// Return a short, user-facing label for a grammar rule, or `None` to omit it.
fn rule_label(rule: Rule) -> Option<&'static str> {
    match rule {
        Rule::identifier => Some("identifier"),
        Rule::help_block => Some("help block (`@@@`)"),
        Rule::target_block => Some("target block (`name { ... }`)"),
        Rule::target_line => Some("target (`name: command`)"),
        Rule::script_line => Some("command line (`$ command`)"),
        Rule::assignment => Some("variable assignment"),
        Rule::exit_stmt => Some("`exit`"),
        Rule::yield_stmt => Some("`yield`"),
        Rule::expression => Some("expression"),
        Rule::number => Some("number"),
        Rule::string => Some("quoted string"),
        Rule::add_op | Rule::mul_op => Some("operator"),
        Rule::comment => Some("comment"),
        // EOI and all silent/atomic rules are suppressed.
        _ => None,
    }
}

/// Compose a human-readable message from the expected rule set.
fn friendly_message(positives: &[Rule]) -> String {
    let mut named: Vec<&str> = positives.iter().copied().filter_map(rule_label).collect();
    named.dedup();

    match named.as_slice() {
        [] => "unexpected token".to_string(),
        [single] => format!("expected {single}"),
        [a, b] => format!("expected {a} or {b}"),
        many => match many.split_last() {
            Some((last, rest)) => format!("expected {} or {}", rest.join(", "), last),
            None => "unexpected token".to_string(),
        },
    }
}

/// Return an actionable hint based on the expected rules and the line.
fn friendly_hint(positives: &[Rule], source_line: Option<&str>) -> Option<String> {
    let has = |r: Rule| positives.contains(&r);
    let line = source_line.unwrap_or("").trim();

    if line.starts_with('"') || (has(Rule::string) && line.matches('"').count() % 2 == 1) {
        return Some("Strings must be closed with `\"`; only `\\\\` and `\\\"` are escapes.".to_string());
    }

    if has(Rule::expression) || has(Rule::number) {
        return Some(
            "Assignments look like `name = 42`, `name = \"text\"` or `name = other + 1`."
                .to_string(),
        );
    }

    if line.starts_with("@@@") {
        return Some(
            "Help blocks open with `@@@` alone on a line and close with a second `@@@`."
                .to_string(),
        );
    }

    if has(Rule::identifier) || has(Rule::target_line) {
        return Some(
            "Targets look like `name: command` or `name { $ command }`; \
             names start with a letter and contain letters, digits or `_`."
                .to_string(),
        );
    }

    None
}

/// Format the caret underline for an error at `col` with optional `col_end`.
fn underline(col: usize, col_end: Option<usize>) -> String {
    let start = col.saturating_sub(1);
    let len = col_end.map_or(1, |end| end.saturating_sub(col).max(1));
    format!("{}{}", " ".repeat(start), "^".repeat(len))
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        let location = match &self.filename {
            Some(name) => format!("{name}:{}:{}", self.line, self.col),
            None => format!("{}:{}", self.line, self.col),
        };
        writeln!(f, "  --> {location}")?;

        if let Some(ref src) = self.source_line {
            let num = self.line.to_string();
            let pad = " ".repeat(num.len());

            writeln!(f, "   {pad} |")?;
            writeln!(f, "   {num} | {src}")?;
            writeln!(f, "   {pad} | {}", underline(self.col, self.col_end))?;
        }

        if let Some(ref hint) = self.hint {
            writeln!(f)?;
            write!(f, "   = hint: {hint}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
