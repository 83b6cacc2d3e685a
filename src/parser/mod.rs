//! Parser implementation using pest
//!
//! This module turns a do.it script into a [`Program`]. The grammar accepts
//! any statement anywhere; placement rules are checked here so that a
//! misplaced statement gets a message naming the problem.

mod error;
mod expression;
mod help_block;

pub use error::ParseError;

use crate::ast::{ArgDef, Assignment, BodyStatement, Item, Program, TargetDef};
use pest::Parser;
use pest_derive::Parser;
use std::collections::HashSet;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct ScriptParser;

pub(crate) type Pair<'i> = pest::iterators::Pair<'i, Rule>;

/// Parse a do.it script into an Abstract Syntax Tree (AST)
///
/// # Errors
///
/// Returns `Err` if the input violates the grammar, or if it is
/// well-formed but:
/// - has a command line, an argument declaration, `exit` or `yield` outside
///   of a target
/// - declares the same argument twice in one target
/// - defines a target inside another target
/// - defines the same target twice
/// - has more than one help block in the same scope
pub fn parse_script(input: &str, filename: Option<&str>) -> Result<Program, ParseError> {
    let mut pairs = ScriptParser::parse(Rule::program, input)
        .map_err(|e| ParseError::from_pest(&e, input, filename))?;

    let body = pairs
        .next()
        .and_then(|program| program.into_inner().find(|p| p.as_rule() == Rule::body));

    let Some(body) = body else {
        return Ok(Program {
            help: None,
            items: Vec::new(),
        });
    };

    Builder { source: input }
        .root(body)
        .map_err(|e| e.with_filename(filename))
}

pub(crate) fn line_of(pair: &Pair<'_>) -> usize {
    pair.as_span().start_pos().line_col().0
}

struct Builder<'s> {
    source: &'s str,
}

impl Builder<'_> {
    fn error(&self, message: &str, pair: &Pair<'_>) -> ParseError {
        ParseError::at_line(message, line_of(pair), self.source)
    }

    fn root(&self, body: Pair<'_>) -> Result<Program, ParseError> {
        let mut help = None;
        let mut items = Vec::new();
        let mut names = HashSet::new();

        for pair in body.into_inner() {
            match pair.as_rule() {
                Rule::comment => items.push(Item::Comment(comment_text(&pair))),
                Rule::help_block => self.set_help(&mut help, &pair)?,
                Rule::assignment => items.push(Item::Assignment(self.assignment(pair)?)),
                Rule::target_line | Rule::target_block => {
                    let target = self.target(pair.clone())?;
                    if !names.insert(target.name.clone()) {
                        return Err(self.error(
                            &format!("Target '{}' is already defined", target.name),
                            &pair,
                        ));
                    }
                    items.push(Item::Target(target));
                }
                Rule::script_line | Rule::python_line => {
                    return Err(self
                        .error("Commands must belong to a target", &pair)
                        .with_hint("Use `name: command`, or put `$ command` inside `name { ... }`."));
                }
                Rule::arg_required | Rule::arg_optional => {
                    return Err(self.error("Arguments can only be declared inside a target", &pair));
                }
                Rule::exit_stmt | Rule::yield_stmt => {
                    return Err(self.error("`exit` and `yield` are only allowed inside a target", &pair));
                }
                _ => {}
            }
        }

        Ok(Program { help, items })
    }

    fn target(&self, pair: Pair<'_>) -> Result<TargetDef, ParseError> {
        let line = line_of(&pair);
        let rule = pair.as_rule();
        let mut inner = pair.into_inner();
        let name = inner.next().map(|p| p.as_str().to_string()).unwrap_or_default();

        let mut target = TargetDef {
            name,
            help: None,
            body: Vec::new(),
            line,
        };

        let Some(rest) = inner.next() else {
            return Ok(target);
        };

        if rule == Rule::target_line {
            target.body.push(BodyStatement::Command {
                template: rest.as_str().trim().to_string(),
                line,
            });
            return Ok(target);
        }

        for pair in rest.into_inner() {
            let statement = match pair.as_rule() {
                Rule::comment => BodyStatement::Comment(comment_text(&pair)),
                Rule::help_block => {
                    self.set_help(&mut target.help, &pair)?;
                    continue;
                }
                Rule::assignment => BodyStatement::Assignment(self.assignment(pair)?),
                Rule::script_line => BodyStatement::Command {
                    line: line_of(&pair),
                    template: command_text(pair),
                },
                Rule::python_line => BodyStatement::Python {
                    line: line_of(&pair),
                    template: command_text(pair),
                },
                Rule::arg_required | Rule::arg_optional => {
                    let arg = arg_def(pair.clone());
                    if target.args().any(|a| a.name == arg.name) {
                        return Err(self.error(
                            &format!("Argument '{}' is already declared for '{}'", arg.name, target.name),
                            &pair,
                        ));
                    }
                    BodyStatement::Arg(arg)
                }
                Rule::exit_stmt => {
                    let line = line_of(&pair);
                    let code = pair
                        .into_inner()
                        .find(|p| p.as_rule() == Rule::expression)
                        .map(|p| expression::build(p, self.source))
                        .transpose()?;
                    BodyStatement::Exit { code, line }
                }
                Rule::yield_stmt => BodyStatement::Yield,
                Rule::target_line | Rule::target_block => {
                    return Err(self
                        .error(&format!("Target '{}' cannot contain another target", target.name), &pair)
                        .with_hint("Close the enclosing target with `}` before defining the next one."));
                }
                _ => continue,
            };
            target.body.push(statement);
        }

        Ok(target)
    }

    fn assignment(&self, pair: Pair<'_>) -> Result<Assignment, ParseError> {
        let line = line_of(&pair);
        let mut inner = pair.into_inner();
        let name = inner.next().map(|p| p.as_str().to_string()).unwrap_or_default();
        let Some(value) = inner.next() else {
            return Err(ParseError::at_line("Missing value in assignment", line, self.source));
        };
        Ok(Assignment {
            name,
            value: expression::build(value, self.source)?,
            line,
        })
    }

    fn set_help(&self, slot: &mut Option<String>, pair: &Pair<'_>) -> Result<(), ParseError> {
        if slot.is_some() {
            return Err(self.error(
                "Help block has already been defined for the current scope.",
                pair,
            ));
        }
        *slot = Some(help_block::help_text(pair));
        Ok(())
    }
}

fn command_text(pair: Pair<'_>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().trim().to_string())
        .unwrap_or_default()
}

fn arg_def(pair: Pair<'_>) -> ArgDef {
    let required = pair.as_rule() == Rule::arg_required;
    let mut inner = pair.into_inner();
    let name = inner.next().map(|p| p.as_str().to_string()).unwrap_or_default();
    let help = inner
        .next()
        .map(|p| expression::unescape(p.into_inner().next().map_or("", |p| p.as_str())));
    ArgDef {
        name,
        required,
        help,
    }
}

fn comment_text(pair: &Pair<'_>) -> String {
    pair.as_str().strip_prefix('#').unwrap_or(pair.as_str()).to_string()
}
