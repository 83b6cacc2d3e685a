// Abstract Syntax Tree definitions

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Help block at the top level of the script.
    pub help: Option<String>,
    pub items: Vec<Item>,
}

/// Top level statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Comment(String),
    Assignment(Assignment),
    Target(TargetDef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetDef {
    pub name: String,
    pub help: Option<String>,
    pub body: Vec<BodyStatement>,
    pub line: usize,
}

impl TargetDef {
    /// Declared arguments, in order.
    pub fn args(&self) -> impl Iterator<Item = &ArgDef> {
        self.body.iter().filter_map(|statement| match statement {
            BodyStatement::Arg(arg) => Some(arg),
            _ => None,
        })
    }
}

/// Statements allowed inside a target.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyStatement {
    Comment(String),
    Assignment(Assignment),
    Arg(ArgDef),
    Command { template: String, line: usize },
    /// `>>> code`, run by the Python interpreter.
    Python { template: String, line: usize },
    Exit { code: Option<Expression>, line: usize },
    Yield,
}

/// A documented target argument, `<name> "help"` or `[name] "help"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgDef {
    pub name: String,
    pub required: bool,
    pub help: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Expression,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Rem => '%',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Text(String),
    Variable(String),
    Negate(Box<Expression>),
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", crate::value::format_number(*n)),
            Expression::Text(s) => write!(f, "{s:?}"),
            Expression::Variable(name) => f.write_str(name),
            Expression::Negate(inner) => write!(f, "-{inner}"),
            Expression::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
        }
    }
}

// Tree dump used by `--nodes`:
//
// ROOT [HAS_HELP]
// ├─ASSIGN: my_value = 42
// └─TARGET [HAS_HELP]: build
//   └─SCRIPT: echo $my_value

fn has_help(help: Option<&String>) -> &'static str {
    if help.is_some() { " [HAS_HELP]" } else { "" }
}

fn branch(last: bool) -> &'static str {
    if last { "└─" } else { "├─" }
}

fn body_label(statement: &BodyStatement) -> String {
    match statement {
        BodyStatement::Comment(text) => format!("COMMENT: {text}"),
        BodyStatement::Assignment(a) => format!("ASSIGN: {} = {}", a.name, a.value),
        BodyStatement::Arg(arg) => format!(
            "{}{}: {}",
            if arg.required { "ARG_REQ" } else { "ARG_OPT" },
            has_help(arg.help.as_ref()),
            arg.name
        ),
        BodyStatement::Command { template, .. } => format!("SCRIPT: {template}"),
        BodyStatement::Python { template, .. } => format!("SCRIPT_PY: {template}"),
        BodyStatement::Exit { code: Some(code), .. } => format!("EXIT: {code}"),
        BodyStatement::Exit { code: None, .. } => "EXIT".to_string(),
        BodyStatement::Yield => "YIELD".to_string(),
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ROOT{}", has_help(self.help.as_ref()))?;
        for (index, item) in self.items.iter().enumerate() {
            let last = index + 1 == self.items.len();
            match item {
                Item::Comment(text) => writeln!(f, "{}COMMENT: {text}", branch(last))?,
                Item::Assignment(a) => {
                    writeln!(f, "{}ASSIGN: {} = {}", branch(last), a.name, a.value)?;
                }
                Item::Target(target) => {
                    writeln!(
                        f,
                        "{}TARGET{}: {}",
                        branch(last),
                        has_help(target.help.as_ref()),
                        target.name
                    )?;
                    let indent = if last { "  " } else { "│ " };
                    for (child_index, child) in target.body.iter().enumerate() {
                        let child_last = child_index + 1 == target.body.len();
                        writeln!(f, "{indent}{}{}", branch(child_last), body_label(child))?;
                    }
                }
            }
        }
        Ok(())
    }
}
