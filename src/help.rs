//! Usage and target listing

use crate::registry::Registry;
use std::fmt::Write;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREY: &str = "\x1b[90m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

const NO_HELP: &str = "<No help defined>";

/// ANSI escapes, or nothing at all when output is not a terminal.
#[derive(Debug, Clone, Copy)]
struct Palette(bool);

impl Palette {
    fn paint(self, code: &'static str) -> &'static str {
        if self.0 { code } else { "" }
    }
}

/// Full usage text: the usage line, root help, then every target.
#[must_use]
pub fn render_usage(registry: &Registry, color: bool) -> String {
    let p = Palette(color);
    let mut out = format!(
        "{}Usage: {}doit {}<target> {}[args...]{}\n",
        p.paint(GREEN),
        p.paint(YELLOW),
        p.paint(BLUE),
        p.paint(GREY),
        p.paint(RESET),
    );

    if let Some(help) = registry.help().map(str::trim).filter(|h| !h.is_empty()) {
        for line in help.lines() {
            let _ = writeln!(out, "       {line}");
        }
    }

    let _ = writeln!(out, "\n{}TARGETS{}", p.paint(GREEN), p.paint(RESET));

    let targets = registry.sorted();
    let width = targets.iter().map(|t| t.name.len()).max().unwrap_or(0);

    for target in targets {
        // None prints the placeholder; an empty help block prints nothing
        let help = target.help.as_deref().map_or(NO_HELP, str::trim);
        let _ = write!(
            out,
            "{}  {:>width$}{}",
            p.paint(BLUE),
            target.name,
            p.paint(RESET),
        );

        if target.args.is_empty() {
            write_tabbed(&mut out, width, true, help);
            continue;
        }

        for arg in &target.args {
            let (open, close) = if arg.required { ('<', '>') } else { ('[', ']') };
            let _ = write!(out, "{} {open}{}{close}{}", p.paint(GREY), arg.name, p.paint(RESET));
        }
        out.push('\n');
        write_tabbed(&mut out, width, false, help);

        let arg_width = target.args.iter().map(|a| a.name.len()).max().unwrap_or(0);
        for arg in &target.args {
            let _ = write!(
                out,
                "{}{:>indent$}{}",
                p.paint(GREY),
                arg.name,
                p.paint(RESET),
                indent = width + arg_width + 4,
            );
            let arg_help = arg.help.as_deref().map_or(NO_HELP, str::trim);
            write_tabbed(&mut out, width + arg_width + 2, true, arg_help);
        }
    }

    out
}

/// Write `text` in the column after a name `width` wide. With `inline`, the
/// first line continues the current line.
fn write_tabbed(out: &mut String, width: usize, inline: bool, text: &str) {
    let mut lines = text.lines();
    if inline {
        let _ = match lines.next().map(str::trim) {
            Some(first) if !first.is_empty() => writeln!(out, "  {first}"),
            _ => writeln!(out),
        };
    }
    for line in lines {
        let _ = writeln!(out, "  {:width$}  {}", "", line.trim());
    }
}

/// Diagnostic for a target name that is not in the script.
#[must_use]
pub fn render_invalid_target(name: &str, color: bool) -> String {
    let p = Palette(color);
    format!(
        "{}Invalid target name: {}{name}{}\n{}Usage: {}doit <target> [args...]{}\n",
        p.paint(RED),
        p.paint(YELLOW),
        p.paint(RESET),
        p.paint(GREEN),
        p.paint(BLUE),
        p.paint(RESET),
    )
}
