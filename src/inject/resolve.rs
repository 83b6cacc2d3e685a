//! Placeholder key classification

use super::Context;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+):([0-9]+)?").expect("range pattern is valid"));

/// Resolve a placeholder key against the context.
///
/// Keys are classified in this order:
/// 1. all ASCII digits: the positional argument at that index; the empty key
///    counts as index 0
/// 2. `@`: every argument, space separated
/// 3. `#`: the argument count
/// 4. `first:last` or `first:`: an inclusive, space separated slice of
///    arguments, only when `first < last`
/// 5. anything else, including ranges that did not apply: a named variable
///
/// Never fails; unresolvable keys yield an empty string.
#[must_use]
pub fn resolve(key: &str, context: &Context) -> String {
    let args = context.args();

    if key.bytes().all(|b| b.is_ascii_digit()) {
        let index = if key.is_empty() { Some(0) } else { key.parse::<usize>().ok() };
        return index
            .and_then(|index| args.get(index))
            .cloned()
            .unwrap_or_default();
    }

    match key {
        "@" => return args.join(" "),
        "#" => return args.len().to_string(),
        _ => {}
    }

    if let Some(slice) = resolve_range(key, args) {
        return slice;
    }

    context.var(key).unwrap_or_default().to_string()
}

fn resolve_range(key: &str, args: &[String]) -> Option<String> {
    let captures = RANGE_PATTERN.captures(key)?;
    let first: i64 = captures.get(1)?.as_str().parse().ok()?;
    let last: i64 = match captures.get(2) {
        Some(end) => end.as_str().parse().ok()?,
        None => i64::try_from(args.len()).ok()? - 1,
    };
    if first >= last || first < 0 {
        return None;
    }

    let first = usize::try_from(first).ok()?;
    let last = usize::try_from(last).ok()?;
    let end = (last + 1).min(args.len());
    Some(args.get(first..end).map(|s| s.join(" ")).unwrap_or_default())
}
