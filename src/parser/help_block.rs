//! Help block text extraction

use super::{Pair, Rule};

/// Text between the `@@@` markers, without the newline that precedes the
/// closing marker. Surrounding indentation is kept; it is trimmed per line
/// when help is printed.
pub(super) fn help_text(pair: &Pair<'_>) -> String {
    let mut text = pair
        .clone()
        .into_inner()
        .find(|p| p.as_rule() == Rule::help_text)
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    if let Some(index) = text.rfind('\n') {
        text.remove(index);
    }
    text
}
