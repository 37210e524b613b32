//! Text normalization helpers
//!
//! Cell text arrives HTML-entity-decoded but otherwise raw. Before any
//! classification we collapse whitespace runs and fold non-breaking spaces
//! into regular spaces; field keys are derived from header labels by
//! slugifying to a compact identifier form.

/// Normalize cell text: non-breaking spaces become regular spaces,
/// whitespace runs collapse to a single space, and the result is trimmed.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true; // leading whitespace is dropped

    for c in text.chars() {
        let c = match c {
            '\u{a0}' | '\u{202f}' => ' ', // NBSP variants
            other => other,
        };
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(c);
            last_was_space = false;
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Slugify a joined header label sequence into a field key: lowercase,
/// with every run of non-alphanumeric characters collapsed to a single
/// underscore and no leading/trailing underscores.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            for lc in c.to_lowercase() {
                out.push(lc);
            }
        } else {
            pending_sep = true;
        }
    }
    out
}
