//! Polyfill Directives
//!
//! First stage of the shim: comment handling and expansion of the
//! `polyfill-next-selector`, `polyfill-rule` and `polyfill-unscoped-rule`
//! directives into plain rules.
//!
//! None of these passes support nested directives or comments inside a
//! directive; a directive that does not match its pattern is left alone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::util::{group, replace_all_mapped};

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*\s*[\s\S]*?\*/").unwrap());

// The last `/*# sourceMappingURL=... */` comment, only when nothing but
// whitespace follows it.
static SOURCE_MAPPING_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s\S]*(/\*\s*#\s*sourceMappingURL=[\s\S]+?\*/)\s*$").unwrap()
});

// A quoted `content` value; the selector is in the first group for single
// quotes, the second for double quotes, so the other quote kind may appear
// inside it (`'button[priority="1"]'`).
const QUOTED_CONTENT: &str = r#"(?:'([^']*)'|"([^"]*)")"#;

// polyfill-next-selector { content: '<sel>'; } <next> {
static CSS_CONTENT_NEXT_SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)polyfill-next-selector[^}}]*content:\s*?{}[;\s]*\}}([^{{]*?)\{{",
        QUOTED_CONTENT
    ))
    .unwrap()
});

// 1 = directive name, 2 = content declaration, 3 / 4 = selector
static CSS_CONTENT_RULE_RE: Lazy<Regex> = Lazy::new(|| directive_rule_re("polyfill-rule"));

static CSS_CONTENT_UNSCOPED_RULE_RE: Lazy<Regex> =
    Lazy::new(|| directive_rule_re("polyfill-unscoped-rule"));

fn directive_rule_re(directive: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)({})[^}}]*(content:\s*{})[;\s]*[^}}]*\}}",
        directive, QUOTED_CONTENT
    ))
    .unwrap()
}

/// Strip comments and expand the scoped polyfill directives.
///
/// Source map comments are removed like any other comment; grab them with
/// [`extract_source_mapping_url`] first.
pub fn preprocess(css_text: &str) -> String {
    let css_text = strip_comments(css_text);
    insert_directives(&css_text)
}

pub fn strip_comments(input: &str) -> String {
    COMMENT_RE.replace_all(input, "").into_owned()
}

/// Trailing `/*# sourceMappingURL=... */` comment, verbatim, or an empty
/// string when the stylesheet does not end with one.
pub fn extract_source_mapping_url(input: &str) -> String {
    SOURCE_MAPPING_URL_RE
        .captures(input)
        .map(|caps| group(&caps, 1).to_string())
        .unwrap_or_default()
}

pub fn insert_directives(css_text: &str) -> String {
    let css_text = insert_polyfill_directives(css_text);
    insert_polyfill_rules(&css_text)
}

/// Replace the selector that follows a `polyfill-next-selector` directive
/// with the directive's `content`.
///
/// ```text
/// polyfill-next-selector { content: ':host menu-item'; }
/// ::content menu-item {
/// ```
///
/// becomes `:host menu-item {`.
fn insert_polyfill_directives(css_text: &str) -> String {
    replace_all_mapped(css_text, &CSS_CONTENT_NEXT_SELECTOR_RE, |caps| {
        format!("{}{{", quoted_selector(caps, 1))
    })
}

/// Turn `polyfill-rule { content: '<sel>'; <decls> }` into `<sel> { ; <decls> }`.
fn insert_polyfill_rules(css_text: &str) -> String {
    replace_all_mapped(css_text, &CSS_CONTENT_RULE_RE, |caps| {
        let rule = group(caps, 0)
            .replacen(group(caps, 1), "", 1)
            .replacen(group(caps, 2), "", 1);
        format!("{}{}", quoted_selector(caps, 3), rule)
    })
}

/// Pull every `polyfill-unscoped-rule` out of the stylesheet.
///
/// Returns the stylesheet with those directives removed, and the rewritten
/// rules (`<sel> { <decls> }`), each followed by a blank line, ready to be
/// appended after the scoped output.
pub fn extract_unscoped_rules(css_text: &str) -> (String, String) {
    let mut unscoped = String::new();
    let remaining = replace_all_mapped(css_text, &CSS_CONTENT_UNSCOPED_RULE_RE, |caps| {
        unscoped.push_str(&unscoped_rule(caps));
        unscoped.push_str("\n\n");
        String::new()
    });
    (remaining, unscoped)
}

fn unscoped_rule(caps: &Captures) -> String {
    group(caps, 0)
        .replacen(group(caps, 2), "", 1)
        .replacen(group(caps, 1), quoted_selector(caps, 3), 1)
}

/// Selector of a [`QUOTED_CONTENT`] match whose groups start at `first`.
fn quoted_selector<'t>(caps: &Captures<'t>, first: usize) -> &'t str {
    caps.get(first)
        .or_else(|| caps.get(first + 1))
        .map(|m| m.as_str())
        .unwrap_or("")
}
