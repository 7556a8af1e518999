//! Host Selectors
//!
//! Rewrites the shadow DOM specific selector syntax into a small marker
//! vocabulary that the scoper understands:
//!
//! - `:host` / `:host-context` become [`POLYFILL_HOST`] / [`POLYFILL_HOST_CONTEXT`],
//! - `:host(<sel>)` and `:host-context(<sel>)` are expanded around
//!   [`POLYFILL_HOST_NO_COMBINATOR`], the marker for "this compound selector
//!   is the host element",
//! - `::shadow`, `::content`, `/shadow/` and `/shadow-deep/` collapse into a
//!   plain descendant combinator.
//!
//! `>>>` and `/deep/` are deliberately left in place; the scoper treats them
//! as the boundary after which nothing gets scoped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::util::{group, replace_all_mapped};

pub const POLYFILL_HOST: &str = "-shadowcsshost";
// :host-context is rewritten to this before :host so it is not mistaken for it
pub const POLYFILL_HOST_CONTEXT: &str = "-shadowcsscontext";
pub const POLYFILL_HOST_NO_COMBINATOR: &str = "-shadowcsshost-no-combinator";

const SHADOW_DOM_SELECTORS: &[&str] = &["::shadow", "::content", "/shadow-deep/", "/shadow/"];

static COLON_HOST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i):host").unwrap());

static COLON_HOST_CONTEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i):host-context").unwrap());

pub(crate) static POLYFILL_HOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("(?i){}", POLYFILL_HOST)).unwrap());

// A host marker inside `:host-context(...)` has already been through the
// `:host` pass and carries the no-combinator suffix.
static HOST_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(?i){}(?:-no-combinator)?", POLYFILL_HOST)).unwrap()
});

// 1 = marker, 2 = contents of the parentheses (one level of nesting), 3 = rest
// of the compound selector up to the next `,` or `{`
static CSS_COLON_HOST_RE: Lazy<Regex> = Lazy::new(|| host_rule_re(POLYFILL_HOST));

static CSS_COLON_HOST_CONTEXT_RE: Lazy<Regex> = Lazy::new(|| host_rule_re(POLYFILL_HOST_CONTEXT));

fn host_rule_re(marker: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)({})(?:\(((?:\([^)(]*\)|[^)(]*)+?)\))?([^,{{]*)",
        marker
    ))
    .unwrap()
}

/// Run every shadow selector rewrite over `css_text`.
pub fn normalize(css_text: &str) -> String {
    let css_text = insert_polyfill_host(css_text);
    let css_text = convert_colon_host(&css_text);
    let css_text = convert_colon_host_context(&css_text);
    convert_shadow_dom_selectors(&css_text)
}

fn insert_polyfill_host(css_text: &str) -> String {
    let css_text = COLON_HOST_CONTEXT_RE.replace_all(css_text, POLYFILL_HOST_CONTEXT);
    COLON_HOST_RE
        .replace_all(&css_text, POLYFILL_HOST)
        .into_owned()
}

/// `:host(.foo) > .bar` becomes `<host>.foo > .bar`.
fn convert_colon_host(css_text: &str) -> String {
    convert_colon_rule(css_text, &CSS_COLON_HOST_RE, colon_host_part_replacer)
}

/// `:host-context(.foo) > .bar` becomes `<host>.foo > .bar, .foo <host> > .bar`:
/// either the host itself or one of its ancestors matches `.foo`.
///
/// `:host-context(.foo:host) .bar` only has the first form.
fn convert_colon_host_context(css_text: &str) -> String {
    convert_colon_rule(
        css_text,
        &CSS_COLON_HOST_CONTEXT_RE,
        colon_host_context_part_replacer,
    )
}

fn convert_colon_rule(
    css_text: &str,
    re: &Regex,
    part_replacer: fn(&str, &str, &str) -> String,
) -> String {
    replace_all_mapped(css_text, re, |caps| {
        let suffix = group(caps, 3);
        match caps.get(2) {
            Some(selectors) => selectors
                .as_str()
                .split(',')
                .map(str::trim)
                .map(|part| part_replacer(POLYFILL_HOST_NO_COMBINATOR, part, suffix))
                .collect::<Vec<_>>()
                .join(","),
            None => format!("{}{}", POLYFILL_HOST_NO_COMBINATOR, suffix),
        }
    })
}

fn colon_host_part_replacer(host: &str, part: &str, suffix: &str) -> String {
    format!("{}{}{}", host, HOST_MARKER_RE.replace(part, ""), suffix)
}

fn colon_host_context_part_replacer(host: &str, part: &str, suffix: &str) -> String {
    if POLYFILL_HOST_RE.is_match(part) {
        colon_host_part_replacer(host, part, suffix)
    } else {
        format!("{host}{part}{suffix}, {part} {host}{suffix}")
    }
}

fn convert_shadow_dom_selectors(css_text: &str) -> String {
    SHADOW_DOM_SELECTORS
        .iter()
        .fold(css_text.to_string(), |result, pattern| result.replace(pattern, " "))
}
