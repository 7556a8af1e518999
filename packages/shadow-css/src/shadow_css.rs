//! Shadow CSS
//!
//! CSS scoping for emulated view encapsulation.
//!
//! This is a limited shim for ShadowDOM css styling: it only covers the
//! features that can be rewritten cheaply into ordinary document level CSS.
//!
//! * `:host` and `:host-context()` are rewritten to selectors on the host
//!   attribute. With a host attribute of `a-host`
//!
//!   ```text
//!   :host(.active) { background: red; }
//!   ```
//!
//!   becomes `[a-host].active { background: red; }`.
//!
//! * Encapsulation. By default (strict styling) every compound selector
//!   gets the content attribute, which is set on each element of the
//!   component's template:
//!
//!   ```text
//!   div > .title { font-weight: bold; }
//!   ```
//!
//!   becomes `div[a] > .title[a] { font-weight: bold; }`. Without strict
//!   styling each selector is instead prefixed with the scope as an
//!   ancestor: `x-foo div > .title`.
//!
//! * Upper and lower encapsulation bounds are not emulated: document styles
//!   still reach into a component, and `>>>` / `/deep/` reach out of it.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::config::ShadowCssConfig;
use crate::css_rules::{process_rules, CssRule};
use crate::host_selectors::{self, POLYFILL_HOST_NO_COMBINATOR, POLYFILL_HOST_RE};
use crate::polyfills;
use crate::util::group;

static SHADOW_DEEP_SELECTORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:>>>)|(?:/deep/)").unwrap());

// Combinators between compound selectors
static SELECTOR_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"( |>|\+|~)\s*").unwrap());

static IS_ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[is=([^\]]*)\]").unwrap());

// 1 = type/class/id prefix, 2 = colons, 3 = pseudo classes and elements
static PSEUDO_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^([^:]*)(:*)(.*)$").unwrap());

const SELECTOR_RE_SUFFIX: &str = r"([>\s~+\[.,{:][\s\S]*)?$";

/// The scoping engine.
///
/// Stateless apart from the scoping strategy chosen at construction, so a
/// single instance can be shared between threads.
#[derive(Debug, Clone)]
pub struct ShadowCss {
    strict_styling: bool,
}

impl ShadowCss {
    pub fn new() -> Self {
        Self::with_config(&ShadowCssConfig::default())
    }

    pub fn with_config(config: &ShadowCssConfig) -> Self {
        ShadowCss {
            strict_styling: config.strict_styling,
        }
    }

    pub fn strict_styling(&self) -> bool {
        self.strict_styling
    }

    /// Shim some cssText with the given selector. Returns cssText that can be included in the document
    ///
    /// When strict styling is on, `selector` is the attribute added to all
    /// elements inside the host and `host_selector` the attribute added to the
    /// host itself. Otherwise `selector` is used for both.
    ///
    /// A trailing `/*# sourceMappingURL=... */` comment is kept as is at the
    /// end of the output.
    #[tracing::instrument(level = "debug", skip_all, fields(selector = %selector, strict = self.strict_styling))]
    pub fn shim_css_text(&self, css_text: &str, selector: &str, host_selector: &str) -> String {
        let source_mapping_url = polyfills::extract_source_mapping_url(css_text);
        let css_text = polyfills::preprocess(css_text);
        let scoped_css_text = self.scope_css_text(&css_text, selector, host_selector);
        tracing::trace!(
            input = css_text.len(),
            output = scoped_css_text.len(),
            "shimmed stylesheet"
        );
        scoped_css_text + &source_mapping_url
    }

    fn scope_css_text(&self, css_text: &str, scope_selector: &str, host_selector: &str) -> String {
        let (css_text, unscoped_rules) = polyfills::extract_unscoped_rules(css_text);
        let mut css_text = host_selectors::normalize(&css_text);
        if !scope_selector.is_empty() {
            css_text = self.scope_selectors(&css_text, scope_selector, host_selector);
        }

        if unscoped_rules.is_empty() {
            css_text.trim().to_string()
        } else {
            format!("{}\n\n{}", css_text.trim_end(), unscoped_rules)
                .trim()
                .to_string()
        }
    }

    /// Scope the selectors of every rule in `css_text`.
    ///
    /// Style rules and `@page` get their selector rewritten; the bodies of
    /// `@media` and `@supports` are scoped recursively. Any other at-rule
    /// (`@import`, `@font-face`, `@keyframes`, ...) is left untouched.
    ///
    /// `css_text` is expected to have gone through
    /// [`host_selectors::normalize`] already.
    pub fn scope_selectors(&self, css_text: &str, scope_selector: &str, host_selector: &str) -> String {
        let scope_matcher = make_scope_matcher(scope_selector).ok();
        self.scope_rules(css_text, scope_matcher.as_ref(), scope_selector, host_selector)
    }

    fn scope_rules(
        &self,
        css_text: &str,
        scope_matcher: Option<&Regex>,
        scope_selector: &str,
        host_selector: &str,
    ) -> String {
        process_rules(css_text, |rule: CssRule| {
            let CssRule {
                mut selector,
                mut content,
            } = rule;
            if !selector.starts_with('@') || selector.starts_with("@page") {
                selector = self.scope_selector(&selector, scope_matcher, scope_selector, host_selector);
            } else if selector.starts_with("@media") || selector.starts_with("@supports") {
                content = self.scope_rules(&content, scope_matcher, scope_selector, host_selector);
            }
            CssRule::new(selector, content)
        })
    }

    fn scope_selector(
        &self,
        selector: &str,
        scope_matcher: Option<&Regex>,
        scope_selector: &str,
        host_selector: &str,
    ) -> String {
        selector
            .split(',')
            .map(|part| {
                // only the part before a deep combinator belongs to this component
                let mut deep_parts = SHADOW_DEEP_SELECTORS_RE.split(part.trim());
                let shallow_part = deep_parts.next().unwrap_or_default();
                let scoped = if selector_needs_scoping(shallow_part, scope_matcher) {
                    if self.strict_styling {
                        self.apply_strict_selector_scope(shallow_part, scope_selector, host_selector)
                    } else {
                        self.apply_selector_scope(shallow_part, scope_selector, host_selector)
                    }
                } else {
                    shallow_part.to_string()
                };
                std::iter::once(scoped)
                    .chain(deep_parts.map(str::to_string))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn apply_selector_scope(&self, selector: &str, scope_selector: &str, host_selector: &str) -> String {
        self.apply_simple_selector_scope(selector, scope_selector, host_selector)
    }

    /// Resolve the host markers of `selector`, or prefix it with the scope
    /// when it has none.
    fn apply_simple_selector_scope(
        &self,
        selector: &str,
        scope_selector: &str,
        host_selector: &str,
    ) -> String {
        if POLYFILL_HOST_RE.is_match(selector) {
            let replace_by = if self.strict_styling {
                format!("[{}]", host_selector)
            } else {
                scope_selector.to_string()
            };
            let selector = selector.replacen(POLYFILL_HOST_NO_COMBINATOR, &replace_by, 1);
            POLYFILL_HOST_RE
                .replace_all(&selector, NoExpand(&format!("{} ", replace_by)))
                .into_owned()
        } else {
            format!("{} {}", scope_selector, selector)
        }
    }

    /// Return a selector with `[name]` suffix on each simple selector,
    /// e.g. `.foo.bar > .zot` becomes `.foo.bar[name] > .zot[name]`.
    fn apply_strict_selector_scope(
        &self,
        selector: &str,
        scope_selector: &str,
        host_selector: &str,
    ) -> String {
        let scope_selector = IS_ATTR_RE.replace_all(scope_selector, "${1}");
        let attr_name = format!("[{}]", scope_selector);

        // Compound selectors before a :host-context anchor match ancestors of
        // the host and are kept as written.
        let scope_after = selector.find(POLYFILL_HOST_NO_COMBINATOR).unwrap_or(0);
        let mut scoped = String::new();
        let mut start_index = 0;

        for separator in SELECTOR_SEPARATOR_RE.find_iter(selector) {
            let part = selector[start_index..separator.start()].trim();
            let scoped_part = if start_index >= scope_after {
                self.scope_compound_selector(part, &scope_selector, &attr_name, host_selector)
            } else {
                part.to_string()
            };
            scoped.push_str(&scoped_part);
            scoped.push(' ');
            scoped.push_str(&separator.as_str()[..1]);
            scoped.push(' ');
            start_index = separator.end();
        }

        scoped.push_str(&self.scope_compound_selector(
            &selector[start_index..],
            &scope_selector,
            &attr_name,
            host_selector,
        ));
        scoped
    }

    fn scope_compound_selector(
        &self,
        part: &str,
        scope_selector: &str,
        attr_name: &str,
        host_selector: &str,
    ) -> String {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        if part.contains(POLYFILL_HOST_NO_COMBINATOR) {
            return self.apply_simple_selector_scope(part, scope_selector, host_selector);
        }

        // a bare host marker is redundant once the attribute is added
        let without_host = POLYFILL_HOST_RE.replace_all(part, "");
        if without_host.is_empty() {
            return trimmed.to_string();
        }
        match PSEUDO_SPLIT_RE.captures(&without_host) {
            Some(caps) => format!(
                "{}{}{}{}",
                group(&caps, 1),
                attr_name,
                group(&caps, 2),
                group(&caps, 3)
            ),
            None => trimmed.to_string(),
        }
    }
}

impl Default for ShadowCss {
    fn default() -> Self {
        Self::new()
    }
}

/// A selector that already starts with the scope is left alone. Without a
/// matcher every selector gets scoped.
fn selector_needs_scoping(selector: &str, scope_matcher: Option<&Regex>) -> bool {
    scope_matcher.map_or(true, |re| !re.is_match(selector))
}

/// Matches selectors that already start with `scope_selector`.
fn make_scope_matcher(scope_selector: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "(?m)^({}){}",
        regex::escape(scope_selector),
        SELECTOR_RE_SUFFIX
    ))
}
