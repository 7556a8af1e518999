//! Style URL Resolver
//!
//! Finds the `@import`ed stylesheets of a stylesheet so they can be compiled
//! (and shimmed) on their own.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::util::{group, replace_all_mapped};

/// Regex to match URL schema
static URL_WITH_SCHEMA_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^:/?#]+):").unwrap());

// 1 = quoted url, 2 = bare url
static CSS_IMPORT_REGEXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@import\s+(?:url\()?\s*(?:(?:['"]([^'"]*))|([^;)\s]*))[^;]*;?"#).unwrap()
});

static CSS_COMMENT_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());

static SOURCE_URL_COMMENT_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/\*#\s*(?:sourceURL|sourceMappingURL)=").unwrap());

/// A stylesheet with its resolvable imports taken out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleWithImports {
    pub style: String,
    /// Imported urls, resolved against the importing stylesheet.
    pub style_urls: Vec<String>,
}

/// Check if style URL is resolvable
///
/// Returns true if:
/// - URL has no schema (relative URL)
/// - URL has schema 'package' or 'asset'
///
/// Returns false if:
/// - URL is null or empty
/// - URL starts with '/' (absolute path)
/// - URL has other schema (e.g., 'http', 'https')
pub fn is_style_url_resolvable(url: Option<&str>) -> bool {
    match url {
        None => false,
        Some(u) if u.is_empty() => false,
        Some(u) if u.starts_with('/') => false,
        Some(u) => match URL_WITH_SCHEMA_REGEXP.captures(u) {
            Some(caps) => matches!(group(&caps, 1), "package" | "asset"),
            None => true,
        },
    }
}

/// Remove the resolvable `@import` statements of `css_text`, collecting
/// their urls resolved against `base_url`.
///
/// Comments are stripped first, except `sourceURL` / `sourceMappingURL`
/// ones. Imports that cannot be resolved (absolute or remote urls) stay in
/// the stylesheet.
pub fn extract_style_urls(base_url: &str, css_text: &str) -> StyleWithImports {
    let mut style_urls = Vec::new();
    let without_comments = replace_all_mapped(css_text, &CSS_COMMENT_REGEXP, |caps| {
        let comment = group(caps, 0);
        if SOURCE_URL_COMMENT_REGEXP.is_match(comment) {
            comment.to_string()
        } else {
            String::new()
        }
    });

    let style = replace_all_mapped(&without_comments, &CSS_IMPORT_REGEXP, |caps| {
        let url = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
        match url {
            Some(url) if is_style_url_resolvable(Some(url)) => {
                style_urls.push(resolve_url(base_url, url));
                String::new()
            }
            _ => group(caps, 0).to_string(),
        }
    });

    StyleWithImports { style, style_urls }
}

/// Resolve `url` against the stylesheet at `base_url`.
///
/// Urls with a schema and absolute paths are returned unchanged. Relative
/// urls are joined onto the directory of `base_url` (keeping its schema) and
/// `.` / `..` segments are folded.
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with('/') || URL_WITH_SCHEMA_REGEXP.is_match(url) {
        return url.to_string();
    }

    let (schema, base_path) = match URL_WITH_SCHEMA_REGEXP.find(base_url) {
        Some(m) => base_url.split_at(m.end()),
        None => ("", base_url),
    };
    let base_dir = base_path.rfind('/').map_or("", |index| &base_path[..=index]);
    format!("{}{}", schema, normalize_path(&format!("{}{}", base_dir, url)))
}

fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "." => {}
            ".." => match segments.last() {
                Some(&last) if !last.is_empty() && last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }
    segments.join("/")
}
