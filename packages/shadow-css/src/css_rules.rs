//! CSS Rules
//!
//! A block-aware walker that hands every `selector { content }` pair (and
//! every body-less `statement;`) of a stylesheet to a callback and stitches
//! the callback's answers back together.
//!
//! Rules are found with a regex, which cannot balance braces. The walker
//! therefore first replaces every top level block body by [`BLOCK_PLACEHOLDER`]
//! (see [`escape_blocks`]), matches rules on the flattened text, and splices
//! the bodies back in the order they were taken out. Nested rules are not
//! visited: a callback that wants them calls [`process_rules`] again on the
//! rule content.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::util::{group, replace_all_mapped};

const OPEN_CURLY: &str = "{";
const CLOSE_CURLY: &str = "}";
pub const BLOCK_PLACEHOLDER: &str = "%BLOCK%";

// 1 = leading whitespace, 2 = selector, 3 = whitespace before the body,
// 4 = `{%BLOCK%}` with an optional `;`, or a lone `;`
static RULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(\s*)([^;{{}}]+?)(\s*)((?:\{{{}\}}?\s*;?)|(?:\s*;))",
        regex::escape(BLOCK_PLACEHOLDER)
    ))
    .unwrap()
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssRule {
    /// Everything before the opening brace (or the whole statement).
    pub selector: String,
    /// Everything between the matching braces, empty for statements.
    pub content: String,
}

impl CssRule {
    pub fn new(selector: String, content: String) -> Self {
        CssRule { selector, content }
    }
}

/// A stylesheet with every top level block body swapped for a placeholder.
#[derive(Debug, PartialEq, Eq)]
pub struct StringWithEscapedBlocks {
    pub escaped_string: String,
    /// Block bodies, in the order their placeholders appear.
    pub blocks: Vec<String>,
}

/// Apply `rule_callback` to every top level rule of `input`.
///
/// Whitespace around selectors and after bodies is preserved; text that is
/// not a rule (e.g. a trailing fragment without `{` or `;`) is copied as is.
pub fn process_rules<F>(input: &str, mut rule_callback: F) -> String
where
    F: FnMut(CssRule) -> CssRule,
{
    let input_with_escaped_blocks = escape_blocks(input);
    let mut blocks = input_with_escaped_blocks.blocks.into_iter();
    let block_start = format!("{}{}", OPEN_CURLY, BLOCK_PLACEHOLDER);

    replace_all_mapped(
        &input_with_escaped_blocks.escaped_string,
        &RULE_RE,
        |caps| {
            let selector = group(caps, 2);
            let mut suffix = group(caps, 4);
            let mut content = String::new();
            let mut content_prefix = "";

            if suffix.starts_with(&block_start) {
                content = blocks.next().unwrap_or_default();
                suffix = &suffix[block_start.len()..];
                content_prefix = OPEN_CURLY;
            }

            let rule = rule_callback(CssRule::new(selector.to_string(), content));
            format!(
                "{}{}{}{}{}{}",
                group(caps, 1),
                rule.selector,
                group(caps, 3),
                content_prefix,
                rule.content,
                suffix
            )
        },
    )
}

/// Replace the body of every top level `{...}` block by [`BLOCK_PLACEHOLDER`].
///
/// The input is split into runs of text and single braces; a depth counter
/// decides which runs belong to a block body. Unbalanced input never fails:
/// extra closing braces are kept as text and an unterminated block still
/// produces a placeholder.
pub fn escape_blocks(input: &str) -> StringWithEscapedBlocks {
    let mut result_parts: Vec<&str> = Vec::new();
    let mut escaped_blocks = Vec::new();
    let mut bracket_count = 0usize;
    let mut current_block_parts: Vec<&str> = Vec::new();

    for part in split_curly(input) {
        if part == CLOSE_CURLY {
            bracket_count = bracket_count.saturating_sub(1);
        }
        if bracket_count > 0 {
            current_block_parts.push(part);
        } else {
            if !current_block_parts.is_empty() {
                escaped_blocks.push(current_block_parts.concat());
                result_parts.push(BLOCK_PLACEHOLDER);
                current_block_parts.clear();
            }
            result_parts.push(part);
        }
        if part == OPEN_CURLY {
            bracket_count += 1;
        }
    }

    if !current_block_parts.is_empty() {
        escaped_blocks.push(current_block_parts.concat());
        result_parts.push(BLOCK_PLACEHOLDER);
    }

    StringWithEscapedBlocks {
        escaped_string: result_parts.concat(),
        blocks: escaped_blocks,
    }
}

/// Split on `{` and `}`, keeping each brace as its own part. The text run
/// between two braces is always emitted, even when empty, so an empty block
/// `{}` still yields a (blank) body.
fn split_curly(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (index, ch) in input.char_indices() {
        if ch == '{' || ch == '}' {
            parts.push(&input[start..index]);
            parts.push(&input[index..index + 1]);
            start = index + 1;
        }
    }
    parts.push(&input[start..]);
    parts
}
