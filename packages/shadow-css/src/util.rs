//! Utility Functions
//!
//! The match-and-splice primitive every rewriting pass is built on.

use regex::{Captures, Regex};

/// Find every non-overlapping match of `re` in `input`, map each one through
/// `replacer` and splice the results back in place of the matched text.
///
/// Text between matches is copied through untouched.
pub fn replace_all_mapped<F>(input: &str, re: &Regex, mut replacer: F) -> String
where
    F: FnMut(&Captures) -> String,
{
    re.replace_all(input, |caps: &Captures| replacer(caps))
        .into_owned()
}

/// Text of capture group `index`, or an empty string when the group did not
/// participate in the match.
pub(crate) fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str()).unwrap_or("")
}
