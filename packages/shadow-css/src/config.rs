//! Shadow CSS configuration

use serde::Deserialize;

/// Scoping strategy of a [`crate::ShadowCss`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowCssConfig {
    /// `true`: add the content attribute to every compound selector
    /// (`div` -> `div[_ngcontent-c0]`).
    /// `false`: prefix each selector with the scope (`div` -> `x-foo div`).
    pub strict_styling: bool,
}

impl Default for ShadowCssConfig {
    fn default() -> Self {
        ShadowCssConfig {
            strict_styling: true,
        }
    }
}
