//! Stylesheet loading errors
//!
//! Shimming itself never fails; these only come from fetching and resolving
//! the stylesheets that get fed into it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to load stylesheet '{url}'")]
    Load {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stylesheet url '{0}' cannot be resolved")]
    UnresolvableUrl(String),

    #[error("stylesheet '{0}' imports itself")]
    CyclicImport(String),
}

pub type Result<T> = std::result::Result<T, StyleError>;
