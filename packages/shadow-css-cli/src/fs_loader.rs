//! File system resource loader

use std::fs;
use std::path::{Path, PathBuf};

use shadow_css::{ResourceLoader, StyleError};

/// Serves stylesheet urls from a root directory. `package:` and `asset:`
/// urls are looked up relative to the root as well.
#[derive(Debug, Clone)]
pub struct FsResourceLoader {
    root: PathBuf,
}

impl FsResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsResourceLoader { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve_path(&self, url: &str) -> PathBuf {
        let path = url
            .strip_prefix("package:")
            .or_else(|| url.strip_prefix("asset:"))
            .unwrap_or(url);
        self.root.join(path)
    }
}

impl ResourceLoader for FsResourceLoader {
    fn get(&self, url: &str) -> shadow_css::Result<String> {
        let path = self.resolve_path(url);
        tracing::trace!(url, path = %path.display(), "reading stylesheet");
        fs::read_to_string(&path).map_err(|source| StyleError::Load {
            url: url.to_string(),
            source,
        })
    }
}
