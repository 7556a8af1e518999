//! ngshim configuration
//!
//! Options come from the command line and an optional JSON file; command
//! line values win.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use shadow_css::style_compiler::{component_attrs, CONTENT_ATTR, HOST_ATTR};
use shadow_css::{ShadowCssConfig, ViewEncapsulation};

pub const DEFAULT_SUFFIX: &str = ".css";

/// Contents of a `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShimConfigFile {
    pub strict_styling: Option<bool>,
    pub encapsulation: Option<ViewEncapsulation>,
    pub suffix: Option<String>,
    pub component_id: Option<String>,
}

impl ShimConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: ShimConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }
}

/// Command line values, before they are merged with the config file.
#[derive(Debug, Default, Clone)]
pub struct CliArgs {
    pub files: Vec<String>,
    pub root: Option<PathBuf>,
    pub scope: Option<String>,
    pub host: Option<String>,
    pub component_id: Option<String>,
    pub no_shim: bool,
    pub loose: bool,
    pub suffix: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimOptions {
    /// Paths or glob patterns
    pub files: Vec<String>,
    /// Directory stylesheet urls (and their imports) are resolved from
    pub root: PathBuf,
    pub scope: Option<String>,
    pub host: Option<String>,
    pub component_id: Option<String>,
    pub shim: bool,
    pub strict_styling: bool,
    pub suffix: String,
    /// Print to stdout when unset
    pub out_dir: Option<PathBuf>,
}

impl ShimOptions {
    /// Read the `--config` file, if any, and merge it with `args`.
    pub fn from_args(args: CliArgs) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => ShimConfigFile::load(path)?,
            None => ShimConfigFile::default(),
        };
        Ok(Self::merge(args, file))
    }

    pub fn merge(args: CliArgs, file: ShimConfigFile) -> Self {
        let encapsulation = file.encapsulation.unwrap_or_default();
        ShimOptions {
            files: args.files,
            root: args.root.unwrap_or_else(|| PathBuf::from(".")),
            scope: args.scope,
            host: args.host,
            component_id: args.component_id.or(file.component_id),
            shim: !args.no_shim && encapsulation == ViewEncapsulation::Emulated,
            strict_styling: !args.loose && file.strict_styling.unwrap_or(true),
            suffix: args
                .suffix
                .or(file.suffix)
                .unwrap_or_else(|| DEFAULT_SUFFIX.to_string()),
            out_dir: args.out_dir,
        }
    }

    pub fn shadow_css_config(&self) -> ShadowCssConfig {
        ShadowCssConfig {
            strict_styling: self.strict_styling,
        }
    }

    /// `(content, host)` attributes to shim with.
    ///
    /// An explicit `--scope` wins (the host defaults to the scope), then the
    /// component id; otherwise the `%COMP%` templates are kept.
    pub fn attrs(&self) -> (String, String) {
        match (&self.scope, &self.component_id) {
            (Some(scope), _) => {
                let host = self.host.clone().unwrap_or_else(|| scope.clone());
                (scope.clone(), host)
            }
            (None, Some(id)) => component_attrs(id),
            (None, None) => (CONTENT_ATTR.to_string(), HOST_ATTR.to_string()),
        }
    }
}
