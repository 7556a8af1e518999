//! Batch shimming
//!
//! Every input stylesheet is loaded through one shared
//! [`StylesheetResolver`], so an import used by several inputs is read and
//! compiled once. Inputs are processed in parallel; results keep the input
//! order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use rayon::prelude::*;
use shadow_css::style_compiler::styles_module_url;
use shadow_css::{ShadowCss, StyleCompiler, StylesheetResolver};

use crate::config::ShimOptions;
use crate::fs_loader::FsResourceLoader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimOutput {
    /// Url of the input, relative to the root directory
    pub url: String,
    /// Set when the output was written to the output directory
    pub output_path: Option<PathBuf>,
    /// The stylesheet followed by its flattened imports
    pub css: String,
}

pub fn perform_shim(options: &ShimOptions) -> anyhow::Result<Vec<ShimOutput>> {
    let root = fs::canonicalize(&options.root)
        .with_context(|| format!("cannot open root directory {}", options.root.display()))?;
    let files = discover_files(&options.files)?;
    if files.is_empty() {
        bail!("no input stylesheets");
    }

    let (content_attr, host_attr) = options.attrs();
    let shadow_css = ShadowCss::with_config(&options.shadow_css_config());
    let compiler = StyleCompiler::with_attrs(shadow_css, &content_attr, &host_attr);
    let resolver = StylesheetResolver::new(compiler, FsResourceLoader::new(&root));

    tracing::debug!(
        files = files.len(),
        shim = options.shim,
        strict = options.strict_styling,
        "shimming stylesheets"
    );

    files
        .par_iter()
        .map(|file| shim_file(&resolver, &root, file, options))
        .collect()
}

fn shim_file(
    resolver: &StylesheetResolver<FsResourceLoader>,
    root: &Path,
    file: &Path,
    options: &ShimOptions,
) -> anyhow::Result<ShimOutput> {
    let url = stylesheet_url(root, file)?;
    let styles = resolver
        .load_and_compile_stylesheet(&url, options.shim)
        .with_context(|| format!("failed to shim {}", file.display()))?;
    let css = styles.join("\n");

    let output_path = match &options.out_dir {
        Some(out_dir) => {
            let path = out_dir.join(styles_module_url(&url, options.shim, &options.suffix));
            write_output(&path, &css)?;
            Some(path)
        }
        None => None,
    };

    Ok(ShimOutput {
        url,
        output_path,
        css,
    })
}

/// Expand glob patterns; plain paths are kept as given so that a missing
/// file is reported rather than silently skipped.
fn discover_files(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if !is_glob(pattern) {
            push_unique(&mut files, PathBuf::from(pattern));
            continue;
        }

        let paths = glob::glob(pattern).with_context(|| format!("invalid glob pattern '{}'", pattern))?;
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => push_unique(&mut files, path),
                Ok(_) => {}
                Err(err) => tracing::warn!("skipping {}: {}", err.path().display(), err),
            }
        }
    }

    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

/// `/`-separated path of `file` relative to `root`.
fn stylesheet_url(root: &Path, file: &Path) -> anyhow::Result<String> {
    let path = fs::canonicalize(file).with_context(|| format!("cannot open {}", file.display()))?;
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside of {}", file.display(), root.display()))?;
    let segments: Vec<_> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect();
    Ok(segments.join("/"))
}

fn write_output(path: &Path, css: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {}", parent.display()))?;
    }
    fs::write(path, css).with_context(|| format!("cannot write {}", path.display()))
}
