//! Resource Loader
//!
//! Fetching stylesheet text is left to the embedder through
//! [`ResourceLoader`]. [`StylesheetResolver`] uses it to load the imports of
//! a compiled stylesheet, recursively, and flatten everything into the list
//! of styles a component ends up with.

use std::sync::{Mutex, PoisonError};

use indexmap::IndexMap;

use crate::error::{Result, StyleError};
use crate::style_compiler::{CompiledStylesheet, StyleCompiler, StylesheetDependency};
use crate::style_url_resolver::is_style_url_resolvable;

pub trait ResourceLoader: Send + Sync {
    fn get(&self, url: &str) -> Result<String>;
}

/// Loads and compiles stylesheet dependencies, caching the flattened styles
/// per (url, shimmed) pair.
pub struct StylesheetResolver<L> {
    compiler: StyleCompiler,
    loader: L,
    cache: Mutex<IndexMap<String, Vec<String>>>,
}

impl<L: ResourceLoader> StylesheetResolver<L> {
    pub fn new(compiler: StyleCompiler, loader: L) -> Self {
        StylesheetResolver {
            compiler,
            loader,
            cache: Mutex::new(IndexMap::new()),
        }
    }

    pub fn compiler(&self) -> &StyleCompiler {
        &self.compiler
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Load `stylesheet_url`, compile it and resolve its imports.
    pub fn load_and_compile_stylesheet(&self, stylesheet_url: &str, shim: bool) -> Result<Vec<String>> {
        if !is_style_url_resolvable(Some(stylesheet_url)) {
            return Err(StyleError::UnresolvableUrl(stylesheet_url.to_string()));
        }
        let dependency = StylesheetDependency {
            module_url: stylesheet_url.to_string(),
            is_shimmed: shim,
        };
        self.load_dependency(&dependency, &mut Vec::new())
    }

    /// Flatten `compiled` and everything it imports into one list of styles:
    /// its own styles first, then each import in order.
    pub fn resolve(&self, compiled: &CompiledStylesheet) -> Result<Vec<String>> {
        let mut visiting = vec![compiled.module_url.clone()];
        self.resolve_with(compiled, &mut visiting)
    }

    /// Cache keys of every stylesheet loaded so far, in load order.
    pub fn loaded_stylesheets(&self) -> Vec<String> {
        self.lock_cache().keys().cloned().collect()
    }

    fn resolve_with(&self, compiled: &CompiledStylesheet, visiting: &mut Vec<String>) -> Result<Vec<String>> {
        let mut styles = compiled.styles.clone();
        for dependency in &compiled.dependencies {
            styles.extend(self.load_dependency(dependency, visiting)?);
        }
        Ok(styles)
    }

    fn load_dependency(&self, dependency: &StylesheetDependency, visiting: &mut Vec<String>) -> Result<Vec<String>> {
        let cache_key = dependency.cache_key();
        if let Some(styles) = self.lock_cache().get(&cache_key) {
            tracing::trace!(url = %dependency.module_url, "stylesheet cache hit");
            return Ok(styles.clone());
        }
        if visiting.contains(&dependency.module_url) {
            return Err(StyleError::CyclicImport(dependency.module_url.clone()));
        }

        tracing::debug!(url = %dependency.module_url, shim = dependency.is_shimmed, "loading stylesheet");
        let css_text = self.loader.get(&dependency.module_url)?;
        let compiled = self
            .compiler
            .compile_stylesheet(&dependency.module_url, &css_text, dependency.is_shimmed);

        visiting.push(dependency.module_url.clone());
        let styles = self.resolve_with(&compiled, visiting);
        visiting.pop();
        let styles = styles?;

        self.lock_cache().insert(cache_key, styles.clone());
        Ok(styles)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, IndexMap<String, Vec<String>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
