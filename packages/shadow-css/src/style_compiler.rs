//! Style Compiler
//!
//! Decides which styles of a component get shimmed, and with which
//! attributes. Emulated encapsulation shims against the attribute templates
//! [`CONTENT_ATTR`] / [`HOST_ATTR`]; the `%COMP%` placeholder is swapped for
//! the component id when the styles are instantiated for a component.

use serde::Deserialize;

use crate::shadow_css::ShadowCss;
use crate::style_url_resolver::{extract_style_urls, is_style_url_resolvable, resolve_url};

pub const COMPONENT_VARIABLE: &str = "%COMP%";
pub const HOST_ATTR: &str = "_nghost-%COMP%";
pub const CONTENT_ATTR: &str = "_ngcontent-%COMP%";

const SHIM_SUFFIX: &str = ".shim";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ViewEncapsulation {
    /// Styles are shimmed with the content/host attributes.
    #[default]
    Emulated,
    /// Styles are global.
    None,
    /// Native shadow DOM; styles are used as written.
    ShadowDom,
}

/// Style metadata of a single component.
#[derive(Debug, Clone, Default)]
pub struct ComponentStyles {
    /// Component class name
    pub name: String,
    /// Url of the module declaring the component; style urls are relative to it
    pub module_url: String,
    pub encapsulation: ViewEncapsulation,
    /// Inline styles
    pub styles: Vec<String>,
    pub style_urls: Vec<String>,
}

/// A stylesheet that still has to be loaded and compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetDependency {
    pub module_url: String,
    pub is_shimmed: bool,
}

impl StylesheetDependency {
    /// Shimmed and unshimmed compilations of one url are different stylesheets.
    pub fn cache_key(&self) -> String {
        if self.is_shimmed {
            format!("{}{}", self.module_url, SHIM_SUFFIX)
        } else {
            self.module_url.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStylesheet {
    /// Name of the variable holding the styles in generated code
    pub styles_var: String,
    pub module_url: String,
    /// Compiled styles, in source order
    pub styles: Vec<String>,
    /// Imported stylesheets, to be appended after `styles`
    pub dependencies: Vec<StylesheetDependency>,
}

#[derive(Debug, Clone)]
pub struct StyleCompiler {
    shadow_css: ShadowCss,
    content_attr: String,
    host_attr: String,
}

impl StyleCompiler {
    /// Shims against the [`CONTENT_ATTR`] / [`HOST_ATTR`] templates.
    pub fn new(shadow_css: ShadowCss) -> Self {
        Self::with_attrs(shadow_css, CONTENT_ATTR, HOST_ATTR)
    }

    /// Shims against fixed attribute names instead of the templates.
    pub fn with_attrs(shadow_css: ShadowCss, content_attr: &str, host_attr: &str) -> Self {
        StyleCompiler {
            shadow_css,
            content_attr: content_attr.to_string(),
            host_attr: host_attr.to_string(),
        }
    }

    pub fn shadow_css(&self) -> &ShadowCss {
        &self.shadow_css
    }

    /// `(content, host)` attributes the styles are shimmed with.
    pub fn attrs(&self) -> (&str, &str) {
        (&self.content_attr, &self.host_attr)
    }

    pub fn compile_component(&self, component: &ComponentStyles) -> CompiledStylesheet {
        let shim = component.encapsulation == ViewEncapsulation::Emulated;
        let style_urls = component
            .style_urls
            .iter()
            .filter(|url| is_style_url_resolvable(Some(url.as_str())))
            .map(|url| resolve_url(&component.module_url, url))
            .collect();
        self.compile_styles(
            styles_var_name(Some(component.name.as_str())),
            &component.module_url,
            &component.styles,
            style_urls,
            shim,
        )
    }

    /// Compile a standalone stylesheet; its resolvable `@import`s become
    /// dependencies compiled with the same `shim` setting.
    pub fn compile_stylesheet(&self, stylesheet_url: &str, css_text: &str, shim: bool) -> CompiledStylesheet {
        let style_with_imports = extract_style_urls(stylesheet_url, css_text);
        tracing::debug!(
            url = stylesheet_url,
            imports = style_with_imports.style_urls.len(),
            shim,
            "compiling stylesheet"
        );
        self.compile_styles(
            styles_var_name(None),
            stylesheet_url,
            std::slice::from_ref(&style_with_imports.style),
            style_with_imports.style_urls,
            shim,
        )
    }

    fn compile_styles(
        &self,
        styles_var: String,
        module_url: &str,
        plain_styles: &[String],
        style_urls: Vec<String>,
        shim: bool,
    ) -> CompiledStylesheet {
        let styles = plain_styles
            .iter()
            .map(|style| self.shim_if_needed(style, shim))
            .collect();
        let dependencies = style_urls
            .into_iter()
            .map(|module_url| StylesheetDependency {
                module_url,
                is_shimmed: shim,
            })
            .collect();

        CompiledStylesheet {
            styles_var,
            module_url: module_url.to_string(),
            styles,
            dependencies,
        }
    }

    fn shim_if_needed(&self, style: &str, shim: bool) -> String {
        if shim {
            self.shadow_css
                .shim_css_text(style, &self.content_attr, &self.host_attr)
        } else {
            style.to_string()
        }
    }
}

impl Default for StyleCompiler {
    fn default() -> Self {
        Self::new(ShadowCss::new())
    }
}

fn styles_var_name(component_name: Option<&str>) -> String {
    match component_name {
        Some(name) => format!("styles_{}", name),
        None => "styles".to_string(),
    }
}

/// Url of the module holding the compiled form of `stylesheet_url`.
pub fn styles_module_url(stylesheet_url: &str, shim: bool, suffix: &str) -> String {
    if shim {
        format!("{}{}{}", stylesheet_url, SHIM_SUFFIX, suffix)
    } else {
        format!("{}{}", stylesheet_url, suffix)
    }
}

/// `(content, host)` attribute names for a component id.
pub fn component_attrs(component_id: &str) -> (String, String) {
    (
        CONTENT_ATTR.replace(COMPONENT_VARIABLE, component_id),
        HOST_ATTR.replace(COMPONENT_VARIABLE, component_id),
    )
}

/// Replace the `%COMP%` placeholder of compiled styles with a component id.
pub fn instantiate_styles(styles: &[String], component_id: &str) -> Vec<String> {
    styles
        .iter()
        .map(|style| style.replace(COMPONENT_VARIABLE, component_id))
        .collect()
}

pub fn compile_styles(styles: &[String], selector: &str, host_selector: &str) -> Vec<String> {
    let shadow_css = ShadowCss::new();
    styles
        .iter()
        .map(|style| shadow_css.shim_css_text(style, selector, host_selector))
        .collect()
}

/// Encapsulates a CSS stylesheet with emulated view encapsulation.
pub fn encapsulate_style(style: &str, component_identifier: Option<&str>) -> String {
    let shadow_css = ShadowCss::new();
    let (selector, host_selector) = match component_identifier {
        Some(id) => component_attrs(id),
        None => (CONTENT_ATTR.to_string(), HOST_ATTR.to_string()),
    };
    shadow_css.shim_css_text(style, &selector, &host_selector)
}
