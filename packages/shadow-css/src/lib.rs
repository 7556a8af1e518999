#![deny(clippy::all)]

/**
 * Shadow CSS - emulated view encapsulation
 *
 * Rewrites component stylesheets so that their selectors only match the
 * elements rendered by that component.
 */

// Scoping engine (pipeline stages in the order they run)
pub mod polyfills;
pub mod host_selectors;
pub mod css_rules;
pub mod shadow_css;
pub mod util;

// Stylesheet compilation around the engine
pub mod config;
pub mod error;
pub mod resource_loader;
pub mod style_compiler;
pub mod style_url_resolver;

// Re-exports
pub use config::ShadowCssConfig;
pub use css_rules::{process_rules, CssRule};
pub use error::{Result, StyleError};
pub use resource_loader::{ResourceLoader, StylesheetResolver};
pub use shadow_css::ShadowCss;
pub use style_compiler::{
    compile_styles, encapsulate_style, ComponentStyles, CompiledStylesheet, StyleCompiler,
    ViewEncapsulation,
};
