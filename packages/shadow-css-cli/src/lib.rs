/**
 * Shadow CSS CLI
 *
 * File system front end for the shim: loads stylesheets (and their
 * imports) from disk and writes the encapsulated output.
 */
pub mod config;
pub mod fs_loader;
pub mod perform_shim;

pub use config::{CliArgs, ShimConfigFile, ShimOptions};
pub use fs_loader::FsResourceLoader;
pub use perform_shim::{perform_shim, ShimOutput};
