/**
 * Shadow CSS CLI - ngshim
 *
 * Scopes stylesheets for emulated view encapsulation
 */
use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, Command};
use shadow_css_cli::{perform_shim, CliArgs, ShimOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("ngshim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scope component stylesheets to a host/content attribute pair")
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .num_args(1..)
                .required(true)
                .help("Stylesheets to shim (paths or glob patterns)"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory stylesheet urls and imports are resolved from [default: .]"),
        )
        .arg(
            Arg::new("scope")
                .long("scope")
                .value_name("ATTR")
                .help("Content attribute (scope selector in --loose mode)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("ATTR")
                .help("Host attribute [default: the scope]"),
        )
        .arg(
            Arg::new("component-id")
                .long("component-id")
                .value_name("ID")
                .help("Derive _ngcontent-<ID> / _nghost-<ID> attributes"),
        )
        .arg(
            Arg::new("no-shim")
                .long("no-shim")
                .action(ArgAction::SetTrue)
                .help("Only flatten imports, do not scope"),
        )
        .arg(
            Arg::new("loose")
                .long("loose")
                .action(ArgAction::SetTrue)
                .help("Prefix selectors with the scope instead of adding attributes"),
        )
        .arg(
            Arg::new("suffix")
                .long("suffix")
                .value_name("SUFFIX")
                .help("Suffix of the output files [default: .css]"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Write outputs here instead of printing them"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("JSON config file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let args = CliArgs {
        files: matches
            .get_many::<String>("files")
            .map(|files| files.cloned().collect())
            .unwrap_or_default(),
        root: matches.get_one::<PathBuf>("root").cloned(),
        scope: matches.get_one::<String>("scope").cloned(),
        host: matches.get_one::<String>("host").cloned(),
        component_id: matches.get_one::<String>("component-id").cloned(),
        no_shim: matches.get_flag("no-shim"),
        loose: matches.get_flag("loose"),
        suffix: matches.get_one::<String>("suffix").cloned(),
        out_dir: matches.get_one::<PathBuf>("out-dir").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
    };

    if let Err(err) = run(args) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let options = ShimOptions::from_args(args)?;
    for output in perform_shim(&options)? {
        match output.output_path {
            Some(path) => tracing::info!(url = %output.url, path = %path.display(), "wrote stylesheet"),
            None => println!("{}", output.css),
        }
    }
    Ok(())
}
