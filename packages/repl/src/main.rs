use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// pdl-repl - Interactive REPL for the People Data Labs person API
#[derive(Parser, Debug)]
#[command(name = "pdl-repl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, default_value_os_t = pdl_repl::config::default_config_path())]
    config: PathBuf,
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr so they never mix with query results; RUST_LOG overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = pdl_repl::run(&args.config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
