//! # pdl-repl
//!
//! An interactive REPL for the People Data Labs person API.
//!
//! ## Features
//!
//! - Three query modes: `sql`, `es` (ElasticSearch JSON) and `enrich`
//!   (URL-encoded parameters)
//! - Syntax-highlighted JSON results, pretty or compact
//! - `copy` the last result to the system clipboard
//! - Per-mode history, highlighting and multi-line input
//!
//! ## Usage
//!
//! ```bash
//! # Uses ~/.pdl-repl/config.yaml unless --config is given
//! pdl-repl --config ./config.yaml
//!
//! # Inside the REPL:
//! sql> SELECT * FROM person WHERE job_company_name = 'people data labs'
//! sql> mode es
//! es> set size 10
//! es> {"query": {"term": {"job_title_role": "engineering"}}}
//! es> copy
//! ```

use std::path::Path;

use tracing::info;

pub mod clipboard;
pub mod commands;
pub mod completer;
pub mod config;
pub mod highlighter;
pub mod host;
pub mod io;
pub mod repl;
pub mod session;
pub mod validator;

pub use crate::config::{Config, ConfigError};
pub use crate::repl::ReplCore;

/// Errors that stop the REPL from starting or running.
#[derive(thiserror::Error, Debug)]
pub enum ReplError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot create API client: {0}")]
    Client(#[from] pdl_http::Error),

    #[error(transparent)]
    Io(#[from] io::IoError),
}

/// Load the config at `config_path` and run the REPL on the terminal until
/// end of input.
pub fn run(config_path: &Path) -> Result<(), ReplError> {
    let config = Config::load(config_path)?;
    info!(path = %config_path.display(), mode = %config.repl.mode, "config loaded");

    let client = pdl_http::PdlClient::new(config.api_key, &config.api_url)?;
    let mut host = host::TerminalHost::new(config.repl.editor, &config::config_dir());
    let mut core = ReplCore::new(config.repl, client, clipboard::SystemClipboard::new());

    core.run(&mut host)?;
    Ok(())
}
