//! Configuration loaded from `~/.pdl-repl/config.yaml`.
//!
//! ```yaml
//! api_key: "..."
//! api_url: https://api.peopledatalabs.com/v5   # optional
//! repl:
//!   mode: sql          # sql | es | enrich
//!   editor: emacs      # emacs | vi
//!   search:
//!     size: 1
//!     offset: 0
//!     pretty: true
//! ```
//!
//! The file is read once at startup. `set` and `mode` change the in-memory
//! copy only; nothing is written back.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use pdl_http::{Mode, DEFAULT_API_URL};

const CONFIG_DIR_NAME: &str = ".pdl-repl";
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("No config file found at {}, aborting.", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// Directory holding the config file and per-mode history files.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Config file path used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Line editing key bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Emacs,
    Vi,
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub api_key: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub repl: ReplSettings,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

impl Config {
    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

/// The `repl` section: everything the REPL may change at runtime.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReplSettings {
    pub mode: Mode,
    pub editor: EditorMode,
    pub search: SearchSettings,
}

/// Search settings. The three known keys are typed; anything else lands in
/// `extra` as a string and has no effect on queries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSearchSettings")]
pub struct SearchSettings {
    pub size: u32,
    pub offset: u32,
    pub pretty: bool,
    pub extra: BTreeMap<String, String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            size: 1,
            offset: 0,
            pretty: true,
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawSearchSettings {
    #[serde(default = "default_size")]
    size: u32,
    #[serde(default)]
    offset: u32,
    #[serde(default = "default_pretty")]
    pretty: bool,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

fn default_size() -> u32 {
    1
}

fn default_pretty() -> bool {
    true
}

impl From<RawSearchSettings> for SearchSettings {
    fn from(raw: RawSearchSettings) -> Self {
        let extra = raw
            .extra
            .into_iter()
            .map(|(k, v)| (k, yaml_scalar_to_string(&v)))
            .collect();

        Self {
            size: raw.size,
            offset: raw.offset,
            pretty: raw.pretty,
            extra,
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// A typed assignment produced by the `set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    Size(u32),
    Offset(u32),
    Pretty(bool),
    Mode(Mode),
    Other { name: String, value: String },
}

impl ReplSettings {
    pub fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::Size(size) => self.search.size = size,
            Setting::Offset(offset) => self.search.offset = offset,
            Setting::Pretty(pretty) => self.search.pretty = pretty,
            Setting::Mode(mode) => self.mode = mode,
            Setting::Other { name, value } => {
                self.search.extra.insert(name, value);
            }
        }
    }

    /// One-line status shown beside the prompt, e.g. `size:1 offset:0 pretty:true`.
    pub fn summary(&self) -> String {
        let mut status = format!(
            "size:{} offset:{} pretty:{}",
            self.search.size, self.search.offset, self.search.pretty
        );
        for (name, value) in &self.search.extra {
            let _ = write!(status, " {}:{}", name, value);
        }
        status
    }
}
