//! Query modes supported by the person API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The query dialect the REPL is currently targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// SQL-like search, sent as the `sql` parameter.
    #[default]
    Sql,
    /// ElasticSearch query body, sent as the `query` parameter.
    Es,
    /// URL-encoded enrichment parameters.
    Enrich,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Sql, Mode::Es, Mode::Enrich];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Sql => "sql",
            Mode::Es => "es",
            Mode::Enrich => "enrich",
        }
    }

    /// Fixed message shown when the API rejects a query in this mode.
    pub fn rejection_message(self) -> &'static str {
        match self {
            Mode::Sql => "Invalid SQL query.",
            Mode::Es => "Invalid ES query.",
            Mode::Enrich => "Invalid query.",
        }
    }

    /// Comma-separated list of every mode name, for error messages.
    pub fn names() -> String {
        Mode::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}
