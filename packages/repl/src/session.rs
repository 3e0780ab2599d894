//! Per-mode line-editing session descriptors.
//!
//! Each mode gets its own session with its own history file and input
//! highlighting. Descriptors are plain data; the terminal host turns them into
//! reedline instances once at startup.

use std::path::{Path, PathBuf};

use pdl_http::Mode;

/// How input text is highlighted while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSyntax {
    Sql,
    Json,
    UrlEncoded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDescriptor {
    pub mode: Mode,
    pub history_file: &'static str,
    pub syntax: InputSyntax,
    /// Tab completion of directive and setting names.
    pub completion: bool,
}

impl SessionDescriptor {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Sql => Self {
                mode,
                history_file: "sql.history",
                syntax: InputSyntax::Sql,
                completion: true,
            },
            Mode::Es => Self {
                mode,
                history_file: "es.history",
                syntax: InputSyntax::Json,
                completion: false,
            },
            Mode::Enrich => Self {
                mode,
                history_file: "enrich.history",
                syntax: InputSyntax::UrlEncoded,
                completion: false,
            },
        }
    }

    pub fn history_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.history_file)
    }
}

/// Descriptors for every mode, in `Mode::ALL` order.
pub fn all() -> [SessionDescriptor; 3] {
    Mode::ALL.map(SessionDescriptor::for_mode)
}
