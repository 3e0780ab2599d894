//! I/O types for the REPL.
//!
//! These types define the interface between the REPL core and its host environment.

use pdl_http::Mode;

/// A line (or multi-line block) of input from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub line: String,
}

/// A signal from the host (Ctrl+C, Ctrl+D).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// User pressed Ctrl+C; the pending input is discarded.
    Interrupt,
    /// User pressed Ctrl+D (end of input).
    Eof,
}

/// Output to be written by the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub style: OutputStyle,
}

impl Output {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Normal,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Info,
        }
    }

    pub fn json(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Json,
        }
    }
}

/// Style hint for output rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Normal output (already contains ANSI codes if applicable).
    #[default]
    Normal,
    /// Error message (host may add red prefix).
    Error,
    /// Informational message (host may style in cyan).
    Info,
    /// Plain JSON text; the host applies syntax highlighting.
    Json,
}

/// Prompt configuration sent from core to host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptConfig {
    /// Active mode; selects the line-editing session.
    pub mode: Mode,
    /// Settings summary shown beside the prompt.
    pub status: String,
}
