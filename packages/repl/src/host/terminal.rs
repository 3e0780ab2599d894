//! Terminal host implementation using Reedline.
//!
//! One line editor is kept per mode, each with its own history file,
//! highlighter and (for SQL) completion menu. The editor for the active mode
//! is picked from the prompt configuration before every read.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, default_vi_insert_keybindings, default_vi_normal_keybindings,
    ColumnarMenu, EditCommand, EditMode, Emacs, FileBackedHistory, KeyCode, KeyModifiers,
    Keybindings, MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, Reedline, ReedlineEvent, ReedlineMenu, Signal as ReedlineSignal,
    Vi,
};
use tracing::warn;

use pdl_http::Mode;

use crate::completer::ReplCompleter;
use crate::config::EditorMode;
use crate::highlighter::{highlight_json, ReplHighlighter};
use crate::io::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};
use crate::session::{self, SessionDescriptor};
use crate::validator::BlockValidator;

const HISTORY_CAPACITY: usize = 1000;
const COMPLETION_MENU: &str = "completion_menu";

/// Terminal host using Reedline for interactive I/O.
pub struct TerminalHost {
    sessions: HashMap<Mode, Reedline>,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    current_prompt: PromptConfig,
}

impl TerminalHost {
    /// Create a terminal host with one session per mode.
    ///
    /// History files are kept in `history_dir`; a history file that cannot be
    /// opened only disables history for that mode.
    pub fn new(editor: EditorMode, history_dir: &Path) -> Self {
        if let Err(e) = std::fs::create_dir_all(history_dir) {
            warn!(dir = %history_dir.display(), error = %e, "cannot create history directory");
        }

        let sessions = session::all()
            .into_iter()
            .map(|descriptor| (descriptor.mode, build_session(&descriptor, editor, history_dir)))
            .collect();

        Self {
            sessions,
            pending_input: None,
            pending_signal: None,
            current_prompt: PromptConfig::default(),
        }
    }
}

fn build_session(descriptor: &SessionDescriptor, editor: EditorMode, history_dir: &Path) -> Reedline {
    let mut line_editor = Reedline::create()
        .with_highlighter(Box::new(ReplHighlighter::new(descriptor.syntax)))
        .with_validator(Box::new(BlockValidator))
        .with_edit_mode(edit_mode(editor, descriptor.completion));

    if descriptor.completion {
        let completion_menu = Box::new(
            ColumnarMenu::default()
                .with_name(COMPLETION_MENU)
                .with_text_style(Style::new().fg(Color::Cyan))
                .with_selected_text_style(Style::new().fg(Color::Black).on(Color::Cyan).bold()),
        );
        line_editor = line_editor
            .with_completer(Box::new(ReplCompleter::new()))
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu));
    }

    let history_path = descriptor.history_path(history_dir);
    match FileBackedHistory::with_file(HISTORY_CAPACITY, history_path.clone()) {
        Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
        Err(e) => {
            warn!(path = %history_path.display(), error = %e, "history disabled");
        }
    }

    line_editor
}

fn edit_mode(editor: EditorMode, completion: bool) -> Box<dyn EditMode> {
    let add_bindings = |keybindings: &mut Keybindings| {
        keybindings.add_binding(
            KeyModifiers::ALT,
            KeyCode::Enter,
            ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
        );
        if completion {
            keybindings.add_binding(
                KeyModifiers::NONE,
                KeyCode::Tab,
                ReedlineEvent::UntilFound(vec![
                    ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                    ReedlineEvent::MenuNext,
                ]),
            );
        }
    };

    match editor {
        EditorMode::Vi => {
            let mut insert_keybindings = default_vi_insert_keybindings();
            add_bindings(&mut insert_keybindings);
            Box::new(Vi::new(insert_keybindings, default_vi_normal_keybindings()))
        }
        EditorMode::Emacs => {
            let mut keybindings = default_emacs_keybindings();
            add_bindings(&mut keybindings);
            Box::new(Emacs::new(keybindings))
        }
    }
}

impl IoHost for TerminalHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        let prompt = TerminalPrompt::from_config(&self.current_prompt);
        let mode = self.current_prompt.mode;
        let line_editor = self
            .sessions
            .get_mut(&mode)
            .ok_or_else(|| IoError::Io(format!("No session for mode {}", mode)))?;

        match line_editor.read_line(&prompt) {
            Ok(ReedlineSignal::Success(line)) => {
                self.pending_input = Some(InputLine { line });
            }
            Ok(ReedlineSignal::CtrlC) => {
                self.pending_signal = Some(Signal::Interrupt);
            }
            Ok(ReedlineSignal::CtrlD) => {
                self.pending_signal = Some(Signal::Eof);
            }
            Err(e) => {
                return Err(IoError::Io(format!("Reedline error: {}", e)));
            }
        }

        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.pending_input.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        let styled = match output.style {
            OutputStyle::Normal => output.text,
            OutputStyle::Error => {
                format!("{} {}", Color::Red.bold().paint("Error:"), output.text)
            }
            OutputStyle::Info => Color::Cyan.paint(&output.text).to_string(),
            OutputStyle::Json => highlight_json(&output.text),
        };
        println!("{}", styled);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.current_prompt = config;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        io::stdout().flush().map_err(|e| IoError::Io(e.to_string()))
    }
}

/// Prompt implementation for the terminal.
struct TerminalPrompt {
    mode: Mode,
    status: String,
}

impl TerminalPrompt {
    fn from_config(config: &PromptConfig) -> Self {
        Self {
            mode: config.mode,
            status: config.status.clone(),
        }
    }
}

impl Prompt for TerminalPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(Color::Blue.bold().paint(self.mode.as_str()).to_string())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Owned(Color::DarkGray.paint(&self.status).to_string())
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        match edit_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => {
                Cow::Owned(format!("{} ", Color::Green.bold().paint(">")))
            }
            PromptEditMode::Vi(vi_mode) => {
                let indicator = match vi_mode {
                    reedline::PromptViMode::Normal => Color::Blue.bold().paint("[N]>"),
                    reedline::PromptViMode::Insert => Color::Green.bold().paint("[I]>"),
                };
                Cow::Owned(format!("{} ", indicator))
            }
            PromptEditMode::Custom(s) => Cow::Owned(format!("({})> ", s)),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
