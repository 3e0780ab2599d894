//! Platform-independent REPL core.
//!
//! This module contains the main REPL logic, which interacts only through
//! the `IoHost` trait so the same loop runs against a terminal or a test host.
//! The core owns the settings and the last result; nothing else mutates them.

use tracing::{info, warn};

use pdl_http::{HttpExecutor, PdlClient, QueryRequest, ReqwestExecutor};

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::commands::{self, Directive};
use crate::config::ReplSettings;
use crate::io::{IoError, IoHost, Output, PromptConfig, Signal};
use crate::validator;

const FAREWELL: &str = "Exiting.";
const NOTHING_TO_COPY: &str = "No data to copy.";

/// The platform-independent REPL core.
pub struct ReplCore<E = ReqwestExecutor, C = SystemClipboard> {
    settings: ReplSettings,
    client: PdlClient<E>,
    clipboard: C,
    last_result: String,
}

impl<E: HttpExecutor, C: Clipboard> ReplCore<E, C> {
    pub fn new(settings: ReplSettings, client: PdlClient<E>, clipboard: C) -> Self {
        Self {
            settings,
            client,
            clipboard,
            last_result: String::new(),
        }
    }

    /// Run the REPL loop until end of input.
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<(), IoError> {
        loop {
            self.update_prompt(io)?;
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                match signal {
                    Signal::Eof => {
                        io.write_output(Output::info(FAREWELL))?;
                        io.flush()?;
                        return Ok(());
                    }
                    Signal::Interrupt => continue,
                }
            }

            let input = match io.read_input()? {
                Some(input) => input,
                None => continue,
            };

            let text = validator::join_continued_lines(&input.line);
            let line = text.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(output) = self.dispatch(line) {
                io.write_output(output)?;
            }

            io.flush()?;
        }
    }

    /// Handle one non-empty line, returning what to show the user.
    pub fn dispatch(&mut self, line: &str) -> Option<Output> {
        let directive = match commands::parse(line) {
            Ok(directive) => directive,
            Err(e) => return Some(Output::error(e.to_string())),
        };

        match directive {
            Directive::Help => Some(Output::normal(commands::format_help())),
            Directive::Copy => Some(self.copy_last_result()),
            Directive::ModeChange(mode) => {
                info!(from = %self.settings.mode, to = %mode, "mode changed");
                self.settings.mode = mode;
                None
            }
            Directive::SetVar(setting) => {
                info!(?setting, "setting changed");
                self.settings.apply(setting);
                None
            }
            Directive::Query(text) => Some(self.run_query(text)),
        }
    }

    fn copy_last_result(&mut self) -> Output {
        if self.last_result.is_empty() {
            return Output::info(NOTHING_TO_COPY);
        }

        match self.clipboard.copy(&self.last_result) {
            Ok(()) => Output::info("Copied to clipboard."),
            Err(e) => {
                warn!(error = %e, "copy failed");
                Output::error(e.to_string())
            }
        }
    }

    fn run_query(&mut self, text: String) -> Output {
        let query = QueryRequest {
            mode: self.settings.mode,
            text,
            size: self.settings.search.size,
            offset: self.settings.search.offset,
        };

        match self.client.execute(&query) {
            Ok(value) => {
                let rendered = if self.settings.search.pretty {
                    serde_json::to_string_pretty(&value)
                } else {
                    serde_json::to_string(&value)
                };
                match rendered {
                    Ok(text) => {
                        self.last_result = text.clone();
                        Output::json(text)
                    }
                    Err(e) => Output::error(format!("Failed to format result: {}", e)),
                }
            }
            Err(e) => Output::error(e.to_string()),
        }
    }

    pub fn settings(&self) -> &ReplSettings {
        &self.settings
    }

    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    fn update_prompt(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        io.write_prompt(PromptConfig {
            mode: self.settings.mode,
            status: self.settings.summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::{RecordingClipboard, UnavailableClipboard};
    use crate::config::SearchSettings;
    use crate::io::{OutputStyle, TestHost};
    use pdl_http::executor::mock::MockExecutor;
    use pdl_http::{Endpoints, Mode, DEFAULT_API_URL};
    use serde_json::json;

    fn core_with<C: Clipboard>(
        mock: &MockExecutor,
        clipboard: C,
    ) -> ReplCore<MockExecutor, C> {
        let client = PdlClient::with_executor(
            mock.clone(),
            "KEY",
            Endpoints::new(DEFAULT_API_URL).unwrap(),
        );
        ReplCore::new(ReplSettings::default(), client, clipboard)
    }

    fn core(mock: &MockExecutor) -> (ReplCore<MockExecutor, RecordingClipboard>, RecordingClipboard) {
        let clipboard = RecordingClipboard::new();
        (core_with(mock, clipboard.clone()), clipboard)
    }

    fn run_lines(
        core: &mut ReplCore<MockExecutor, impl Clipboard>,
        lines: &[&str],
    ) -> TestHost {
        let mut host = TestHost::new();
        host.queue_inputs(lines.iter().copied());
        core.run(&mut host).unwrap();
        host
    }

    #[test]
    fn eof_prints_farewell() {
        let (mut core, _) = core(&MockExecutor::new());
        let host = run_lines(&mut core, &[]);

        assert_eq!(host.output(), &[Output::info("Exiting.")]);
    }

    #[test]
    fn interrupt_keeps_reading() {
        let mock = MockExecutor::new();
        let (mut core, _) = core(&mock);
        let mut host = TestHost::new();
        host.queue_signal(Signal::Interrupt);
        host.queue_input("mode es");
        host.queue_signal(Signal::Interrupt);

        core.run(&mut host).unwrap();

        assert_eq!(core.settings().mode, Mode::Es);
        assert_eq!(host.output(), &[Output::info("Exiting.")]);
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn blank_input_is_swallowed() {
        let mock = MockExecutor::new();
        let (mut core, _) = core(&mock);
        let host = run_lines(&mut core, &["", "   ", "\t\n"]);

        assert_eq!(host.output().len(), 1);
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn continued_query_is_sent_without_backslashes() {
        let mock = MockExecutor::new().with_json(json!({}));
        let (mut core, _) = core(&mock);

        run_lines(&mut core, &["SELECT * \\\nFROM person \\\nLIMIT 1"]);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].query_value("sql"),
            Some("SELECT * \nFROM person \nLIMIT 1")
        );
    }

    #[test]
    fn continued_directive_still_parses() {
        let (mut core, _) = core(&MockExecutor::new());

        run_lines(&mut core, &["set size \\\n7"]);

        assert_eq!(core.settings().search.size, 7);
    }

    #[test]
    fn prompt_follows_mode_and_settings() {
        let (mut core, _) = core(&MockExecutor::new());
        let host = run_lines(&mut core, &["mode enrich", "set size 3"]);

        let prompts = host.prompts();
        assert_eq!(prompts[0].mode, Mode::Sql);
        assert_eq!(prompts[1].mode, Mode::Enrich);
        assert_eq!(prompts[2].status, "size:3 offset:0 pretty:true");
    }

    #[test]
    fn mode_change_touches_only_mode() {
        for mode in Mode::ALL {
            let (mut core, _) = core(&MockExecutor::new());
            let before = core.settings().clone();

            core.dispatch(&format!("mode {}", mode));

            let mut expected = before;
            expected.mode = mode;
            assert_eq!(core.settings(), &expected);
        }
    }

    #[test]
    fn bad_mode_leaves_mode_unchanged() {
        let (mut core, _) = core(&MockExecutor::new());
        core.dispatch("mode es");

        let invalid = core.dispatch("mode graphql").unwrap();
        let malformed = core.dispatch("mode sql es").unwrap();

        assert_eq!(core.settings().mode, Mode::Es);
        assert_eq!(invalid.style, OutputStyle::Error);
        assert!(invalid.text.contains("sql, es, enrich"));
        assert_eq!(malformed, Output::error("Invalid mode command"));
    }

    #[test]
    fn set_updates_typed_settings() {
        let (mut core, _) = core(&MockExecutor::new());

        assert!(core.dispatch("set size 5").is_none());
        assert!(core.dispatch("set offset 20").is_none());
        assert!(core.dispatch("set pretty FALSE").is_none());

        let search = &core.settings().search;
        assert_eq!(search.size, 5);
        assert_eq!(search.offset, 20);
        assert!(!search.pretty);

        core.dispatch("set pretty True");
        assert!(core.settings().search.pretty);
    }

    #[test]
    fn invalid_set_changes_nothing() {
        let (mut core, _) = core(&MockExecutor::new());

        let output = core.dispatch("set size lots").unwrap();

        assert_eq!(output, Output::error("Invalid set command"));
        assert_eq!(core.settings().search, SearchSettings::default());
    }

    #[test]
    fn unknown_setting_is_stored_without_effect() {
        let mock = MockExecutor::new().with_json(json!({}));
        let (mut core, _) = core(&mock);

        core.dispatch("set dataset resume");
        core.dispatch("SELECT 1");

        assert_eq!(
            core.settings().search.extra.get("dataset").map(String::as_str),
            Some("resume")
        );
        assert_eq!(mock.requests()[0].query_value("dataset"), None);
    }

    #[test]
    fn help_prints_static_text() {
        let (mut core, _) = core(&MockExecutor::new());

        let output = core.dispatch("help").unwrap();

        assert_eq!(output, Output::normal(commands::format_help()));
    }

    #[test]
    fn copy_without_result_skips_clipboard() {
        let (mut core, clipboard) = core(&MockExecutor::new());

        let output = core.dispatch("copy").unwrap();

        assert_eq!(output, Output::info("No data to copy."));
        assert!(clipboard.copies().is_empty());
    }

    #[test]
    fn copy_writes_last_result_once() {
        let mock = MockExecutor::new().with_json(json!({"a": 1}));
        let (mut core, clipboard) = core(&mock);

        core.dispatch("SELECT 1");
        core.dispatch("copy");

        assert_eq!(clipboard.copies(), vec![core.last_result().to_string()]);
    }

    #[test]
    fn copy_failure_is_reported() {
        let mock = MockExecutor::new().with_json(json!({"a": 1}));
        let mut core = core_with(&mock, UnavailableClipboard);

        core.dispatch("SELECT 1");
        let output = core.dispatch("copy").unwrap();

        assert_eq!(output.style, OutputStyle::Error);
        assert!(output.text.contains("no display"));
    }

    #[test]
    fn pretty_result_is_indented() {
        let mock = MockExecutor::new().with_json(json!({"a": 1}));
        let (mut core, _) = core(&mock);

        let output = core.dispatch("SELECT 1").unwrap();

        assert_eq!(output, Output::json("{\n  \"a\": 1\n}"));
        assert_eq!(core.last_result(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn compact_result_is_single_line() {
        let mock = MockExecutor::new().with_json(json!({"a": 1}));
        let (mut core, _) = core(&mock);
        core.dispatch("set pretty false");

        let output = core.dispatch("SELECT 1").unwrap();

        assert_eq!(output, Output::json(r#"{"a":1}"#));
        assert_eq!(core.last_result(), r#"{"a":1}"#);
    }

    #[test]
    fn rejection_shows_mode_message_and_keeps_last_result() {
        let mock = MockExecutor::new().with_status(400);
        let (mut core, _) = core(&mock);
        core.last_result = r#"{"previous":true}"#.to_string();

        let mut outputs = Vec::new();
        for mode in Mode::ALL {
            core.dispatch(&format!("mode {}", mode));
            outputs.push(core.dispatch("anything").unwrap());
        }

        assert_eq!(
            outputs,
            vec![
                Output::error("Invalid SQL query."),
                Output::error("Invalid ES query."),
                Output::error("Invalid query."),
            ]
        );
        assert_eq!(core.last_result(), r#"{"previous":true}"#);
    }

    #[test]
    fn network_failure_is_distinct_from_rejection() {
        let mock = MockExecutor::new().timing_out();
        let (mut core, _) = core(&mock);

        let output = core.dispatch("SELECT 1").unwrap();

        assert_eq!(output.style, OutputStyle::Error);
        assert!(output.text.starts_with("Network error"));
        assert!(core.last_result().is_empty());
    }

    #[test]
    fn directives_never_query() {
        let mock = MockExecutor::new().with_json(json!({}));
        let (mut core, _) = core(&mock);

        run_lines(
            &mut core,
            &["help", "copy", "mode es", "set size 2", "set bogus", "mode nope"],
        );

        assert!(mock.requests().is_empty());
    }

    #[test]
    fn end_to_end_session() {
        let mock = MockExecutor::new().with_json(json!({"status": 200, "data": [{"id": "x"}]}));
        let (mut core, clipboard) = core(&mock);

        let host = run_lines(
            &mut core,
            &["mode es", "set size 10", r#"{"query":"x"}"#, "copy"],
        );

        assert_eq!(core.settings().mode, Mode::Es);
        assert_eq!(core.settings().search.size, 10);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, *Endpoints::new(DEFAULT_API_URL).unwrap().search());
        assert_eq!(requests[0].query_value("query"), Some(r#"{"query":"x"}"#));
        assert_eq!(requests[0].query_value("size"), Some("10"));
        assert_eq!(requests[0].query_value("from"), Some("0"));

        let printed = host.output_with_style(OutputStyle::Json);
        assert_eq!(printed.len(), 1);
        assert_eq!(clipboard.copies(), vec![printed[0].to_string()]);
        assert!(host.errors().is_empty());
    }

    #[test]
    fn end_to_end_rejection_in_es_mode() {
        let mock = MockExecutor::new().with_status(400);
        let (mut core, clipboard) = core(&mock);

        let host = run_lines(
            &mut core,
            &["mode es", "set size 10", r#"{"query":"x"}"#, "copy"],
        );

        assert_eq!(host.errors(), vec!["Invalid ES query."]);
        assert!(host
            .output_with_style(OutputStyle::Info)
            .contains(&"No data to copy."));
        assert!(clipboard.copies().is_empty());
    }
}
