use reedline::{Completer, Span, Suggestion};

use pdl_http::Mode;

use crate::commands::DIRECTIVES;

const SETTINGS: [&str; 3] = ["size", "offset", "pretty"];

/// Word completer for directive keywords, mode names and setting names.
///
/// Completes the word under the cursor wherever it is in the line,
/// case-insensitively.
pub struct ReplCompleter {
    words: Vec<String>,
}

impl ReplCompleter {
    pub fn new() -> Self {
        let words = DIRECTIVES
            .iter()
            .copied()
            .chain(Mode::ALL.iter().map(|m| m.as_str()))
            .chain(SETTINGS)
            .map(String::from)
            .collect();

        Self { words }
    }
}

impl Default for ReplCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for ReplCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_pos = &line[..pos];
        let start = line_to_pos
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let prefix = line_to_pos[start..].to_ascii_lowercase();

        if prefix.is_empty() {
            return Vec::new();
        }

        self.words
            .iter()
            .filter(|word| word.starts_with(&prefix))
            .map(|word| Suggestion {
                value: word.clone(),
                description: Some(word_description(word)),
                span: Span::new(start, pos),
                append_whitespace: true,
                ..Default::default()
            })
            .collect()
    }
}

fn word_description(word: &str) -> String {
    match word {
        "help" => "Show help".to_string(),
        "copy" => "Copy last result to clipboard".to_string(),
        "mode" => "Change REPL mode".to_string(),
        "set" => "Change a setting".to_string(),
        "sql" => "SQL search mode".to_string(),
        "es" => "ElasticSearch query mode".to_string(),
        "enrich" => "Enrichment mode".to_string(),
        "size" => "Number of results".to_string(),
        "offset" => "Index of the first result".to_string(),
        "pretty" => "Indent JSON output".to_string(),
        _ => String::new(),
    }
}
