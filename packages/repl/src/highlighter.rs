use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::commands::DIRECTIVES;
use crate::session::InputSyntax;

const SQL_KEYWORDS: &[&str] = &[
    "AND", "AS", "ASC", "BETWEEN", "BY", "COUNT", "DESC", "DISTINCT", "EXISTS", "FALSE", "FROM",
    "GROUP", "HAVING", "IN", "IS", "JOIN", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR",
    "ORDER", "SELECT", "TRUE", "WHERE",
];

type Span = (Style, String);

fn key_style() -> Style {
    Style::new().bold().fg(Color::Blue)
}

fn string_style() -> Style {
    Style::new().fg(Color::Green)
}

fn number_style() -> Style {
    Style::new().fg(Color::Yellow)
}

fn literal_style() -> Style {
    Style::new().fg(Color::Magenta)
}

fn keyword_style() -> Style {
    Style::new().bold().fg(Color::Cyan)
}

fn separator_style() -> Style {
    Style::new().fg(Color::DarkGray)
}

/// Render JSON text with ANSI colors for terminal output.
pub fn highlight_json(text: &str) -> String {
    json_spans(text)
        .into_iter()
        .map(|(style, s)| style.paint(s).to_string())
        .collect()
}

/// Collects unstyled characters between styled tokens.
struct Spans {
    spans: Vec<Span>,
    plain: String,
}

impl Spans {
    fn new() -> Self {
        Self {
            spans: Vec::new(),
            plain: String::new(),
        }
    }

    fn plain(&mut self, c: char) {
        self.plain.push(c);
    }

    fn styled(&mut self, style: Style, text: &str) {
        self.flush();
        self.spans.push((style, text.to_string()));
    }

    fn flush(&mut self) {
        if !self.plain.is_empty() {
            self.spans
                .push((Style::new(), std::mem::take(&mut self.plain)));
        }
    }

    fn finish(mut self) -> Vec<Span> {
        self.flush();
        self.spans
    }
}

/// End index (exclusive) of a string literal opened at `start`.
/// An unterminated literal runs to the end of the text.
fn string_end(text: &str, start: usize, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in text[start + quote.len_utf8()..].char_indices() {
        let at = start + quote.len_utf8() + i;
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return at + c.len_utf8();
        }
    }
    text.len()
}

fn word_end(text: &str, start: usize, accept: impl Fn(char) -> bool) -> usize {
    text[start..]
        .char_indices()
        .find(|&(_, c)| !accept(c))
        .map(|(i, _)| start + i)
        .unwrap_or(text.len())
}

fn json_spans(text: &str) -> Vec<Span> {
    let mut out = Spans::new();
    let mut i = 0;

    while let Some(c) = text[i..].chars().next() {
        if c == '"' {
            let end = string_end(text, i, '"');
            let is_key = text[end..].trim_start().starts_with(':');
            let style = if is_key { key_style() } else { string_style() };
            out.styled(style, &text[i..end]);
            i = end;
        } else if c == '-' || c.is_ascii_digit() {
            let end = word_end(text, i + 1, |c| {
                c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
            });
            out.styled(number_style(), &text[i..end]);
            i = end;
        } else if c.is_ascii_alphabetic() {
            let end = word_end(text, i, |c| c.is_ascii_alphanumeric());
            let word = &text[i..end];
            if matches!(word, "true" | "false" | "null") {
                out.styled(literal_style(), word);
            } else {
                word.chars().for_each(|c| out.plain(c));
            }
            i = end;
        } else {
            out.plain(c);
            i += c.len_utf8();
        }
    }

    out.finish()
}

fn sql_spans(text: &str) -> Vec<Span> {
    let mut out = Spans::new();
    let mut i = 0;

    while let Some(c) = text[i..].chars().next() {
        if c == '\'' || c == '"' {
            let end = string_end(text, i, c);
            out.styled(string_style(), &text[i..end]);
            i = end;
        } else if c.is_ascii_digit() {
            let end = word_end(text, i, |c| c.is_ascii_digit() || c == '.');
            out.styled(number_style(), &text[i..end]);
            i = end;
        } else if c.is_alphabetic() || c == '_' {
            let end = word_end(text, i, |c| c.is_alphanumeric() || c == '_' || c == '.');
            let word = &text[i..end];
            if SQL_KEYWORDS.contains(&word.to_ascii_uppercase().as_str()) {
                out.styled(keyword_style(), word);
            } else {
                word.chars().for_each(|c| out.plain(c));
            }
            i = end;
        } else {
            out.plain(c);
            i += c.len_utf8();
        }
    }

    out.finish()
}

fn url_encoded_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();

    for (n, pair) in text.split('&').enumerate() {
        if n > 0 {
            spans.push((separator_style(), "&".to_string()));
        }
        match pair.split_once('=') {
            Some((key, value)) => {
                spans.push((number_style(), key.to_string()));
                spans.push((separator_style(), "=".to_string()));
                if !value.is_empty() {
                    spans.push((string_style(), value.to_string()));
                }
            }
            None if !pair.is_empty() => spans.push((number_style(), pair.to_string())),
            None => {}
        }
    }

    spans
}

/// Input highlighter for one mode's session.
///
/// Directive keywords are highlighted the same way in every mode; anything
/// else is highlighted as the mode's query syntax.
pub struct ReplHighlighter {
    syntax: InputSyntax,
}

impl ReplHighlighter {
    pub fn new(syntax: InputSyntax) -> Self {
        Self { syntax }
    }

    fn directive_spans(line: &str) -> Option<Vec<Span>> {
        let trimmed = line.trim_start();
        let (command, rest) = match trimmed.find(char::is_whitespace) {
            Some(pos) => (&trimmed[..pos], &trimmed[pos..]),
            None => (trimmed, ""),
        };

        let command_lower = command.to_ascii_lowercase();
        if !DIRECTIVES.contains(&command_lower.as_str()) {
            return None;
        }

        let mut spans = Vec::new();
        let indent = &line[..line.len() - trimmed.len()];
        if !indent.is_empty() {
            spans.push((Style::new(), indent.to_string()));
        }
        spans.push((keyword_style(), command.to_string()));
        if !rest.is_empty() {
            let rest_style = match command_lower.as_str() {
                "mode" | "set" => Style::new().fg(Color::Yellow),
                _ => Style::new(),
            };
            spans.push((rest_style, rest.to_string()));
        }
        Some(spans)
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        let spans = Self::directive_spans(line).unwrap_or_else(|| match self.syntax {
            InputSyntax::Json => json_spans(line),
            InputSyntax::Sql => sql_spans(line),
            InputSyntax::UrlEncoded => url_encoded_spans(line),
        });

        for span in spans {
            styled.push(span);
        }
        styled
    }
}
