use reedline::{ValidationResult, Validator};

/// Keeps reading lines while brackets are open or the last line ends in `\`.
///
/// `{`, `[` and `(` outside string literals must be closed before Enter
/// submits, so a JSON body or a long SQL statement can span several lines.
/// Alt+Enter always inserts a newline instead.
pub struct BlockValidator;

impl Validator for BlockValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        if open_brackets(line) > 0 || ends_with_continuation(line) {
            ValidationResult::Incomplete
        } else {
            ValidationResult::Complete
        }
    }
}

fn ends_with_continuation(line: &str) -> bool {
    line.trim_end().ends_with('\\')
}

/// Drop the trailing `\` of every continued line, keeping the line breaks.
pub fn join_continued_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_end();
            trimmed.strip_suffix('\\').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Net count of unclosed brackets; stray closers never go below zero.
fn open_brackets(text: &str) -> usize {
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    depth
}
