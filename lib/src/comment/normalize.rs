use std::borrow::Cow;

use super::Delimiters;

/// Marks an embedded example in normalized text.
pub const FENCE: &str = "```";

const INDENT: &str = "    ";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Prose,
    /// Inside an inferred fence.
    Code,
}

/// Turns one raw annotation block into markdown.
///
/// The delimiters are removed, doc-comment ` * ` continuation markers and the
/// single-space comment indent are stripped from each line, and a block that
/// carries an indented example but no explicit fence gets one: a fence line is
/// placed before the first line indented by four spaces, that line and every
/// line after it lose their indent, and a closing fence ends the text.
///
/// Inside an explicit fence, lines only lose the indent of the opening fence
/// line, so normalizing normalized text changes nothing.
pub fn normalize(delimiters: &Delimiters, raw: &str) -> String {
    let stripped = delimiters.strip(raw);
    let text = stripped.trim();
    let text = text.strip_prefix('*').unwrap_or(text);
    let text = text.trim_start_matches([' ', '\t']);

    let lines = collapse_lines(text);
    let infer_fence = !lines.iter().any(|line| line.contains(FENCE));
    let mut state = State::Prose;
    let mut output = String::with_capacity(text.len() + 2 * FENCE.len() + 2);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if infer_fence && state == State::Prose && line.starts_with(INDENT) {
            output.push_str(FENCE);
            output.push('\n');
            state = State::Code;
        }

        match state {
            State::Prose => output.push_str(line),
            State::Code => output.push_str(dedent(line)),
        }
    }

    if state == State::Code {
        output.push('\n');
        output.push_str(FENCE);
    }

    let leading = output.len() - output.trim_start_matches('\n').len();
    output.drain(..leading);
    output
}

/// Strips continuation prefixes. `fence` holds the indent of the opening line
/// while inside an explicit fence.
fn collapse_lines(text: &str) -> Vec<Cow<'_, str>> {
    let mut fence: Option<usize> = None;
    let mut lines = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        let body = match i {
            0 => line,
            _ => unmark(line).unwrap_or(line),
        };

        let is_fence = body.trim_start().starts_with(FENCE);
        let collapsed = match fence {
            Some(indent) => {
                if is_fence {
                    fence = None;
                }

                Cow::Borrowed(strip_spaces(body, indent))
            }
            None if is_fence => {
                let trimmed = body.trim_start_matches(' ');
                fence = Some(body.len() - trimmed.len());
                Cow::Borrowed(trimmed)
            }
            None if i == 0 => Cow::Borrowed(line),
            None => collapse(line),
        };

        lines.push(collapsed);
    }

    lines
}

fn unmark(line: &str) -> Option<&str> {
    line.strip_prefix(" * ").or_else(|| line.strip_prefix(" *"))
}

/// Strips a continuation prefix from a prose line after the first.
fn collapse(line: &str) -> Cow<'_, str> {
    if let Some(rest) = unmark(line) {
        // A marker followed by three spaces is a four-column indent.
        return match rest.strip_prefix("   ") {
            Some(code) if !code.starts_with(' ') => Cow::Owned(format!("{INDENT}{code}")),
            _ => Cow::Borrowed(rest),
        };
    }

    if line.starts_with(INDENT) {
        return Cow::Borrowed(line);
    }

    Cow::Borrowed(line.strip_prefix(' ').unwrap_or(line))
}

/// Removes at most `n` leading spaces.
fn strip_spaces(line: &str, n: usize) -> &str {
    let leading = line.len() - line.trim_start_matches(' ').len();
    &line[leading.min(n)..]
}

fn dedent(line: &str) -> &str {
    line.strip_prefix(INDENT)
        .or_else(|| line.strip_prefix(' '))
        .unwrap_or(line)
}
