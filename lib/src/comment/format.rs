use serde::Serialize;

use crate::markdown::{highlight, Language, Markdown};
use super::FENCE;

/// The rendered form of one annotation block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// The documentation before the first fence, as HTML.
    pub comment: String,
    /// The example inside the fence, verbatim, for live rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// The example, highlighted as markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    /// The stylesheet source that follows the block, highlighted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<String>,
    /// Text of the first level-1 heading in `comment`.
    #[serde(skip)]
    pub heading: Option<String>,
}

/// Turns normalized block text and its trailing style source into a
/// [`Section`].
#[derive(Debug, Copy, Clone)]
pub struct Formatter<'a> {
    stylesheet: Language<'a>,
}

impl<'a> Formatter<'a> {
    /// A formatter for sources with the file extension `ext`.
    pub fn new(ext: &'a str) -> Self {
        Formatter { stylesheet: Language::Stylesheet(ext) }
    }

    pub fn format(&self, content: &str, style: &str) -> Section {
        let mut parts = content.splitn(3, FENCE);
        let before = parts.next().unwrap_or_default();
        let Some(inside) = parts.next() else {
            let rendered = Markdown::from(content).render();
            return Section { comment: rendered.html, heading: rendered.heading, ..Section::default() };
        };

        let rendered = Markdown::from(before).render();
        let example = strip_info_string(inside).trim();
        let styles = style.chars()
            .any(|c| !c.is_whitespace())
            .then(|| highlight(self.stylesheet, style.trim()));

        Section {
            comment: rendered.html,
            heading: rendered.heading,
            example: Some(example.to_string()),
            markup: Some(highlight(Language::Markup, example)),
            styles,
        }
    }
}

/// Drops a language label written on the opening fence line.
fn strip_info_string(inside: &str) -> &str {
    match inside.split_once('\n') {
        Some((info, body)) if !info.trim().is_empty() && !info.contains('<') => body,
        _ => inside,
    }
}
