mod plugin;
mod heading;
mod highlight;

pub use plugin::*;
pub use heading::*;
pub use highlight::*;

use pulldown_cmark::{html, Options, Parser};

/// Renders markdown to HTML, recording the first level-1 heading on the way.
#[derive(Debug, Clone)]
pub struct Markdown<'i> {
    input: &'i str,
    options: Options,
    highlight: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    /// Text of the first `<h1>`, if any.
    pub heading: Option<String>,
}

impl<'i> Markdown<'i> {
    pub fn from(input: &'i str) -> Self {
        Markdown {
            input,
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_HEADING_ATTRIBUTES,
            highlight: false,
        }
    }

    /// Highlight fenced and indented code blocks.
    pub fn highlight_code(mut self) -> Self {
        self.highlight = true;
        self
    }

    pub fn render(self) -> Rendered {
        let mut heading = FirstHeading::default();
        let mut highlight = SyntaxHighlight::default();
        let mut output = String::with_capacity(self.input.len() * 3 / 2);

        let events = heading.remap(Parser::new_ext(self.input, self.options));
        if self.highlight {
            html::push_html(&mut output, highlight.remap(events));
        } else {
            html::push_html(&mut output, events);
        }

        Rendered { html: output, heading: heading.into_inner() }
    }
}
