use pulldown_cmark::{Event, Tag, CodeBlockKind, TagEnd};
use syntect::html::{ClassedHTMLGenerator, ClassStyle};
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxSet, SyntaxReference};
use syntect::util::LinesWithEndings;
use once_cell::sync::Lazy;

use crate::error::Result;
use super::Plugin;

pub const DEFAULT_HIGHLIGHT_THEME: &str = "InspiredGitHub";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// What a snippet should be highlighted as.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Language<'a> {
    /// Example markup. Always HTML.
    Markup,
    /// Stylesheet source, by file extension. Unknown dialects fall back to CSS.
    Stylesheet(&'a str),
    /// A fence label, or a guess from the first line when there is none.
    Auto(Option<&'a str>),
}

impl Language<'_> {
    fn syntax(&self, code: &str) -> &'static SyntaxReference {
        let set = &*SYNTAX_SET;
        let found = match *self {
            Language::Markup => set.find_syntax_by_token("html"),
            Language::Stylesheet(ext) => set.find_syntax_by_extension(ext)
                .or_else(|| set.find_syntax_by_token("css")),
            Language::Auto(Some(label)) => set.find_syntax_by_token(label)
                .or_else(|| set.find_syntax_by_first_line(code)),
            Language::Auto(None) => set.find_syntax_by_first_line(code),
        };

        found.unwrap_or_else(|| set.find_syntax_plain_text())
    }
}

/// Highlights `code` into a `<pre class="highlight">` block of classed spans.
pub fn highlight(language: Language<'_>, code: &str) -> String {
    let syntax = language.syntax(code);
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax, &SYNTAX_SET, ClassStyle::Spaced);

    for line in LinesWithEndings::from(code) {
        if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
            log::debug!("highlighting as {} failed: {e}", syntax.name);
            return format!("<pre class=\"highlight\"><code>{}</code></pre>", escape(code));
        }
    }

    format!("<pre class=\"highlight\"><code>{}</code></pre>", generator.finalize())
}

/// The stylesheet for highlighted code in the named theme, or `None` if no
/// theme has that name.
pub fn theme_css(name: &str) -> Option<Result<String>> {
    let theme = THEME_SET.themes.get(name)?;
    Some(syntect::html::css_for_theme_with_class_style(theme, ClassStyle::Spaced)
        .map_err(Into::into))
}

/// Names of the bundled highlight themes, sorted.
pub fn theme_names() -> impl Iterator<Item = &'static str> {
    THEME_SET.themes.keys().map(|name| name.as_str())
}

fn escape(code: &str) -> String {
    let mut escaped = String::with_capacity(code.len());
    for c in code.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }

    escaped
}

/// Replaces code blocks with highlighted HTML.
#[derive(Default, Clone)]
pub struct SyntaxHighlight;

pub struct Highlighter<'a, I> {
    code: Option<(Option<pulldown_cmark::CowStr<'a>>, String)>,
    inner: I,
}

impl SyntaxHighlight {
    /// Loads the syntax and theme sets on the rayon pool ahead of first use.
    #[inline]
    pub fn warm_up() {
        rayon::spawn(|| { Lazy::force(&SYNTAX_SET); });
        rayon::spawn(|| { Lazy::force(&THEME_SET); });
    }
}

impl Plugin for SyntaxHighlight {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        Highlighter { code: None, inner: events }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for Highlighter<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let label = match kind {
                        CodeBlockKind::Fenced(label) if !label.trim().is_empty() => Some(label),
                        _ => None,
                    };

                    self.code = Some((label, String::new()));
                }
                Event::Text(text) if self.code.is_some() => {
                    if let Some((_, code)) = self.code.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if self.code.is_some() => {
                    let Some((label, code)) = self.code.take() else { continue };
                    let lang = label.as_deref()
                        .map(|l| l.split([',', ' ']).next().unwrap_or(l));

                    return Some(Event::Html(highlight(Language::Auto(lang), &code).into()));
                },
                ev => return Some(ev),
            }
        }
    }
}
