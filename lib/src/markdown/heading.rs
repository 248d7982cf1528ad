use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};

use super::Plugin;

/// Records the text of the first level-1 heading without altering events.
#[derive(Debug, Default)]
pub struct FirstHeading {
    title: Option<String>,
}

impl FirstHeading {
    pub fn into_inner(self) -> Option<String> {
        self.title
    }
}

struct HeadingIterator<'a, I> {
    title: &'a mut Option<String>,
    pending: Option<String>,
    inner: I,
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for HeadingIterator<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.inner.next()?;
        match &event {
            Event::Start(Tag::Heading { level: HeadingLevel::H1, .. }) if self.title.is_none() => {
                self.pending = Some(String::new());
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(text) = self.pending.take() {
                    let text = text.trim();
                    if !text.is_empty() {
                        *self.title = Some(text.to_string());
                    }
                }
            }
            _ => {}
        }

        Some(event)
    }
}

impl Plugin for FirstHeading {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        HeadingIterator { title: &mut self.title, pending: None, inner: events }
    }
}

#[cfg(test)]
mod tests {
    use crate::markdown::Markdown;

    fn heading(markdown: &str) -> Option<String> {
        Markdown::from(markdown).render().heading
    }

    #[test]
    fn first_h1_wins() {
        assert_eq!(heading("# One\n\n# Two").as_deref(), Some("One"));
        assert_eq!(heading("Intro\n\n## Sub\n\n# Main").as_deref(), Some("Main"));
    }

    #[test]
    fn inline_markup_is_flattened() {
        assert_eq!(heading("# The `.btn` *class*").as_deref(), Some("The .btn class"));
        assert_eq!(heading("Setext\n======").as_deref(), Some("Setext"));
    }

    #[test]
    fn empty_heading_is_ignored() {
        assert_eq!(heading("#\n\n# Real").as_deref(), Some("Real"));
    }
}
