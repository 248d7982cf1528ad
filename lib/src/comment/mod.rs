//! Extraction of annotation blocks from stylesheet source text.
//!
//! A source file is split into blocks by [`Delimiters::sectionize()`], each
//! block is cleaned into markdown by [`normalize()`], and [`Formatter`] turns
//! the markdown and the source that follows the block into a [`Section`].

mod sectionize;
mod normalize;
mod format;

pub use sectionize::*;
pub use normalize::*;
pub use format::*;

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Chainable, Result};

pub const DEFAULT_COMMENT_START: &str = r"/\*";
pub const DEFAULT_COMMENT_END: &str = r"\*/";

static DEFAULT_DELIMITERS: Lazy<Delimiters> = Lazy::new(|| {
    Delimiters::new(DEFAULT_COMMENT_START, DEFAULT_COMMENT_END)
        .expect("default comment delimiters are valid patterns")
});

/// The compiled start and end patterns of an annotation block.
#[derive(Debug, Clone)]
pub struct Delimiters {
    start: Regex,
    end: Regex,
    block: Regex,
}

impl Delimiters {
    pub fn new(start: &str, end: &str) -> Result<Self> {
        let compile = |which: &str, pattern: &str| Regex::new(pattern).chain_with(|| error! {
            format!("invalid comment {which} pattern"),
            "pattern" => pattern,
        });

        Ok(Delimiters {
            start: compile("start", start)?,
            end: compile("end", end)?,
            block: compile("block", &format!(r"(?:{start})[\s\S]*?(?:{end})"))?,
        })
    }

    /// `/*` and `*/`.
    pub fn css() -> &'static Delimiters {
        &DEFAULT_DELIMITERS
    }

    /// Removes the first occurrence of the start pattern and the first
    /// occurrence of the end pattern from `raw`.
    pub fn strip<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self.start.replace(raw, "") {
            Cow::Borrowed(rest) => self.end.replace(rest, ""),
            Cow::Owned(rest) => Cow::Owned(self.end.replace(&rest, "").into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Delimiters;

    #[test]
    fn strip_removes_each_delimiter_once() {
        let css = Delimiters::css();
        assert_eq!(css.strip("/* a /* b */ c */"), " a /* b  c */");
        assert_eq!(css.strip("no delimiters"), "no delimiters");
    }

    #[test]
    fn custom_delimiters() {
        let sass = Delimiters::new(r"//-", r"-//").unwrap();
        assert_eq!(sass.strip("//- Hello -//"), " Hello ");
        assert_eq!(sass.sectionize("//- a -// x //- b -//").len(), 2);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let error = Delimiters::new(r"(", r"\*/").unwrap_err();
        assert_eq!(error.message(), "invalid comment start pattern");
    }
}
