use std::ops::Range;

use super::Delimiters;

/// One delimited annotation block and the stylesheet source that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationBlock<'a> {
    /// The block as it appears in the source, delimiters included.
    pub raw: &'a str,
    /// Byte range of `raw` within the source text.
    pub span: Range<usize>,
    /// Source text from the end of the block up to the next start delimiter,
    /// or the end of the file. Whitespace is preserved exactly.
    pub style: &'a str,
}

impl Delimiters {
    /// Splits `text` into its annotation blocks in document order. Blocks
    /// match non-greedily from a start delimiter to the nearest end delimiter
    /// and never overlap. Returns an empty vector if `text` has no blocks.
    pub fn sectionize<'a>(&self, text: &'a str) -> Vec<AnnotationBlock<'a>> {
        self.block.find_iter(text)
            .map(|m| {
                let rest = &text[m.end()..];
                let style_end = self.start.find(rest).map_or(rest.len(), |next| next.start());
                AnnotationBlock {
                    raw: m.as_str(),
                    span: m.range(),
                    style: &rest[..style_end],
                }
            })
            .collect()
    }
}
