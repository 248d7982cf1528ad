use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::comment::{normalize, Delimiters, Formatter, Section};
use crate::error::{Chainable, Result};
use crate::util::{diff_paths, normalize as normalize_path, to_slash, PathExt};

/// A source file read into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new<P: Into<PathBuf>, T: Into<String>>(path: P, text: T) -> Self {
        SourceFile { path: path.into(), text: text.into() }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).chain_with(|| error! {
            "failed to read source file",
            "path" => path.display(),
        })?;

        Ok(SourceFile::new(path, text))
    }
}

/// One page of the styleguide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    pub slug: String,
    pub src: PathBuf,
    pub dest: PathBuf,
    /// `dest` relative to the output root, `/`-separated.
    pub href: String,
    pub sections: Vec<Section>,
    /// Set when the source has no annotation blocks and such sources are
    /// excluded. Excluded pages are neither rendered nor listed.
    #[serde(skip)]
    pub excluded: bool,
}

/// The title of the first section with a level-1 heading.
pub fn infer_title(sections: &[Section]) -> Option<&str> {
    sections.iter().find_map(|section| section.heading.as_deref())
}

/// Builds a [`Page`] from each source file under `src_root`.
#[derive(Debug, Clone, Copy)]
pub struct PageBuilder<'a> {
    delimiters: &'a Delimiters,
    src_root: &'a Path,
    dest_root: &'a Path,
    exclude_missing: bool,
}

impl<'a> PageBuilder<'a> {
    pub fn new(delimiters: &'a Delimiters, src_root: &'a Path, dest_root: &'a Path) -> Self {
        PageBuilder { delimiters, src_root, dest_root, exclude_missing: false }
    }

    /// Exclude sources without annotation blocks instead of keeping them as
    /// untitled stubs.
    pub fn exclude_missing(mut self, exclude: bool) -> Self {
        self.exclude_missing = exclude;
        self
    }

    pub fn build(&self, file: &SourceFile) -> Result<Page> {
        let dest = file.path.rebase(self.src_root, self.dest_root)
            .ok_or_else(|| error! {
                "source file is outside of the source root",
                "path" => file.path.display(),
                "source root" => self.src_root.display(),
            })?
            .with_extension("html");

        let href = diff_paths(&dest, self.dest_root)
            .map(to_slash)
            .ok_or_else(|| error! {
                "page destination is not relative to the output root",
                "destination" => dest.display(),
                "output root" => self.dest_root.display(),
            })?;

        let slug = file.path.stem();
        let mut page = Page {
            title: String::new(),
            slug,
            src: normalize_path(&file.path),
            dest,
            href,
            sections: vec![],
            excluded: false,
        };

        let blocks = self.delimiters.sectionize(&file.text);
        if blocks.is_empty() {
            log::warn!("comment missing: {}", file.path.display());
            page.excluded = self.exclude_missing;
        } else {
            log::debug!("{} comment(s) found: {}", blocks.len(), file.path.display());
        }

        let ext = file.path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("css");

        let formatter = Formatter::new(ext);
        page.sections = blocks.iter()
            .map(|block| formatter.format(&normalize(self.delimiters, block.raw), block.style))
            .collect();

        match infer_title(&page.sections) {
            Some(title) => {
                log::debug!("heading found: {title}");
                page.title = title.to_string();
            }
            None => {
                if !page.excluded {
                    log::info!("heading missing: {}", file.path.display());
                }

                page.title = page.slug.clone();
            }
        }

        Ok(page)
    }
}
