use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::Config;
use crate::error::{Chainable, Result};
use crate::fstree::FsTree;
use crate::nav::{build_tree, PageIndex, TreeNode};
use crate::page::{Page, PageBuilder, SourceFile};
use crate::util::{is_url, normalize};

/// The built styleguide: every page that will be rendered and the tree that
/// navigates them.
#[derive(Debug)]
pub struct Styleguide {
    /// Pages in input order.
    pub pages: Vec<Arc<Page>>,
    /// Sources left out for lacking annotation blocks.
    pub excluded: Vec<PathBuf>,
    pub tree: Vec<TreeNode>,
}

impl Styleguide {
    /// Builds a page for each of `files`, in parallel, then the navigation
    /// tree over `config.src`. An empty `files` is an error.
    pub fn build(config: &Config, files: &[PathBuf]) -> Result<Self> {
        if files.is_empty() {
            return err! {
                "no files found to process",
                "source directory" => config.src.display(),
                "patterns" => config.files.join(", "),
            };
        }

        let delimiters = config.delimiters()?;
        let builder = PageBuilder::new(&delimiters, &config.src, &config.dest)
            .exclude_missing(config.excludes_missing());

        let pages = files.par_iter()
            .map(|path| SourceFile::read(path).and_then(|file| builder.build(&file)))
            .collect::<Result<Vec<Page>>>()?;

        let (excluded, pages): (Vec<_>, Vec<_>) = pages.into_iter()
            .partition(|page| page.excluded);

        let excluded: Vec<PathBuf> = excluded.into_iter().map(|page| page.src).collect();
        let pages: Vec<Arc<Page>> = pages.into_iter().map(Arc::new).collect();

        let fstree = FsTree::build(&config.src)?;
        let index: PageIndex = pages.iter().cloned().collect();
        let tree = build_tree(&fstree, &index, &excluded);
        log::info!("{} page(s) built, {} excluded", pages.len(), excluded.len());

        Ok(Styleguide { pages, excluded, tree })
    }
}

/// Expands `patterns` relative to `base`. Matches are files only, in the
/// order first matched, without duplicates.
pub fn expand_globs<S: AsRef<str>>(base: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut seen = FxHashSet::default();
    let mut files = vec![];
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let full = base.join(pattern);
        let full = full.to_string_lossy();
        let paths = glob::glob(&full).chain_with(|| error! {
            "invalid glob pattern",
            "pattern" => pattern,
        })?;

        for path in paths {
            let path = normalize(path?);
            if path.is_file() && seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// The source files selected by `config`.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>> {
    let files = expand_globs(&config.src, &config.files)?;
    log::debug!("{} source file(s) found under {}", files.len(), config.src.display());
    Ok(files)
}

/// A stylesheet or script to include in every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Include {
    /// Referenced as given.
    Url(String),
    /// A local file.
    File(PathBuf),
}

/// Resolves `entries`: URLs are kept verbatim, everything else is a glob
/// relative to `base`. An entry that matches nothing is skipped with a
/// warning.
pub fn resolve_includes(base: &Path, entries: &[String]) -> Result<Vec<Include>> {
    let mut includes = vec![];
    for entry in entries {
        if is_url(entry) {
            includes.push(Include::Url(entry.clone()));
            continue;
        }

        let files = expand_globs(base, std::slice::from_ref(entry))?;
        if files.is_empty() {
            log::warn!("no files match {entry}");
        }

        includes.extend(files.into_iter().map(Include::File));
    }

    Ok(includes)
}
