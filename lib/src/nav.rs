use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::fstree::{EntryId, FsTree};
use crate::page::Page;
use crate::util::{is_junk, normalize};

/// A node in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    /// A directory with at least one listed descendant.
    Directory { name: String, pages: Vec<TreeNode> },
    /// A source file with a page.
    File(Arc<Page>),
}

/// Pages by normalized source path.
#[derive(Debug, Default)]
pub struct PageIndex {
    pages: FxHashMap<PathBuf, Arc<Page>>,
}

impl PageIndex {
    pub fn get(&self, path: &Path) -> Option<&Arc<Page>> {
        self.pages.get(&normalize(path))
    }
}

impl FromIterator<Arc<Page>> for PageIndex {
    fn from_iter<I: IntoIterator<Item = Arc<Page>>>(iter: I) -> Self {
        let pages = iter.into_iter()
            .map(|page| (normalize(&page.src), page))
            .collect();

        PageIndex { pages }
    }
}

/// Builds the navigation tree for the directory `tree` was built from. The
/// root itself is not a node: its surviving children are returned.
///
/// Directories list their children in file-name order. Junk entries, paths
/// in `excluded`, and files without a page in `pages` are skipped, and a
/// directory left with no children is omitted.
pub fn build_tree(tree: &FsTree, pages: &PageIndex, excluded: &[PathBuf]) -> Vec<TreeNode> {
    let excluded: FxHashSet<PathBuf> = excluded.iter().map(normalize).collect();
    let walk = Walk { tree, pages, excluded: &excluded };
    match walk.node(tree.root_id()) {
        Some(TreeNode::Directory { pages, .. }) => pages,
        Some(TreeNode::File(_)) | None => vec![],
    }
}

struct Walk<'a> {
    tree: &'a FsTree,
    pages: &'a PageIndex,
    excluded: &'a FxHashSet<PathBuf>,
}

impl Walk<'_> {
    fn node(&self, id: EntryId) -> Option<TreeNode> {
        let entry = &self.tree[id];
        if is_junk(&entry.file_name) {
            return None;
        }

        if entry.is_dir() {
            let pages: Vec<TreeNode> = entry.children.iter()
                .filter(|&&child| !self.excluded.contains(&normalize(&self.tree[child].path)))
                .filter_map(|&child| self.node(child))
                .collect();

            if pages.is_empty() {
                return None;
            }

            return Some(TreeNode::Directory { name: entry.file_name.clone(), pages });
        }

        if entry.is_file() {
            return self.pages.get(&entry.path).cloned().map(TreeNode::File);
        }

        None
    }
}
