pub mod minijinja;

use std::fmt::Debug;

use serde::Serialize;

use crate::error::Result;
use crate::nav::TreeNode;
use crate::page::Page;

/// The page template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../data/template.html");

/// The styleguide stylesheet used when none is configured.
pub const DEFAULT_THEME: &str = include_str!("../../data/theme.css");

/// Values a page is rendered with besides the page itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Relative path from the page to the output root: `.` for pages at the
    /// root, `..` one level down, and so on.
    pub root: String,
    /// `<link>` tags for included stylesheets and `<script>` tags for
    /// included `.js` assets.
    pub assets: String,
    /// A `<style>` block with the styleguide's own stylesheet.
    pub theme: String,
    /// A `<style>` block for highlighted code.
    pub highlight: String,
    /// `<script>` tags for the included scripts.
    pub scripts: String,
}

/// Renders pages into HTML documents.
pub trait Engine: Send + Sync + Debug {
    /// Renders `page` with the full navigation `tree`.
    fn render(
        &self,
        title: &str,
        page: &Page,
        tree: &[TreeNode],
        context: &RenderContext,
    ) -> Result<String>;
}
