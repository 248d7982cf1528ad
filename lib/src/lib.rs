//! Builds a browsable styleguide from annotated stylesheets.
//!
//! # Overview
//!
//! Stylesheet sources document themselves in comments. A comment such as
//!
//! ```css
//! /* # Buttons
//! Primary call to action.
//!
//!     <button class="btn">Go</button>
//! */
//! .btn { color: red; }
//! ```
//!
//! is an _annotation block_. Its text is markdown, its indented (or fenced)
//! tail is an _example_ of markup, and the source between it and the next
//! block is the _styles_ it documents.
//!
//! A styleguide is built as follows:
//!
//! 1. Source files are selected by globs under a source directory
//!    ([`styleguide::discover()`]).
//! 2. Each file is split into annotation blocks
//!    ([`comment::Delimiters::sectionize()`]), each block is normalized to
//!    markdown ([`comment::normalize()`]) and formatted into a
//!    [`comment::Section`] ([`comment::Formatter`]).
//! 3. The sections of a file make a [`page::Page`], titled by the first
//!    level-1 heading ([`page::PageBuilder`]). Pages are built in parallel.
//! 4. The source directory is walked into a navigation tree of pages
//!    ([`nav::build_tree()`]).
//! 5. Each page is rendered with the tree through a template
//!    ([`templating::Engine`]) and written under the output directory.

#[macro_use]
pub mod error;
pub mod util;
pub mod fstree;
pub mod comment;
pub mod markdown;
pub mod page;
pub mod nav;
pub mod config;
pub mod styleguide;
pub mod templating;

pub use config::Config;
pub use page::Page;
pub use nav::TreeNode;
pub use styleguide::Styleguide;

pub use rayon;
