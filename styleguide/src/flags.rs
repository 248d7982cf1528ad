use std::path::PathBuf;

xflags::xflags! {
    /// Builds a styleguide from the annotation comments in stylesheets.
    cmd sassdown {
        /// Configuration file. Defaults to `sassdown.toml` if it exists.
        optional -c, --config path: PathBuf
        /// Directory containing the stylesheets.
        optional -s, --src dir: PathBuf
        /// Directory to write the styleguide to.
        optional -d, --dest dir: PathBuf
        /// Glob, relative to the source directory, selecting stylesheets.
        repeated -f, --files glob: String
        /// Title of the styleguide.
        optional --title title: String
        /// Markdown file rendered as the index page.
        optional --readme path: PathBuf
        /// Page template.
        optional --template path: PathBuf
        /// Stylesheet for the styleguide itself.
        optional --theme path: PathBuf
        /// Syntax highlighting theme.
        optional --highlight name: String
        /// Stylesheet to include in every page: a glob or a URL.
        repeated --asset asset: String
        /// Script to include in every page: a glob or a URL.
        repeated --script script: String
        /// Regex matching the start of an annotation comment.
        optional --comment-start regex: String
        /// Regex matching the end of an annotation comment.
        optional --comment-end regex: String
        /// Leave stylesheets without annotation comments out.
        optional --exclude-missing
        /// Build without writing anything; fail if any stylesheet lacks comments.
        optional -n, --dry-run
        /// Log progress for every file.
        optional -v, --verbose
    }
}
