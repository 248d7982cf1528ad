use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::comment::{Delimiters, DEFAULT_COMMENT_END, DEFAULT_COMMENT_START};
use crate::error::{Chainable, Result};
use crate::markdown::DEFAULT_HIGHLIGHT_THEME;

/// The name of the configuration file looked for in the working directory.
pub const CONFIG_FILE: &str = "sassdown.toml";

/// Generator settings, as read from [`CONFIG_FILE`] and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Directory the source globs are relative to.
    pub src: PathBuf,
    /// Output directory.
    pub dest: PathBuf,
    /// Globs, relative to `src`, selecting the source files.
    pub files: Vec<String>,
    /// Regex matching the opening of an annotation block.
    pub comment_start: String,
    /// Regex matching the close of an annotation block.
    pub comment_end: String,
    /// Leave sources without annotation blocks out of the styleguide.
    pub exclude_missing: bool,
    /// Build pages without writing them.
    pub dry_run: bool,
    pub title: String,
    pub readme: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub theme: Option<PathBuf>,
    /// Name of the syntax highlighting theme.
    pub highlight: String,
    /// Stylesheets linked from every page: URLs or globs.
    pub assets: Vec<String>,
    /// Scripts loaded by every page: URLs or globs.
    pub scripts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            src: "assets".into(),
            dest: "styleguide".into(),
            files: vec!["**/*.scss".into(), "**/*.sass".into(), "**/*.css".into()],
            comment_start: DEFAULT_COMMENT_START.into(),
            comment_end: DEFAULT_COMMENT_END.into(),
            exclude_missing: false,
            dry_run: false,
            title: "Styleguide".into(),
            readme: None,
            template: None,
            theme: None,
            highlight: DEFAULT_HIGHLIGHT_THEME.into(),
            assets: vec![],
            scripts: vec![],
        }
    }
}

impl Config {
    /// Reads a configuration file. Missing keys take their default values.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let string = fs::read_to_string(path).chain_with(|| error! {
            "failed to read configuration file",
            "path" => path.display(),
        })?;

        Self::parse(&string).chain_with(|| error! {
            "invalid configuration file",
            "path" => path.display(),
        })
    }

    pub fn parse(string: &str) -> Result<Self> {
        Ok(toml::from_str(string)?)
    }

    /// Whether sources without annotation blocks are excluded. A dry run
    /// always excludes them so that it can report them.
    pub fn excludes_missing(&self) -> bool {
        self.exclude_missing || self.dry_run
    }

    pub fn delimiters(&self) -> Result<Delimiters> {
        Delimiters::new(&self.comment_start, &self.comment_end)
    }

    /// Resolves every relative path against `base`.
    pub fn absolutize(&mut self, base: &Path) {
        let optional = [&mut self.readme, &mut self.template, &mut self.theme];
        let paths = [&mut self.src, &mut self.dest].into_iter()
            .chain(optional.into_iter().flatten());

        for path in paths {
            if path.is_relative() {
                *path = crate::util::normalize(base.join(&*path));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = Config::parse("title = \"Acme UI\"\nexclude-missing = true\n").unwrap();
        assert_eq!(config.title, "Acme UI");
        assert!(config.exclude_missing);
        assert_eq!(config.src, Path::new("assets"));
        assert_eq!(config.files, Config::default().files);
        assert_eq!(config.highlight, DEFAULT_HIGHLIGHT_THEME);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("titel = \"typo\"").is_err());
    }

    #[test]
    fn dry_run_excludes_missing() {
        let config = Config { dry_run: true, ..Config::default() };
        assert!(config.excludes_missing());
        assert!(!Config::default().excludes_missing());
    }

    #[test]
    fn custom_delimiters_compile() {
        let config = Config::parse("comment-start = '//-'\ncomment-end = '-//'").unwrap();
        let delimiters = config.delimiters().unwrap();
        assert_eq!(delimiters.sectionize("//- a -//\n.b {}").len(), 1);

        let config = Config::parse("comment-start = '('").unwrap();
        assert!(config.delimiters().is_err());
    }

    #[test]
    fn relative_paths_are_resolved() {
        let mut config = Config {
            readme: Some("docs/../README.md".into()),
            dest: "/srv/out".into(),
            ..Config::default()
        };

        config.absolutize(Path::new("/project"));
        assert_eq!(config.src, Path::new("/project/assets"));
        assert_eq!(config.dest, Path::new("/srv/out"));
        assert_eq!(config.readme.as_deref(), Some(Path::new("/project/README.md")));
        assert!(config.template.is_none());
    }

    #[test]
    fn read_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "files = 3").unwrap();

        let error = Config::read(&path).unwrap_err();
        assert_eq!(error.message(), "invalid configuration file");
        assert!(error.to_string().contains(CONFIG_FILE));
    }
}
