use std::fs;
use std::path::Path;

use sassdown::comment::Section;
use sassdown::config::Config;
use sassdown::error::{Chainable, Result};
use sassdown::markdown::{self, Markdown, DEFAULT_HIGHLIGHT_THEME};
use sassdown::page::Page;
use sassdown::rayon::prelude::*;
use sassdown::styleguide::{resolve_includes, Include, Styleguide};
use sassdown::templating::minijinja::MiniJinjaEngine;
use sassdown::templating::{Engine, RenderContext, DEFAULT_THEME};
use sassdown::util::{diff_paths, to_slash, Sink};
use sassdown::error;

/// Everything shared by the pages of one run.
#[derive(Debug)]
pub struct Renderer {
    config: Config,
    engine: Box<dyn Engine>,
    theme: String,
    highlight: String,
    assets: Vec<Include>,
    scripts: Vec<Include>,
}

impl Renderer {
    pub fn new(config: Config, cwd: &Path) -> Result<Self> {
        let engine = match &config.template {
            Some(path) => MiniJinjaEngine::new(read(path, "template")?)?,
            None => {
                log::warn!("template not specified; using default");
                MiniJinjaEngine::with_default_template()?
            }
        };

        let theme = match &config.theme {
            Some(path) => read(path, "theme")?,
            None => {
                log::warn!("theme not specified; using default");
                DEFAULT_THEME.to_string()
            }
        };

        let highlight = match markdown::theme_css(&config.highlight) {
            Some(css) => css?,
            None => {
                log::warn!("highlight theme {:?} not found; using {DEFAULT_HIGHLIGHT_THEME} (available: {})",
                    config.highlight, unknown_theme_hint());

                markdown::theme_css(DEFAULT_HIGHLIGHT_THEME)
                    .ok_or_else(|| error!("default highlight theme is missing"))??
            }
        };

        if config.assets.is_empty() {
            log::warn!("assets not specified; pages will not include project styles");
        }

        let assets = resolve_includes(cwd, &config.assets)?;
        let scripts = resolve_includes(cwd, &config.scripts)?;
        Ok(Renderer {
            engine: Box::new(engine),
            theme: style(&theme),
            highlight: style(&highlight),
            config,
            assets,
            scripts,
        })
    }

    /// The index page, built from the README if there is one.
    pub fn index(&self) -> Result<Page> {
        let dest = self.config.dest.join("index.html");
        let sections = match &self.config.readme {
            Some(path) if path.is_file() => {
                let text = read(path, "readme")?;
                let rendered = Markdown::from(&text).highlight_code().render();
                vec![Section { comment: rendered.html, ..Section::default() }]
            }
            Some(path) => {
                log::warn!("readme not found: {}", path.display());
                vec![]
            }
            None => {
                log::warn!("readme not specified");
                vec![]
            }
        };

        Ok(Page {
            title: self.config.title.clone(),
            slug: "index".into(),
            src: self.config.readme.clone().unwrap_or_default(),
            dest,
            href: "index.html".into(),
            sections,
            excluded: false,
        })
    }

    /// Computes what `page` is rendered with besides itself.
    pub fn context(&self, page: &Page) -> RenderContext {
        let dir = page.dest.parent().unwrap_or(&self.config.dest);
        let root = diff_paths(&self.config.dest, dir)
            .map(to_slash)
            .filter(|root| !root.is_empty())
            .unwrap_or_else(|| ".".into());

        let assets = self.assets.iter()
            .map(|asset| match asset {
                Include::Url(url) => url.clone(),
                Include::File(path) => diff_paths(path, dir)
                    .map(to_slash)
                    .unwrap_or_else(|| to_slash(path)),
            })
            .map(|href| include_tag(&href))
            .collect::<Vec<_>>()
            .join("\n");

        let scripts = self.scripts.iter()
            .map(|script| match script {
                Include::Url(url) => url.clone(),
                Include::File(path) => format!("{root}/{}", path.file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default()),
            })
            .map(|src| format!("<script src=\"{src}\"></script>"))
            .collect::<Vec<_>>()
            .join("\n");

        RenderContext {
            root,
            assets,
            theme: self.theme.clone(),
            highlight: self.highlight.clone(),
            scripts,
        }
    }

    pub fn render(&self, page: &Page, styleguide: &Styleguide) -> Result<String> {
        let context = self.context(page);
        self.engine.render(&self.config.title, page, &styleguide.tree, &context)
    }

    /// Writes the index, every page, and local scripts under the output root.
    pub fn write(&self, styleguide: &Styleguide) -> Result<()> {
        let index = self.index()?;
        index.dest.write(self.render(&index, styleguide)?)?;

        styleguide.pages.par_iter()
            .map(|page| {
                let html = self.render(page, styleguide)?;
                page.dest.write(html).chain_with(|| error! {
                    "failed to write page",
                    "source path" => page.src.display(),
                })?;

                log::debug!("wrote {}", page.dest.display());
                Ok(())
            })
            .collect::<Result<()>>()?;

        for script in &self.scripts {
            if let Include::File(path) = script {
                let name = path.file_name().unwrap_or_default();
                self.config.dest.join(name).write_from(path).chain_with(|| error! {
                    "failed to copy script",
                    "source path" => path.display(),
                })?;
            }
        }

        Ok(())
    }
}

/// Fails if a dry run excluded any source.
pub fn check_dry_run(styleguide: &Styleguide) -> Result<()> {
    if styleguide.excluded.is_empty() {
        return Ok(());
    }

    let mut error = error!(format!("{} file(s) missing annotation comments", styleguide.excluded.len()));
    for path in &styleguide.excluded {
        error = error!(format!("comment missing: {}", path.display())).chain(error);
    }

    Err(error)
}

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).chain_with(|| error! {
        format!("failed to read {what}"),
        "path" => path.display(),
    })
}

fn unknown_theme_hint() -> String {
    markdown::theme_names().collect::<Vec<_>>().join(", ")
}

/// A `<script>` tag for `.js` files, a stylesheet `<link>` for anything else.
fn include_tag(href: &str) -> String {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("js") | Some("mjs") => format!("<script src=\"{href}\"></script>"),
        _ => format!("<link rel=\"stylesheet\" href=\"{href}\">"),
    }
}

fn style(css: &str) -> String {
    format!("<style>\n{css}\n</style>")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use sassdown::config::Config;
    use sassdown::styleguide::{discover, Styleguide};

    use super::*;

    fn setup(root: &Path) -> Config {
        for (path, text) in [
            ("assets/buttons.scss", "/* # Buttons\nPrimary.\n    <button class=\"btn\">Go</button> */\n.btn {}"),
            ("assets/forms/inputs.scss", "/* # Inputs */\n.input {}"),
            ("dist/app.css", ".app {}"),
            ("js/app.js", "console.log(1)"),
            ("README.md", "# Acme\n\n```css\n.a { b: c; }\n```\n"),
        ] {
            let path = root.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }

        Config {
            src: root.join("assets"),
            dest: root.join("out"),
            readme: Some(root.join("README.md")),
            assets: vec!["dist/*.css".into(), "//cdn.example.com/x.css".into()],
            scripts: vec!["js/*.js".into()],
            ..Config::default()
        }
    }

    #[test]
    fn context_paths_are_page_relative() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = setup(root);
        let styleguide = Styleguide::build(&config, &discover(&config).unwrap()).unwrap();
        let renderer = Renderer::new(config, root).unwrap();

        let inputs = styleguide.pages.iter().find(|p| p.slug == "inputs").unwrap();
        let context = renderer.context(inputs);
        assert_eq!(context.root, "..");
        assert_eq!(context.assets, "<link rel=\"stylesheet\" href=\"../../dist/app.css\">\n\
            <link rel=\"stylesheet\" href=\"//cdn.example.com/x.css\">");
        assert_eq!(context.scripts, "<script src=\"../app.js\"></script>");
        assert!(context.theme.starts_with("<style>"));
        assert!(context.highlight.starts_with("<style>"));

        let buttons = styleguide.pages.iter().find(|p| p.slug == "buttons").unwrap();
        let context = renderer.context(buttons);
        assert_eq!(context.root, ".");
        assert!(context.assets.contains("href=\"../dist/app.css\""));
        assert_eq!(context.scripts, "<script src=\"./app.js\"></script>");
    }

    #[test]
    fn script_assets_get_script_tags() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("dist/app.js"), "").unwrap();

        let config = Config {
            dest: root.join("out"),
            assets: vec!["dist/app.js".into(), "https://cdn.example.com/x.js?v=2".into()],
            ..Config::default()
        };

        let renderer = Renderer::new(config, root).unwrap();
        let index = renderer.index().unwrap();
        assert_eq!(renderer.context(&index).assets, "<script src=\"../dist/app.js\"></script>\n\
            <script src=\"https://cdn.example.com/x.js?v=2\"></script>");
    }

    #[test]
    fn unknown_theme_hint_lists_the_default() {
        let hint = unknown_theme_hint();
        assert!(hint.split(", ").any(|name| name == DEFAULT_HIGHLIGHT_THEME));
    }

    #[test]
    fn include_tag_follows_the_extension() {
        assert_eq!(include_tag("a/app.css"), "<link rel=\"stylesheet\" href=\"a/app.css\">");
        assert_eq!(include_tag("a/app.js"), "<script src=\"a/app.js\"></script>");
        assert_eq!(include_tag("//cdn.example.com/app.js#x"), "<script src=\"//cdn.example.com/app.js#x\"></script>");
        assert_eq!(include_tag("//fonts.example.com/css?family=Inter"),
            "<link rel=\"stylesheet\" href=\"//fonts.example.com/css?family=Inter\">");
    }

    #[test]
    fn write_produces_index_pages_and_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = setup(root);
        let styleguide = Styleguide::build(&config, &discover(&config).unwrap()).unwrap();
        let renderer = Renderer::new(config, root).unwrap();
        renderer.write(&styleguide).unwrap();

        let out = root.join("out");
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("<h1>Acme</h1>"));
        assert!(index.contains("<pre class=\"highlight\">"));
        assert!(index.contains("href=\"./forms/inputs.html\""));

        let inputs = fs::read_to_string(out.join("forms/inputs.html")).unwrap();
        assert!(inputs.contains("<title>Inputs | Styleguide</title>"));
        assert!(inputs.contains("href=\"../buttons.html\""));

        assert!(out.join("buttons.html").is_file());
        assert_eq!(fs::read_to_string(out.join("app.js")).unwrap(), "console.log(1)");
    }

    #[test]
    fn unknown_highlight_theme_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { highlight: "No Such Theme".into(), ..setup(dir.path()) };
        let renderer = Renderer::new(config, dir.path()).unwrap();
        let default = markdown::theme_css(DEFAULT_HIGHLIGHT_THEME).unwrap().unwrap();
        assert_eq!(renderer.highlight, style(&default));
    }

    #[test]
    fn missing_readme_gives_an_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { readme: None, ..setup(dir.path()) };
        let index = Renderer::new(config, dir.path()).unwrap().index().unwrap();
        assert_eq!(index.title, "Styleguide");
        assert_eq!(index.href, "index.html");
        assert!(index.sections.is_empty());
    }

    #[test]
    fn dry_run_fails_on_excluded_sources() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let mut config = setup(root);
        fs::write(root.join("assets/reset.css"), "html { margin: 0; }").unwrap();
        config.dry_run = true;

        let styleguide = Styleguide::build(&config, &discover(&config).unwrap()).unwrap();
        let error = check_dry_run(&styleguide).unwrap_err();
        assert_eq!(error.message(), "1 file(s) missing annotation comments");
        assert!(error.to_string().contains("reset.css"));
        assert!(!root.join("out").exists());
    }
}
