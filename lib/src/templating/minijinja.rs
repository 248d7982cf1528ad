use minijinja::{context, Environment};

use crate::error::{Chainable, Result};
use crate::nav::TreeNode;
use crate::page::Page;
use crate::templating::{Engine, RenderContext, DEFAULT_TEMPLATE};

const TEMPLATE_NAME: &str = "page.html";

#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Compiles `template`. Syntax errors are reported here, not at render
    /// time.
    pub fn new<S: Into<String>>(template: S) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, template.into())
            .chain(error!("failed to compile page template"))?;

        env.add_function("url", ext::url);
        env.add_filter("deslug", ext::deslug);
        env.add_filter("split", ext::split);
        Ok(MiniJinjaEngine { env })
    }

    /// An engine for the built-in template.
    pub fn with_default_template() -> Result<Self> {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl Engine for MiniJinjaEngine {
    fn render(
        &self,
        title: &str,
        page: &Page,
        tree: &[TreeNode],
        context: &RenderContext,
    ) -> Result<String> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let string = template.render(context! {
            title => title,
            page => page,
            pages => tree,
            root => &context.root,
            assets => &context.assets,
            theme => &context.theme,
            highlight => &context.highlight,
            scripts => &context.scripts,
        }).chain_with(|| error! {
            "failed to render page",
            "page" => &page.href,
        })?;

        Ok(string)
    }
}

mod ext {
    use minijinja::value::Value;
    use minijinja::{Error, ErrorKind, State};

    /// Joins the context's `root` with `path`. The result is escaped for use
    /// in an attribute but keeps its `/` separators.
    pub fn url(state: &State<'_, '_>, path: &str) -> Result<Value, Error> {
        let root = state.lookup("root")
            .filter(|v| !v.is_undefined())
            .ok_or_else(|| Error::new(
                ErrorKind::MissingArgument,
                "expected root in context but it wasn't found"
            ))?;

        let root = root.as_str().unwrap_or(".");
        let mut url = String::with_capacity(root.len() + path.len() + 1);
        for c in root.chars().chain(std::iter::once('/')).chain(path.chars()) {
            match c {
                '&' => url.push_str("&amp;"),
                '"' => url.push_str("&quot;"),
                '\'' => url.push_str("&#x27;"),
                '<' => url.push_str("&lt;"),
                '>' => url.push_str("&gt;"),
                c => url.push(c),
            }
        }

        Ok(Value::from_safe_string(url))
    }

    pub fn deslug(value: &str) -> String {
        value.replace(['-', '_'], " ").trim().to_string()
    }

    pub fn split(value: &str, pat: &str, n: Option<usize>) -> Result<Value, Error> {
        match n {
            Some(n) => Ok(value.split(pat).nth(n).map(Value::from).unwrap_or(Value::UNDEFINED)),
            None => Ok(value.split(pat).map(Value::from).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use crate::comment::Delimiters;
    use crate::nav::TreeNode;
    use crate::page::{PageBuilder, SourceFile};
    use crate::templating::{Engine, RenderContext};
    use super::MiniJinjaEngine;

    fn page(path: &str, text: &str) -> crate::page::Page {
        PageBuilder::new(Delimiters::css(), Path::new("assets"), Path::new("styleguide"))
            .build(&SourceFile::new(path, text))
            .unwrap()
    }

    #[test]
    fn syntax_errors_surface_at_construction() {
        let error = MiniJinjaEngine::new("{% for x in %}").unwrap_err();
        assert_eq!(error.message(), "failed to compile page template");
    }

    #[test]
    fn context_values_reach_the_template() {
        let engine = MiniJinjaEngine::new(
            "{{ title }}|{{ page.title }}|{{ root }}|{{ assets|safe }}|{{ pages|length }}\
             |{{ page.href|split('/', 0) }}|{{ 'base-components'|deslug }}|{{ url(page.href) }}"
        ).unwrap();

        let page = page("assets/forms/inputs.scss", "/* # Inputs */");
        let context = RenderContext {
            root: "..".into(),
            assets: "<link rel=\"stylesheet\" href=\"../app.css\">".into(),
            ..RenderContext::default()
        };

        let tree = vec![TreeNode::File(Arc::new(page.clone()))];
        let html = engine.render("Acme", &page, &tree, &context).unwrap();
        assert_eq!(html,
            "Acme|Inputs|..|<link rel=\"stylesheet\" href=\"../app.css\">|1|forms|base components\
             |../forms/inputs.html");
    }

    #[test]
    fn default_template_renders_sections_and_navigation() {
        let engine = MiniJinjaEngine::with_default_template().unwrap();
        let page = page("assets/buttons.scss",
            "/* # Buttons\nPrimary button.\n    <button class=\"btn\">Go</button> */\n.btn { color: red; }");

        let tree = vec![
            TreeNode::File(Arc::new(page.clone())),
            TreeNode::Directory {
                name: "forms".into(),
                pages: vec![TreeNode::File(Arc::new(self::page("assets/forms/inputs.scss", "/* # Inputs */")))],
            },
        ];

        let context = RenderContext { root: ".".into(), ..RenderContext::default() };
        let html = engine.render("Styleguide", &page, &tree, &context).unwrap();
        assert!(html.contains("<title>Buttons | Styleguide</title>"));
        assert!(html.contains("<h1>Buttons</h1>"));
        assert!(html.contains("<button class=\"btn\">Go</button>"));
        assert!(html.contains("href=\"./forms/inputs.html\""));
        assert!(html.contains("Inputs"));
        assert!(html.contains("<pre class=\"highlight\">"));
    }
}
