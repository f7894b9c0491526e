//! Page shells rendered around the catalog containers.

use frontref_render::escape_html;
use minijinja::{context, Environment};

/// Context for rendering a page shell.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Relative prefix from the page back to the site root ("" or "../")
    pub root: String,
    /// Rendered container HTML
    pub content: String,
    /// Stylesheet hrefs to include
    pub styles: Vec<String>,
    /// Live reload script src, set by the preview server
    pub reload_script: Option<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the default shells.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("landing.html".to_string(), LANDING_TEMPLATE.to_string())
            .expect("Failed to add landing template");

        env.add_template_owned("detail.html".to_string(), DETAIL_TEMPLATE.to_string())
            .expect("Failed to add detail template");

        Self { env }
    }

    /// Render a page using the specified template.
    ///
    /// Link targets are escaped here and inserted as-is by the templates.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        let styles: Vec<String> = context
            .styles
            .iter()
            .map(|s| escape_html(s).into_owned())
            .collect();
        let reload_script = context
            .reload_script
            .as_deref()
            .map(|s| escape_html(s).into_owned());

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            root => escape_html(&context.root),
            content => &context.content,
            styles => styles,
            reload_script => reload_script,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title != site_title %}{{ title }} - {% endif %}{{ site_title }}</title>
  {% for style in styles %}<link rel="stylesheet" href="{{ style | safe }}">
  {% endfor %}
</head>
<body>
  <header class="header">
    <a href="{{ root | safe }}index.html" class="logo">{{ site_title }}</a>
  </header>
  {% block content %}{% endblock %}
  {% if reload_script %}<script src="{{ reload_script | safe }}"></script>{% endif %}
</body>
</html>"##;

const LANDING_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<main class="landing">
  <h1 class="page-title">{{ site_title }}</h1>
  {{ content | safe }}
</main>
{% endblock %}"##;

const DETAIL_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<main class="detail">
  <a href="{{ root | safe }}index.html" class="back-link">&larr; Back</a>
  <h1 class="page-title">{{ title }}</h1>
  {{ content | safe }}
</main>
{% endblock %}"##;
