//! Page templates for the demo shells.

use minijinja::{context, Environment};

/// A navigation item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Whether this is the active page
    pub active: bool,
}

/// Context for rendering a demo page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageContext {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Short page description, shown under the title
    pub description: Option<String>,
    /// Rendered page body HTML
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Base URL
    pub base_url: String,
    /// Stylesheet URLs to include
    pub styles: Vec<String>,
    /// Script URLs to include (the dev server injects its reload client)
    pub scripts: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");
        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");
        env.add_template_owned("nav.html".to_string(), NAV_TEMPLATE.to_string())
            .expect("Failed to add nav template");

        Self { env }
    }

    /// Render a full demo page.
    pub fn render_page(&self, ctx: &PageContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("page.html")?;

        tmpl.render(context! {
            title => &ctx.title,
            site_title => &ctx.site_title,
            description => &ctx.description,
            content => &ctx.content,
            nav => &ctx.nav,
            base_url => &ctx.base_url,
            styles => &ctx.styles,
            scripts => &ctx.scripts,
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
  <title>{{ title }} - {{ site_title }}</title>
  {% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  {% for script in scripts %}<script src="{{ script }}"></script>
  {% endfor %}
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="page">
  {% if description %}<p class="page-description">{{ description }}</p>{% endif %}
  <div class="content">
    {{ content | safe }}
  </div>
</article>
{% endblock %}"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
  </li>
{% endfor %}
</ul>"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PageContext {
        PageContext {
            title: "Gallery".to_string(),
            site_title: "vitrine demos".to_string(),
            description: Some("All the embeds".to_string()),
            content: "<p>Hello world</p>".to_string(),
            nav: vec![],
            base_url: "/".to_string(),
            styles: vec!["/assets/site.css".to_string()],
            scripts: vec![],
        }
    }

    #[test]
    fn renders_a_basic_page() {
        let engine = TemplateEngine::new();
        let html = engine.render_page(&ctx()).unwrap();

        assert!(html.contains("<title>Gallery - vitrine demos</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains("All the embeds"));
        assert!(html.contains(r#"<link rel="stylesheet" href="/assets/site.css">"#));
    }

    #[test]
    fn renders_navigation_with_active_state() {
        let engine = TemplateEngine::new();
        let mut context = ctx();
        context.nav = vec![
            NavItem {
                title: "Gallery".to_string(),
                path: "/".to_string(),
                active: true,
            },
            NavItem {
                title: "Isolation".to_string(),
                path: "/isolation/".to_string(),
                active: false,
            },
        ];

        let html = engine.render_page(&context).unwrap();

        assert!(html.contains(r#"class="nav-item active""#));
        assert!(html.contains("Isolation"));
    }

    #[test]
    fn embed_html_passes_through_unescaped() {
        let engine = TemplateEngine::new();
        let mut context = ctx();
        context.content = r#"<template shadowrootmode="open"><p>x</p></template>"#.to_string();

        let html = engine.render_page(&context).unwrap();
        assert!(html.contains(r#"<template shadowrootmode="open">"#));
    }

    #[test]
    fn includes_configured_scripts() {
        let engine = TemplateEngine::new();
        let mut context = ctx();
        context.scripts = vec!["/__livereload.js".to_string()];

        let html = engine.render_page(&context).unwrap();
        assert!(html.contains(r#"<script src="/__livereload.js"></script>"#));
    }
}
