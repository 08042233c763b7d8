// src/styleguide/pages.rs

//! Built-in page layouts for the exported styleguide.

use anyhow::{Result, anyhow};
use minijinja::Environment;
use serde::Serialize;

const LAYOUT: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }} | Styleguide</title>
{% for href in styles %}<link rel="stylesheet" href="{{ base|safe }}build/{{ href|safe }}">
{% endfor %}<style>
.sg-nav { font-family: sans-serif; padding: 1rem; border-bottom: 1px solid #ddd; }
.sg-nav a { margin-right: 1rem; }
.sg-main { padding: 1rem; }
.sg-source { background: #f6f6f6; padding: 1rem; overflow: auto; }
</style>
</head>
<body>
<nav class="sg-nav">
<a href="{{ base|safe }}index.html">Overview</a>
{% for c in components %}<a href="{{ base|safe }}components/{{ c.name }}.html">{{ c.title }}</a>
{% endfor %}{% for d in docs %}<a href="{{ base|safe }}docs/{{ d.name }}.html">{{ d.title }}</a>
{% endfor %}</nav>
<main class="sg-main">
{% block content %}{% endblock %}
</main>
{% for src in scripts %}<script src="{{ base|safe }}build/{{ src|safe }}"></script>
{% endfor %}</body>
</html>
"#;

const INDEX: &str = r#"{% extends "layout.html" %}
{% block content %}
{% if intro %}{{ intro|safe }}{% else %}<h1>Styleguide</h1>{% endif %}
<h2>Components</h2>
<ul>
{% for c in components %}<li><a href="components/{{ c.name }}.html">{{ c.title }}</a></li>
{% else %}<li>No components yet.</li>
{% endfor %}</ul>
{% endblock %}
"#;

const COMPONENT: &str = r#"{% extends "layout.html" %}
{% block content %}
<h1>{{ component.title }}</h1>
<section class="sg-preview">
{{ preview|safe }}
</section>
<h2>Source</h2>
<pre class="sg-source"><code>{{ component.source }}</code></pre>
{% endblock %}
"#;

const DOC: &str = r#"{% extends "layout.html" %}
{% block content %}
<article class="sg-doc">
{{ doc.html|safe }}
</article>
{% endblock %}
"#;

pub const INDEX_PAGE: &str = "index.html";
pub const COMPONENT_PAGE: &str = "component.html";
pub const DOC_PAGE: &str = "doc.html";

/// Environment holding the page layouts. Template names end in `.html`, so
/// interpolated values are HTML-escaped unless marked `|safe`.
pub fn layouts() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    for (name, source) in [
        ("layout.html", LAYOUT),
        (INDEX_PAGE, INDEX),
        (COMPONENT_PAGE, COMPONENT),
        (DOC_PAGE, DOC),
    ] {
        env.add_template(name, source)
            .map_err(|e| anyhow!("styleguide layout {name}: {e:#}"))?;
    }
    Ok(env)
}

pub fn render_page<S: Serialize>(env: &Environment<'_>, page: &str, context: S) -> Result<String> {
    env.get_template(page)
        .and_then(|t| t.render(context))
        .map_err(|e| anyhow!("rendering styleguide page {page}: {e:#}"))
}
