// src/portfolio/templates.rs

use sqlx::SqlitePool;
use tracing::info;

use crate::common::helpers::to_json_column;
use crate::common::{generate_id, now_timestamp, ApiError, EntityPrefix};

pub struct TemplateSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub preview_image: &'static str,
    pub colors: [&'static str; 3],
    pub sections: &'static [&'static str],
    pub html: &'static str,
    pub css: &'static str,
    pub js: &'static str,
}

const MODERN_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{FULL_NAME}} | {{TITLE}}</title>
<style>{{CSS}}</style>
</head>
<body>
<nav class="nav"><span class="logo">{{FULL_NAME}}</span><a href="#experience">Experience</a><a href="#projects">Projects</a><a href="#contact">Contact</a></nav>
<header class="hero">
<h1>{{FULL_NAME}}</h1>
<h2>{{TITLE}}</h2>
<p>{{BIO}}</p>
</header>
<section id="skills"><h2>Skills</h2><div class="skills">{{SKILLS}}</div></section>
<section id="experience"><h2>Experience</h2>{{EXPERIENCE}}</section>
<section id="projects"><h2>Projects</h2><div class="grid">{{PROJECTS}}</div></section>
<section id="education"><h2>Education</h2>{{EDUCATION}}</section>
<footer id="contact">
<p>{{EMAIL}} &middot; {{PHONE}} &middot; {{LOCATION}}</p>
<p><a href="{{LINKEDIN}}">LinkedIn</a> <a href="{{GITHUB}}">GitHub</a></p>
</footer>
<script>{{JS}}</script>
</body>
</html>"##;

const MODERN_CSS: &str = r##"body { margin: 0; font-family: Inter, system-ui, sans-serif; color: #1f2937; }
.nav { display: flex; gap: 1.5rem; padding: 1rem 2rem; background: {{SECONDARY_COLOR}}; }
.nav a, .nav .logo { color: #fff; text-decoration: none; }
.nav .logo { font-weight: 700; margin-right: auto; }
.hero { padding: 5rem 2rem; background: linear-gradient(135deg, {{PRIMARY_COLOR}}, {{SECONDARY_COLOR}}); color: #fff; }
section { max-width: 960px; margin: 0 auto; padding: 3rem 2rem; }
section h2 { border-bottom: 3px solid {{ACCENT_COLOR}}; padding-bottom: .5rem; }
.skill { display: inline-block; margin: .25rem; padding: .3rem .8rem; border-radius: 999px; background: {{PRIMARY_COLOR}}; color: #fff; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 1rem; }
.item { padding: 1rem; border: 1px solid #e5e7eb; border-radius: 8px; margin-bottom: 1rem; }
.meta, .tech { color: #6b7280; }
footer { text-align: center; padding: 2rem; background: {{SECONDARY_COLOR}}; color: #fff; }
footer a { color: {{ACCENT_COLOR}}; }"##;

const SMOOTH_SCROLL_JS: &str = r##"document.querySelectorAll('a[href^="#"]').forEach(function (link) {
  link.addEventListener('click', function (event) {
    var target = document.querySelector(link.getAttribute('href'));
    if (target) { event.preventDefault(); target.scrollIntoView({ behavior: 'smooth' }); }
  });
});"##;

const CREATIVE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{FULL_NAME}} | Portfolio</title>
<style>{{CSS}}</style>
</head>
<body>
<header class="splash">
<p class="hello">Hello, I'm</p>
<h1>{{FULL_NAME}}</h1>
<p class="role">{{TITLE}}</p>
<p class="bio">{{BIO}}</p>
</header>
<main>
<section class="work"><h2>Selected work</h2><div class="cards">{{PROJECTS}}</div></section>
<section><h2>What I use</h2><div class="skills">{{SKILLS}}</div></section>
<section><h2>Where I've been</h2>{{EXPERIENCE}}</section>
<section><h2>Studies</h2>{{EDUCATION}}</section>
</main>
<footer><a href="mailto:{{EMAIL}}">{{EMAIL}}</a> <a href="{{GITHUB}}">GitHub</a> <a href="{{LINKEDIN}}">LinkedIn</a></footer>
<script>{{JS}}</script>
</body>
</html>"##;

const CREATIVE_CSS: &str = r##"body { margin: 0; font-family: 'Poppins', sans-serif; background: #fffaf3; color: #2d3436; }
.splash { min-height: 60vh; padding: 4rem 2rem; background: linear-gradient(120deg, {{PRIMARY_COLOR}}, {{ACCENT_COLOR}}); color: #fff; }
.splash h1 { font-size: 4rem; margin: 0; }
.hello, .role { text-transform: uppercase; letter-spacing: .2em; }
main { max-width: 1000px; margin: 0 auto; padding: 2rem; }
h2 { color: {{SECONDARY_COLOR}}; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1.5rem; }
.cards .item { background: #fff; border-radius: 16px; padding: 1.5rem; box-shadow: 0 10px 30px rgba(0,0,0,.08); transform: rotate(-1deg); }
.cards .item:nth-child(even) { transform: rotate(1deg); }
.skill { display: inline-block; margin: .3rem; padding: .4rem 1rem; border: 2px solid {{SECONDARY_COLOR}}; border-radius: 999px; }
.item { margin-bottom: 1rem; }
footer { padding: 2rem; text-align: center; background: {{SECONDARY_COLOR}}; }
footer a { color: #fff; margin: 0 .75rem; }"##;

const CREATIVE_JS: &str = r##"var cards = document.querySelectorAll('.cards .item');
cards.forEach(function (card) {
  card.addEventListener('mouseenter', function () { card.style.transform = 'scale(1.03)'; });
  card.addEventListener('mouseleave', function () { card.style.transform = ''; });
});"##;

const MINIMAL_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{FULL_NAME}}</title>
<style>{{CSS}}</style>
</head>
<body>
<main>
<h1>{{FULL_NAME}}</h1>
<p class="lead">{{TITLE}}, {{LOCATION}}</p>
<p>{{BIO}}</p>
<h2>Experience</h2>{{EXPERIENCE}}
<h2>Projects</h2>{{PROJECTS}}
<h2>Education</h2>{{EDUCATION}}
<h2>Skills</h2><p>{{SKILLS}}</p>
<p class="contact">{{EMAIL}} / <a href="{{GITHUB}}">GitHub</a> / <a href="{{LINKEDIN}}">LinkedIn</a></p>
</main>
<script>{{JS}}</script>
</body>
</html>"##;

const MINIMAL_CSS: &str = r##"body { margin: 0; font-family: Georgia, serif; color: {{PRIMARY_COLOR}}; line-height: 1.7; }
main { max-width: 640px; margin: 4rem auto; padding: 0 1.5rem; }
h1 { font-weight: 400; font-size: 2.4rem; margin-bottom: 0; }
h2 { font-size: 1rem; text-transform: uppercase; letter-spacing: .15em; color: {{SECONDARY_COLOR}}; margin-top: 3rem; }
.lead { color: {{SECONDARY_COLOR}}; }
.skill::after { content: ' / '; color: {{SECONDARY_COLOR}}; }
.skill:last-child::after { content: ''; }
.meta, .tech { font-style: italic; color: {{SECONDARY_COLOR}}; }
a { color: {{ACCENT_COLOR}}; }
.contact { margin-top: 3rem; }"##;

const TECH_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{FULL_NAME}} :: {{TITLE}}</title>
<style>{{CSS}}</style>
</head>
<body>
<header class="terminal">
<p><span class="prompt">$</span> whoami</p>
<h1 id="typed" data-text="{{FULL_NAME}}">{{FULL_NAME}}</h1>
<p><span class="prompt">$</span> cat role.txt</p>
<p>{{TITLE}}</p>
<p class="comment">// {{BIO}}</p>
</header>
<section><h2>./skills</h2><div class="skills">{{SKILLS}}</div></section>
<section><h2>./projects</h2><div class="grid">{{PROJECTS}}</div></section>
<section><h2>./experience</h2>{{EXPERIENCE}}</section>
<section><h2>./education</h2>{{EDUCATION}}</section>
<footer><a href="{{GITHUB}}">github</a> | <a href="{{LINKEDIN}}">linkedin</a> | {{EMAIL}}</footer>
<script>{{JS}}</script>
</body>
</html>"##;

const TECH_CSS: &str = r##"body { margin: 0; background: #0d1117; color: #e6edf3; font-family: 'JetBrains Mono', monospace; }
.terminal { padding: 4rem 2rem; border-bottom: 1px solid #30363d; }
.prompt { color: {{PRIMARY_COLOR}}; }
.comment { color: #8b949e; }
h1 { color: {{PRIMARY_COLOR}}; }
section { max-width: 1000px; margin: 0 auto; padding: 2rem; }
h2 { color: {{ACCENT_COLOR}}; }
.skill { display: inline-block; margin: .25rem; padding: .2rem .6rem; border: 1px solid {{PRIMARY_COLOR}}; color: {{PRIMARY_COLOR}}; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 1rem; }
.item { background: {{SECONDARY_COLOR}}; border: 1px solid #30363d; border-radius: 6px; padding: 1rem; margin-bottom: 1rem; }
.meta, .tech { color: #8b949e; }
a { color: {{PRIMARY_COLOR}}; }
footer { padding: 2rem; text-align: center; border-top: 1px solid #30363d; }"##;

const TECH_JS: &str = r##"var heading = document.getElementById('typed');
if (heading) {
  var text = heading.getAttribute('data-text') || '';
  heading.textContent = '';
  var i = 0;
  var timer = setInterval(function () {
    heading.textContent = text.slice(0, ++i);
    if (i >= text.length) { clearInterval(timer); }
  }, 80);
}"##;

const CORPORATE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{FULL_NAME}} - {{TITLE}}</title>
<style>{{CSS}}</style>
</head>
<body>
<header class="banner">
<div>
<h1>{{FULL_NAME}}</h1>
<p class="title">{{TITLE}}</p>
</div>
<address>{{EMAIL}}<br>{{PHONE}}<br>{{LOCATION}}</address>
</header>
<main>
<section class="summary"><h2>Professional summary</h2><p>{{BIO}}</p></section>
<section><h2>Professional experience</h2>{{EXPERIENCE}}</section>
<section><h2>Core competencies</h2><div class="skills">{{SKILLS}}</div></section>
<section><h2>Key projects</h2>{{PROJECTS}}</section>
<section><h2>Education</h2>{{EDUCATION}}</section>
</main>
<footer><a href="{{LINKEDIN}}">LinkedIn</a></footer>
<script>{{JS}}</script>
</body>
</html>"##;

const CORPORATE_CSS: &str = r##"body { margin: 0; font-family: 'Source Sans Pro', Arial, sans-serif; color: #1e293b; background: #f8fafc; }
.banner { display: flex; justify-content: space-between; align-items: flex-end; padding: 3rem 4rem; background: {{PRIMARY_COLOR}}; color: #fff; }
.banner h1 { margin: 0; font-size: 2.6rem; }
.title { color: #cbd5e1; font-size: 1.2rem; }
address { font-style: normal; text-align: right; }
main { max-width: 900px; margin: 2rem auto; background: #fff; padding: 2rem 3rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
h2 { color: {{PRIMARY_COLOR}}; border-left: 4px solid {{ACCENT_COLOR}}; padding-left: .75rem; }
.skill { display: inline-block; width: 30%; margin: .2rem 0; }
.skill::before { content: '\25A0  '; color: {{ACCENT_COLOR}}; }
.item { border-bottom: 1px solid #e2e8f0; padding: .5rem 0 1rem; }
.meta, .tech { color: {{SECONDARY_COLOR}}; }
footer { text-align: center; padding: 1.5rem; }
footer a { color: {{PRIMARY_COLOR}}; }"##;

const CORPORATE_JS: &str = r##"document.querySelectorAll('.item').forEach(function (item, index) {
  item.style.opacity = 0;
  setTimeout(function () { item.style.transition = 'opacity .4s'; item.style.opacity = 1; }, index * 120);
});"##;

pub const DEFAULT_TEMPLATES: [TemplateSeed; 5] = [
    TemplateSeed {
        name: "Modern Professional",
        description: "Clean, modern layout for developers and professionals",
        category: "professional",
        preview_image: "/templates/modern-professional.jpg",
        colors: ["#3b82f6", "#1f2937", "#10b981"],
        sections: &["hero", "about", "skills", "experience", "projects", "education", "contact"],
        html: MODERN_HTML,
        css: MODERN_CSS,
        js: SMOOTH_SCROLL_JS,
    },
    TemplateSeed {
        name: "Creative Portfolio",
        description: "Bold colors and playful cards for designers and creatives",
        category: "creative",
        preview_image: "/templates/creative-portfolio.jpg",
        colors: ["#f59e0b", "#7c3aed", "#ec4899"],
        sections: &["hero", "portfolio", "skills", "experience", "education", "contact"],
        html: CREATIVE_HTML,
        css: CREATIVE_CSS,
        js: CREATIVE_JS,
    },
    TemplateSeed {
        name: "Minimalist",
        description: "A single typographic column that keeps the focus on content",
        category: "minimal",
        preview_image: "/templates/minimalist.jpg",
        colors: ["#374151", "#9ca3af", "#6366f1"],
        sections: &["hero", "about", "experience", "projects", "education", "skills", "contact"],
        html: MINIMAL_HTML,
        css: MINIMAL_CSS,
        js: "",
    },
    TemplateSeed {
        name: "Tech Focus",
        description: "Dark, terminal-inspired theme for engineers",
        category: "technology",
        preview_image: "/templates/tech-focus.jpg",
        colors: ["#22d3ee", "#1e293b", "#a855f7"],
        sections: &["hero", "skills", "projects", "experience", "education", "contact"],
        html: TECH_HTML,
        css: TECH_CSS,
        js: TECH_JS,
    },
    TemplateSeed {
        name: "Corporate",
        description: "Formal resume-style layout for business professionals",
        category: "corporate",
        preview_image: "/templates/corporate.jpg",
        colors: ["#1d4ed8", "#475569", "#059669"],
        sections: &["hero", "about", "experience", "skills", "projects", "education", "contact"],
        html: CORPORATE_HTML,
        css: CORPORATE_CSS,
        js: CORPORATE_JS,
    },
];

/// Inserts any default template whose name is missing; returns how many were added
pub async fn ensure_default_templates(pool: &SqlitePool) -> Result<usize, ApiError> {
    let now = now_timestamp();
    let mut created = 0;

    for seed in DEFAULT_TEMPLATES.iter() {
        let colors = serde_json::json!({
            "primary": seed.colors[0],
            "secondary": seed.colors[1],
            "accent": seed.colors[2],
        });

        let result = sqlx::query(
            r#"INSERT OR IGNORE INTO portfolio_templates
               (id, name, description, category, preview_image, colors, sections, html, css, js, is_active, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?)"#,
        )
        .bind(generate_id(EntityPrefix::PortfolioTemplate))
        .bind(seed.name)
        .bind(seed.description)
        .bind(seed.category)
        .bind(seed.preview_image)
        .bind(colors.to_string())
        .bind(to_json_column(&seed.sections))
        .bind(seed.html)
        .bind(seed.css)
        .bind(seed.js)
        .bind(&now)
        .execute(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

        created += result.rows_affected() as usize;
    }

    if created > 0 {
        info!(created, "Default portfolio templates seeded");
    }
    Ok(created)
}
