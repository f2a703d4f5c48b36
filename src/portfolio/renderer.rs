// src/portfolio/renderer.rs
//! Fills a template's placeholders from resume data. Substitution is a single
//! pass, so text supplied by users is never scanned for placeholders again.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::models::{PortfolioTemplate, TemplateColors};
use crate::common::helpers::html_escape;
use crate::resume::ResumeData;

static PLACEHOLDER: OnceLock<Option<Regex>> = OnceLock::new();

fn fill(source: &str, values: &HashMap<&str, String>) -> String {
    match PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{([A-Z_]+)\}\}").ok()) {
        Some(re) => re
            .replace_all(source, |caps: &Captures| {
                values
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned(),
        None => source.to_string(),
    }
}

fn color_values(colors: &TemplateColors) -> HashMap<&'static str, String> {
    HashMap::from([
        ("PRIMARY_COLOR", colors.primary.clone()),
        ("SECONDARY_COLOR", colors.secondary.clone()),
        ("ACCENT_COLOR", colors.accent.clone()),
    ])
}

/// Only absolute http(s) links make it into an href
fn safe_url(url: Option<&str>) -> String {
    match url.map(str::trim) {
        Some(u) if u.starts_with("https://") || u.starts_with("http://") => html_escape(u),
        _ => String::new(),
    }
}

fn skills_block(data: &ResumeData) -> String {
    data.skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("<span class=\"skill\">{}</span>", html_escape(s.trim())))
        .collect::<Vec<_>>()
        .join("")
}

fn experience_block(data: &ResumeData) -> String {
    data.experience
        .iter()
        .map(|exp| {
            let mut meta = html_escape(&exp.duration);
            if let Some(location) = exp.location.as_deref().filter(|l| !l.trim().is_empty()) {
                meta.push_str(&format!(" &middot; {}", html_escape(location)));
            }
            let points: String = exp
                .description
                .iter()
                .map(|d| format!("<li>{}</li>", html_escape(d)))
                .collect();
            format!(
                "<div class=\"item\"><h3>{} at {}</h3><p class=\"meta\">{}</p><ul>{}</ul></div>",
                html_escape(&exp.title),
                html_escape(&exp.company),
                meta,
                points
            )
        })
        .collect()
}

fn projects_block(data: &ResumeData) -> String {
    data.projects
        .iter()
        .map(|project| {
            let mut links = String::new();
            for (label, url) in [
                ("Code", project.github_url.as_deref()),
                ("Live", project.live_url.as_deref()),
            ] {
                let href = safe_url(url);
                if !href.is_empty() {
                    links.push_str(&format!("<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>", href, label));
                }
            }
            format!(
                "<div class=\"item\"><h3>{}</h3><p>{}</p><p class=\"tech\">{}</p><p class=\"links\">{}</p></div>",
                html_escape(&project.name),
                html_escape(&project.description),
                html_escape(&project.technologies.join(", ")),
                links
            )
        })
        .collect()
}

fn education_block(data: &ResumeData) -> String {
    data.education
        .iter()
        .map(|edu| {
            let mut detail = html_escape(&edu.institution);
            if let Some(year) = edu.year.as_deref().filter(|y| !y.trim().is_empty()) {
                detail.push_str(&format!(" ({})", html_escape(year)));
            }
            if let Some(cgpa) = edu.cgpa.as_deref().filter(|c| !c.trim().is_empty()) {
                detail.push_str(&format!(" &middot; CGPA {}", html_escape(cgpa)));
            }
            format!(
                "<div class=\"item\"><h3>{}</h3><p>{}</p></div>",
                html_escape(&edu.degree),
                detail
            )
        })
        .collect()
}

/// Professional headline: explicit title, else the latest role
fn headline(data: &ResumeData) -> String {
    data.personal_details
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| data.experience.first().map(|e| e.title.clone()))
        .unwrap_or_else(|| "Portfolio".to_string())
}

/// Produces the complete HTML document with CSS and JS inlined
pub fn render_portfolio(template: &PortfolioTemplate, data: &ResumeData) -> String {
    let colors = color_values(&template.colors());
    let css = fill(&template.css, &colors);
    let js = fill(&template.js, &colors);

    let details = &data.personal_details;
    let text = |value: Option<&String>| html_escape(value.map(String::as_str).unwrap_or_default().trim());

    let mut values: HashMap<&str, String> = colors;
    values.extend([
        ("FULL_NAME", html_escape(details.full_name.trim())),
        ("EMAIL", html_escape(details.email.trim())),
        ("PHONE", text(details.phone.as_ref())),
        ("LOCATION", text(details.location.as_ref())),
        ("LINKEDIN", safe_url(details.linkedin.as_deref())),
        ("GITHUB", safe_url(details.github.as_deref())),
        ("BIO", text(details.bio.as_ref())),
        ("TITLE", html_escape(&headline(data))),
        ("SKILLS", skills_block(data)),
        ("EXPERIENCE", experience_block(data)),
        ("PROJECTS", projects_block(data)),
        ("EDUCATION", education_block(data)),
        ("CSS", css),
        ("JS", js),
    ]);

    fill(&template.html, &values)
}
