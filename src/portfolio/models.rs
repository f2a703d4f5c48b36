// src/portfolio/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::parse_json_list;
use crate::resume::{Education, Experience, PersonalDetails, Project, ResumeData};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TemplateColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct PortfolioTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub preview_image: Option<String>,
    pub colors: String,   // JSON object
    pub sections: String, // JSON list
    pub html: String,
    pub css: String,
    pub js: String,
    pub is_active: i64,
    pub created_at: String,
}

impl PortfolioTemplate {
    pub fn colors(&self) -> TemplateColors {
        serde_json::from_str(&self.colors).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub preview_image: Option<String>,
    pub colors: TemplateColors,
    pub sections: Vec<String>,
    pub html: String,
    pub css: String,
    pub js: String,
    pub is_active: bool,
}

impl From<PortfolioTemplate> for TemplateResponse {
    fn from(t: PortfolioTemplate) -> Self {
        let colors = t.colors();
        TemplateResponse {
            sections: parse_json_list(Some(&t.sections)),
            colors,
            id: t.id,
            name: t.name,
            description: t.description,
            category: t.category,
            preview_image: t.preview_image,
            html: t.html,
            css: t.css,
            js: t.js,
            is_active: t.is_active != 0,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub template_id: String,
    pub title: String,
    pub data: String, // JSON ResumeData
    pub generated_html: String,
    pub share_token: String,
    pub is_public: i64,
    pub views: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Portfolio {
    pub fn resume_data(&self) -> ResumeData {
        serde_json::from_str(&self.data).unwrap_or_default()
    }
}

pub fn live_url(share_token: &str) -> String {
    format!("/portfolio/view/{}", share_token)
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub id: String,
    pub user_id: String,
    pub template_id: String,
    pub title: String,
    pub data: ResumeData,
    pub share_token: String,
    pub live_url: String,
    pub is_public: bool,
    pub views: i64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl PortfolioResponse {
    /// Detail view; listings leave the HTML out
    pub fn with_html(portfolio: Portfolio) -> Self {
        let html = portfolio.generated_html.clone();
        PortfolioResponse {
            html: Some(html),
            ..PortfolioResponse::from(portfolio)
        }
    }
}

impl From<Portfolio> for PortfolioResponse {
    fn from(p: Portfolio) -> Self {
        PortfolioResponse {
            data: p.resume_data(),
            live_url: live_url(&p.share_token),
            is_public: p.is_public != 0,
            id: p.id,
            user_id: p.user_id,
            template_id: p.template_id,
            title: p.title,
            share_token: p.share_token,
            views: p.views,
            created_at: p.created_at,
            updated_at: p.updated_at,
            html: None,
        }
    }
}

/// Either a full `resume_data` object or its sections at the top level
#[derive(Debug, Deserialize)]
pub struct GeneratePortfolioRequest {
    pub template_id: String,
    pub title: Option<String>,
    pub resume_data: Option<ResumeData>,
    pub personal_details: Option<PersonalDetails>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub is_public: Option<bool>,
}

impl GeneratePortfolioRequest {
    pub fn resume_data(&mut self) -> ResumeData {
        if let Some(data) = self.resume_data.take() {
            return data;
        }
        ResumeData {
            personal_details: self.personal_details.take().unwrap_or_default(),
            education: std::mem::take(&mut self.education),
            experience: std::mem::take(&mut self.experience),
            projects: std::mem::take(&mut self.projects),
            skills: std::mem::take(&mut self.skills),
            certifications: std::mem::take(&mut self.certifications),
            achievements: std::mem::take(&mut self.achievements),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdatePortfolioRequest {
    pub title: Option<String>,
    pub template_id: Option<String>,
    pub resume_data: Option<ResumeData>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePortfolioResponse {
    pub portfolio_id: String,
    pub share_token: String,
    pub live_url: String,
    pub html: String,
}

/// Title used when the request has none
pub fn default_title(data: &ResumeData) -> String {
    let name = data.personal_details.full_name.trim();
    if name.is_empty() {
        "My Portfolio".to_string()
    } else {
        format!("{}'s Portfolio", name)
    }
}
