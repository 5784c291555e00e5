use std::sync::Arc;

use crate::{
    entities::portfolio::{
        Job, MapLocationResponse, Portfolio, PortfolioResponse, Profile, Project, SocialLink,
        TechCategory, Technology,
    },
    errors::AppError,
    settings::MapConfig,
};

const MAP_STYLE_BASE: &str = "https://api.maptiler.com/maps";

/// Read-only access to the portfolio document.
#[derive(Clone)]
pub struct PortfolioHandler {
    content: Arc<Portfolio>,
    style_url: Option<String>,
}

impl PortfolioHandler {
    pub fn new(content: Portfolio, map: &MapConfig) -> Self {
        PortfolioHandler {
            content: Arc::new(content),
            style_url: map_style_url(map),
        }
    }

    pub fn portfolio(&self) -> PortfolioResponse {
        let content = self.content.as_ref();
        PortfolioResponse {
            profile: content.profile.clone(),
            jobs: content.jobs.clone(),
            projects: content.projects.clone(),
            technologies: content.technologies.clone(),
            social_links: content.social_links.clone(),
            location: self.location(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.content.profile
    }

    pub fn jobs(&self) -> &[Job] {
        &self.content.jobs
    }

    pub fn projects(&self) -> &[Project] {
        &self.content.projects
    }

    pub fn project_by_slug(&self, slug: &str) -> Result<&Project, AppError> {
        self.content
            .projects
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| AppError::NotFound(format!("project '{}'", slug)))
    }

    /// All technologies, or only those in `category` when given.
    pub fn technologies(&self, category: Option<&str>) -> Result<Vec<Technology>, AppError> {
        let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(raw) => Some(raw.parse::<TechCategory>().map_err(AppError::InvalidInput)?),
            None => None,
        };

        Ok(self.content
            .technologies
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .cloned()
            .collect())
    }

    pub fn social_links(&self) -> &[SocialLink] {
        &self.content.social_links
    }

    pub fn location(&self) -> MapLocationResponse {
        MapLocationResponse {
            location: self.content.location.clone(),
            style_url: self.style_url.clone(),
        }
    }
}

fn map_style_url(map: &MapConfig) -> Option<String> {
    let style_id = map.style_id.trim();
    let key = map.api_key.trim();

    if style_id.is_empty() || key.is_empty() {
        return None;
    }

    Some(format!(
        "{}/{}/style.json?key={}",
        MAP_STYLE_BASE,
        urlencode(style_id),
        urlencode(key)
    ))
}

fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
