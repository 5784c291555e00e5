use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::SLUG_RE;

// ───── Content Document ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Portfolio {
    #[validate(nested)]
    pub profile: Profile,

    #[serde(default)]
    #[validate(nested)]
    pub jobs: Vec<Job>,

    #[serde(default)]
    #[validate(nested)]
    pub projects: Vec<Project>,

    #[serde(default)]
    #[validate(nested)]
    pub technologies: Vec<Technology>,

    #[serde(default)]
    #[validate(nested)]
    pub social_links: Vec<SocialLink>,

    #[validate(nested)]
    pub location: MapLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1, message = "Profile name is required"))]
    pub name: String,
    pub headline: String,
    pub bio: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Job {
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub role: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Project {
    #[validate(length(min = 1, max = 64), regex(path = *SLUG_RE, message = "Slug must be lowercase letters, digits and hyphens"))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub link: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub related_links: Vec<RelatedLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RelatedLink {
    pub title: String,
    #[validate(url)]
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechCategory {
    Frontend,
    Backend,
    Devops,
    Tools,
}

impl std::str::FromStr for TechCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(TechCategory::Frontend),
            "backend" => Ok(TechCategory::Backend),
            "devops" => Ok(TechCategory::Devops),
            "tools" => Ok(TechCategory::Tools),
            other => Err(format!("Unknown technology category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Technology {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: TechCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SocialLink {
    pub label: String,
    #[validate(length(min = 1))]
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MapLocation {
    pub label: String,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: f64,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: f64,
    #[serde(default = "default_zoom")]
    #[validate(range(min = 0.0, max = 22.0))]
    pub zoom: f64,
}

fn default_zoom() -> f64 {
    3.0
}

// ───── API Response Models ──────────────────────────────────────────

/// Map widget settings with the tile style resolved server-side.
#[derive(Debug, Clone, Serialize)]
pub struct MapLocationResponse {
    #[serde(flatten)]
    pub location: MapLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioResponse {
    pub profile: Profile,
    pub jobs: Vec<Job>,
    pub projects: Vec<Project>,
    pub technologies: Vec<Technology>,
    pub social_links: Vec<SocialLink>,
    pub location: MapLocationResponse,
}
