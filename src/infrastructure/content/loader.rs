use std::{collections::HashSet, path::Path};

use anyhow::{bail, Context};
use tokio::fs;
use validator::Validate;

use crate::entities::portfolio::Portfolio;

const BUILTIN_CONTENT: &str = include_str!("../../../content/portfolio.json");

/// Loads the portfolio document from `path`, or the built-in document when
/// no path is configured.
pub async fn load_portfolio(path: Option<&Path>) -> anyhow::Result<Portfolio> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read content file {}", path.display()))?;
            parse_portfolio(&raw)
                .with_context(|| format!("Invalid content file {}", path.display()))
        }
        None => parse_portfolio(BUILTIN_CONTENT).context("Invalid built-in content"),
    }
}

pub fn parse_portfolio(raw: &str) -> anyhow::Result<Portfolio> {
    let portfolio: Portfolio = serde_json::from_str(raw).context("Content is not valid JSON")?;

    portfolio.validate().context("Content failed validation")?;

    let mut seen = HashSet::new();
    for project in &portfolio.projects {
        if !seen.insert(project.slug.as_str()) {
            bail!("Duplicate project slug: {}", project.slug);
        }
    }

    Ok(portfolio)
}
