use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::config::SiteApiConfig;

/// Site API operations that supply dynamic content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AcademicPrograms,
    NewsEvents,
    Announcements,
    Events,
    Achievements,
    News,
    Downloads,
    Departments,
    Personnel,
    InstitutionalInfo,
    AdmissionsInfo,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AcademicPrograms => "/academic-programs/",
            Endpoint::NewsEvents => "/news-events/",
            Endpoint::Announcements => "/announcements/",
            Endpoint::Events => "/events/",
            Endpoint::Achievements => "/achievements/",
            Endpoint::News => "/news/",
            Endpoint::Downloads => "/downloads/",
            Endpoint::Departments => "/departments/",
            Endpoint::Personnel => "/personnel/",
            Endpoint::InstitutionalInfo => "/institutional-info/",
            Endpoint::AdmissionsInfo => "/admissions-info/",
        }
    }
}

/// Source of raw site content. Implementations return the endpoint's JSON
/// payload or fail; callers isolate failures per source.
#[async_trait]
pub trait SiteContent: Send + Sync {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value>;
}

/// HTTP client for the site content API.
pub struct HttpSiteContent {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSiteContent {
    pub fn new(config: &SiteApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("campuschat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SiteContent for HttpSiteContent {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error from {}: {}", url, response.status());
        }

        response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_endpoint_has_a_path() {
        let endpoints = [
            Endpoint::AcademicPrograms,
            Endpoint::NewsEvents,
            Endpoint::Announcements,
            Endpoint::Events,
            Endpoint::Achievements,
            Endpoint::News,
            Endpoint::Downloads,
            Endpoint::Departments,
            Endpoint::Personnel,
            Endpoint::InstitutionalInfo,
            Endpoint::AdmissionsInfo,
        ];
        for endpoint in endpoints {
            let path = endpoint.path();
            assert!(path.starts_with('/'));
            assert!(path.ends_with('/'));
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = SiteApiConfig {
            base_url: "http://localhost:5000/api/".to_string(),
            timeout_secs: 30,
        };
        let api = HttpSiteContent::new(&config).unwrap();
        assert_eq!(api.base_url, "http://localhost:5000/api");
    }
}
