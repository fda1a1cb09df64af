use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language name to byte count, as reported by the languages endpoint.
pub type LanguageBreakdown = BTreeMap<String, u64>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub owner: RepositoryOwner,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    pub html_url: String,
    pub url: String,
    pub languages_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub open_issues_count: u32,
    #[serde(default)]
    pub watchers_count: u32,
    #[serde(default)]
    pub has_issues: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Repository {
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.is_empty())
            .unwrap_or(false)
    }

    pub fn has_homepage(&self) -> bool {
        self.homepage
            .as_deref()
            .map(|h| !h.trim().is_empty())
            .unwrap_or(false)
    }

    /// Whole days elapsed since the last update, relative to `now`.
    pub fn days_since_update(&self, now: DateTime<Utc>) -> i64 {
        (now - self.updated_at).num_days()
    }

    pub fn is_owned_by(&self, login: &str) -> bool {
        self.owner.login.eq_ignore_ascii_case(login)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// Payload of the README endpoint. `content` is base64 with line breaks.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeFile {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}
