use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub max_analyzed_repos: usize,
    pub concurrency_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: DEFAULT_API_BASE.to_string(),
            http_timeout_secs: 15,
            max_analyzed_repos: 20,
            concurrency_limit: 4,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let github_token = lookup("GITHUB_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let api_base_url = lookup("GITHUB_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);

        let http_timeout_secs = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.http_timeout_secs);

        let max_analyzed_repos = lookup("MAX_ANALYZED_REPOS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_analyzed_repos);

        let concurrency_limit = lookup("CONCURRENCY_LIMIT")
            .and_then(|v| v.parse().ok())
            .filter(|v: &usize| *v > 0)
            .unwrap_or(defaults.concurrency_limit);

        Self {
            github_token,
            api_base_url,
            http_timeout_secs,
            max_analyzed_repos,
            concurrency_limit,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_analyzed_repos: usize,
    pub concurrency_limit: usize,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_analyzed_repos: config.max_analyzed_repos,
            concurrency_limit: config.concurrency_limit,
            show_progress: false,
        }
    }
}
