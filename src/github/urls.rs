/// Builds endpoint URLs against a configurable API root.
#[derive(Debug, Clone)]
pub struct ApiUrls {
    base_url: String,
}

impl ApiUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user(&self, username: &str) -> String {
        format!("{}/users/{}", self.base_url, username)
    }

    /// First 100 public repositories, most recently updated first.
    pub fn user_repos(&self, username: &str) -> String {
        format!(
            "{}/users/{}/repos?per_page=100&sort=updated",
            self.base_url, username
        )
    }

    pub fn authenticated_repos(&self) -> String {
        format!("{}/user/repos", self.base_url)
    }

    pub fn repo(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}", self.base_url, owner, repo)
    }

    pub fn languages(&self, owner: &str, repo: &str) -> String {
        format!("{}/languages", self.repo(owner, repo))
    }

    pub fn readme(&self, owner: &str, repo: &str) -> String {
        format!("{}/readme", self.repo(owner, repo))
    }

    pub fn recent_commits(&self, owner: &str, repo: &str, count: u32) -> String {
        format!("{}/commits?per_page={}", self.repo(owner, repo), count)
    }
}
