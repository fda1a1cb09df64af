use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::analysis::best_effort::best_effort;
use crate::analysis::enricher::{ReadmeContent, RepositoryEnricher};
use crate::analysis::scoring::classify_readme_quality;
use crate::error::Result;
use crate::github::GitHubApi;
use crate::models::{CommitDigest, CommitSummary, ReadmeReport, Repository, RepositoryReport};

const RECENT_COMMITS: u32 = 10;

/// README sections a complete project page is expected to have, each
/// satisfied by any of its keywords.
pub const REQUIRED_SECTIONS: [(&str, &[&str]); 5] = [
    ("Overview/Description", &["overview", "about", "description"]),
    ("Installation", &["installation", "install", "setup"]),
    ("Usage", &["usage", "example", "how to"]),
    ("Tech Stack", &["tech", "technology", "built with"]),
    ("Screenshots/Demo", &["screenshot", "demo", "preview"]),
];

pub struct RepositoryReporter {
    api: Arc<dyn GitHubApi>,
    enricher: RepositoryEnricher,
}

impl RepositoryReporter {
    pub fn new(api: Arc<dyn GitHubApi>) -> Self {
        Self {
            enricher: RepositoryEnricher::new(api.clone()),
            api,
        }
    }

    pub async fn report(&self, owner: &str, repo_name: &str, now: DateTime<Utc>) -> Result<RepositoryReport> {
        let url = self.api.urls().repo(owner, repo_name);
        let body = self.api.fetch_resource(&url).await?;
        let repo: Repository = serde_json::from_value(body)?;

        let (languages, readme, recent_commits) = futures::join!(
            self.enricher.fetch_languages(&repo),
            self.enricher.fetch_readme(owner, repo_name),
            self.fetch_recent_commits(owner, repo_name),
        );

        let readme_analysis = review_readme(&readme);
        let suggestions = suggest_improvements(&repo, &readme_analysis, now);

        Ok(RepositoryReport {
            name: repo.name,
            description: repo.description,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            watchers: repo.watchers_count,
            languages,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            homepage: repo.homepage,
            url: repo.html_url,
            readme_analysis,
            recent_commits,
            suggestions,
            readme_content: readme.text,
        })
    }

    async fn fetch_recent_commits(&self, owner: &str, repo: &str) -> Vec<CommitDigest> {
        best_effort(
            format!("commits for {}/{}", owner, repo),
            self.try_fetch_recent_commits(owner, repo),
        )
        .await
    }

    async fn try_fetch_recent_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitDigest>> {
        let url = self.api.urls().recent_commits(owner, repo, RECENT_COMMITS);
        let body = self.api.fetch_resource(&url).await?;
        let commits: Vec<CommitSummary> = serde_json::from_value(body)?;
        Ok(commits
            .into_iter()
            .take(RECENT_COMMITS as usize)
            .map(CommitDigest::from)
            .collect())
    }
}

pub fn review_readme(readme: &ReadmeContent) -> ReadmeReport {
    if !readme.present {
        return ReadmeReport {
            has_readme: false,
            quality: classify_readme_quality(""),
            missing_sections: REQUIRED_SECTIONS
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
        };
    }

    ReadmeReport {
        has_readme: true,
        quality: classify_readme_quality(&readme.text),
        missing_sections: missing_sections(&readme.text),
    }
}

pub fn missing_sections(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    REQUIRED_SECTIONS
        .iter()
        .filter(|(_, keywords)| !keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Independent checks, each adding at most one suggestion.
pub fn suggest_improvements(
    repo: &Repository,
    readme: &ReadmeReport,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !repo.has_description() {
        suggestions.push("Add a clear, concise description to your repository".to_string());
    }

    if !readme.has_readme {
        suggestions.push("Create a comprehensive README.md file".to_string());
    } else if !readme.missing_sections.is_empty() {
        suggestions.push(format!(
            "Add missing README sections: {}",
            readme.missing_sections.join(", ")
        ));
    }

    if repo.stargazers_count == 0 {
        suggestions.push("Promote your project to gain stars and visibility".to_string());
    }

    if !repo.has_homepage() {
        suggestions.push("Add a live demo URL if applicable".to_string());
    }

    if repo.open_issues_count > 10 {
        suggestions.push("Address open issues to improve project health".to_string());
    }

    if repo.days_since_update(now) > 180 {
        suggestions
            .push("Update the repository or archive it if no longer maintained".to_string());
    }

    suggestions
}
