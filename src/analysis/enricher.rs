use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::analysis::best_effort::best_effort;
use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::models::{LanguageBreakdown, ReadmeFile, Repository};

/// Decoded README text. `present` is false when the README could not be
/// fetched or decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadmeContent {
    pub text: String,
    pub present: bool,
}

/// Sub-resources gathered for one repository.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub languages: LanguageBreakdown,
    pub readme: ReadmeContent,
}

pub struct RepositoryEnricher {
    api: Arc<dyn GitHubApi>,
}

impl RepositoryEnricher {
    pub fn new(api: Arc<dyn GitHubApi>) -> Self {
        Self { api }
    }

    /// Languages and README are fetched together; neither can fail the call.
    pub async fn enrich(&self, repo: &Repository) -> Enrichment {
        let (languages, readme) = futures::join!(
            self.fetch_languages(repo),
            self.fetch_readme(&repo.owner.login, &repo.name),
        );
        Enrichment { languages, readme }
    }

    pub async fn fetch_languages(&self, repo: &Repository) -> LanguageBreakdown {
        best_effort(
            format!("languages for {}", repo.name),
            self.try_fetch_languages(repo),
        )
        .await
    }

    pub async fn fetch_readme(&self, owner: &str, repo: &str) -> ReadmeContent {
        best_effort(
            format!("README for {}/{}", owner, repo),
            self.try_fetch_readme(owner, repo),
        )
        .await
    }

    async fn try_fetch_languages(&self, repo: &Repository) -> Result<LanguageBreakdown> {
        let body = self.api.fetch_resource(&repo.languages_url).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn try_fetch_readme(&self, owner: &str, repo: &str) -> Result<ReadmeContent> {
        let url = self.api.urls().readme(owner, repo);
        let body = self.api.fetch_resource(&url).await?;
        let file: ReadmeFile = serde_json::from_value(body)?;
        Ok(ReadmeContent {
            text: decode_readme(&file)?,
            present: true,
        })
    }
}

/// Decodes the base64 payload of the README endpoint into UTF-8 text.
pub fn decode_readme(file: &ReadmeFile) -> Result<String> {
    if let Some(encoding) = file.encoding.as_deref() {
        if !encoding.eq_ignore_ascii_case("base64") {
            return Err(Error::Decode(format!("unsupported encoding {}", encoding)));
        }
    }

    let compact: String = file
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::Decode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| Error::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::{readme_json, repo_json, FakeGitHub, TEST_API};
    use serde_json::json;

    fn repo(owner: &str, id: u64, name: &str) -> Repository {
        serde_json::from_value(repo_json(owner, id, name)).unwrap()
    }

    #[test]
    fn decodes_wrapped_base64() {
        let file: ReadmeFile =
            serde_json::from_value(readme_json("# Title\n\n## Installation\ncargo install\n"))
                .unwrap();
        let text = decode_readme(&file).unwrap();
        assert!(text.starts_with("# Title"));
        assert!(text.contains("## Installation"));
    }

    #[test]
    fn rejects_invalid_payloads() {
        let garbage = ReadmeFile {
            content: "!!!not base64!!!".to_string(),
            encoding: Some("base64".to_string()),
        };
        assert!(matches!(decode_readme(&garbage), Err(Error::Decode(_))));

        let not_utf8 = ReadmeFile {
            content: STANDARD.encode([0xff, 0xfe, 0xfd]),
            encoding: None,
        };
        assert!(matches!(decode_readme(&not_utf8), Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn enriches_with_languages_and_readme() {
        let fake = FakeGitHub::new(TEST_API)
            .with_languages("alice", "app", &[("Rust", 1200), ("Shell", 40)])
            .with_readme("alice", "app", "Usage: run it");

        let enricher = RepositoryEnricher::new(Arc::new(fake));
        let enrichment = enricher.enrich(&repo("alice", 1, "app")).await;

        assert_eq!(enrichment.languages.get("Rust"), Some(&1200));
        assert_eq!(enrichment.languages.len(), 2);
        assert!(enrichment.readme.present);
        assert_eq!(enrichment.readme.text, "Usage: run it");
    }

    #[tokio::test]
    async fn missing_sub_resources_degrade_independently() {
        let urls = crate::github::ApiUrls::new(TEST_API);
        let fake = FakeGitHub::new(TEST_API)
            .with_status(&urls.languages("alice", "app"), 500)
            .with_readme("alice", "app", "hello");

        let enricher = RepositoryEnricher::new(Arc::new(fake));
        let enrichment = enricher.enrich(&repo("alice", 1, "app")).await;
        assert!(enrichment.languages.is_empty());
        assert!(enrichment.readme.present);

        let fake = FakeGitHub::new(TEST_API).with_languages("alice", "app", &[("Go", 10)]);
        let enricher = RepositoryEnricher::new(Arc::new(fake));
        let enrichment = enricher.enrich(&repo("alice", 1, "app")).await;
        assert_eq!(enrichment.languages.len(), 1);
        assert_eq!(enrichment.readme, ReadmeContent::default());
    }

    #[tokio::test]
    async fn undecodable_readme_counts_as_absent() {
        let urls = crate::github::ApiUrls::new(TEST_API);
        let fake = FakeGitHub::new(TEST_API)
            .with_json(&urls.readme("alice", "app"), json!({ "content": "%%%", "encoding": "base64" }));

        let readme = RepositoryEnricher::new(Arc::new(fake))
            .fetch_readme("alice", "app")
            .await;
        assert!(!readme.present);
        assert!(readme.text.is_empty());
    }
}
