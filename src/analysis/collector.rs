use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::best_effort::best_effort;
use crate::error::Result;
use crate::github::{GitHubApi, Paginator};
use crate::models::Repository;

pub struct RepositoryCollector {
    api: Arc<dyn GitHubApi>,
}

impl RepositoryCollector {
    pub fn new(api: Arc<dyn GitHubApi>) -> Self {
        Self { api }
    }

    /// Public repositories followed by any private ones the credential can
    /// see for `username`. Only the public listing can fail the call.
    pub async fn collect(&self, username: &str) -> Result<Vec<Repository>> {
        let public = self.fetch_public(username).await?;
        tracing::info!("Found {} public repositories for {}", public.len(), username);

        let private = best_effort(
            format!("private repositories for {}", username),
            self.fetch_private(username),
        )
        .await;
        if !private.is_empty() {
            tracing::info!("Found {} private repositories for {}", private.len(), username);
        }

        Ok(merge_repositories(public, private))
    }

    async fn fetch_public(&self, username: &str) -> Result<Vec<Repository>> {
        let url = self.api.urls().user_repos(username);
        let body = self.api.fetch_resource(&url).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn fetch_private(&self, username: &str) -> Result<Vec<Repository>> {
        if !self.api.has_credential() {
            tracing::debug!("No credential configured, skipping private repositories");
            return Ok(Vec::new());
        }

        let url = self.api.urls().authenticated_repos();
        let params = vec![
            ("visibility".to_string(), "private".to_string()),
            ("affiliation".to_string(), "owner".to_string()),
        ];
        let items = Paginator::new(self.api.as_ref())
            .fetch_all(&url, &params)
            .await?;

        let repos: Vec<Repository> = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<_, _>>()?;

        Ok(owned_private_repositories(repos, username))
    }
}

/// Keeps private repositories owned by `username`; the credential may belong
/// to somebody else.
pub fn owned_private_repositories(repos: Vec<Repository>, username: &str) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(|r| r.private && r.is_owned_by(username))
        .collect()
}

/// Public entries first, then private entries whose id was not seen yet.
pub fn merge_repositories(public: Vec<Repository>, private: Vec<Repository>) -> Vec<Repository> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(public.len() + private.len());

    for repo in public.into_iter().chain(private) {
        if seen.insert(repo.id) {
            merged.push(repo);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::github::testing::{repo_json, FakeGitHub, TEST_API};
    use serde_json::{json, Value};

    fn repo(owner: &str, id: u64, name: &str) -> Repository {
        serde_json::from_value(repo_json(owner, id, name)).unwrap()
    }

    fn private_json(owner: &str, id: u64, name: &str) -> Value {
        let mut value = repo_json(owner, id, name);
        value["private"] = json!(true);
        value
    }

    #[test]
    fn merge_drops_overlapping_private_entries() {
        let public = vec![repo("alice", 1, "a"), repo("alice", 2, "b")];
        let mut shadow = repo("alice", 2, "b-private-copy");
        shadow.private = true;
        let private = vec![shadow, repo("alice", 3, "c")];

        let merged = merge_repositories(public, private);
        let ids: Vec<u64> = merged.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(merged[1].name, "b");
    }

    #[test]
    fn merge_size_is_union_of_identities() {
        let public: Vec<_> = (1..=4).map(|i| repo("alice", i, "p")).collect();
        let private: Vec<_> = (3..=6).map(|i| repo("alice", i, "q")).collect();
        let merged = merge_repositories(public, private);
        assert_eq!(merged.len(), 4 + 4 - 2);
    }

    #[test]
    fn foreign_private_repositories_are_dropped() {
        let mut mine = repo("Alice", 1, "mine");
        mine.private = true;
        let mut theirs = repo("bob", 2, "theirs");
        theirs.private = true;
        let public_listed = repo("alice", 3, "public");

        let kept = owned_private_repositories(vec![mine, theirs, public_listed], "alice");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "mine");
    }

    #[tokio::test]
    async fn collects_public_and_owned_private() {
        let fake = FakeGitHub::new(TEST_API);
        let public_url = fake.urls().user_repos("alice");
        let private_url = fake.urls().authenticated_repos();
        let fake = fake
            .authenticated()
            .with_json(&public_url, json!([repo_json("alice", 1, "a"), repo_json("alice", 2, "b")]))
            .with_pages(
                &private_url,
                vec![Some(vec![
                    private_json("alice", 2, "b"),
                    private_json("alice", 9, "secret"),
                    private_json("bob", 10, "not-mine"),
                ])],
            );

        let collector = RepositoryCollector::new(Arc::new(fake));
        let repos = collector.collect("alice").await.unwrap();
        let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "secret"]);
        assert!(!repos[1].private);
    }

    #[tokio::test]
    async fn private_sweep_is_skipped_without_credential() {
        let fake = FakeGitHub::new(TEST_API);
        let public_url = fake.urls().user_repos("alice");
        let private_url = fake.urls().authenticated_repos();
        let fake = Arc::new(
            fake.with_json(&public_url, json!([repo_json("alice", 1, "a")]))
                .with_pages(&private_url, vec![Some(vec![private_json("alice", 2, "x")])]),
        );

        let collector = RepositoryCollector::new(fake.clone());
        let repos = collector.collect("alice").await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(fake.page_requests(&private_url), 0);
    }

    #[tokio::test]
    async fn private_sweep_failure_is_absorbed() {
        let fake = FakeGitHub::new(TEST_API);
        let public_url = fake.urls().user_repos("alice");
        let private_url = fake.urls().authenticated_repos();
        // A malformed entry makes decoding of the sweep fail.
        let fake = fake
            .authenticated()
            .with_json(&public_url, json!([repo_json("alice", 1, "a")]))
            .with_pages(&private_url, vec![Some(vec![json!({ "id": "bogus" })])]);

        let repos = RepositoryCollector::new(Arc::new(fake))
            .collect("alice")
            .await
            .unwrap();
        assert_eq!(repos.len(), 1);
    }

    #[tokio::test]
    async fn public_listing_failure_propagates() {
        let fake = FakeGitHub::new(TEST_API);
        let public_url = fake.urls().user_repos("alice");
        let fake = fake.with_status(&public_url, 403);

        let err = RepositoryCollector::new(Arc::new(fake))
            .collect("alice")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RateLimited { .. }));
    }
}
