use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analysis::aggregator::PortfolioAggregator;
use crate::analysis::collector::RepositoryCollector;
use crate::analysis::enricher::RepositoryEnricher;
use crate::analysis::reporter::RepositoryReporter;
use crate::analysis::scoring::ScoringEngine;
use crate::config::PipelineConfig;
use crate::enhance::build_enhancement;
use crate::error::Result;
use crate::github::GitHubApi;
use crate::models::{
    GitHubUser, PortfolioAnalysis, PortfolioEnhancement, Repository, RepositoryAnalysis,
    RepositoryReport,
};

pub struct AnalysisPipeline {
    api: Arc<dyn GitHubApi>,
    collector: RepositoryCollector,
    enricher: RepositoryEnricher,
    scoring: ScoringEngine,
    aggregator: PortfolioAggregator,
    reporter: RepositoryReporter,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(api: impl GitHubApi + 'static, config: PipelineConfig) -> Self {
        Self::with_shared(Arc::new(api), config)
    }

    pub fn with_shared(api: Arc<dyn GitHubApi>, config: PipelineConfig) -> Self {
        Self {
            collector: RepositoryCollector::new(api.clone()),
            enricher: RepositoryEnricher::new(api.clone()),
            scoring: ScoringEngine::new(),
            aggregator: PortfolioAggregator::new(),
            reporter: RepositoryReporter::new(api.clone()),
            api,
            config,
        }
    }

    pub async fn analyze_user(&self, username: &str) -> Result<PortfolioAnalysis> {
        self.analyze_user_at(username, Utc::now())
            .await
            .map_err(|e| e.surface(&format!("Error analysing user {}", username)))
    }

    pub async fn analyze_repository(&self, owner: &str, repo: &str) -> Result<RepositoryReport> {
        tracing::info!("Analyzing repository {}/{}", owner, repo);
        self.reporter
            .report(owner, repo, Utc::now())
            .await
            .map_err(|e| e.surface(&format!("Error analysing repo {}/{}", owner, repo)))
    }

    pub async fn enhance_portfolio(&self, username: &str) -> Result<PortfolioEnhancement> {
        let analysis = self.analyze_user(username).await?;
        Ok(build_enhancement(&analysis))
    }

    /// Runs the whole portfolio analysis against a fixed `now`.
    pub async fn analyze_user_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<PortfolioAnalysis> {
        // Step 1: Fetch user profile
        tracing::info!("Fetching GitHub profile for: {}", username);
        let user = self.fetch_user(username).await?;

        // Step 2: Collect public and private repositories
        let repos = self.collector.collect(username).await?;

        // Step 3: Forks never count towards the portfolio
        let repos: Vec<Repository> = repos.into_iter().filter(|r| !r.fork).collect();
        let selected = &repos[..repos.len().min(self.config.max_analyzed_repos)];
        tracing::info!(
            "Analyzing {} of {} original repositories",
            selected.len(),
            repos.len()
        );

        // Step 4: Enrich and score each selected repository
        let analyses = self.analyze_repositories(selected, now).await;

        // Step 5: Aggregate into the portfolio view
        Ok(self.aggregator.aggregate(&user, &repos, analyses, now))
    }

    async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        let url = self.api.urls().user(username);
        let body = self.api.fetch_resource(&url).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn analyze_repositories(
        &self,
        repos: &[Repository],
        now: DateTime<Utc>,
    ) -> Vec<RepositoryAnalysis> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let pb = self.progress_bar(repos.len() as u64);

        let futures = repos.iter().map(|repo| {
            let sem = semaphore.clone();
            let pb = pb.clone();
            async move {
                let _permit = sem.acquire().await.ok();
                let enrichment = self.enricher.enrich(repo).await;
                let analysis = self.scoring.analyze_repository(repo, enrichment, now);
                tracing::debug!(
                    "{}: health {} (README {})",
                    analysis.name,
                    analysis.health_score,
                    analysis.readme_quality
                );
                pb.inc(1);
                analysis
            }
        });

        // join_all keeps input order
        let analyses = join_all(futures).await;
        pb.finish_and_clear();
        analyses
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
