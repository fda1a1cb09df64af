use chrono::{DateTime, Utc};

use crate::analysis::enricher::Enrichment;
use crate::models::{ReadmeQuality, Repository, RepositoryAnalysis};

/// Section keywords looked for (as case-insensitive substrings) when grading
/// a README.
pub const README_KEYWORDS: [&str; 7] = [
    "installation",
    "usage",
    "setup",
    "example",
    "screenshot",
    "demo",
    "contributing",
];

pub struct ScoringEngine {
    weights: HealthWeights,
}

#[derive(Debug, Clone)]
pub struct HealthWeights {
    pub readme_present: u32,
    pub description: u32,
    pub per_star: u32,
    pub stars_cap: u32,
    pub issues_enabled: u32,
    /// `(max_days_exclusive, bonus)` tiers, checked in order.
    pub recency_tiers: [(i64, u32); 3],
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            readme_present: 20,
            description: 10,
            per_star: 2,
            stars_cap: 20,
            issues_enabled: 5,
            recency_tiers: [(30, 15), (90, 10), (180, 5)],
        }
    }
}

impl HealthWeights {
    pub fn quality_bonus(&self, quality: ReadmeQuality) -> u32 {
        match quality {
            ReadmeQuality::Excellent => 20,
            ReadmeQuality::Good => 15,
            ReadmeQuality::Basic => 10,
            ReadmeQuality::Minimal => 5,
            ReadmeQuality::None => 0,
        }
    }

    pub fn recency_bonus(&self, days_since_update: i64) -> u32 {
        self.recency_tiers
            .iter()
            .find(|(max_days, _)| days_since_update < *max_days)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0)
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            weights: HealthWeights::default(),
        }
    }

    pub fn weights(&self) -> &HealthWeights {
        &self.weights
    }

    pub fn classify_readme_quality(&self, content: &str) -> ReadmeQuality {
        classify_readme_quality(content)
    }

    pub fn health_score(
        &self,
        repo: &Repository,
        has_readme: bool,
        quality: ReadmeQuality,
        now: DateTime<Utc>,
    ) -> u8 {
        let w = &self.weights;
        let mut score = 0u32;

        if has_readme {
            score += w.readme_present + w.quality_bonus(quality);
        }

        if repo.has_description() {
            score += w.description;
        }

        if repo.stargazers_count > 0 {
            score += repo.stargazers_count.saturating_mul(w.per_star).min(w.stars_cap);
        }

        if repo.has_issues {
            score += w.issues_enabled;
        }

        score += w.recency_bonus(repo.days_since_update(now));

        score.min(100) as u8
    }

    /// Builds the scored record for one repository from its enrichment.
    pub fn analyze_repository(
        &self,
        repo: &Repository,
        enrichment: Enrichment,
        now: DateTime<Utc>,
    ) -> RepositoryAnalysis {
        let has_readme = enrichment.readme.present;
        let readme_quality = self.classify_readme_quality(&enrichment.readme.text);
        let health_score = self.health_score(repo, has_readme, readme_quality, now);

        RepositoryAnalysis {
            name: repo.name.clone(),
            description: repo.description.clone(),
            languages: enrichment.languages,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            last_updated: repo.updated_at,
            has_readme,
            readme_quality,
            health_score,
            url: repo.html_url.clone(),
            is_private: repo.private,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Grades README text by how many section keywords it mentions.
pub fn classify_readme_quality(content: &str) -> ReadmeQuality {
    if content.is_empty() {
        return ReadmeQuality::None;
    }

    let lower = content.to_lowercase();
    let hits = README_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count();

    match hits {
        h if h >= 5 => ReadmeQuality::Excellent,
        h if h >= 3 => ReadmeQuality::Good,
        h if h >= 1 => ReadmeQuality::Basic,
        _ => ReadmeQuality::Minimal,
    }
}
