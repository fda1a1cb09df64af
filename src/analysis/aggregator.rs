use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::models::{GitHubUser, PortfolioAnalysis, Repository, RepositoryAnalysis};

/// Days since update below which a repository counts as active.
const ACTIVE_WINDOW_DAYS: i64 = 90;

/// Numeric signals the narrative rules and the overall score are built on.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSignals {
    pub total_stars: u32,
    pub avg_health: f64,
    pub readme_percentage: f64,
    pub active_count: usize,
    pub considered_count: usize,
    pub analyzed_count: usize,
    pub missing_description_count: usize,
    pub languages: BTreeSet<String>,
}

impl PortfolioSignals {
    pub fn compute(
        repos: &[Repository],
        analyses: &[RepositoryAnalysis],
        now: DateTime<Utc>,
    ) -> Self {
        let analyzed_count = analyses.len();
        let total_stars = analyses.iter().map(|a| a.stars).sum();

        let (avg_health, readme_percentage) = if analyzed_count == 0 {
            (0.0, 0.0)
        } else {
            let health_sum: u32 = analyses.iter().map(|a| a.health_score as u32).sum();
            let with_readme = analyses.iter().filter(|a| a.has_readme).count();
            (
                health_sum as f64 / analyzed_count as f64,
                with_readme as f64 / analyzed_count as f64 * 100.0,
            )
        };

        let active_count = repos
            .iter()
            .filter(|r| r.days_since_update(now) < ACTIVE_WINDOW_DAYS)
            .count();

        let languages = analyses
            .iter()
            .flat_map(|a| a.languages.keys().cloned())
            .collect();

        Self {
            total_stars,
            avg_health,
            readme_percentage,
            active_count,
            considered_count: repos.len(),
            analyzed_count,
            missing_description_count: analyses.iter().filter(|a| !a.has_description()).count(),
            languages,
        }
    }

    pub fn overall_score(&self) -> u8 {
        let raw = self.avg_health * 0.6
            + (self.readme_percentage / 100.0) * 20.0
            + self.total_stars.min(20) as f64;
        raw.floor().clamp(0.0, 100.0) as u8
    }
}

/// Textual findings, in the order the rules fire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Narrative {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

pub struct PortfolioAggregator;

impl PortfolioAggregator {
    pub fn new() -> Self {
        Self
    }

    /// `repos` are all non-fork repositories considered for the user;
    /// `analyses` the scored subset, in processing order.
    pub fn aggregate(
        &self,
        user: &GitHubUser,
        repos: &[Repository],
        analyses: Vec<RepositoryAnalysis>,
        now: DateTime<Utc>,
    ) -> PortfolioAnalysis {
        let signals = PortfolioSignals::compute(repos, &analyses, now);
        let narrative = self.narrate(&signals);
        let overall_score = signals.overall_score();

        tracing::info!(
            "Portfolio score for {}: {} ({} repositories, {} stars)",
            user.login,
            overall_score,
            analyses.len(),
            signals.total_stars
        );

        PortfolioAnalysis {
            username: user.login.clone(),
            overall_score,
            strengths: narrative.strengths,
            weaknesses: narrative.weaknesses,
            recommendations: narrative.recommendations,
            total_repos: analyses.len(),
            total_stars: signals.total_stars,
            repositories: analyses,
            profile_url: user.html_url.clone(),
        }
    }

    pub fn narrate(&self, signals: &PortfolioSignals) -> Narrative {
        let mut narrative = Narrative {
            strengths: self.detect_strengths(signals),
            ..Default::default()
        };
        self.detect_weaknesses(signals, &mut narrative);
        self.general_recommendations(signals, &mut narrative.recommendations);
        narrative
    }

    fn detect_strengths(&self, s: &PortfolioSignals) -> Vec<String> {
        let mut strengths = Vec::new();

        if s.total_stars > 50 {
            strengths.push(format!(
                "Strong community engagement with {} total stars",
                s.total_stars
            ));
        } else if s.total_stars > 10 {
            strengths.push(format!(
                "Growing community presence with {} stars",
                s.total_stars
            ));
        }

        if s.readme_percentage > 80.0 {
            strengths.push(format!(
                "Excellent documentation coverage ({:.0}% of repos have READMEs)",
                s.readme_percentage
            ));
        } else if s.readme_percentage > 50.0 {
            strengths.push(format!(
                "Good documentation practices ({:.0}% have READMEs)",
                s.readme_percentage
            ));
        }

        if s.active_count as f64 > s.considered_count as f64 * 0.5 {
            strengths.push(format!(
                "Active developer with {} recently updated repositories",
                s.active_count
            ));
        }

        if s.languages.len() > 5 {
            strengths.push(format!(
                "Diverse technical stack across {} languages",
                s.languages.len()
            ));
        }

        strengths
    }

    fn detect_weaknesses(&self, s: &PortfolioSignals, narrative: &mut Narrative) {
        let mut flag = |weakness: &str, recommendation: &str| {
            narrative.weaknesses.push(weakness.to_string());
            narrative.recommendations.push(recommendation.to_string());
        };

        if s.readme_percentage < 50.0 {
            flag(
                "Many repositories lack proper documentation",
                "Add comprehensive READMEs to all major projects",
            );
        }

        if s.total_stars < 10 {
            flag(
                "Limited community engagement",
                "Promote projects on social media and developer communities",
            );
        }

        if (s.active_count as f64) < s.considered_count as f64 * 0.3 {
            flag(
                "Several projects appear inactive",
                "Archive inactive projects or add maintenance status badges",
            );
        }

        if s.missing_description_count as f64 > s.analyzed_count as f64 * 0.3 {
            flag(
                "Many repositories lack descriptions",
                "Add clear, concise descriptions to all repositories",
            );
        }
    }

    fn general_recommendations(&self, s: &PortfolioSignals, recommendations: &mut Vec<String>) {
        if s.analyzed_count < 5 {
            recommendations.push("Build more diverse projects to showcase your skills".to_string());
        }

        if !s.languages.contains("JavaScript") && !s.languages.contains("TypeScript") {
            recommendations.push(
                "Consider adding web development projects to broaden your portfolio".to_string(),
            );
        }

        recommendations.push("Add live demos or screenshots to showcase your work".to_string());
        recommendations.push("Ensure all repos have proper licenses".to_string());
    }
}

impl Default for PortfolioAggregator {
    fn default() -> Self {
        Self::new()
    }
}
