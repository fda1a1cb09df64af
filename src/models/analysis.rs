use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::commit::CommitDigest;
use super::user::LanguageBreakdown;

/// README completeness, ordered from worst to best.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReadmeQuality {
    #[default]
    None,
    Minimal,
    Basic,
    Good,
    Excellent,
}

impl std::fmt::Display for ReadmeQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadmeQuality::None => write!(f, "none"),
            ReadmeQuality::Minimal => write!(f, "minimal"),
            ReadmeQuality::Basic => write!(f, "basic"),
            ReadmeQuality::Good => write!(f, "good"),
            ReadmeQuality::Excellent => write!(f, "excellent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    pub name: String,
    pub description: Option<String>,
    pub languages: LanguageBreakdown,
    pub stars: u32,
    pub forks: u32,
    pub open_issues: u32,
    pub last_updated: DateTime<Utc>,
    pub has_readme: bool,
    pub readme_quality: ReadmeQuality,
    pub health_score: u8,
    pub url: String,
    pub is_private: bool,
}

impl RepositoryAnalysis {
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    pub username: String,
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub repositories: Vec<RepositoryAnalysis>,
    pub total_repos: usize,
    pub total_stars: u32,
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadmeReport {
    pub has_readme: bool,
    pub quality: ReadmeQuality,
    pub missing_sections: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub name: String,
    pub description: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub open_issues: u32,
    pub watchers: u32,
    pub languages: LanguageBreakdown,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub homepage: Option<String>,
    pub url: String,
    pub readme_analysis: ReadmeReport,
    pub recent_commits: Vec<CommitDigest>,
    pub suggestions: Vec<String>,
    pub readme_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedReadme {
    pub enhanced_readme: String,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::High => write!(f, "high"),
            Impact::Medium => write!(f, "medium"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionBuckets {
    pub quick_wins: Vec<Suggestion>,
    pub medium_term: Vec<Suggestion>,
    pub long_term: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEnhancement {
    pub current_score: u8,
    pub potential_score: u8,
    pub suggestions: SuggestionBuckets,
    pub priority_actions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_quality_is_ordered() {
        assert!(ReadmeQuality::None < ReadmeQuality::Minimal);
        assert!(ReadmeQuality::Minimal < ReadmeQuality::Basic);
        assert!(ReadmeQuality::Basic < ReadmeQuality::Good);
        assert!(ReadmeQuality::Good < ReadmeQuality::Excellent);
    }

    #[test]
    fn readme_quality_serializes_lowercase() {
        let json = serde_json::to_string(&ReadmeQuality::Excellent).unwrap();
        assert_eq!(json, "\"excellent\"");
        let parsed: ReadmeQuality = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(parsed, ReadmeQuality::Basic);
    }
}
