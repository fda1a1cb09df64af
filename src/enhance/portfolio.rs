use crate::models::{Impact, PortfolioAnalysis, PortfolioEnhancement, Suggestion, SuggestionBuckets};

const SCORE_HEADROOM: u8 = 35;
const PRIORITY_ACTIONS: usize = 3;

fn suggestion(title: impl Into<String>, description: &str, impact: Impact) -> Suggestion {
    Suggestion {
        title: title.into(),
        description: description.to_string(),
        impact,
    }
}

/// Buckets static improvement ideas for an analyzed portfolio.
pub fn build_enhancement(analysis: &PortfolioAnalysis) -> PortfolioEnhancement {
    let mut buckets = SuggestionBuckets::default();

    if analysis.total_stars < 50 {
        buckets.quick_wins.push(suggestion(
            "Promote Your Best Projects",
            "Share your top 3 projects on LinkedIn, Twitter, and Reddit communities",
            Impact::High,
        ));
    }

    let without_readme = analysis.repositories.iter().filter(|r| !r.has_readme).count();
    if without_readme > 0 {
        buckets.quick_wins.push(suggestion(
            format!("Add READMEs to {} Repositories", without_readme),
            "Start with your most starred projects and add comprehensive documentation",
            Impact::High,
        ));
    }

    buckets.medium_term.push(suggestion(
        "Create a Portfolio Website",
        "Build a personal website showcasing your best projects with live demos",
        Impact::High,
    ));
    buckets.medium_term.push(suggestion(
        "Add Project Screenshots",
        "Visual content increases engagement by 80%",
        Impact::Medium,
    ));

    buckets.long_term.push(suggestion(
        "Contribute to Open Source",
        "Regular contributions show consistency and community engagement",
        Impact::High,
    ));
    buckets.long_term.push(suggestion(
        "Build Projects in Trending Technologies",
        "Stay current with industry trends to attract recruiters",
        Impact::Medium,
    ));

    PortfolioEnhancement {
        current_score: analysis.overall_score,
        potential_score: analysis.overall_score.saturating_add(SCORE_HEADROOM).min(100),
        suggestions: buckets,
        priority_actions: analysis
            .recommendations
            .iter()
            .take(PRIORITY_ACTIONS)
            .cloned()
            .collect(),
    }
}
