use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use portfolio_analyzer::models::{
    EnhancedReadme, PortfolioAnalysis, PortfolioEnhancement, RepositoryReport, Suggestion,
};
use portfolio_analyzer::{enhance_readme, AnalysisPipeline, Config, GitHubClient, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "portfolio-analyzer")]
#[command(version)]
#[command(about = "Score the health of a developer's GitHub portfolio")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Hide the progress bar
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze every repository of a user and score the portfolio
    Analyze {
        /// GitHub username to analyze
        username: String,
    },

    /// Detailed report for a single repository
    Repo {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
    },

    /// Generate a README scaffold for a repository
    EnhanceReadme {
        /// Repository name used in the scaffold
        #[arg(long)]
        repo_name: String,

        /// Existing README to improve
        #[arg(long)]
        input: Option<String>,
    },

    /// Suggest improvements for a user's portfolio
    EnhancePortfolio {
        /// GitHub username to analyze
        username: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("portfolio_analyzer=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env();

    let output = match &args.command {
        Command::EnhanceReadme { repo_name, input } => {
            let current = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => String::new(),
            };
            let enhanced = enhance_readme(&current, repo_name);
            render(&enhanced, args.format, format_readme_text, format_readme_markdown)?
        }
        Command::Analyze { username } => {
            let pipeline = build_pipeline(&config, &args)?;
            tracing::info!("Starting analysis for GitHub user: {}", username);
            let analysis = pipeline.analyze_user(username).await?;
            render(&analysis, args.format, format_portfolio_text, format_portfolio_markdown)?
        }
        Command::Repo { owner, repo } => {
            let pipeline = build_pipeline(&config, &args)?;
            let report = pipeline.analyze_repository(owner, repo).await?;
            render(&report, args.format, format_report_text, format_report_markdown)?
        }
        Command::EnhancePortfolio { username } => {
            let pipeline = build_pipeline(&config, &args)?;
            let enhancement = pipeline.enhance_portfolio(username).await?;
            render(
                &enhancement,
                args.format,
                format_enhancement_text,
                format_enhancement_markdown,
            )?
        }
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn build_pipeline(config: &Config, args: &Args) -> anyhow::Result<AnalysisPipeline> {
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set: private repositories are skipped and rate limits are low");
    }

    let github = GitHubClient::new(config)?;
    let pipeline_config = PipelineConfig {
        show_progress: !args.quiet,
        ..PipelineConfig::from(config)
    };

    Ok(AnalysisPipeline::new(github, pipeline_config))
}

fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: fn(&T) -> String,
    markdown: fn(&T) -> String,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Text => text(value),
        OutputFormat::Markdown => markdown(value),
    })
}

fn format_portfolio_text(analysis: &PortfolioAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== Portfolio Analysis: {} ===\n\n",
        analysis.username
    ));
    output.push_str(&format!("Overall score: {}/100\n", analysis.overall_score));
    output.push_str(&format!("Repositories analyzed: {}\n", analysis.total_repos));
    output.push_str(&format!("Total stars: {}\n", analysis.total_stars));
    output.push_str(&format!("Profile: {}\n", analysis.profile_url));

    output.push_str("\nRepositories:\n");
    for repo in &analysis.repositories {
        let visibility = if repo.is_private { " [private]" } else { "" };
        output.push_str(&format!(
            "  - {}{}: health {}/100, README {}, {} stars\n",
            repo.name, visibility, repo.health_score, repo.readme_quality, repo.stars
        ));
    }

    if !analysis.strengths.is_empty() {
        output.push_str("\nStrengths:\n");
        for strength in &analysis.strengths {
            output.push_str(&format!("  + {}\n", strength));
        }
    }

    if !analysis.weaknesses.is_empty() {
        output.push_str("\nAreas for Improvement:\n");
        for weakness in &analysis.weaknesses {
            output.push_str(&format!("  - {}\n", weakness));
        }
    }

    output.push_str("\nRecommendations:\n");
    for recommendation in &analysis.recommendations {
        output.push_str(&format!("  * {}\n", recommendation));
    }

    output
}

fn format_portfolio_markdown(analysis: &PortfolioAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Portfolio Analysis: [{}]({})\n\n",
        analysis.username, analysis.profile_url
    ));

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Overall Score | {}/100 |\n", analysis.overall_score));
    output.push_str(&format!("| Repositories | {} |\n", analysis.total_repos));
    output.push_str(&format!("| Total Stars | {} |\n", analysis.total_stars));

    output.push_str("\n## Repositories\n\n");
    output.push_str("| Repository | Health | README | Stars | Languages |\n");
    output.push_str("|------------|--------|--------|-------|-----------|\n");
    for repo in &analysis.repositories {
        let languages: Vec<&str> = repo.languages.keys().map(String::as_str).collect();
        output.push_str(&format!(
            "| [{}]({}) | {}/100 | {} | {} | {} |\n",
            repo.name,
            repo.url,
            repo.health_score,
            repo.readme_quality,
            repo.stars,
            languages.join(", ")
        ));
    }

    push_markdown_list(&mut output, "Strengths", &analysis.strengths);
    push_markdown_list(&mut output, "Areas for Improvement", &analysis.weaknesses);
    push_markdown_list(&mut output, "Recommendations", &analysis.recommendations);

    output
}

fn format_report_text(report: &RepositoryReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== Repository: {} ===\n\n", report.name));
    if let Some(ref description) = report.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    output.push_str(&format!(
        "Stars: {}  Forks: {}  Watchers: {}  Open issues: {}\n",
        report.stars, report.forks, report.watchers, report.open_issues
    ));
    output.push_str(&format!(
        "Last updated: {}\n",
        report.updated_at.format("%Y-%m-%d")
    ));
    output.push_str(&format!("URL: {}\n", report.url));

    let readme = &report.readme_analysis;
    output.push_str(&format!(
        "\nREADME: {} (quality: {})\n",
        if readme.has_readme { "present" } else { "missing" },
        readme.quality
    ));
    if !readme.missing_sections.is_empty() {
        output.push_str(&format!(
            "Missing sections: {}\n",
            readme.missing_sections.join(", ")
        ));
    }

    if !report.recent_commits.is_empty() {
        output.push_str("\nRecent commits:\n");
        for commit in &report.recent_commits {
            let subject = commit.message.lines().next().unwrap_or_default();
            output.push_str(&format!(
                "  {} {}: {}\n",
                commit.date.format("%Y-%m-%d"),
                commit.author,
                subject
            ));
        }
    }

    if !report.suggestions.is_empty() {
        output.push_str("\nSuggestions:\n");
        for suggestion in &report.suggestions {
            output.push_str(&format!("  * {}\n", suggestion));
        }
    }

    output
}

fn format_report_markdown(report: &RepositoryReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# [{}]({})\n\n", report.name, report.url));
    if let Some(ref description) = report.description {
        output.push_str(&format!("> {}\n\n", description));
    }

    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Stars | {} |\n", report.stars));
    output.push_str(&format!("| Forks | {} |\n", report.forks));
    output.push_str(&format!("| Open Issues | {} |\n", report.open_issues));
    output.push_str(&format!("| README Quality | {} |\n", report.readme_analysis.quality));
    output.push_str(&format!(
        "| Last Updated | {} |\n",
        report.updated_at.format("%Y-%m-%d")
    ));

    push_markdown_list(
        &mut output,
        "Missing README Sections",
        &report.readme_analysis.missing_sections,
    );

    if !report.recent_commits.is_empty() {
        output.push_str("\n## Recent Commits\n\n");
        for commit in &report.recent_commits {
            let subject = commit.message.lines().next().unwrap_or_default();
            output.push_str(&format!(
                "- {} **{}**: {}\n",
                commit.date.format("%Y-%m-%d"),
                commit.author,
                subject
            ));
        }
    }

    push_markdown_list(&mut output, "Suggestions", &report.suggestions);

    output
}

fn format_readme_text(readme: &EnhancedReadme) -> String {
    readme.enhanced_readme.clone()
}

fn format_readme_markdown(readme: &EnhancedReadme) -> String {
    let mut output = readme.enhanced_readme.clone();
    output.push_str("\n---\n");
    push_markdown_list(&mut output, "Improvements", &readme.improvements);
    output
}

fn format_enhancement_text(enhancement: &PortfolioEnhancement) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\nCurrent score: {}/100  Potential score: {}/100\n",
        enhancement.current_score, enhancement.potential_score
    ));

    let buckets = &enhancement.suggestions;
    for (title, items) in [
        ("Quick wins", &buckets.quick_wins),
        ("Medium term", &buckets.medium_term),
        ("Long term", &buckets.long_term),
    ] {
        if items.is_empty() {
            continue;
        }
        output.push_str(&format!("\n{}:\n", title));
        for item in items {
            output.push_str(&format_suggestion_line(item, "  - "));
        }
    }

    output.push_str("\nPriority actions:\n");
    for (i, action) in enhancement.priority_actions.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, action));
    }

    output
}

fn format_enhancement_markdown(enhancement: &PortfolioEnhancement) -> String {
    let mut output = String::new();

    output.push_str("# Portfolio Enhancement Plan\n\n");
    output.push_str(&format!(
        "**Score:** {}/100, potential {}/100\n",
        enhancement.current_score, enhancement.potential_score
    ));

    let buckets = &enhancement.suggestions;
    for (title, items) in [
        ("Quick Wins", &buckets.quick_wins),
        ("Medium Term", &buckets.medium_term),
        ("Long Term", &buckets.long_term),
    ] {
        if items.is_empty() {
            continue;
        }
        output.push_str(&format!("\n## {}\n\n", title));
        for item in items {
            output.push_str(&format_suggestion_line(item, "- "));
        }
    }

    push_markdown_list(&mut output, "Priority Actions", &enhancement.priority_actions);

    output
}

fn format_suggestion_line(suggestion: &Suggestion, bullet: &str) -> String {
    format!(
        "{}{} ({} impact): {}\n",
        bullet, suggestion.title, suggestion.impact, suggestion.description
    )
}

fn push_markdown_list(output: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push_str(&format!("\n## {}\n\n", heading));
    for item in items {
        output.push_str(&format!("- {}\n", item));
    }
}
