pub mod aggregator;
pub mod best_effort;
pub mod collector;
pub mod enricher;
pub mod pipeline;
pub mod reporter;
pub mod scoring;

pub use aggregator::PortfolioAggregator;
pub use best_effort::best_effort;
pub use collector::RepositoryCollector;
pub use enricher::RepositoryEnricher;
pub use pipeline::AnalysisPipeline;
pub use reporter::RepositoryReporter;
pub use scoring::{classify_readme_quality, ScoringEngine};
