pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;
pub mod enhance;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubApi, GitHubClient};
pub use analysis::AnalysisPipeline;
pub use enhance::{build_enhancement, enhance_readme};
