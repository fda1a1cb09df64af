use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetails {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub date: DateTime<Utc>,
}

/// The slice of a commit shown in a single-repository report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDigest {
    pub message: String,
    pub date: DateTime<Utc>,
    pub author: String,
}

impl From<CommitSummary> for CommitDigest {
    fn from(summary: CommitSummary) -> Self {
        Self {
            message: summary.commit.message,
            date: summary.commit.author.date,
            author: summary.commit.author.name,
        }
    }
}
