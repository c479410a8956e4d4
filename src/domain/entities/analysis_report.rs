use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A language-model briefing, stored verbatim in the shared report log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
    /// Markdown as returned by the model.
    pub content: String,
}

impl AnalysisReport {
    pub fn new(author: String, content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            author,
            content,
        }
    }
}
