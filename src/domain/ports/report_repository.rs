use crate::domain::entities::analysis_report::AnalysisReport;
use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ReportStats {
    pub total_reports: usize,
    pub by_author: BTreeMap<String, usize>,
    pub latest_at: Option<DateTime<Utc>>,
}

/// Append-only, shared log of analysis reports.
///
/// Implementations read from durable storage on every call; the only
/// mutation is `append`.
pub trait ReportRepository: Send + Sync {
    fn append(&self, report: &AnalysisReport) -> Result<(), DomainError>;

    /// Full log in append order, oldest first.
    fn load(&self) -> Result<Vec<AnalysisReport>, DomainError>;

    fn latest(&self) -> Result<Option<AnalysisReport>, DomainError> {
        Ok(self.load()?.pop())
    }

    fn stats(&self) -> Result<ReportStats, DomainError> {
        let reports = self.load()?;
        let mut by_author = BTreeMap::new();
        for r in &reports {
            *by_author.entry(r.author.clone()).or_default() += 1;
        }
        Ok(ReportStats {
            total_reports: reports.len(),
            by_author,
            latest_at: reports.last().map(|r| r.created_at),
        })
    }
}
