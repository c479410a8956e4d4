use crate::domain::entities::analysis_report::AnalysisReport;
use crate::domain::entities::session::{authorize, Session};
use crate::domain::error::DomainError;
use crate::domain::ports::report_repository::{ReportRepository, ReportStats};
use crate::domain::values::role::Role;
use std::sync::Arc;

pub struct ReportsUseCase {
    repo: Arc<dyn ReportRepository>,
}

impl ReportsUseCase {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    pub fn history(&self, session: &Session) -> Result<Vec<AnalysisReport>, DomainError> {
        authorize(session, Role::User).into_principal()?;
        self.repo.load()
    }

    pub fn latest(&self, session: &Session) -> Result<Option<AnalysisReport>, DomainError> {
        authorize(session, Role::User).into_principal()?;
        self.repo.latest()
    }

    pub fn stats(&self, session: &Session) -> Result<ReportStats, DomainError> {
        authorize(session, Role::Admin).into_principal()?;
        self.repo.stats()
    }
}
