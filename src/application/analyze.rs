use crate::domain::entities::analysis_report::AnalysisReport;
use crate::domain::entities::news_item::NewsItem;
use crate::domain::entities::session::{authorize, Session};
use crate::domain::error::DomainError;
use crate::domain::ports::language_model::LanguageModel;
use crate::domain::ports::report_repository::ReportRepository;
use crate::domain::values::role::Role;
use serde::Serialize;
use std::sync::Arc;

/// Headlines handed to the model per briefing.
pub const DEFAULT_CONTEXT_HEADLINES: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    /// False when the model answered but the log append failed.
    pub persisted: bool,
    pub warning: Option<String>,
}

pub struct AnalyzeUseCase {
    model: Option<Arc<dyn LanguageModel>>,
    reports: Arc<dyn ReportRepository>,
    context_headlines: usize,
}

impl AnalyzeUseCase {
    pub fn new(
        model: Option<Arc<dyn LanguageModel>>,
        reports: Arc<dyn ReportRepository>,
        context_headlines: usize,
    ) -> Self {
        Self {
            model,
            reports,
            context_headlines,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Runs one briefing over `news` (already sorted newest first) and
    /// appends it to the report log.
    pub async fn execute(
        &self,
        session: &Session,
        news: &[NewsItem],
    ) -> Result<AnalysisOutcome, DomainError> {
        let author = authorize(session, Role::User).into_principal()?;

        let model = self.model.as_ref().ok_or_else(|| {
            DomainError::MissingCredential(
                "no language model API key configured (set MARKETPULSE_LLM_API_KEY)".into(),
            )
        })?;

        let previous = match self.reports.latest() {
            Ok(prev) => prev,
            Err(e) => {
                tracing::warn!(error = %e, "could not load previous report; analysing without it");
                None
            }
        };

        let headlines = &news[..self.context_headlines.min(news.len())];
        let prompt = build_prompt(headlines, previous.as_ref());

        tracing::info!(model = model.name(), headlines = headlines.len(), author = %author, "requesting analysis");
        let content = model.complete(&prompt).await?;
        let report = AnalysisReport::new(author, content);

        match self.reports.append(&report) {
            Ok(()) => Ok(AnalysisOutcome {
                report,
                persisted: true,
                warning: None,
            }),
            Err(e) => {
                tracing::warn!(report_id = %report.id, error = %e, "analysis report was not saved");
                Ok(AnalysisOutcome {
                    report,
                    persisted: false,
                    warning: Some(format!("Report could not be saved: {e}")),
                })
            }
        }
    }
}

pub fn build_prompt(headlines: &[NewsItem], previous: Option<&AnalysisReport>) -> String {
    let mut prompt = String::from(
        "Analyse the market risk in the following latest US market headlines:\n",
    );
    for item in headlines {
        prompt.push_str("- ");
        prompt.push_str(&item.title);
        prompt.push('\n');
    }
    if let Some(prev) = previous {
        prompt.push_str(&format!(
            "\nPrevious briefing ({}), for comparison:\n{}\n",
            prev.created_at.format("%Y-%m-%d %H:%M"),
            prev.content
        ));
        prompt.push_str("\nPoint out what has changed since the previous briefing.\n");
    }
    prompt.push_str("\nGive a concise risk briefing in Markdown.");
    prompt
}
