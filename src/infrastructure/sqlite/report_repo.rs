use crate::domain::entities::analysis_report::AnalysisReport;
use crate::domain::error::DomainError;
use crate::domain::ports::report_repository::ReportRepository;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::Mutex;

/// Report log in SQLite. `seq` (AUTOINCREMENT) fixes append order, so two
/// writers racing each other both land at the tail in commit order.
pub struct SqliteReportRepo {
    conn: Mutex<Connection>,
}

impl SqliteReportRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_report(row: &rusqlite::Row) -> Result<AnalysisReport, rusqlite::Error> {
        let created_str: String = row.get(3)?;
        let created_at = DateTime::parse_from_rfc3339(&created_str)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(AnalysisReport {
            id: row.get(0)?,
            author: row.get(1)?,
            content: row.get(2)?,
            created_at,
        })
    }
}

impl ReportRepository for SqliteReportRepo {
    fn append(&self, report: &AnalysisReport) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO analysis_reports (id, author, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                report.id,
                report.author,
                report.content,
                report.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to append report: {e}")))?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<AnalysisReport>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT id, author, content, created_at FROM analysis_reports ORDER BY seq ASC")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let reports = stmt
            .query_map([], Self::row_to_report)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(format!("Corrupt report row: {e}")))?;
        Ok(reports)
    }

    fn latest(&self) -> Result<Option<AnalysisReport>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT id, author, content, created_at FROM analysis_reports ORDER BY seq DESC LIMIT 1")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map([], Self::row_to_report)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let latest = rows
            .next()
            .transpose()
            .map_err(|e| DomainError::Database(format!("Corrupt report row: {e}")))?;
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::migrations::run_migrations;

    fn repo() -> SqliteReportRepo {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        SqliteReportRepo::new(conn)
    }

    #[test]
    fn test_empty_log() {
        let r = repo();
        assert!(r.load().unwrap().is_empty());
        assert!(r.latest().unwrap().is_none());
    }

    #[test]
    fn test_latest_is_last_appended() {
        let r = repo();
        let first = AnalysisReport::new("alice".into(), "first".into());
        let second = AnalysisReport::new("bob".into(), "second".into());
        r.append(&first).unwrap();
        r.append(&second).unwrap();
        assert_eq!(r.latest().unwrap().unwrap().id, second.id);
        let all = r.load().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].content, "first");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let r = repo();
        let report = AnalysisReport::new("alice".into(), "x".into());
        r.append(&report).unwrap();
        assert!(matches!(r.append(&report), Err(DomainError::Database(_))));
        assert_eq!(r.load().unwrap().len(), 1);
    }
}
