use crate::domain::entities::analysis_report::AnalysisReport;
use crate::domain::error::DomainError;
use crate::domain::ports::report_repository::ReportRepository;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Report log kept as one JSON array on disk. Every call reads the file.
///
/// Appends hold an exclusive lock on a sidecar `<path>.lock` across
/// read, push and rename, so writers in other handles or processes queue
/// behind each other. Each writer stages into its own temp file.
pub struct JsonFileReportRepo {
    path: PathBuf,
}

impl JsonFileReportRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn lock_path(&self) -> PathBuf {
        let mut lock = self.path.clone().into_os_string();
        lock.push(".lock");
        PathBuf::from(lock)
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn read_all(&self) -> Result<Vec<AnalysisReport>, DomainError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(DomainError::Database(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(vec![]);
        }
        serde_json::from_str(&raw).map_err(|e| {
            DomainError::Parse(format!("Corrupt report log {}: {e}", self.path.display()))
        })
    }

    fn write_all(&self, reports: &[AnalysisReport]) -> Result<(), DomainError> {
        let json = serde_json::to_vec_pretty(reports)
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        let mut tmp = NamedTempFile::new_in(self.dir())
            .map_err(|e| DomainError::Database(format!("Failed to stage report log: {e}")))?;
        tmp.write_all(&json)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| DomainError::Database(format!("Failed to stage report log: {e}")))?;
        tmp.persist(&self.path).map_err(|e| {
            DomainError::Database(format!("Failed to replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}

impl ReportRepository for JsonFileReportRepo {
    fn append(&self, report: &AnalysisReport) -> Result<(), DomainError> {
        let lock_path = self.lock_path();
        let lock = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| {
                DomainError::Database(format!("Failed to open {}: {e}", lock_path.display()))
            })?;
        lock.lock_exclusive().map_err(|e| {
            DomainError::Database(format!("Failed to lock {}: {e}", lock_path.display()))
        })?;

        // Released when `lock` is dropped, on every path out of here.
        let mut reports = self.read_all()?;
        reports.push(report.clone());
        self.write_all(&reports)
    }

    fn load(&self) -> Result<Vec<AnalysisReport>, DomainError> {
        self.read_all()
    }
}
