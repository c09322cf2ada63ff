use serde::Serialize;
use std::fmt;
use std::path::Path;

use super::scanner::RemovedToken;

/// Why a regular file was left alone without being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Binary,
    NotUtf8,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Binary => write!(f, "binary content"),
            SkipReason::NotUtf8 => write!(f, "not valid UTF-8"),
        }
    }
}

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Scanned, nothing matched, nothing written
    Unchanged,
    /// Tokens matched; `written` is false in dry-run mode
    Stripped {
        removed: Vec<RemovedToken>,
        written: bool,
    },
    Skipped { reason: SkipReason },
}

/// One reported file, as collected for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_changed: usize,
    pub files_skipped: usize,
    pub tokens_removed: usize,
    pub dry_run: bool,
    pub duration_ms: u64,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: &FileOutcome) {
        self.files_processed += 1;
        match outcome {
            FileOutcome::Unchanged => {}
            FileOutcome::Stripped { removed, .. } => {
                self.files_changed += 1;
                self.tokens_removed += removed.len();
            }
            FileOutcome::Skipped { .. } => self.files_skipped += 1,
        }
    }
}

/// Complete machine-readable result of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub summary: RunSummary,
}

/// Receives every processed file as the walk goes
pub trait Reporter {
    fn report(&mut self, path: &Path, outcome: &FileOutcome);
}

/// Collects reports that carry findings or were skipped; unchanged files are dropped
impl Reporter for Vec<FileReport> {
    fn report(&mut self, path: &Path, outcome: &FileOutcome) {
        if matches!(outcome, FileOutcome::Unchanged) {
            return;
        }
        self.push(FileReport {
            path: path.display().to_string(),
            outcome: outcome.clone(),
        });
    }
}
