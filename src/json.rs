use serde::{Deserialize, Serialize};

use crate::position::match_span_to_positions;
use crate::strip::MatchKind;
use crate::sweep::{FileReport, FileStatus, SweepReport};

/// Generate a fresh execution id (UUID v4)
pub fn generate_execution_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Resolve a requested execution id, treating `"auto"` as "generate one"
pub fn resolve_execution_id(requested: &str) -> String {
    if requested == "auto" {
        generate_execution_id()
    } else {
        requested.to_string()
    }
}

/// One dropped span in report form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanJson {
    /// First dropped line (1-indexed)
    pub start_line: usize,
    /// Last dropped line (1-indexed, inclusive)
    pub end_line: usize,
    pub byte_start: usize,
    pub byte_end: usize,
    pub kind: MatchKind,
}

/// One file in report form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReportJson {
    /// Path relative to the sweep root
    pub path: String,
    pub language: String,
    /// "modified", "unchanged", "skipped" or "error"
    pub status: String,
    /// Whether the rewritten content was written to disk
    pub written: bool,
    pub removed_lines: usize,
    pub spans: Vec<SpanJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Whole-run report, as printed with `--json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub execution_id: String,
    pub root: String,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub files_modified: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub lines_removed: usize,
    pub files: Vec<FileReportJson>,
}

impl RunReport {
    /// Build the report; unchanged files are listed only when `include_unchanged`
    pub fn from_sweep(execution_id: String, sweep: &SweepReport, include_unchanged: bool) -> Self {
        let files = sweep
            .files
            .iter()
            .filter(|f| include_unchanged || f.status != FileStatus::Unchanged)
            .map(|f| file_to_json(sweep, f))
            .collect();

        Self {
            execution_id,
            root: sweep.root.display().to_string(),
            dry_run: sweep.dry_run,
            files_scanned: sweep.summary.files_scanned,
            files_modified: sweep.summary.files_modified,
            files_skipped: sweep.summary.files_skipped,
            files_failed: sweep.summary.files_failed,
            lines_removed: sweep.summary.lines_removed,
            files,
        }
    }

    pub fn success(&self) -> bool {
        self.files_failed == 0
    }
}

fn file_to_json(sweep: &SweepReport, file: &FileReport) -> FileReportJson {
    let (status, written, reason) = match &file.status {
        FileStatus::Modified { written } => ("modified", *written, None),
        FileStatus::Unchanged => ("unchanged", false, None),
        FileStatus::Skipped { reason } => ("skipped", false, Some(reason.clone())),
        FileStatus::Failed { error } => ("error", false, Some(error.clone())),
    };

    let spans = file
        .removed
        .iter()
        .map(|r| {
            let (start, end) = match_span_to_positions(&r.span);
            SpanJson {
                start_line: start.line,
                end_line: end.line,
                byte_start: r.bytes.byte_start,
                byte_end: r.bytes.byte_end,
                kind: r.span.kind,
            }
        })
        .collect();

    FileReportJson {
        path: sweep.display_path(file).display().to_string(),
        language: file.language.to_string(),
        status: status.to_string(),
        written,
        removed_lines: file.removed_lines(),
        spans,
        checksum_before: file.checksum_before.clone(),
        checksum_after: file.checksum_after.clone(),
        reason,
    }
}
