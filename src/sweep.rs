//! The sweep driver: walk, read, strip, write back.
//!
//! Every file is handled on its own. A read, decode or write failure becomes
//! that file's outcome and the sweep moves on to the next one.

use std::path::{Path, PathBuf};

use crate::config::SweepConfig;
use crate::error::{LogStripError, Result};
use crate::file::{read_file, write_file_checked};
use crate::language::{Language, detect_language};
use crate::position::{Span, line_offsets, match_span_to_bytes};
use crate::strip::{MatchSpan, strip};
use crate::walk::{Candidate, collect_candidate_files, relative_to};

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Matches were found; `written` is false on a dry run
    Modified { written: bool },
    /// Nothing matched
    Unchanged,
    /// Not a text file (undecodable as UTF-8)
    Skipped { reason: String },
    /// Read or write failed
    Failed { error: String },
}

/// One dropped span together with the bytes it covered in the original file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedSpan {
    pub span: MatchSpan,
    pub bytes: Span,
}

/// Per-file result of a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Language,
    pub status: FileStatus,
    pub removed: Vec<RemovedSpan>,
    pub checksum_before: Option<String>,
    pub checksum_after: Option<String>,
}

impl FileReport {
    fn new(path: &Path, status: FileStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            language: detect_language(path),
            status,
            removed: Vec::new(),
            checksum_before: None,
            checksum_after: None,
        }
    }

    pub fn removed_lines(&self) -> usize {
        self.removed.iter().map(|r| r.span.len()).sum()
    }

    pub fn is_modified(&self) -> bool {
        matches!(self.status, FileStatus::Modified { .. })
    }
}

/// Counts across all files of a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub lines_removed: usize,
}

impl SweepSummary {
    pub fn from_reports(files: &[FileReport]) -> Self {
        files.iter().fold(
            Self {
                files_scanned: files.len(),
                ..Self::default()
            },
            |mut acc, file| {
                match file.status {
                    FileStatus::Modified { .. } => {
                        acc.files_modified += 1;
                        acc.lines_removed += file.removed_lines();
                    }
                    FileStatus::Skipped { .. } => acc.files_skipped += 1,
                    FileStatus::Failed { .. } => acc.files_failed += 1,
                    FileStatus::Unchanged => {}
                }
                acc
            },
        )
    }
}

/// Full result of a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub summary: SweepSummary,
}

impl SweepReport {
    /// File path relative to the sweep root, for display
    pub fn display_path<'a>(&self, file: &'a FileReport) -> &'a Path {
        relative_to(&file.path, &self.root)
    }
}

/// Validate the config, then process every candidate file
///
/// Paths the walk could not read are reported as failed files, so they show
/// up in the summary and the exit status instead of vanishing.
///
/// # Arguments
/// * `config` - Sweep configuration (validated before any file is touched)
///
/// # Returns
/// * `Ok(SweepReport)` - Per-file outcomes and summary counts
/// * `Err(LogStripError)` - The configuration is invalid
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport> {
    config.validate()?;

    let candidates = collect_candidate_files(config);
    log::debug!(
        "Found {} candidate(s) under {}",
        candidates.len(),
        config.root.display()
    );

    let files: Vec<FileReport> = candidates
        .iter()
        .map(|candidate| process_candidate(candidate, config))
        .collect();
    let summary = SweepSummary::from_reports(&files);

    Ok(SweepReport {
        root: config.root.clone(),
        dry_run: config.dry_run,
        files,
        summary,
    })
}

fn process_candidate(candidate: &Candidate, config: &SweepConfig) -> FileReport {
    match candidate {
        Candidate::File(path) => process_file(path, config),
        Candidate::Unreadable { path, error } => FileReport::new(
            path,
            FileStatus::Failed {
                error: error.clone(),
            },
        ),
    }
}

/// Strip one file and write it back if it changed
///
/// Never returns an error: read, decode and write failures are folded into
/// the report so the caller can move on to the next file.
///
/// # Arguments
/// * `path` - File to process
/// * `config` - Supplies the strip rule and the dry-run switch
///
/// # Returns
/// * `FileReport` - Status, dropped spans and checksums before/after
pub fn process_file(path: &Path, config: &SweepConfig) -> FileReport {
    let file = match read_file(path) {
        Ok(file) => file,
        Err(e @ LogStripError::InvalidUtf8 { .. }) => {
            log::warn!("Skipping non-text file: {e}");
            return FileReport::new(path, FileStatus::Skipped { reason: e.to_string() });
        }
        Err(e) => {
            log::warn!("Failed to read {}: {e}", path.display());
            return FileReport::new(path, FileStatus::Failed { error: e.to_string() });
        }
    };

    let outcome = strip(&file.content, &config.rule);
    if !outcome.changed {
        log::debug!("Unchanged: {}", path.display());
        let mut report = FileReport::new(path, FileStatus::Unchanged);
        report.checksum_before = Some(file.checksum);
        return report;
    }

    let offsets = line_offsets(&file.content);
    let removed = outcome
        .spans
        .iter()
        .map(|span| RemovedSpan {
            span: *span,
            bytes: match_span_to_bytes(&offsets, file.len, span),
        })
        .collect();

    let (status, checksum_after) = if config.dry_run {
        log::info!(
            "Would remove {} line(s) from {}",
            outcome.removed_lines(),
            path.display()
        );
        (FileStatus::Modified { written: false }, None)
    } else {
        match write_file_checked(path, &file.checksum, &outcome.content) {
            Ok(new_checksum) => {
                log::info!(
                    "Removed {} line(s) from {}",
                    outcome.removed_lines(),
                    path.display()
                );
                (FileStatus::Modified { written: true }, Some(new_checksum))
            }
            Err(e) => {
                log::warn!("Failed to write {}: {e}", path.display());
                (FileStatus::Failed { error: e.to_string() }, None)
            }
        }
    };

    FileReport {
        path: path.to_path_buf(),
        language: detect_language(path),
        status,
        removed,
        checksum_before: Some(file.checksum),
        checksum_after,
    }
}
