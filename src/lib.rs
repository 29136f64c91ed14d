// Error types
pub mod error;

// Statement stripper
pub mod strip;

// Position tracking module
pub mod position;

// File operations module
pub mod file;

// Language detection module
pub mod language;

// Driver configuration
pub mod config;

// Candidate file discovery
pub mod walk;

// Sweep driver
pub mod sweep;

// JSON output module
pub mod json;

// Logger setup
pub mod logging;

// Re-exports
pub use error::{LogStripError, Result};
pub use strip::{LineClass, MatchKind, MatchSpan, StripOutcome, StripRule, strip, strip_lines};
pub use position::{Position, Span, line_offsets, match_span_to_bytes, match_span_to_positions};
pub use file::{FileContent, compute_checksum, read_file, write_file_checked};
pub use language::{Language, default_extensions, detect_language};
pub use config::SweepConfig;
pub use walk::{Candidate, collect_candidate_files};
pub use sweep::{FileReport, FileStatus, RemovedSpan, SweepReport, SweepSummary, process_file, run_sweep};
pub use json::{FileReportJson, RunReport, SpanJson, generate_execution_id, resolve_execution_id};
