use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::SweepConfig;

/// One entry produced by the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A file to strip
    File(PathBuf),
    /// A path the walk could not read; its subtree was not visited
    Unreadable { path: PathBuf, error: String },
}

/// Collect candidate files under the configured walk roots.
///
/// Directories whose path (relative to the config root) contains an exclusion
/// substring are pruned at traversal time, so `node_modules` and build output
/// are never descended into. Files are kept when their extension is in the
/// configured set. Output order is stable: roots in configured order, entries
/// sorted by file name within each directory.
///
/// # Arguments
/// * `config` - Roots, extensions, exclusions and the gitignore toggle
///
/// # Returns
/// * Files to process, interleaved with paths the walk failed to read
pub fn collect_candidate_files(config: &SweepConfig) -> Vec<Candidate> {
    let roots = config.walk_roots();
    let Some((first, rest)) = roots.split_first() else {
        return Vec::new();
    };

    let mut builder = WalkBuilder::new(first);
    for root in rest {
        builder.add(root);
    }

    let filter_config = config.clone();
    let walker = builder
        .standard_filters(config.respect_gitignore)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            !filter_config.is_excluded(relative_to(entry.path(), &filter_config.root))
        })
        .build();

    let mut candidates = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                let path = entry.path();
                if config.wants_extension(path) {
                    candidates.push(Candidate::File(path.to_path_buf()));
                }
            }
            Err(e) => {
                log::warn!("Walk error: {e}");
                let path = error_path(&e).unwrap_or_else(|| config.root.clone());
                candidates.push(Candidate::Unreadable {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    candidates
}

/// The path an `ignore` error refers to, when it carries one
fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

/// `path` relative to `root`, or `path` unchanged when it lies elsewhere
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
