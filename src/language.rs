use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source languages whose files carry `console.*` calls
///
/// Each variant owns a family of file extensions. The default sweep covers
/// the extensions of every supported variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// JavaScript (.js, .jsx, .mjs, .cjs)
    JavaScript,
    /// TypeScript (.ts, .tsx, .mts, .cts)
    TypeScript,
    /// Vue and Svelte single-file components
    Component,
    /// Unknown or unsupported language
    Unknown,
}

impl Language {
    /// All languages that can be swept
    pub const SUPPORTED: [Language; 3] = [Language::TypeScript, Language::JavaScript, Language::Component];

    /// File extensions (without the dot) associated with this language
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::TypeScript => &["ts", "tsx", "mts", "cts"],
            Language::Component => &["vue", "svelte"],
            Language::Unknown => &[],
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Component => "Component",
            Language::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the language from a file path's extension
///
/// # Examples
/// ```
/// use logstrip::{Language, detect_language};
/// assert_eq!(detect_language("app/page.tsx"), Language::TypeScript);
/// assert_eq!(detect_language("lib/util.mjs"), Language::JavaScript);
/// assert_eq!(detect_language("README.md"), Language::Unknown);
/// ```
pub fn detect_language<P: AsRef<Path>>(path: P) -> Language {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    Language::SUPPORTED
        .into_iter()
        .find(|lang| lang.extensions().contains(&extension))
        .unwrap_or(Language::Unknown)
}

/// Extensions swept when none are configured: `ts`, `tsx`, `js`, `jsx`
pub fn default_extensions() -> Vec<String> {
    [Language::TypeScript, Language::JavaScript]
        .iter()
        .flat_map(|lang| lang.extensions().iter().take(2))
        .map(|ext| ext.to_string())
        .collect()
}

/// Normalize a user-supplied extension: strip a leading dot, lowercase
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
