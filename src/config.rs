//! Driver configuration.
//!
//! Everything the sweep needs is named here instead of living in hard-coded
//! paths: where to start, which sub-directories and extensions to visit,
//! which path fragments to skip, and the strip rule itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LogStripError, Result};
use crate::language::{default_extensions, normalize_extension};
use crate::strip::StripRule;

/// Configuration for one sweep over a source tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Directory to process
    pub root: PathBuf,
    /// Sub-directories of `root` to walk; empty walks `root` itself
    pub include_dirs: Vec<String>,
    /// Extensions to process, without the leading dot
    pub extensions: Vec<String>,
    /// Path substrings that exclude a file or directory
    pub exclude: Vec<String>,
    /// Honor .gitignore and hidden-file rules while walking
    pub respect_gitignore: bool,
    /// Report what would change without writing anything
    pub dry_run: bool,
    /// Tokens that decide what gets stripped
    pub rule: StripRule,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_dirs: ["app", "components", "hooks", "lib"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extensions: default_extensions(),
            exclude: vec!["node_modules".to_string(), ".next".to_string()],
            respect_gitignore: false,
            dry_run: false,
            rule: StripRule::default(),
        }
    }
}

impl SweepConfig {
    /// Load a TOML config file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LogStripError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| LogStripError::io(path, e))?;
        Self::from_toml(&raw).map_err(|details| LogStripError::ConfigParse {
            path: path.to_path_buf(),
            details,
        })
    }

    fn from_toml(raw: &str) -> std::result::Result<Self, String> {
        let mut cfg: Self = toml::from_str(raw).map_err(|e| e.to_string())?;
        cfg.normalize();
        Ok(cfg)
    }

    /// Strip leading dots from extensions and drop blank entries
    pub fn normalize(&mut self) {
        self.extensions = self
            .extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .filter(|ext| !ext.is_empty())
            .collect();
        self.exclude.retain(|ex| !ex.is_empty());
        self.include_dirs.retain(|dir| !dir.is_empty());
    }

    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(LogStripError::InvalidConfig {
                details: "at least one extension is required".to_string(),
            });
        }
        if !self.root.is_dir() {
            return Err(LogStripError::InvalidConfig {
                details: format!("root {} is not a directory", self.root.display()),
            });
        }
        self.rule.validate()
    }

    /// Directories the walk starts from, in configured order
    ///
    /// Missing include dirs are left out and logged, matching a tree where
    /// only some of the conventional folders exist.
    pub fn walk_roots(&self) -> Vec<PathBuf> {
        if self.include_dirs.is_empty() {
            return vec![self.root.clone()];
        }

        self.include_dirs
            .iter()
            .map(|dir| self.root.join(dir))
            .filter(|path| {
                let exists = path.is_dir();
                if !exists {
                    log::debug!("Skipping missing directory {}", path.display());
                }
                exists
            })
            .collect()
    }

    pub fn wants_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.exclude.iter().any(|ex| text.contains(ex.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let cfg = SweepConfig::default();

        assert_eq!(cfg.include_dirs, vec!["app", "components", "hooks", "lib"]);
        assert_eq!(cfg.extensions, vec!["ts", "tsx", "js", "jsx"]);
        assert_eq!(cfg.exclude, vec!["node_modules", ".next"]);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn test_from_toml_partial() {
        let raw = r#"
root = "/srv/web"
extensions = [".ts", "VUE", ""]
dry_run = true

[rule]
target = "logger.debug("
"#;
        let cfg = SweepConfig::from_toml(raw).unwrap();

        assert_eq!(cfg.root, PathBuf::from("/srv/web"));
        assert_eq!(cfg.extensions, vec!["ts", "vue"]);
        assert!(cfg.dry_run);
        assert_eq!(cfg.rule.target, "logger.debug(");
        assert_eq!(cfg.rule.exempt, "console.error");
        assert_eq!(cfg.exclude, vec!["node_modules", ".next"]);
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        assert!(SweepConfig::from_toml("dry_run = \"yes\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = SweepConfig::load(Path::new("/nonexistent/logstrip.toml"));
        assert!(matches!(result, Err(LogStripError::NotFound { .. })));
    }

    #[test]
    fn test_load_parse_error_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logstrip.toml");
        fs::write(&path, "extensions = [").unwrap();

        match SweepConfig::load(&path) {
            Err(LogStripError::ConfigParse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn test_validate() {
        let dir = tempdir().unwrap();
        let mut cfg = SweepConfig {
            root: dir.path().to_path_buf(),
            ..SweepConfig::default()
        };
        assert!(cfg.validate().is_ok());

        cfg.extensions.clear();
        assert!(cfg.validate().is_err());

        cfg.extensions = vec!["ts".to_string()];
        cfg.root = dir.path().join("missing");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_walk_roots_skips_missing() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("app")).unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        let cfg = SweepConfig {
            root: dir.path().to_path_buf(),
            ..SweepConfig::default()
        };

        assert_eq!(cfg.walk_roots(), vec![dir.path().join("app"), dir.path().join("lib")]);

        let whole = SweepConfig {
            root: dir.path().to_path_buf(),
            include_dirs: Vec::new(),
            ..SweepConfig::default()
        };
        assert_eq!(whole.walk_roots(), vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn test_extension_and_exclusion_filters() {
        let cfg = SweepConfig::default();

        assert!(cfg.wants_extension(Path::new("app/page.tsx")));
        assert!(cfg.wants_extension(Path::new("lib/util.JS")));
        assert!(!cfg.wants_extension(Path::new("styles/site.css")));
        assert!(!cfg.wants_extension(Path::new("Makefile")));

        assert!(cfg.is_excluded(Path::new("app/node_modules/x/index.js")));
        assert!(cfg.is_excluded(Path::new("lib/.next/server/page.js")));
        assert!(!cfg.is_excluded(Path::new("app/page.tsx")));
    }
}
