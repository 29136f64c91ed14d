use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{LogStripError, Result};

/// Content of a file read into memory
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Path the file was read from
    pub path: PathBuf,
    /// File content as valid UTF-8 string
    pub content: String,
    /// Byte length of the content
    pub len: usize,
    /// BLAKE3 hash of the content (hex-encoded)
    pub checksum: String,
}

/// BLAKE3 hash of `bytes`, hex-encoded
pub fn compute_checksum(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Read a file from disk with UTF-8 validation
///
/// # Returns
/// * `Ok(FileContent)` - File content with metadata
/// * `Err(LogStripError)` - File not found, I/O error, or invalid UTF-8
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<FileContent> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(LogStripError::NotFound {
            path: path_ref.to_path_buf(),
        });
    }

    let bytes = fs::read(path_ref).map_err(|e| LogStripError::io(path_ref, e))?;
    let checksum = compute_checksum(&bytes);

    let content = String::from_utf8(bytes).map_err(|_| LogStripError::InvalidUtf8 {
        path: path_ref.to_path_buf(),
    })?;

    Ok(FileContent {
        path: path_ref.to_path_buf(),
        len: content.len(),
        content,
        checksum,
    })
}

/// Overwrite a previously read file with new content
///
/// The file is re-hashed first and the write is refused if it no longer
/// matches `expected_checksum`. The new content goes to a sibling temp file
/// which is then renamed over the original, keeping its permissions.
///
/// # Returns
/// * `Ok(String)` - BLAKE3 checksum of the written content
pub fn write_file_checked(path: &Path, expected_checksum: &str, new_content: &str) -> Result<String> {
    let current = fs::read(path).map_err(|e| LogStripError::io(path, e))?;
    let actual = compute_checksum(&current);
    if actual != expected_checksum {
        return Err(LogStripError::ChangedOnDisk {
            path: path.to_path_buf(),
            expected: expected_checksum.to_string(),
            actual,
        });
    }

    let permissions = fs::metadata(path)
        .map_err(|e| LogStripError::io(path, e))?
        .permissions();

    let tmp_path = temp_sibling(path);
    let result = (|| -> std::io::Result<()> {
        let mut tmp = fs::File::create(&tmp_path)?;
        tmp.write_all(new_content.as_bytes())?;
        tmp.sync_all()?;
        fs::set_permissions(&tmp_path, permissions)?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(LogStripError::io(path, e));
    }

    Ok(compute_checksum(new_content.as_bytes()))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.logstrip.tmp"))
}
