use anyhow::Result;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// File extensions accepted for file-backed inputs
///
/// Plain-text formats only: content is handed to the comparator as-is, so
/// formats that need an extraction step (pdf, docx) are rejected up front
/// rather than diffed as raw bytes.
const ALLOWED_EXTENSIONS: &[&str] = &["txt", "md", "text"];

/// Where an input's content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Text,
    File,
}

/// A fully-loaded comparison input with an explicit source tag
///
/// The tag replaces sentinel conventions (e.g. embedding a bracketed file
/// name inside the text value): callers inspect `kind` and `label`, never
/// parse `content` for markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonInput {
    pub kind: SourceKind,
    /// User-facing name: a role like "original", or the file name
    pub label: String,
    pub content: String,
}

impl ComparisonInput {
    /// Wrap literal text under the given label
    pub fn from_text(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Text,
            label: label.into(),
            content: content.into(),
        }
    }

    /// Extension of a file-backed input, lowercased; None for literal text
    pub fn extension(&self) -> Option<String> {
        match self.kind {
            SourceKind::Text => None,
            SourceKind::File => Path::new(&self.label)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase()),
        }
    }
}

/// Configuration for input loading behavior
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Maximum file size in bytes; 0 disables the limit
    pub max_bytes: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            // Comparison output is at least as large as its inputs, so cap
            // file inputs at a size a terminal session can still digest
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Load a file-backed input, fully, before any comparison happens.
///
/// Partial or streamed content is not supported: the returned input either
/// holds the complete file content or this fails. Validates that the path is
/// a regular file, carries an allowed plain-text extension, fits under the
/// configured size limit, and decodes as UTF-8.
pub async fn load_file<P: AsRef<Path>>(path: P, config: &SourceConfig) -> Result<ComparisonInput> {
    let path = path.as_ref();
    debug!("Loading comparison input from: {}", path.display());

    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            let error_msg = format!("Cannot access file {}: {}", path.display(), e);
            warn!("{}", error_msg);
            anyhow::bail!(error_msg);
        }
    };

    if !metadata.is_file() {
        anyhow::bail!("Path is not a regular file: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension.as_deref() {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext) => {}
        Some(ext) => {
            anyhow::bail!(
                "Unsupported file type .{} for {}: only plain-text files ({}) can be compared",
                ext,
                path.display(),
                ALLOWED_EXTENSIONS.join(", ")
            );
        }
        None => {
            anyhow::bail!(
                "File {} has no extension: only plain-text files ({}) can be compared",
                path.display(),
                ALLOWED_EXTENSIONS.join(", ")
            );
        }
    }

    if config.max_bytes > 0 && metadata.len() > config.max_bytes {
        anyhow::bail!(
            "File {} is {} bytes, over the {} byte limit",
            path.display(),
            metadata.len(),
            config.max_bytes
        );
    }

    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            let error_msg = format!("Failed to read {}: {}", path.display(), e);
            warn!("{}", error_msg);
            anyhow::bail!(error_msg);
        }
    };

    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    debug!(
        "Loaded {}: {} bytes of content",
        path.display(),
        content.len()
    );

    Ok(ComparisonInput {
        kind: SourceKind::File,
        label,
        content,
    })
}

/// Reject pairing two file inputs of different types.
///
/// Mixed pairings (file vs literal text, or two literal texts) are always
/// allowed; two file inputs must share an extension.
pub fn validate_matching_types(first: &ComparisonInput, second: &ComparisonInput) -> Result<()> {
    if let (Some(ext1), Some(ext2)) = (first.extension(), second.extension()) {
        if ext1 != ext2 {
            anyhow::bail!(
                "Cannot compare files of different types: {} (.{}) vs {} (.{})",
                first.label,
                ext1,
                second.label,
                ext2
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).await.unwrap();
        file_path
    }

    #[tokio::test]
    async fn test_load_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "original.txt", "some content\n").await;

        let input = load_file(&path, &SourceConfig::default()).await.unwrap();

        assert_eq!(input.kind, SourceKind::File);
        assert_eq!(input.label, "original.txt");
        assert_eq!(input.content, "some content\n");
        assert_eq!(input.extension().as_deref(), Some("txt"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let result = load_file(&path, &SourceConfig::default()).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Cannot access"));
    }

    #[tokio::test]
    async fn test_load_disallowed_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "report.pdf", "not really a pdf").await;

        let result = load_file(&path, &SourceConfig::default()).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn test_load_no_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "README", "content").await;

        let result = load_file(&path, &SourceConfig::default()).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no extension"));
    }

    #[tokio::test]
    async fn test_load_over_size_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "big.txt", &"x".repeat(64)).await;

        let config = SourceConfig { max_bytes: 16 };
        let result = load_file(&path, &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("byte limit"));
    }

    #[tokio::test]
    async fn test_size_limit_zero_is_unlimited() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "big.txt", &"x".repeat(64)).await;

        let config = SourceConfig { max_bytes: 0 };
        let input = load_file(&path, &config).await.unwrap();
        assert_eq!(input.content.len(), 64);
    }

    #[tokio::test]
    async fn test_load_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.txt");
        std::fs::write(&path, [0xFF, 0xFE, 0xFD]).unwrap();

        let result = load_file(&path, &SourceConfig::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("subdir.txt");
        std::fs::create_dir(&dir_path).unwrap();

        let result = load_file(&dir_path, &SourceConfig::default()).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not a regular file"));
    }

    #[test]
    fn test_matching_types_same_extension() {
        let a = ComparisonInput {
            kind: SourceKind::File,
            label: "a.txt".to_string(),
            content: String::new(),
        };
        let b = ComparisonInput {
            kind: SourceKind::File,
            label: "b.txt".to_string(),
            content: String::new(),
        };
        assert!(validate_matching_types(&a, &b).is_ok());
    }

    #[test]
    fn test_matching_types_rejects_mismatch() {
        let a = ComparisonInput {
            kind: SourceKind::File,
            label: "a.txt".to_string(),
            content: String::new(),
        };
        let b = ComparisonInput {
            kind: SourceKind::File,
            label: "b.md".to_string(),
            content: String::new(),
        };
        let result = validate_matching_types(&a, &b);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("different types"));
    }

    #[test]
    fn test_matching_types_allows_text_and_file_mix() {
        let a = ComparisonInput::from_text("original", "typed text");
        let b = ComparisonInput {
            kind: SourceKind::File,
            label: "b.txt".to_string(),
            content: String::new(),
        };
        assert!(validate_matching_types(&a, &b).is_ok());
        assert!(validate_matching_types(&a, &a).is_ok());
    }

    #[test]
    fn test_text_input_has_no_extension() {
        let input = ComparisonInput::from_text("modified", "with.dots.txt in the label");
        assert_eq!(input.extension(), None);
    }
}
