use crate::ports::outbound::MetricSource;
use crate::roc::domain::MetricDocument;
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum document size (10 MB). Metric documents are small; anything
/// bigger is a misconfigured source.
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// DirMetricSource adapter reading metric documents from a local
/// directory.
///
/// This is the development and test transport: the external collection
/// pipeline drops `<name>.30d.json` files into a directory and this
/// adapter serves them with the same degrade-to-None contract as the
/// HTTP source.
pub struct DirMetricSource {
    data_dir: PathBuf,
}

impl DirMetricSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Safely read a document with the usual checks:
    /// - Reject symbolic links
    /// - Validate it is a regular file
    /// - Check the size limit
    fn safe_read_file(&self, path: &Path) -> Result<String> {
        let metadata = fs::symlink_metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read metric file metadata: {}", e))?;

        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
                path.display()
            );
        }

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let file_size = metadata.len();
        if file_size > MAX_FILE_SIZE {
            anyhow::bail!(
                "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
                path.display(),
                file_size,
                MAX_FILE_SIZE
            );
        }

        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read metric file: {}", e))
    }

    fn load_document(&self, name: &str) -> Result<MetricDocument> {
        let path = self.data_dir.join(format!("{}.30d.json", name));
        if !path.exists() {
            anyhow::bail!("Metric file not found: {}", path.display());
        }

        let content = self.safe_read_file(&path)?;
        let body: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        MetricDocument::from_json(body)
            .ok_or_else(|| anyhow::anyhow!("Metric document body is neither object nor array"))
    }
}

#[async_trait]
impl MetricSource for DirMetricSource {
    async fn fetch(&self, name: &str) -> Option<MetricDocument> {
        match self.load_document(name) {
            Ok(document) if document.not_implemented() => {
                let reason = document.message.as_deref().unwrap_or("no reason given");
                eprintln!("⚠️  Metric '{}' is not implemented at the source: {}", name, reason);
                None
            }
            Ok(document) => Some(document),
            Err(e) => {
                eprintln!("⚠️  Warning: Failed to read metric '{}': {}", name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_doc(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(format!("{}.30d.json", name)), content).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_valid_document() {
        let dir = TempDir::new().unwrap();
        write_doc(&dir, "riskScore", r#"{"data": 72, "generatedAt": "2024-01-31T00:00:00Z"}"#);

        let source = DirMetricSource::new(dir.path());
        let document = source.fetch("riskScore").await.unwrap();
        assert_eq!(document.data.scalar(), Some(72.0));
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let source = DirMetricSource::new(dir.path());
        assert!(source.fetch("riskScore").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_malformed_json_is_none() {
        let dir = TempDir::new().unwrap();
        write_doc(&dir, "riskScore", "{not json");

        let source = DirMetricSource::new(dir.path());
        assert!(source.fetch("riskScore").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_not_implemented_sentinel_is_none() {
        let dir = TempDir::new().unwrap();
        write_doc(
            &dir,
            "remediationRoi",
            r#"{"status": "not_implemented", "message": "pending pipeline work"}"#,
        );

        let source = DirMetricSource::new(dir.path());
        assert!(source.fetch("remediationRoi").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_scalar_string_body_is_none() {
        let dir = TempDir::new().unwrap();
        write_doc(&dir, "riskScore", r#""just a string""#);

        let source = DirMetricSource::new(dir.path());
        assert!(source.fetch("riskScore").await.is_none());
    }
}
