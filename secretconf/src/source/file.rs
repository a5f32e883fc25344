use super::{SecretSource, SourceError};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Reads secrets from files in a directory, one file per key.
///
/// Matches how Kubernetes and Docker mount secrets (`/run/secrets/API_KEY`).
/// Surrounding whitespace, including the trailing newline most tools
/// write, is trimmed.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory secrets are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SourceError> {
        let invalid = |reason| SourceError::InvalidKey {
            key: key.to_string(),
            reason,
        };

        if key.is_empty() {
            return Err(invalid("key is empty"));
        }

        // Keys must name a file directly inside the root
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(key)),
            _ => Err(invalid("key must be a plain file name")),
        }
    }
}

#[async_trait]
impl SecretSource for FileSource {
    async fn fetch(&self, key: &str) -> Result<String, SourceError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(contents.trim().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SourceError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(SourceError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fetch_trims_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("API_KEY")).unwrap();
        writeln!(file, "super_secret_key").unwrap();

        let source = FileSource::new(dir.path());
        assert_eq!(source.fetch("API_KEY").await.unwrap(), "super_secret_key");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());

        let err = source.fetch("MISSING").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());

        for key in ["../etc/passwd", "nested/key", "/abs", "..", ""] {
            let err = source.fetch(key).await.unwrap_err();
            assert!(
                matches!(err, SourceError::InvalidKey { .. }),
                "key {key:?} should be rejected, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("SUBDIR")).unwrap();

        let source = FileSource::new(dir.path());
        let err = source.fetch("SUBDIR").await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
