use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`; absolute paths bypass the base.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    // Written to a sibling temp file, then renamed over the target.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = temp_path_for(&full_path);
        let written = match tokio::fs::write(&temp_path, data).await {
            Ok(()) => tokio::fs::rename(&temp_path, &full_path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.full_path(path)).await?)
    }

    async fn remove_file(&self, path: &str) -> Result<()> {
        tokio::fs::remove_file(self.full_path(path)).await?;
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_read_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/jobs_checkpoint.csv", b"a,b\n1,2\n").await.unwrap();
        assert!(storage.exists("nested/jobs_checkpoint.csv").await.unwrap());
        assert!(!temp_dir.path().join("nested/jobs_checkpoint.csv.tmp").exists());
        assert_eq!(
            storage.read_file("nested/jobs_checkpoint.csv").await.unwrap(),
            b"a,b\n1,2\n"
        );

        storage.write_file("nested/jobs_checkpoint.csv", b"a,b\n").await.unwrap();
        assert_eq!(storage.read_file("nested/jobs_checkpoint.csv").await.unwrap(), b"a,b\n");

        storage.remove_file("nested/jobs_checkpoint.csv").await.unwrap();
        assert!(!storage.exists("nested/jobs_checkpoint.csv").await.unwrap());
    }

    #[tokio::test]
    async fn test_absolute_paths_ignore_base() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("jobs.csv");
        let storage = LocalStorage::new("/nonexistent-base");

        storage.write_file(file.to_str().unwrap(), b"x").await.unwrap();
        assert!(file.exists());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        // a non-empty directory cannot be replaced by a file
        std::fs::create_dir_all(temp_dir.path().join("jobs_classified.csv/inner")).unwrap();

        let result = storage.write_file("jobs_classified.csv", b"a,b\n").await;

        assert!(result.is_err());
        assert!(!temp_dir.path().join("jobs_classified.csv.tmp").exists());
        assert!(temp_dir.path().join("jobs_classified.csv/inner").is_dir());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        assert!(matches!(
            storage.read_file("missing.csv").await,
            Err(crate::utils::error::ClassifyError::IoError(_))
        ));
    }
}
