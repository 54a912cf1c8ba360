//! Résumé storage on local disk
//!
//! Files land in `<upload_dir>/resumes/<unix-ms>-<random><ext>` and are referenced
//! by the URL `/uploads/resumes/<file>`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use megahr_application::errors::{ApplicationError, ApplicationResult};
use megahr_application::ports::{ResumeStore, StoredFile};

const URL_PREFIX: &str = "/uploads/resumes/";

pub struct DiskResumeStore {
    root: PathBuf,
}

impl DiskResumeStore {
    pub fn new(upload_dir: impl AsRef<Path>) -> Self {
        Self {
            root: upload_dir.as_ref().join("resumes"),
        }
    }

    /// Maps a stored URL back onto disk; anything outside the résumé folder is ignored
    fn path_for(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(URL_PREFIX)?;
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return None;
        }
        Some(self.root.join(name))
    }
}

fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

fn io_error(err: std::io::Error) -> ApplicationError {
    ApplicationError::infrastructure(format!("résumé storage failed: {err}"))
}

#[async_trait]
impl ResumeStore for DiskResumeStore {
    async fn save(&self, original_name: &str, bytes: Vec<u8>) -> ApplicationResult<String> {
        tokio::fs::create_dir_all(&self.root).await.map_err(io_error)?;
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let file_name = format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            suffix,
            extension_of(original_name)
        );
        tokio::fs::write(self.root.join(&file_name), bytes)
            .await
            .map_err(io_error)?;
        tracing::debug!(file = %file_name, "stored résumé");
        Ok(format!("{URL_PREFIX}{file_name}"))
    }

    async fn read(&self, url: &str) -> ApplicationResult<Option<StoredFile>> {
        let Some(path) = self.path_for(url) else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(StoredFile {
                file_name: url.trim_start_matches(URL_PREFIX).to_string(),
                bytes,
            })),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(err)),
        }
    }

    async fn remove(&self, url: &str) -> ApplicationResult<()> {
        let Some(path) = self.path_for(url) else {
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskResumeStore::new(dir.path());

        let url = store.save("Ada CV.PDF", b"%PDF".to_vec()).await.unwrap();
        assert!(url.starts_with(URL_PREFIX));
        assert!(url.ends_with(".pdf"));

        let file = store.read(&url).await.unwrap().unwrap();
        assert_eq!(file.bytes, b"%PDF");

        store.remove(&url).await.unwrap();
        assert!(store.read(&url).await.unwrap().is_none());
        // Removing twice is fine
        store.remove(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_traversal_urls_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskResumeStore::new(dir.path());
        assert!(store.read("/uploads/resumes/../secret").await.unwrap().is_none());
        assert!(store.read("/etc/passwd").await.unwrap().is_none());
    }

    #[test]
    fn test_extension_is_sanitized() {
        assert_eq!(extension_of("cv.docx"), ".docx");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of("weird.p$f"), "");
    }
}
