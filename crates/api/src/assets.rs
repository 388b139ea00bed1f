//! Local-disk photo asset store.
//!
//! Uploads are written under a freshly generated name before the photo
//! row is committed, and removed best-effort after the row is gone. The
//! metadata is authoritative: a delete that leaves a dangling file on
//! disk is logged, never surfaced.

use std::path::PathBuf;

use stockroom_core::naming;

/// Public URL prefix uploaded assets are served under (see the `ServeDir`
/// mount in `main.rs`).
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Write-once blob store rooted at the configured upload directory.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure the upload directory exists. Called once at startup.
    pub async fn init(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Store asset bytes under a generated name and return the public URL.
    ///
    /// The name is a random token plus the extension inferred from the
    /// client filename; existing files are never overwritten.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let name = naming::stored_file_name(original_name);
        let path = self.root.join(&name);
        tokio::fs::write(&path, bytes).await?;
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }

    /// Best-effort delete of a stored asset by its public URL.
    ///
    /// Failures (including a URL outside the upload area, which generated
    /// URLs never produce) are logged at `warn` and swallowed.
    pub async fn delete_by_url(&self, url: &str) {
        let Some(name) = url.strip_prefix(PUBLIC_PREFIX).and_then(|s| s.strip_prefix('/'))
        else {
            tracing::warn!(url, "Skipping asset delete: URL outside the upload area");
            return;
        };

        // Generated names never contain path separators; reject anything
        // that does rather than resolve it.
        if name.contains('/') || name.contains("..") {
            tracing::warn!(url, "Skipping asset delete: suspicious path");
            return;
        }

        let path = self.root.join(name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(url, error = %e, "Failed to delete photo asset");
        }
    }
}
