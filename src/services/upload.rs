use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Where stored files are mounted on the HTTP router.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Persists uploaded movie images to local disk under randomized names.
///
/// Only `image/*` payloads are accepted, capped at the configured per-file
/// size. Returned values are public URL paths, ready to store on the entity.
pub struct UploadService {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadService {
    #[must_use]
    pub fn new(dir: &str, max_bytes: usize) -> Self {
        Self {
            dir: PathBuf::from(dir),
            max_bytes,
        }
    }

    /// Validates an incoming part without touching the filesystem.
    pub fn check(&self, content_type: Option<&str>, filename: &str, len: usize) -> Result<()> {
        let mime = content_type.map_or_else(
            || mime_guess::from_path(filename).first_or_octet_stream().to_string(),
            ToString::to_string,
        );

        if !mime.starts_with("image/") {
            anyhow::bail!("Only image files are accepted (got {mime})");
        }

        if len > self.max_bytes {
            anyhow::bail!(
                "File too large: {len} bytes (limit {} bytes)",
                self.max_bytes
            );
        }

        Ok(())
    }

    pub async fn save(
        &self,
        content_type: Option<&str>,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String> {
        self.check(content_type, filename, bytes.len())?;

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await?;
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg");
        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        let file_path = self.dir.join(&stored_name);

        fs::write(&file_path, bytes)
            .await
            .with_context(|| format!("Failed to write upload to {}", file_path.display()))?;

        info!(path = %file_path.display(), "Stored upload");

        Ok(format!("{PUBLIC_PREFIX}/{stored_name}"))
    }
}
