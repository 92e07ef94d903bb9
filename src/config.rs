use crate::errors::RecopyError;
use std::path::Path;
use tokio::fs as async_fs;
use tracing::info;

/// Creates an empty ignore file at `root` when none exists. Returns whether a
/// file was created.
pub async fn ensure_ignore_file(root: &Path, ignore_file_name: &str) -> Result<bool, RecopyError> {
    let path = root.join(ignore_file_name);
    if async_fs::try_exists(&path).await? {
        return Ok(false);
    }

    async_fs::OpenOptions::new()
        .write(true)
        .create(true)
        .open(&path)
        .await
        .map_err(|e| {
            RecopyError::ConfigError(format!("cannot create {}: {}", path.display(), e))
        })?;
    info!("Created {}", path.display());
    Ok(true)
}
