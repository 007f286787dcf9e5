//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::{info, warn};

/// Ensure the upload directory exists and is writable; warn when the static
/// public directory is missing.
pub async fn ensure_env(public_dir: &str, upload_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(public_dir).await.is_err() {
        warn!(%public_dir, "public directory not found; it will be created with the upload directory");
    }
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {upload_dir}: {e}"))?;

    let probe = std::path::Path::new(upload_dir).join(".write-probe");
    tokio::fs::write(&probe, b"ok")
        .await
        .map_err(|e| anyhow::anyhow!("upload dir {upload_dir} is not writable: {e}"))?;
    let _ = tokio::fs::remove_file(&probe).await;
    info!(%upload_dir, "upload directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_upload_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("env_check_{}", uuid::Uuid::new_v4()));
        let uploads = root.join("uploads");
        ensure_env(root.to_str().unwrap(), uploads.to_str().unwrap()).await?;
        assert!(tokio::fs::metadata(&uploads).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
