//! Uploaded media: allow-list and size checks, on-disk storage and the
//! `media_files` rows describing what is stored.

use std::path::{Path, PathBuf};

use chrono::Utc;
use models::media_files;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tokio::fs;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Which uploads are accepted.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_mime_types: Vec<String>,
    pub max_bytes: usize,
}

impl UploadPolicy {
    pub fn from_settings(cfg: &configs::UploadConfig) -> Self {
        Self { allowed_mime_types: cfg.allowed_mime_types.clone(), max_bytes: cfg.max_bytes }
    }

    /// Reject a declared content type outside the allow-list.
    pub fn check_type(&self, content_type: Option<&str>) -> Result<String, ServiceError> {
        let mime = content_type
            .map(|c| c.split(';').next().unwrap_or(c).trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ServiceError::invalid("file", "content type is required"))?;
        if !self.allowed_mime_types.iter().any(|a| a == &mime) {
            return Err(ServiceError::invalid("file", format!("file type {mime} is not allowed")));
        }
        Ok(mime)
    }

    /// Reject empty files and files above the ceiling.
    pub fn check_size(&self, size: usize) -> Result<(), ServiceError> {
        if size == 0 {
            return Err(ServiceError::invalid("file", "file is empty"));
        }
        if size > self.max_bytes {
            return Err(ServiceError::invalid("file", format!("file exceeds the {} byte limit", self.max_bytes)));
        }
        Ok(())
    }
}

/// Files under `dir`, published at `public_prefix/<file_name>`.
#[derive(Debug, Clone)]
pub struct MediaStore {
    pub dir: PathBuf,
    pub public_prefix: String,
    pub policy: UploadPolicy,
}

/// File extension (with dot) kept from the client's name, falling back to
/// one implied by the MIME type.
fn extension_for(original_name: &str, mime: &str) -> String {
    let from_name = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()));
    if let Some(ext) = from_name {
        return format!(".{ext}");
    }
    match mime {
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/png" => ".png",
        "image/webp" => ".webp",
        "image/gif" => ".gif",
        "video/mp4" => ".mp4",
        "video/webm" => ".webm",
        "video/mov" | "video/quicktime" => ".mov",
        _ => "",
    }
    .to_string()
}

/// Width of the `original_name` column.
const ORIGINAL_NAME_MAX_LEN: usize = 255;

/// Client file names are informational, so long ones are cut to the column
/// width, keeping the extension.
fn clamp_original_name(name: &str) -> String {
    if name.chars().count() <= ORIGINAL_NAME_MAX_LEN {
        return name.to_string();
    }
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().count() < 16)
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let keep = ORIGINAL_NAME_MAX_LEN - ext.chars().count();
    let stem: String = name.chars().take(keep).collect();
    format!("{stem}{ext}")
}

impl MediaStore {
    pub fn from_settings(cfg: &configs::UploadConfig) -> Self {
        Self { dir: PathBuf::from(&cfg.dir), public_prefix: cfg.public_prefix.clone(), policy: UploadPolicy::from_settings(cfg) }
    }

    /// Validate, write the bytes as `<uuid><ext>` and record the file.
    #[instrument(skip(self, db, bytes), fields(size = bytes.len()))]
    pub async fn store(
        &self,
        db: &DatabaseConnection,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<media_files::Model, ServiceError> {
        let checked = self
            .policy
            .check_type(content_type)
            .and_then(|mime| self.policy.check_size(bytes.len()).map(|_| mime));
        let mime = match checked {
            Ok(mime) => mime,
            Err(e) => {
                common::metrics::UPLOADS.with_label_values(&["rejected"]).inc();
                return Err(e);
            }
        };

        let id = Uuid::new_v4();
        let file_name = format!("{}{}", id, extension_for(original_name, &mime));
        let path = self.dir.join(&file_name);
        fs::create_dir_all(&self.dir).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&path, bytes).await.map_err(|e| ServiceError::Storage(e.to_string()))?;

        let am = media_files::ActiveModel {
            id: Set(id),
            file_name: Set(file_name.clone()),
            original_name: Set(clamp_original_name(original_name)),
            mime_type: Set(mime),
            size: Set(bytes.len() as i64),
            url: Set(format!("{}/{}", self.public_prefix.trim_end_matches('/'), file_name)),
            uploaded_at: Set(Utc::now().into()),
        };
        let row = match am.insert(db).await {
            Ok(row) => row,
            Err(e) => {
                let _ = fs::remove_file(&path).await;
                return Err(ServiceError::from_write("media file", e));
            }
        };
        common::metrics::UPLOADS.with_label_values(&["accepted"]).inc();
        info!(service = "media", event = "stored", media_id = %row.id, file = %row.file_name);
        Ok(row)
    }

    /// Newest uploads first.
    pub async fn list(&self, db: &DatabaseConnection) -> Result<Vec<media_files::Model>, ServiceError> {
        Ok(media_files::Entity::find().order_by_desc(media_files::Column::UploadedAt).all(db).await?)
    }

    /// Remove the row and its file. A file already gone from disk is only logged.
    #[instrument(skip(self, db))]
    pub async fn delete(&self, db: &DatabaseConnection, id: &str) -> Result<(), ServiceError> {
        let id = Uuid::parse_str(id).map_err(|_| ServiceError::not_found("media file"))?;
        let row = media_files::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("media file"))?;
        media_files::Entity::delete_by_id(row.id).exec(db).await?;
        if let Err(e) = fs::remove_file(self.dir.join(&row.file_name)).await {
            warn!(service = "media", event = "file_missing", file = %row.file_name, error = %e);
        }
        info!(service = "media", event = "deleted", media_id = %row.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn store() -> MediaStore {
        let mut cfg = configs::UploadConfig::default();
        cfg.dir = std::env::temp_dir().join(format!("media_{}", Uuid::new_v4())).to_string_lossy().into_owned();
        cfg.max_bytes = 16;
        MediaStore::from_settings(&cfg)
    }

    fn rejected_field(e: ServiceError) -> String {
        match e {
            ServiceError::Invalid(f) => f[0].field.clone(),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn accepts_allowed_file_within_limit() -> anyhow::Result<()> {
        let db = get_db().await?;
        let media = store();
        let row = media.store(&db, "Logo.PNG", Some("image/png"), b"\x89PNG....").await?;
        assert!(row.file_name.ends_with(".png"));
        assert_eq!(row.url, format!("/uploads/{}", row.file_name));
        assert_eq!(row.size, 8);
        assert!(fs::metadata(media.dir.join(&row.file_name)).await.is_ok());
        assert_eq!(media.list(&db).await?.len(), 1);
        let _ = fs::remove_dir_all(&media.dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn rejects_disallowed_type_and_oversize() -> anyhow::Result<()> {
        let db = get_db().await?;
        let media = store();
        let err = media.store(&db, "a.pdf", Some("application/pdf"), b"%PDF").await.unwrap_err();
        assert_eq!(rejected_field(err), "file");
        let err = media.store(&db, "a.png", Some("image/png"), &[0u8; 17]).await.unwrap_err();
        assert_eq!(rejected_field(err), "file");
        let err = media.store(&db, "a.png", Some("image/png"), b"").await.unwrap_err();
        assert_eq!(rejected_field(err), "file");
        // exactly at the ceiling is fine
        media.store(&db, "a.gif", Some("image/gif"), &[1u8; 16]).await?;
        let _ = fs::remove_dir_all(&media.dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_row_and_tolerates_missing_file() -> anyhow::Result<()> {
        let db = get_db().await?;
        let media = store();
        let row = media.store(&db, "clip.mp4", Some("video/mp4"), b"data").await?;
        fs::remove_file(media.dir.join(&row.file_name)).await?;
        media.delete(&db, &row.id.to_string()).await?;
        assert!(media.list(&db).await?.is_empty());
        assert!(matches!(media.delete(&db, &row.id.to_string()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(media.delete(&db, "nope").await, Err(ServiceError::NotFound(_))));
        let _ = fs::remove_dir_all(&media.dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn long_original_names_are_clamped() -> anyhow::Result<()> {
        let db = get_db().await?;
        let media = store();
        let long = format!("{}.png", "x".repeat(400));
        let row = media.store(&db, &long, Some("image/png"), b"png").await?;
        assert_eq!(row.original_name.chars().count(), 255);
        assert!(row.original_name.ends_with("x.png"));
        assert!(row.file_name.ends_with(".png"));
        let _ = fs::remove_dir_all(&media.dir).await;
        Ok(())
    }

    #[test]
    fn short_names_are_kept() {
        assert_eq!(clamp_original_name("logo.png"), "logo.png");
    }

    #[test]
    fn extension_falls_back_to_mime() {
        assert_eq!(extension_for("photo", "image/jpeg"), ".jpg");
        assert_eq!(extension_for("movie.MOV", "video/mov"), ".mov");
        assert_eq!(extension_for("weird.p/ng", "image/png"), ".png");
    }
}
