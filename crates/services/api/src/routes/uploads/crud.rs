use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use errors::CustomError;
use futures_util::{StreamExt, TryStreamExt};
use lib_config::config::configuration::Settings;
use serde_json::json;
use std::path::PathBuf;
use tracing::instrument;
use uuid::Uuid;

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

fn image_extension(filename: &str) -> Result<String, CustomError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CustomError::ValidationError(
            "Unsupported file type. Allowed: png, jpg, jpeg, gif, webp".to_string(),
        ));
    }
    Ok(ext)
}

/******************************************/
// Image upload Route
/******************************************/
/**
 * @route   POST /api/uploads
 * @access  GameAdder/Admin
 */
#[instrument(name = "Upload game image", skip(payload, settings))]
pub async fn upload_image(
    mut payload: Multipart,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, CustomError> {
    let mut field = payload
        .try_next()
        .await
        .map_err(|_| CustomError::ValidationError("Invalid multipart payload".to_string()))?
        .ok_or_else(|| CustomError::ValidationError("No file provided".to_string()))?;

    let filename = field
        .content_disposition()
        .get_filename()
        .ok_or_else(|| CustomError::ValidationError("Missing file name".to_string()))?
        .to_string();
    let ext = image_extension(&filename)?;

    // Enforce the cap while streaming so an oversized upload is rejected
    // before it is ever buffered in full.
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk
            .map_err(|_| CustomError::ValidationError("Failed to read file data".to_string()))?;
        if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(CustomError::ValidationError(
                "File too large. Maximum size is 5MB".to_string(),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    if bytes.is_empty() {
        return Err(CustomError::ValidationError("Empty file".to_string()));
    }

    let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
    let dir = PathBuf::from(&settings.uploads.dir);
    tokio::fs::create_dir_all(&dir)
        .await
        .context("Failed to create upload directory")?;
    tokio::fs::write(dir.join(&stored_name), &bytes)
        .await
        .context("Failed to persist uploaded file")?;

    tracing::info!("Stored upload {} ({} bytes)", stored_name, bytes.len());

    Ok(HttpResponse::Created().json(json!({ "url": format!("/uploads/{}", stored_name) })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_whitelisted_extensions_case_insensitively() {
        assert_eq!(image_extension("cover.PNG").unwrap(), "png");
        assert_eq!(image_extension("shot.jpeg").unwrap(), "jpeg");
    }

    #[test]
    fn rejects_executables_and_missing_extensions() {
        assert!(image_extension("payload.exe").is_err());
        assert!(image_extension("noextension").is_err());
    }
}
