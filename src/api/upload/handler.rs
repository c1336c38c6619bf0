//! Image Upload Handler
//!
//! Validates the uploaded image locally, then streams it to the configured
//! third-party image host and returns the public URL.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub original_name: String,
    pub size: usize,
    pub url: String,
}

/// 图床响应 (只取需要的字段)
#[derive(Debug, Deserialize)]
struct ImageHostResponse {
    data: ImageHostData,
}

#[derive(Debug, Deserialize)]
struct ImageHostData {
    url: String,
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // Verify it's actually an image by trying to load it
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext_lower, e
        )));
    }

    Ok(())
}

/// 上传到第三方图床，返回公开 URL
async fn forward_to_host(
    state: &ServerState,
    filename: &str,
    data: Vec<u8>,
) -> Result<String, AppError> {
    let api_key = state
        .config
        .image_host_key
        .clone()
        .ok_or_else(|| AppError::internal("IMAGE_HOST_KEY is not configured"))?;

    let part = reqwest::multipart::Part::bytes(data).file_name(filename.to_string());
    let form = reqwest::multipart::Form::new().part("image", part);

    let response = reqwest::Client::new()
        .post(&state.config.image_host_url)
        .query(&[("key", api_key)])
        .multipart(form)
        .send()
        .await
        .map_err(|e| AppError::internal(format!("Image host request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::internal(format!(
            "Image host returned {}",
            response.status()
        )));
    }

    let parsed: ImageHostResponse = response
        .json()
        .await
        .map_err(|e| AppError::internal(format!("Invalid image host response: {}", e)))?;

    Ok(parsed.data.url)
}

/// POST /api/manager/upload - 上传菜品图片
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let ext = original_name.rsplit('.').next().unwrap_or("").to_string();
        let data = field.bytes().await?.to_vec();

        validate_image(&data, &ext)?;

        let size = data.len();
        let url = forward_to_host(&state, &original_name, data).await?;

        tracing::info!(file = %original_name, size, "Image uploaded");

        return Ok(Json(UploadResponse {
            original_name,
            size,
            url,
        }));
    }

    Err(AppError::validation("Missing 'image' field in upload"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_file_is_rejected() {
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        assert!(validate_image(&data, "png").is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        assert!(validate_image(&[0u8; 4], "gif").is_err());
        assert!(validate_image(&[0u8; 4], "exe").is_err());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(validate_image(&[0u8; 64], "png").is_err());
    }
}
