//! Signature image loading
//!
//! Reads an image from disk and encodes it as a `data:` URL so it can ride
//! along in the JSON payload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use thiserror::Error;

/// Largest accepted signature file, in bytes
pub const MAX_SIGNATURE_BYTES: u64 = 1_048_576;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("Please upload only image files (JPG, PNG, etc.)")]
    NotAnImage,
    #[error("File size must be less than 1MB. Please choose a smaller image.")]
    TooLarge,
    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// MIME type implied by the file extension, if it names an image
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

/// Load `path` as a `data:<mime>;base64,...` URL
pub async fn load_signature(path: impl AsRef<Path>) -> Result<String, SignatureError> {
    let path = path.as_ref();
    let read_error = |source| SignatureError::Read {
        path: path.display().to_string(),
        source,
    };

    let mime = image_mime(path).ok_or(SignatureError::NotAnImage)?;
    let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
    if metadata.len() > MAX_SIGNATURE_BYTES {
        return Err(SignatureError::TooLarge);
    }
    let bytes = tokio::fs::read(path).await.map_err(read_error)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Signature loaded");
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}
