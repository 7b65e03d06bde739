use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file is {size} bytes; logos are limited to {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a logo file and encode it as an inline data URI.
///
/// The source-file ceiling is enforced against the file size before any
/// bytes are read; a file exactly at the limit passes, one byte over fails.
pub async fn encode_logo(path: &Path) -> Result<String, UploadError> {
    let limit = config::config().upload.max_logo_bytes;

    let metadata = tokio::fs::metadata(path).await.map_err(|e| UploadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let size = metadata.len();
    if size > limit {
        return Err(UploadError::TooLarge { size, limit });
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| UploadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(encode_bytes(&bytes))
}

/// Encode raw image bytes as a data URI, sniffing the MIME type from the
/// content. Unrecognized content falls back to a generic type rather than
/// failing; the field is optional either way.
pub fn encode_bytes(bytes: &[u8]) -> String {
    let mime = infer::get(bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
