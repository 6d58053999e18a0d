//! Embedded image data for variants
//!
//! Variant images travel inline as `data:` URIs, so a picked file is read
//! and base64-encoded before it joins the draft.

use std::path::Path;

use base64::Engine;

use crate::ClientResult;

/// Placeholder shown for products without any variant image
pub fn placeholder_image(name: &str) -> String {
    format!(
        "/placeholder.svg?height=100&width=100&query={}",
        urlencoding::encode(name)
    )
}

/// Build a `data:` URI from raw bytes
pub fn data_uri(bytes: &[u8], mime: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Read a file and encode it as a `data:` URI, guessing the MIME type from
/// the extension.
pub async fn encode_image_file(path: impl AsRef<Path>) -> ClientResult<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    tracing::debug!(path = %path.display(), %mime, size = bytes.len(), "Embedded image file");
    Ok(data_uri(&bytes, mime.essence_str()))
}

/// Whether a string already is an image reference usable as-is
pub fn is_image_reference(value: &str) -> bool {
    value.starts_with("data:")
        || value.starts_with("http://")
        || value.starts_with("https://")
        || value.starts_with('/')
}
