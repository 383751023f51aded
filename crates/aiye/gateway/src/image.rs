//! Image payload encoding for restoration verification.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode image bytes as a `data:` URL, the form `POST /api/verify`
/// expects in `imageBase64`.
pub fn encode_image_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
