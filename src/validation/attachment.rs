use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::AppError;

/// Decodes an uploaded body and enforces the configured size limit.
pub fn decode_content(encoded: &str, max_bytes: usize) -> Result<Vec<u8>, AppError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::field("content_base64", "File content is not valid base64"))?;

    if bytes.is_empty() {
        return Err(AppError::field("content_base64", "File content is empty"));
    }

    if bytes.len() > max_bytes {
        return Err(AppError::field(
            "content_base64",
            format!("File exceeds the {} byte limit", max_bytes),
        ));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_within_limit() {
        let encoded = STANDARD.encode(b"hello");
        assert_eq!(decode_content(&encoded, 16).unwrap(), b"hello");
    }

    #[test]
    fn rejects_oversize_and_garbage() {
        let encoded = STANDARD.encode([0u8; 32]);
        assert!(decode_content(&encoded, 16).is_err());
        assert!(decode_content("not base64!!", 16).is_err());
    }
}
