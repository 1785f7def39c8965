//! Size-capped response body reading.

use super::FetchError;

/// Reads a response body as text, keeping at most `max_bytes`.
///
/// Larger bodies are truncated rather than rejected: the content check only
/// needs the leading part of a page, and error pages are small. Invalid UTF-8
/// is replaced rather than treated as a failure.
pub(crate) async fn read_body_capped(
    mut response: reqwest::Response,
    max_bytes: usize,
) -> Result<String, FetchError> {
    let mut buffer: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = max_bytes.saturating_sub(buffer.len());
        if chunk.len() >= remaining {
            buffer.extend_from_slice(&chunk[..remaining]);
            log::debug!(
                "Response body from {} truncated at {} bytes",
                response.url(),
                max_bytes
            );
            break;
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
