//! Error message cleanup before messages are stored or printed.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Removes control characters (except newline, tab and carriage return).
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}

/// Sanitizes a message and truncates it to `MAX_ERROR_MESSAGE_LENGTH` characters.
///
/// Truncated messages end with a marker giving the original length.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let char_count = sanitized.chars().count();
    if char_count <= MAX_ERROR_MESSAGE_LENGTH {
        return sanitized;
    }

    // Leave room for the marker
    let keep = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
    let head: String = sanitized.chars().take(keep).collect();
    format!("{head}... (truncated, original length: {char_count} chars)")
}
