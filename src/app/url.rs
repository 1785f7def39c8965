//! URL normalization for imported repository URLs.

use log::warn;

/// Maximum URL length accepted on import.
const MAX_URL_LENGTH: usize = 2048;

fn preview(url: &str) -> String {
    url.chars().take(50).collect()
}

/// Validates and normalizes a repository URL read from an import file.
///
/// Adds an `https://` prefix when the scheme is missing, strips trailing
/// slashes and requires an http(s) URL with a host. Logs a warning and
/// returns `None` for anything else, including URLs over `MAX_URL_LENGTH`.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    let normalized = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    let normalized = normalized.trim_end_matches('/').to_string();

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            preview(&normalized)
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
            warn!("Skipping unsupported scheme for URL: {url}");
            None
        }
        Ok(parsed) if parsed.host_str().map_or(true, str::is_empty) => {
            warn!("Skipping URL without host: {url}");
            None
        }
        Ok(_) => Some(normalized),
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}
