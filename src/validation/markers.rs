//! Not-found detection for redirect hops and page content.

/// Phrases that indicate a missing repository when found in a page body.
///
/// Matching is case-insensitive and each marker counts at most once. They
/// overlap on purpose ("page not found" also contains "not found"), so a
/// typical error page scores 2 or 3.
pub const NOT_FOUND_MARKERS: [&str; 4] =
    ["not found", "404", "page not found", "repository not found"];

/// Number of distinct [`NOT_FOUND_MARKERS`] present in `body` (0-4).
pub fn count_not_found_markers(body: &str) -> u32 {
    let lowered = body.to_lowercase();
    NOT_FOUND_MARKERS
        .iter()
        .filter(|marker| lowered.contains(*marker))
        .count() as u32
}

/// Whether any redirect hop URL contains "404" (case-insensitive).
pub fn chain_has_not_found_hop(hops: &[String]) -> bool {
    hops.iter().any(|hop| hop.to_lowercase().contains("404"))
}
