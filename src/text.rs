//! Text canonicalization for matching

/// Collapse whitespace runs to one space, trim, lower-case.
///
/// Absent or empty input gives an empty string.
pub fn normalize_text(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.is_empty() => t.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase(),
        _ => String::new(),
    }
}

/// Normalized question split into terms, duplicates kept
pub fn query_terms(question: &str) -> Vec<String> {
    normalize_text(Some(question))
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
