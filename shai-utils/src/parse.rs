/// Maximum length of a client scope identifier.
pub const MAX_SCOPE_LEN: usize = 64;

/// Parse a boolean flag the way the environment is usually written (`1`, `true`, `yes`, `on`).
pub fn parse_bool_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Normalize a client-supplied scope identifier.
///
/// Keeps ASCII alphanumerics, `-` and `_`, drops everything else and caps the
/// result at [`MAX_SCOPE_LEN`] characters. Returns `None` when nothing usable
/// remains.
pub fn sanitize_scope(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_')
        .take(MAX_SCOPE_LEN)
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
