/// Gallons of water attributed to a single LLM token.
pub const GALLONS_PER_TOKEN: f64 = 0.0002;

/// Convert a token count into the "gallons" figure shown on the usage page.
pub fn tokens_to_gallons(tokens: u64) -> f64 {
    tokens as f64 * GALLONS_PER_TOKEN
}

/// Shorten user text for log lines, appending an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    let mut chars = single_line.chars();
    let head: String = chars.by_ref().take(max_chars).collect();

    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
