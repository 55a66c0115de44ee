use serde_json::Value;

/// Parse a reply that was asked to be a JSON array of strings.
///
/// An array yields its entries in order. Any other JSON value yields the whole
/// reply as a single line. Text that is not JSON at all is split into
/// non-empty lines, keeping at most `limit`.
pub fn parse_json_lines(content: &str, limit: usize) -> Vec<String> {
    let content = content.trim();
    let body = strip_code_fence(content);

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text.trim().to_owned(),
                other => other.to_string(),
            })
            .filter(|line| !line.is_empty())
            .collect(),
        Ok(_) => vec![body.to_owned()],
        Err(_) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(limit)
            .map(str::to_owned)
            .collect(),
    }
}

/// Split a free-text reply into clean lines, dropping list markers.
pub fn clean_list_lines(content: &str, limit: usize) -> Vec<String> {
    content
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(str::to_owned)
        .collect()
}

/// Remove a leading `1.`, `2)`, `-`, `*` or `•` marker.
pub fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();

    let digits_end = line
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(line.len(), |(idx, _)| idx);
    if digits_end > 0 {
        let rest = &line[digits_end..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return stripped.trim_start();
        }
        return line;
    }

    for marker in ['-', '*', '•'] {
        if let Some(stripped) = line.strip_prefix(marker) {
            return stripped.trim_start();
        }
    }

    line
}

fn strip_code_fence(content: &str) -> &str {
    let Some(inner) = content.strip_prefix("```") else {
        return content;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return content;
    };

    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}
