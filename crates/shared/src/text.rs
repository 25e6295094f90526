//! Text normalization helpers for submitted form values.

/// Splits a comma-separated list into trimmed, non-empty segments.
///
/// Order is preserved. `None` and the empty string both yield an empty list.
pub fn split_comma_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Returns true when the value is absent or contains only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Trims an optional value, returning an empty string when absent.
pub fn trimmed_or_empty(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
