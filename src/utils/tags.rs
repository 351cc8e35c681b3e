/// Splits the single comma-delimited tags field the posting form submits.
/// Segments are trimmed and empty segments dropped, so `"a, b ,, c"` becomes
/// `["a", "b", "c"]` and an empty input yields an empty list, never null.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
