pub const TAG_MARKER: &str = "##";

/// First `##` token in `paragraph`, up to the next whitespace or end of string.
pub fn extract_tag(paragraph: &str) -> Option<&str> {
    let start = paragraph.find(TAG_MARKER)?;
    let rest = &paragraph[start..];
    let end = rest
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Re-attach the paragraph's tag when the model dropped it. The flag is
/// true when a tag was prepended.
pub fn preserve_tag(paragraph: &str, summary: String) -> (String, bool) {
    if summary.contains(TAG_MARKER) {
        return (summary, false);
    }
    match extract_tag(paragraph) {
        Some(tag) => (format!("{} {}", tag, summary), true),
        None => (summary, false),
    }
}
