/// Number of leading characters of the raw text kept in the summary.
pub const SUMMARY_CHARS: usize = 500;
pub const ELLIPSIS: &str = "...";

/// Positional preview: the first `SUMMARY_CHARS` characters, whitespace
/// collapsed and trimmed, always followed by `ELLIPSIS` (even when the text
/// was shorter than the cut-off, or empty).
pub fn summarize(text: &str) -> String {
    let prefix: String = text.chars().take(SUMMARY_CHARS).collect();
    let collapsed = prefix.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{collapsed}{ELLIPSIS}")
}
