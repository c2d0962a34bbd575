/// Shortens `text` to its first `max_chars` characters followed by `...`.
/// Text that already fits is returned unchanged.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
