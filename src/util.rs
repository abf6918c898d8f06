// src/util.rs — Shared utility functions

/// One-line preview of a possibly multi-line text, cut to `max_chars`
/// characters with a trailing ellipsis when shortened.
pub fn preview(s: &str, max_chars: usize) -> String {
    let line = s.trim().lines().next().unwrap_or("");
    let shortened = line.chars().count() > max_chars || s.trim().lines().nth(1).is_some();
    let mut out: String = line.chars().take(max_chars).collect();
    if shortened {
        out.push('…');
    }
    out
}
