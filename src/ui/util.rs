use unicode_width::UnicodeWidthChar;

/// Longest prefix of `s` that fits in `max_width` terminal cells.
pub fn truncate_width(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        used += c.width().unwrap_or(0);
        if used > max_width {
            return &s[..idx];
        }
    }
    s
}

/// Wide-tracked small caps, e.g. "July" -> "J U L Y".
pub fn letter_space(s: &str) -> String {
    let upper = s.to_uppercase();
    let mut out = String::with_capacity(upper.len() * 2);
    for (i, c) in upper.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
