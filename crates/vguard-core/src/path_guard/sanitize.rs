//! Single-component filename sanitization.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Reduces an untrusted string to a bare token usable as one filename
/// component.
///
/// - Drops `/`, `\`, NUL and other control characters
/// - Removes every `..` token, repeating until none is left
/// - Trims surrounding whitespace
/// - Limits length to 255 bytes
///
/// A result made only of dots would name the directory itself, so it becomes
/// empty. The result may be empty; callers decide on a fallback name.
pub fn sanitize_path_segment(segment: &str) -> String {
    let mut out: String = segment
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && !c.is_control())
        .collect();

    while out.contains("..") {
        out = out.replace("..", "");
    }

    let trimmed = out.trim();
    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    let name = trimmed[..take].trim_end();
    if name.chars().all(|c| c == '.') {
        return String::new();
    }
    name.to_string()
}
