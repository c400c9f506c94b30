//! Linux-safe filename sanitization.

/// Linux NAME_MAX.
const MAX_LEN: usize = 255;

/// Sanitizes a candidate filename for safe use as a single path component.
///
/// NUL, path separators, whitespace, and control characters become `_`,
/// runs of `_` collapse to one, leading/trailing dots, spaces, and
/// underscores are trimmed, and the result is cut to 255 bytes on a char
/// boundary.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.chars() {
        let keep = !(c == '\0'
            || c == '/'
            || c == '\\'
            || c.is_control()
            || c == ' '
            || c == '\t');
        if keep {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_' || c == ' ');

    if trimmed.len() <= MAX_LEN {
        return trimmed.to_string();
    }
    let mut cut = MAX_LEN;
    while cut > 0 && !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    trimmed[..cut].to_string()
}
