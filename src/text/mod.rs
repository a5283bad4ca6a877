/// Lowercase `text`, replace everything outside `[a-z0-9]` and whitespace
/// with a space, collapse whitespace runs and trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Lowercase-only pass. Punctuation such as "yrs." is kept.
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}
