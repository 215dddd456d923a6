use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anything outside the ASCII alphanumerics and whitespace is dropped, not folded.
    static ref STRIP: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
}

/// Tokenize text by lowercasing, stripping characters outside `[a-z0-9]` and
/// whitespace, then splitting on whitespace runs. Never fails; empty or
/// punctuation-only input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    STRIP
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}
