use once_cell::sync::Lazy;
use regex::Regex;

/// Anything with an `http`, `https`, `ftp` or `file` scheme followed by URL-ish characters.
/// The last character may not be sentence punctuation such as `.`, `,` or `;`.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?|ftp|file)://[-a-zA-Z0-9+&@#/%?=~_|!:,.;]*[-a-zA-Z0-9+&@#/%=~_|]")
        .expect("URL pattern is a valid regex")
});

/// Returns every substring of `text` that looks like an absolute URL, in order of appearance.
/// HTML entities are decoded first so `&quot;` and friends never end up inside a match.
/// Candidates are not validated here.
pub fn extract_urls(text: &str) -> Vec<String> {
    let decoded = html_escape::decode_html_entities(text);
    URL_PATTERN
        .find_iter(&decoded)
        .map(|found| found.as_str().to_string())
        .collect()
}
