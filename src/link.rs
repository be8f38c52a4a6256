//! Link extraction from pasted text.

use std::sync::LazyLock;

use regex::Regex;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"'<>\[\](){}]+"#).expect("valid regex"));

/// Pulls the first `http(s)` URL out of raw pasted text.
///
/// Pasting a whole paragraph (a share message, a chat line) should still
/// yield a usable link, so trailing sentence punctuation is trimmed.
/// Returns `None` when the text contains no URL at all.
///
/// # Panics
///
/// Panics if the internal URL regex fails to compile (this is a compile-time
/// constant and will not happen in practice).
#[must_use]
pub fn extract_link(input: &str) -> Option<String> {
    let found = LINK_RE.find(input)?;
    let trimmed = found.as_str().trim_end_matches(['.', ',', ';', '!', '?']);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
