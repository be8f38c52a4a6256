//! Pre-flight validation for user-triggered actions.
//!
//! Both checks are pure predicates, run synchronously before any network
//! effect. A rejection becomes a blocking notice in the UI; it never reaches
//! the retrieval session.

/// Why an action was rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The link field is empty or whitespace-only.
    EmptyLink,
    /// No variant or carousel item is available to download.
    NoSelection,
}

impl Notice {
    /// Text shown in the blocking notice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyLink => "Paste a link first",
            Self::NoSelection => "Select a quality first",
        }
    }
}

/// Whether a retrieval may be submitted for `link`.
#[must_use]
pub fn can_submit(link: &str) -> bool {
    check_submit(link).is_ok()
}

/// Whether a download may be triggered for `link` with `selection`.
#[must_use]
pub fn can_download(link: &str, selection: Option<&str>) -> bool {
    check_download(link, selection).is_ok()
}

/// Validates a submit, returning the notice to surface on rejection.
pub fn check_submit(link: &str) -> Result<(), Notice> {
    if link.trim().is_empty() {
        Err(Notice::EmptyLink)
    } else {
        Ok(())
    }
}

/// Validates a download, returning the non-empty selection on success.
pub fn check_download<'a>(link: &str, selection: Option<&'a str>) -> Result<&'a str, Notice> {
    check_submit(link)?;
    selection
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(Notice::NoSelection)
}
