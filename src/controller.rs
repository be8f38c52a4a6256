//! Top-level coordinator for platform, link, and retrieval state.

use url::Url;

use crate::adapter::{CarouselAdapter, EncodingAdapter};
use crate::carousel::CarouselCursor;
use crate::error::Error;
use crate::gate::{self, Notice};
use crate::media::{Format, MediaKind, MediaSet, Platform, RawMediaSet, RawVideoInfo, SubKind, VideoInfo};
use crate::session::{RequestToken, RetrievalSession, SessionStatus};

/// Display-ready result of the most recent successful retrieval, keyed by
/// the variant shape rather than ad hoc field checks.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MediaState {
    /// Nothing retrieved yet (or wiped by a reset).
    #[default]
    None,
    /// Flat encoding lists (YouTube).
    Encodings(VideoInfo),
    /// Indexed carousel (Instagram). The cursor is rebuilt with the set, so
    /// its bounds always match `set.items`.
    Carousel {
        set: MediaSet,
        cursor: CarouselCursor,
    },
}

/// An accepted metadata request the driver must execute. The token must be
/// handed back to [`SessionController::resolve`] with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRequest {
    pub token: RequestToken,
    pub url: Url,
    pub platform: Platform,
}

/// Raw fetch outcome, shaped by the platform the request was issued for.
#[derive(Debug)]
pub enum InfoPayload {
    Video(RawVideoInfo),
    Carousel(RawMediaSet),
}

/// Owns the single "which platform is active" choice and everything
/// downstream of it: the shared link field, the per-platform selectors, the
/// retrieval session, and the current media state.
#[derive(Debug)]
pub struct SessionController {
    platform: Platform,
    link: String,
    media_kind: MediaKind,
    sub_kind: SubKind,
    session: RetrievalSession,
    media: MediaState,
    encoding: EncodingAdapter,
    carousel: CarouselAdapter,
}

impl SessionController {
    /// Creates a controller against the given backend base URL, idle on the
    /// default platform.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            platform: Platform::default(),
            link: String::new(),
            media_kind: MediaKind::default(),
            sub_kind: SubKind::default(),
            session: RetrievalSession::new(),
            media: MediaState::default(),
            encoding: EncodingAdapter::new(base.clone()),
            carousel: CarouselAdapter::new(base),
        }
    }

    // --- accessors ---

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    #[must_use]
    pub const fn media_kind(&self) -> MediaKind {
        self.media_kind
    }

    #[must_use]
    pub const fn sub_kind(&self) -> SubKind {
        self.sub_kind
    }

    #[must_use]
    pub const fn session(&self) -> &RetrievalSession {
        &self.session
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.session.status()
    }

    #[must_use]
    pub const fn media(&self) -> &MediaState {
        &self.media
    }

    /// The format list the current toggle displays, empty outside the
    /// encoding variant.
    #[must_use]
    pub fn visible_formats(&self) -> &[Format] {
        match &self.media {
            MediaState::Encodings(info) => info.formats(self.media_kind),
            _ => &[],
        }
    }

    /// Proxied preview for the current carousel item, if one resolves.
    #[must_use]
    pub fn preview(&self) -> Option<Url> {
        match &self.media {
            MediaState::Carousel { set, cursor } => self.carousel.preview_url(set, cursor.index()),
            _ => None,
        }
    }

    // --- link editing ---

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    pub fn push_link(&mut self, c: char) {
        self.link.push(c);
    }

    pub fn push_link_str(&mut self, s: &str) {
        self.link.push_str(s);
    }

    pub fn pop_link(&mut self) {
        self.link.pop();
    }

    pub fn clear_link(&mut self) {
        self.link.clear();
    }

    // --- selectors ---

    pub fn set_media_kind(&mut self, kind: MediaKind) {
        self.media_kind = kind;
    }

    /// Flips the video/audio display toggle. Purely a view filter; the
    /// retrieved data is untouched.
    pub const fn toggle_media_kind(&mut self) {
        self.media_kind = self.media_kind.other();
    }

    pub fn set_sub_kind(&mut self, kind: SubKind) {
        self.sub_kind = kind;
    }

    /// Cycles post → reel → story. Takes effect on the next submit (and on
    /// the download route, which follows the current value).
    pub const fn cycle_sub_kind(&mut self) {
        self.sub_kind = self.sub_kind.next();
    }

    // --- transitions ---

    /// Makes `platform` active and hard-resets everything downstream: link,
    /// session, selectors, and media state all return to their defaults in
    /// one step, even when the platform is unchanged. Any in-flight request
    /// is orphaned by the session reset.
    pub fn switch_platform(&mut self, platform: Platform) {
        self.platform = platform;
        self.link.clear();
        self.session.reset();
        self.media = MediaState::None;
        self.media_kind = MediaKind::default();
        self.sub_kind = SubKind::default();
    }

    /// Validates and starts a retrieval for the current platform.
    ///
    /// On acceptance the session is `Loading`, the previous result is gone,
    /// and the returned request carries the token the resolution must
    /// present.
    ///
    /// # Errors
    ///
    /// Returns the blocking notice when the link is empty; no state changes
    /// in that case.
    pub fn submit(&mut self) -> Result<InfoRequest, Notice> {
        gate::check_submit(&self.link)?;

        self.media = MediaState::None;
        let token = self.session.begin();
        let url = match self.platform {
            Platform::YouTube => self.encoding.info_url(&self.link),
            Platform::Instagram => self.carousel.info_url(&self.link, self.sub_kind),
        };
        Ok(InfoRequest {
            token,
            url,
            platform: self.platform,
        })
    }

    /// Applies a fetch outcome under the supersession rules: a stale token
    /// is discarded silently, whatever it carries.
    pub fn resolve(&mut self, token: RequestToken, outcome: Result<InfoPayload, Error>) {
        if !self.session.is_current(token) {
            log::debug!("discarding superseded response (token {token})");
            return;
        }

        match outcome {
            Ok(InfoPayload::Video(raw)) if self.platform == Platform::YouTube => {
                self.media = MediaState::Encodings(EncodingAdapter::normalize(raw));
                self.session.resolve_ok(token);
            }
            Ok(InfoPayload::Carousel(raw)) if self.platform == Platform::Instagram => {
                let set = CarouselAdapter::normalize(raw);
                let cursor = CarouselCursor::new(set.items.len());
                self.media = MediaState::Carousel { set, cursor };
                self.session.resolve_ok(token);
            }
            // A current token implies the platform has not changed since
            // submit, so a shape mismatch is a driver bug; fail like a
            // transport error rather than panicking.
            Ok(_) => {
                log::error!("response shape does not match active platform");
                let message = Error::Status { status: 0 }.user_message(self.platform);
                self.session.resolve_err(token, message);
            }
            Err(err) => {
                log::warn!("retrieval failed: {err}");
                let message = err.user_message(self.platform);
                self.session.resolve_err(token, message);
            }
        }
    }

    /// Validates the download and builds its navigation target.
    ///
    /// For the encoding variant `selection` is the chosen format id; for
    /// the carousel variant the selection is the current item, and the
    /// route depends only on the sub-kind.
    ///
    /// # Errors
    ///
    /// Returns the blocking notice when the link is empty, nothing has been
    /// retrieved, or no selection exists. No side effects on rejection.
    pub fn download_action(&self, selection: Option<&str>) -> Result<Url, Notice> {
        match &self.media {
            MediaState::Encodings(_) => {
                let format_id = gate::check_download(&self.link, selection)?;
                Ok(self.encoding.download_url(&self.link, format_id))
            }
            MediaState::Carousel { set, cursor } => {
                let current = set.items.get(cursor.index()).map(|item| item.url.as_str());
                gate::check_download(&self.link, current)?;
                Ok(self.carousel.download_url(&self.link, self.sub_kind))
            }
            MediaState::None => {
                gate::check_submit(&self.link)?;
                Err(Notice::NoSelection)
            }
        }
    }

    // --- carousel navigation ---

    pub fn carousel_next(&mut self) {
        if let MediaState::Carousel { cursor, .. } = &mut self.media {
            cursor.next();
        }
    }

    pub fn carousel_prev(&mut self) {
        if let MediaState::Carousel { cursor, .. } = &mut self.media {
            cursor.prev();
        }
    }

    pub fn carousel_jump(&mut self, index: usize) {
        if let MediaState::Carousel { cursor, .. } = &mut self.media {
            cursor.jump_to(index);
        }
    }

    /// Current carousel index, 0 outside the carousel variant.
    #[must_use]
    pub const fn carousel_index(&self) -> usize {
        match &self.media {
            MediaState::Carousel { cursor, .. } => cursor.index(),
            _ => 0,
        }
    }
}
