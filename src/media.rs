//! Media data model shared by both platform variants.
//!
//! Raw types mirror the backend JSON field-for-field; the display types are
//! what the rest of the crate works with after normalization (see
//! [`crate::adapter`]).

use serde::Deserialize;

use crate::format::format_approx_size;

/// The platform a link belongs to. Exactly one is active at a time;
/// switching it is the single reset trigger for all downstream state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    YouTube,
    Instagram,
}

impl Platform {
    /// Human-readable platform name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Instagram => "Instagram",
        }
    }

    /// The other platform, for toggle-style switching.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::YouTube => Self::Instagram,
            Self::Instagram => Self::YouTube,
        }
    }

    /// Status-line text shown while a retrieval is in flight.
    #[must_use]
    pub const fn loading_label(self) -> &'static str {
        match self {
            Self::YouTube => "Fetching video info...",
            Self::Instagram => "Getting Instagram media...",
        }
    }
}

/// Which encoding list is displayed for the YouTube variant. Purely a
/// display filter; the download action never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Video,
    Audio,
}

impl MediaKind {
    /// Toggle between the two lists.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Video => Self::Audio,
            Self::Audio => Self::Video,
        }
    }

    /// Toggle label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
        }
    }
}

/// What kind of Instagram link is being retrieved. Chosen before the
/// request; also decides the download route afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubKind {
    #[default]
    Post,
    Reel,
    Story,
}

impl SubKind {
    pub const ALL: [Self; 3] = [Self::Post, Self::Reel, Self::Story];

    /// Value sent as the `type` query parameter.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Reel => "reel",
            Self::Story => "story",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Post => "Post",
            Self::Reel => "Reel",
            Self::Story => "Story",
        }
    }

    /// Next kind in display order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Post => Self::Reel,
            Self::Reel => Self::Story,
            Self::Story => Self::Post,
        }
    }
}

/// Kind of a single carousel item. Anything the backend does not call a
/// video renders through the image preview path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Video,
    Image,
}

impl ItemKind {
    /// Maps the backend's `type` string. Only `video` is special; any other
    /// value previews as an image.
    #[must_use]
    pub fn from_wire(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case("video") {
            Self::Video
        } else {
            Self::Image
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// One encoding variant as the backend reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFormat {
    pub id: String,
    pub ext: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
}

/// `/info` response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub video_formats: Option<Vec<RawFormat>>,
    #[serde(default)]
    pub audio_formats: Option<Vec<RawFormat>>,
}

/// One carousel entry as the backend reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMediaItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub preview: Option<String>,
}

/// `/instagram-info` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMediaSet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub medias: Option<Vec<RawMediaItem>>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

// ============================================================================
// Display types
// ============================================================================

/// One selectable encoding variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    /// Stable key used to request a download; unique within its list.
    pub id: String,
    pub ext: String,
    pub resolution: Option<String>,
    pub fps: Option<f64>,
    pub abr: Option<f64>,
    pub filesize_bytes: Option<u64>,
}

impl Format {
    /// Row title when shown in the video list, e.g. `1080p @ 30fps`.
    #[must_use]
    pub fn video_label(&self) -> String {
        match (self.resolution.as_deref(), self.fps) {
            (Some(res), Some(fps)) => format!("{res} @ {fps:.0}fps"),
            (Some(res), None) => res.to_string(),
            (None, Some(fps)) => format!("Unknown @ {fps:.0}fps"),
            (None, None) => "Unknown".to_string(),
        }
    }

    /// Row title when shown in the audio list, e.g. `128 kbps`.
    #[must_use]
    pub fn audio_label(&self) -> String {
        self.abr
            .map_or_else(|| "Audio".to_string(), |abr| format!("{abr:.0} kbps"))
    }

    /// Detail line, e.g. `MP4 • ~12.3 MB`. The size clause is dropped when
    /// the backend did not report one.
    #[must_use]
    pub fn detail(&self) -> String {
        let ext = self.ext.to_uppercase();
        self.filesize_bytes.map_or_else(
            || ext.clone(),
            |bytes| format!("{ext} \u{2022} {}", format_approx_size(bytes)),
        )
    }
}

/// Normalized YouTube metadata: a flat list of encoding variants per kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoInfo {
    pub title: String,
    pub channel: String,
    pub duration_seconds: Option<u64>,
    pub thumbnail_url: Option<String>,
    pub video_formats: Vec<Format>,
    pub audio_formats: Vec<Format>,
}

impl VideoInfo {
    /// The list the given toggle displays. Ordering is exactly as received.
    #[must_use]
    pub fn formats(&self, kind: MediaKind) -> &[Format] {
        match kind {
            MediaKind::Video => &self.video_formats,
            MediaKind::Audio => &self.audio_formats,
        }
    }

    /// Duration line, the raw seconds count (`185 sec`), or `Unknown` when
    /// the backend reported none. A zero duration also reads as unknown.
    #[must_use]
    pub fn duration_label(&self) -> String {
        match self.duration_seconds {
            Some(secs) if secs > 0 => format!("{secs} sec"),
            _ => "Unknown".to_string(),
        }
    }
}

/// One normalized carousel item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub kind: ItemKind,
    pub url: String,
    pub preview_url: Option<String>,
}

/// Normalized Instagram metadata: an indexed carousel of media items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaSet {
    pub title: String,
    /// Backend-reported item count. Display only; navigation bounds always
    /// come from `items.len()`.
    pub count: u64,
    pub items: Vec<MediaItem>,
    pub thumbnail_url: Option<String>,
}

impl MediaSet {
    /// Header line under the caption.
    #[must_use]
    pub fn count_label(&self) -> String {
        if self.count > 1 {
            format!("Carousel \u{2022} {} items", self.count)
        } else {
            "Single media".to_string()
        }
    }
}
