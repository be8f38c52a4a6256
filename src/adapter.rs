//! Platform adapters: request building, response normalization, and
//! download routing.
//!
//! Each adapter knows three things about its platform: how to ask the
//! backend for metadata, how to turn the raw response into the display
//! shape, and which endpoint a download navigates to. Everything else
//! (lifecycle, supersession, gating) lives above in
//! [`crate::controller`].

use url::Url;

use crate::media::{
    Format, ItemKind, MediaSet, RawMediaSet, RawVideoInfo, SubKind, VideoInfo,
};

const INFO_PATH: &str = "/info";
const DOWNLOAD_PATH: &str = "/download";
const CAROUSEL_INFO_PATH: &str = "/instagram-info";
const REEL_DOWNLOAD_PATH: &str = "/instagram-reel-instaloader";
const STORY_DOWNLOAD_PATH: &str = "/instagram-stories-instaloader";
const IMAGE_PROXY_PATH: &str = "/proxy-image";
const VIDEO_PROXY_PATH: &str = "/proxy-video";

fn endpoint(base: &Url, path: &str, params: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    url
}

/// Adapter for the flat encoding-list variant (YouTube).
#[derive(Debug, Clone)]
pub struct EncodingAdapter {
    base: Url,
}

impl EncodingAdapter {
    /// Creates an adapter against the given backend base URL.
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self { base }
    }

    /// Metadata request for `link`.
    #[must_use]
    pub fn info_url(&self, link: &str) -> Url {
        endpoint(&self.base, INFO_PATH, &[("url", link)])
    }

    /// Navigation target that downloads the chosen encoding. Which list the
    /// format was shown in does not matter; the id alone identifies it.
    #[must_use]
    pub fn download_url(&self, link: &str, format_id: &str) -> Url {
        endpoint(
            &self.base,
            DOWNLOAD_PATH,
            &[("url", link), ("format", format_id)],
        )
    }

    /// Normalizes a raw `/info` body. Missing format lists become empty
    /// lists, never null, so the display layer can index freely.
    #[must_use]
    pub fn normalize(raw: RawVideoInfo) -> VideoInfo {
        let to_formats = |raw: Option<Vec<crate::media::RawFormat>>| {
            raw.unwrap_or_default()
                .into_iter()
                .map(|f| Format {
                    id: f.id,
                    ext: f.ext,
                    resolution: f.resolution,
                    fps: f.fps,
                    abr: f.abr,
                    filesize_bytes: f.filesize,
                })
                .collect()
        };

        VideoInfo {
            title: raw.title.unwrap_or_default(),
            channel: raw.channel.unwrap_or_default(),
            duration_seconds: raw.duration,
            thumbnail_url: raw.thumbnail,
            video_formats: to_formats(raw.video_formats),
            audio_formats: to_formats(raw.audio_formats),
        }
    }
}

/// Adapter for the indexed carousel variant (Instagram).
#[derive(Debug, Clone)]
pub struct CarouselAdapter {
    base: Url,
}

impl CarouselAdapter {
    /// Creates an adapter against the given backend base URL.
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self { base }
    }

    /// Metadata request for `link` of the given sub-kind.
    #[must_use]
    pub fn info_url(&self, link: &str, sub_kind: SubKind) -> Url {
        endpoint(
            &self.base,
            CAROUSEL_INFO_PATH,
            &[("url", link), ("type", sub_kind.as_query())],
        )
    }

    /// Navigation target for the download. The route is decided by the
    /// sub-kind alone: the whole carousel or story downloads as one unit,
    /// so the current item never changes the target.
    #[must_use]
    pub fn download_url(&self, link: &str, sub_kind: SubKind) -> Url {
        let path = match sub_kind {
            SubKind::Post | SubKind::Reel => REEL_DOWNLOAD_PATH,
            SubKind::Story => STORY_DOWNLOAD_PATH,
        };
        endpoint(&self.base, path, &[("url", link)])
    }

    /// Normalizes a raw `/instagram-info` body.
    #[must_use]
    pub fn normalize(raw: RawMediaSet) -> MediaSet {
        MediaSet {
            title: raw
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Instagram Media".to_string()),
            count: raw.count.unwrap_or_default(),
            items: raw
                .medias
                .unwrap_or_default()
                .into_iter()
                .map(|m| crate::media::MediaItem {
                    kind: ItemKind::from_wire(&m.kind),
                    url: m.url,
                    preview_url: m.preview,
                })
                .collect(),
            thumbnail_url: raw.thumbnail,
        }
    }

    /// Resolves the preview for the item at `index`, already routed through
    /// the same-origin proxy (origin hosts reject hot-linked fetches).
    ///
    /// Video items play through the video proxy; everything else goes
    /// through the image proxy, preferring the item's own preview, then its
    /// media URL, then the set-level thumbnail. `None` means "no preview
    /// available" and must render as such, not crash.
    #[must_use]
    pub fn preview_url(&self, set: &MediaSet, index: usize) -> Option<Url> {
        let item = set.items.get(index)?;
        match item.kind {
            ItemKind::Video => {
                if item.url.is_empty() {
                    None
                } else {
                    Some(endpoint(&self.base, VIDEO_PROXY_PATH, &[("url", &item.url)]))
                }
            }
            ItemKind::Image => {
                let raw = [
                    item.preview_url.as_deref(),
                    Some(item.url.as_str()),
                    set.thumbnail_url.as_deref(),
                ]
                .into_iter()
                .flatten()
                .find(|candidate| !candidate.is_empty())?;
                Some(endpoint(&self.base, IMAGE_PROXY_PATH, &[("url", raw)]))
            }
        }
    }
}
