//! grabdeck - paste a link, pick a variant, save the media.
//!
//! This library holds the client-side orchestration for a media resolver
//! backend: the retrieval session state machine, the two platform adapters
//! (flat encoding lists vs. an indexed carousel), and the coordinator that
//! ties them to one shared link field. It is fully driveable without a
//! terminal or a network; the `tui` feature adds the interactive front end.
//!
//! # Example
//!
//! ```
//! use grabdeck::controller::{InfoPayload, MediaState, SessionController};
//! use grabdeck::media::RawVideoInfo;
//! use grabdeck::session::SessionStatus;
//! use url::Url;
//!
//! let base = Url::parse("http://127.0.0.1:5000").unwrap();
//! let mut controller = SessionController::new(base);
//!
//! controller.set_link("https://youtu.be/abc");
//! let request = controller.submit().expect("link is non-empty");
//! // ... execute request.url against the backend, then hand back the outcome:
//! controller.resolve(request.token, Ok(InfoPayload::Video(RawVideoInfo::default())));
//!
//! assert_eq!(controller.status(), SessionStatus::Success);
//! assert!(matches!(controller.media(), MediaState::Encodings(_)));
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod adapter;
pub mod backend;
pub mod carousel;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod gate;
pub mod link;
pub mod media;
pub mod navigate;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use adapter::{CarouselAdapter, EncodingAdapter};
pub use backend::BackendClient;
pub use carousel::CarouselCursor;
pub use config::ClientConfig;
pub use controller::{InfoPayload, InfoRequest, MediaState, SessionController};
pub use error::{Error, Result};
pub use format::format_approx_size;
pub use gate::{Notice, can_download, can_submit};
pub use link::extract_link;
pub use media::{MediaKind, Platform, SubKind};
pub use navigate::{HttpNavigator, Navigate};
pub use session::{RequestToken, RetrievalSession, SessionStatus};
