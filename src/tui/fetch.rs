//! Fetch and download task management and event handling.
//!
//! State mutation stays on the event loop; the tasks spawned here only do
//! I/O and report back through the app's event channel.

use crate::controller::InfoPayload;
use crate::media::{Platform, RawMediaSet, RawVideoInfo};
use crate::session::SessionStatus;

use super::app::App;
use super::event::AppEvent;

/// Validates and spawns the metadata fetch for the current platform.
///
/// On gate rejection the notice becomes modal and nothing is spawned. The
/// resolution is tagged with the request token, so a response arriving
/// after a newer submit (or a platform switch) is discarded by the
/// controller.
pub fn start_fetch(app: &mut App) {
    let request = match app.controller.submit() {
        Ok(request) => request,
        Err(notice) => {
            app.notice = Some(notice);
            return;
        }
    };

    app.status = request.platform.loading_label().to_string();
    app.sync_format_selection();

    let tx = app.event_tx.clone();
    let backend = app.backend.clone();
    tokio::spawn(async move {
        let outcome = match request.platform {
            Platform::YouTube => backend
                .get_info::<RawVideoInfo>(request.url)
                .await
                .map(InfoPayload::Video),
            Platform::Instagram => backend
                .get_info::<RawMediaSet>(request.url)
                .await
                .map(InfoPayload::Carousel),
        };
        let _ = tx.send(AppEvent::InfoResolved {
            token: request.token,
            outcome,
        });
    });
}

/// Validates and spawns the download for the current selection.
///
/// The navigation side effect only happens when the gate passes; a
/// rejection surfaces as the modal notice and spawns nothing.
pub fn start_download(app: &mut App) {
    let selection = app.selected_format_id();
    let target = match app.controller.download_action(selection.as_deref()) {
        Ok(target) => target,
        Err(notice) => {
            app.notice = Some(notice);
            return;
        }
    };

    app.downloading = true;
    app.status = "Downloading...".to_string();

    let tx = app.event_tx.clone();
    let navigator = app.navigator.clone();
    tokio::spawn(async move {
        match navigator.open(&target).await {
            Ok(path) => {
                let _ = tx.send(AppEvent::DownloadFinished { path });
            }
            Err(err) => {
                log::error!("download failed: {err}");
                let _ = tx.send(AppEvent::DownloadFailed {
                    message: "Download failed".to_string(),
                });
            }
        }
    });
}

/// Applies one task event to the app state.
pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::InfoResolved { token, outcome } => {
            app.controller.resolve(token, outcome);
            app.sync_format_selection();
            match app.controller.status() {
                SessionStatus::Success => app.status = "Ready".to_string(),
                SessionStatus::Error => app.status.clear(),
                // Superseded resolution: a newer request owns the status line.
                SessionStatus::Idle | SessionStatus::Loading => {}
            }
        }
        AppEvent::DownloadFinished { path } => {
            app.downloading = false;
            app.status = format!("Saved {}", path.display());
        }
        AppEvent::DownloadFailed { message } => {
            app.downloading = false;
            app.status = message;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::{Error, Result};
    use crate::gate::Notice;
    use crate::navigate::Navigate;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;
    use url::Url;

    /// Navigator double that records every navigation instead of fetching.
    #[derive(Default)]
    struct RecordingNavigator {
        opened: Mutex<Vec<Url>>,
    }

    impl RecordingNavigator {
        fn opened(&self) -> Vec<Url> {
            self.opened.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Navigate for RecordingNavigator {
        async fn open(&self, url: &Url) -> Result<PathBuf> {
            self.opened.lock().unwrap().push(url.clone());
            Ok(PathBuf::from("recorded"))
        }
    }

    fn test_app_with_recorder() -> (
        App,
        Arc<RecordingNavigator>,
        mpsc::UnboundedReceiver<AppEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(&ClientConfig::default(), tx).unwrap();
        let recorder = Arc::new(RecordingNavigator::default());
        app.navigator = recorder.clone();
        (app, recorder, rx)
    }

    fn resolved_video(app: &mut App, json: &str) {
        let request = app.controller.submit().unwrap();
        let raw = serde_json::from_str(json).unwrap();
        handle_event(
            app,
            AppEvent::InfoResolved {
                token: request.token,
                outcome: Ok(InfoPayload::Video(raw)),
            },
        );
    }

    #[tokio::test]
    async fn fetch_with_empty_link_raises_notice() {
        let (mut app, _recorder, mut rx) = test_app_with_recorder();
        start_fetch(&mut app);
        assert_eq!(app.notice, Some(Notice::EmptyLink));
        assert!(!app.controller.session().is_loading());
        // Nothing was spawned.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn download_never_navigates_with_empty_link() {
        let (mut app, recorder, _rx) = test_app_with_recorder();
        start_download(&mut app);
        assert_eq!(app.notice, Some(Notice::EmptyLink));
        assert!(recorder.opened().is_empty());
        assert!(!app.downloading);
    }

    #[tokio::test]
    async fn download_never_navigates_without_selection() {
        let (mut app, recorder, _rx) = test_app_with_recorder();
        app.controller.set_link("https://y/x");
        resolved_video(&mut app, r#"{"videoFormats":[]}"#);

        start_download(&mut app);
        assert_eq!(app.notice, Some(Notice::NoSelection));
        assert!(recorder.opened().is_empty());
    }

    #[tokio::test]
    async fn download_navigates_for_selected_format() {
        let (mut app, recorder, mut rx) = test_app_with_recorder();
        app.controller.set_link("https://y/x");
        resolved_video(&mut app, r#"{"videoFormats":[{"id":"f1","ext":"mp4"}]}"#);
        assert_eq!(app.selected_format_id().as_deref(), Some("f1"));

        start_download(&mut app);
        assert!(app.notice.is_none());
        assert!(app.downloading);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::DownloadFinished { .. }));

        let opened = recorder.opened();
        assert_eq!(opened.len(), 1);
        let query = opened[0].query().unwrap();
        assert!(query.contains("url=https%3A%2F%2Fy%2Fx"));
        assert!(query.contains("format=f1"));
    }

    #[tokio::test]
    async fn resolved_event_updates_status() {
        let (mut app, _recorder, _rx) = test_app_with_recorder();
        app.controller.set_link("https://y/x");
        resolved_video(&mut app, r#"{"videoFormats":[{"id":"f1","ext":"mp4"}]}"#);

        assert_eq!(app.status, "Ready");
        assert_eq!(app.format_list.selected(), Some(0));
    }

    #[tokio::test]
    async fn error_event_clears_status_line() {
        let (mut app, _recorder, _rx) = test_app_with_recorder();
        app.controller.set_link("https://y/x");
        let request = app.controller.submit().unwrap();
        handle_event(
            &mut app,
            AppEvent::InfoResolved {
                token: request.token,
                outcome: Err(Error::Status { status: 500 }),
            },
        );

        // The error renders from the session; the status line stays out of
        // the way.
        assert!(app.status.is_empty());
        assert_eq!(
            app.controller.session().error(),
            Some("Server error while fetching YouTube info")
        );
    }

    #[tokio::test]
    async fn stale_resolution_keeps_loading_status() {
        let (mut app, _recorder, _rx) = test_app_with_recorder();
        app.controller.set_link("https://y/first");
        let first = app.controller.submit().unwrap();
        let second = app.controller.submit().unwrap();
        app.status = "Fetching video info...".to_string();

        handle_event(
            &mut app,
            AppEvent::InfoResolved {
                token: first.token,
                outcome: Err(Error::Status { status: 500 }),
            },
        );

        // The stale failure neither errors the session nor touches the line.
        assert!(app.controller.session().is_loading());
        assert_eq!(app.status, "Fetching video info...");

        handle_event(
            &mut app,
            AppEvent::InfoResolved {
                token: second.token,
                outcome: Ok(InfoPayload::Video(serde_json::from_str("{}").unwrap())),
            },
        );
        assert_eq!(app.status, "Ready");
    }

    #[tokio::test]
    async fn download_outcome_events_reset_flag() {
        let (mut app, _recorder, _rx) = test_app_with_recorder();
        app.downloading = true;
        handle_event(
            &mut app,
            AppEvent::DownloadFinished {
                path: PathBuf::from("/tmp/clip.mp4"),
            },
        );
        assert!(!app.downloading);
        assert_eq!(app.status, "Saved /tmp/clip.mp4");

        app.downloading = true;
        handle_event(
            &mut app,
            AppEvent::DownloadFailed {
                message: "Download failed".to_string(),
            },
        );
        assert!(!app.downloading);
        assert_eq!(app.status, "Download failed");
    }
}
