//! Application state model.

use std::sync::Arc;

use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use crate::backend::BackendClient;
use crate::config::ClientConfig;
use crate::controller::SessionController;
use crate::gate::Notice;
use crate::navigate::{HttpNavigator, Navigate};

use super::event::AppEvent;

pub struct App {
    pub controller: SessionController,
    pub backend: BackendClient,
    pub navigator: Arc<dyn Navigate>,
    /// Blocking notice; while set, any key only dismisses it.
    pub notice: Option<Notice>,
    pub status: String,
    pub downloading: bool,
    pub should_quit: bool,
    /// Highlight within the visible format list (encoding variant only).
    pub format_list: ListState,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    /// Builds the app against the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured base URL is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(
        config: &ClientConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> crate::Result<Self> {
        let base = config.base_url()?;
        let backend = BackendClient::new()?;
        let navigator = Arc::new(HttpNavigator::new(
            backend.http().clone(),
            config.download.dir.clone(),
        ));
        Ok(Self {
            controller: SessionController::new(base),
            backend,
            navigator,
            notice: None,
            status: String::new(),
            downloading: false,
            should_quit: false,
            format_list: ListState::default(),
            event_tx,
        })
    }

    /// Format id of the highlighted row, if any.
    #[must_use]
    pub fn selected_format_id(&self) -> Option<String> {
        let formats = self.controller.visible_formats();
        self.format_list
            .selected()
            .and_then(|i| formats.get(i))
            .map(|f| f.id.clone())
    }

    /// Re-clamps the format highlight after the visible list changed
    /// (new retrieval, toggled media kind, platform switch).
    pub fn sync_format_selection(&mut self) {
        let len = self.controller.visible_formats().len();
        if len == 0 {
            self.format_list.select(None);
        } else {
            let selected = self.format_list.selected().unwrap_or(0).min(len - 1);
            self.format_list.select(Some(selected));
        }
    }

    /// Moves the format highlight down, wrapping.
    pub fn select_next_format(&mut self) {
        let len = self.controller.visible_formats().len();
        if len > 0 {
            let i = self.format_list.selected().unwrap_or(0);
            self.format_list.select(Some((i + 1) % len));
        }
    }

    /// Moves the format highlight up, wrapping.
    pub fn select_prev_format(&mut self) {
        let len = self.controller.visible_formats().len();
        if len > 0 {
            let i = self.format_list.selected().unwrap_or(0);
            self.format_list
                .select(Some(if i == 0 { len - 1 } else { i - 1 }));
        }
    }
}
