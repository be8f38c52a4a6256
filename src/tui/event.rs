//! Event types for TUI mode.

use std::path::PathBuf;

use crate::controller::InfoPayload;
use crate::error::Error;
use crate::session::RequestToken;

/// Events sent from spawned fetch and download tasks to the TUI.
#[derive(Debug)]
pub enum AppEvent {
    /// A metadata request resolved. The token decides whether the outcome
    /// still applies or has been superseded.
    InfoResolved {
        token: RequestToken,
        outcome: Result<InfoPayload, Error>,
    },
    /// A download finished streaming to disk.
    DownloadFinished { path: PathBuf },
    /// A download failed after leaving the gate.
    DownloadFailed { message: String },
}
