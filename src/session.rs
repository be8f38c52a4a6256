//! Retrieval lifecycle state machine with cancel-by-supersession.
//!
//! Exactly one metadata request is tracked at a time. Starting a new one
//! supersedes whatever came before it, whatever its state: every `begin`
//! bumps a monotonic request token, and a resolution is only applied when it
//! still carries the current token. The superseded call is not aborted at
//! the transport level — its eventual resolution is simply discarded — so
//! "last submit wins" holds regardless of response ordering.
//!
//! A request that never resolves leaves the session `Loading` indefinitely;
//! there is deliberately no timeout here. A fresh submit (or a platform
//! switch, which resets the session) is the escape hatch.

/// Token identifying one retrieval attempt. Monotonically increasing.
pub type RequestToken = u64;

/// Lifecycle phase of the current retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// State for the single outstanding metadata request.
#[derive(Debug, Default)]
pub struct RetrievalSession {
    status: SessionStatus,
    error: Option<String>,
    token: RequestToken,
}

impl RetrievalSession {
    /// Creates a fresh idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Message of the most recent failure, if the session is in `Error`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a request is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, SessionStatus::Loading)
    }

    /// Starts a new retrieval, superseding any in-flight one.
    ///
    /// Transitions to `Loading`, clears the previous error, and returns the
    /// token the eventual resolution must present. Valid from any state.
    pub fn begin(&mut self) -> RequestToken {
        self.token += 1;
        self.status = SessionStatus::Loading;
        self.error = None;
        self.token
    }

    /// Whether `token` still identifies the current request.
    #[must_use]
    pub const fn is_current(&self, token: RequestToken) -> bool {
        self.token == token
    }

    /// Applies a successful resolution. Returns `false` (and changes
    /// nothing) when the token is stale.
    pub fn resolve_ok(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.status = SessionStatus::Success;
        self.error = None;
        true
    }

    /// Applies a failed resolution with its user-facing message. Returns
    /// `false` (and changes nothing) when the token is stale.
    pub fn resolve_err(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.status = SessionStatus::Error;
        self.error = Some(message.into());
        true
    }

    /// Returns the session to `Idle` and orphans any in-flight request.
    ///
    /// The token is bumped so that a response to a request issued before the
    /// reset can never be applied afterwards.
    pub fn reset(&mut self) {
        self.token += 1;
        self.status = SessionStatus::Idle;
        self.error = None;
    }
}
