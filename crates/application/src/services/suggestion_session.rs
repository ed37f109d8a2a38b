//! Debounced suggestion session for one input field
//!
//! Turns keystrokes into a suggestion list. Every non-empty text change mints
//! a new request token; a response is applied only while its token is still
//! the session's current one, so a slow answer to an old query can never
//! overwrite the answer to a newer one. Bursts of typing are coalesced by
//! waiting out the debounce interval before the request is issued.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::SuggestionEntry;
use domain::value_objects::FieldId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::GeocodingPort;

/// Configuration for suggestion sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Quiet period after the last keystroke before a search is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_debounce_ms() -> u64 {
    300
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SuggestionConfig {
    /// Create a configuration suitable for testing (no debounce)
    #[must_use]
    pub const fn for_testing() -> Self {
        Self { debounce_ms: 0 }
    }

    /// The debounce interval
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Opaque identifier of one issued query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A query that was accepted by [`SuggestionSession::set_text`] and still
/// has to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    token: RequestToken,
    query: String,
}

impl QueryTicket {
    /// Token the response must carry to be applied
    #[must_use]
    pub const fn token(&self) -> RequestToken {
        self.token
    }

    /// Text to search for
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Result of a text change or fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// The text was empty; results were cleared and nothing was requested
    Cleared,
    /// A newer query replaced this one before it was sent
    Superseded,
    /// The response arrived after a newer query was issued and was ignored
    Discarded,
    /// The response replaced the suggestion list
    Applied {
        /// Number of suggestions now shown
        count: usize,
    },
    /// The search failed; the previous suggestions are still shown
    Failed(ApplicationError),
}

impl FetchOutcome {
    /// True when the suggestion list was replaced
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[derive(Debug, Default)]
struct QuerySession {
    raw_text: String,
    pending: Option<RequestToken>,
    results: Vec<SuggestionEntry>,
    issued: u64,
}

/// Suggestion state of a single input field
pub struct SuggestionSession {
    field: FieldId,
    geocoder: Arc<dyn GeocodingPort>,
    config: SuggestionConfig,
    state: Mutex<QuerySession>,
}

impl fmt::Debug for SuggestionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SuggestionSession")
            .field("field", &self.field)
            .field("config", &self.config)
            .field("raw_text", &state.raw_text)
            .field("pending", &state.pending)
            .field("results", &state.results.len())
            .finish_non_exhaustive()
    }
}

impl SuggestionSession {
    /// Create an empty session for a field
    #[must_use]
    pub fn new(field: FieldId, geocoder: Arc<dyn GeocodingPort>, config: SuggestionConfig) -> Self {
        Self {
            field,
            geocoder,
            config,
            state: Mutex::new(QuerySession::default()),
        }
    }

    /// The field this session belongs to
    #[must_use]
    pub const fn field(&self) -> FieldId {
        self.field
    }

    /// Record a text change
    ///
    /// The text is stored immediately. Empty text clears the suggestions and
    /// returns `None`; anything else becomes the current query and the
    /// returned ticket must be passed to [`SuggestionSession::fetch`].
    pub fn set_text(&self, text: &str) -> Option<QueryTicket> {
        let mut state = self.state.lock();
        state.raw_text = text.to_string();

        if text.trim().is_empty() {
            state.results.clear();
            state.pending = None;
            return None;
        }

        state.issued += 1;
        let token = RequestToken(state.issued);
        state.pending = Some(token);

        Some(QueryTicket {
            token,
            query: text.to_string(),
        })
    }

    /// Debounce, search and apply the result of a ticket
    #[instrument(skip(self, ticket), fields(field = %self.field, token = %ticket.token))]
    pub async fn fetch(&self, ticket: QueryTicket) -> FetchOutcome {
        let debounce = self.config.debounce();
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }

        if !self.is_current(ticket.token) {
            debug!("Query superseded before it was sent");
            return FetchOutcome::Superseded;
        }

        let result = self.geocoder.search(&ticket.query).await;
        self.apply(ticket.token, result)
    }

    /// Record a text change and fetch suggestions for it
    pub async fn update(&self, text: &str) -> FetchOutcome {
        match self.set_text(text) {
            Some(ticket) => self.fetch(ticket).await,
            None => FetchOutcome::Cleared,
        }
    }

    /// Apply a search response if `token` is still current
    ///
    /// A failure keeps the last good suggestions.
    pub fn apply(
        &self,
        token: RequestToken,
        result: Result<Vec<SuggestionEntry>, ApplicationError>,
    ) -> FetchOutcome {
        let mut state = self.state.lock();
        if state.pending != Some(token) {
            debug!(field = %self.field, %token, "Discarding stale suggestions");
            return FetchOutcome::Discarded;
        }
        state.pending = None;

        match result {
            Ok(entries) => {
                let count = entries.len();
                state.results = entries;
                debug!(field = %self.field, %token, count, "Suggestions updated");
                FetchOutcome::Applied { count }
            },
            Err(e) => {
                warn!(field = %self.field, %token, error = %e, "Suggestion search failed");
                FetchOutcome::Failed(e)
            },
        }
    }

    /// Hide all suggestions and ignore any in-flight response
    ///
    /// The typed text is kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.results.clear();
        state.pending = None;
    }

    /// Set the displayed text without searching
    pub fn replace_text(&self, text: &str) {
        let mut state = self.state.lock();
        state.raw_text = text.to_string();
        state.pending = None;
    }

    /// Look up a suggestion of the current list by id
    #[must_use]
    pub fn select(&self, id: &str) -> Option<SuggestionEntry> {
        self.state
            .lock()
            .results
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
    }

    /// The text as typed
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.state.lock().raw_text.clone()
    }

    /// The current suggestions in service order
    #[must_use]
    pub fn results(&self) -> Vec<SuggestionEntry> {
        self.state.lock().results.clone()
    }

    /// True while a query awaits its response
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.state.lock().pending == Some(token)
    }
}
