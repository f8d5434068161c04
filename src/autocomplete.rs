//! Autocomplete session controller
//!
//! Client-side incremental search: debounces keystrokes, issues one query
//! per settled input against a `SearchEndpoint`, and exposes a read-only
//! `{ query, results, is_open }` snapshot for rendering.
//!
//! The session moves through three phases: Idle (nothing pending),
//! Debouncing (keystroke received, timer armed), Awaiting (request in
//! flight). Every input change bumps a generation counter; responses carry
//! the generation of the input that spawned them and are discarded unless
//! it is still current, so a superseded request can never overwrite newer
//! results regardless of arrival order.

use crate::catalog::Product;
use crate::error::AppError;
use crate::http::client_with_timeout;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Delay between the last keystroke and the query being issued
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Bound on the Awaiting phase; a slower request resolves as empty
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Ranked product search, as seen from the session controller
#[async_trait]
pub trait SearchEndpoint: Send + Sync {
    /// Return ranked products for a raw query. An empty query yields an
    /// empty result, not an error.
    async fn search(&self, query: &str) -> Result<Vec<Product>, AppError>;
}

/// Search endpoint backed by the service's HTTP API
/// (`GET {base_url}?q=<query>`, bare JSON array response).
pub struct HttpSearchEndpoint {
    client: Client,
    base_url: String,
}

impl HttpSearchEndpoint {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: client_with_timeout(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SearchEndpoint for HttpSearchEndpoint {
    async fn search(&self, query: &str) -> Result<Vec<Product>, AppError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::CatalogFetchFailed(format!(
                "search endpoint returned HTTP {}",
                response.status()
            )));
        }

        let products: Vec<Product> = response.json().await?;
        Ok(products)
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Debouncing,
    Awaiting,
}

/// Read-only snapshot handed to the UI
#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteState {
    pub query: String,
    pub results: Vec<Product>,
    pub is_open: bool,
}

enum SessionEvent {
    DebounceElapsed {
        generation: u64,
    },
    ResultsReady {
        generation: u64,
        results: Vec<Product>,
    },
}

/// Autocomplete session state machine.
///
/// Single-owner: the UI forwards keystrokes via [`handle_input`] and
/// submission via [`submit`], pumps completions via [`pump`] or
/// [`next_event`], and renders [`snapshot`]. Nothing else mutates the
/// session.
///
/// [`handle_input`]: AutocompleteSession::handle_input
/// [`submit`]: AutocompleteSession::submit
/// [`pump`]: AutocompleteSession::pump
/// [`next_event`]: AutocompleteSession::next_event
/// [`snapshot`]: AutocompleteSession::snapshot
pub struct AutocompleteSession<E: SearchEndpoint + 'static> {
    endpoint: Arc<E>,
    debounce: Duration,
    request_timeout: Duration,
    query: String,
    results: Vec<Product>,
    is_open: bool,
    phase: Phase,
    generation: u64,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    pending: Option<JoinHandle<()>>,
}

impl<E: SearchEndpoint + 'static> AutocompleteSession<E> {
    #[allow(dead_code)]
    pub fn new(endpoint: Arc<E>) -> Self {
        Self::with_timing(endpoint, DEFAULT_DEBOUNCE, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timing(endpoint: Arc<E>, debounce: Duration, request_timeout: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            endpoint,
            debounce,
            request_timeout,
            query: String::new(),
            results: Vec::new(),
            is_open: false,
            phase: Phase::Idle,
            generation: 0,
            events_tx,
            events_rx,
            pending: None,
        }
    }

    /// Handle an input change.
    ///
    /// Cancels a pending debounce timer; a request already in flight is
    /// left to finish and discarded by generation on arrival. Empty input
    /// clears the results and closes the panel immediately without
    /// touching the network.
    pub fn handle_input(&mut self, text: &str) {
        if self.phase == Phase::Debouncing {
            if let Some(handle) = self.pending.take() {
                handle.abort();
            }
        }

        self.generation += 1;
        self.query = text.to_string();

        if text.trim().is_empty() {
            self.results.clear();
            self.is_open = false;
            self.phase = Phase::Idle;
            return;
        }

        self.phase = Phase::Debouncing;

        let generation = self.generation;
        let query = text.to_string();
        let endpoint = self.endpoint.clone();
        let events = self.events_tx.clone();
        let debounce = self.debounce;
        let request_timeout = self.request_timeout;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let _ = events.send(SessionEvent::DebounceElapsed { generation });

            let results = match tokio::time::timeout(request_timeout, endpoint.search(&query)).await
            {
                Ok(Ok(results)) => results,
                Ok(Err(err)) => {
                    warn!(
                        "Autocomplete query '{}' failed ({}): {}",
                        query,
                        err.error_code(),
                        err
                    );
                    Vec::new()
                }
                Err(_) => {
                    warn!("Autocomplete query '{}' timed out", query);
                    Vec::new()
                }
            };

            let _ = events.send(SessionEvent::ResultsReady {
                generation,
                results,
            });
        }));
    }

    /// Handle form submission.
    ///
    /// Cancels pending work and returns the navigation target for the full
    /// results view, or `None` when the current query is blank. Does not
    /// wait for any in-flight autocomplete request.
    pub fn submit(&mut self) -> Option<String> {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
        self.phase = Phase::Idle;

        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        Some(format!("/search?q={}", urlencoding::encode(query)))
    }

    /// Apply all completions that have arrived so far, without blocking.
    #[allow(dead_code)]
    pub fn pump(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    /// Wait for the next completion and apply it.
    pub async fn next_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::DebounceElapsed { generation } if generation == self.generation => {
                self.phase = Phase::Awaiting;
            }
            SessionEvent::ResultsReady {
                generation,
                results,
            } if generation == self.generation => {
                self.is_open = !results.is_empty();
                self.results = results;
                self.phase = Phase::Idle;
                self.pending = None;
            }
            // Superseded input: last write wins by identity, not arrival order
            _ => {}
        }
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snapshot(&self) -> AutocompleteState {
        AutocompleteState {
            query: self.query.clone(),
            results: self.results.clone(),
            is_open: self.is_open,
        }
    }
}

impl<E: SearchEndpoint + 'static> Drop for AutocompleteSession<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
