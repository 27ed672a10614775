//! Debounced city suggestions.
//!
//! Each input event cancels the pending lookup and schedules a new one after
//! a quiet period, so only the latest query reaches the geocoding endpoint
//! while the user is still typing.

use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle, time};
use tracing::debug;

use crate::{model::CitySuggestion, provider::WeatherProvider};

/// Quiet period of input inactivity before the lookup fires.
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this (after trimming) clear the suggestions and
/// issue no network call.
const MIN_QUERY_CHARS: usize = 3;

pub struct SuggestionService {
    provider: Arc<dyn WeatherProvider>,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
    tx: watch::Sender<Vec<CitySuggestion>>,
    rx: watch::Receiver<Vec<CitySuggestion>>,
}

impl SuggestionService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self::with_debounce(provider, DEBOUNCE)
    }

    pub fn with_debounce(provider: Arc<dyn WeatherProvider>, debounce: Duration) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        Self { provider, debounce, pending: None, tx, rx }
    }

    /// Receiver for published suggestion lists.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CitySuggestion>> {
        self.rx.clone()
    }

    /// Feed one input event into the service.
    ///
    /// Cancels any pending lookup. Short queries clear the suggestions
    /// immediately; otherwise a lookup is scheduled after the debounce
    /// window. Lookup failures clear the suggestions silently.
    pub fn on_input(&mut self, query: &str) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let query = query.trim().to_owned();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.tx.send_replace(Vec::new());
            return;
        }

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            time::sleep(debounce).await;

            match provider.search_city(&query).await {
                Ok(suggestions) => {
                    tx.send_replace(suggestions);
                }
                Err(e) => {
                    // Never surfaced to the user; the list just empties.
                    debug!(%query, error = %e, "suggestion lookup failed");
                    tx.send_replace(Vec::new());
                }
            }
        }));
    }

    /// Wait for the in-flight lookup (if any) to publish its result, then
    /// return the current suggestion list.
    pub async fn settled(&mut self) -> Vec<CitySuggestion> {
        if let Some(pending) = self.pending.take() {
            // An aborted predecessor task also lands here; either outcome
            // leaves the channel holding the latest published value.
            let _ = pending.await;
        }
        self.rx.borrow().clone()
    }
}

impl Drop for SuggestionService {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
