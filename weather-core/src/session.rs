//! Search lifecycle around a [`WidgetStore`].
//!
//! Each search runs in its own task and reports back over a channel. The
//! session applies resolutions in the order they arrive, so when searches
//! overlap the last one to land is what gets displayed, whatever order they
//! were started in. Nothing is cancelled or discarded as stale.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::{
    error::QueryError,
    model::WeatherResult,
    provider::{WeatherProvider, validate_city},
    state::WidgetStore,
};

/// One finished search, as applied to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub request_id: u64,
    pub city: String,
    pub outcome: Result<WeatherResult, QueryError>,
}

#[derive(Debug)]
pub struct SearchSession {
    provider: Arc<dyn WeatherProvider>,
    store: WidgetStore,
    next_id: u64,
    pending: usize,
    tx: mpsc::UnboundedSender<Resolution>,
    rx: mpsc::UnboundedReceiver<Resolution>,
}

impl SearchSession {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            provider,
            store: WidgetStore::new(),
            next_id: 1,
            pending: 0,
            tx,
            rx,
        }
    }

    /// Start a search for `city` and return its request id.
    ///
    /// Blank input is rejected here and leaves the store untouched. Must be
    /// called from within a tokio runtime.
    pub fn search(&mut self, city: &str) -> Result<u64, QueryError> {
        let city = validate_city(city)?.to_string();

        let request_id = self.next_id;
        self.next_id += 1;
        self.pending += 1;
        self.store.begin_search();

        tracing::debug!(request_id, %city, "search started");

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = provider.query(&city).await;
            // The receiver lives as long as the session; a send error means it was dropped.
            let _ = tx.send(Resolution { request_id, city, outcome });
        });

        Ok(request_id)
    }

    /// Wait for the next search to finish and apply it.
    ///
    /// Returns `None` immediately when nothing is pending. Cancel safe.
    pub async fn next_resolution(&mut self) -> Option<Resolution> {
        if self.pending == 0 {
            return None;
        }

        let resolution = self.rx.recv().await?;
        self.pending -= 1;

        match &resolution.outcome {
            Ok(result) => tracing::debug!(
                request_id = resolution.request_id,
                location = %result.location,
                "search resolved"
            ),
            Err(err) => tracing::warn!(
                request_id = resolution.request_id,
                city = %resolution.city,
                error = %err,
                "search failed"
            ),
        }

        self.store.apply(resolution.outcome.clone(), Utc::now());
        Some(resolution)
    }

    /// Number of searches started but not yet applied.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn store(&self) -> &WidgetStore {
        &self.store
    }
}
