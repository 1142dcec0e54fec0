use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    models::{FilterOptions, Recommendation, SortOption},
    services::{
        browse::{BrowseSession, ResultStatus},
        facets::Facets,
    },
};

/// Identifies one search request. Only the most recent ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// What happened to a completed search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result replaced the current snapshot
    Applied,
    /// A newer search was started first; the result was discarded
    Superseded,
}

/// Serializable view of the current search results
#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub query: Option<String>,
    pub searching: bool,
    pub status: ResultStatus,
    pub shown: usize,
    pub total: usize,
    pub products: Vec<Recommendation>,
    pub facets: Facets,
    pub filters: FilterOptions,
    pub sort: Option<SortOption>,
    pub active_filter_count: usize,
    pub last_error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct SearchState {
    latest: u64,
    in_flight: bool,
    query: Option<String>,
    last_error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    session: BrowseSession<Recommendation>,
}

/// Owns the single result session and arbitrates overlapping searches.
///
/// At most one search is considered outstanding. Starting another one
/// supersedes it, and a late result from a superseded search never reaches
/// the session.
#[derive(Debug, Default)]
pub struct SearchCoordinator {
    state: RwLock<SearchState>,
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new search for `query` and returns its ticket
    pub async fn begin(&self, query: &str) -> SearchTicket {
        let mut state = self.state.write().await;

        if state.in_flight {
            tracing::info!(
                superseded = state.latest,
                "Starting search while another is outstanding"
            );
        }

        state.latest += 1;
        state.in_flight = true;
        state.query = Some(query.to_string());

        SearchTicket(state.latest)
    }

    /// Publishes the outcome of the search identified by `ticket`.
    ///
    /// Success replaces the snapshot with `result`. Failure replaces it with
    /// an empty snapshot and records the message. Either way this happens only
    /// if `ticket` is still the latest.
    pub async fn complete(
        &self,
        ticket: SearchTicket,
        result: Result<Vec<Recommendation>, String>,
    ) -> Completion {
        let mut state = self.state.write().await;

        if ticket.0 != state.latest {
            tracing::info!(
                ticket = ticket.0,
                latest = state.latest,
                "Discarding superseded search result"
            );
            return Completion::Superseded;
        }

        state.in_flight = false;
        state.updated_at = Some(Utc::now());

        match result {
            Ok(recommendations) => {
                state.last_error = None;
                state.session.replace_snapshot(recommendations);
            }
            Err(message) => {
                tracing::warn!(ticket = ticket.0, error = %message, "Search failed");
                state.last_error = Some(message);
                state.session.replace_snapshot(Vec::new());
            }
        }

        Completion::Applied
    }

    /// Applies `update` to the result session and returns the resulting view
    pub async fn update<F>(&self, update: F) -> ResultsView
    where
        F: FnOnce(&mut BrowseSession<Recommendation>),
    {
        let mut state = self.state.write().await;
        update(&mut state.session);
        Self::render(&state)
    }

    pub async fn view(&self) -> ResultsView {
        let state = self.state.read().await;
        Self::render(&state)
    }

    fn render(state: &SearchState) -> ResultsView {
        let session = &state.session;
        let (shown, total) = session.counts();

        ResultsView {
            query: state.query.clone(),
            searching: state.in_flight,
            status: session.status(),
            shown,
            total,
            products: session.projection().to_vec(),
            facets: session.facets().clone(),
            filters: session.filters().clone(),
            sort: session.sort().cloned(),
            active_filter_count: session.active_filter_count(),
            last_error: state.last_error.clone(),
            updated_at: state.updated_at,
        }
    }
}
